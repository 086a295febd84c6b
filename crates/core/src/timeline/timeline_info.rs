use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimelineError {
    #[error("failed to read timeline from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid timeline JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("framesCounts has {counts} entries but framesDurations has {durations}")]
    LengthMismatch { counts: usize, durations: usize },
    #[error("timeScale must be positive")]
    ZeroTimeScale,
}

/// Variable frame-rate timeline described as runs of equal-duration frames.
///
/// `frames_counts[i]` frames each last `frames_durations[i]` timebase units;
/// `time_scale` timebase units make one second.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineInfo {
    pub frames_counts: Vec<u64>,
    pub frames_durations: Vec<u64>,
    pub time_scale: u64,
}

impl TimelineInfo {
    pub fn new(frames_counts: Vec<u64>, frames_durations: Vec<u64>, time_scale: u64) -> Self {
        Self {
            frames_counts,
            frames_durations,
            time_scale,
        }
    }

    /// A constant frame-rate timeline of `total_frames` frames.
    pub fn constant(total_frames: u64, frame_duration: u64, time_scale: u64) -> Self {
        Self::new(vec![total_frames], vec![frame_duration], time_scale)
    }

    pub fn from_json_str(json: &str) -> Result<Self, TimelineError> {
        let timeline: TimelineInfo = serde_json::from_str(json)?;
        timeline.validate()?;
        Ok(timeline)
    }

    pub fn load(path: &Path) -> Result<Self, TimelineError> {
        let json = fs::read_to_string(path).map_err(|source| TimelineError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let timeline = Self::from_json_str(&json)?;
        log::info!(
            "Loaded timeline from {} ({} frames, timescale {})",
            path.display(),
            timeline.total_frames(),
            timeline.time_scale
        );
        Ok(timeline)
    }

    /// Checks the positional pairing of runs and the timebase.
    pub fn validate(&self) -> Result<(), TimelineError> {
        if self.frames_counts.len() != self.frames_durations.len() {
            return Err(TimelineError::LengthMismatch {
                counts: self.frames_counts.len(),
                durations: self.frames_durations.len(),
            });
        }
        if self.time_scale == 0 {
            return Err(TimelineError::ZeroTimeScale);
        }
        Ok(())
    }

    pub fn total_frames(&self) -> u64 {
        self.frames_counts.iter().sum()
    }

    /// Runs as `(count, duration)` pairs.
    pub fn runs(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.frames_counts
            .iter()
            .copied()
            .zip(self.frames_durations.iter().copied())
    }
}
