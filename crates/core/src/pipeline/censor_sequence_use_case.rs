use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::video::domain::frame_source::FrameSource;
use crate::video::domain::image_writer::ImageWriter;

use super::playback_session::{PlaybackSession, RenderStatus};

/// Progress callback: `(frames_done, total_frames)`; returning `false` cancels.
pub type ProgressFn = Box<dyn Fn(usize, usize) -> bool + Send>;

/// Totals for one censored sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CensorSummary {
    pub frames_written: usize,
    pub regions_drawn: usize,
    pub regions_skipped: usize,
    pub cancelled: bool,
}

/// Output file name for frame `index`.
pub fn output_frame_path(output_dir: &Path, index: usize) -> PathBuf {
    output_dir.join(format!("frame_{index:06}.png"))
}

/// Offline censoring pipeline: read → resolve → synthesize → composite →
/// flatten → write, one frame at a time.
pub struct CensorSequenceUseCase {
    source: Box<dyn FrameSource>,
    writer: Box<dyn ImageWriter>,
    session: PlaybackSession,
    on_progress: Option<ProgressFn>,
    cancelled: Arc<AtomicBool>,
}

impl CensorSequenceUseCase {
    pub fn new(
        source: Box<dyn FrameSource>,
        writer: Box<dyn ImageWriter>,
        session: PlaybackSession,
        on_progress: Option<ProgressFn>,
        cancelled: Option<Arc<AtomicBool>>,
    ) -> Self {
        Self {
            source,
            writer,
            session,
            on_progress,
            cancelled: cancelled.unwrap_or_else(|| Arc::new(AtomicBool::new(false))),
        }
    }

    pub fn execute(
        &mut self,
        input_path: &Path,
        output_dir: &Path,
    ) -> Result<CensorSummary, Box<dyn std::error::Error>> {
        let metadata = self.source.open(input_path)?;
        let total = metadata.total_frames;
        let mut summary = CensorSummary::default();

        let outcome = self.process_frames(total, output_dir, &mut summary);
        self.source.close();
        outcome?;

        if summary.cancelled {
            log::info!("Cancelled after {} frame(s)", summary.frames_written);
        }
        self.session.finish();
        Ok(summary)
    }

    fn process_frames(
        &mut self,
        total: usize,
        output_dir: &Path,
        summary: &mut CensorSummary,
    ) -> Result<(), Box<dyn std::error::Error>> {
        for frame in self.source.frames() {
            if self.cancelled.load(Ordering::Relaxed) {
                summary.cancelled = true;
                break;
            }
            let frame = frame?;

            match self.session.render(&frame.surface, frame.timestamp_seconds) {
                RenderStatus::Rendered(outcome) => {
                    summary.regions_drawn += outcome.report.drawn;
                    summary.regions_skipped += outcome.report.skipped;
                }
                RenderStatus::SourceUnavailable => {
                    log::warn!("Frame {} has no pixels, writing it unchanged", frame.index);
                }
                RenderStatus::Unchanged | RenderStatus::Paused => {}
            }

            let presented = self.session.present(&frame.surface);
            self.writer
                .write(&output_frame_path(output_dir, frame.index), &presented)?;
            summary.frames_written += 1;

            self.session.report_progress(summary.frames_written, total);
            if let Some(cb) = &self.on_progress {
                if !cb(summary.frames_written, total) {
                    self.cancelled.store(true, Ordering::Relaxed);
                }
            }
        }
        Ok(())
    }
}
