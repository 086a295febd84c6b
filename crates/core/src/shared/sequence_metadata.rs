use std::path::PathBuf;

/// Dimensions and timing of an opened frame sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct SequenceMetadata {
    pub width: u32,
    pub height: u32,
    /// Frames per second used to derive timestamps; 0 for a single image.
    pub fps: f64,
    pub total_frames: usize,
    pub source_path: Option<PathBuf>,
}

impl SequenceMetadata {
    /// Presentation time of frame `index`, in seconds.
    pub fn timestamp_of(&self, index: usize) -> f64 {
        if self.fps > 0.0 {
            index as f64 / self.fps
        } else {
            0.0
        }
    }
}
