use std::path::Path;

use crate::shared::sequence_metadata::SequenceMetadata;
use crate::shared::surface::Surface;

/// One decoded frame and the time it is shown at.
#[derive(Clone, Debug, PartialEq)]
pub struct TimedFrame {
    pub index: usize,
    pub timestamp_seconds: f64,
    pub surface: Surface,
}

/// Reads frames from an image sequence or a single image.
///
/// Implementations handle decoding while the pipeline only sees RGBA
/// surfaces and their presentation timestamps.
pub trait FrameSource: Send {
    /// Opens the source and returns its metadata.
    fn open(&mut self, path: &Path) -> Result<SequenceMetadata, Box<dyn std::error::Error>>;

    /// Returns an iterator over frames in presentation order.
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<TimedFrame, Box<dyn std::error::Error>>> + '_>;

    /// Releases any resources held by the source.
    fn close(&mut self);
}
