use std::path::Path;

use crate::shared::surface::Surface;

/// Writes a presented frame to an image file.
pub trait ImageWriter: Send {
    fn write(&self, path: &Path, surface: &Surface) -> Result<(), Box<dyn std::error::Error>>;
}
