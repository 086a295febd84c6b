use std::path::Path;

use crate::shared::surface::Surface;
use crate::video::domain::image_writer::ImageWriter;

/// Writes presented frames with the `image` crate.
///
/// Frames are flattened to RGB so JPEG output works as well as PNG; the
/// format follows the file extension.
pub struct ImageFileWriter;

impl ImageFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageWriter for ImageFileWriter {
    fn write(&self, path: &Path, surface: &Surface) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let img = image::RgbImage::from_raw(surface.width(), surface.height(), surface.to_rgb())
            .ok_or("Failed to create image from surface data")?;
        img.save(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let surface = Surface::filled(100, 80, [50, 100, 200, 255]);
        ImageFileWriter::new().write(&path, &surface).unwrap();
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_roundtrip_preserves_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let surface = Surface::filled(50, 40, [50, 100, 200, 255]);
        ImageFileWriter::new().write(&path, &surface).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!((img.width(), img.height()), (50, 40));
        assert_eq!(img.get_pixel(0, 0).0, [50, 100, 200]);
    }

    #[test]
    fn test_creates_missing_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("frame.jpg");
        ImageFileWriter::new()
            .write(&path, &Surface::filled(16, 16, [10, 20, 30, 255]))
            .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_unknown_extension_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.notanimage");
        assert!(ImageFileWriter::new()
            .write(&path, &Surface::filled(4, 4, [0, 0, 0, 255]))
            .is_err());
    }
}
