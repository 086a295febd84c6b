use std::path::{Path, PathBuf};

use crate::shared::constants::{DEFAULT_FPS, IMAGE_EXTENSIONS};
use crate::shared::sequence_metadata::SequenceMetadata;
use crate::shared::surface::Surface;
use crate::video::domain::frame_source::{FrameSource, TimedFrame};

/// Reads a directory of still images as a fixed-rate frame sequence, or a
/// single image as a one-frame sequence shown at t = 0.
///
/// Directory entries are filtered by image extension and sorted by file
/// name, so zero-padded names (`frame_0001.png`) come out in order.
pub struct ImageSequenceReader {
    fps: f64,
    paths: Vec<PathBuf>,
    metadata: Option<SequenceMetadata>,
}

impl ImageSequenceReader {
    pub fn new(fps: f64) -> Self {
        Self {
            fps,
            paths: Vec::new(),
            metadata: None,
        }
    }
}

impl Default for ImageSequenceReader {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

fn list_images(dir: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_image_file(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn decode(path: &Path) -> Result<Surface, Box<dyn std::error::Error>> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to decode {}: {e}", path.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    Ok(Surface::new(img.into_raw(), width, height))
}

fn read_frame(
    index: usize,
    path: &Path,
    metadata: &SequenceMetadata,
) -> Result<TimedFrame, Box<dyn std::error::Error>> {
    let surface = decode(path)?;
    if (surface.width(), surface.height()) != (metadata.width, metadata.height) {
        return Err(format!(
            "Frame {} is {}x{}, expected {}x{}",
            path.display(),
            surface.width(),
            surface.height(),
            metadata.width,
            metadata.height
        )
        .into());
    }
    Ok(TimedFrame {
        index,
        timestamp_seconds: metadata.timestamp_of(index),
        surface,
    })
}

impl FrameSource for ImageSequenceReader {
    fn open(&mut self, path: &Path) -> Result<SequenceMetadata, Box<dyn std::error::Error>> {
        let (paths, fps) = if path.is_dir() {
            if !(self.fps.is_finite() && self.fps > 0.0) {
                return Err(format!("Frame rate must be positive, got {}", self.fps).into());
            }
            (list_images(path)?, self.fps)
        } else if path.is_file() {
            (vec![path.to_path_buf()], 0.0)
        } else {
            return Err(format!("Input not found: {}", path.display()).into());
        };

        let first = paths
            .first()
            .ok_or_else(|| format!("No images found in {}", path.display()))?;
        let (width, height) = image::image_dimensions(first)?;

        let metadata = SequenceMetadata {
            width,
            height,
            fps,
            total_frames: paths.len(),
            source_path: Some(path.to_path_buf()),
        };
        log::info!(
            "Opened {} frame(s) at {width}x{height} from {}",
            paths.len(),
            path.display()
        );

        self.paths = paths;
        self.metadata = Some(metadata.clone());
        Ok(metadata)
    }

    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<TimedFrame, Box<dyn std::error::Error>>> + '_> {
        let Some(metadata) = self.metadata.clone() else {
            return Box::new(std::iter::once(Err(
                "ImageSequenceReader: not opened".into()
            )));
        };

        Box::new(
            self.paths
                .iter()
                .enumerate()
                .map(move |(index, path)| read_frame(index, path, &metadata)),
        )
    }

    fn close(&mut self) {
        self.paths.clear();
        self.metadata = None;
    }
}
