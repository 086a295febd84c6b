use crate::blurring::domain::censure_strategy::{CensureStrategy, DownsizeRatio};
use crate::shared::censure::{BlurIntensity, CensureMode};
use crate::shared::surface::Surface;

use super::pixelation;

/// Pixelation with the brightness filter applied as pixels are drawn.
pub struct PixelateCanvasFilterStrategy;

impl CensureStrategy for PixelateCanvasFilterStrategy {
    fn mode(&self) -> CensureMode {
        CensureMode::PixelateCanvasFilter
    }

    fn smoothing(&self) -> bool {
        false
    }

    fn synthesize(
        &self,
        source: &Surface,
        intensity: BlurIntensity,
        has_blur_out: bool,
        target: &mut Surface,
    ) -> Option<DownsizeRatio> {
        pixelation::synthesize_pixelated(
            source,
            intensity,
            has_blur_out,
            target,
            Some(intensity.brightness_percent()),
        )
    }
}
