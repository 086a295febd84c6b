use crate::blurring::domain::censure_strategy::{CensureStrategy, DownsizeRatio};
use crate::shared::censure::{BlurIntensity, CensureMode};
use crate::shared::draw::brighten_surface;
use crate::shared::surface::Surface;

use super::pixelation;

/// Pixelation with the brightness filter applied to the finished surface.
pub struct PixelateCssStrategy;

impl CensureStrategy for PixelateCssStrategy {
    fn mode(&self) -> CensureMode {
        CensureMode::PixelateCss
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
        let ratio = pixelation::synthesize_pixelated(source, intensity, has_blur_out, target, None);
        brighten_surface(target, intensity.brightness_percent());
        ratio
    }
}
