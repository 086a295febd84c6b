use crate::shared::censure::{BlurIntensity, CensureMode};
use crate::shared::surface::Surface;

/// Shrink factor produced by the cheap pixelation path.
///
/// Lives only for one synthesis pass: produced while building the base
/// layer, consumed while compositing regions of the same pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DownsizeRatio(f64);

impl DownsizeRatio {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Only ratios of at least 1 shrink the frame. Anything smaller would
    /// enlarge it past the surface bounds, so it falls back to 1:1.
    pub fn is_usable(self) -> bool {
        self.0.is_finite() && self.0 >= 1.0
    }
}

/// Domain interface for one full-frame obfuscation strategy.
///
/// `target` has already been reset to the source dimensions when
/// `synthesize` is called.
pub trait CensureStrategy: Send {
    fn mode(&self) -> CensureMode;

    /// Whether region draws sampling the base layer should interpolate.
    fn smoothing(&self) -> bool;

    fn synthesize(
        &self,
        source: &Surface,
        intensity: BlurIntensity,
        has_blur_out: bool,
        target: &mut Surface,
    ) -> Option<DownsizeRatio>;
}
