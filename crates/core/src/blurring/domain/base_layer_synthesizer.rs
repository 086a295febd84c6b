use crate::shared::censure::{BlurIntensity, CensureMode};
use crate::shared::surface::{Surface, OPAQUE_BLACK};

use super::censure_strategy::{CensureStrategy, DownsizeRatio};

/// Everything region compositing needs to know about the base layer
/// built in the same pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SynthesisPass {
    pub mode: CensureMode,
    pub intensity: BlurIntensity,
    pub has_blur_out: bool,
    pub smoothing: bool,
    pub downsize_ratio: Option<DownsizeRatio>,
}

impl SynthesisPass {
    /// The ratio, if it describes an actual shrink.
    pub fn usable_ratio(&self) -> Option<f64> {
        self.downsize_ratio
            .filter(|r| r.is_usable())
            .map(DownsizeRatio::value)
    }
}

/// Rebuilds `working` from `source` with the given strategy.
///
/// `working` is reset to exactly the source size (opaque, no residual
/// content from a differently-sized prior frame) before the strategy runs.
pub fn synthesize_base_layer(
    working: &mut Surface,
    source: &Surface,
    intensity: BlurIntensity,
    strategy: &dyn CensureStrategy,
    has_blur_out: bool,
) -> SynthesisPass {
    working.reset(source.width(), source.height(), OPAQUE_BLACK);
    let downsize_ratio = strategy.synthesize(source, intensity, has_blur_out, working);

    log::debug!(
        "Synthesized {} base layer {}x{} (intensity={}, blur_out={}, ratio={:?})",
        strategy.mode(),
        source.width(),
        source.height(),
        intensity.value(),
        has_blur_out,
        downsize_ratio.map(DownsizeRatio::value)
    );

    SynthesisPass {
        mode: strategy.mode(),
        intensity,
        has_blur_out,
        smoothing: strategy.smoothing(),
        downsize_ratio,
    }
}
