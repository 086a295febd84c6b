use thiserror::Error;

use crate::blurring::domain::base_layer_synthesizer::SynthesisPass;
use crate::shared::censure::CensureMode;
use crate::shared::constants::FULL_SCALE_SAMPLING_INTENSITY;
use crate::shared::draw::{draw_image, DrawOptions};
use crate::shared::geometry::Rect;
use crate::shared::occurrence::Occurrence;
use crate::shared::surface::Surface;

#[derive(Error, Debug, PartialEq)]
pub enum CompositeError {
    #[error("occurrence has non-finite geometry: {0:?}")]
    Malformed(Rect),
    #[error("occurrence has zero or negative size: {w}x{h}")]
    Degenerate { w: f64, h: f64 },
}

/// How many occurrences of a frame made it onto the display surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompositeReport {
    pub drawn: usize,
    pub skipped: usize,
}

/// Draws every occurrence onto `display`, each clipped to the ellipse
/// inscribed in its rectangle.
///
/// Blur-out occurrences copy unmodified `source` pixels and are drawn after
/// all others; the rest sample `base_layer`. A failing occurrence is logged
/// and skipped without affecting the others.
pub fn composite_regions(
    display: &mut Surface,
    base_layer: &Surface,
    source: &Surface,
    occurrences: &[Occurrence],
    pass: &SynthesisPass,
) -> CompositeReport {
    let mut report = CompositeReport::default();

    for occurrence in Occurrence::in_compositing_order(occurrences) {
        match composite_occurrence(display, base_layer, source, &occurrence, pass) {
            Ok(()) => report.drawn += 1,
            Err(e) => {
                log::warn!("Skipping occurrence {occurrence:?}: {e}");
                report.skipped += 1;
            }
        }
    }

    report
}

fn composite_occurrence(
    display: &mut Surface,
    base_layer: &Surface,
    source: &Surface,
    occurrence: &Occurrence,
    pass: &SynthesisPass,
) -> Result<(), CompositeError> {
    let display_rect = occurrence.rect();
    if !display_rect.is_finite() {
        return Err(CompositeError::Malformed(display_rect));
    }
    if display_rect.is_degenerate() {
        return Err(CompositeError::Degenerate {
            w: display_rect.w,
            h: display_rect.h,
        });
    }

    let sample_rect = sampling_rect(display_rect, occurrence.is_blur_out, pass);
    let layer = if occurrence.is_blur_out {
        source
    } else {
        base_layer
    };
    let options = DrawOptions {
        smoothing: pass.smoothing,
        brightness_percent: None,
        clip: Some(display_rect.inscribed_ellipse()),
    };

    draw_image(display, layer, sample_rect, display_rect, &options);
    Ok(())
}

/// Where to read the occurrence from: its own coordinates, or scaled into
/// the shrunk base layer when the pass produced a usable downsize ratio.
fn sampling_rect(display_rect: Rect, is_blur_out: bool, pass: &SynthesisPass) -> Rect {
    let full_scale = pass.mode == CensureMode::Gauss
        || pass.intensity.value() > FULL_SCALE_SAMPLING_INTENSITY
        || is_blur_out;

    match pass.usable_ratio() {
        Some(ratio) if !full_scale => display_rect.shrunk_by(ratio),
        _ => display_rect,
    }
}
