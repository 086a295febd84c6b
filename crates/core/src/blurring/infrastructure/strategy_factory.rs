use crate::blurring::domain::censure_strategy::CensureStrategy;
use crate::shared::censure::CensureMode;

use super::gauss_strategy::GaussStrategy;
use super::pixelate_canvas_filter_strategy::PixelateCanvasFilterStrategy;
use super::pixelate_css_strategy::PixelateCssStrategy;

/// Creates the base-layer strategy for a censure mode.
pub fn create_strategy(mode: CensureMode) -> Box<dyn CensureStrategy> {
    log::info!("Using {mode} censure strategy");
    match mode {
        CensureMode::Gauss => Box::new(GaussStrategy::new()),
        CensureMode::PixelateCss => Box::new(PixelateCssStrategy),
        CensureMode::PixelateCanvasFilter => Box::new(PixelateCanvasFilterStrategy),
    }
}
