pub mod gauss_strategy;
pub mod gaussian;
pub mod pixelate_canvas_filter_strategy;
pub mod pixelate_css_strategy;
pub mod pixelation;
pub mod strategy_factory;
