/// Divisor relating the frame perimeter to the pixelation block size.
pub const PERIMETER_DOWNSIZE_MULTIPLIER: f64 = 50.0;

pub const BLUR_INTENSITY_MAX: u8 = 100;

/// Intensity at which the brightness filter is neutral (100%).
pub const DEFAULT_BLUR_INTENSITY: u8 = 25;

/// Brightness percent at intensity 0; falls by one point per intensity step.
pub const BRIGHTNESS_MAX: i32 = BLUR_INTENSITY_MAX as i32 + DEFAULT_BLUR_INTENSITY as i32;

/// Above this intensity regions sample the base layer 1:1 even when it was shrunk.
pub const FULL_SCALE_SAMPLING_INTENSITY: u8 = 97;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];

pub const DEFAULT_FPS: f64 = 30.0;
