use std::cell::RefCell;

use crate::blurring::domain::censure_strategy::{CensureStrategy, DownsizeRatio};
use crate::shared::censure::{BlurIntensity, CensureMode};
use crate::shared::draw::{brighten_surface, draw_image, DrawOptions};
use crate::shared::geometry::Rect;
use crate::shared::surface::{Surface, CHANNELS};

use super::gaussian;

/// Full-frame Gaussian blur with radius `intensity` px and brightness
/// `(125 - intensity)%`, drawn 1:1.
pub struct GaussStrategy {
    filtered: RefCell<Surface>,
    blur_temp: RefCell<Vec<f32>>,
}

impl GaussStrategy {
    pub fn new() -> Self {
        Self {
            filtered: RefCell::new(Surface::blank(0, 0)),
            blur_temp: RefCell::new(Vec::new()),
        }
    }
}

impl Default for GaussStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl CensureStrategy for GaussStrategy {
    fn mode(&self) -> CensureMode {
        CensureMode::Gauss
    }

    fn smoothing(&self) -> bool {
        true
    }

    fn synthesize(
        &self,
        source: &Surface,
        intensity: BlurIntensity,
        _has_blur_out: bool,
        target: &mut Surface,
    ) -> Option<DownsizeRatio> {
        let (width, height) = (source.width(), source.height());
        let mut filtered = self.filtered.borrow_mut();
        let mut temp = self.blur_temp.borrow_mut();

        filtered.clone_from(source);
        gaussian::gaussian_blur(
            filtered.data_mut(),
            width as usize,
            height as usize,
            CHANNELS,
            intensity.value() as f64,
            &mut temp,
        );
        brighten_surface(&mut filtered, intensity.brightness_percent());

        let full = Rect::covering(width, height);
        draw_image(target, &filtered, full, full, &DrawOptions::default());
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::surface::OPAQUE_BLACK;

    fn checkerboard(size: u32) -> Surface {
        let mut s = Surface::blank(size, size);
        for y in 0..size {
            for x in 0..size {
                let v = if (x + y) % 2 == 0 { 255 } else { 0 };
                s.set_pixel(x, y, [v, v, v, 255]);
            }
        }
        s
    }

    #[test]
    fn test_never_produces_ratio() {
        let source = Surface::filled(10, 10, [50, 50, 50, 255]);
        let mut target = Surface::filled(10, 10, OPAQUE_BLACK);
        let strategy = GaussStrategy::new();
        assert!(strategy
            .synthesize(&source, BlurIntensity::new(40), false, &mut target)
            .is_none());
        assert!(strategy
            .synthesize(&source, BlurIntensity::new(40), true, &mut target)
            .is_none());
    }

    #[test]
    fn test_neutral_brightness_uniform_frame_unchanged() {
        let source = Surface::filled(12, 12, [80, 120, 160, 255]);
        let mut target = Surface::filled(12, 12, OPAQUE_BLACK);
        GaussStrategy::new().synthesize(&source, BlurIntensity::new(25), false, &mut target);
        for px in target.data().chunks_exact(4) {
            assert!((px[0] as i32 - 80).abs() <= 1);
            assert!((px[1] as i32 - 120).abs() <= 1);
            assert!((px[2] as i32 - 160).abs() <= 1);
        }
    }

    #[test]
    fn test_blur_flattens_checkerboard() {
        let source = checkerboard(16);
        let mut target = Surface::filled(16, 16, OPAQUE_BLACK);
        GaussStrategy::new().synthesize(&source, BlurIntensity::new(25), false, &mut target);
        let center = target.pixel(8, 8);
        assert!(center[0] > 60 && center[0] < 195, "got {center:?}");
    }

    #[test]
    fn test_zero_intensity_only_brightens() {
        let source = Surface::filled(4, 4, [100, 40, 0, 255]);
        let mut target = Surface::filled(4, 4, OPAQUE_BLACK);
        GaussStrategy::new().synthesize(&source, BlurIntensity::new(0), false, &mut target);
        assert_eq!(target.pixel(2, 2), [125, 50, 0, 255]);
    }

    #[test]
    fn test_smoothing_enabled() {
        assert!(GaussStrategy::new().smoothing());
        assert_eq!(GaussStrategy::new().mode(), CensureMode::Gauss);
    }
}
