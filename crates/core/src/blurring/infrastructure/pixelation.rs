use crate::blurring::domain::censure_strategy::DownsizeRatio;
use crate::shared::censure::BlurIntensity;
use crate::shared::constants::PERIMETER_DOWNSIZE_MULTIPLIER;
use crate::shared::draw::{apply_brightness, draw_image, DrawOptions};
use crate::shared::geometry::Rect;
use crate::shared::surface::Surface;

/// Edge length of a manual pixelation block: `floor(perimeter / 50 * intensity / 100)`,
/// clamped to at least 1 so the grid scan always advances.
pub fn block_size(width: u32, height: u32, intensity: BlurIntensity) -> u32 {
    let perimeter = (width as f64 + height as f64) * 2.0;
    let size = ((perimeter / PERIMETER_DOWNSIZE_MULTIPLIER) * intensity.fraction()).floor();
    if size < 1.0 {
        1
    } else {
        size as u32
    }
}

/// Factor by which the cheap pixelation path shrinks the frame:
/// `(width + height) / 50 * intensity / 100`. Zero at intensity 0.
pub fn downsize_ratio(width: u32, height: u32, intensity: BlurIntensity) -> f64 {
    let half_perimeter = width as f64 + height as f64;
    (half_perimeter / PERIMETER_DOWNSIZE_MULTIPLIER) * intensity.fraction()
}

/// Fills `target` with `block x block` cells, each a single color taken from
/// the cell's top-left pixel in `source`.
///
/// `brightness_percent` is applied to each sampled color as it is drawn.
/// Both surfaces must share dimensions.
pub fn pixelate_blocks(
    source: &Surface,
    target: &mut Surface,
    block: u32,
    brightness_percent: Option<f64>,
) {
    let step = block.max(1);
    let mut row = 0;
    while row < source.height() {
        let mut col = 0;
        while col < source.width() {
            let mut color = source.pixel(col, row);
            if let Some(percent) = brightness_percent {
                color = apply_brightness(color, percent);
            }
            target.fill_rect(col as i64, row as i64, step as i64, step as i64, color);
            col += step;
        }
        row += step;
    }
}

/// Pixelation shared by both pixelate strategies.
///
/// With blur-out regions in the frame every pixel of the base layer may be
/// shown, so blocks are painted at full resolution. Otherwise the source is
/// drawn shrunk by the downsize ratio and the returned ratio lets region
/// draws enlarge it back with nearest sampling.
pub fn synthesize_pixelated(
    source: &Surface,
    intensity: BlurIntensity,
    has_blur_out: bool,
    target: &mut Surface,
    draw_time_brightness: Option<f64>,
) -> Option<DownsizeRatio> {
    let (width, height) = (source.width(), source.height());

    if has_blur_out {
        let block = block_size(width, height, intensity);
        pixelate_blocks(source, target, block, draw_time_brightness);
        return None;
    }

    let ratio = DownsizeRatio::new(downsize_ratio(width, height, intensity));
    let dst_rect = if ratio.is_usable() {
        Rect::covering(width, height).shrunk_by(ratio.value())
    } else {
        Rect::covering(width, height)
    };
    let options = DrawOptions {
        smoothing: false,
        brightness_percent: draw_time_brightness,
        clip: None,
    };
    draw_image(target, source, Rect::covering(width, height), dst_rect, &options);
    Some(ratio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::hd(1920, 1080, 100, 120)]
    #[case::hd_quarter(1920, 1080, 25, 30)]
    #[case::small_low(10, 10, 10, 1)]
    #[case::zero_intensity(640, 480, 0, 1)]
    #[case::rounds_down(100, 100, 30, 2)]
    fn test_block_size(
        #[case] w: u32,
        #[case] h: u32,
        #[case] intensity: u8,
        #[case] expected: u32,
    ) {
        assert_eq!(block_size(w, h, BlurIntensity::new(intensity)), expected);
    }

    #[test]
    fn test_downsize_ratio() {
        assert_relative_eq!(downsize_ratio(1920, 1080, BlurIntensity::new(50)), 30.0);
        assert_relative_eq!(downsize_ratio(640, 360, BlurIntensity::new(0)), 0.0);
    }

    #[test]
    fn test_pixelate_blocks_are_uniform_top_left_samples() {
        let mut source = Surface::blank(7, 5);
        for y in 0..5 {
            for x in 0..7 {
                source.set_pixel(x, y, [x as u8 * 30, y as u8 * 40, 5, 255]);
            }
        }
        let mut target = Surface::blank(7, 5);
        pixelate_blocks(&source, &mut target, 3, None);

        for y in 0..5 {
            for x in 0..7 {
                let expected = source.pixel(x / 3 * 3, y / 3 * 3);
                assert_eq!(target.pixel(x, y), expected, "pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn test_pixelate_block_of_one_is_copy() {
        let mut source = Surface::blank(3, 3);
        source.set_pixel(1, 1, [9, 8, 7, 255]);
        let mut target = Surface::blank(3, 3);
        pixelate_blocks(&source, &mut target, 0, None);
        assert_eq!(target, source);
    }

    #[test]
    fn test_cheap_path_at_zero_intensity_copies_full_scale() {
        let mut source = Surface::blank(6, 4);
        for y in 0..4 {
            for x in 0..6 {
                source.set_pixel(x, y, [x as u8, y as u8, 3, 255]);
            }
        }
        let mut target = Surface::filled(6, 4, [0, 0, 0, 255]);
        let ratio =
            synthesize_pixelated(&source, BlurIntensity::new(0), false, &mut target, None).unwrap();
        assert_relative_eq!(ratio.value(), 0.0);
        assert_eq!(target, source);
    }

    #[test]
    fn test_cheap_path_below_unit_ratio_copies_full_scale() {
        // (20 + 10) / 50 * 0.5 = 0.3
        let source = Surface::filled(20, 10, [70, 80, 90, 255]);
        let mut target = Surface::filled(20, 10, [0, 0, 0, 255]);
        let ratio =
            synthesize_pixelated(&source, BlurIntensity::new(50), false, &mut target, None).unwrap();
        assert_relative_eq!(ratio.value(), 0.3, epsilon = 1e-9);
        assert_eq!(target, source);
    }

    #[test]
    fn test_cheap_path_shrinks_into_top_left() {
        // (100 + 100) / 50 * 0.5 = 2
        let source = Surface::filled(100, 100, [90, 90, 90, 255]);
        let mut target = Surface::filled(100, 100, [0, 0, 0, 255]);
        let ratio =
            synthesize_pixelated(&source, BlurIntensity::new(50), false, &mut target, None).unwrap();
        assert_relative_eq!(ratio.value(), 2.0);
        assert_eq!(target.pixel(49, 49), [90, 90, 90, 255]);
        assert_eq!(target.pixel(50, 50), [0, 0, 0, 255]);
    }

    #[test]
    fn test_blur_out_path_produces_no_ratio() {
        let source = Surface::filled(10, 10, [90, 90, 90, 255]);
        let mut target = Surface::filled(10, 10, [0, 0, 0, 255]);
        let ratio = synthesize_pixelated(&source, BlurIntensity::new(50), true, &mut target, None);
        assert!(ratio.is_none());
        assert_eq!(target, source);
    }

    #[test]
    fn test_pixelate_applies_brightness() {
        let source = Surface::filled(4, 4, [100, 100, 100, 255]);
        let mut target = Surface::blank(4, 4);
        pixelate_blocks(&source, &mut target, 2, Some(50.0));
        assert_eq!(target.pixel(3, 3), [50, 50, 50, 255]);
    }
}
