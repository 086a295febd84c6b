use super::geometry::{Ellipse, Rect};
use super::surface::{Rgba, Surface};

/// Per-call drawing state. Nothing is remembered on the surface itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawOptions {
    /// Bilinear sampling when true, nearest-neighbor when false.
    pub smoothing: bool,
    /// Draw-time brightness filter, in percent.
    pub brightness_percent: Option<f64>,
    /// Only destination pixels whose centers fall inside are touched.
    pub clip: Option<Ellipse>,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            smoothing: true,
            brightness_percent: None,
            clip: None,
        }
    }
}

/// Scales `src_rect` of `src` onto `dst_rect` of `dst` with source-over blending.
///
/// Destination pixels are visited by center; samples that land outside the
/// source surface are not drawn. Empty surfaces and zero-area rectangles
/// draw nothing.
pub fn draw_image(
    dst: &mut Surface,
    src: &Surface,
    src_rect: Rect,
    dst_rect: Rect,
    options: &DrawOptions,
) {
    if src.is_empty() || dst.is_empty() {
        return;
    }
    if !src_rect.is_finite() || !dst_rect.is_finite() {
        return;
    }
    if src_rect.is_degenerate() || dst_rect.is_degenerate() {
        return;
    }

    let scale_x = src_rect.w / dst_rect.w;
    let scale_y = src_rect.h / dst_rect.h;
    let src_w = src.width() as f64;
    let src_h = src.height() as f64;

    let x_start = dst_rect.x.floor().max(0.0) as u32;
    let y_start = dst_rect.y.floor().max(0.0) as u32;
    let x_end = (dst_rect.x + dst_rect.w).ceil().min(dst.width() as f64).max(0.0) as u32;
    let y_end = (dst_rect.y + dst_rect.h).ceil().min(dst.height() as f64).max(0.0) as u32;

    for py in y_start..y_end {
        let cy = py as f64 + 0.5;
        if cy < dst_rect.y || cy >= dst_rect.y + dst_rect.h {
            continue;
        }
        let v = src_rect.y + (cy - dst_rect.y) * scale_y;
        if v < 0.0 || v >= src_h {
            continue;
        }

        for px in x_start..x_end {
            let cx = px as f64 + 0.5;
            if cx < dst_rect.x || cx >= dst_rect.x + dst_rect.w {
                continue;
            }
            if let Some(clip) = &options.clip {
                if !clip.contains(cx, cy) {
                    continue;
                }
            }
            let u = src_rect.x + (cx - dst_rect.x) * scale_x;
            if u < 0.0 || u >= src_w {
                continue;
            }

            let mut color = if options.smoothing {
                sample_bilinear(src, u, v)
            } else {
                src.pixel(u as u32, v as u32)
            };
            if let Some(percent) = options.brightness_percent {
                color = apply_brightness(color, percent);
            }

            let blended = blend_over(color, dst.pixel(px, py));
            dst.set_pixel(px, py, blended);
        }
    }
}

/// Multiplies RGB by `percent / 100`; alpha is untouched.
///
/// Negative percentages clamp to 0; results saturate at 255.
pub fn apply_brightness(color: Rgba, percent: f64) -> Rgba {
    let factor = percent.max(0.0) / 100.0;
    let scale = |c: u8| (c as f64 * factor).round().clamp(0.0, 255.0) as u8;
    [scale(color[0]), scale(color[1]), scale(color[2]), color[3]]
}

/// Applies the brightness filter to every pixel of a finished surface.
pub fn brighten_surface(surface: &mut Surface, percent: f64) {
    for y in 0..surface.height() {
        for x in 0..surface.width() {
            let color = apply_brightness(surface.pixel(x, y), percent);
            surface.set_pixel(x, y, color);
        }
    }
}

/// Straight-alpha source-over.
pub fn blend_over(src: Rgba, dst: Rgba) -> Rgba {
    match src[3] {
        255 => return src,
        0 => return dst,
        _ => {}
    }
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    let channel = |s: u8, d: u8| {
        let value = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
        value.round().clamp(0.0, 255.0) as u8
    };
    [
        channel(src[0], dst[0]),
        channel(src[1], dst[1]),
        channel(src[2], dst[2]),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ]
}

fn sample_bilinear(src: &Surface, u: f64, v: f64) -> Rgba {
    let max_x = src.width() - 1;
    let max_y = src.height() - 1;

    let fu = (u - 0.5).max(0.0);
    let fv = (v - 0.5).max(0.0);
    let x0 = (fu.floor() as u32).min(max_x);
    let y0 = (fv.floor() as u32).min(max_y);
    let x1 = (x0 + 1).min(max_x);
    let y1 = (y0 + 1).min(max_y);
    let fx = (fu - x0 as f64).clamp(0.0, 1.0);
    let fy = (fv - y0 as f64).clamp(0.0, 1.0);

    let p00 = src.pixel(x0, y0);
    let p10 = src.pixel(x1, y0);
    let p01 = src.pixel(x0, y1);
    let p11 = src.pixel(x1, y1);

    let mut out = [0u8; 4];
    for c in 0..4 {
        let value = p00[c] as f64 * (1.0 - fx) * (1.0 - fy)
            + p10[c] as f64 * fx * (1.0 - fy)
            + p01[c] as f64 * (1.0 - fx) * fy
            + p11[c] as f64 * fx * fy;
        out[c] = value.round().clamp(0.0, 255.0) as u8;
    }
    out
}
