use ndarray::{s, ArrayView3, ArrayViewMut3};

/// Kernels wider than this many taps are applied on a downscaled copy.
const MAX_DIRECT_KERNEL_SIZE: usize = 50;

/// Odd kernel size covering ±3 standard deviations.
pub fn kernel_size_for_sigma(sigma: f64) -> usize {
    if sigma <= 0.0 {
        return 1;
    }
    2 * (3.0 * sigma).ceil() as usize + 1
}

/// Precompute a normalized 1D Gaussian kernel for standard deviation `sigma`.
pub fn gaussian_kernel_1d(sigma: f64) -> Vec<f32> {
    let kernel_size = kernel_size_for_sigma(sigma);
    if kernel_size == 1 {
        return vec![1.0];
    }
    let half = (kernel_size / 2) as f64;
    let mut kernel_f64: Vec<f64> = (0..kernel_size)
        .map(|i| {
            let x = i as f64 - half;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f64 = kernel_f64.iter().sum();
    for v in &mut kernel_f64 {
        *v /= sum;
    }
    kernel_f64.iter().map(|&v| v as f32).collect()
}

/// Blur an interleaved buffer in place with standard deviation `sigma`
/// (CSS `blur()` semantics: the radius is the deviation), reusing `temp`.
///
/// Large deviations run on a downscaled copy with a proportionally
/// smaller kernel, then upscale back.
pub fn gaussian_blur(
    data: &mut [u8],
    width: usize,
    height: usize,
    channels: usize,
    sigma: f64,
    temp: &mut Vec<f32>,
) {
    if sigma <= 0.0 || width == 0 || height == 0 {
        return;
    }
    let scale = (kernel_size_for_sigma(sigma) / MAX_DIRECT_KERNEL_SIZE).max(1);

    if scale <= 1 || height < scale * 2 || width < scale * 2 {
        let kernel = gaussian_kernel_1d(sigma);
        separable_gaussian_blur_with_kernel(data, width, height, channels, &kernel, temp);
    } else {
        let size = width * height * channels;
        let small_kernel = gaussian_kernel_1d(sigma / scale as f64);
        let (mut small, sw, sh) = downscale(data, width, height, channels, scale);
        separable_gaussian_blur_with_kernel(&mut small, sw, sh, channels, &small_kernel, temp);
        let upscaled = upscale(&small, sw, sh, channels, width, height);
        data[..size].copy_from_slice(&upscaled);
    }
}

/// Apply a separable Gaussian blur using a pre-computed kernel, reusing `temp`.
///
/// Edges clamp to the nearest pixel.
pub fn separable_gaussian_blur_with_kernel(
    data: &mut [u8],
    width: usize,
    height: usize,
    channels: usize,
    kernel: &[f32],
    temp: &mut Vec<f32>,
) {
    if kernel.len() <= 1 || width == 0 || height == 0 {
        return;
    }
    let half = (kernel.len() / 2) as isize;
    let shape = (height, width, channels);
    let len = height * width * channels;
    temp.clear();
    temp.resize(len, 0.0);

    let (Ok(mut pixels), Ok(mut rows)) = (
        ArrayViewMut3::from_shape(shape, &mut data[..len]),
        ArrayViewMut3::from_shape(shape, &mut temp[..len]),
    ) else {
        return;
    };

    for ((y, x, c), out) in rows.indexed_iter_mut() {
        *out = kernel
            .iter()
            .enumerate()
            .map(|(k, &w)| pixels[[y, clamp_index(x, k, half, width), c]] as f32 * w)
            .sum();
    }

    for ((y, x, c), out) in pixels.indexed_iter_mut() {
        let sum: f32 = kernel
            .iter()
            .enumerate()
            .map(|(k, &w)| rows[[clamp_index(y, k, half, height), x, c]] * w)
            .sum();
        *out = to_channel(sum);
    }
}

fn clamp_index(center: usize, tap: usize, half: isize, len: usize) -> usize {
    (center as isize + tap as isize - half).clamp(0, len as isize - 1) as usize
}

fn to_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Downscale an image by integer factor, averaging each `scale x scale` block.
pub fn downscale(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    scale: usize,
) -> (Vec<u8>, usize, usize) {
    let (small_w, small_h) = (width / scale, height / scale);
    let mut out = vec![0u8; small_w * small_h * channels];

    let (Ok(src), Ok(mut dst)) = (
        ArrayView3::from_shape((height, width, channels), &data[..width * height * channels]),
        ArrayViewMut3::from_shape((small_h, small_w, channels), &mut out[..]),
    ) else {
        return (out, small_w, small_h);
    };

    let area = (scale * scale) as u32;
    for ((y, x, c), value) in dst.indexed_iter_mut() {
        let block = src.slice(s![y * scale..(y + 1) * scale, x * scale..(x + 1) * scale, c]);
        let sum: u32 = block.iter().map(|&v| v as u32).sum();
        *value = (sum / area) as u8;
    }

    (out, small_w, small_h)
}

/// Upscale an image to the target size using bilinear interpolation.
pub fn upscale(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    target_w: usize,
    target_h: usize,
) -> Vec<u8> {
    let mut out = vec![0u8; target_w * target_h * channels];
    if width == 0 || height == 0 {
        return out;
    }

    let (Ok(src), Ok(mut dst)) = (
        ArrayView3::from_shape((height, width, channels), &data[..width * height * channels]),
        ArrayViewMut3::from_shape((target_h, target_w, channels), &mut out[..]),
    ) else {
        return out;
    };

    let x_step = (width as f32 - 1.0) / (target_w as f32 - 1.0).max(1.0);
    let y_step = (height as f32 - 1.0) / (target_h as f32 - 1.0).max(1.0);

    for ((y, x, c), value) in dst.indexed_iter_mut() {
        let (sx, sy) = (x as f32 * x_step, y as f32 * y_step);
        let x0 = (sx.floor() as usize).min(width - 1);
        let y0 = (sy.floor() as usize).min(height - 1);
        let x1 = (x0 + 1).min(width - 1);
        let y1 = (y0 + 1).min(height - 1);
        let (fx, fy) = (sx - x0 as f32, sy - y0 as f32);

        let top = src[[y0, x0, c]] as f32 * (1.0 - fx) + src[[y0, x1, c]] as f32 * fx;
        let bottom = src[[y1, x0, c]] as f32 * (1.0 - fx) + src[[y1, x1, c]] as f32 * fx;
        *value = to_channel(top * (1.0 - fy) + bottom * fy);
    }

    out
}
