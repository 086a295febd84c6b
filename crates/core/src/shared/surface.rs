use ndarray::{ArrayView3, ArrayViewMut3};

/// Bytes per pixel. Surfaces are always RGBA.
pub const CHANNELS: usize = 4;

pub type Rgba = [u8; 4];

pub const TRANSPARENT: Rgba = [0, 0, 0, 0];
pub const OPAQUE_BLACK: Rgba = [0, 0, 0, 255];

/// A drawing surface: contiguous RGBA bytes in row-major order.
///
/// Surfaces carry no drawing state (smoothing, filters, transforms). Every
/// draw call receives its options explicitly, so a `reset` leaves nothing
/// behind from a previous pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Surface {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * CHANNELS,
            "data length must equal width * height * 4"
        );
        Self {
            data,
            width,
            height,
        }
    }

    /// A fully transparent surface.
    pub fn blank(width: u32, height: u32) -> Self {
        Self::filled(width, height, TRANSPARENT)
    }

    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        let mut surface = Self::new(Vec::new(), 0, 0);
        surface.reset(width, height, color);
        surface
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// A zero-area surface has nothing to read from or draw onto.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Discards all content and resizes to exactly `width x height`,
    /// every pixel set to `fill`.
    pub fn reset(&mut self, width: u32, height: u32, fill: Rgba) {
        let len = (width as usize) * (height as usize);
        self.data.clear();
        self.data.reserve(len * CHANNELS);
        for _ in 0..len {
            self.data.extend_from_slice(&fill);
        }
        self.width = width;
        self.height = height;
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        let offset = self.offset(x, y);
        let mut px = [0u8; CHANNELS];
        px.copy_from_slice(&self.data[offset..offset + CHANNELS]);
        px
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        let offset = self.offset(x, y);
        self.data[offset..offset + CHANNELS].copy_from_slice(&color);
    }

    /// Fills a rectangle, clipped to the surface bounds.
    pub fn fill_rect(&mut self, x: i64, y: i64, w: i64, h: i64, color: Rgba) {
        let x0 = x.clamp(0, self.width as i64) as u32;
        let y0 = y.clamp(0, self.height as i64) as u32;
        let x1 = x.saturating_add(w).clamp(0, self.width as i64) as u32;
        let y1 = y.saturating_add(h).clamp(0, self.height as i64) as u32;

        for row in y0..y1 {
            for col in x0..x1 {
                self.set_pixel(col, row, color);
            }
        }
    }

    /// Packed RGB bytes with alpha dropped, for encoders that expect RGB.
    pub fn to_rgb(&self) -> Vec<u8> {
        self.data
            .chunks_exact(CHANNELS)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect()
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Surface data length must match dimensions")
    }

    pub fn as_ndarray_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        ArrayViewMut3::from_shape(self.shape(), &mut self.data)
            .expect("Surface data length must match dimensions")
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * CHANNELS
    }

    fn shape(&self) -> (usize, usize, usize) {
        (self.height as usize, self.width as usize, CHANNELS)
    }
}
