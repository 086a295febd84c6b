/// Axis-aligned rectangle in surface pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle covering a whole `width x height` surface.
    pub fn covering(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, width as f64, height as f64)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.w.is_finite() && self.h.is_finite()
    }

    /// True when the rectangle encloses no area.
    pub fn is_degenerate(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// Every component divided by `ratio`.
    pub fn shrunk_by(&self, ratio: f64) -> Self {
        Self::new(self.x / ratio, self.y / ratio, self.w / ratio, self.h / ratio)
    }

    pub fn inscribed_ellipse(&self) -> Ellipse {
        let rx = self.w / 2.0;
        let ry = self.h / 2.0;
        Ellipse {
            cx: self.x + rx,
            cy: self.y + ry,
            rx,
            ry,
        }
    }
}

/// Axis-aligned ellipse used as a clip path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipse {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
}

impl Ellipse {
    pub fn contains(&self, px: f64, py: f64) -> bool {
        if self.rx <= 0.0 || self.ry <= 0.0 {
            return false;
        }
        let dx = (px - self.cx) / self.rx;
        let dy = (py - self.cy) / self.ry;
        dx * dx + dy * dy <= 1.0
    }
}
