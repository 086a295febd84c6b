use serde::{Deserialize, Serialize};

use super::geometry::Rect;

/// One annotated object bounding box in one frame.
///
/// `is_blur_out` marks an "uncensor this object" exception: the region shows
/// the unmodified source pixels instead of the censored layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    #[serde(default)]
    pub is_blur_out: bool,
}

impl Occurrence {
    pub fn new(x: f64, y: f64, w: f64, h: f64, is_blur_out: bool) -> Self {
        Self {
            x,
            y,
            w,
            h,
            is_blur_out,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    /// Stable reorder placing blur-out occurrences last, so an uncensored
    /// override is drawn on top of any censored neighbor it overlaps.
    pub fn in_compositing_order(occurrences: &[Occurrence]) -> Vec<Occurrence> {
        let mut ordered = occurrences.to_vec();
        ordered.sort_by_key(|o| o.is_blur_out);
        ordered
    }

    pub fn any_blur_out(occurrences: &[Occurrence]) -> bool {
        occurrences.iter().any(|o| o.is_blur_out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occ(x: f64, is_blur_out: bool) -> Occurrence {
        Occurrence::new(x, 0.0, 10.0, 10.0, is_blur_out)
    }

    #[test]
    fn test_compositing_order_puts_blur_out_last() {
        let input = vec![occ(1.0, true), occ(2.0, false), occ(3.0, true), occ(4.0, false)];
        let ordered = Occurrence::in_compositing_order(&input);
        let xs: Vec<f64> = ordered.iter().map(|o| o.x).collect();
        assert_eq!(xs, vec![2.0, 4.0, 1.0, 3.0]);
    }

    #[test]
    fn test_compositing_order_empty() {
        assert!(Occurrence::in_compositing_order(&[]).is_empty());
    }

    #[test]
    fn test_any_blur_out() {
        assert!(!Occurrence::any_blur_out(&[]));
        assert!(!Occurrence::any_blur_out(&[occ(0.0, false)]));
        assert!(Occurrence::any_blur_out(&[occ(0.0, false), occ(1.0, true)]));
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{"x": 1.5, "y": 2, "w": 30, "h": 40, "isBlurOut": true}"#;
        let o: Occurrence = serde_json::from_str(json).unwrap();
        assert_eq!(o, Occurrence::new(1.5, 2.0, 30.0, 40.0, true));
    }

    #[test]
    fn test_deserialize_blur_out_defaults_to_false() {
        let json = r#"{"x": 0, "y": 0, "w": 1, "h": 1}"#;
        let o: Occurrence = serde_json::from_str(json).unwrap();
        assert!(!o.is_blur_out);
    }

    #[test]
    fn test_rect() {
        let o = Occurrence::new(1.0, 2.0, 3.0, 4.0, false);
        assert_eq!(o.rect(), Rect::new(1.0, 2.0, 3.0, 4.0));
    }
}
