use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::constants::{BLUR_INTENSITY_MAX, BRIGHTNESS_MAX, DEFAULT_BLUR_INTENSITY};

/// Full-frame obfuscation strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CensureMode {
    #[default]
    Gauss,
    /// Pixelation with brightness applied to the finished surface.
    PixelateCss,
    /// Pixelation with brightness applied while drawing.
    PixelateCanvasFilter,
}

impl CensureMode {
    pub const ALL: &[CensureMode] = &[
        CensureMode::Gauss,
        CensureMode::PixelateCss,
        CensureMode::PixelateCanvasFilter,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CensureMode::Gauss => "gauss",
            CensureMode::PixelateCss => "pixelate-css",
            CensureMode::PixelateCanvasFilter => "pixelate-canvas-filter",
        }
    }
}

impl fmt::Display for CensureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CensureMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CensureMode::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| {
                format!("Censure mode must be one of: gauss, pixelate-css, pixelate-canvas-filter, got '{s}'")
            })
    }
}

/// Shared tuning knob for every censure mode, always within `[0, 100]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct BlurIntensity(u8);

impl BlurIntensity {
    /// Clamps into range; intensity 0 means "no censorship".
    pub fn new(value: u8) -> Self {
        Self(value.min(BLUR_INTENSITY_MAX))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Intensity as a fraction of the maximum, in `[0, 1]`.
    pub fn fraction(self) -> f64 {
        self.0 as f64 / BLUR_INTENSITY_MAX as f64
    }

    /// `(125 - intensity)` percent.
    pub fn brightness_percent(self) -> f64 {
        (BRIGHTNESS_MAX - self.0 as i32) as f64
    }
}

impl Default for BlurIntensity {
    fn default() -> Self {
        Self(DEFAULT_BLUR_INTENSITY)
    }
}

impl From<u8> for BlurIntensity {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<BlurIntensity> for u8 {
    fn from(value: BlurIntensity) -> Self {
        value.0
    }
}

/// User-facing censorship settings applied to every pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CensorSettings {
    pub mode: CensureMode,
    pub intensity: BlurIntensity,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::gauss("gauss", CensureMode::Gauss)]
    #[case::css("pixelate-css", CensureMode::PixelateCss)]
    #[case::canvas("pixelate-canvas-filter", CensureMode::PixelateCanvasFilter)]
    fn test_mode_parses(#[case] input: &str, #[case] expected: CensureMode) {
        assert_eq!(input.parse::<CensureMode>().unwrap(), expected);
        assert_eq!(expected.to_string(), input);
    }

    #[test]
    fn test_mode_rejects_unknown() {
        let err = "mosaic".parse::<CensureMode>().unwrap_err();
        assert!(err.contains("mosaic"));
    }

    #[test]
    fn test_mode_serde_kebab_case() {
        let json = serde_json::to_string(&CensureMode::PixelateCanvasFilter).unwrap();
        assert_eq!(json, "\"pixelate-canvas-filter\"");
    }

    #[test]
    fn test_intensity_clamps() {
        assert_eq!(BlurIntensity::new(150).value(), 100);
        assert_eq!(BlurIntensity::new(0).value(), 0);
    }

    #[rstest]
    #[case(0, 125.0)]
    #[case(25, 100.0)]
    #[case(100, 25.0)]
    fn test_brightness_percent(#[case] intensity: u8, #[case] expected: f64) {
        assert_relative_eq!(BlurIntensity::new(intensity).brightness_percent(), expected);
    }

    #[test]
    fn test_intensity_deserializes_clamped() {
        let i: BlurIntensity = serde_json::from_str("250").unwrap();
        assert_eq!(i.value(), 100);
    }

    #[test]
    fn test_default_settings() {
        let s = CensorSettings::default();
        assert_eq!(s.mode, CensureMode::Gauss);
        assert_eq!(s.intensity.value(), 25);
    }
}
