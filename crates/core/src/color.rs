//! Color types for particle fills and link strokes.
//!
//! Colors are 8-bit sRGB with a separate alpha in [0, 1], which is how both
//! the 2D canvas API (`rgba(r, g, b, a)`) and the RGBA8 rasterizer consume
//! them. `Rgb` serializes as a `"#rrggbb"` hex string.

use crate::error::BackdropError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An opaque 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// An [`Rgb`] color paired with an alpha in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f64,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a hex color string like "#3b82f6" or "3B82F6".
    ///
    /// Returns `BackdropError::InvalidColor` if the input is not exactly six hex digits.
    pub fn from_hex(hex: &str) -> Result<Rgb, BackdropError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(BackdropError::InvalidColor(format!(
                "expected 6 hex digits, got '{hex}'"
            )));
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|e| BackdropError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        Ok(Rgb {
            r: channel(0..2, "red")?,
            g: channel(2..4, "green")?,
            b: channel(4..6, "blue")?,
        })
    }

    /// Lowercase `"#rrggbb"`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Pairs this color with `alpha`, clamped to [0, 1].
    pub fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba::new(self, alpha)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl Rgba {
    /// Creates a color, clamping `alpha` to [0, 1]. NaN alpha becomes 0.
    pub fn new(rgb: Rgb, alpha: f64) -> Self {
        let alpha = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
        Self { rgb, alpha }
    }

    /// CSS color string for `CanvasRenderingContext2d::set_fill_style_str`.
    ///
    /// Alpha is written with three decimals, which is below the 8-bit
    /// resolution of any canvas backing store.
    pub fn to_css(self) -> String {
        format!(
            "rgba({}, {}, {}, {:.3})",
            self.rgb.r, self.rgb.g, self.rgb.b, self.alpha
        )
    }

    /// Alpha quantized to a byte, for RGBA8 buffers.
    pub fn alpha_u8(self) -> u8 {
        (self.alpha * 255.0).round() as u8
    }
}
