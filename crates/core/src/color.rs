//! RGBA colour used for lines, glow, and gradient stops.
//!
//! Channels are 8-bit like CSS `rgb()`, alpha is a float in [0, 1] like CSS
//! `rgba()`. [`Rgba::to_css`] produces the string a 2D canvas context takes.

use serde::{Deserialize, Serialize};

use crate::error::FieldError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `"#rrggbb"` (or without `#`) with the given alpha.
    pub fn from_hex(hex: &str, alpha: f64) -> Result<Self, FieldError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(FieldError::InvalidConfig(format!(
                "colour '{hex}': expected 6 hex digits"
            )));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|e| FieldError::InvalidConfig(format!("colour '{hex}': {e}")))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?, alpha))
    }

    /// Same colour with a different alpha.
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// CSS `rgba(r,g,b,a)` string. Alpha is clamped to [0, 1].
    pub fn to_css(self) -> String {
        let a = self.a.clamp(0.0, 1.0);
        format!("rgba({},{},{},{})", self.r, self.g, self.b, round_alpha(a))
    }

    /// Channels as unit floats, alpha unchanged.
    pub fn to_unit(self) -> [f64; 4] {
        [
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
            self.a,
        ]
    }

    /// Component-wise linear interpolation, `t` clamped to [0, 1].
    pub fn lerp(self, other: Rgba, t: f64) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgba {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }
}

// Keeps CSS strings short: 0.15 * 0.73 prints as 0.1095 rather than 0.10949999999999999.
fn round_alpha(a: f64) -> f64 {
    (a * 10_000.0).round() / 10_000.0
}
