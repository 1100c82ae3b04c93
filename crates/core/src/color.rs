//! RGBA color type used for the fragment color uniform.
//!
//! Components are `f32` in [0, 1], clamped on construction so a color can be
//! uploaded to the shader as-is.

use crate::error::SketchError;
use serde::{Deserialize, Serialize};

/// One of the three color sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Red,
    Green,
    Blue,
}

/// RGBA color with components clamped to [0, 1].
///
/// Serializes as a four-element array `[r, g, b, a]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::opaque(1.0, 1.0, 1.0);
    pub const BLACK: Rgba = Rgba::opaque(0.0, 0.0, 0.0);
    pub const RED: Rgba = Rgba::opaque(1.0, 0.0, 0.0);
    pub const YELLOW: Rgba = Rgba::opaque(1.0, 1.0, 0.0);
    pub const MAGENTA: Rgba = Rgba::opaque(1.0, 0.0, 1.0);

    /// Creates a color, clamping every component to [0, 1].
    ///
    /// NaN components become 0.
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: clamp_unit(r),
            g: clamp_unit(g),
            b: clamp_unit(b),
            a: clamp_unit(a),
        }
    }

    /// Opaque color from in-range components. Used for constants.
    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Replaces one channel with a slider position in [0, 100], keeping
    /// the other channels and alpha.
    pub fn with_percent(self, channel: Channel, percent: f32) -> Self {
        let v = percent / 100.0;
        match channel {
            Channel::Red => Self::new(v, self.g, self.b, self.a),
            Channel::Green => Self::new(self.r, v, self.b, self.a),
            Channel::Blue => Self::new(self.r, self.g, v, self.a),
        }
    }

    /// Parses `"#rrggbb"` or `"#rrggbbaa"` (leading `#` optional, case insensitive).
    ///
    /// Returns `SketchError::InvalidColor` for any other shape of input.
    pub fn from_hex(hex: &str) -> Result<Self, SketchError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 && hex.len() != 8 {
            return Err(SketchError::InvalidColor(format!(
                "expected 6 or 8 hex digits, got {}",
                hex.len()
            )));
        }
        if !hex.is_ascii() {
            return Err(SketchError::InvalidColor(format!("non-ascii input: {hex}")));
        }

        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&hex[range], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|e| SketchError::InvalidColor(format!("invalid {name} component: {e}")))
        };

        let r = channel(0..2, "red")?;
        let g = channel(2..4, "green")?;
        let b = channel(4..6, "blue")?;
        let a = if hex.len() == 8 {
            channel(6..8, "alpha")?
        } else {
            1.0
        };
        Ok(Self::new(r, g, b, a))
    }

    /// Formats the color as `"#rrggbbaa"`.
    pub fn to_hex(self) -> String {
        let q = |c: f32| (c * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            q(self.r),
            q(self.g),
            q(self.b),
            q(self.a)
        )
    }

    /// Darkens the RGB channels by `factor` (1.0 = unchanged), keeping alpha.
    ///
    /// Cube faces use this to fake depth without lighting.
    pub fn shade(self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor, self.a)
    }

    /// Returns the components as an array in uniform upload order.
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[f32; 4]> for Rgba {
    fn from(c: [f32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl From<Rgba> for [f32; 4] {
    fn from(c: Rgba) -> Self {
        c.to_array()
    }
}

fn clamp_unit(c: f32) -> f32 {
    if c.is_nan() {
        0.0
    } else {
        c.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn new_clamps_out_of_range_components() {
        let c = Rgba::new(-0.5, 1.5, 0.25, 2.0);
        assert_eq!(c.r, 0.0);
        assert_eq!(c.g, 1.0);
        assert!(approx_eq(c.b, 0.25));
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn new_maps_nan_to_zero() {
        let c = Rgba::new(f32::NAN, 0.5, 0.5, 1.0);
        assert_eq!(c.r, 0.0);
    }

    #[test]
    fn with_percent_maps_slider_range_and_keeps_alpha() {
        let base = Rgba::new(0.2, 0.2, 0.2, 0.5);
        let c = base
            .with_percent(Channel::Red, 100.0)
            .with_percent(Channel::Green, 50.0)
            .with_percent(Channel::Blue, 150.0);
        assert!(approx_eq(c.r, 1.0));
        assert!(approx_eq(c.g, 0.5));
        assert_eq!(c.b, 1.0, "out-of-range slider clamps");
        assert_eq!(c.a, 0.5);
    }

    #[test]
    fn from_hex_parses_six_digit_form() {
        let c = Rgba::from_hex("#ff0080").unwrap();
        assert!(approx_eq(c.r, 1.0));
        assert!(approx_eq(c.g, 0.0));
        assert!(approx_eq(c.b, 128.0 / 255.0));
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn from_hex_parses_eight_digit_form_without_hash() {
        let c = Rgba::from_hex("00FF0080").unwrap();
        assert!(approx_eq(c.g, 1.0));
        assert!(approx_eq(c.a, 128.0 / 255.0));
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        let err = Rgba::from_hex("#fff").unwrap_err();
        assert!(matches!(err, SketchError::InvalidColor(_)));
    }

    #[test]
    fn from_hex_rejects_non_hex_digits() {
        assert!(Rgba::from_hex("#gg0000").is_err());
    }

    #[test]
    fn to_hex_round_trips_through_from_hex() {
        let c = Rgba::from_hex("#1a73ccff").unwrap();
        assert_eq!(c.to_hex(), "#1a73ccff");
    }

    #[test]
    fn shade_darkens_rgb_and_keeps_alpha() {
        let c = Rgba::new(1.0, 0.5, 0.0, 0.8).shade(0.5);
        assert!(approx_eq(c.r, 0.5));
        assert!(approx_eq(c.g, 0.25));
        assert!(approx_eq(c.b, 0.0));
        assert!(approx_eq(c.a, 0.8));
    }

    #[test]
    fn serializes_as_component_array() {
        let json = serde_json::to_string(&Rgba::RED).unwrap();
        assert_eq!(json, "[1.0,0.0,0.0,1.0]");
        let back: Rgba = serde_json::from_str("[2.0,0.0,0.0,1.0]").unwrap();
        assert_eq!(back, Rgba::RED, "deserialization clamps");
    }
}
