//! Color space conversion utilities
//!
//! Provides conversions between the color models used across the pipeline:
//! - RGB to CIELAB (floating point, and the 8-bit encoding used internally)
//! - RGB to HSV in the half-degree hue encoding
//! - Polar hue/chroma decomposition of the LAB a/b plane
//! - Hex color parsing and formatting
//! - Euclidean color difference (dE76)
//!
//! The 8-bit LAB encoding stores L scaled from [0,100] to [0,255] and a/b
//! centered at 128 (stored value = theoretical value + 128). All functions are
//! pure and deterministic, including at the channel extremes 0 and 255.

use crate::error::{AnalysisError, Result};
use palette::{FromColor, IntoColor, Lab, Lch, Srgb};

/// Color converter for the pipeline's fixed sRGB/D65 working assumptions
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorConverter;

impl ColorConverter {
    /// Create a new color converter
    pub fn new() -> Self {
        Self
    }

    /// Convert RGB (0-255) to Lab color space
    pub fn rgb_to_lab(&self, r: u8, g: u8, b: u8) -> Lab {
        let srgb = Srgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
        Lab::from_color(srgb)
    }

    /// Convert an RGB triple to the 8-bit LAB encoding
    ///
    /// Output channels: `L8 = L * 255 / 100`, `a8 = a + 128`, `b8 = b + 128`,
    /// each rounded and clamped to [0, 255].
    pub fn rgb_to_lab8(&self, rgb: [u8; 3]) -> [u8; 3] {
        let lab = self.rgb_to_lab(rgb[0], rgb[1], rgb[2]);
        [
            (lab.l * 255.0 / 100.0).round().clamp(0.0, 255.0) as u8,
            (lab.a + 128.0).round().clamp(0.0, 255.0) as u8,
            (lab.b + 128.0).round().clamp(0.0, 255.0) as u8,
        ]
    }

    /// Convert an RGB triple to 8-bit HSV
    ///
    /// Hue is stored at half-degree resolution in [0, 179]; saturation and
    /// value are scaled to [0, 255].
    pub fn rgb_to_hsv8(&self, rgb: [u8; 3]) -> [u8; 3] {
        let r = rgb[0] as f32;
        let g = rgb[1] as f32;
        let b = rgb[2] as f32;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let v = max;
        let s = if max > 0.0 { delta * 255.0 / max } else { 0.0 };

        let hue_deg = if delta == 0.0 {
            0.0
        } else if max == r {
            let mut h = 60.0 * (g - b) / delta;
            if h < 0.0 {
                h += 360.0;
            }
            h
        } else if max == g {
            60.0 * (b - r) / delta + 120.0
        } else {
            60.0 * (r - g) / delta + 240.0
        };

        let h = ((hue_deg / 2.0).round() as u16 % 180) as u8;
        [h, s.round() as u8, v.round() as u8]
    }

    /// Polar decomposition of an 8-bit-encoded a/b pair
    ///
    /// Returns `(hue_degrees, chroma)` where hue is normalized into [0, 360)
    /// by adding 360 to negative angles and chroma is `sqrt(a^2 + b^2)` of
    /// the centered channels.
    pub fn hue_chroma(&self, a8: u8, b8: u8) -> (f32, f32) {
        let a = a8 as f32 - 128.0;
        let b = b8 as f32 - 128.0;

        let mut hue = b.atan2(a).to_degrees();
        if hue < 0.0 {
            hue += 360.0;
        }
        let chroma = (a * a + b * b).sqrt();
        (hue, chroma)
    }

    /// Convert Lab to sRGB, clamped to the valid gamut
    pub fn lab_to_srgb(&self, lab: Lab) -> Srgb {
        let srgb: Srgb = lab.into_color();
        Srgb::new(
            srgb.red.clamp(0.0, 1.0),
            srgb.green.clamp(0.0, 1.0),
            srgb.blue.clamp(0.0, 1.0),
        )
    }

    /// Convert Lab to LCh (cylindrical representation)
    pub fn lab_to_lch(&self, lab: Lab) -> Lch {
        Lch::from_color(lab)
    }

    /// Convert sRGB to an RGB triple in [0, 255]
    pub fn srgb_to_rgb(&self, srgb: Srgb) -> [u8; 3] {
        [
            (srgb.red * 255.0).round() as u8,
            (srgb.green * 255.0).round() as u8,
            (srgb.blue * 255.0).round() as u8,
        ]
    }

    /// Convert sRGB to hexadecimal color string (e.g., "#FF0000")
    pub fn srgb_to_hex(&self, srgb: Srgb) -> String {
        let [r, g, b] = self.srgb_to_rgb(srgb);
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }

    /// Parse a hexadecimal color string ("#RRGGBB" or "RRGGBB") to sRGB
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if the hex string is malformed.
    pub fn hex_to_srgb(&self, hex: &str) -> Result<Srgb> {
        let digits = hex.trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(AnalysisError::configuration(format!(
                "Invalid hex color {:?}: expected 6 hex digits, got {}",
                hex,
                digits.len()
            )));
        }

        let channel = |range: std::ops::Range<usize>| -> Result<u8> {
            u8::from_str_radix(&digits[range], 16).map_err(|e| {
                AnalysisError::configuration_with(format!("Invalid hex color {:?}", hex), e)
            })
        };

        let r = channel(0..2)?;
        let g = channel(2..4)?;
        let b = channel(4..6)?;
        Ok(Srgb::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
        ))
    }

    /// Compute the Euclidean color difference (dE76) between two Lab colors
    pub fn delta_e(&self, lab1: Lab, lab2: Lab) -> f32 {
        let dl = lab1.l - lab2.l;
        let da = lab1.a - lab2.a;
        let db = lab1.b - lab2.b;
        (dl * dl + da * da + db * db).sqrt()
    }
}
