//! Capture-quality validation for uploaded photographs
//!
//! Classifies an image's lighting against fixed thresholds: brightness,
//! contrast, color temperature, and uniformity, all measured on the 8-bit
//! LAB encoding. The result is advisory feedback for the user, not a hard
//! gate on downstream processing.

use crate::{
    color::ColorConverter,
    config::LightingConfig,
    error::{AnalysisError, Result},
    region::ChannelStats,
};
use image::RgbImage;
use serde::Serialize;

/// Raw lighting statistics behind a validation verdict
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LightingStats {
    /// Mean of the L channel
    pub brightness: f32,
    /// L channel max - min
    pub contrast: f32,
    /// Mean of the b channel; higher reads warmer
    pub color_temperature: f32,
    /// Std deviation of the L channel
    pub uniformity: f32,
}

/// Validation verdict with per-rule feedback
///
/// `feedback` holds one message per failed rule, in rule order. All rules are
/// evaluated independently; nothing short-circuits.
#[derive(Debug, Clone, Serialize)]
pub struct LightingReport {
    pub valid: bool,
    pub feedback: Vec<String>,
    pub stats: LightingStats,
}

/// Lighting validator with configurable thresholds
#[derive(Debug, Clone, Default)]
pub struct LightingValidator {
    config: LightingConfig,
    converter: ColorConverter,
}

impl LightingValidator {
    /// Create a validator with the deployed default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator with custom thresholds
    pub fn with_config(config: LightingConfig) -> Self {
        Self {
            config,
            converter: ColorConverter::new(),
        }
    }

    /// Validate an image's capture quality
    ///
    /// # Errors
    ///
    /// Returns `InvalidImage` for a zero-pixel image; threshold violations
    /// are reported in the `LightingReport`, never as errors.
    pub fn validate(&self, image: &RgbImage) -> Result<LightingReport> {
        if image.width() == 0 || image.height() == 0 {
            return Err(AnalysisError::invalid_image(
                "cannot validate lighting of an empty image",
            ));
        }

        let pixel_count = image.width() as usize * image.height() as usize;
        let mut l_channel = Vec::with_capacity(pixel_count);
        let mut b_channel = Vec::with_capacity(pixel_count);
        for pixel in image.pixels() {
            let [l8, _, b8] = self.converter.rgb_to_lab8(pixel.0);
            l_channel.push(l8);
            b_channel.push(b8);
        }

        let l_stats = ChannelStats::from_values(&l_channel, "L channel")?;
        let b_stats = ChannelStats::from_values(&b_channel, "b channel")?;

        let stats = LightingStats {
            brightness: l_stats.mean,
            contrast: l_stats.max as f32 - l_stats.min as f32,
            color_temperature: b_stats.mean,
            uniformity: l_stats.std_dev,
        };

        Ok(self.evaluate(stats))
    }

    /// Apply the threshold rules to precomputed statistics
    pub fn evaluate(&self, stats: LightingStats) -> LightingReport {
        let mut feedback = Vec::new();

        let (bright_min, bright_max) = self.config.brightness_range;
        if !(bright_min..=bright_max).contains(&stats.brightness) {
            feedback.push("Adjust brightness to fall within the acceptable range.".to_string());
        }

        if stats.contrast < self.config.min_contrast {
            feedback.push("Increase contrast by improving lighting.".to_string());
        }

        let (temp_min, temp_max) = self.config.color_temp_range;
        if stats.color_temperature < temp_min {
            feedback.push("Lighting appears too cool (bluish).".to_string());
        } else if stats.color_temperature > temp_max {
            feedback.push("Lighting appears too warm (yellowish).".to_string());
        }

        if stats.uniformity > self.config.max_uniformity {
            feedback.push("Lighting is uneven. Avoid shadows or highlights.".to_string());
        }

        LightingReport {
            valid: feedback.is_empty(),
            feedback,
            stats,
        }
    }
}
