//! Configuration structures for the season_scan analysis pipeline.
//!
//! This module defines all tunable parameters for face feature extraction,
//! lighting validation, and garment color extraction, organized into logical
//! groups. Defaults reproduce the deployed behavior.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use season_scan::AnalysisConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = AnalysisConfig::from_json_file(Path::new("config.json"))?;
//!
//! // Or use defaults
//! let config = AnalysisConfig::default();
//! # Ok::<(), season_scan::AnalysisError>(())
//! ```

use crate::{
    constants,
    error::{AnalysisError, Result},
};
use serde::{Deserialize, Serialize};

/// Complete pipeline configuration.
///
/// Can be serialized to/from JSON for reproducible deployments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Face feature extraction settings
    #[serde(default)]
    pub features: FeatureConfig,

    /// Lighting validation thresholds
    #[serde(default)]
    pub lighting: LightingConfig,

    /// Garment color extraction settings
    #[serde(default)]
    pub garment: GarmentConfig,
}

/// Canonical label-index table for the segmentation contract.
///
/// Historically the neck region was addressed as class 14 in some call sites
/// and class 2 in others, and the skin fallback as class 1 or class 0. All
/// region selection is parameterized against this single table so a
/// deployment picks its convention in one place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelTable {
    /// Background / alternate skin class
    pub alt_skin: u8,
    /// Primary skin class
    pub skin: u8,
    /// Alternate neck class used by some deployments
    pub neck_alt: u8,
    /// Eye class
    pub eye: u8,
    /// Neck class
    pub neck: u8,
    /// Hair class
    pub hair: u8,
}

impl Default for LabelTable {
    fn default() -> Self {
        Self {
            alt_skin: 0,
            skin: 1,
            neck_alt: 2,
            eye: 5,
            neck: 14,
            hair: 17,
        }
    }
}

/// Face feature extraction parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureConfig {
    /// Label-index table
    #[serde(default)]
    pub labels: LabelTable,

    /// Class sampled first for undertone detection (default: neck)
    pub undertone_primary: u8,

    /// Class sampled when the primary region is too small (default: skin)
    pub undertone_fallback: u8,

    /// Minimum pixel count for the primary undertone region
    pub min_undertone_pixels: usize,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        let labels = LabelTable::default();
        Self {
            undertone_primary: labels.neck,
            undertone_fallback: labels.skin,
            min_undertone_pixels: constants::undertone::MIN_SAMPLE_PIXELS,
            labels,
        }
    }
}

/// Lighting validation thresholds.
///
/// All values apply to statistics over the 8-bit LAB encoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightingConfig {
    /// Acceptable mean-brightness range (mean of the L channel)
    pub brightness_range: (f32, f32),

    /// Minimum acceptable contrast (L channel max - min)
    pub min_contrast: f32,

    /// Acceptable color-temperature range (mean of the b channel)
    pub color_temp_range: (f32, f32),

    /// Maximum acceptable unevenness (std deviation of the L channel)
    pub max_uniformity: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            brightness_range: constants::lighting::BRIGHTNESS_RANGE,
            min_contrast: constants::lighting::MIN_CONTRAST,
            color_temp_range: constants::lighting::COLOR_TEMP_RANGE,
            max_uniformity: constants::lighting::MAX_UNIFORMITY,
        }
    }
}

/// Garment color extraction parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GarmentConfig {
    /// Pixels with all channels at or above this value count as background
    pub white_threshold: u8,

    /// Number of k-means clusters for the refinement step
    pub clusters: usize,

    /// Optional crop applied before clustering
    #[serde(default)]
    pub crop: Option<CropRegion>,
}

impl Default for GarmentConfig {
    fn default() -> Self {
        Self {
            white_threshold: constants::garment::WHITE_THRESHOLD,
            clusters: constants::garment::DEFAULT_CLUSTERS,
            crop: None,
        }
    }
}

/// Rectangular crop region in pixel coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl AnalysisConfig {
    /// Load configuration from a JSON file
    pub fn from_json_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::configuration_with(
                format!("cannot read config file {}", path.display()),
                e,
            )
        })?;
        serde_json::from_str(&content).map_err(|e| {
            AnalysisError::configuration_with(
                format!("cannot parse config file {}", path.display()),
                e,
            )
        })
    }

    /// Save configuration to a JSON file
    pub fn to_json_file(&self, path: &std::path::Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AnalysisError::configuration_with("cannot serialize config", e))?;
        std::fs::write(path, json).map_err(|e| {
            AnalysisError::configuration_with(
                format!("cannot write config file {}", path.display()),
                e,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_label_table_matches_contract() {
        let labels = LabelTable::default();
        assert_eq!(labels.alt_skin, 0);
        assert_eq!(labels.skin, 1);
        assert_eq!(labels.neck_alt, 2);
        assert_eq!(labels.eye, 5);
        assert_eq!(labels.neck, 14);
        assert_eq!(labels.hair, 17);
    }

    #[test]
    fn test_default_feature_config_uses_neck_then_skin() {
        let config = FeatureConfig::default();
        assert_eq!(config.undertone_primary, config.labels.neck);
        assert_eq!(config.undertone_fallback, config.labels.skin);
        assert_eq!(config.min_undertone_pixels, 500);
    }

    #[test]
    fn test_config_json_roundtrip() {
        let mut config = AnalysisConfig::default();
        config.garment.clusters = 6;
        config.garment.crop = Some(CropRegion {
            x: 10,
            y: 20,
            width: 64,
            height: 48,
        });

        let json = serde_json::to_string(&config).unwrap();
        let parsed: AnalysisConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.garment.clusters, 6);
        let crop = parsed.garment.crop.unwrap();
        assert_eq!((crop.x, crop.y, crop.width, crop.height), (10, 20, 64, 48));
        assert_eq!(parsed.lighting.brightness_range, (100.0, 300.0));
    }

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let parsed: AnalysisConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.features.min_undertone_pixels, 500);
        assert_eq!(parsed.garment.white_threshold, 250);
    }
}
