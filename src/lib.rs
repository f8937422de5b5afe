//! # Season Scan
//!
//! A Rust crate for estimating a person's color season from photographs and
//! validating garment colors against seasonal palettes.
//!
//! This library provides:
//! - Capture-quality (lighting) validation of uploaded photos
//! - Face feature extraction (skin/hair/eye color, undertone) driven by a
//!   semantic segmentation label map supplied through the [`Segmenter`] trait
//! - Rule-based season classification with a nearest-centroid fallback
//! - Garment dominant-color extraction and perceptual palette matching
//!
//! ## Example
//!
//! ```rust,no_run
//! use season_scan::{check_garment, validate_lighting, PaletteSet};
//!
//! let garment = image::open("shirt.png")?.to_rgb8();
//!
//! let lighting = validate_lighting(&garment)?;
//! if !lighting.valid {
//!     eprintln!("feedback: {:?}", lighting.feedback);
//! }
//!
//! let palettes = PaletteSet::builtin();
//! let report = check_garment(&garment, &palettes, "Deep Autumn", None)?;
//! println!("{:?} allowed: {}", report.color, report.allowed);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use image::RgbImage;
use serde::Serialize;

pub mod analysis;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod garment;
pub mod palettes;
pub mod region;
pub mod season;

pub use analysis::{
    FaceFeatures, FeatureExtractor, LightingReport, LightingValidator, Segmenter, Tone,
    UndertoneClassifier,
};
pub use config::{AnalysisConfig, FeatureConfig, GarmentConfig, LabelTable, LightingConfig};
pub use error::{AnalysisError, Result};
pub use garment::GarmentColorExtractor;
pub use palettes::PaletteSet;
pub use region::{LabelMap, RegionMask};
pub use season::{classify_season, SeasonMatch, SEASONS};

/// Season classification result for one face photo
#[derive(Debug, Clone, Serialize)]
pub struct SeasonReport {
    /// Extracted per-image features
    pub features: FaceFeatures,
    /// The classified season
    pub season: SeasonMatch,
    /// Human-readable status line
    pub message: String,
}

/// Garment palette check result
#[derive(Debug, Clone, Serialize)]
pub struct GarmentReport {
    /// Extracted representative garment color
    pub color: [u8; 3],
    /// Whether the color belongs to the requested palette
    pub allowed: bool,
    /// Human-readable status line
    pub message: String,
}

/// Validate the lighting of an uploaded photo with default thresholds
pub fn validate_lighting(image: &RgbImage) -> Result<LightingReport> {
    LightingValidator::new().validate(image)
}

/// Extract face features and classify the color season
///
/// # Errors
///
/// Returns `FeatureExtraction` (wrapping the original cause) when any
/// extraction stage fails; classification itself is total.
pub fn analyze_face<S: Segmenter>(
    extractor: &FeatureExtractor<S>,
    image: &RgbImage,
) -> Result<SeasonReport> {
    let features = extractor.extract(image)?;
    let season = classify_season(features.skin, features.hair, features.eye, features.undertone);
    Ok(SeasonReport {
        features,
        season,
        message: "Color season classification successful.".to_string(),
    })
}

/// Extract the garment color and check it against a named palette
///
/// `threshold` overrides the default perceptual distance gate when given.
pub fn check_garment(
    image: &RgbImage,
    palettes: &PaletteSet,
    palette_name: &str,
    threshold: Option<f32>,
) -> Result<GarmentReport> {
    let color = GarmentColorExtractor::new().extract(image)?;
    let allowed = match threshold {
        Some(t) => palettes.color_is_allowed_within(color, palette_name, t)?,
        None => palettes.color_is_allowed(color, palette_name)?,
    };
    Ok(GarmentReport {
        color,
        allowed,
        message: "Color identification successful.".to_string(),
    })
}
