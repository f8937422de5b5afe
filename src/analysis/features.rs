//! Face feature extraction driven by a segmentation label map
//!
//! Orchestrates masked sampling over the label map to produce hair, eye, and
//! skin median colors plus the undertone. The segmentation capability is
//! injected once at construction and reused read-only for every request; the
//! extractor never reloads it.

use crate::{
    config::FeatureConfig,
    constants::segmentation,
    error::{AnalysisError, Result},
    region::{median_color, LabelMap},
};

use super::undertone::{Tone, UndertoneClassifier};
use image::{imageops, imageops::FilterType, RgbImage};
use serde::Serialize;

/// Segmentation capability consumed by the feature extractor
///
/// Implementations receive the already-resized 512x512 RGB image and return a
/// label map of identical dimensions with class indices in the contract range.
pub trait Segmenter {
    fn segment(&self, image: &RgbImage) -> Result<LabelMap>;
}

impl<F> Segmenter for F
where
    F: Fn(&RgbImage) -> Result<LabelMap>,
{
    fn segment(&self, image: &RgbImage) -> Result<LabelMap> {
        self(image)
    }
}

/// The per-image features the season classifier consumes
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FaceFeatures {
    pub skin: [u8; 3],
    pub hair: [u8; 3],
    pub eye: [u8; 3],
    pub undertone: Tone,
}

/// Feature extractor over an injected segmentation service
#[derive(Debug)]
pub struct FeatureExtractor<S: Segmenter> {
    segmenter: S,
    config: FeatureConfig,
    undertone: UndertoneClassifier,
}

impl<S: Segmenter> FeatureExtractor<S> {
    /// Create an extractor with the default region-selection policy
    pub fn new(segmenter: S) -> Self {
        Self::with_config(segmenter, FeatureConfig::default())
    }

    /// Create an extractor with an explicit region-selection policy
    pub fn with_config(segmenter: S, config: FeatureConfig) -> Self {
        Self {
            segmenter,
            config,
            undertone: UndertoneClassifier::new(),
        }
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Extract skin, hair, and eye colors plus the undertone from a face photo
    ///
    /// The image is resized to the segmentation contract dimensions with
    /// bilinear interpolation; every sample is taken from that resized copy so
    /// pixel coordinates stay aligned with the label map.
    ///
    /// # Errors
    ///
    /// Any stage failure aborts the whole extraction and surfaces as
    /// `FeatureExtraction` with the original cause preserved; partial results
    /// are never returned.
    pub fn extract(&self, image: &RgbImage) -> Result<FaceFeatures> {
        if image.width() == 0 || image.height() == 0 {
            return Err(AnalysisError::invalid_image(
                "cannot extract features from an empty image",
            ));
        }

        let resized = imageops::resize(
            image,
            segmentation::INPUT_SIZE,
            segmentation::INPUT_SIZE,
            FilterType::Triangle,
        );

        let labels = self
            .segmenter
            .segment(&resized)
            .map_err(|e| AnalysisError::feature_extraction("segmentation failed", e))?;
        if labels.width() != resized.width() || labels.height() != resized.height() {
            return Err(AnalysisError::invalid_image(format!(
                "segmenter returned {}x{} label map for {}x{} input",
                labels.width(),
                labels.height(),
                resized.width(),
                resized.height()
            )));
        }

        let hair = self.feature_median(&resized, &labels, self.config.labels.hair, "hair")?;
        let eye = self.feature_median(&resized, &labels, self.config.labels.eye, "eye")?;
        let skin = self.skin_median(&resized, &labels)?;
        let undertone = self.undertone(&resized, &labels)?;

        Ok(FaceFeatures {
            skin,
            hair,
            eye,
            undertone,
        })
    }

    fn feature_median(
        &self,
        image: &RgbImage,
        labels: &LabelMap,
        class: u8,
        region: &str,
    ) -> Result<[u8; 3]> {
        median_color(image, &labels.mask_for_class(class), region)
            .map_err(|e| AnalysisError::feature_extraction(format!("{region} color stage"), e))
    }

    /// Skin sample: neck region first, alternate skin class when the neck is
    /// absent, fatal when both are empty
    fn skin_median(&self, image: &RgbImage, labels: &LabelMap) -> Result<[u8; 3]> {
        let neck = labels.mask_for_class(self.config.labels.neck);
        let mask = if neck.is_empty() {
            labels.mask_for_class(self.config.labels.alt_skin)
        } else {
            neck
        };
        median_color(image, &mask, "skin")
            .map_err(|e| AnalysisError::feature_extraction("skin color stage", e))
    }

    /// Undertone sample: configured primary class, falling back to the
    /// configured secondary class below the minimum viable sample size
    fn undertone(&self, image: &RgbImage, labels: &LabelMap) -> Result<Tone> {
        let primary = labels.mask_for_class(self.config.undertone_primary);
        let mask = if primary.count() < self.config.min_undertone_pixels {
            let fallback = labels.mask_for_class(self.config.undertone_fallback);
            if fallback.is_empty() {
                return Err(AnalysisError::feature_extraction(
                    "undertone stage",
                    AnalysisError::empty_region("undertone skin region"),
                ));
            }
            fallback
        } else {
            primary
        };

        let reading = self
            .undertone
            .classify(image, &mask)
            .map_err(|e| AnalysisError::feature_extraction("undertone stage", e))?;
        Ok(reading.tone)
    }
}
