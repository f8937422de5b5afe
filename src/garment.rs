//! Garment dominant-color extraction
//!
//! Two-stage design: a crude median over the non-background pixels, then a
//! k-means refinement that snaps the median onto the nearest cluster center.
//! The snap compensates for the median being pulled toward background and
//! shadow artifacts that survive thresholding.

use crate::{
    config::{CropRegion, GarmentConfig},
    constants::garment,
    error::{AnalysisError, Result},
    region::{median_color, RegionMask},
};
use image::{imageops, RgbImage};
use kmeans_colors::get_kmeans_hamerly;
use palette::Srgb;

/// Garment color extractor with configurable suppression and clustering
#[derive(Debug, Clone, Default)]
pub struct GarmentColorExtractor {
    config: GarmentConfig,
}

impl GarmentColorExtractor {
    /// Create an extractor with the deployed defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with explicit parameters
    pub fn with_config(config: GarmentConfig) -> Self {
        Self { config }
    }

    /// Median color of the non-background region
    ///
    /// A pixel counts as background when all channels reach the white
    /// threshold. An empty subject mask yields `(0, 0, 0)` rather than
    /// failing: a garment photo dominated by white background is a normal
    /// case, distinct from an extraction error.
    pub fn background_median(&self, image: &RgbImage) -> Result<[u8; 3]> {
        self.check_image(image)?;

        let threshold = self.config.white_threshold;
        let background = RegionMask::from_pixels(image, |p| p.iter().all(|&c| c >= threshold));
        let subject = background.inverted();

        match median_color(image, &subject, "garment") {
            Ok(median) => Ok(median),
            Err(AnalysisError::EmptyRegion { .. }) => Ok([0, 0, 0]),
            Err(e) => Err(e),
        }
    }

    /// Extract the single representative garment color
    ///
    /// # Errors
    ///
    /// Returns `InvalidImage` for a zero-pixel image or an out-of-bounds crop
    /// and `ConfigurationError` for a zero cluster count.
    pub fn extract(&self, image: &RgbImage) -> Result<[u8; 3]> {
        self.check_image(image)?;
        if self.config.clusters == 0 {
            return Err(AnalysisError::configuration(
                "garment clustering requires at least one cluster",
            ));
        }

        let median = self.background_median(image)?;

        let working = match self.config.crop {
            Some(crop) => self.cropped(image, crop)?,
            None => image.clone(),
        };

        let pixels: Vec<Srgb<f32>> = working
            .pixels()
            .map(|p| Srgb::new(p[0], p[1], p[2]).into_format())
            .collect();

        let clustering = get_kmeans_hamerly(
            self.config.clusters,
            garment::KMEANS_MAX_ITER,
            garment::KMEANS_CONVERGE,
            false,
            &pixels,
            garment::KMEANS_SEED,
        );

        let target = Srgb::new(
            median[0] as f32 / 255.0,
            median[1] as f32 / 255.0,
            median[2] as f32 / 255.0,
        );
        let mut best = target;
        let mut best_distance = f32::INFINITY;
        for centroid in &clustering.centroids {
            let dr = centroid.red - target.red;
            let dg = centroid.green - target.green;
            let db = centroid.blue - target.blue;
            let distance = (dr * dr + dg * dg + db * db).sqrt();
            if distance < best_distance {
                best = *centroid;
                best_distance = distance;
            }
        }

        Ok([
            (best.red * 255.0).round().clamp(0.0, 255.0) as u8,
            (best.green * 255.0).round().clamp(0.0, 255.0) as u8,
            (best.blue * 255.0).round().clamp(0.0, 255.0) as u8,
        ])
    }

    fn check_image(&self, image: &RgbImage) -> Result<()> {
        if image.width() == 0 || image.height() == 0 {
            return Err(AnalysisError::invalid_image(
                "cannot extract garment color from an empty image",
            ));
        }
        Ok(())
    }

    fn cropped(&self, image: &RgbImage, crop: CropRegion) -> Result<RgbImage> {
        if crop.width == 0
            || crop.height == 0
            || crop.x + crop.width > image.width()
            || crop.y + crop.height > image.height()
        {
            return Err(AnalysisError::invalid_image(format!(
                "crop {}x{}+{}+{} outside image bounds {}x{}",
                crop.width,
                crop.height,
                crop.x,
                crop.y,
                image.width(),
                image.height()
            )));
        }
        Ok(imageops::crop_imm(image, crop.x, crop.y, crop.width, crop.height).to_image())
    }
}
