//! Fixed thresholds and reference values for season and garment analysis
//!
//! These values were tuned against the behavior of the deployed pipeline and
//! must be changed together with the classification tables, not in isolation.

/// Semantic segmentation contract
///
/// The external face-parsing network consumes a 512x512 RGB image and emits a
/// per-pixel class index. The index set is a compatibility contract and must
/// be preserved verbatim.
pub mod segmentation {
    /// Side length of the square input the segmentation network expects
    pub const INPUT_SIZE: u32 = 512;

    /// Number of semantic classes emitted by the network
    pub const NUM_CLASSES: u8 = 19;

    /// Highest valid class index in a label map
    pub const MAX_CLASS_INDEX: u8 = NUM_CLASSES - 1;
}

/// Lighting validation thresholds
///
/// All statistics are computed on the 8-bit LAB encoding (L scaled to 0-255,
/// a/b centered at 128).
pub mod lighting {
    /// Acceptable mean-L range. The upper bound exceeds the nominal 0-255
    /// encoding; it is kept as deployed rather than tightened.
    pub const BRIGHTNESS_RANGE: (f32, f32) = (100.0, 300.0);

    /// Minimum acceptable L-channel max-min spread
    pub const MIN_CONTRAST: f32 = 50.0;

    /// Acceptable mean-b range (color temperature proxy, higher = warmer).
    /// The upper bound is unreachable on the 8-bit encoding; kept as deployed.
    pub const COLOR_TEMP_RANGE: (f32, f32) = (0.0, 555.0);

    /// Maximum acceptable L-channel standard deviation
    pub const MAX_UNIFORMITY: f32 = 75.0;
}

/// Undertone classification thresholds
pub mod undertone {
    /// Mean chroma below this is neutral regardless of hue
    pub const NEUTRAL_CHROMA_THRESHOLD: f32 = 5.0;

    /// Warm hue band on the low end of the circle, inclusive degrees
    pub const WARM_HUE_LOW: (f32, f32) = (0.0, 69.0);

    /// Warm hue band on the high end of the circle, inclusive degrees
    pub const WARM_HUE_HIGH: (f32, f32) = (300.0, 360.0);

    /// Minimum viable pixel count for the primary undertone region before
    /// falling back to the secondary skin region
    pub const MIN_SAMPLE_PIXELS: usize = 500;
}

/// Garment color extraction parameters
pub mod garment {
    /// A pixel with all channels at or above this value counts as background
    pub const WHITE_THRESHOLD: u8 = 250;

    /// Default k for the cluster-refinement step
    pub const DEFAULT_CLUSTERS: usize = 4;

    /// K-means iteration cap
    pub const KMEANS_MAX_ITER: usize = 20;

    /// K-means convergence criterion
    pub const KMEANS_CONVERGE: f32 = 1.0;

    /// Fixed seed so extraction is deterministic per request
    pub const KMEANS_SEED: u64 = 42;
}

/// Palette matching parameters
pub mod palette_match {
    /// Default maximum perceptual distance for a garment color to count as
    /// belonging to a palette
    pub const DEFAULT_DISTANCE_THRESHOLD: f32 = 40.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lighting_ranges_ordered() {
        assert!(lighting::BRIGHTNESS_RANGE.0 < lighting::BRIGHTNESS_RANGE.1);
        assert!(lighting::COLOR_TEMP_RANGE.0 < lighting::COLOR_TEMP_RANGE.1);
        assert!(lighting::MIN_CONTRAST > 0.0);
        assert!(lighting::MAX_UNIFORMITY > 0.0);
    }

    #[test]
    fn test_warm_hue_bands_within_circle() {
        assert!(undertone::WARM_HUE_LOW.0 >= 0.0);
        assert!(undertone::WARM_HUE_LOW.1 < undertone::WARM_HUE_HIGH.0);
        assert!(undertone::WARM_HUE_HIGH.1 <= 360.0);
    }

    #[test]
    fn test_segmentation_contract() {
        assert_eq!(segmentation::INPUT_SIZE, 512);
        assert_eq!(segmentation::MAX_CLASS_INDEX, 18);
    }
}
