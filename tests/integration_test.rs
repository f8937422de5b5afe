//! Integration tests for the complete season and garment pipelines
//!
//! These tests validate the end-to-end workflows the service boundary calls:
//! - Lighting validation of an uploaded photo
//! - Face feature extraction and season classification over a stubbed
//!   segmentation service
//! - Garment color extraction and palette matching
//! - Error handling for edge cases and misconfiguration

use image::RgbImage;
use season_scan::{
    analyze_face, check_garment, classify_season, constants::segmentation::INPUT_SIZE,
    validate_lighting, AnalysisError, FeatureExtractor, LabelMap, PaletteSet, SeasonMatch,
    Segmenter, Tone,
};

/// Segmentation stub that paints horizontal class bands; stands in for the
/// external face-parsing network
struct StubSegmenter {
    bands: Vec<(u8, std::ops::Range<u32>)>,
}

impl Segmenter for StubSegmenter {
    fn segment(&self, image: &RgbImage) -> season_scan::Result<LabelMap> {
        let (w, h) = (image.width(), image.height());
        let mut data = vec![0u8; w as usize * h as usize];
        for (class, rows) in &self.bands {
            for y in rows.clone() {
                for x in 0..w {
                    data[y as usize * w as usize + x as usize] = *class;
                }
            }
        }
        LabelMap::new(w, h, data)
    }
}

/// Light Spring subject: dark blond hair, olive eyes, warm light skin
fn light_spring_face() -> (RgbImage, StubSegmenter) {
    let image = RgbImage::from_fn(INPUT_SIZE, INPUT_SIZE, |_, y| {
        if y < 96 {
            image::Rgb([135, 105, 85])
        } else if y < 128 {
            image::Rgb([75, 75, 55])
        } else {
            image::Rgb([195, 165, 145])
        }
    });
    let segmenter = StubSegmenter {
        bands: vec![(17, 0..96), (5, 96..128), (14, 128..INPUT_SIZE)],
    };
    (image, segmenter)
}

// ============================================================================
// Season Classification Pipeline
// ============================================================================

#[test]
fn test_face_pipeline_classifies_light_spring_features() {
    let (image, segmenter) = light_spring_face();
    let extractor = FeatureExtractor::new(segmenter);

    let report = analyze_face(&extractor, &image).unwrap();

    assert_eq!(report.features.hair, [135, 105, 85]);
    assert_eq!(report.features.eye, [75, 75, 55]);
    assert_eq!(report.features.skin, [195, 165, 145]);
    // Warm light skin reads as warm through the undertone classifier; the
    // table then matches by containment among warm-compatible seasons
    assert!(matches!(report.features.undertone, Tone::Warm | Tone::Neutral));
    assert_eq!(report.message, "Color season classification successful.");
}

#[test]
fn test_classifier_scenario_light_spring_exact() {
    // The classification layer on its own, with the spec'd tone label
    let season = classify_season([195, 165, 145], [135, 105, 85], [75, 75, 55], Tone::LightWarm);
    assert_eq!(
        season,
        SeasonMatch::Exact {
            name: "Light Spring",
            ambiguous: false
        }
    );
}

#[test]
fn test_classifier_scenario_fallback_is_distinct() {
    let season = classify_season([250, 250, 250], [10, 10, 10], [200, 200, 200], Tone::Warm);
    match season {
        SeasonMatch::Closest { name } => {
            assert!(!name.is_empty());
            assert!(season.to_string().starts_with("Closest Match: "));
        }
        other => panic!("expected a closest-match fallback, got {other:?}"),
    }
}

#[test]
fn test_face_pipeline_fails_without_hair() {
    let (image, _) = light_spring_face();
    let bald = StubSegmenter {
        bands: vec![(5, 96..128), (14, 128..INPUT_SIZE)],
    };
    let extractor = FeatureExtractor::new(bald);

    let err = analyze_face(&extractor, &image).unwrap_err();
    match &err {
        AnalysisError::FeatureExtraction { source, .. } => {
            let cause = source.as_ref().unwrap().to_string();
            assert!(cause.contains("hair"), "cause should name the region: {cause}");
        }
        other => panic!("expected FeatureExtraction, got {other:?}"),
    }
    // The boundary layer renders user_message; it must not be empty
    assert!(!err.user_message().is_empty());
}

#[test]
fn test_face_pipeline_never_returns_partial_results() {
    // Eyes missing: even though hair and skin are extractable, the whole
    // request fails
    let (image, _) = light_spring_face();
    let eyeless = StubSegmenter {
        bands: vec![(17, 0..96), (14, 128..INPUT_SIZE), (1, 96..128)],
    };
    let extractor = FeatureExtractor::new(eyeless);

    assert!(analyze_face(&extractor, &image).is_err());
}

// ============================================================================
// Lighting Validation
// ============================================================================

#[test]
fn test_lighting_endpoint_shape() {
    let image = RgbImage::from_fn(64, 64, |x, _| {
        if x < 32 {
            image::Rgb([235, 235, 235])
        } else {
            image::Rgb([110, 110, 110])
        }
    });

    let report = validate_lighting(&image).unwrap();
    assert!(report.valid, "feedback: {:?}", report.feedback);

    // Serialized form carries the boundary contract fields
    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"valid\":true"));
    assert!(json.contains("\"feedback\":[]"));
}

#[test]
fn test_lighting_flat_gray_fails_contrast_only() {
    let image = RgbImage::from_pixel(64, 64, image::Rgb([150, 150, 150]));
    let report = validate_lighting(&image).unwrap();

    assert!(!report.valid);
    assert_eq!(report.feedback.len(), 1);
    assert!(report.feedback[0].contains("contrast"));
}

#[test]
fn test_lighting_is_advisory_not_a_gate() {
    // A photo that fails lighting validation still flows through feature
    // extraction
    let (image, segmenter) = light_spring_face();
    let flat = RgbImage::from_pixel(64, 64, image::Rgb([150, 150, 150]));
    assert!(!validate_lighting(&flat).unwrap().valid);

    let extractor = FeatureExtractor::new(segmenter);
    assert!(analyze_face(&extractor, &image).is_ok());
}

// ============================================================================
// Garment Pipeline
// ============================================================================

#[test]
fn test_garment_pipeline_allows_matching_color() {
    // Deep red shirt on white, checked against the autumn palette that
    // carries dark reds
    let image = RgbImage::from_fn(60, 40, |x, _| {
        if x < 40 {
            image::Rgb([124, 10, 2])
        } else {
            image::Rgb([255, 255, 255])
        }
    });
    let palettes = PaletteSet::builtin();

    let report = check_garment(&image, &palettes, "Deep Autumn", None).unwrap();
    assert_eq!(report.color, [124, 10, 2]);
    assert!(report.allowed);
    assert_eq!(report.message, "Color identification successful.");
}

#[test]
fn test_garment_pipeline_rejects_clashing_color() {
    // Neon green against the deep winter palette at a tight threshold
    let image = RgbImage::from_pixel(32, 32, image::Rgb([57, 255, 20]));
    let palettes = PaletteSet::builtin();

    let report = check_garment(&image, &palettes, "Deep Winter", Some(10.0)).unwrap();
    assert!(!report.allowed);
}

#[test]
fn test_garment_pipeline_unknown_palette() {
    let image = RgbImage::from_pixel(32, 32, image::Rgb([57, 255, 20]));
    let palettes = PaletteSet::builtin();

    let err = check_garment(&image, &palettes, "Tropical Monsoon", None).unwrap_err();
    assert!(matches!(err, AnalysisError::ConfigurationError { .. }));
}

#[test]
fn test_garment_pipeline_custom_palette_file() {
    let dir = std::env::temp_dir().join("season_scan_it");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("palettes.json");
    std::fs::write(&path, r##"{"Workwear": ["#112233", "#445566"]}"##).unwrap();

    let palettes = PaletteSet::from_json_file(&path).unwrap();
    let image = RgbImage::from_pixel(16, 16, image::Rgb([0x11, 0x22, 0x33]));

    let report = check_garment(&image, &palettes, "Workwear", None).unwrap();
    assert!(report.allowed);
}

#[test]
fn test_garment_all_white_photo_is_not_an_error() {
    let image = RgbImage::from_pixel(32, 32, image::Rgb([255, 255, 255]));
    let palettes = PaletteSet::builtin();

    // No subject pixels: the median defaults to black and the pipeline keeps
    // going instead of failing
    let report = check_garment(&image, &palettes, "True Winter", None).unwrap();
    assert!(report.color[0] > 200, "refinement should snap to the white content");
}
