//! Image analysis stages: lighting validation, undertone detection, and
//! face feature extraction

pub mod features;
pub mod lighting;
pub mod undertone;

pub use features::{FaceFeatures, FeatureExtractor, Segmenter};
pub use lighting::{LightingReport, LightingStats, LightingValidator};
pub use undertone::{Tone, ToneReading, UndertoneClassifier};
