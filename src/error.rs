//! Error types for the season_scan library

use thiserror::Error;

/// Result type alias for season_scan operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Comprehensive error types for season and garment analysis
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// A required region mask selected zero pixels
    #[error("Empty region: no pixels found for {region}")]
    EmptyRegion { region: String },

    /// Input image is unusable (wrong dimensions, zero pixels, channel mismatch)
    #[error("Invalid image: {message}")]
    InvalidImage { message: String },

    /// Referenced configuration that does not exist or cannot be parsed
    #[error("Configuration error: {message}")]
    ConfigurationError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Aggregate failure inside the feature extractor, preserving the cause
    #[error("Feature extraction failed: {message}")]
    FeatureExtraction {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl AnalysisError {
    /// Create an empty-region error for a named region
    pub fn empty_region(region: impl Into<String>) -> Self {
        Self::EmptyRegion {
            region: region.into(),
        }
    }

    /// Create an invalid-image error
    pub fn invalid_image(message: impl Into<String>) -> Self {
        Self::InvalidImage {
            message: message.into(),
        }
    }

    /// Create a configuration error without an underlying cause
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with context
    pub fn configuration_with<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigurationError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Wrap a lower-level failure into a feature-extraction error
    pub fn feature_extraction<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::FeatureExtraction {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Check if this error indicates a recoverable condition
    ///
    /// Empty regions are recoverable at the call sites that define a fallback
    /// region (skin and undertone selection); everything else is fatal to the
    /// current request.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AnalysisError::EmptyRegion { .. })
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::EmptyRegion { region } => {
                format!(
                    "Could not find a usable {} region in the photo. Please retake the photo with the subject clearly visible.",
                    region
                )
            }
            AnalysisError::InvalidImage { .. } => {
                "Could not read the image. Please upload a color photo in a supported format."
                    .to_string()
            }
            AnalysisError::ConfigurationError { .. } => {
                "The requested palette is not available.".to_string()
            }
            AnalysisError::FeatureExtraction { .. } => {
                "Could not analyze the face photo. Please retake it with even lighting and the face centered."
                    .to_string()
            }
        }
    }
}
