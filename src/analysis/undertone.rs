//! Skin undertone detection via LAB hue/chroma geometry
//!
//! Hue angle places a tone on the warm/cool axis of color theory; chroma
//! measures how far it sits from true neutral. Regardless of hue, a mean
//! chroma below the neutral threshold classifies as neutral.
//!
//! Hue and chroma are computed per pixel and then averaged arithmetically
//! over the masked subset. The arithmetic hue mean has a known discontinuity
//! near 0/360 degrees; downstream thresholds were tuned against this
//! behavior, so it is kept rather than replaced with a circular mean.

use crate::{
    color::ColorConverter,
    constants::undertone,
    error::{AnalysisError, Result},
    region::RegionMask,
};
use image::RgbImage;
use serde::{Deserialize, Serialize};

/// Undertone vocabulary shared with the season table
///
/// The classifier only ever emits `Warm`, `Cool`, or `Neutral`; the light
/// variants exist in the season definitions and in externally supplied tones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tone {
    #[serde(rename = "warm")]
    Warm,
    #[serde(rename = "light warm")]
    LightWarm,
    #[serde(rename = "neutral")]
    Neutral,
    #[serde(rename = "light cool")]
    LightCool,
    #[serde(rename = "cool")]
    Cool,
}

impl Tone {
    /// Canonical lowercase label
    pub fn label(&self) -> &'static str {
        match self {
            Tone::Warm => "warm",
            Tone::LightWarm => "light warm",
            Tone::Neutral => "neutral",
            Tone::LightCool => "light cool",
            Tone::Cool => "cool",
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Tone {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "warm" => Ok(Tone::Warm),
            "light warm" => Ok(Tone::LightWarm),
            "neutral" => Ok(Tone::Neutral),
            "light cool" => Ok(Tone::LightCool),
            "cool" => Ok(Tone::Cool),
            other => Err(AnalysisError::configuration(format!(
                "unknown undertone label {:?}",
                other
            ))),
        }
    }
}

/// Classification result with the mean geometry it was derived from
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ToneReading {
    pub tone: Tone,
    pub mean_hue: f32,
    pub mean_chroma: f32,
}

/// Undertone classifier over a masked skin/neck region
#[derive(Debug, Clone, Default)]
pub struct UndertoneClassifier {
    converter: ColorConverter,
}

impl UndertoneClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify the undertone of the masked region of an image
    ///
    /// An empty mask degenerates to mean hue and chroma of 0, which reads as
    /// neutral. This fallback is deliberate: the caller has already applied
    /// its region-selection policy by this point.
    ///
    /// # Errors
    ///
    /// Returns `InvalidImage` if mask and image dimensions differ.
    pub fn classify(&self, image: &RgbImage, mask: &RegionMask) -> Result<ToneReading> {
        if image.width() != mask.width() || image.height() != mask.height() {
            return Err(AnalysisError::invalid_image(format!(
                "undertone mask {}x{} does not match image {}x{}",
                mask.width(),
                mask.height(),
                image.width(),
                image.height()
            )));
        }

        let mut hue_sum = 0.0f64;
        let mut chroma_sum = 0.0f64;
        let mut count = 0usize;
        for y in 0..image.height() {
            for x in 0..image.width() {
                if !mask.contains(x, y) {
                    continue;
                }
                let [_, a8, b8] = self.converter.rgb_to_lab8(image.get_pixel(x, y).0);
                let (hue, chroma) = self.converter.hue_chroma(a8, b8);
                hue_sum += hue as f64;
                chroma_sum += chroma as f64;
                count += 1;
            }
        }

        let (mean_hue, mean_chroma) = if count > 0 {
            (
                (hue_sum / count as f64) as f32,
                (chroma_sum / count as f64) as f32,
            )
        } else {
            (0.0, 0.0)
        };

        Ok(ToneReading {
            tone: classify_tone(mean_hue, mean_chroma),
            mean_hue,
            mean_chroma,
        })
    }
}

/// Apply the tone rules to mean hue and chroma
///
/// Rule order matters: low chroma is neutral regardless of hue.
fn classify_tone(mean_hue: f32, mean_chroma: f32) -> Tone {
    if mean_chroma < undertone::NEUTRAL_CHROMA_THRESHOLD {
        Tone::Neutral
    } else if (undertone::WARM_HUE_LOW.0..=undertone::WARM_HUE_LOW.1).contains(&mean_hue)
        || (undertone::WARM_HUE_HIGH.0..=undertone::WARM_HUE_HIGH.1).contains(&mean_hue)
    {
        Tone::Warm
    } else {
        Tone::Cool
    }
}
