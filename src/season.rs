//! Rule-based color season classification
//!
//! A season is a named record combining compatible undertones with inclusive
//! RGB range-boxes for skin, hair, and eye color. Classification first looks
//! for an exact containment match among undertone-compatible seasons and
//! falls back to the nearest range-box centroid over the whole table.
//!
//! The axis-aligned-box model assumes the season regions are convex in RGB
//! space. That is a known simplification of the deployed system, kept as-is;
//! replacing it with richer boundaries is a future scope decision.

use crate::analysis::undertone::Tone;
use serde::Serialize;

/// Inclusive per-channel RGB interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeBox {
    pub min: [u8; 3],
    pub max: [u8; 3],
}

impl RangeBox {
    pub const fn new(min: [u8; 3], max: [u8; 3]) -> Self {
        Self { min, max }
    }

    /// Containment test, inclusive on both bounds, independent per channel
    pub fn contains(&self, color: [u8; 3]) -> bool {
        (0..3).all(|c| self.min[c] <= color[c] && color[c] <= self.max[c])
    }

    /// Integer midpoint of the box, per channel
    pub fn centroid(&self) -> [u8; 3] {
        [
            ((self.min[0] as u16 + self.max[0] as u16) / 2) as u8,
            ((self.min[1] as u16 + self.max[1] as u16) / 2) as u8,
            ((self.min[2] as u16 + self.max[2] as u16) / 2) as u8,
        ]
    }
}

/// One season record in the static classification table
#[derive(Debug, Clone, Copy)]
pub struct SeasonDefinition {
    pub name: &'static str,
    pub undertones: &'static [Tone],
    pub skin: RangeBox,
    pub hair: RangeBox,
    pub eye: RangeBox,
}

/// The 16 seasons, 4 per family, in table order.
///
/// Adjacent sub-seasons tile non-overlapping slices per feature. Values are a
/// compatibility contract with the deployed classifier.
pub static SEASONS: [SeasonDefinition; 16] = [
    // -------------------- Spring --------------------
    SeasonDefinition {
        name: "Light Spring",
        undertones: &[Tone::LightWarm, Tone::Neutral],
        skin: RangeBox::new([190, 160, 140], [200, 170, 150]),
        hair: RangeBox::new([130, 100, 80], [140, 110, 90]),
        eye: RangeBox::new([70, 70, 50], [80, 80, 60]),
    },
    SeasonDefinition {
        name: "True Spring",
        undertones: &[Tone::Warm],
        skin: RangeBox::new([201, 171, 151], [210, 180, 160]),
        hair: RangeBox::new([141, 111, 91], [150, 120, 100]),
        eye: RangeBox::new([81, 71, 51], [90, 80, 60]),
    },
    SeasonDefinition {
        name: "Warm Spring",
        undertones: &[Tone::Warm],
        skin: RangeBox::new([211, 181, 161], [220, 190, 170]),
        hair: RangeBox::new([151, 121, 101], [160, 130, 110]),
        eye: RangeBox::new([91, 72, 52], [100, 90, 70]),
    },
    SeasonDefinition {
        name: "Bright Spring",
        undertones: &[Tone::Warm, Tone::Neutral],
        skin: RangeBox::new([221, 191, 171], [230, 200, 180]),
        hair: RangeBox::new([161, 131, 111], [170, 140, 120]),
        eye: RangeBox::new([101, 73, 53], [110, 100, 80]),
    },
    // -------------------- Summer --------------------
    SeasonDefinition {
        name: "Light Summer",
        undertones: &[Tone::LightCool, Tone::Neutral],
        skin: RangeBox::new([180, 160, 150], [190, 170, 160]),
        hair: RangeBox::new([100, 90, 90], [110, 100, 100]),
        eye: RangeBox::new([60, 60, 60], [70, 70, 70]),
    },
    SeasonDefinition {
        name: "True Summer",
        undertones: &[Tone::Cool],
        skin: RangeBox::new([191, 171, 161], [200, 180, 170]),
        hair: RangeBox::new([111, 101, 101], [120, 110, 110]),
        eye: RangeBox::new([71, 61, 61], [80, 70, 70]),
    },
    SeasonDefinition {
        name: "Cool Summer",
        undertones: &[Tone::Cool],
        skin: RangeBox::new([201, 181, 171], [210, 190, 180]),
        hair: RangeBox::new([121, 111, 111], [130, 120, 120]),
        eye: RangeBox::new([81, 62, 62], [90, 80, 80]),
    },
    SeasonDefinition {
        name: "Soft Summer",
        undertones: &[Tone::LightCool, Tone::Neutral],
        skin: RangeBox::new([211, 191, 181], [220, 200, 190]),
        hair: RangeBox::new([131, 121, 121], [140, 130, 130]),
        eye: RangeBox::new([91, 63, 63], [100, 90, 90]),
    },
    // -------------------- Autumn --------------------
    SeasonDefinition {
        name: "Soft Autumn",
        undertones: &[Tone::Neutral, Tone::LightWarm],
        skin: RangeBox::new([160, 130, 110], [170, 140, 120]),
        hair: RangeBox::new([90, 60, 40], [100, 70, 50]),
        eye: RangeBox::new([50, 50, 40], [60, 60, 50]),
    },
    SeasonDefinition {
        name: "True Autumn",
        undertones: &[Tone::Warm],
        skin: RangeBox::new([171, 141, 121], [180, 150, 130]),
        hair: RangeBox::new([101, 71, 51], [110, 80, 60]),
        eye: RangeBox::new([61, 51, 41], [70, 60, 50]),
    },
    SeasonDefinition {
        name: "Warm Autumn",
        undertones: &[Tone::Warm],
        skin: RangeBox::new([181, 151, 131], [190, 160, 140]),
        hair: RangeBox::new([111, 81, 61], [120, 90, 70]),
        eye: RangeBox::new([71, 52, 42], [80, 70, 60]),
    },
    SeasonDefinition {
        name: "Deep Autumn",
        undertones: &[Tone::Warm, Tone::Neutral],
        skin: RangeBox::new([191, 161, 141], [200, 170, 150]),
        hair: RangeBox::new([121, 91, 71], [130, 100, 80]),
        eye: RangeBox::new([81, 53, 43], [90, 80, 70]),
    },
    // -------------------- Winter --------------------
    SeasonDefinition {
        name: "True Winter",
        undertones: &[Tone::Cool],
        skin: RangeBox::new([150, 130, 140], [160, 140, 150]),
        hair: RangeBox::new([40, 40, 50], [50, 50, 60]),
        eye: RangeBox::new([30, 30, 40], [40, 40, 50]),
    },
    SeasonDefinition {
        name: "Bright Winter",
        undertones: &[Tone::Cool, Tone::Neutral],
        skin: RangeBox::new([161, 141, 151], [170, 150, 160]),
        hair: RangeBox::new([51, 51, 61], [60, 60, 70]),
        eye: RangeBox::new([41, 31, 41], [50, 40, 50]),
    },
    SeasonDefinition {
        name: "Cool Winter",
        undertones: &[Tone::Cool, Tone::LightCool],
        skin: RangeBox::new([171, 151, 161], [180, 160, 170]),
        hair: RangeBox::new([61, 61, 71], [70, 70, 80]),
        eye: RangeBox::new([51, 32, 42], [60, 50, 60]),
    },
    SeasonDefinition {
        name: "Deep Winter",
        undertones: &[Tone::Cool, Tone::Neutral],
        skin: RangeBox::new([181, 161, 171], [190, 170, 180]),
        hair: RangeBox::new([71, 71, 81], [80, 80, 90]),
        eye: RangeBox::new([61, 33, 43], [70, 60, 70]),
    },
];

/// Classification outcome
///
/// Exact containment matches and nearest-centroid fallbacks are reported in
/// distinguishable forms; a fallback never masquerades as an exact match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeasonMatch {
    /// All three features fell inside the season's boxes. `ambiguous` is set
    /// when more than one season matched; the first in table order wins.
    Exact {
        name: &'static str,
        ambiguous: bool,
    },
    /// No exact match existed; this is the season with the minimum total
    /// centroid distance.
    Closest { name: &'static str },
}

impl SeasonMatch {
    pub fn name(&self) -> &'static str {
        match self {
            SeasonMatch::Exact { name, .. } | SeasonMatch::Closest { name } => name,
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, SeasonMatch::Exact { .. })
    }
}

impl std::fmt::Display for SeasonMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeasonMatch::Exact {
                name,
                ambiguous: false,
            } => f.write_str(name),
            SeasonMatch::Exact {
                name,
                ambiguous: true,
            } => write!(f, "{name} (multiple matches)"),
            SeasonMatch::Closest { name } => write!(f, "Closest Match: {name}"),
        }
    }
}

fn euclidean_distance(a: [u8; 3], b: [u8; 3]) -> f64 {
    (0..3)
        .map(|c| {
            let d = a[c] as f64 - b[c] as f64;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Total distance of a feature triple to a season's box centroids
fn centroid_distance(season: &SeasonDefinition, skin: [u8; 3], hair: [u8; 3], eye: [u8; 3]) -> f64 {
    euclidean_distance(skin, season.skin.centroid())
        + euclidean_distance(hair, season.hair.centroid())
        + euclidean_distance(eye, season.eye.centroid())
}

/// Classify a person into a color season
///
/// Exact matching considers only seasons whose undertone list contains the
/// input tone. The nearest-centroid fallback deliberately ranges over the
/// entire table so it always produces a season, even for tones no season
/// lists.
pub fn classify_season(skin: [u8; 3], hair: [u8; 3], eye: [u8; 3], tone: Tone) -> SeasonMatch {
    let mut exact: Option<&'static str> = None;
    let mut ambiguous = false;

    for season in &SEASONS {
        if !season.undertones.contains(&tone) {
            continue;
        }
        if season.skin.contains(skin) && season.hair.contains(hair) && season.eye.contains(eye) {
            if exact.is_some() {
                ambiguous = true;
            } else {
                exact = Some(season.name);
            }
        }
    }

    if let Some(name) = exact {
        return SeasonMatch::Exact { name, ambiguous };
    }

    // No exact match: nearest centroid over every season. Strict comparison
    // keeps the earlier entry on ties, so table order breaks them.
    let mut best = &SEASONS[0];
    let mut best_distance = centroid_distance(best, skin, hair, eye);
    for season in &SEASONS[1..] {
        let distance = centroid_distance(season, skin, hair, eye);
        if distance < best_distance {
            best = season;
            best_distance = distance;
        }
    }
    SeasonMatch::Closest { name: best.name }
}
