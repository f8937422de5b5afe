//! Named garment palettes and the perceptual palette match
//!
//! A palette is an ordered list of allowed hex colors keyed by season name.
//! The match converts the query color and every palette entry into CIELAB
//! and gates on Euclidean distance: allowed if any entry is within the
//! threshold. Pure boolean gate, no partial credit and no nearest-match
//! reporting.

use crate::{
    color::ColorConverter,
    constants::palette_match,
    error::{AnalysisError, Result},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Built-in season palettes, keyed by the classification table's season names
const BUILTIN_PALETTES: &[(&str, &[&str])] = &[
    (
        "Light Spring",
        &["#FFDFBA", "#FFE8A1", "#B5EAD7", "#A8D8EA", "#F7C5CC", "#F9F1C7", "#E4C1F9"],
    ),
    (
        "True Spring",
        &["#FF7F50", "#FFD700", "#7FFF00", "#40E0D0", "#FF6F61", "#F4A460", "#FFA07A"],
    ),
    (
        "Warm Spring",
        &["#E9967A", "#EEB422", "#9ACD32", "#48D1CC", "#FF8C69", "#DAA520", "#F0E68C"],
    ),
    (
        "Bright Spring",
        &["#FF4500", "#FFD300", "#00FA9A", "#00BFFF", "#FF1493", "#ADFF2F", "#FF69B4"],
    ),
    (
        "Light Summer",
        &["#B0C4DE", "#D8BFD8", "#AFEEEE", "#F0D9E7", "#C3CDE6", "#BFD8D2", "#E6E6FA"],
    ),
    (
        "True Summer",
        &["#4682B4", "#9370DB", "#5F9EA0", "#C71585", "#6A5ACD", "#708090", "#7B68EE"],
    ),
    (
        "Cool Summer",
        &["#4169E1", "#8A2BE2", "#20B2AA", "#DB7093", "#483D8B", "#6495ED", "#66CDAA"],
    ),
    (
        "Soft Summer",
        &["#778899", "#9F8FAF", "#8FBC8F", "#BC8F8F", "#A9A9C9", "#91A3B0", "#C4AEAD"],
    ),
    (
        "Soft Autumn",
        &["#C19A6B", "#BDB76B", "#A0785A", "#8F9779", "#D2B48C", "#B87333", "#967117"],
    ),
    (
        "True Autumn",
        &["#B5651D", "#808000", "#CC7722", "#8B4513", "#DAA06D", "#6B8E23", "#A0522D"],
    ),
    (
        "Warm Autumn",
        &["#D2691E", "#B8860B", "#CD853F", "#556B2F", "#E2725B", "#C04000", "#9B7653"],
    ),
    (
        "Deep Autumn",
        &["#7C0A02", "#654321", "#4B5320", "#803790", "#5C4033", "#8B0000", "#3D2B1F"],
    ),
    (
        "True Winter",
        &["#0000CD", "#DC143C", "#008080", "#FFFFFF", "#000000", "#4B0082", "#C90016"],
    ),
    (
        "Bright Winter",
        &["#0047AB", "#FF0038", "#00A86B", "#FF00FF", "#00FFFF", "#FFFF00", "#E0115F"],
    ),
    (
        "Cool Winter",
        &["#002FA7", "#9932CC", "#0ABAB5", "#E30B5C", "#36454F", "#007BA7", "#86608E"],
    ),
    (
        "Deep Winter",
        &["#191970", "#800020", "#013220", "#301934", "#2F4F4F", "#1B1B1B", "#581845"],
    ),
];

/// Immutable mapping from palette name to its ordered allowed colors
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaletteSet {
    palettes: BTreeMap<String, Vec<String>>,
}

impl PaletteSet {
    /// The palette table shipped with the crate, one palette per season
    pub fn builtin() -> Self {
        let palettes = BUILTIN_PALETTES
            .iter()
            .map(|(name, colors)| {
                (
                    (*name).to_string(),
                    colors.iter().map(|c| (*c).to_string()).collect(),
                )
            })
            .collect();
        Self { palettes }
    }

    /// Parse a palette set from a JSON object of name -> ["#RRGGBB", ...]
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| AnalysisError::configuration_with("cannot parse palette JSON", e))
    }

    /// Load a palette set from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::configuration_with(
                format!("cannot read palette file {}", path.display()),
                e,
            )
        })?;
        Self::from_json_str(&content)
    }

    /// Palette names in deterministic order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.palettes.keys().map(String::as_str)
    }

    /// The allowed colors of a named palette
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` when the palette does not exist.
    pub fn get(&self, name: &str) -> Result<&[String]> {
        self.palettes
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| AnalysisError::configuration(format!("unknown palette {:?}", name)))
    }

    /// Whether a color belongs to a named palette at the default threshold
    pub fn color_is_allowed(&self, rgb: [u8; 3], palette: &str) -> Result<bool> {
        self.color_is_allowed_within(rgb, palette, palette_match::DEFAULT_DISTANCE_THRESHOLD)
    }

    /// Whether a color is within `threshold` of any entry of a named palette
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` for an unknown palette name or a
    /// malformed hex entry in the loaded configuration.
    pub fn color_is_allowed_within(
        &self,
        rgb: [u8; 3],
        palette: &str,
        threshold: f32,
    ) -> Result<bool> {
        let allowed = self.get(palette)?;
        let converter = ColorConverter::new();
        let query = converter.rgb_to_lab(rgb[0], rgb[1], rgb[2]);

        for hex in allowed {
            let srgb = converter.hex_to_srgb(hex)?;
            let [r, g, b] = converter.srgb_to_rgb(srgb);
            let entry = converter.rgb_to_lab(r, g, b);
            if converter.delta_e(query, entry) < threshold {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::season::SEASONS;

    #[test]
    fn test_builtin_covers_every_season() {
        let palettes = PaletteSet::builtin();
        for season in &SEASONS {
            let colors = palettes.get(season.name).unwrap();
            assert!(!colors.is_empty(), "{} palette empty", season.name);
        }
    }

    #[test]
    fn test_builtin_hex_entries_parse() {
        let palettes = PaletteSet::builtin();
        let converter = ColorConverter::new();
        for name in palettes.names().collect::<Vec<_>>() {
            for hex in palettes.get(name).unwrap() {
                assert!(
                    converter.hex_to_srgb(hex).is_ok(),
                    "bad hex {hex} in {name}"
                );
            }
        }
    }

    #[test]
    fn test_exact_palette_color_is_allowed() {
        let palettes = PaletteSet::builtin();
        // #FF7F50 from True Spring
        assert!(palettes.color_is_allowed([255, 127, 80], "True Spring").unwrap());
    }

    #[test]
    fn test_far_color_is_rejected_at_tight_threshold() {
        let palettes = PaletteSet::builtin();
        // Pure black against the light spring pastels, tiny threshold
        let allowed = palettes
            .color_is_allowed_within([0, 0, 0], "Light Spring", 5.0)
            .unwrap();
        assert!(!allowed);
    }

    #[test]
    fn test_unknown_palette_is_configuration_error() {
        let palettes = PaletteSet::builtin();
        let err = palettes.color_is_allowed([0, 0, 0], "Mild Monsoon").unwrap_err();
        assert!(matches!(err, AnalysisError::ConfigurationError { .. }));
        assert!(err.to_string().contains("Mild Monsoon"));
    }

    #[test]
    fn test_malformed_hex_in_loaded_palette() {
        let palettes =
            PaletteSet::from_json_str(r##"{"Custom": ["#00FF00", "not-a-color"]}"##).unwrap();
        // Query far from the first entry so the malformed second entry is reached
        let err = palettes
            .color_is_allowed_within([255, 0, 255], "Custom", 1.0)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::ConfigurationError { .. }));
    }

    #[test]
    fn test_json_roundtrip() {
        let palettes = PaletteSet::builtin();
        let json = serde_json::to_string(&palettes).unwrap();
        let parsed = PaletteSet::from_json_str(&json).unwrap();
        assert_eq!(
            parsed.names().count(),
            palettes.names().count()
        );
        assert_eq!(parsed.get("Deep Winter").unwrap(), palettes.get("Deep Winter").unwrap());
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // Distance exactly at the threshold does not count as allowed
        let palettes = PaletteSet::from_json_str(r##"{"Single": ["#000000"]}"##).unwrap();
        assert!(palettes
            .color_is_allowed_within([0, 0, 0], "Single", 0.5)
            .unwrap());
        assert!(!palettes
            .color_is_allowed_within([0, 0, 0], "Single", 0.0)
            .unwrap());
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(matches!(
            PaletteSet::from_json_str("not json").unwrap_err(),
            AnalysisError::ConfigurationError { .. }
        ));
        assert!(PaletteSet::from_json_file(Path::new("/nonexistent/palettes.json")).is_err());
    }
}
