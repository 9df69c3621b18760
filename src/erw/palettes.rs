//! Palette registry for the sequential color scales used by the figures
//!
//! Loads palettes from palettes.json (embedded at compile time) and provides
//! access by name. The stops are the 9-class ColorBrewer definitions, so
//! sampled colors match the palettes the published figures were styled with.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;

/// Embedded palettes.json content
const PALETTES_JSON: &str = include_str!("../../palettes.json");

/// Global palette registry, initialized lazily on first access
pub static PALETTE_REGISTRY: Lazy<PaletteRegistry> = Lazy::new(|| {
    PaletteRegistry::from_json(PALETTES_JSON).unwrap_or_else(|e| {
        eprintln!("ERROR: Failed to load palettes.json: {}", e);
        PaletteRegistry::default()
    })
});

/// A single palette definition from palettes.json
#[derive(Debug, Clone, Deserialize)]
pub struct PaletteDefinition {
    pub name: String,
    pub colors: Vec<String>,
}

impl PaletteDefinition {
    /// Get a color stop by index
    pub fn get_color(&self, index: usize) -> [u8; 3] {
        if self.colors.is_empty() {
            return [128, 128, 128]; // Gray fallback
        }
        let idx = index.min(self.colors.len() - 1);
        parse_hex_color(&self.colors[idx]).unwrap_or([128, 128, 128])
    }

    /// Get the number of color stops in this palette
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Check if the palette is empty
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Interpolate a color from the palette at position t ∈ [0, 1]
    ///
    /// t=0 returns the first stop, t=1 the last stop. Values in between
    /// are linearly interpolated.
    pub fn interpolate(&self, t: f64) -> [u8; 3] {
        if self.colors.is_empty() {
            return [128, 128, 128]; // Gray fallback
        }

        let t = t.clamp(0.0, 1.0);
        let n = self.colors.len();

        if n == 1 {
            return self.get_color(0);
        }

        let pos = t * (n - 1) as f64;
        let idx_low = pos.floor() as usize;
        let idx_high = (idx_low + 1).min(n - 1);
        let frac = pos - idx_low as f64;

        let color_low = self.get_color(idx_low);
        let color_high = self.get_color(idx_high);

        [
            (color_low[0] as f64 * (1.0 - frac) + color_high[0] as f64 * frac) as u8,
            (color_low[1] as f64 * (1.0 - frac) + color_high[1] as f64 * frac) as u8,
            (color_low[2] as f64 * (1.0 - frac) + color_high[2] as f64 * frac) as u8,
        ]
    }

    /// Sample n evenly spaced colors over the scale
    ///
    /// This matches how discrete palettes are derived from a sequential
    /// scale: n=1 returns the first stop, otherwise endpoints included.
    pub fn sample(&self, n: usize) -> Vec<[u8; 3]> {
        if n == 0 {
            return vec![];
        }
        if n == 1 {
            return vec![self.get_color(0)];
        }
        (0..n)
            .map(|i| self.interpolate(i as f64 / (n - 1) as f64))
            .collect()
    }
}

/// Registry of all available palettes
#[derive(Debug, Clone, Default)]
pub struct PaletteRegistry {
    /// All palettes by name (lowercase keys for case-insensitive lookup)
    palettes: HashMap<String, PaletteDefinition>,
}

impl PaletteRegistry {
    /// Load palettes from JSON string
    pub fn from_json(json: &str) -> Result<Self, String> {
        let definitions: Vec<PaletteDefinition> = serde_json::from_str(json)
            .map_err(|e| format!("Failed to parse palettes JSON: {}", e))?;

        let mut registry = Self::default();
        for def in definitions {
            registry.palettes.insert(def.name.to_lowercase(), def);
        }
        Ok(registry)
    }

    /// Get a palette by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&PaletteDefinition> {
        self.palettes.get(&name.to_lowercase())
    }
}

/// Parse a hex color string to RGB array
///
/// Supports formats:
/// - `#RRGGBB` (6 hex digits)
/// - `#RRGGBBAA` (8 hex digits, alpha ignored)
/// - `RRGGBB` / `RRGGBBAA` (without #)
pub fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.trim_start_matches('#');

    if hex.len() != 6 && hex.len() != 8 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some([r, g, b])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FF0000"), Some([255, 0, 0]));
        assert_eq!(parse_hex_color("#00FF00"), Some([0, 255, 0]));
        assert_eq!(parse_hex_color("#1D91C0"), Some([29, 145, 192]));

        // Without #
        assert_eq!(parse_hex_color("FF0000"), Some([255, 0, 0]));

        // 8-digit hex (with alpha, ignored)
        assert_eq!(parse_hex_color("#FFF5EBFF"), Some([255, 245, 235]));

        // Invalid
        assert_eq!(parse_hex_color("#FFF"), None); // Too short
        assert_eq!(parse_hex_color("GGGGGG"), None); // Invalid hex
    }

    #[test]
    fn test_palette_registry_loads() {
        let registry = &*PALETTE_REGISTRY;

        let ylgnbu = registry.get("YlGnBu");
        assert!(ylgnbu.is_some());
        let ylgnbu = ylgnbu.unwrap();
        assert_eq!(ylgnbu.len(), 9);
        assert_eq!(ylgnbu.get_color(0), [255, 255, 217]); // #FFFFD9
        assert_eq!(ylgnbu.get_color(8), [8, 29, 88]); // #081D58

        // Case-insensitive lookup
        assert!(registry.get("oranges").is_some());
    }

    #[test]
    fn test_interpolate_endpoints() {
        let oranges = PALETTE_REGISTRY.get("Oranges").unwrap();
        assert_eq!(oranges.interpolate(0.0), oranges.get_color(0));
        assert_eq!(oranges.interpolate(1.0), oranges.get_color(8));

        // Out-of-range t clamps
        assert_eq!(oranges.interpolate(-1.0), oranges.get_color(0));
        assert_eq!(oranges.interpolate(2.0), oranges.get_color(8));
    }

    #[test]
    fn test_sample_counts_and_endpoints() {
        let ylgnbu = PALETTE_REGISTRY.get("YlGnBu").unwrap();

        let six = ylgnbu.sample(6);
        assert_eq!(six.len(), 6);
        assert_eq!(six[0], ylgnbu.get_color(0));
        assert_eq!(six[5], ylgnbu.get_color(8));

        assert!(ylgnbu.sample(0).is_empty());
        assert_eq!(ylgnbu.sample(1), vec![ylgnbu.get_color(0)]);
    }
}
