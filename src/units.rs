//! Depth unit handling and display formatting helpers.

use serde::{Deserialize, Serialize};

const FEET_PER_METRE: f64 = 3.280_839_895;

/// Depth unit as declared in a LAS header
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DepthUnit {
    #[default]
    Metres,
    Feet,
    /// Unit string not recognised; values are shown as-is
    Unknown,
}

impl DepthUnit {
    /// Interpret a LAS unit mnemonic such as `M`, `FT` or `F`
    pub fn parse(unit: &str) -> Self {
        match unit.trim().to_ascii_uppercase().as_str() {
            "M" | "MT" | "METER" | "METERS" | "METRE" | "METRES" => DepthUnit::Metres,
            "F" | "FT" | "FEET" | "FOOT" => DepthUnit::Feet,
            _ => DepthUnit::Unknown,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            DepthUnit::Metres => "m",
            DepthUnit::Feet => "ft",
            DepthUnit::Unknown => "",
        }
    }

    /// Convert a depth from this unit to `target`. Unknown units are passed through.
    pub fn convert(&self, depth: f64, target: DepthUnit) -> f64 {
        match (self, target) {
            (DepthUnit::Metres, DepthUnit::Feet) => depth * FEET_PER_METRE,
            (DepthUnit::Feet, DepthUnit::Metres) => depth / FEET_PER_METRE,
            _ => depth,
        }
    }

    /// Label for a unit string, preferring the canonical symbol
    pub fn label(unit: &str) -> String {
        match DepthUnit::parse(unit) {
            DepthUnit::Unknown => unit.trim().to_string(),
            known => known.symbol().to_string(),
        }
    }
}

/// Format a depth range like `1500.0 - 1750.5 m`, converted to the display unit
pub fn format_depth_range(top: f64, bottom: f64, unit: &str, display: DepthUnit) -> String {
    let source = DepthUnit::parse(unit);
    if source == DepthUnit::Unknown {
        let unit = unit.trim();
        return format!("{:.1} - {:.1} {}", top, bottom, unit).trim_end().to_string();
    }
    format!(
        "{:.1} - {:.1} {}",
        source.convert(top, display),
        source.convert(bottom, display),
        display.symbol()
    )
}

/// Format a file size for display (B, KB, MB)
pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
