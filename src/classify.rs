//! Mnemonic-based curve classification.
//!
//! Curves are grouped into display categories by an ordered rule table.
//! The first rule whose pattern matches wins; depth/index curves are
//! excluded from the output entirely. This is a default grouping only,
//! users reassign curves freely before import.

use serde::Serialize;
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

use crate::parsers::CurveDefinition;

/// Display category for a curve
#[derive(AsRefStr, Clone, Copy, Debug, EnumIter, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum CurveCategory {
    #[strum(serialize = "Gamma Ray")]
    GammaRay,
    Resistivity,
    Porosity,
    Other,
}

impl CurveCategory {
    /// Name of the track this category is plotted in
    pub fn track_name(&self) -> &'static str {
        match self {
            CurveCategory::GammaRay => "GR",
            CurveCategory::Resistivity => "Resistivity",
            CurveCategory::Porosity => "Porosity",
            CurveCategory::Other => "Other",
        }
    }

    /// Resistivity is plotted on a logarithmic scale by convention
    pub fn is_logarithmic(&self) -> bool {
        matches!(self, CurveCategory::Resistivity)
    }
}

/// How a rule pattern is compared against an upper-cased mnemonic
#[derive(Clone, Copy, Debug)]
pub enum MnemonicPattern {
    Contains(&'static str),
    Exact(&'static str),
}

impl MnemonicPattern {
    fn matches(&self, upper: &str) -> bool {
        match self {
            MnemonicPattern::Contains(p) => upper.contains(p),
            MnemonicPattern::Exact(p) => upper == *p,
        }
    }
}

/// Outcome of a matching rule
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    Category(CurveCategory),
    /// Depth/index curves, never grouped into a track
    Index,
}

pub struct ClassificationRule {
    pub outcome: Classification,
    pub patterns: &'static [MnemonicPattern],
}

use MnemonicPattern::{Contains, Exact};

/// Ordered rule table; the first match wins
pub const RULES: &[ClassificationRule] = &[
    ClassificationRule {
        outcome: Classification::Category(CurveCategory::GammaRay),
        patterns: &[Contains("GR"), Contains("SGR"), Contains("CGR")],
    },
    ClassificationRule {
        outcome: Classification::Category(CurveCategory::Resistivity),
        patterns: &[
            Contains("RES"),
            Contains("ILD"),
            Contains("ILM"),
            Contains("LLD"),
            Contains("MSFL"),
        ],
    },
    ClassificationRule {
        outcome: Classification::Category(CurveCategory::Porosity),
        patterns: &[
            Contains("NPHI"),
            Contains("RHOB"),
            Contains("DEN"),
            Contains("PHI"),
        ],
    },
    ClassificationRule {
        outcome: Classification::Index,
        patterns: &DEPTH_PATTERNS,
    },
];

const DEPTH_PATTERNS: [MnemonicPattern; 3] = [Contains("DEPT"), Contains("DEPTH"), Exact("MD")];

/// Apply the rule table to one mnemonic
pub fn classify_mnemonic(mnemonic: &str) -> Classification {
    let upper = mnemonic.trim().to_ascii_uppercase();
    RULES
        .iter()
        .find(|rule| rule.patterns.iter().any(|p| p.matches(&upper)))
        .map(|rule| rule.outcome)
        .unwrap_or(Classification::Category(CurveCategory::Other))
}

/// Whether a mnemonic names a depth/index curve
pub fn is_depth_mnemonic(mnemonic: &str) -> bool {
    let upper = mnemonic.trim().to_ascii_uppercase();
    DEPTH_PATTERNS.iter().any(|p| p.matches(&upper))
}

/// Curves sharing one display category, in file order
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CurveGroup {
    pub category: CurveCategory,
    pub curves: Vec<CurveDefinition>,
}

/// Group curves by category. Every category is present, in table order,
/// possibly empty; index curves are left out.
pub fn classify(curves: &[CurveDefinition]) -> Vec<CurveGroup> {
    let mut groups: Vec<CurveGroup> = CurveCategory::iter()
        .map(|category| CurveGroup {
            category,
            curves: Vec::new(),
        })
        .collect();

    for curve in curves {
        if let Classification::Category(category) = classify_mnemonic(&curve.mnemonic) {
            if let Some(group) = groups.iter_mut().find(|g| g.category == category) {
                group.curves.push(curve.clone());
            }
        }
    }

    groups
}

/// Human-readable description for common mnemonics, else the file's own text
pub fn describe<'a>(mnemonic: &'a str, fallback: &'a str) -> &'a str {
    let known = match mnemonic.trim().to_ascii_uppercase().as_str() {
        "DEPT" | "DEPTH" => "Measured depth",
        "MD" => "Measured depth (MD)",
        "TVD" => "True vertical depth (TVD)",
        "GR" => "Gamma ray",
        "SGR" => "Spectral gamma ray",
        "CGR" => "Corrected gamma ray",
        "ILD" => "Deep induction resistivity",
        "ILM" => "Medium induction resistivity",
        "LLD" => "Deep laterolog resistivity",
        "LLS" => "Shallow laterolog resistivity",
        "MSFL" => "Micro-spherically focused resistivity",
        "NPHI" => "Neutron porosity",
        "TNPH" => "Thermal neutron porosity",
        "RHOB" => "Bulk density",
        "DRHO" => "Density correction",
        "DT" => "Sonic transit time",
        "DTC" => "Compressional transit time",
        "DTS" => "Shear transit time",
        "CALI" => "Borehole caliper",
        "CAL" => "Caliper",
        "SP" => "Spontaneous potential",
        "PEF" => "Photoelectric factor",
        "PHIN" => "Effective neutron porosity",
        "PHID" => "Density porosity",
        _ => "",
    };

    if !known.is_empty() {
        known
    } else if !fallback.trim().is_empty() {
        fallback
    } else {
        mnemonic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(mnemonic: &str, column: usize) -> CurveDefinition {
        CurveDefinition {
            mnemonic: mnemonic.to_string(),
            column,
            ..Default::default()
        }
    }

    #[test]
    fn test_rule_order() {
        assert_eq!(
            classify_mnemonic("gr"),
            Classification::Category(CurveCategory::GammaRay)
        );
        assert_eq!(
            classify_mnemonic("CGR"),
            Classification::Category(CurveCategory::GammaRay)
        );
        assert_eq!(
            classify_mnemonic("ILD"),
            Classification::Category(CurveCategory::Resistivity)
        );
        assert_eq!(
            classify_mnemonic("RES_DEEP"),
            Classification::Category(CurveCategory::Resistivity)
        );
        assert_eq!(
            classify_mnemonic("RHOB"),
            Classification::Category(CurveCategory::Porosity)
        );
        assert_eq!(
            classify_mnemonic("DPHI"),
            Classification::Category(CurveCategory::Porosity)
        );
        assert_eq!(classify_mnemonic("DEPT"), Classification::Index);
        assert_eq!(classify_mnemonic("md"), Classification::Index);
        assert_eq!(
            classify_mnemonic("CALI"),
            Classification::Category(CurveCategory::Other)
        );
        // Gamma-ray is checked before resistivity
        assert_eq!(
            classify_mnemonic("GRES"),
            Classification::Category(CurveCategory::GammaRay)
        );
        // Porosity is checked before depth
        assert_eq!(
            classify_mnemonic("DENDEPTH"),
            Classification::Category(CurveCategory::Porosity)
        );
    }

    #[test]
    fn test_classify_groups_in_category_order() {
        let curves = vec![
            curve("DEPT", 0),
            curve("ILD", 1),
            curve("GR", 2),
            curve("CALI", 3),
            curve("ILM", 4),
            curve("NPHI", 5),
        ];
        let groups = classify(&curves);

        assert_eq!(groups.len(), 4);
        assert_eq!(groups[0].category, CurveCategory::GammaRay);
        assert_eq!(groups[0].curves.len(), 1);
        assert_eq!(groups[1].category, CurveCategory::Resistivity);
        let names: Vec<&str> = groups[1].curves.iter().map(|c| c.mnemonic.as_str()).collect();
        assert_eq!(names, vec!["ILD", "ILM"]);
        assert_eq!(groups[2].curves[0].mnemonic, "NPHI");
        assert_eq!(groups[3].curves[0].mnemonic, "CALI");

        let total: usize = groups.iter().map(|g| g.curves.len()).sum();
        assert_eq!(total, 5);
    }

    #[test]
    fn test_depth_mnemonics() {
        assert!(is_depth_mnemonic("DEPT"));
        assert!(is_depth_mnemonic("depth"));
        assert!(is_depth_mnemonic("MD"));
        assert!(!is_depth_mnemonic("CMD"));
        assert!(!is_depth_mnemonic("GR"));
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe("nphi", "from file"), "Neutron porosity");
        assert_eq!(describe("XYZ", "Custom curve"), "Custom curve");
        assert_eq!(describe("XYZ", "  "), "XYZ");
    }

    #[test]
    fn test_logarithmic_categories() {
        assert!(CurveCategory::Resistivity.is_logarithmic());
        assert!(!CurveCategory::GammaRay.is_logarithmic());
        assert_eq!(CurveCategory::GammaRay.as_ref(), "Gamma Ray");
    }
}
