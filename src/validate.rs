//! Structural validation of parsed LAS files.
//!
//! Validation never fails: every problem is collected so the import panel
//! can show all of them at once. `errors` block the import, `warnings` are
//! shown but may be accepted by the operator.

use serde::Serialize;

use crate::classify::is_depth_mnemonic;
use crate::parsers::LasFile;

/// Outcome of validating a parsed file
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    /// True when there are no fatal errors
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Direction of a depth column, if it is strictly monotonic
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Monotonic {
    Increasing,
    Decreasing,
    /// Row at which monotonicity first breaks
    Broken(usize),
}

fn depth_monotonicity(depths: &[f64]) -> Monotonic {
    let direction = match depths {
        [first, second, ..] if second > first => Monotonic::Increasing,
        [first, second, ..] if second < first => Monotonic::Decreasing,
        [_, _, ..] => return Monotonic::Broken(1),
        _ => return Monotonic::Increasing,
    };

    for (i, pair) in depths.windows(2).enumerate() {
        let ok = match direction {
            Monotonic::Increasing => pair[1] > pair[0],
            _ => pair[1] < pair[0],
        };
        if !ok {
            return Monotonic::Broken(i + 1);
        }
    }
    direction
}

/// Check a parsed file for completeness
pub fn validate_las_file(file: &LasFile) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings: Vec<String> = file.warnings.clone();

    let Some(depth_index) = file.depth_index() else {
        errors.push("No curves defined in file".to_string());
        return ValidationReport {
            valid: false,
            errors,
            warnings,
        };
    };
    let depth_name = file.curves[depth_index].mnemonic.as_str();
    let depths = file.depth_array();

    if !file.curves.iter().any(|c| is_depth_mnemonic(&c.mnemonic)) {
        warnings.push(format!(
            "No depth curve found; using the first curve {} as the index",
            depth_name
        ));
    }

    // At least one curve besides the index
    let data_curves: Vec<usize> = (0..file.curves.len())
        .filter(|&i| i != depth_index)
        .collect();
    if data_curves.is_empty() {
        errors.push(format!(
            "No curves besides the depth curve {} are defined",
            depth_name
        ));
    }

    // Depth column must be complete
    let missing_depths: Vec<usize> = depths
        .iter()
        .enumerate()
        .filter(|(_, d)| d.is_none())
        .map(|(i, _)| i)
        .collect();
    if let Some(first) = missing_depths.first() {
        errors.push(format!(
            "Depth curve {} has {} missing values (first at row {})",
            depth_name,
            missing_depths.len(),
            first + 1
        ));
    }

    // Reversed or repeated depths occur in real tool data; warn only
    let (rows, present): (Vec<usize>, Vec<f64>) = depths
        .iter()
        .enumerate()
        .filter_map(|(row, d)| d.map(|d| (row, d)))
        .unzip();
    if let Monotonic::Broken(i) = depth_monotonicity(&present) {
        warnings.push(format!(
            "Depth curve {} is not strictly monotonic (first break at row {})",
            depth_name,
            rows[i] + 1
        ));
    }

    // Every curve aligned with the depth column
    for (curve, series) in file.curves.iter().zip(&file.series) {
        if series.len() != depths.len() {
            errors.push(format!(
                "Curve {} has {} samples but the depth curve has {}",
                curve.mnemonic,
                series.len(),
                depths.len()
            ));
        }
    }
    if file.series.len() != file.curves.len() {
        errors.push(format!(
            "{} curves are defined but {} data columns were read",
            file.curves.len(),
            file.series.len()
        ));
    }

    for &i in &data_curves {
        let all_missing = file
            .series
            .get(i)
            .map(|s| s.iter().all(Option::is_none))
            .unwrap_or(true);
        if all_missing {
            warnings.push(format!(
                "Curve {} has no values and cannot be plotted",
                file.curves[i].mnemonic
            ));
        }
    }

    if file.well.well_name.is_none() && file.well.uwi.is_none() {
        warnings.push("Well name or UWI not specified".to_string());
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::parse_las_file;

    #[test]
    fn test_valid_file() {
        let text = "~V\nVERS. 2.0:\n~W\nNULL. -999.25:\n~C\nDEPT.M\nGR.GAPI\n~A\n100.0 50.0\n101.0 -999.25\n102.0 60.0\n";
        let report = validate_las_file(&parse_las_file(text).unwrap());
        assert!(report.valid);
        assert!(report.errors.is_empty());
        // Only the missing well identity is reported
        assert_eq!(report.warnings, vec!["Well name or UWI not specified"]);
    }

    #[test]
    fn test_depth_only_file_is_invalid() {
        let text = "~V\nVERS. 2.0:\n~W\nWELL. W-1:\n~C\nDEPT.M\n~A\n100.0\n101.0\n";
        let report = validate_las_file(&parse_las_file(text).unwrap());
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("No curves besides"));
    }

    #[test]
    fn test_missing_depth_is_fatal() {
        let text = "~V\nVERS. 2.0:\n~W\nWELL. W-1:\n~C\nDEPT.M\nGR.GAPI\n~A\n100.0 50.0\n-999.25 51.0\n102.0 52.0\n";
        let report = validate_las_file(&parse_las_file(text).unwrap());
        assert!(!report.valid);
        assert!(report.errors[0].contains("first at row 2"));
    }

    #[test]
    fn test_reversed_depth_is_warning_only() {
        let text = "~V\nVERS. 2.0:\n~W\nWELL. W-1:\n~C\nDEPT.M\nGR.GAPI\n~A\n102.0 50.0\n101.0 51.0\n100.0 52.0\n";
        let report = validate_las_file(&parse_las_file(text).unwrap());
        assert!(report.valid);
        assert!(report.warnings.is_empty());

        let text = "~V\nVERS. 2.0:\n~W\nWELL. W-1:\n~C\nDEPT.M\nGR.GAPI\n~A\n100.0 50.0\n101.0 51.0\n100.5 52.0\n";
        let report = validate_las_file(&parse_las_file(text).unwrap());
        assert!(report.valid);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("first break at row 3"));
    }

    #[test]
    fn test_break_row_counts_missing_depths() {
        let text = "~V\nVERS. 2.0:\n~W\nWELL. W-1:\n~C\nDEPT.M\nGR.GAPI\n~A\n100.0 50.0\n-999.25 51.0\n102.0 52.0\n101.0 53.0\n";
        let report = validate_las_file(&parse_las_file(text).unwrap());
        assert!(!report.valid);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("first break at row 4"));
    }

    #[test]
    fn test_missing_depth_mnemonic_is_warned() {
        let text = "~V\nVERS. 2.0:\n~W\nWELL. W-1:\n~C\nTIME.S\nGR.GAPI\n~A\n0.0 50.0\n1.0 60.0\n";
        let report = validate_las_file(&parse_las_file(text).unwrap());
        assert!(report.valid);
        assert_eq!(
            report.warnings,
            vec!["No depth curve found; using the first curve TIME as the index"]
        );
    }

    #[test]
    fn test_unplottable_and_duplicate_warnings() {
        let text = "~V\nVERS. 2.0:\n~W\nUWI. 100123:\n~C\nDEPT.M\nGR.GAPI\nGR.GAPI\nSP.MV\n~A\n100.0 50.0 51.0 -999.25\n101.0 50.0 51.0 -999.25\n";
        let report = validate_las_file(&parse_las_file(text).unwrap());
        assert!(report.valid);
        assert_eq!(report.warnings.len(), 2);
        assert!(report.warnings.iter().any(|w| w.contains("more than once")));
        assert!(report.warnings.iter().any(|w| w.contains("SP has no values")));
    }

    #[test]
    fn test_misaligned_series_is_fatal() {
        let text = "~V\nVERS. 2.0:\n~W\nWELL. W-1:\n~C\nDEPT.M\nGR.GAPI\n~A\n100.0 50.0\n101.0 51.0\n";
        let mut las = parse_las_file(text).unwrap();
        las.series[1].pop();
        let report = validate_las_file(&las);
        assert!(!report.valid);
        assert!(report.errors[0].contains("GR has 1 samples"));
    }

    #[test]
    fn test_monotonicity() {
        assert_eq!(depth_monotonicity(&[]), Monotonic::Increasing);
        assert_eq!(depth_monotonicity(&[1.0]), Monotonic::Increasing);
        assert_eq!(depth_monotonicity(&[1.0, 2.0, 3.0]), Monotonic::Increasing);
        assert_eq!(depth_monotonicity(&[3.0, 2.0, 1.0]), Monotonic::Decreasing);
        assert_eq!(depth_monotonicity(&[1.0, 1.0]), Monotonic::Broken(1));
        assert_eq!(depth_monotonicity(&[1.0, 2.0, 2.0]), Monotonic::Broken(2));
    }
}
