//! LAS 2.0 text writer.
//!
//! Emits an unwrapped, space-delimited file. Missing samples are written
//! as the file's null sentinel so the output parses back to the same model.

use std::fmt::Write;

use super::types::{HeaderEntry, LasFile, SectionKind};

fn write_entry(out: &mut String, entry: &HeaderEntry) {
    let _ = writeln!(
        out,
        " {:<8}.{:<10} {:<24}: {}",
        entry.mnemonic, entry.unit, entry.value, entry.description
    );
}

fn format_sample(value: f64) -> String {
    format!("{}", value)
}

/// Serialize a parsed file back to LAS 2.0 text
pub fn write_las(file: &LasFile) -> String {
    let mut out = String::new();
    let null_text = format_sample(file.null_value());

    out.push_str("~Version Information\n");
    write_entry(
        &mut out,
        &HeaderEntry {
            mnemonic: "VERS".into(),
            unit: String::new(),
            value: "2.0".into(),
            description: "CWLS LOG ASCII STANDARD - VERSION 2.0".into(),
        },
    );
    write_entry(
        &mut out,
        &HeaderEntry {
            mnemonic: "WRAP".into(),
            unit: String::new(),
            value: "NO".into(),
            description: "ONE LINE PER DEPTH STEP".into(),
        },
    );

    out.push_str("~Well Information\n");
    let mut wrote_null = false;
    for entry in file.sections_of(SectionKind::Well).flat_map(|s| &s.entries) {
        if entry.mnemonic.eq_ignore_ascii_case("NULL") {
            if wrote_null {
                continue;
            }
            wrote_null = true;
            write_entry(
                &mut out,
                &HeaderEntry {
                    value: null_text.clone(),
                    ..entry.clone()
                },
            );
        } else {
            write_entry(&mut out, entry);
        }
    }
    if !wrote_null {
        write_entry(
            &mut out,
            &HeaderEntry {
                mnemonic: "NULL".into(),
                unit: String::new(),
                value: null_text.clone(),
                description: "NULL VALUE".into(),
            },
        );
    }

    out.push_str("~Curve Information\n");
    for curve in &file.curves {
        write_entry(
            &mut out,
            &HeaderEntry {
                mnemonic: curve.mnemonic.clone(),
                unit: curve.unit.clone(),
                value: curve.api_code.clone(),
                description: curve.description.clone(),
            },
        );
    }

    let parameters: Vec<&HeaderEntry> = file
        .sections_of(SectionKind::Parameter)
        .flat_map(|s| &s.entries)
        .collect();
    if !parameters.is_empty() {
        out.push_str("~Parameter Information\n");
        for entry in parameters {
            write_entry(&mut out, entry);
        }
    }

    if !file.other.is_empty() {
        out.push_str("~Other\n");
        for line in &file.other {
            let _ = writeln!(out, "{}", line);
        }
    }

    out.push_str("~ASCII\n");
    for row in 0..file.row_count() {
        let cells: Vec<String> = file
            .series
            .iter()
            .map(|series| match series.get(row).copied().flatten() {
                Some(value) => format_sample(value),
                None => null_text.clone(),
            })
            .collect();
        let _ = writeln!(out, "{}", cells.join(" "));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::parse_las_file;
    use proptest::prelude::*;

    #[test]
    fn test_write_simple_file() {
        let text = "~V\nVERS. 2.0:\n~W\nNULL. -999.25:\nWELL. TEST-1 : WELL\n~C\nDEPT.M\nGR.GAPI\n~A\n100.0 50.0\n101.0 -999.25\n";
        let las = parse_las_file(text).unwrap();
        let written = write_las(&las);

        assert!(written.contains("~ASCII\n100 50\n101 -999.25\n"));
        assert!(written.contains(" WELL    .           TEST-1"));

        let reparsed = parse_las_file(&written).unwrap();
        assert_eq!(reparsed.well.well_name.as_deref(), Some("TEST-1"));
        assert_eq!(reparsed.curve_data("GR").unwrap(), &[Some(50.0), None]);
    }

    #[test]
    fn test_null_entry_added_when_absent() {
        let text = "~V\nVERS. 2.0:\n~C\nDEPT.M\nGR.GAPI\n~A\n1 2\n";
        let las = parse_las_file(text).unwrap();
        let written = write_las(&las);
        let reparsed = parse_las_file(&written).unwrap();
        assert!(reparsed.header_entry(SectionKind::Well, "NULL").is_some());
    }

    fn mnemonic() -> impl Strategy<Value = String> {
        "[A-Z][A-Z0-9_]{0,6}"
    }

    fn unit() -> impl Strategy<Value = String> {
        prop_oneof![Just(String::new()), "[A-Z][A-Z/0-9]{0,4}"]
    }

    fn sample() -> impl Strategy<Value = Option<f64>> {
        prop_oneof![
            1 => Just(None),
            4 => (-1.0e6f64..1.0e6).prop_map(Some),
        ]
    }

    fn las_text() -> impl Strategy<Value = String> {
        (1usize..6, 1usize..20).prop_flat_map(|(extra, rows)| {
            (
                prop::collection::btree_set(mnemonic(), extra),
                prop::collection::vec(unit(), extra + 1),
                prop::collection::vec(0.5f64..10.0, rows),
                prop::collection::vec(prop::collection::vec(sample(), extra), rows),
            )
                .prop_map(|(names, units, steps, values)| {
                    let mut text = String::from("~V\nVERS. 2.0 :\n~W\nNULL. -999.25 :\n~C\n");
                    text.push_str(&format!("DEPT.{} : depth\n", units[0]));
                    let names: Vec<String> = names.into_iter().collect();
                    for (name, unit) in names.iter().zip(&units[1..]) {
                        text.push_str(&format!("X{}.{} : curve\n", name, unit));
                    }
                    text.push_str("~A\n");
                    let mut depth = 1000.0;
                    for (step, row) in steps.iter().zip(values) {
                        depth += step;
                        let mut cells = vec![format!("{}", depth)];
                        for value in row.iter().take(names.len()) {
                            cells.push(match value {
                                Some(v) => format!("{}", v),
                                None => "-999.25".to_string(),
                            });
                        }
                        text.push_str(&cells.join(" "));
                        text.push('\n');
                    }
                    text
                })
        })
    }

    proptest! {
        #[test]
        fn prop_write_then_parse_preserves_model(text in las_text()) {
            let first = parse_las_file(&text).unwrap();
            let second = parse_las_file(&write_las(&first)).unwrap();

            prop_assert_eq!(first.curves.len(), second.curves.len());
            for (a, b) in first.curves.iter().zip(&second.curves) {
                prop_assert_eq!(&a.mnemonic, &b.mnemonic);
                prop_assert_eq!(&a.unit, &b.unit);
            }
            prop_assert_eq!(&first.series, &second.series);
            for series in &second.series {
                prop_assert_eq!(series.len(), second.depth_array().len());
            }
        }
    }
}
