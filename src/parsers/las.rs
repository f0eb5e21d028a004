//! LAS (Log ASCII Standard) well-log parser.
//!
//! Parses LAS 2.0 text files as exported by logging service companies.
//! Format structure:
//! - `~V` version block (`VERS`, `WRAP`, optional `DLM`)
//! - `~W` well block (`STRT`, `STOP`, `STEP`, `NULL`, well identity)
//! - `~C` curve block, one line per data column in column order
//! - `~P` parameter block and `~O` free text (optional)
//! - `~A` whitespace-delimited numeric rows, one per depth sample

use rayon::prelude::*;
use regex::Regex;
use std::fs::File;
use std::path::Path;
use std::sync::LazyLock;

use super::types::{
    CurveDefinition, Delimiter, HeaderEntry, HeaderSection, LasFile, LoadError, ParseError,
    Parseable, Sample, SampleSeries, SectionKind, VersionInfo, WellInfo, DEFAULT_NULL_VALUE,
    NULL_TOLERANCE,
};

/// Files larger than this are memory-mapped instead of read into a buffer
const MMAP_THRESHOLD: u64 = 4 * 1024 * 1024;

/// `MNEMONIC.UNIT rest`, where the unit runs up to the first whitespace or colon
static HEADER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?<mnemonic>[^.]*)\.(?<unit>[^\s:]*)(?<rest>.*)$")
        .expect("Failed to compile header line regex")
});

/// LAS file parser
#[derive(Clone, Debug)]
pub struct LasParser {
    /// Sentinel used when neither `~W` nor `~V` declares `NULL`
    pub default_null: f64,
}

impl Default for LasParser {
    fn default() -> Self {
        Self {
            default_null: DEFAULT_NULL_VALUE,
        }
    }
}

impl LasParser {
    /// Parse a single header line. Returns `None` for lines without a mnemonic.
    fn parse_header_line(line: &str) -> Option<HeaderEntry> {
        let (mnemonic, unit, rest) = match HEADER_LINE.captures(line) {
            Some(captures) => (
                captures["mnemonic"].trim().to_string(),
                captures["unit"].to_string(),
                captures.name("rest").map(|m| m.as_str()).unwrap_or(""),
            ),
            // No dot at all: treat the first token as the mnemonic
            None => {
                let line = line.trim();
                let (mnemonic, rest) = line
                    .split_once(char::is_whitespace)
                    .unwrap_or((line, ""));
                (mnemonic.to_string(), String::new(), rest)
            }
        };

        if mnemonic.is_empty() {
            return None;
        }

        // Last colon separates value from description
        let (value, description) = match rest.rfind(':') {
            Some(idx) => (&rest[..idx], &rest[idx + 1..]),
            None => (rest, ""),
        };

        Some(HeaderEntry {
            mnemonic,
            unit,
            value: value.trim().to_string(),
            description: description.trim().to_string(),
        })
    }

    fn version_info(sections: &[HeaderSection]) -> VersionInfo {
        let mut info = VersionInfo::default();
        for entry in sections
            .iter()
            .filter(|s| s.kind == SectionKind::Version)
            .flat_map(|s| &s.entries)
        {
            match entry.mnemonic.to_ascii_uppercase().as_str() {
                "VERS" => info.version = entry.value.clone(),
                "WRAP" => info.wrap = entry.value.trim().eq_ignore_ascii_case("YES"),
                "DLM" => info.delimiter = Delimiter::from_header(&entry.value),
                _ => {}
            }
        }
        info
    }

    fn well_info(&self, sections: &[HeaderSection], warnings: &mut Vec<String>) -> WellInfo {
        let mut info = WellInfo {
            null_value: self.default_null,
            ..Default::default()
        };
        let text = |value: &str| {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        };
        let number = |value: &str| value.trim().parse::<f64>().ok();

        for entry in sections
            .iter()
            .filter(|s| s.kind == SectionKind::Well)
            .flat_map(|s| &s.entries)
        {
            let value = entry.value.as_str();
            match entry.mnemonic.to_ascii_uppercase().as_str() {
                "STRT" => {
                    info.start_depth = number(value);
                    info.depth_unit = text(&entry.unit);
                }
                "STOP" => info.stop_depth = number(value),
                "STEP" => info.step = number(value),
                "COMP" => info.company = text(value),
                "WELL" => info.well_name = text(value),
                "UWI" => info.uwi = text(value),
                "FLD" => info.field = text(value),
                "LOC" => info.location = text(value),
                "PROV" | "STAT" => info.province = text(value),
                "CTRY" | "CNTY" => info.country = text(value),
                "SRVC" => info.service_company = text(value),
                "DATE" => info.date = text(value),
                _ => {}
            }
        }

        // NULL from the well block, then the version block
        let null_entry = [SectionKind::Well, SectionKind::Version]
            .iter()
            .find_map(|kind| {
                sections
                    .iter()
                    .rev()
                    .filter(|s| s.kind == *kind)
                    .find_map(|s| s.entry("NULL"))
            });
        if let Some(entry) = null_entry {
            match number(&entry.value) {
                Some(null) if null.is_finite() => info.null_value = null,
                _ => {
                    tracing::warn!(
                        "Unparsable NULL value '{}', using {}",
                        entry.value,
                        self.default_null
                    );
                    warnings.push(format!(
                        "NULL value '{}' is not a number; using {}",
                        entry.value, self.default_null
                    ));
                }
            }
        }

        info
    }

    fn curve_definitions(
        sections: &[HeaderSection],
        warnings: &mut Vec<String>,
    ) -> Vec<CurveDefinition> {
        let curves: Vec<CurveDefinition> = sections
            .iter()
            .filter(|s| s.kind == SectionKind::Curve)
            .flat_map(|s| &s.entries)
            .enumerate()
            .map(|(column, entry)| CurveDefinition {
                mnemonic: entry.mnemonic.clone(),
                unit: entry.unit.clone(),
                api_code: entry.value.clone(),
                description: entry.description.clone(),
                column,
            })
            .collect();

        for (i, curve) in curves.iter().enumerate() {
            let repeated = curves[..i]
                .iter()
                .any(|c| c.mnemonic.eq_ignore_ascii_case(&curve.mnemonic));
            if repeated {
                tracing::warn!("Duplicate curve mnemonic: {}", curve.mnemonic);
                warnings.push(format!(
                    "Curve mnemonic {} appears more than once; column {} is used",
                    curve.mnemonic,
                    curve.column + 1
                ));
            }
        }

        curves
    }

    /// Convert a data token to a sample; non-numeric tokens and the sentinel become "no value"
    fn to_sample(token: &str, null_value: f64) -> Sample {
        token
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && (v - null_value).abs() >= NULL_TOLERANCE)
    }

    /// Rows for unwrapped data: one physical line per logical row
    fn unwrapped_rows<'a>(
        lines: &[(usize, &'a str)],
        width: usize,
        delimiter: Delimiter,
    ) -> Result<Vec<Vec<&'a str>>, ParseError> {
        lines
            .iter()
            .map(|&(line_no, line)| {
                let tokens = delimiter.split(line);
                if tokens.len() != width {
                    return Err(ParseError::ColumnCountMismatch {
                        line: line_no,
                        expected: width,
                        found: tokens.len(),
                    });
                }
                Ok(tokens)
            })
            .collect()
    }

    /// Rows for wrapped data: tokens accumulate across physical lines until a row is full
    fn wrapped_rows<'a>(
        lines: &[(usize, &'a str)],
        width: usize,
        delimiter: Delimiter,
    ) -> Result<Vec<Vec<&'a str>>, ParseError> {
        let mut rows = Vec::new();
        let mut pending: Vec<&str> = Vec::with_capacity(width);
        let mut row_start = 0;

        for &(line_no, line) in lines {
            let tokens = delimiter.split(line);
            if pending.is_empty() {
                row_start = line_no;
            }
            if pending.len() + tokens.len() > width {
                return Err(ParseError::ColumnCountMismatch {
                    line: line_no,
                    expected: width,
                    found: pending.len() + tokens.len(),
                });
            }
            pending.extend(tokens);
            if pending.len() == width {
                rows.push(std::mem::replace(&mut pending, Vec::with_capacity(width)));
            }
        }

        if !pending.is_empty() {
            return Err(ParseError::IncompleteWrappedRow {
                line: row_start,
                expected: width,
                found: pending.len(),
            });
        }

        Ok(rows)
    }

    /// Decode raw bytes and parse them
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<LasFile, ParseError> {
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        let text = std::str::from_utf8(bytes).map_err(|e| ParseError::Encoding(e.to_string()))?;
        self.parse(text)
    }
}

impl Parseable for LasParser {
    fn parse(&self, file_contents: &str) -> Result<LasFile, ParseError> {
        let mut sections: Vec<HeaderSection> = Vec::new();
        let mut data_lines: Vec<(usize, &str)> = Vec::new();
        let mut other: Vec<String> = Vec::new();
        let mut warnings: Vec<String> = Vec::new();
        let mut current: Option<SectionKind> = None;
        let mut saw_data_section = false;

        for (idx, raw_line) in file_contents.lines().enumerate() {
            let line = raw_line.trim();

            // Skip blank lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(kind) = SectionKind::from_marker(line) {
                if kind == SectionKind::Ascii {
                    saw_data_section = true;
                } else {
                    sections.push(HeaderSection::new(kind, line));
                }
                current = Some(kind);
                continue;
            }

            match current {
                Some(SectionKind::Ascii) => data_lines.push((idx + 1, line)),
                Some(SectionKind::Other) => other.push(line.to_string()),
                Some(SectionKind::Unknown) | None => {}
                Some(_) => {
                    if let (Some(entry), Some(section)) =
                        (Self::parse_header_line(line), sections.last_mut())
                    {
                        section.entries.push(entry);
                    }
                }
            }
        }

        if !sections.iter().any(|s| s.kind == SectionKind::Version) {
            return Err(ParseError::MissingVersionSection);
        }

        let version = Self::version_info(&sections);
        let well = self.well_info(&sections, &mut warnings);
        let curves = Self::curve_definitions(&sections, &mut warnings);

        if curves.is_empty() {
            return Err(ParseError::MissingCurveSection);
        }
        if !saw_data_section {
            return Err(ParseError::MissingDataSection);
        }
        if data_lines.is_empty() {
            return Err(ParseError::EmptyDataSection);
        }

        let width = curves.len();
        let rows = if version.wrap {
            Self::wrapped_rows(&data_lines, width, version.delimiter)?
        } else {
            Self::unwrapped_rows(&data_lines, width, version.delimiter)?
        };

        let null_value = well.null_value;
        let series: Vec<SampleSeries> = (0..width)
            .into_par_iter()
            .map(|column| {
                rows.iter()
                    .map(|row| Self::to_sample(row[column], null_value))
                    .collect()
            })
            .collect();

        tracing::info!(
            "Parsed LAS {} file: {} curves, {} rows",
            version.version,
            curves.len(),
            rows.len()
        );

        Ok(LasFile {
            sections,
            version,
            well,
            curves,
            series,
            other,
            warnings,
        })
    }
}

/// Parse LAS text with the default parser settings
pub fn parse_las_file(text: &str) -> Result<LasFile, ParseError> {
    LasParser::default().parse(text)
}

/// Read and parse a LAS file from disk
pub fn load_las_file(path: &Path) -> Result<LasFile, LoadError> {
    let file = File::open(path)?;
    let len = file.metadata()?.len();
    let parser = LasParser::default();

    if len > MMAP_THRESHOLD {
        // SAFETY: the mapping is read-only and dropped before this function returns
        let mmap = unsafe { memmap2::Mmap::map(&file)? };
        Ok(parser.parse_bytes(&mmap)?)
    } else {
        let bytes = std::fs::read(path)?;
        Ok(parser.parse_bytes(&bytes)?)
    }
}
