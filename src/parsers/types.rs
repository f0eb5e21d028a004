use serde::Serialize;
use strum::AsRefStr;
use thiserror::Error;

use crate::classify::is_depth_mnemonic;

/// Null sentinel used when the header does not declare one
pub const DEFAULT_NULL_VALUE: f64 = -999.25;

/// Tolerance used when comparing a sample against the null sentinel
pub const NULL_TOLERANCE: f64 = 1e-6;

/// A single cell of the data section. `None` marks "no value", distinct from zero.
pub type Sample = Option<f64>;

/// Samples for one curve, row-aligned with every other curve in the file
pub type SampleSeries = Vec<Sample>;

/// Fatal problems that stop a LAS file from being parsed at all
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("no version section (~V) found")]
    MissingVersionSection,
    #[error("no ASCII data section (~A) found")]
    MissingDataSection,
    #[error("the ASCII data section (~A) contains no rows")]
    EmptyDataSection,
    #[error("no curves defined in the curve section (~C)")]
    MissingCurveSection,
    #[error("line {line}: expected {expected} values, found {found}")]
    ColumnCountMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: wrapped row ends after {found} of {expected} values")]
    IncompleteWrappedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("file is not valid UTF-8 text: {0}")]
    Encoding(String),
}

/// Failure while reading a LAS file from disk
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// LAS section kinds, identified by the letter after the `~` marker
#[derive(AsRefStr, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SectionKind {
    Version,
    Well,
    Curve,
    Parameter,
    Other,
    #[strum(serialize = "ASCII")]
    Ascii,
    Unknown,
}

impl SectionKind {
    /// Detect a section marker line such as `~Version information` or `~A DEPT GR`
    pub fn from_marker(line: &str) -> Option<Self> {
        let rest = line.trim_start().strip_prefix('~')?;
        let kind = match rest.chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('V') => SectionKind::Version,
            Some('W') => SectionKind::Well,
            Some('C') => SectionKind::Curve,
            Some('P') => SectionKind::Parameter,
            Some('O') => SectionKind::Other,
            Some('A') => SectionKind::Ascii,
            _ => SectionKind::Unknown,
        };
        Some(kind)
    }

    /// Section letter used when writing LAS text
    pub fn marker(&self) -> &'static str {
        match self {
            SectionKind::Version => "~V",
            SectionKind::Well => "~W",
            SectionKind::Curve => "~C",
            SectionKind::Parameter => "~P",
            SectionKind::Other => "~O",
            SectionKind::Ascii => "~A",
            SectionKind::Unknown => "~",
        }
    }
}

/// One `MNEMONIC.UNIT VALUE : DESCRIPTION` line of a header section
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct HeaderEntry {
    pub mnemonic: String,
    pub unit: String,
    pub value: String,
    pub description: String,
}

/// A header block as it appeared in the file
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HeaderSection {
    pub kind: SectionKind,
    /// The marker line, e.g. `~Well Information Block`
    pub title: String,
    pub entries: Vec<HeaderEntry>,
}

impl HeaderSection {
    pub fn new(kind: SectionKind, title: &str) -> Self {
        Self {
            kind,
            title: title.trim().to_string(),
            entries: Vec::new(),
        }
    }

    /// Find an entry by mnemonic (case-insensitive, last occurrence wins)
    pub fn entry(&self, mnemonic: &str) -> Option<&HeaderEntry> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.mnemonic.eq_ignore_ascii_case(mnemonic))
    }
}

/// Column delimiter declared by `DLM` in the version section
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum Delimiter {
    #[default]
    Space,
    Tab,
    Comma,
}

impl Delimiter {
    pub fn from_header(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "TAB" => Delimiter::Tab,
            "COMMA" => Delimiter::Comma,
            _ => Delimiter::Space,
        }
    }

    /// Split a data line into value tokens
    pub fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        match self {
            Delimiter::Space | Delimiter::Tab => line.split_whitespace().collect(),
            Delimiter::Comma => line
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }
}

/// Values from the version section that drive parsing
#[derive(Clone, Debug, Serialize)]
pub struct VersionInfo {
    pub version: String,
    pub wrap: bool,
    pub delimiter: Delimiter,
}

impl Default for VersionInfo {
    fn default() -> Self {
        Self {
            version: "2.0".to_string(),
            wrap: false,
            delimiter: Delimiter::Space,
        }
    }
}

/// Well-information convenience view over the `~W` section
#[derive(Clone, Debug, Serialize)]
pub struct WellInfo {
    pub well_name: Option<String>,
    pub uwi: Option<String>,
    pub company: Option<String>,
    pub field: Option<String>,
    pub location: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
    pub service_company: Option<String>,
    pub date: Option<String>,
    pub start_depth: Option<f64>,
    pub stop_depth: Option<f64>,
    pub step: Option<f64>,
    pub null_value: f64,
    pub depth_unit: Option<String>,
}

impl Default for WellInfo {
    fn default() -> Self {
        Self {
            well_name: None,
            uwi: None,
            company: None,
            field: None,
            location: None,
            province: None,
            country: None,
            service_company: None,
            date: None,
            start_depth: None,
            stop_depth: None,
            step: None,
            null_value: DEFAULT_NULL_VALUE,
            depth_unit: None,
        }
    }
}

/// One row of the curve-information section
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CurveDefinition {
    pub mnemonic: String,
    pub unit: String,
    /// API code or value field, if any
    pub api_code: String,
    pub description: String,
    /// Position of this curve's column in the data section
    pub column: usize,
}

/// Parsed LAS file
#[derive(Clone, Debug, Default)]
pub struct LasFile {
    pub sections: Vec<HeaderSection>,
    pub version: VersionInfo,
    pub well: WellInfo,
    pub curves: Vec<CurveDefinition>,
    /// One series per curve, indexed by `CurveDefinition::column`
    pub series: Vec<SampleSeries>,
    /// Raw lines of the `~O` section
    pub other: Vec<String>,
    /// Non-fatal oddities found while parsing, forwarded to validation
    pub warnings: Vec<String>,
}

impl LasFile {
    /// All header sections of one kind, in file order
    pub fn sections_of(&self, kind: SectionKind) -> impl Iterator<Item = &HeaderSection> {
        self.sections.iter().filter(move |s| s.kind == kind)
    }

    /// Look up a header value by section and mnemonic
    pub fn header_entry(&self, kind: SectionKind, mnemonic: &str) -> Option<&HeaderEntry> {
        self.sections
            .iter()
            .rev()
            .filter(|s| s.kind == kind)
            .find_map(|s| s.entry(mnemonic))
    }

    /// Null sentinel in effect for this file
    pub fn null_value(&self) -> f64 {
        self.well.null_value
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.series.first().map(Vec::len).unwrap_or(0)
    }

    /// Column of a curve by mnemonic; duplicated mnemonics resolve to the last one
    pub fn curve_index(&self, mnemonic: &str) -> Option<usize> {
        self.curves
            .iter()
            .rposition(|c| c.mnemonic.eq_ignore_ascii_case(mnemonic))
    }

    pub fn curve(&self, mnemonic: &str) -> Option<&CurveDefinition> {
        self.curve_index(mnemonic).map(|i| &self.curves[i])
    }

    /// Samples for a curve by mnemonic
    pub fn curve_data(&self, mnemonic: &str) -> Option<&[Sample]> {
        self.curve_index(mnemonic)
            .and_then(|i| self.series.get(i))
            .map(Vec::as_slice)
    }

    /// Column of the depth/index curve: the first depth-like mnemonic, else column 0
    pub fn depth_index(&self) -> Option<usize> {
        if self.curves.is_empty() {
            return None;
        }
        Some(
            self.curves
                .iter()
                .position(|c| is_depth_mnemonic(&c.mnemonic))
                .unwrap_or(0),
        )
    }

    pub fn depth_curve(&self) -> Option<&CurveDefinition> {
        self.depth_index().map(|i| &self.curves[i])
    }

    /// The depth series every other curve is aligned with
    pub fn depth_array(&self) -> &[Sample] {
        self.depth_index()
            .and_then(|i| self.series.get(i))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Minimum and maximum over the non-null depth samples
    pub fn depth_range(&self) -> Option<(f64, f64)> {
        let mut iter = self.depth_array().iter().flatten().copied();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }

    /// Depth unit from `STRT`, falling back to the index curve's unit
    pub fn depth_unit(&self) -> &str {
        self.well
            .depth_unit
            .as_deref()
            .filter(|u| !u.is_empty())
            .or_else(|| self.depth_curve().map(|c| c.unit.as_str()))
            .unwrap_or("")
    }

    /// Count of non-null samples for a curve
    pub fn data_point_count(&self, mnemonic: &str) -> usize {
        self.curve_data(mnemonic)
            .map(|data| data.iter().filter(|v| v.is_some()).count())
            .unwrap_or(0)
    }

    /// Copy holding only the depth curve and the named curves, in file order
    pub fn subset<S: AsRef<str>>(&self, mnemonics: &[S]) -> LasFile {
        let depth = self.depth_index();
        let keep: Vec<usize> = (0..self.curves.len())
            .filter(|&i| {
                Some(i) == depth
                    || mnemonics
                        .iter()
                        .any(|m| m.as_ref().eq_ignore_ascii_case(&self.curves[i].mnemonic))
            })
            .collect();

        LasFile {
            sections: self.sections.clone(),
            version: self.version.clone(),
            well: self.well.clone(),
            curves: keep
                .iter()
                .enumerate()
                .map(|(column, &i)| CurveDefinition {
                    column,
                    ..self.curves[i].clone()
                })
                .collect(),
            series: keep
                .iter()
                .filter_map(|&i| self.series.get(i).cloned())
                .collect(),
            other: self.other.clone(),
            warnings: Vec::new(),
        }
    }
}

/// Trait for log file parsers
pub trait Parseable {
    fn parse(&self, data: &str) -> Result<LasFile, ParseError>;
}
