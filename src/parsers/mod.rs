pub mod las;
pub mod types;
pub mod writer;

pub use las::{load_las_file, parse_las_file, LasParser};
pub use types::{
    CurveDefinition, Delimiter, HeaderEntry, HeaderSection, LasFile, LoadError, ParseError,
    Parseable, Sample, SampleSeries, SectionKind, VersionInfo, WellInfo, DEFAULT_NULL_VALUE,
};
pub use writer::write_las;
