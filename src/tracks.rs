//! Renderer-facing track model.
//!
//! Tracks are built from classified curve groups: each non-empty group
//! becomes one track, curves get colors round-robin from a palette and a
//! value range computed from their non-null samples.

use std::collections::{BTreeSet, HashMap};

use rayon::prelude::*;
use serde::Serialize;

use crate::classify::{classify_mnemonic, Classification, CurveCategory, CurveGroup};
use crate::parsers::{CurveDefinition, LasFile};
use crate::state::{DEFAULT_TRACK_WIDTH, TRACK_COLORS};
use crate::storage::WellLogCurve;

/// One plotted point. `value == None` breaks the drawn line.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LogDataPoint {
    pub depth: f64,
    pub value: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LogCurve {
    pub name: String,
    pub unit: String,
    pub data: Vec<LogDataPoint>,
    pub color: [u8; 3],
    pub min_value: f64,
    pub max_value: f64,
    /// Axis type for this curve; `None` follows the track
    pub logarithmic: Option<bool>,
    /// False when the curve has no values at all
    pub plottable: bool,
}

impl LogCurve {
    /// Value of the point nearest to `depth`, if that point has a value.
    ///
    /// Points are in file order, which is either increasing or decreasing depth.
    pub fn value_at(&self, depth: f64) -> Option<f64> {
        let (first, last) = (self.data.first()?, self.data.last()?);
        let split = if first.depth <= last.depth {
            self.data.partition_point(|p| p.depth < depth)
        } else {
            self.data.partition_point(|p| p.depth > depth)
        };

        let before = split.checked_sub(1).and_then(|i| self.data.get(i));
        let after = self.data.get(split);
        let nearest = match (before, after) {
            (Some(a), Some(b)) => {
                if (a.depth - depth).abs() <= (b.depth - depth).abs() {
                    a
                } else {
                    b
                }
            }
            (Some(p), None) | (None, Some(p)) => p,
            (None, None) => return None,
        };
        nearest.value
    }
}

/// A vertical lane of curves sharing one value axis
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LogTrack {
    pub name: String,
    pub curves: Vec<LogCurve>,
    pub width: f64,
    /// Fixed number of value grid divisions; nice steps are used when unset
    pub grid_lines: Option<usize>,
    pub logarithmic: bool,
}

/// Caller-supplied value range for a curve
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveBounds {
    pub min: f64,
    pub max: f64,
}

#[derive(Clone, Debug)]
pub struct TrackOptions {
    pub palette: &'static [[u8; 3]],
    pub track_width: f64,
    /// Explicit bounds by curve name; computed from the data otherwise
    pub bounds: HashMap<String, CurveBounds>,
}

impl Default for TrackOptions {
    fn default() -> Self {
        Self {
            palette: TRACK_COLORS,
            track_width: DEFAULT_TRACK_WIDTH,
            bounds: HashMap::new(),
        }
    }
}

/// Round-robin palette cursor. A fresh one is used for every build.
#[derive(Clone, Debug)]
pub struct ColorCycle {
    palette: &'static [[u8; 3]],
    next: usize,
}

impl ColorCycle {
    pub fn new(palette: &'static [[u8; 3]]) -> Self {
        Self { palette, next: 0 }
    }

    pub fn next_color(&mut self) -> [u8; 3] {
        if self.palette.is_empty() {
            return [128, 128, 128];
        }
        let color = self.palette[self.next % self.palette.len()];
        self.next += 1;
        color
    }
}

/// Curve data before colors and ranges are assigned
struct CurveInput {
    name: String,
    unit: String,
    data: Vec<LogDataPoint>,
}

/// Min/max over the finite values of a curve
fn value_range(data: &[LogDataPoint]) -> Option<(f64, f64)> {
    let mut values = data.iter().filter_map(|p| p.value).filter(|v| v.is_finite());
    let first = values.next()?;
    Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

fn finish_curve(
    input: CurveInput,
    colors: &mut ColorCycle,
    options: &TrackOptions,
) -> LogCurve {
    let computed = value_range(&input.data);
    let plottable = computed.is_some();
    let (min_value, max_value) = match options.bounds.get(&input.name) {
        Some(bounds) => (bounds.min, bounds.max),
        None => computed.unwrap_or((0.0, 1.0)),
    };

    LogCurve {
        name: input.name,
        unit: input.unit,
        data: input.data,
        color: colors.next_color(),
        min_value,
        max_value,
        logarithmic: None,
        plottable,
    }
}

fn assemble(groups: Vec<(CurveCategory, Vec<CurveInput>)>, options: &TrackOptions) -> Vec<LogTrack> {
    let mut colors = ColorCycle::new(options.palette);

    groups
        .into_iter()
        .filter(|(_, inputs)| !inputs.is_empty())
        .map(|(category, inputs)| {
            let logarithmic = category.is_logarithmic();
            LogTrack {
                name: category.track_name().to_string(),
                curves: inputs
                    .into_iter()
                    .map(|input| finish_curve(input, &mut colors, options))
                    .collect(),
                width: options.track_width,
                grid_lines: None,
                logarithmic,
            }
        })
        .collect()
}

fn curve_points(file: &LasFile, definition: &CurveDefinition) -> Vec<LogDataPoint> {
    let depths = file.depth_array();
    let Some(series) = file.series.get(definition.column) else {
        return Vec::new();
    };

    depths
        .iter()
        .zip(series)
        .filter_map(|(depth, value)| depth.map(|depth| LogDataPoint { depth, value: *value }))
        .collect()
}

/// Build tracks for a parsed file.
///
/// `selected` limits the curves by mnemonic, ignoring case; `None` takes every
/// curve in the groups. The file's index column is never plotted.
pub fn build_tracks(
    file: &LasFile,
    groups: &[CurveGroup],
    selected: Option<&BTreeSet<String>>,
    options: &TrackOptions,
) -> Vec<LogTrack> {
    let index = file.depth_index();
    let is_selected = |mnemonic: &str| {
        selected.map_or(true, |s| s.iter().any(|m| m.eq_ignore_ascii_case(mnemonic)))
    };
    let grouped: Vec<(CurveCategory, Vec<CurveInput>)> = groups
        .iter()
        .map(|group| {
            let inputs: Vec<CurveInput> = group
                .curves
                .par_iter()
                .filter(|c| Some(c.column) != index && is_selected(&c.mnemonic))
                .map(|c| CurveInput {
                    name: c.mnemonic.clone(),
                    unit: c.unit.clone(),
                    data: curve_points(file, c),
                })
                .collect();
            (group.category, inputs)
        })
        .collect();

    let tracks = assemble(grouped, options);
    tracing::debug!(
        "Built {} tracks with {} curves",
        tracks.len(),
        tracks.iter().map(|t| t.curves.len()).sum::<usize>()
    );
    tracks
}

/// Build tracks for curves read back from the storage service
pub fn tracks_from_stored(curves: &[WellLogCurve], options: &TrackOptions) -> Vec<LogTrack> {
    let mut grouped: Vec<(CurveCategory, Vec<CurveInput>)> = Vec::new();
    for curve in curves {
        let Classification::Category(category) = classify_mnemonic(&curve.name) else {
            continue;
        };
        let input = CurveInput {
            name: curve.name.clone(),
            unit: curve.unit.clone(),
            data: curve
                .data
                .iter()
                .map(|p| LogDataPoint {
                    depth: p.depth,
                    value: Some(p.value),
                })
                .collect(),
        };
        match grouped.iter_mut().find(|(c, _)| *c == category) {
            Some((_, inputs)) => inputs.push(input),
            None => grouped.push((category, vec![input])),
        }
    }
    grouped.sort_by_key(|(category, _)| *category);
    assemble(grouped, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::parsers::parse_las_file;
    use crate::storage::DepthValue;

    const FILE: &str = "~V\nVERS. 2.0:\n~W\nNULL. -999.25:\n~C\nDEPT.M\nGR.GAPI\nILD.OHMM\nILM.OHMM\nCALI.IN\nSP.MV\n~A\n100.0 50.0 2.0 3.0 8.5 -999.25\n101.0 -999.25 20.0 30.0 8.6 -999.25\n102.0 60.0 200.0 300.0 8.7 -999.25\n";

    fn tracks(selected: Option<&BTreeSet<String>>) -> Vec<LogTrack> {
        let las = parse_las_file(FILE).unwrap();
        let groups = classify(&las.curves);
        build_tracks(&las, &groups, selected, &TrackOptions::default())
    }

    #[test]
    fn test_one_track_per_non_empty_group() {
        let tracks = tracks(None);
        let names: Vec<&str> = tracks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["GR", "Resistivity", "Other"]);
        assert!(tracks[1].logarithmic);
        assert!(tracks[1].curves.iter().all(|c| c.logarithmic.is_none()));
        assert!(!tracks[0].logarithmic);
        assert_eq!(tracks[0].width, DEFAULT_TRACK_WIDTH);
    }

    #[test]
    fn test_colors_round_robin_in_encounter_order() {
        let tracks = tracks(None);
        let colors: Vec<[u8; 3]> = tracks
            .iter()
            .flat_map(|t| t.curves.iter().map(|c| c.color))
            .collect();
        assert_eq!(colors, TRACK_COLORS[..5].to_vec());

        // A second build starts from the first palette entry again
        let again = self::tracks(None);
        assert_eq!(again[0].curves[0].color, TRACK_COLORS[0]);
    }

    #[test]
    fn test_computed_range_and_gaps() {
        let tracks = tracks(None);
        let gr = &tracks[0].curves[0];
        assert_eq!(gr.min_value, 50.0);
        assert_eq!(gr.max_value, 60.0);
        assert_eq!(gr.data[1], LogDataPoint { depth: 101.0, value: None });
        assert_eq!(gr.value_at(101.9), Some(60.0));
        assert_eq!(gr.value_at(100.9), None);
    }

    #[test]
    fn test_curve_without_values_is_unplottable() {
        let tracks = tracks(None);
        let sp = tracks[2].curves.iter().find(|c| c.name == "SP").unwrap();
        assert!(!sp.plottable);
        assert_eq!((sp.min_value, sp.max_value), (0.0, 1.0));
    }

    #[test]
    fn test_selection_and_explicit_bounds() {
        let las = parse_las_file(FILE).unwrap();
        let groups = classify(&las.curves);
        let selected: BTreeSet<String> = ["ILM".to_string()].into_iter().collect();
        let mut options = TrackOptions::default();
        options.bounds.insert("ILM".into(), CurveBounds { min: 0.2, max: 2000.0 });

        let tracks = build_tracks(&las, &groups, Some(&selected), &options);
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].curves.len(), 1);
        let ilm = &tracks[0].curves[0];
        assert_eq!((ilm.min_value, ilm.max_value), (0.2, 2000.0));
        assert_eq!(ilm.color, TRACK_COLORS[0]);
    }

    #[test]
    fn test_color_cycle_wraps_and_handles_empty_palette() {
        let mut cycle = ColorCycle::new(&[[1, 1, 1], [2, 2, 2]]);
        assert_eq!(cycle.next_color(), [1, 1, 1]);
        assert_eq!(cycle.next_color(), [2, 2, 2]);
        assert_eq!(cycle.next_color(), [1, 1, 1]);
        assert_eq!(ColorCycle::new(&[]).next_color(), [128, 128, 128]);
    }

    #[test]
    fn test_tracks_from_stored_curves() {
        let point = |depth, value| DepthValue { depth, value };
        let curves = vec![
            WellLogCurve {
                name: "NPHI".into(),
                unit: "V/V".into(),
                data: vec![point(100.0, 0.2), point(101.0, 0.3)],
                ..Default::default()
            },
            WellLogCurve {
                name: "DEPT".into(),
                ..Default::default()
            },
            WellLogCurve {
                name: "GR".into(),
                unit: "GAPI".into(),
                data: vec![point(100.0, 40.0)],
                ..Default::default()
            },
        ];
        let tracks = tracks_from_stored(&curves, &TrackOptions::default());
        let names: Vec<&str> = tracks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["GR", "Porosity"]);
        assert_eq!(tracks[1].curves[0].max_value, 0.3);
    }

    #[test]
    fn test_fallback_index_column_is_not_plotted() {
        let text = "~V\nVERS. 2.0:\n~W\nWELL. W-1:\n~C\nTIME.S\nGR.GAPI\n~A\n0.0 50.0\n1.0 60.0\n";
        let las = parse_las_file(text).unwrap();
        assert_eq!(las.depth_index(), Some(0));

        let tracks = build_tracks(&las, &classify(&las.curves), None, &TrackOptions::default());
        let plotted: Vec<&str> = tracks
            .iter()
            .flat_map(|t| t.curves.iter().map(|c| c.name.as_str()))
            .collect();
        assert_eq!(plotted, vec!["GR"]);
    }

    #[test]
    fn test_selection_ignores_case() {
        let selected: BTreeSet<String> = ["gr".to_string(), "Ild".to_string()].into_iter().collect();
        let tracks = tracks(Some(&selected));
        let plotted: Vec<&str> = tracks
            .iter()
            .flat_map(|t| t.curves.iter().map(|c| c.name.as_str()))
            .collect();
        assert_eq!(plotted, vec!["GR", "ILD"]);
    }

    #[test]
    fn test_value_at_picks_nearest_sample() {
        let tracks = tracks(None);
        let gr = &tracks[0].curves[0];
        assert_eq!(gr.value_at(99.0), Some(50.0));
        assert_eq!(gr.value_at(100.4), Some(50.0));
        assert_eq!(gr.value_at(100.6), None);
        assert_eq!(gr.value_at(101.8), Some(60.0));
        assert_eq!(gr.value_at(500.0), Some(60.0));

        let empty = LogCurve {
            data: Vec::new(),
            ..gr.clone()
        };
        assert_eq!(empty.value_at(100.0), None);
    }
}
