//! Log track geometry and navigation.
//!
//! [`LogTrackRenderer`] maps a set of [`LogTrack`]s and a depth window to
//! drawable geometry: depth and value grid lines, per-curve paths in pixel
//! coordinates, and labels. The geometry is surface-agnostic; the egui
//! viewer paints it directly and [`LogTrackRenderer::to_svg`] writes it out
//! as an SVG document.
//!
//! Depth runs downwards: `top` maps to `y = 0` and `bottom` to the viewport
//! height. Each track has its own value axis, linear or base-10 logarithmic.

use std::fmt::Write;

use serde::Serialize;

use crate::state::{
    DEFAULT_TRACK_WIDTH, DEPTH_TRACK_WIDTH, IDEAL_DEPTH_STEPS, IDEAL_VALUE_STEPS,
    SCROLL_FRACTION, TRACK_MARGIN, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR,
};
use crate::tracks::{LogCurve, LogTrack};

/// Upper bound on grid lines per axis
const MAX_GRID_LINES: usize = 1000;

// ============================================================================
// Depth window
// ============================================================================

/// Visible depth interval. Always satisfies `bottom > top`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ViewWindow {
    pub top: f64,
    pub bottom: f64,
}

impl ViewWindow {
    /// Build a window, swapping reversed bounds and widening an empty one to one unit
    pub fn new(top: f64, bottom: f64) -> Self {
        let top = if top.is_finite() { top } else { 0.0 };
        let bottom = if bottom.is_finite() { bottom } else { top + 1.0 };
        let (top, bottom) = if bottom < top { (bottom, top) } else { (top, bottom) };
        if bottom > top {
            Self { top, bottom }
        } else {
            Self {
                top,
                bottom: top + 1.0,
            }
        }
    }

    pub fn range(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }

    pub fn contains(&self, depth: f64) -> bool {
        depth >= self.top && depth <= self.bottom
    }

    /// Rescale around the center
    pub fn zoomed(&self, factor: f64) -> Self {
        let center = self.center();
        let half = self.range() * factor / 2.0;
        Self::new(center - half, center + half)
    }

    pub fn translated(&self, delta: f64) -> Self {
        Self::new(self.top + delta, self.bottom + delta)
    }
}

// ============================================================================
// Axis helpers
// ============================================================================

/// Nice grid step for `range` split into roughly `ideal_steps` divisions.
///
/// The raw step is rounded up to 1, 2, 5 or 10 times its power of ten.
pub fn choose_step(range: f64, ideal_steps: usize) -> f64 {
    if !range.is_finite() || range <= 0.0 || ideal_steps == 0 {
        return 1.0;
    }
    let raw = range / ideal_steps as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;

    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Axis label for a curve value
pub fn format_value(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1000.0 || (abs < 0.01 && value != 0.0) {
        format!("{:.1e}", value)
    } else if abs < 1.0 {
        format!("{:.2}", value)
    } else {
        format!("{:.0}", value)
    }
}

/// Depth label with as many decimals as the grid step needs
fn format_depth(depth: f64, step: f64) -> String {
    let decimals = if step >= 1.0 {
        0
    } else {
        (-step.log10()).ceil().max(0.0) as usize
    };
    format!("{:.*}", decimals, depth)
}

/// Maps curve values to x positions inside a track
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueScale {
    min: f64,
    max: f64,
    logarithmic: bool,
    left: f64,
    span: f64,
}

impl ValueScale {
    /// A logarithmic request with a non-positive bound yields a linear scale
    pub fn new(min: f64, max: f64, logarithmic: bool, track_width: f64) -> Self {
        let margin = TRACK_MARGIN.min(track_width.max(0.0));
        Self {
            min,
            max,
            logarithmic: logarithmic && min > 0.0 && max > 0.0,
            left: margin / 2.0,
            span: (track_width - margin).max(0.0),
        }
    }

    /// The curve's own axis type wins over the track's when set
    pub fn for_curve(curve: &LogCurve, track_width: f64, track_logarithmic: bool) -> Self {
        Self::new(
            curve.min_value,
            curve.max_value,
            curve.logarithmic.unwrap_or(track_logarithmic),
            track_width,
        )
    }

    pub fn is_logarithmic(&self) -> bool {
        self.logarithmic
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    pub fn value_to_x(&self, value: f64) -> f64 {
        let center = self.left + self.span / 2.0;
        let fraction = if self.logarithmic {
            let lo = self.min.log10();
            let hi = self.max.log10();
            if hi <= lo {
                return center;
            }
            (value.max(self.min).log10() - lo) / (hi - lo)
        } else {
            let range = self.max - self.min;
            if !range.is_finite() || range <= 0.0 {
                return center;
            }
            (value - self.min) / range
        };
        fraction * self.span + self.left
    }

    /// Grid values across the scale: decades for log scales, else equal or nice steps
    pub fn grid_values(&self, divisions: Option<usize>) -> Vec<f64> {
        let (min, max) = (self.min, self.max);
        if !min.is_finite() || !max.is_finite() || max <= min {
            return vec![min];
        }

        if self.logarithmic {
            let tolerance = 1e-9;
            let first = min.log10().floor() as i32;
            let last = max.log10().ceil() as i32;
            return (first..=last)
                .map(|exp| 10f64.powi(exp))
                .filter(|v| *v >= min * (1.0 - tolerance) && *v <= max * (1.0 + tolerance))
                .take(MAX_GRID_LINES)
                .collect();
        }

        match divisions {
            Some(n) if n > 0 => {
                let step = (max - min) / n as f64;
                (0..=n.min(MAX_GRID_LINES)).map(|i| min + step * i as f64).collect()
            }
            _ => stepped_values(min, max, choose_step(max - min, IDEAL_VALUE_STEPS)),
        }
    }
}

/// Multiples of `step` within `[from, to]`
fn stepped_values(from: f64, to: f64, step: f64) -> Vec<f64> {
    let first = (from / step - 1e-9).ceil() * step;
    // ceil of a tiny negative is -0.0
    let first = if first == 0.0 { 0.0 } else { first };
    let limit = to + step * 1e-9;
    (0..MAX_GRID_LINES)
        .map(|i| first + step * i as f64)
        .take_while(|v| *v <= limit)
        .collect()
}

// ============================================================================
// Geometry
// ============================================================================

/// A labelled grid line. `position` is `y` for depth lines and track-local `x` for value lines.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GridLine {
    pub position: f64,
    pub value: f64,
    pub label: String,
}

/// Polyline segments of one curve; a gap or the window edge starts a new segment
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CurvePath {
    pub segments: Vec<Vec<[f64; 2]>>,
}

impl CurvePath {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn point_count(&self) -> usize {
        self.segments.iter().map(Vec::len).sum()
    }

    /// SVG path data: `M` opens each segment, `L` continues it
    pub fn to_svg_path(&self) -> String {
        let mut d = String::new();
        for segment in &self.segments {
            for (i, [x, y]) in segment.iter().enumerate() {
                let command = if i == 0 { 'M' } else { 'L' };
                let _ = write!(d, "{} {:.2} {:.2} ", command, x, y);
            }
        }
        d.trim_end().to_string()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CurveGeometry {
    pub name: String,
    pub unit: String,
    pub color: [u8; 3],
    pub path: CurvePath,
    pub min_label: String,
    pub max_label: String,
    pub logarithmic: bool,
    pub plottable: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrackGeometry {
    pub name: String,
    /// Left edge, measured from the left of the depth track
    pub x: f64,
    pub width: f64,
    pub logarithmic: bool,
    pub value_grid: Vec<GridLine>,
    pub curves: Vec<CurveGeometry>,
}

/// Everything needed to draw one frame of the log view
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LogGeometry {
    pub width: f64,
    pub height: f64,
    pub depth_track_width: f64,
    pub depth_unit: String,
    pub window: ViewWindow,
    pub depth_grid: Vec<GridLine>,
    pub tracks: Vec<TrackGeometry>,
    pub warnings: Vec<String>,
}

// ============================================================================
// Renderer
// ============================================================================

/// Multi-track log view over a movable depth window
#[derive(Clone, Debug)]
pub struct LogTrackRenderer {
    tracks: Vec<LogTrack>,
    window: ViewWindow,
    initial: ViewWindow,
    depth_unit: String,
    viewport_height: f64,
    depth_track_width: f64,
    ideal_depth_steps: usize,
    warnings: Vec<String>,
}

impl LogTrackRenderer {
    pub fn new(
        tracks: Vec<LogTrack>,
        top_depth: f64,
        bottom_depth: f64,
        depth_unit: &str,
        viewport_height: f64,
    ) -> Self {
        let window = ViewWindow::new(top_depth, bottom_depth);
        let warnings = scale_warnings(&tracks);
        Self {
            tracks,
            window,
            initial: window,
            depth_unit: depth_unit.to_string(),
            viewport_height: sanitize_height(viewport_height),
            depth_track_width: DEPTH_TRACK_WIDTH,
            ideal_depth_steps: IDEAL_DEPTH_STEPS,
            warnings,
        }
    }

    /// Override the depth-track width and depth grid density
    pub fn with_layout(mut self, depth_track_width: f64, ideal_depth_steps: usize) -> Self {
        if depth_track_width.is_finite() && depth_track_width >= 0.0 {
            self.depth_track_width = depth_track_width;
        }
        if ideal_depth_steps > 0 {
            self.ideal_depth_steps = ideal_depth_steps;
        }
        self
    }

    pub fn set_tracks(&mut self, tracks: Vec<LogTrack>) {
        self.warnings = scale_warnings(&tracks);
        self.tracks = tracks;
    }

    pub fn tracks(&self) -> &[LogTrack] {
        &self.tracks
    }

    pub fn window(&self) -> ViewWindow {
        self.window
    }

    pub fn depth_unit(&self) -> &str {
        &self.depth_unit
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = sanitize_height(height);
    }

    pub fn depth_track_width(&self) -> f64 {
        self.depth_track_width
    }

    /// Messages about axes that could not be drawn as requested
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn track_width(track: &LogTrack) -> f64 {
        if track.width.is_finite() && track.width > 0.0 {
            track.width
        } else {
            DEFAULT_TRACK_WIDTH
        }
    }

    pub fn total_width(&self) -> f64 {
        self.depth_track_width + self.tracks.iter().map(Self::track_width).sum::<f64>()
    }

    /// Left edge of each track
    pub fn track_offsets(&self) -> Vec<f64> {
        self.tracks
            .iter()
            .scan(self.depth_track_width, |x, track| {
                let left = *x;
                *x += Self::track_width(track);
                Some(left)
            })
            .collect()
    }

    /// Index of the track under an x position, if any
    pub fn track_at_x(&self, x: f64) -> Option<usize> {
        self.track_offsets()
            .iter()
            .zip(&self.tracks)
            .position(|(left, track)| x >= *left && x < left + Self::track_width(track))
    }

    pub fn depth_to_y(&self, depth: f64) -> f64 {
        (depth - self.window.top) / self.window.range() * self.viewport_height
    }

    pub fn depth_at_y(&self, y: f64) -> f64 {
        self.window.top + y / self.viewport_height * self.window.range()
    }

    pub fn depth_step(&self) -> f64 {
        choose_step(self.window.range(), self.ideal_depth_steps)
    }

    pub fn depth_grid_lines(&self) -> Vec<GridLine> {
        let step = self.depth_step();
        stepped_values(self.window.top, self.window.bottom, step)
            .into_iter()
            .map(|depth| GridLine {
                position: self.depth_to_y(depth),
                value: depth,
                label: format_depth(depth, step),
            })
            .collect()
    }

    /// Value axis of a track, taken from its first curve
    pub fn track_scale(track: &LogTrack) -> Option<ValueScale> {
        track
            .curves
            .first()
            .map(|curve| ValueScale::for_curve(curve, Self::track_width(track), track.logarithmic))
    }

    /// Track-local x of a value on the track's axis
    pub fn value_to_x(&self, value: f64, track: &LogTrack) -> f64 {
        Self::track_scale(track)
            .map(|scale| scale.value_to_x(value))
            .unwrap_or(0.0)
    }

    pub fn value_grid_lines(&self, track: &LogTrack) -> Vec<GridLine> {
        let Some(scale) = Self::track_scale(track) else {
            return Vec::new();
        };
        scale
            .grid_values(track.grid_lines)
            .into_iter()
            .map(|value| GridLine {
                position: scale.value_to_x(value),
                value,
                label: format_value(value),
            })
            .collect()
    }

    /// Pixel path of one curve within the current window
    pub fn curve_path(&self, curve: &LogCurve, track: &LogTrack) -> CurvePath {
        let scale = ValueScale::for_curve(curve, Self::track_width(track), track.logarithmic);
        let mut segments = Vec::new();
        let mut current: Vec<[f64; 2]> = Vec::new();

        for point in &curve.data {
            match point.value {
                Some(value) if value.is_finite() && self.window.contains(point.depth) => {
                    current.push([scale.value_to_x(value), self.depth_to_y(point.depth)]);
                }
                _ => {
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }

        CurvePath { segments }
    }

    /// Compute the full geometry for the current window
    pub fn render(&self) -> LogGeometry {
        let tracks = self
            .tracks
            .iter()
            .zip(self.track_offsets())
            .map(|(track, x)| {
                let width = Self::track_width(track);
                let curves = track
                    .curves
                    .iter()
                    .map(|curve| {
                        let scale = ValueScale::for_curve(curve, width, track.logarithmic);
                        CurveGeometry {
                            name: curve.name.clone(),
                            unit: curve.unit.clone(),
                            color: curve.color,
                            path: self.curve_path(curve, track),
                            min_label: format_value(curve.min_value),
                            max_label: format_value(curve.max_value),
                            logarithmic: scale.is_logarithmic(),
                            plottable: curve.plottable,
                        }
                    })
                    .collect();

                TrackGeometry {
                    name: track.name.clone(),
                    x,
                    width,
                    logarithmic: Self::track_scale(track)
                        .map(|s| s.is_logarithmic())
                        .unwrap_or(false),
                    value_grid: self.value_grid_lines(track),
                    curves,
                }
            })
            .collect();

        LogGeometry {
            width: self.total_width(),
            height: self.viewport_height,
            depth_track_width: self.depth_track_width,
            depth_unit: self.depth_unit.clone(),
            window: self.window,
            depth_grid: self.depth_grid_lines(),
            tracks,
            warnings: self.warnings.clone(),
        }
    }

    /// Standalone SVG document of the current view
    pub fn to_svg(&self) -> String {
        let geometry = self.render();
        let (width, height) = (geometry.width, geometry.height);
        let mut svg = String::new();

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}" font-family="sans-serif" font-size="10">"#,
            w = width,
            h = height
        );
        let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);

        let _ = writeln!(svg, r#"<g class="depth-track">"#);
        for line in &geometry.depth_grid {
            let _ = writeln!(
                svg,
                r##"<line x1="0" y1="{y:.2}" x2="{w:.2}" y2="{y:.2}" stroke="#DDDDDD"/>"##,
                y = line.position,
                w = width
            );
            let _ = writeln!(
                svg,
                r#"<text x="{x:.2}" y="{y:.2}" text-anchor="end">{label}</text>"#,
                x = geometry.depth_track_width - 4.0,
                y = line.position + 3.0,
                label = escape(&line.label)
            );
        }
        let _ = writeln!(
            svg,
            r#"<text x="{x:.2}" y="12" text-anchor="middle">{unit}</text>"#,
            x = geometry.depth_track_width / 2.0,
            unit = escape(&geometry.depth_unit)
        );
        let _ = writeln!(svg, "</g>");

        for track in &geometry.tracks {
            let _ = writeln!(
                svg,
                r#"<g class="track" transform="translate({:.2},0)">"#,
                track.x
            );
            let _ = writeln!(
                svg,
                r##"<rect width="{:.2}" height="{:.2}" fill="none" stroke="#999999"/>"##,
                track.width, height
            );
            for line in &track.value_grid {
                let _ = writeln!(
                    svg,
                    r##"<line x1="{x:.2}" y1="0" x2="{x:.2}" y2="{h:.2}" stroke="#EEEEEE"/>"##,
                    x = line.position,
                    h = height
                );
            }
            for curve in &track.curves {
                if curve.path.is_empty() {
                    continue;
                }
                let [r, g, b] = curve.color;
                let _ = writeln!(
                    svg,
                    r##"<path d="{}" fill="none" stroke="#{:02X}{:02X}{:02X}" stroke-width="1.5"><title>{}</title></path>"##,
                    curve.path.to_svg_path(),
                    r,
                    g,
                    b,
                    escape(&curve.name)
                );
            }
            let _ = writeln!(
                svg,
                r#"<text x="{:.2}" y="12" text-anchor="middle">{}</text>"#,
                track.width / 2.0,
                escape(&track.name)
            );
            let _ = writeln!(svg, "</g>");
        }

        svg.push_str("</svg>\n");
        svg
    }

    // Navigation

    pub fn zoom_in(&mut self) {
        self.window = self.window.zoomed(ZOOM_IN_FACTOR);
    }

    pub fn zoom_out(&mut self) {
        self.window = self.window.zoomed(ZOOM_OUT_FACTOR);
    }

    pub fn scroll_up(&mut self) {
        self.pan_by(-self.window.range() * SCROLL_FRACTION);
    }

    pub fn scroll_down(&mut self) {
        self.pan_by(self.window.range() * SCROLL_FRACTION);
    }

    /// Move the window by a depth delta, positive is deeper
    pub fn pan_by(&mut self, delta: f64) {
        if delta.is_finite() {
            self.window = self.window.translated(delta);
        }
    }

    pub fn set_window(&mut self, top: f64, bottom: f64) {
        self.window = ViewWindow::new(top, bottom);
    }

    pub fn reset_window(&mut self) {
        self.window = self.initial;
    }
}

fn sanitize_height(height: f64) -> f64 {
    if height.is_finite() && height > 0.0 {
        height
    } else {
        1.0
    }
}

/// Note every curve whose logarithmic axis had to fall back to linear
fn scale_warnings(tracks: &[LogTrack]) -> Vec<String> {
    let mut warnings = Vec::new();
    for track in tracks {
        for curve in &track.curves {
            let requested = curve.logarithmic.unwrap_or(track.logarithmic);
            let scale = ValueScale::for_curve(curve, LogTrackRenderer::track_width(track), track.logarithmic);
            if requested && !scale.is_logarithmic() {
                tracing::warn!(
                    "Curve {} has non-positive range {}..{}, using linear scale",
                    curve.name,
                    curve.min_value,
                    curve.max_value
                );
                warnings.push(format!(
                    "Curve {} in track {} has values <= 0 and is plotted on a linear scale",
                    curve.name, track.name
                ));
            }
        }
    }
    warnings
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracks::LogDataPoint;

    fn curve(name: &str, points: &[(f64, Option<f64>)], min: f64, max: f64) -> LogCurve {
        LogCurve {
            name: name.to_string(),
            unit: String::new(),
            data: points
                .iter()
                .map(|&(depth, value)| LogDataPoint { depth, value })
                .collect(),
            color: [30, 136, 229],
            min_value: min,
            max_value: max,
            logarithmic: None,
            plottable: true,
        }
    }

    fn track(name: &str, curves: Vec<LogCurve>, logarithmic: bool) -> LogTrack {
        LogTrack {
            name: name.to_string(),
            curves,
            width: 150.0,
            grid_lines: None,
            logarithmic,
        }
    }

    fn gr_track() -> LogTrack {
        track(
            "GR",
            vec![curve(
                "GR",
                &[(100.0, Some(50.0)), (101.0, None), (102.0, Some(60.0))],
                50.0,
                60.0,
            )],
            false,
        )
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_choose_step() {
        assert_eq!(choose_step(437.0, 10), 50.0);
        assert!(approx(choose_step(9.0, 10), 1.0));
        assert_eq!(choose_step(500.0, 10), 50.0);
        assert_eq!(choose_step(100.0, 10), 10.0);
        assert_eq!(choose_step(150.0, 10), 20.0);
        assert!(approx(choose_step(0.3, 10), 0.05));
        assert_eq!(choose_step(0.0, 10), 1.0);
        assert_eq!(choose_step(-5.0, 10), 1.0);
        assert_eq!(choose_step(f64::NAN, 10), 1.0);
    }

    #[test]
    fn test_view_window_normalization() {
        assert_eq!(ViewWindow::new(2500.0, 2000.0), ViewWindow::new(2000.0, 2500.0));
        let empty = ViewWindow::new(100.0, 100.0);
        assert!(empty.bottom > empty.top);
        let nan = ViewWindow::new(f64::NAN, f64::NAN);
        assert!(nan.bottom > nan.top);
    }

    #[test]
    fn test_depth_to_y_endpoints() {
        for (top, bottom, height) in [(2000.0, 2500.0, 600.0), (-10.0, 35.5, 321.0), (0.0, 1e-3, 50.0)] {
            let renderer = LogTrackRenderer::new(vec![], top, bottom, "m", height);
            assert!(approx(renderer.depth_to_y(top), 0.0));
            assert!(approx(renderer.depth_to_y(bottom), height));
            let mid = (top + bottom) / 2.0;
            assert!(approx(renderer.depth_at_y(renderer.depth_to_y(mid)), mid));
        }
    }

    #[test]
    fn test_zoom_and_scroll() {
        let mut renderer = LogTrackRenderer::new(vec![], 2000.0, 2500.0, "m", 600.0);
        renderer.zoom_in();
        let w = renderer.window();
        assert!(approx(w.top, 2050.0) && approx(w.bottom, 2450.0));
        assert!(approx(w.center(), 2250.0));

        renderer.zoom_out();
        let w = renderer.window();
        assert!(approx(w.top, 2000.0) && approx(w.bottom, 2500.0));

        renderer.scroll_down();
        let w = renderer.window();
        assert!(approx(w.top, 2125.0) && approx(w.bottom, 2625.0));
        renderer.scroll_up();
        renderer.scroll_up();
        let w = renderer.window();
        assert!(approx(w.top, 1875.0) && approx(w.range(), 500.0));

        renderer.pan_by(f64::NAN);
        assert!(approx(renderer.window().top, 1875.0));
        renderer.reset_window();
        assert_eq!(renderer.window(), ViewWindow::new(2000.0, 2500.0));
    }

    #[test]
    fn test_linear_value_mapping() {
        let scale = ValueScale::new(0.0, 100.0, false, 150.0);
        assert!(approx(scale.value_to_x(0.0), 5.0));
        assert!(approx(scale.value_to_x(50.0), 75.0));
        assert!(approx(scale.value_to_x(100.0), 145.0));

        // Degenerate range lands on the track center
        let flat = ValueScale::new(7.0, 7.0, false, 150.0);
        assert!(approx(flat.value_to_x(7.0), 75.0));
    }

    #[test]
    fn test_logarithmic_value_mapping() {
        let scale = ValueScale::new(1.0, 100.0, true, 150.0);
        assert!(scale.is_logarithmic());
        assert!(approx(scale.value_to_x(10.0), 75.0));
        // Values below the minimum are pinned to the left edge
        assert!(approx(scale.value_to_x(0.0), 5.0));
        assert!(approx(scale.value_to_x(-3.0), 5.0));
    }

    #[test]
    fn test_logarithmic_fallback_for_non_positive_minimum() {
        let resistivity = track(
            "Resistivity",
            vec![curve("ILD", &[(100.0, Some(0.0)), (101.0, Some(20.0))], 0.0, 20.0)],
            true,
        );
        let renderer = LogTrackRenderer::new(vec![resistivity], 100.0, 101.0, "m", 100.0);
        assert_eq!(renderer.warnings().len(), 1);
        assert!(renderer.warnings()[0].contains("ILD"));

        let geometry = renderer.render();
        assert!(!geometry.tracks[0].logarithmic);
        let points: Vec<[f64; 2]> = geometry.tracks[0].curves[0].path.segments.concat();
        assert!(points.iter().all(|[x, y]| x.is_finite() && y.is_finite()));
        assert!(approx(points[0][0], 5.0));
        assert!(approx(points[1][0], 145.0));
    }

    #[test]
    fn test_curve_axis_overrides_track() {
        let mut linear = curve("TEMP", &[(100.0, Some(10.0)), (101.0, Some(100.0))], 10.0, 100.0);
        linear.logarithmic = Some(false);
        let resistivity = track(
            "Resistivity",
            vec![
                curve("ILD", &[(100.0, Some(10.0)), (101.0, Some(100.0))], 1.0, 100.0),
                linear,
            ],
            true,
        );
        let renderer = LogTrackRenderer::new(vec![resistivity], 100.0, 101.0, "m", 100.0);
        assert!(renderer.warnings().is_empty());

        let geometry = renderer.render();
        let track = &geometry.tracks[0];
        assert!(track.logarithmic);
        assert!(track.curves[0].logarithmic);
        assert!(!track.curves[1].logarithmic);

        // 55 is halfway on the linear axis, nowhere near it on a log one
        let scale = ValueScale::for_curve(&renderer.tracks()[0].curves[1], 150.0, true);
        assert!(approx(scale.value_to_x(55.0), 75.0));
    }

    #[test]
    fn test_gaps_break_segments() {
        let tracks = vec![gr_track()];
        let renderer = LogTrackRenderer::new(tracks, 100.0, 102.0, "m", 200.0);
        let path = renderer.curve_path(&renderer.tracks()[0].curves[0], &renderer.tracks()[0]);
        assert_eq!(path.segments.len(), 2);
        assert_eq!(path.point_count(), 2);
        assert_eq!(path.to_svg_path(), "M 5.00 0.00 M 145.00 200.00");
    }

    #[test]
    fn test_points_outside_window_are_excluded() {
        let tracks = vec![track(
            "GR",
            vec![curve(
                "GR",
                &[(99.0, Some(1.0)), (100.0, Some(2.0)), (100.5, Some(3.0)), (103.0, Some(4.0))],
                1.0,
                4.0,
            )],
            false,
        )];
        let renderer = LogTrackRenderer::new(tracks, 100.0, 101.0, "m", 100.0);
        let geometry = renderer.render();
        let path = &geometry.tracks[0].curves[0].path;
        assert_eq!(path.segments.len(), 1);
        assert_eq!(path.point_count(), 2);
        assert!(path.segments[0].iter().all(|[_, y]| (0.0..=100.0).contains(y)));
    }

    #[test]
    fn test_depth_grid_lines() {
        let renderer = LogTrackRenderer::new(vec![], 2000.0, 2437.0, "m", 437.0);
        let lines = renderer.depth_grid_lines();
        let values: Vec<f64> = lines.iter().map(|l| l.value).collect();
        assert_eq!(values.first(), Some(&2000.0));
        assert_eq!(values.last(), Some(&2400.0));
        assert_eq!(values.len(), 9);
        assert_eq!(lines[1].label, "2050");
        assert!(approx(lines[1].position, 50.0));

        let fine = LogTrackRenderer::new(vec![], 100.0, 100.3, "ft", 100.0);
        assert_eq!(fine.depth_grid_lines()[1].label, "100.05");
    }

    #[test]
    fn test_value_grid_lines() {
        let renderer = LogTrackRenderer::new(vec![], 0.0, 1.0, "m", 100.0);

        let log_track = track("Resistivity", vec![curve("ILD", &[], 2.0, 200.0)], true);
        let values: Vec<f64> = renderer
            .value_grid_lines(&log_track)
            .iter()
            .map(|l| l.value)
            .collect();
        assert_eq!(values, vec![10.0, 100.0]);

        let linear = track("GR", vec![curve("GR", &[], 0.0, 150.0)], false);
        let values: Vec<f64> = renderer
            .value_grid_lines(&linear)
            .iter()
            .map(|l| l.value)
            .collect();
        assert_eq!(values, vec![0.0, 50.0, 100.0, 150.0]);

        let mut fixed = linear.clone();
        fixed.grid_lines = Some(3);
        assert_eq!(renderer.value_grid_lines(&fixed).len(), 4);

        let empty = track("Other", vec![], false);
        assert!(renderer.value_grid_lines(&empty).is_empty());
        assert_eq!(renderer.value_to_x(5.0, &empty), 0.0);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(1500.0), "1.5e3");
        assert_eq!(format_value(0.005), "5.0e-3");
        assert_eq!(format_value(0.25), "0.25");
        assert_eq!(format_value(0.0), "0.00");
        assert_eq!(format_value(45.6), "46");
    }

    #[test]
    fn test_layout_and_hit_testing() {
        let tracks = vec![gr_track(), track("Other", vec![], false)];
        let renderer = LogTrackRenderer::new(tracks, 100.0, 102.0, "m", 200.0);
        assert_eq!(renderer.total_width(), 360.0);
        assert_eq!(renderer.track_offsets(), vec![60.0, 210.0]);
        assert_eq!(renderer.track_at_x(30.0), None);
        assert_eq!(renderer.track_at_x(60.0), Some(0));
        assert_eq!(renderer.track_at_x(359.0), Some(1));
        assert_eq!(renderer.track_at_x(360.0), None);
    }

    #[test]
    fn test_svg_output() {
        let renderer = LogTrackRenderer::new(vec![gr_track()], 100.0, 102.0, "m", 200.0);
        let svg = renderer.to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r##"stroke="#1E88E5""##));
        assert!(svg.contains("<title>GR</title>"));
        assert!(svg.contains(">m</text>"));
        assert_eq!(escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }
}
