//! Log viewer UI.
//!
//! Paints the renderer's [`LogGeometry`] onto an egui canvas: a depth lane
//! on the left, then one lane per track with its value grid and curves.
//! Mouse wheel scrolls, dragging pans, the toolbar zooms.

use eframe::egui;

use crate::app::WellLogApp;
use crate::render::LogGeometry;
use crate::units::{format_depth_range, DepthUnit};

/// Height of the track header strip above the curves
const HEADER_HEIGHT: f32 = 48.0;

const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(28, 28, 28);
const GRID_COLOR: egui::Color32 = egui::Color32::from_rgb(55, 55, 55);
const BORDER_COLOR: egui::Color32 = egui::Color32::from_rgb(90, 90, 90);
const LABEL_COLOR: egui::Color32 = egui::Color32::from_rgb(170, 170, 170);

fn curve_color(color: [u8; 3]) -> egui::Color32 {
    egui::Color32::from_rgb(color[0], color[1], color[2])
}

/// Paint one frame of geometry. `origin` is the top-left of the header strip.
fn paint_geometry(painter: &egui::Painter, origin: egui::Pos2, geometry: &LogGeometry) {
    let small = egui::FontId::proportional(10.0);
    let plot_top = origin.y + HEADER_HEIGHT;
    let width = geometry.width as f32;
    let height = geometry.height as f32;
    let plot_rect = egui::Rect::from_min_size(
        egui::pos2(origin.x, plot_top),
        egui::vec2(width, height),
    );

    painter.rect_filled(
        egui::Rect::from_min_size(origin, egui::vec2(width, HEADER_HEIGHT + height)),
        0.0,
        BACKGROUND,
    );

    // Depth lane
    let depth_width = geometry.depth_track_width as f32;
    painter.text(
        egui::pos2(origin.x + depth_width / 2.0, origin.y + HEADER_HEIGHT / 2.0),
        egui::Align2::CENTER_CENTER,
        DepthUnit::label(&geometry.depth_unit),
        egui::FontId::proportional(12.0),
        LABEL_COLOR,
    );
    for line in &geometry.depth_grid {
        let y = plot_top + line.position as f32;
        painter.line_segment(
            [egui::pos2(origin.x + depth_width, y), egui::pos2(origin.x + width, y)],
            egui::Stroke::new(1.0, GRID_COLOR),
        );
        painter.text(
            egui::pos2(origin.x + depth_width - 4.0, y),
            egui::Align2::RIGHT_CENTER,
            &line.label,
            small.clone(),
            LABEL_COLOR,
        );
    }

    for track in &geometry.tracks {
        let left = origin.x + track.x as f32;
        let track_width = track.width as f32;
        let lane = egui::Rect::from_min_size(
            egui::pos2(left, plot_top),
            egui::vec2(track_width, height),
        );
        let header = egui::Rect::from_min_size(
            egui::pos2(left, origin.y),
            egui::vec2(track_width, HEADER_HEIGHT),
        );

        for line in &track.value_grid {
            let x = left + line.position as f32;
            painter.line_segment(
                [egui::pos2(x, lane.top()), egui::pos2(x, lane.bottom())],
                egui::Stroke::new(1.0, GRID_COLOR),
            );
        }

        // Curves are clipped to their lane
        let lane_painter = painter.with_clip_rect(lane.intersect(plot_rect));
        for curve in &track.curves {
            let stroke = egui::Stroke::new(1.5, curve_color(curve.color));
            for segment in &curve.path.segments {
                let points: Vec<egui::Pos2> = segment
                    .iter()
                    .map(|[x, y]| egui::pos2(left + *x as f32, plot_top + *y as f32))
                    .collect();
                if points.len() == 1 {
                    lane_painter.circle_filled(points[0], 1.0, stroke.color);
                } else {
                    lane_painter.add(egui::Shape::line(points, stroke));
                }
            }
        }

        painter.rect_stroke(
            header.union(lane),
            0.0,
            egui::Stroke::new(1.0, BORDER_COLOR),
            egui::StrokeKind::Inside,
        );

        // Header: track name, then one scale line per curve
        let title = if track.logarithmic {
            format!("{} (log)", track.name)
        } else {
            track.name.clone()
        };
        painter.text(
            egui::pos2(header.center().x, header.top() + 4.0),
            egui::Align2::CENTER_TOP,
            title,
            egui::FontId::proportional(12.0),
            LABEL_COLOR,
        );
        for (i, curve) in track.curves.iter().take(3).enumerate() {
            let y = header.top() + 20.0 + i as f32 * 9.0;
            let color = curve_color(curve.color);
            if !curve.plottable {
                painter.text(
                    egui::pos2(header.center().x, y),
                    egui::Align2::CENTER_TOP,
                    format!("{} (no data)", curve.name),
                    small.clone(),
                    color,
                );
                continue;
            }
            painter.text(
                egui::pos2(header.left() + 3.0, y),
                egui::Align2::LEFT_TOP,
                &curve.min_label,
                small.clone(),
                color,
            );
            painter.text(
                egui::pos2(header.center().x, y),
                egui::Align2::CENTER_TOP,
                &curve.name,
                small.clone(),
                color,
            );
            painter.text(
                egui::pos2(header.right() - 3.0, y),
                egui::Align2::RIGHT_TOP,
                &curve.max_label,
                small.clone(),
                color,
            );
        }
    }
}

impl WellLogApp {
    /// Render the central preview area
    pub fn render_log_viewer(&mut self, ui: &mut egui::Ui) {
        if self.renderer.is_none() {
            ui.centered_and_justified(|ui| {
                ui.label(
                    egui::RichText::new("Open a LAS file to preview its curves")
                        .size(20.0)
                        .color(egui::Color32::GRAY),
                );
            });
            return;
        }

        self.render_viewer_toolbar(ui);
        ui.separator();

        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        if renderer.tracks().is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(
                    egui::RichText::new("Select curves to display tracks")
                        .italics()
                        .color(egui::Color32::GRAY),
                );
            });
            return;
        }

        let mut hover_depth = None;
        egui::ScrollArea::horizontal()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let available = ui.available_size();
                let plot_height = (available.y - HEADER_HEIGHT).max(50.0);
                renderer.set_viewport_height(plot_height as f64);

                let size = egui::vec2(renderer.total_width() as f32, HEADER_HEIGHT + plot_height);
                let (response, painter) = ui.allocate_painter(size, egui::Sense::drag());
                let origin = response.rect.min;
                let range = renderer.window().range();

                // Drag pans, wheel scrolls; both in depth proportional to the pixel delta
                if response.dragged() {
                    let dy = response.drag_delta().y as f64;
                    renderer.pan_by(-dy / plot_height as f64 * range);
                }
                if response.hovered() {
                    let scroll = ui.input(|i| i.smooth_scroll_delta.y) as f64;
                    if scroll != 0.0 {
                        renderer.pan_by(-scroll / plot_height as f64 * range);
                    }
                }

                let geometry = renderer.render();
                paint_geometry(&painter, origin, &geometry);

                if let Some(pos) = response.hover_pos() {
                    let y = pos.y - origin.y - HEADER_HEIGHT;
                    if y >= 0.0 {
                        let depth = renderer.depth_at_y(y as f64);
                        hover_depth = Some(depth);
                        painter.line_segment(
                            [
                                egui::pos2(origin.x, pos.y),
                                egui::pos2(origin.x + size.x, pos.y),
                            ],
                            egui::Stroke::new(1.0, egui::Color32::from_white_alpha(90)),
                        );
                    }
                }
            });
        self.hover_depth = hover_depth;
    }

    fn render_viewer_toolbar(&mut self, ui: &mut egui::Ui) {
        let display = self.config.depth_display_unit;
        let mut export = false;
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };

        ui.horizontal(|ui| {
            if ui.button("+").on_hover_text("Zoom in").clicked() {
                renderer.zoom_in();
            }
            if ui.button("-").on_hover_text("Zoom out").clicked() {
                renderer.zoom_out();
            }
            if ui.button("Up").on_hover_text("Scroll up").clicked() {
                renderer.scroll_up();
            }
            if ui.button("Down").on_hover_text("Scroll down").clicked() {
                renderer.scroll_down();
            }
            if ui.button("Reset").on_hover_text("Show the full depth range").clicked() {
                renderer.reset_window();
            }

            ui.separator();
            let window = renderer.window();
            ui.label(
                egui::RichText::new(format_depth_range(
                    window.top,
                    window.bottom,
                    renderer.depth_unit(),
                    display,
                ))
                .color(LABEL_COLOR),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Export SVG...").clicked() {
                    export = true;
                }
            });
        });

        for warning in renderer.warnings() {
            ui.label(
                egui::RichText::new(warning)
                    .small()
                    .color(egui::Color32::from_rgb(253, 193, 73)),
            );
        }

        if export {
            let svg = renderer.to_svg();
            self.export_svg(&svg);
        }
    }

    fn export_svg(&mut self, svg: &str) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("SVG Image", &["svg"])
            .set_file_name("well_log.svg")
            .save_file()
        else {
            return;
        };
        match std::fs::write(&path, svg) {
            Ok(()) => self.show_toast_success(&format!("Exported {}", path.display())),
            Err(e) => self.show_toast_error(&format!("Failed to export: {}", e)),
        }
    }

    /// Hover readout: depth under the pointer and each curve's nearest value
    pub fn render_status_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let (Some(renderer), Some(depth)) = (&self.renderer, self.hover_depth) else {
                ui.label(
                    egui::RichText::new(if self.import.is_busy() {
                        "Importing..."
                    } else {
                        "Ready"
                    })
                    .color(LABEL_COLOR),
                );
                return;
            };

            let source = DepthUnit::parse(renderer.depth_unit());
            let display = self.config.depth_display_unit;
            let shown = source.convert(depth, display);
            let unit = if source == DepthUnit::Unknown {
                DepthUnit::label(renderer.depth_unit())
            } else {
                display.symbol().to_string()
            };
            ui.label(egui::RichText::new(format!("Depth {:.2} {}", shown, unit)).strong());

            for track in renderer.tracks() {
                for curve in &track.curves {
                    let value = curve
                        .value_at(depth)
                        .map(|v| format!("{:.3}", v))
                        .unwrap_or_else(|| "-".to_string());
                    ui.separator();
                    ui.label(
                        egui::RichText::new(format!("{}: {} {}", curve.name, value, curve.unit))
                            .color(curve_color(curve.color)),
                    );
                }
            }
        });
    }
}

