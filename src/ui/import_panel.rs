//! Import panel UI.
//!
//! Walks the user through one import: pick a file, review the validation
//! report, choose curves and run details, then submit.

use eframe::egui;
use strum::IntoEnumIterator;

use crate::app::WellLogApp;
use crate::classify::{classify_mnemonic, describe, Classification, CurveCategory};
use crate::import::{ImportState, ImportSummary};
use crate::parsers::write_las;
use crate::state::{LoadingState, LAS_EXTENSIONS};
use crate::storage::LogType;
use crate::ui::icons::{draw_category_marker, draw_log_icon};
use crate::units::{format_depth_range, format_file_size};

const PRIMARY_COLOR: egui::Color32 = egui::Color32::from_rgb(30, 136, 229);
const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(229, 115, 115);
const WARNING_COLOR: egui::Color32 = egui::Color32::from_rgb(253, 193, 73);
const MUTED_COLOR: egui::Color32 = egui::Color32::from_rgb(150, 150, 150);
const CARD_COLOR: egui::Color32 = egui::Color32::from_rgb(45, 45, 45);

/// One checklist row, copied out so the orchestrator can be mutated while drawing
struct CurveRow {
    /// Column in the file; mnemonics may repeat
    column: usize,
    mnemonic: String,
    unit: String,
    description: String,
    points: usize,
    category: Option<CurveCategory>,
    selected: bool,
}

impl WellLogApp {
    /// Render the left-hand import panel
    pub fn render_import_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("LAS Import");
        ui.separator();

        if let LoadingState::Loading(filename) = &self.loading_state {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(format!("Loading {}...", filename));
            });
            ui.separator();
        }

        match self.import.state().clone() {
            ImportState::Idle => {
                if !self.is_loading() {
                    self.render_drop_zone(ui);
                }
            }
            ImportState::FileSelected => self.render_parse_failure(ui),
            ImportState::Importing => self.render_importing(ui),
            ImportState::Done(summary) => self.render_import_done(ui, &summary),
            ImportState::Parsed { .. } | ImportState::CurvesConfigured | ImportState::Failed(_) => {
                self.render_configure(ui)
            }
        }
    }

    fn pick_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("LAS Files", LAS_EXTENSIONS)
            .pick_file()
        {
            self.start_loading_file(path);
        }
    }

    fn render_drop_zone(&mut self, ui: &mut egui::Ui) {
        ui.add_space(20.0);

        egui::Frame::new()
            .fill(CARD_COLOR)
            .corner_radius(12.0)
            .inner_margin(egui::Margin::same(20))
            .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(70, 70, 70)))
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    let icon_size = 32.0;
                    let (icon_rect, _) = ui.allocate_exact_size(
                        egui::vec2(icon_size, icon_size),
                        egui::Sense::hover(),
                    );
                    draw_log_icon(ui, icon_rect.center(), icon_size, PRIMARY_COLOR);

                    ui.add_space(12.0);

                    let button = egui::Button::new(
                        egui::RichText::new("Select a file")
                            .color(egui::Color32::WHITE)
                            .size(14.0),
                    )
                    .fill(PRIMARY_COLOR)
                    .corner_radius(6.0);
                    let response = ui.add(button);
                    if response.hovered() {
                        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                    }
                    if response.clicked() {
                        self.pick_file();
                    }

                    ui.add_space(12.0);
                    ui.label(egui::RichText::new("or").color(MUTED_COLOR).size(12.0));
                    ui.add_space(8.0);
                    ui.label(
                        egui::RichText::new("Drop a LAS file here")
                            .color(egui::Color32::LIGHT_GRAY)
                            .size(13.0),
                    );
                    ui.add_space(12.0);
                    ui.label(
                        egui::RichText::new("LAS 1.2 / 2.0 (.las, .txt)")
                            .color(MUTED_COLOR)
                            .size(11.0),
                    );
                });
            });
    }

    /// File name, size and a close button. Returns true when closed.
    fn render_file_header(&mut self, ui: &mut egui::Ui) -> bool {
        let mut closed = false;
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(self.import.file_name()).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("x").on_hover_text("Close file").clicked() {
                    closed = true;
                }
            });
        });
        ui.label(
            egui::RichText::new(format_file_size(self.import.file_size()))
                .small()
                .color(MUTED_COLOR),
        );
        closed
    }

    fn render_parse_failure(&mut self, ui: &mut egui::Ui) {
        if self.render_file_header(ui) {
            self.close_file();
            return;
        }
        ui.add_space(8.0);

        let message = self
            .import
            .parse_error()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "Waiting for file...".to_string());
        egui::Frame::new()
            .fill(egui::Color32::from_rgb(60, 35, 35))
            .corner_radius(6.0)
            .inner_margin(egui::Margin::same(10))
            .show(ui, |ui| {
                ui.label(egui::RichText::new("Could not read this file").strong().color(ERROR_COLOR));
                ui.label(message);
            });

        ui.add_space(8.0);
        if ui.button("Choose another file").clicked() {
            self.pick_file();
        }
    }

    fn render_importing(&mut self, ui: &mut egui::Ui) {
        if self.render_file_header(ui) {
            self.close_file();
            return;
        }
        ui.add_space(12.0);
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(format!("Importing {}...", self.import.settings().run_name));
        });
        ui.add_space(8.0);
        if ui.button("Cancel").clicked() {
            self.close_file();
        }
    }

    fn render_import_done(&mut self, ui: &mut egui::Ui, summary: &ImportSummary) {
        ui.add_space(12.0);
        egui::Frame::new()
            .fill(CARD_COLOR)
            .corner_radius(8.0)
            .inner_margin(egui::Margin::same(12))
            .show(ui, |ui| {
                ui.label(
                    egui::RichText::new("Import complete")
                        .strong()
                        .color(egui::Color32::from_rgb(129, 199, 132)),
                );
                egui::Grid::new("import_summary")
                    .num_columns(2)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label("Log run");
                        ui.monospace(summary.log_run_id.to_string());
                        ui.end_row();
                        ui.label("Curves");
                        ui.label(summary.curves_imported.to_string());
                        ui.end_row();
                        ui.label("Data points");
                        ui.label(summary.data_points_imported.to_string());
                        ui.end_row();
                    });
            });

        ui.add_space(8.0);
        if ui.button("Import another file").clicked() {
            self.close_file();
        }
    }

    fn render_configure(&mut self, ui: &mut egui::Ui) {
        if self.render_file_header(ui) {
            self.close_file();
            return;
        }
        self.render_file_summary(ui);
        self.render_validation(ui);

        if let ImportState::Failed(message) = self.import.state().clone() {
            egui::Frame::new()
                .fill(egui::Color32::from_rgb(60, 35, 35))
                .corner_radius(6.0)
                .inner_margin(egui::Margin::same(8))
                .show(ui, |ui| {
                    ui.label(egui::RichText::new("Import failed").strong().color(ERROR_COLOR));
                    ui.label(message);
                    if ui.button("Retry").clicked() {
                        if let Err(e) = self.import.retry() {
                            self.show_toast_error(&e.to_string());
                        }
                    }
                });
        }

        ui.separator();
        self.render_run_settings(ui);
        ui.add_space(4.0);
        self.render_import_buttons(ui);
        ui.separator();
        self.render_curve_checklist(ui);
    }

    fn render_file_summary(&self, ui: &mut egui::Ui) {
        let Some(file) = self.import.file() else {
            return;
        };
        let well = file
            .well
            .well_name
            .as_deref()
            .or(file.well.uwi.as_deref())
            .unwrap_or("Unnamed well");
        let range = file
            .depth_range()
            .map(|(top, bottom)| {
                format_depth_range(top, bottom, file.depth_unit(), self.config.depth_display_unit)
            })
            .unwrap_or_else(|| "-".to_string());

        egui::Grid::new("file_summary")
            .num_columns(2)
            .spacing([12.0, 2.0])
            .show(ui, |ui| {
                ui.label(egui::RichText::new("Well").color(MUTED_COLOR));
                ui.label(well);
                ui.end_row();
                if let Some(company) = &file.well.company {
                    ui.label(egui::RichText::new("Company").color(MUTED_COLOR));
                    ui.label(company);
                    ui.end_row();
                }
                ui.label(egui::RichText::new("LAS").color(MUTED_COLOR));
                ui.label(format!(
                    "{}{}",
                    file.version.version,
                    if file.version.wrap { " (wrapped)" } else { "" }
                ));
                ui.end_row();
                ui.label(egui::RichText::new("Depth").color(MUTED_COLOR));
                ui.label(range);
                ui.end_row();
                ui.label(egui::RichText::new("Data").color(MUTED_COLOR));
                ui.label(format!("{} curves | {} rows", file.curves.len(), file.row_count()));
                ui.end_row();
            });
    }

    fn render_validation(&self, ui: &mut egui::Ui) {
        let Some(report) = self.import.report() else {
            return;
        };

        for error in &report.errors {
            ui.label(egui::RichText::new(format!("Error: {}", error)).color(ERROR_COLOR));
        }

        if !report.warnings.is_empty() {
            egui::CollapsingHeader::new(
                egui::RichText::new(format!("{} warning(s)", report.warnings.len()))
                    .color(WARNING_COLOR),
            )
            .id_salt("validation_warnings")
            .default_open(report.warnings.len() <= 3)
            .show(ui, |ui| {
                for warning in &report.warnings {
                    ui.label(egui::RichText::new(warning).small().color(WARNING_COLOR));
                }
            });
        }
    }

    fn render_run_settings(&mut self, ui: &mut egui::Ui) {
        let settings = self.import.settings_mut();

        egui::Grid::new("run_settings")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label("Well ID");
                ui.add(
                    egui::TextEdit::singleline(&mut settings.well_id)
                        .hint_text("Well asset id")
                        .desired_width(f32::INFINITY),
                );
                ui.end_row();

                ui.label("Run name");
                ui.add(
                    egui::TextEdit::singleline(&mut settings.run_name)
                        .desired_width(f32::INFINITY),
                );
                ui.end_row();

                ui.label("Log type");
                egui::ComboBox::from_id_salt("log_type")
                    .selected_text(settings.log_type.as_ref())
                    .show_ui(ui, |ui| {
                        for log_type in LogType::iter() {
                            ui.selectable_value(&mut settings.log_type, log_type, log_type.as_ref());
                        }
                    });
                ui.end_row();
            });
    }

    fn render_import_buttons(&mut self, ui: &mut egui::Ui) {
        let report_ok = self
            .import
            .report()
            .is_some_and(|r| r.errors.is_empty());
        let has_well = !self.import.settings().well_id.trim().is_empty();
        let can_import = report_ok && has_well && self.import.can_configure();

        let mut import = false;
        let mut save = false;
        ui.horizontal(|ui| {
            if ui
                .add_enabled(can_import, egui::Button::new("Import"))
                .clicked()
            {
                import = true;
            }
            if ui
                .button("Save as LAS...")
                .on_hover_text("Write the selected curves to a LAS 2.0 file")
                .clicked()
            {
                save = true;
            }
        });
        if report_ok && !has_well {
            ui.label(
                egui::RichText::new("Enter a well id to import")
                    .small()
                    .color(MUTED_COLOR),
            );
        }

        if import {
            self.start_import();
        }
        if save {
            self.save_selection_as_las();
        }
    }

    fn save_selection_as_las(&mut self) {
        let Some(subset) = self.import.selected_subset() else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter("LAS Files", &["las"])
            .set_file_name(self.import.file_name())
            .save_file()
        else {
            return;
        };
        match std::fs::write(&path, write_las(&subset)) {
            Ok(()) => self.show_toast_success(&format!("Saved {}", path.display())),
            Err(e) => self.show_toast_error(&format!("Failed to save: {}", e)),
        }
    }

    fn curve_rows(&self) -> Vec<CurveRow> {
        let Some(file) = self.import.file() else {
            return Vec::new();
        };
        let index = file.depth_index();
        file.curves
            .iter()
            .map(|curve| CurveRow {
                column: curve.column,
                mnemonic: curve.mnemonic.clone(),
                unit: curve.unit.clone(),
                description: describe(&curve.mnemonic, &curve.description).to_string(),
                points: file.data_point_count(&curve.mnemonic),
                category: match classify_mnemonic(&curve.mnemonic) {
                    Classification::Category(_) if Some(curve.column) == index => None,
                    Classification::Category(category) => Some(category),
                    Classification::Index => None,
                },
                selected: self.import.is_selected(&curve.mnemonic),
            })
            .collect()
    }

    fn render_curve_checklist(&mut self, ui: &mut egui::Ui) {
        let rows = self.curve_rows();
        let selected = rows.iter().filter(|r| r.selected).count();

        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Curves").strong());
            ui.label(
                egui::RichText::new(format!("{} / {}", selected, rows.len()))
                    .small()
                    .color(MUTED_COLOR),
            );
        });

        let mut changed = false;
        ui.horizontal(|ui| {
            if ui.small_button("Select all").clicked() {
                self.import.select_all();
                changed = true;
            }
            if ui.small_button("Deselect all").clicked() {
                self.import.deselect_all();
                changed = true;
            }
        });

        let mut toggled: Option<String> = None;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for row in &rows {
                    ui.push_id(row.column, |ui| {
                        ui.horizontal(|ui| {
                            let mut checked = row.selected;
                            let label = if row.unit.is_empty() {
                                row.mnemonic.clone()
                            } else {
                                format!("{} ({})", row.mnemonic, row.unit)
                            };
                            if ui.checkbox(&mut checked, label).changed() {
                                toggled = Some(row.mnemonic.clone());
                            }
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                match row.category {
                                    Some(category) => {
                                        draw_category_marker(ui, category);
                                    }
                                    None => {
                                        ui.label(egui::RichText::new("index").small().color(MUTED_COLOR));
                                    }
                                }
                            });
                        });
                        ui.indent("curve_detail", |ui| {
                            let detail = if row.points == 0 {
                                format!("{} | no data", row.description)
                            } else {
                                format!("{} | {} points", row.description, row.points)
                            };
                            ui.label(egui::RichText::new(detail).small().color(MUTED_COLOR));
                        });
                    });
                }
            });

        if let Some(mnemonic) = toggled {
            self.import.toggle_curve(&mnemonic);
            changed = true;
        }
        if changed {
            self.refresh_preview(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_rows_keep_columns_for_repeated_mnemonics() {
        let mut app = WellLogApp::default();
        let text = "~V\nVERS. 2.0:\n~W\nWELL. W-1:\n~C\nTIME.S\nGR.GAPI\nGR.GAPI\n~A\n0.0 50.0 51.0\n1.0 60.0 61.0\n";
        app.import.select_file("repeat.las", text.as_bytes()).unwrap();

        let rows = app.curve_rows();
        let columns: Vec<usize> = rows.iter().map(|r| r.column).collect();
        assert_eq!(columns, vec![0, 1, 2]);
        // The fallback index column is shown as the index, not as a data curve
        assert_eq!(rows[0].category, None);
        assert_eq!(rows[1].category, Some(CurveCategory::GammaRay));
    }
}
