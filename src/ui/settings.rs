//! Settings window UI.
//!
//! Storage service connection and display preferences. Changes apply
//! immediately and are persisted by eframe on exit.

use eframe::egui;
use strum::IntoEnumIterator;

use crate::app::WellLogApp;
use crate::storage::LogType;
use crate::units::DepthUnit;

impl WellLogApp {
    /// Top bar with the file and settings buttons
    pub fn render_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open...").clicked() && !self.is_loading() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("LAS Files", crate::state::LAS_EXTENSIONS)
                        .pick_file()
                    {
                        self.start_loading_file(path);
                    }
                }
                if ui.button("Settings").clicked() {
                    self.show_settings = !self.show_settings;
                }
            });
        });
    }

    /// Render the settings window when open
    pub fn render_settings_window(&mut self, ctx: &egui::Context) {
        if !self.show_settings {
            return;
        }

        let mut open = true;
        let before = self.config.clone();

        egui::Window::new("Settings")
            .open(&mut open)
            .resizable(false)
            .collapsible(false)
            .default_width(380.0)
            .show(ctx, |ui| {
                ui.label(egui::RichText::new("Storage service").strong());
                egui::Grid::new("service_settings")
                    .num_columns(2)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Base URL");
                        ui.text_edit_singleline(&mut self.config.base_url);
                        ui.end_row();

                        ui.label("Tenant ID");
                        ui.text_edit_singleline(&mut self.config.tenant_id);
                        ui.end_row();

                        ui.label("Token");
                        let mut token = self.config.token.clone().unwrap_or_default();
                        if ui
                            .add(egui::TextEdit::singleline(&mut token).password(true))
                            .changed()
                        {
                            self.config.token = Some(token).filter(|t| !t.is_empty());
                        }
                        ui.end_row();

                        ui.label("Default log type");
                        egui::ComboBox::from_id_salt("default_log_type")
                            .selected_text(self.config.default_log_type.as_ref())
                            .show_ui(ui, |ui| {
                                for log_type in LogType::iter() {
                                    ui.selectable_value(
                                        &mut self.config.default_log_type,
                                        log_type,
                                        log_type.as_ref(),
                                    );
                                }
                            });
                        ui.end_row();
                    });

                ui.add_space(8.0);
                ui.label(egui::RichText::new("Display").strong());
                egui::Grid::new("display_settings")
                    .num_columns(2)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Depth unit");
                        ui.horizontal(|ui| {
                            ui.radio_value(&mut self.config.depth_display_unit, DepthUnit::Metres, "m");
                            ui.radio_value(&mut self.config.depth_display_unit, DepthUnit::Feet, "ft");
                        });
                        ui.end_row();

                        ui.label("Track width");
                        ui.add(egui::Slider::new(&mut self.config.track_width, 80.0..=400.0).suffix(" px"));
                        ui.end_row();

                        ui.label("Depth grid lines");
                        ui.add(egui::Slider::new(&mut self.config.ideal_depth_steps, 2..=30));
                        ui.end_row();

                        ui.label("Palette");
                        ui.checkbox(&mut self.config.color_blind, "Color-blind friendly");
                        ui.end_row();
                    });
            });

        if !open {
            self.show_settings = false;
        }

        let layout_changed = before.track_width != self.config.track_width
            || before.ideal_depth_steps != self.config.ideal_depth_steps
            || before.color_blind != self.config.color_blind;
        if layout_changed {
            self.refresh_preview(false);
        }
    }
}
