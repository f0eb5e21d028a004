//! Toast notification system for user feedback.

use eframe::egui;

use crate::app::WellLogApp;

/// Seconds a toast stays on screen
const TOAST_SECONDS: u64 = 3;

impl WellLogApp {
    /// Render toast notifications in the bottom right corner
    pub fn render_toast(&mut self, ctx: &egui::Context) {
        let expired = match &self.toast_message {
            Some((_, time, _)) => time.elapsed().as_secs() >= TOAST_SECONDS,
            None => return,
        };
        if expired {
            self.toast_message = None;
            return;
        }
        let Some((message, _, toast_type)) = &self.toast_message else {
            return;
        };

        let [r, g, b] = toast_type.color();
        let [tr, tg, tb] = toast_type.text_color();
        let margin = 20.0;

        egui::Area::new(egui::Id::new("toast"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-margin, -margin))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(egui::Color32::from_rgb(r, g, b))
                    .corner_radius(8.0)
                    .inner_margin(egui::Margin::symmetric(16, 12))
                    .shadow(egui::Shadow {
                        offset: [2, 2],
                        blur: 8,
                        spread: 0,
                        color: egui::Color32::from_black_alpha(60),
                    })
                    .show(ui, |ui| {
                        ui.set_max_width(360.0);
                        ui.label(
                            egui::RichText::new(message.as_str())
                                .color(egui::Color32::from_rgb(tr, tg, tb))
                                .size(14.0),
                        );
                    });
            });

        // Keep repainting so the toast disappears on time
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}
