#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;

use welllog::app::WellLogApp;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("WellLog - LAS Import")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "WellLog",
        options,
        Box::new(|cc| Ok(Box::new(WellLogApp::new(cc)))),
    )
}
