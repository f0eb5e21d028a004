//! UI rendering modules for the well-log application.
//!
//! - `import_panel` - File selection, validation report, curve checklist and import controls
//! - `log_viewer` - Multi-track preview painted from the renderer's geometry
//! - `settings` - Storage service and display settings window
//! - `toast` - Toast notification system
//! - `icons` - Custom icon drawing utilities

pub mod icons;
pub mod import_panel;
pub mod log_viewer;
pub mod settings;
pub mod toast;
