//! WellLog - LAS well-log import and multi-track log viewer written in Rust
//!
//! This library parses LAS 1.2/2.0 files, validates and classifies their
//! curves, lays them out as depth-aligned tracks and drives the import of
//! selected curves into a well-log storage service.
//!
//! ## Module Structure
//!
//! - [`parsers`] - LAS parsing, the file model and the LAS writer
//! - [`validate`] - Structural validation producing a report of errors and warnings
//! - [`classify`] - Mnemonic-based curve categories and descriptions
//! - [`tracks`] - Renderer-facing track and curve model
//! - [`render`] - Depth window, axis scales, drawable geometry and SVG output
//! - [`import`] - Import state machine from file selection to stored log run
//! - [`storage`] - Well-log storage service client
//! - [`config`] - Persisted application settings
//! - [`state`] - Shared constants and background-loading types
//! - [`units`] - Depth units and display formatting
//! - [`app`] - Main application state and eframe::App implementation
//! - [`ui`] - User interface components
//!   - `import_panel` - File selection, validation and curve checklist
//!   - `log_viewer` - Track preview with zoom, scroll and pan
//!   - `settings` - Menu bar and settings window
//!   - `toast` - Toast notification system
//!   - `icons` - Custom icon drawing utilities

pub mod app;
pub mod classify;
pub mod config;
pub mod import;
pub mod parsers;
pub mod render;
pub mod state;
pub mod storage;
pub mod tracks;
pub mod ui;
pub mod units;
pub mod validate;
