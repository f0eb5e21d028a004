//! Main application state and eframe::App implementation.
//!
//! The UI itself lives in the `ui` modules as further `impl WellLogApp`
//! blocks; this file owns the state, background file loading and the
//! frame loop.

use eframe::egui;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use crate::config::{AppConfig, STORAGE_KEY};
use crate::import::{ImportOrchestrator, ImportState};
use crate::parsers::{load_las_file, LoadError};
use crate::render::LogTrackRenderer;
use crate::state::{LoadResult, LoadingState, ToastType};
use crate::storage::WellLogStore;

/// Main application state
pub struct WellLogApp {
    /// Persisted settings
    pub(crate) config: AppConfig,
    /// Import workflow for the current file
    pub(crate) import: ImportOrchestrator,
    /// Preview of the selected curves, present once a file is parsed
    pub(crate) renderer: Option<LogTrackRenderer>,
    /// Toast messages for user feedback
    pub(crate) toast_message: Option<(String, Instant, ToastType)>,
    /// Track dropped files to prevent duplicates
    pub(crate) last_drop_time: Option<Instant>,
    /// Channel for receiving parsed files from the background thread
    pub(crate) load_receiver: Option<Receiver<LoadResult>>,
    pub(crate) loading_state: LoadingState,
    /// Depth under the pointer in the log viewer
    pub(crate) hover_depth: Option<f64>,
    pub(crate) show_settings: bool,
}

impl Default for WellLogApp {
    fn default() -> Self {
        Self::with_config(AppConfig::default())
    }
}

impl WellLogApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config: AppConfig = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, STORAGE_KEY))
            .unwrap_or_default();
        tracing::info!("Storage service at {}", config.base_url);
        Self::with_config(config)
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self {
            import: ImportOrchestrator::new(config.default_log_type),
            config,
            renderer: None,
            toast_message: None,
            last_drop_time: None,
            load_receiver: None,
            loading_state: LoadingState::Idle,
            hover_depth: None,
            show_settings: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.loading_state, LoadingState::Loading(_))
    }

    // ========================================================================
    // File loading
    // ========================================================================

    /// Start loading a file in the background
    pub fn start_loading_file(&mut self, path: PathBuf) {
        if self.import.is_busy() {
            self.show_toast_warning("Wait for the current import to finish");
            return;
        }

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        self.loading_state = LoadingState::Loading(filename);

        let (sender, receiver): (Sender<LoadResult>, Receiver<LoadResult>) = channel();
        self.load_receiver = Some(receiver);

        thread::spawn(move || {
            let result = Self::load_file_sync(path);
            let _ = sender.send(result);
        });
    }

    /// Read and parse a file (runs in background thread)
    fn load_file_sync(path: PathBuf) -> LoadResult {
        let size = match std::fs::metadata(&path) {
            Ok(meta) => meta.len(),
            Err(e) => return LoadResult::Error(format!("Failed to read file: {}", e)),
        };

        let result = match load_las_file(&path) {
            Ok(file) => Ok(Box::new(file)),
            Err(LoadError::Parse(e)) => Err(e),
            Err(e) => return LoadResult::Error(e.to_string()),
        };

        LoadResult::Parsed { path, size, result }
    }

    /// Check for completed background loads
    fn check_loading_complete(&mut self) {
        let Some(receiver) = &self.load_receiver else {
            return;
        };
        let result = match receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                self.load_receiver = None;
                self.loading_state = LoadingState::Idle;
                tracing::error!("File loader stopped without a result");
                self.show_toast_error("Loading failed unexpectedly");
                return;
            }
        };
        self.load_receiver = None;
        self.loading_state = LoadingState::Idle;

        match result {
            LoadResult::Parsed { path, size, result } => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| "Unknown".to_string());
                if let Err(e) = self.import.begin_file(&name, size) {
                    self.show_toast_error(&e.to_string());
                    return;
                }
                match result {
                    Ok(file) => self.accept_file(*file),
                    Err(e) => {
                        let error = self.import.reject_parsed(e);
                        self.renderer = None;
                        self.show_toast_error(&error.to_string());
                    }
                }
            }
            LoadResult::Error(e) => {
                tracing::error!("{}", e);
                self.show_toast_error(&e);
            }
        }
    }

    fn accept_file(&mut self, file: crate::parsers::LasFile) {
        let counts = self
            .import
            .accept_parsed(file)
            .map(|report| (report.errors.len(), report.warnings.len()));
        let (errors, warnings) = match counts {
            Ok(counts) => counts,
            Err(e) => {
                self.show_toast_error(&e.to_string());
                return;
            }
        };
        self.refresh_preview(false);

        if errors > 0 {
            self.show_toast_error(&format!("File has {} blocking problem(s)", errors));
        } else if warnings > 0 {
            self.show_toast_warning(&format!("File loaded with {} warning(s)", warnings));
        } else {
            self.show_toast_success("File loaded successfully");
        }
    }

    // ========================================================================
    // Preview
    // ========================================================================

    /// Rebuild the preview tracks from the current curve selection.
    /// With `keep_window` the zoom and scroll position survive.
    pub fn refresh_preview(&mut self, keep_window: bool) {
        let Some(file) = self.import.file() else {
            return;
        };
        let tracks = self.import.preview_tracks(&self.config.track_options());

        if keep_window {
            if let Some(renderer) = &mut self.renderer {
                renderer.set_tracks(tracks);
                return;
            }
        }

        let Some((top, bottom)) = file.depth_range() else {
            self.renderer = None;
            return;
        };
        let renderer = LogTrackRenderer::new(
            tracks,
            top,
            bottom,
            file.depth_unit(),
            self.config.viewport_height,
        );
        self.renderer = Some(self.config.configure_renderer(renderer));
    }

    /// Drop the current file and preview
    pub fn close_file(&mut self) {
        self.import.cancel();
        self.renderer = None;
        self.hover_depth = None;
    }

    // ========================================================================
    // Import
    // ========================================================================

    pub fn start_import(&mut self) {
        if let Err(e) = self.import.configure() {
            self.show_toast_error(&e.to_string());
            return;
        }
        let store: Arc<dyn WellLogStore> = Arc::new(self.config.store());
        let tenant_id = self.config.tenant_id.clone();
        if let Err(e) = self.import.start_import(store, &tenant_id) {
            self.show_toast_error(&e.to_string());
        }
    }

    fn check_import_complete(&mut self) {
        if !self.import.poll() {
            return;
        }
        match self.import.state().clone() {
            ImportState::Done(summary) => self.show_toast_success(&format!(
                "Imported {} curves ({} points)",
                summary.curves_imported, summary.data_points_imported
            )),
            ImportState::Failed(message) => self.show_toast_error(&message),
            _ => {}
        }
    }

    // ========================================================================
    // Toasts
    // ========================================================================

    pub fn show_toast_with_type(&mut self, message: &str, toast_type: ToastType) {
        self.toast_message = Some((message.to_string(), Instant::now(), toast_type));
    }

    pub fn show_toast_success(&mut self, message: &str) {
        self.show_toast_with_type(message, ToastType::Success);
    }

    pub fn show_toast_warning(&mut self, message: &str) {
        self.show_toast_with_type(message, ToastType::Warning);
    }

    pub fn show_toast_error(&mut self, message: &str) {
        self.show_toast_with_type(message, ToastType::Error);
    }

    /// Handle file drops
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        if self.is_loading() {
            return;
        }

        // Debounce file drops (5 second window)
        if let Some(last_drop) = self.last_drop_time {
            if last_drop.elapsed().as_secs() < 5 {
                return;
            }
        }

        let dropped_files: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });

        if let Some(path) = dropped_files.into_iter().next() {
            self.last_drop_time = Some(Instant::now());
            self.start_loading_file(path);
        }
    }
}

impl eframe::App for WellLogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_loading_complete();
        self.check_import_complete();
        self.handle_dropped_files(ctx);

        ctx.set_visuals(egui::Visuals::dark());

        // Keep the spinner animated
        if self.is_loading() || self.import.is_busy() {
            ctx.request_repaint();
        }

        self.render_toast(ctx);
        self.render_menu_bar(ctx);
        self.render_settings_window(ctx);

        egui::SidePanel::left("import_panel")
            .default_width(300.0)
            .min_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                self.render_import_panel(ui);
            });

        egui::TopBottomPanel::bottom("status_bar")
            .resizable(false)
            .show(ctx, |ui| {
                self.render_status_bar(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_log_viewer(ui);
        });
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, STORAGE_KEY, &self.config);
    }
}
