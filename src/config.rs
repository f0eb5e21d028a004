//! Application settings.
//!
//! The desktop app keeps these in eframe's persistent storage; the CLI can
//! read the same structure from a JSON file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::render::LogTrackRenderer;
use crate::state::{DEFAULT_TRACK_WIDTH, DEPTH_TRACK_WIDTH, IDEAL_DEPTH_STEPS};
use crate::storage::{HttpWellLogStore, LogType};
use crate::tracks::TrackOptions;
use crate::units::DepthUnit;

/// Key under which the settings are stored by eframe
pub const STORAGE_KEY: &str = "welllog_config";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the well-log storage service
    pub base_url: String,
    pub tenant_id: String,
    /// Bearer token sent with storage requests
    pub token: Option<String>,
    /// Log type preselected for new log runs
    pub default_log_type: LogType,
    pub viewport_height: f64,
    pub track_width: f64,
    pub depth_track_width: f64,
    pub ideal_depth_steps: usize,
    pub color_blind: bool,
    pub depth_display_unit: DepthUnit,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            tenant_id: String::new(),
            token: None,
            default_log_type: LogType::Composite,
            viewport_height: 600.0,
            track_width: DEFAULT_TRACK_WIDTH,
            depth_track_width: DEPTH_TRACK_WIDTH,
            ideal_depth_steps: IDEAL_DEPTH_STEPS,
            color_blind: false,
            depth_display_unit: DepthUnit::Metres,
        }
    }
}

impl AppConfig {
    /// Read settings from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    pub fn palette(&self) -> &'static [[u8; 3]] {
        if self.color_blind {
            crate::state::COLORBLIND_COLORS
        } else {
            crate::state::TRACK_COLORS
        }
    }

    pub fn track_options(&self) -> TrackOptions {
        TrackOptions {
            palette: self.palette(),
            track_width: self.track_width,
            ..Default::default()
        }
    }

    /// Apply layout settings to a renderer
    pub fn configure_renderer(&self, renderer: LogTrackRenderer) -> LogTrackRenderer {
        renderer.with_layout(self.depth_track_width, self.ideal_depth_steps)
    }

    pub fn store(&self) -> HttpWellLogStore {
        HttpWellLogStore::new(&self.base_url, self.token.clone())
    }
}
