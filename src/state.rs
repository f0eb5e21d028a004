//! Core application state types and constants.
//!
//! This module contains the palettes and layout constants shared by track
//! construction and rendering, and the types passed between the UI thread
//! and background file loading.

use std::path::PathBuf;

use crate::parsers::{LasFile, ParseError};

// ============================================================================
// Constants
// ============================================================================

/// Default curve colors, assigned round-robin per track build
pub const TRACK_COLORS: &[[u8; 3]] = &[
    [30, 136, 229],  // Blue
    [211, 47, 47],   // Red
    [56, 142, 60],   // Green
    [245, 124, 0],   // Orange
    [123, 31, 162],  // Purple
    [0, 121, 107],   // Teal
];

/// Colorblind-friendly palette (based on Wong's optimized palette)
/// Designed to be distinguishable for deuteranopia, protanopia, and tritanopia
pub const COLORBLIND_COLORS: &[[u8; 3]] = &[
    [0, 114, 178],   // Blue
    [230, 159, 0],   // Orange
    [0, 158, 115],   // Bluish green
    [204, 121, 167], // Reddish purple
    [86, 180, 233],  // Sky blue
    [213, 94, 0],    // Vermillion
    [240, 228, 66],  // Yellow
    [153, 153, 153], // Gray
];

/// Width of the depth axis lane in pixels
pub const DEPTH_TRACK_WIDTH: f64 = 60.0;

/// Track width used when a track does not set its own
pub const DEFAULT_TRACK_WIDTH: f64 = 150.0;

/// Horizontal padding inside a track, split evenly on both sides
pub const TRACK_MARGIN: f64 = 10.0;

/// Target number of depth grid divisions in the visible window
pub const IDEAL_DEPTH_STEPS: usize = 10;

/// Target number of value grid divisions for linear tracks without an explicit count
pub const IDEAL_VALUE_STEPS: usize = 5;

/// Window range multiplier for one zoom-in step
pub const ZOOM_IN_FACTOR: f64 = 0.8;

/// Window range multiplier for one zoom-out step
pub const ZOOM_OUT_FACTOR: f64 = 1.25;

/// Fraction of the window range moved by one scroll step
pub const SCROLL_FRACTION: f64 = 0.25;

/// File extensions offered by the file picker
pub const LAS_EXTENSIONS: &[&str] = &["las", "LAS", "txt"];

// ============================================================================
// Core Types
// ============================================================================

/// Result from background file loading operation
pub enum LoadResult {
    Parsed {
        path: PathBuf,
        size: u64,
        result: Result<Box<LasFile>, ParseError>,
    },
    Error(String),
}

/// Current state of file loading
pub enum LoadingState {
    /// No loading in progress
    Idle,
    /// Loading a file (contains filename being loaded)
    Loading(String),
}

/// Toast notification severity
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastType {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastType {
    /// Background color for the toast
    pub fn color(&self) -> [u8; 3] {
        match self {
            ToastType::Info => [71, 108, 155],
            ToastType::Success => [56, 142, 60],
            ToastType::Warning => [253, 193, 73],
            ToastType::Error => [191, 78, 48],
        }
    }

    /// Text color readable on [`color`](Self::color)
    pub fn text_color(&self) -> [u8; 3] {
        match self {
            ToastType::Warning => [30, 30, 30],
            _ => [255, 255, 255],
        }
    }
}
