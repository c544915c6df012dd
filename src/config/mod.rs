// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[display]` - Zoom step
//! - `[markers]` - Defaults applied to newly added markers and label rendering
//! - `[adjustments]` - Initial image adjustments (mirror, rotation, zoom, brightness, contrast)
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `MARKLENS_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use marklens::config::{self, Config};
//!
//! let mut config = config::load().unwrap_or_default();
//! config.markers.label_font_size = Some(18.0);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::editing::ZoomPercent;
use crate::error::{Error, Result};
use crate::markers::{MarkerColor, MarkerDefaults, ShapeKind};
use crate::media::ImageAdjustments;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "MarkLens";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "MARKLENS_CONFIG_DIR";

// =============================================================================
// Section Structs
// =============================================================================

/// Display and viewer settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    /// Zoom step percentage for zoom in/out.
    #[serde(default = "default_zoom_step", skip_serializing_if = "Option::is_none")]
    pub zoom_step: Option<f32>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            zoom_step: default_zoom_step(),
        }
    }
}

/// Defaults for newly added markers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarkersConfig {
    /// Label font size in marker-space units.
    #[serde(
        default = "default_label_font_size",
        skip_serializing_if = "Option::is_none"
    )]
    pub label_font_size: Option<f32>,

    /// Color of new markers as `#rrggbb`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_color: Option<String>,

    /// Shape of new box markers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_shape: Option<ShapeKind>,

    /// Width of new box markers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_width: Option<f32>,

    /// Height of new box markers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_height: Option<f32>,
}

impl Default for MarkersConfig {
    fn default() -> Self {
        Self {
            label_font_size: default_label_font_size(),
            default_color: Some(DEFAULT_MARKER_COLOR.to_string()),
            default_shape: Some(ShapeKind::default()),
            default_width: Some(DEFAULT_MARKER_WIDTH),
            default_height: Some(DEFAULT_MARKER_HEIGHT),
        }
    }
}

impl MarkersConfig {
    /// Resolves the configured values into marker defaults.
    ///
    /// Unparseable colors and negative or non-finite sizes fall back to the
    /// built-in defaults.
    #[must_use]
    pub fn marker_defaults(&self) -> MarkerDefaults {
        let fallback = MarkerDefaults::default();
        let color = self
            .default_color
            .as_deref()
            .and_then(MarkerColor::from_hex)
            .unwrap_or(fallback.color);
        let width = self
            .default_width
            .filter(|w| w.is_finite() && *w >= 0.0)
            .unwrap_or(fallback.width);
        let height = self
            .default_height
            .filter(|h| h.is_finite() && *h >= 0.0)
            .unwrap_or(fallback.height);

        MarkerDefaults {
            label: fallback.label,
            color,
            shape: self.default_shape.unwrap_or(fallback.shape),
            width,
            height,
        }
    }

    /// Returns the label font size, falling back to the default.
    #[must_use]
    pub fn font_size(&self) -> f32 {
        self.label_font_size
            .filter(|size| size.is_finite() && *size > 0.0)
            .unwrap_or(DEFAULT_LABEL_FONT_SIZE)
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    /// Display and viewer settings.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Marker defaults.
    #[serde(default)]
    pub markers: MarkersConfig,

    /// Initial image adjustments.
    #[serde(default)]
    pub adjustments: ImageAdjustments,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_zoom_step() -> Option<f32> {
    Some(DEFAULT_ZOOM_STEP_PERCENT)
}

fn default_label_font_size() -> Option<f32> {
    Some(DEFAULT_LABEL_FONT_SIZE)
}

impl DisplayConfig {
    /// Applies one zoom step (in or out) to `zoom`.
    #[must_use]
    pub fn step_zoom(&self, zoom: ZoomPercent, zoom_in: bool) -> ZoomPercent {
        let step = self.zoom_step.unwrap_or(DEFAULT_ZOOM_STEP_PERCENT);
        if zoom_in {
            zoom.zoom_in(step)
        } else {
            zoom.zoom_out(step)
        }
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path, honoring `MARKLENS_CONFIG_DIR`.
fn get_default_config_path() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(ENV_CONFIG_DIR).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(dir).join(CONFIG_FILE));
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load / Save
// =============================================================================

/// Loads the configuration from the default path, or defaults when absent.
pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Loads configuration from a specific path.
///
/// A file that is not valid TOML loads as the default configuration.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str::<Config>(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "invalid settings file, using defaults");
            Ok(Config::default())
        }
    }
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}
