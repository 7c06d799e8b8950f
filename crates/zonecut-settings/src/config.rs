//! Configuration and settings management for ZoneCut
//!
//! Provides configuration file handling, settings management, and validation.
//! Supports JSON and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Editor tolerances (handle hit radius, minimum zone size, view padding)
//! - Canvas defaults (drawing surface size)
//! - Export preferences (JSON formatting, default output name, recent files)

use crate::error::{SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use zonecut_core::constants;

/// Interaction tolerances used by the zone editor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Hit radius around a handle, in canvas pixels
    pub handle_hit_radius_px: f64,
    /// Distance between a zone's top edge and its rotate handle, in canvas pixels
    pub rotate_handle_offset_px: f64,
    /// Smallest zone a draw gesture commits, in world units per side
    pub min_zone_size_world: f64,
    /// Smallest draw gesture that counts as a drag, in canvas pixels per side
    pub min_zone_size_px: f64,
    /// Fraction of the canvas the container footprint occupies
    pub view_padding_factor: f64,
    /// Smallest extent a resize gesture may produce, in world units
    pub min_resize_extent: f64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            handle_hit_radius_px: constants::HANDLE_HIT_RADIUS_PX,
            rotate_handle_offset_px: constants::ROTATE_HANDLE_OFFSET_PX,
            min_zone_size_world: constants::MIN_ZONE_SIZE_WORLD,
            min_zone_size_px: constants::MIN_ZONE_SIZE_PX,
            view_padding_factor: constants::VIEW_PADDING_FACTOR,
            min_resize_extent: constants::MIN_RESIZE_EXTENT,
        }
    }
}

impl EditorSettings {
    /// Validate editor tolerances
    pub fn validate(&self) -> SettingsResult<()> {
        let positive = [
            ("editor.handle_hit_radius_px", self.handle_hit_radius_px),
            ("editor.rotate_handle_offset_px", self.rotate_handle_offset_px),
            ("editor.min_zone_size_world", self.min_zone_size_world),
            ("editor.min_zone_size_px", self.min_zone_size_px),
            ("editor.min_resize_extent", self.min_resize_extent),
        ];
        for (key, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::invalid(
                    key,
                    format!("must be positive, got {}", value),
                ));
            }
        }

        if !(self.view_padding_factor > 0.0 && self.view_padding_factor <= 1.0) {
            return Err(SettingsError::invalid(
                "editor.view_padding_factor",
                format!("must be in (0, 1], got {}", self.view_padding_factor),
            ));
        }

        Ok(())
    }
}

/// Drawing surface defaults
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Canvas width in device pixels
    pub width: f64,
    /// Canvas height in device pixels
    pub height: f64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        let (width, height) = constants::DEFAULT_CANVAS_SIZE;
        Self { width, height }
    }
}

/// Export preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Pretty-print JSON output
    pub pretty: bool,
    /// File name used when no output path is given
    pub default_file_name: String,
    /// Number of recent files to track
    pub recent_files_count: usize,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            pretty: true,
            default_file_name: "zones.json".to_string(),
            recent_files_count: 10,
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Recent layout files, most recent first
    pub recent_files: Vec<PathBuf>,
    /// Editor tolerances
    pub editor: EditorSettings,
    /// Canvas defaults
    pub canvas: CanvasSettings,
    /// Export preferences
    pub export: ExportSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config location: `<config_dir>/zonecut/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("zonecut").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load config from `path`, or the platform default path, falling back to
    /// built-in defaults when neither yields a valid file.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Ok(p) if p.exists() => p,
                _ => return Self::default(),
            },
        };

        match Self::load_from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    "Failed to load config from {}: {}; using defaults",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        tracing::info!("Saved config to {}", path.display());

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.editor.validate()?;

        if !(self.canvas.width > 0.0 && self.canvas.height > 0.0) {
            return Err(SettingsError::invalid(
                "canvas",
                format!(
                    "dimensions must be > 0, got {}x{}",
                    self.canvas.width, self.canvas.height
                ),
            ));
        }

        if self.export.default_file_name.trim().is_empty() {
            return Err(SettingsError::invalid(
                "export.default_file_name",
                "must not be empty",
            ));
        }

        Ok(())
    }

    /// Add file to recent files list
    pub fn add_recent_file(&mut self, path: PathBuf) {
        self.recent_files.retain(|f| f != &path);
        self.recent_files.insert(0, path);
        self.recent_files.truncate(self.export.recent_files_count);
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
