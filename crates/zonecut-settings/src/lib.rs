//! ZoneCut Settings Crate
//!
//! Handles editor configuration: interaction tolerances, canvas defaults,
//! export preferences and the recent-files list.

pub mod config;
pub mod error;

pub use config::{CanvasSettings, Config, EditorSettings, ExportSettings};
pub use error::{SettingsError, SettingsResult};
