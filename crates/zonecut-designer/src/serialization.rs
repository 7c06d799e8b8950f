//! Serialization and deserialization for zone layout files.
//!
//! A layout file holds the container definition, the canvas size the zones
//! were drawn on and the zone list, as versioned JSON.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::container::ContainerConfig;
use crate::editor::EditorState;
use crate::zone::{validate_zone_list, Zone};
use zonecut_core::Size2;

/// Layout file format version
const FILE_FORMAT_VERSION: &str = "1.0";

/// Layout metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
}

/// Complete layout file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutFile {
    pub version: String,
    pub metadata: LayoutMetadata,
    pub container: ContainerConfig,
    pub canvas: Size2,
    #[serde(default)]
    pub zones: Vec<Zone>,
}

impl LayoutFile {
    /// Create a new empty layout
    pub fn new(name: impl Into<String>, container: ContainerConfig, canvas: Size2) -> Self {
        let now = Utc::now();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata: LayoutMetadata {
                name: name.into(),
                created: now,
                modified: now,
                description: String::new(),
            },
            container,
            canvas,
            zones: Vec::new(),
        }
    }

    /// Snapshot the zones of an editor into this layout
    pub fn capture(&mut self, state: &EditorState) {
        self.zones = state.zones().to_vec();
        self.metadata.modified = Utc::now();
    }

    /// Load the zones of this layout into an editor
    pub fn restore(&self, state: &mut EditorState) -> Result<()> {
        state
            .restore_zones(self.zones.clone())
            .context("Layout has invalid zones")
    }

    /// Parse a layout from JSON, validating the container and zones
    pub fn from_json(json: &str) -> Result<Self> {
        let layout: Self = serde_json::from_str(json).context("Failed to parse layout JSON")?;
        if layout.version != FILE_FORMAT_VERSION {
            bail!("Unsupported layout version {}", layout.version);
        }
        layout
            .container
            .validate()
            .context("Layout has an invalid container")?;
        validate_zone_list(&layout.zones).context("Layout has invalid zones")?;
        Ok(layout)
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        json.context("Failed to serialize layout")
    }

    /// Save layout to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json(true)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write layout file {}", path.display()))?;
        tracing::info!("Saved layout to {}", path.display());
        Ok(())
    }

    /// Load layout from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read layout file {}", path.display()))?;
        let layout = Self::from_json(&content)?;
        tracing::info!(
            "Loaded layout '{}' with {} zones from {}",
            layout.metadata.name,
            layout.zones.len(),
            path.display()
        );
        Ok(layout)
    }
}
