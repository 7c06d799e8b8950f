//! # ZoneCut
//!
//! Container floor-plan zone editor. An operator draws rotatable rectangular
//! zones over a container's footprint; each zone is then projected into a
//! clamped 3D world volume for the downstream packing step.
//!
//! ## Architecture
//!
//! ZoneCut is organized as a workspace with multiple crates:
//!
//! 1. **zonecut-core** - Shared geometry primitives, constants, error types
//! 2. **zonecut-settings** - Editor and application configuration
//! 3. **zonecut-designer** - Container shapes, canvas mapping, zone editing,
//!    world projection, layout files and the packer hand-off
//! 4. **zonecut** - This crate: logging setup and the command-line tool
//!
//! ## Features
//!
//! - **Container Footprints**: rectangle, U-shape and T-shape with validation
//! - **Canvas Mapping**: aspect-preserving fit with padding, exact inverse
//! - **Zone Editing**: draw, move, corner resize and rotate with handles
//! - **Projection**: per-zone world AABB clamped to the container volume
//! - **Headless Use**: SVG rendering and scripted event replay

pub mod cli;

pub use zonecut_designer as designer;
pub use zonecut_settings as settings;

pub use zonecut_core::{
    Aabb3, ContainerError, EditError, Error, Point, Point3, Result, Size2, Size3, ZoneRejected,
};

pub use zonecut_designer::{
    build_scene, commit_zones, project, project_zone, CommitReport, ContainerConfig,
    CoordinateMapper, DragMode, EditorEvent, EditorState, InteractionController, LayoutFile,
    PixelRect, PixelScale, ProjectedZone, RejectedZone, Scene, ShapeKind, WorldTransform,
    WorldZoneBounds, Zone, ZoneHandle, ZoneHandoff, ZoneId,
};

pub use zonecut_settings::{Config, EditorSettings, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty console output on stderr, keeping stdout free for command output
/// - RUST_LOG environment variable support
/// - INFO as the default level
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
