//! # ZoneCut Designer
//!
//! Interactive zone layout on a container floor plan.
//!
//! The crate is split leaf-first:
//! - [`container`]: footprint shapes (rectangle, U-shape, T-shape) and the
//!   container's 3D placement
//! - [`viewport`]: fitting the footprint into a canvas and converting between
//!   canvas pixels and world millimetres
//! - [`zone`]: rotatable rectangular zones with handle geometry and resize
//! - [`editor`]: the editor state and the pointer-driven interaction state machine
//! - [`projection`]: turning zones into clamped 3D world bounds
//!
//! Around the core sit layout persistence ([`serialization`]), the hand-off
//! payload for the packing service ([`handoff`]) and a canvas display list
//! with SVG output ([`scene`]).

pub mod container;
pub mod editor;
pub mod handoff;
pub mod projection;
pub mod scene;
pub mod serialization;
pub mod viewport;
pub mod zone;

pub use container::{ContainerConfig, ShapeKind, WorldTransform};
pub use editor::{
    DragMode, DragState, EditorEvent, EditorState, InteractionController, ZoneGeometry,
};
pub use handoff::{CuttingJob, ZoneHandoff};
pub use projection::{
    commit_zones, project, project_zone, CommitReport, ProjectedZone, RejectedZone,
    WorldZoneBounds,
};
pub use scene::{build_scene, Scene};
pub use serialization::LayoutFile;
pub use viewport::{CoordinateMapper, PixelRect, PixelScale};
pub use zone::{HandlePositions, Zone, ZoneHandle, ZoneId};

pub use zonecut_core::{Point, Point3, Size2, Size3, ZoneRejected};
pub use zonecut_settings::EditorSettings;
