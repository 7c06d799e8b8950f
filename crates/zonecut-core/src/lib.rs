//! # ZoneCut Core
//!
//! Core types, constants, and error definitions shared by the ZoneCut crates.
//! Provides the plain geometric values that flow between the designer's
//! components (2D points, sizes, 3D boxes) and the error taxonomy used when a
//! container or a zone cannot be accepted.

pub mod constants;
pub mod error;
pub mod types;

pub use error::{ContainerError, EditError, Error, Result, ZoneRejected};
pub use types::{Aabb3, Point, Point3, Size2, Size3};
