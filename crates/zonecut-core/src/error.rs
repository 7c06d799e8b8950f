//! Error handling for ZoneCut
//!
//! Provides error types for every layer of the zone editor:
//! - Container errors (malformed footprint configuration)
//! - Zone rejection (a zone that cannot be projected into the container)
//! - Edit errors (numeric-field edits against the editor state)
//!
//! All error types use `thiserror` for ergonomic error handling.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Container configuration error type
///
/// Raised when a container definition violates the footprint invariants.
/// These are caught when a configuration is loaded, before any zone exists.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContainerError {
    /// A dimension is zero, negative or not finite
    #[error("Container dimension '{field}' must be positive, got {value}")]
    NonPositiveDimension {
        /// The offending field name.
        field: &'static str,
        /// The value supplied.
        value: f64,
    },

    /// U-shape notch is as wide as the outer footprint
    #[error("U-shape gap width {gap} must be smaller than outer width {outer}")]
    GapTooWide { gap: f64, outer: f64 },

    /// U-shape notch is as deep as the outer footprint
    #[error("U-shape gap depth {gap} must be smaller than outer depth {outer}")]
    GapTooDeep { gap: f64, outer: f64 },

    /// T-shape stem wider than its cross bar
    #[error("T-shape stem width {stem} must not exceed cross width {cross}")]
    StemWiderThanCross { stem: f64, cross: f64 },

    /// T-shape cross bar does not fit along the stem
    #[error("T-shape cross bar (offset {offset}, depth {depth}) extends past stem depth {stem}")]
    CrossOutsideStem { offset: f64, depth: f64, stem: f64 },

    /// Container height is zero, negative or not finite
    #[error("Container height must be positive, got {0}")]
    NonPositiveHeight(f64),
}

/// Zone rejection
///
/// Raised by the world projection when a zone cannot be turned into a usable
/// 3D volume. Carries a stable reason code for caller-side feedback.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZoneRejected {
    /// The zone does not overlap the container's usable floor
    #[error("Zone is outside the container bounds")]
    OutsideContainer,

    /// The zone itself has no area
    #[error("Zone has no area")]
    NonPositiveArea,
}

impl ZoneRejected {
    /// Stable machine-readable reason code.
    pub fn reason(&self) -> &'static str {
        match self {
            ZoneRejected::OutsideContainer => "outside-container",
            ZoneRejected::NonPositiveArea => "non-positive-area",
        }
    }
}

/// Editor edit error type
///
/// Raised by direct (non-gesture) edits such as the zone list's numeric fields.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    /// No zone with the given id
    #[error("Zone {0} not found")]
    ZoneNotFound(u64),

    /// A geometry field is out of range
    #[error("Invalid zone {field}: {value}")]
    InvalidGeometry {
        /// The field name.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The editor is not in edit mode
    #[error("Editing is disabled")]
    EditingDisabled,

    /// Two zones in a restored list share an id
    #[error("Duplicate zone id {0}")]
    DuplicateZoneId(u64),

    /// The id space is used up
    #[error("No zone ids left after {0}")]
    IdsExhausted(u64),
}

/// Main error type for ZoneCut
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Container configuration error
    #[error(transparent)]
    Container(#[from] ContainerError),

    /// Zone rejected at projection time
    #[error(transparent)]
    Zone(#[from] ZoneRejected),

    /// Edit error
    #[error(transparent)]
    Edit(#[from] EditError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Check if this is a zone rejection
    pub fn is_zone_rejection(&self) -> bool {
        matches!(self, Error::Zone(_))
    }

    /// Check if this is a container configuration error
    pub fn is_container_error(&self) -> bool {
        matches!(self, Error::Container(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
