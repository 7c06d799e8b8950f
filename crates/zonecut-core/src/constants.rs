//! Shared constants.
//!
//! Canvas-space values are in device pixels, world-space values in
//! millimetres.

/// Fraction of the canvas the container footprint occupies after fitting.
pub const VIEW_PADDING_FACTOR: f64 = 0.95;

/// Hit radius around a zone handle, in canvas pixels.
pub const HANDLE_HIT_RADIUS_PX: f64 = 8.0;

/// Distance between a zone's top edge and its rotate handle, in canvas pixels.
pub const ROTATE_HANDLE_OFFSET_PX: f64 = 25.0;

/// Smallest zone a draw gesture may commit, in world units per side.
pub const MIN_ZONE_SIZE_WORLD: f64 = 10.0;

/// Smallest draw gesture that counts as a drag, in canvas pixels per side.
pub const MIN_ZONE_SIZE_PX: f64 = 10.0;

/// Smallest width/height a resize gesture may produce, in world units.
pub const MIN_RESIZE_EXTENT: f64 = 1.0;

/// Footprint used when no container is loaded.
pub const FALLBACK_FOOTPRINT: (f64, f64) = (100.0, 100.0);

/// Default container height (Y axis).
pub const DEFAULT_CONTAINER_HEIGHT: f64 = 2400.0;

/// Default rectangular container (width X, depth Z).
pub const DEFAULT_RECT: (f64, f64) = (5800.0, 2300.0);

/// Default U-shaped container (outer width, outer depth, gap width, gap depth).
pub const DEFAULT_U_SHAPE: (f64, f64, f64, f64) = (6000.0, 3000.0, 2000.0, 1000.0);

/// Default T-shaped container (stem width, stem depth, cross width, cross depth, cross offset).
pub const DEFAULT_T_SHAPE: (f64, f64, f64, f64, f64) = (2000.0, 4000.0, 4000.0, 1000.0, 1500.0);

/// Default editing canvas size.
pub const DEFAULT_CANVAS_SIZE: (f64, f64) = (1200.0, 800.0);

/// Geometric comparison tolerance.
pub const EPSILON: f64 = 1e-9;
