//! Rotatable rectangular zones.
//!
//! A zone is stored by its centre, its extents and a rotation in radians, all
//! in world (plan) units. Handle positions are derived on demand; nothing here
//! caches canvas coordinates.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use zonecut_core::{EditError, Point};

/// Stable zone identifier. Never reused within an editor session.
pub type ZoneId = u64;

/// Handles on a selected zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneHandle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Rotate,
}

impl ZoneHandle {
    /// Hit-test order: corners first, then the rotate handle.
    pub const ALL: [ZoneHandle; 5] = [
        ZoneHandle::TopLeft,
        ZoneHandle::TopRight,
        ZoneHandle::BottomLeft,
        ZoneHandle::BottomRight,
        ZoneHandle::Rotate,
    ];

    pub const CORNERS: [ZoneHandle; 4] = [
        ZoneHandle::TopLeft,
        ZoneHandle::TopRight,
        ZoneHandle::BottomLeft,
        ZoneHandle::BottomRight,
    ];

    pub fn is_corner(&self) -> bool {
        !matches!(self, ZoneHandle::Rotate)
    }

    /// Corner diagonally across from this one; the rotate handle has none.
    pub fn opposite(&self) -> Option<ZoneHandle> {
        match self {
            ZoneHandle::TopLeft => Some(ZoneHandle::BottomRight),
            ZoneHandle::TopRight => Some(ZoneHandle::BottomLeft),
            ZoneHandle::BottomLeft => Some(ZoneHandle::TopRight),
            ZoneHandle::BottomRight => Some(ZoneHandle::TopLeft),
            ZoneHandle::Rotate => None,
        }
    }

    /// Unit direction of the corner in the zone's local frame (y down).
    fn local_sign(&self) -> (f64, f64) {
        match self {
            ZoneHandle::TopLeft => (-1.0, -1.0),
            ZoneHandle::TopRight => (1.0, -1.0),
            ZoneHandle::BottomLeft => (-1.0, 1.0),
            ZoneHandle::BottomRight => (1.0, 1.0),
            ZoneHandle::Rotate => (0.0, -1.0),
        }
    }
}

/// World positions of a zone's five handles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandlePositions {
    pub tl: Point,
    pub tr: Point,
    pub bl: Point,
    pub br: Point,
    pub rotate: Point,
}

impl HandlePositions {
    pub fn get(&self, handle: ZoneHandle) -> Point {
        match handle {
            ZoneHandle::TopLeft => self.tl,
            ZoneHandle::TopRight => self.tr,
            ZoneHandle::BottomLeft => self.bl,
            ZoneHandle::BottomRight => self.br,
            ZoneHandle::Rotate => self.rotate,
        }
    }

    /// Handles paired with their positions, in hit-test order.
    pub fn iter(&self) -> impl Iterator<Item = (ZoneHandle, Point)> + '_ {
        ZoneHandle::ALL.into_iter().map(move |h| (h, self.get(h)))
    }
}

/// A rotatable rectangular region of the container floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    /// Sequential display label, contiguous from "1".
    pub label: String,
    pub center: Point,
    pub width: f64,
    pub height: f64,
    /// Rotation in radians, normalised to (-pi, pi].
    #[serde(default)]
    pub rotation: f64,
}

impl Zone {
    pub fn new(
        id: ZoneId,
        label: impl Into<String>,
        center: Point,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            center,
            width,
            height,
            rotation: 0.0,
        }
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = normalize_angle(rotation);
        self
    }

    /// Maps a point in the zone's local (unrotated, centre-origin) frame to world.
    pub fn local_to_world(&self, local: Point) -> Point {
        self.center + local.rotated(self.rotation)
    }

    /// Maps a world point into the zone's local frame.
    pub fn world_to_local(&self, world: Point) -> Point {
        (world - self.center).rotated(-self.rotation)
    }

    fn local_corner(&self, handle: ZoneHandle) -> Point {
        let (sx, sy) = handle.local_sign();
        Point::new(sx * self.width / 2.0, sy * self.height / 2.0)
    }

    /// World position of a corner handle. The rotate handle maps to the middle
    /// of the top edge; use [`Zone::handle_positions`] for its offset position.
    pub fn corner(&self, handle: ZoneHandle) -> Point {
        self.local_to_world(self.local_corner(handle))
    }

    /// Outline in drawing order: top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            self.corner(ZoneHandle::TopLeft),
            self.corner(ZoneHandle::TopRight),
            self.corner(ZoneHandle::BottomRight),
            self.corner(ZoneHandle::BottomLeft),
        ]
    }

    /// Computes the world positions of all handles.
    ///
    /// # Arguments
    /// * `scale` - Current canvas pixels per world unit
    /// * `rotate_offset_px` - On-screen gap between the top edge and the rotate handle
    ///
    /// The rotate handle sits `rotate_offset_px` pixels beyond the top edge at
    /// any zoom level.
    pub fn handle_positions(&self, scale: f64, rotate_offset_px: f64) -> HandlePositions {
        let offset = if scale > 0.0 {
            rotate_offset_px / scale
        } else {
            0.0
        };
        HandlePositions {
            tl: self.corner(ZoneHandle::TopLeft),
            tr: self.corner(ZoneHandle::TopRight),
            bl: self.corner(ZoneHandle::BottomLeft),
            br: self.corner(ZoneHandle::BottomRight),
            rotate: self.local_to_world(Point::new(0.0, -self.height / 2.0 - offset)),
        }
    }

    /// Whether a world point lies strictly inside the zone.
    pub fn contains_point(&self, world: Point) -> bool {
        let local = self.world_to_local(world);
        local.x.abs() < self.width / 2.0 && local.y.abs() < self.height / 2.0
    }

    pub fn translate(&mut self, delta: Point) {
        self.center += delta;
    }

    /// Resizes by dragging a corner handle to `mouse`, keeping the opposite
    /// corner fixed in world space.
    ///
    /// Extents never drop below `min_extent`. When the mouse crosses over the
    /// pinned corner the zone flips to that side, so the named corners swap but
    /// the pinned point stays where it was. The rotate handle is ignored.
    pub fn resize(&mut self, handle: ZoneHandle, mouse: Point, min_extent: f64) {
        let Some(opposite) = handle.opposite() else {
            return;
        };
        let (sx, sy) = handle.local_sign();
        let pinned = self.local_corner(opposite);
        let local_mouse = self.world_to_local(mouse);

        let dx = clamp_extent(local_mouse.x - pinned.x, sx, min_extent);
        let dy = clamp_extent(local_mouse.y - pinned.y, sy, min_extent);

        let local_center = pinned + Point::new(dx / 2.0, dy / 2.0);
        self.center += local_center.rotated(self.rotation);
        self.width = dx.abs();
        self.height = dy.abs();
    }

    /// Points the rotate handle at `mouse`.
    ///
    /// A mouse straight above the centre (smaller `y`) gives rotation 0.
    /// The plan frame is y-down, so the offset from `atan2` is `+pi/2`; a
    /// y-up frame would use `-pi/2`.
    pub fn rotate_towards(&mut self, mouse: Point) {
        let d = mouse - self.center;
        if d.x == 0.0 && d.y == 0.0 {
            return;
        }
        self.rotation = normalize_angle(d.y.atan2(d.x) + FRAC_PI_2);
    }

    /// Checks the geometry invariants: finite values, positive extents.
    pub fn validate(&self) -> Result<(), EditError> {
        validate_geometry(self.center, self.width, self.height, self.rotation)
    }

    /// Floor area in square world units.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Volume of the zone extruded to `container_height`.
    pub fn volume(&self, container_height: f64) -> f64 {
        self.area() * container_height
    }
}

/// Signed extent with magnitude at least `min`, keeping its direction (or
/// `fallback_sign` when zero).
fn clamp_extent(delta: f64, fallback_sign: f64, min: f64) -> f64 {
    if delta.abs() >= min {
        return delta;
    }
    let sign = if delta != 0.0 {
        delta.signum()
    } else {
        fallback_sign
    };
    sign * min
}

/// Checks zone geometry as entered or loaded.
pub fn validate_geometry(
    center: Point,
    width: f64,
    height: f64,
    rotation: f64,
) -> Result<(), EditError> {
    if !center.x.is_finite() {
        return Err(EditError::InvalidGeometry {
            field: "center.x",
            value: center.x,
        });
    }
    if !center.y.is_finite() {
        return Err(EditError::InvalidGeometry {
            field: "center.y",
            value: center.y,
        });
    }
    if !(width.is_finite() && width > 0.0) {
        return Err(EditError::InvalidGeometry {
            field: "width",
            value: width,
        });
    }
    if !(height.is_finite() && height > 0.0) {
        return Err(EditError::InvalidGeometry {
            field: "height",
            value: height,
        });
    }
    if !rotation.is_finite() {
        return Err(EditError::InvalidGeometry {
            field: "rotation",
            value: rotation,
        });
    }
    Ok(())
}

/// Validates a persisted zone list and returns the id the next new zone gets.
///
/// Every zone must be valid, ids must be unique and the largest id must leave
/// room for at least one more.
pub fn validate_zone_list(zones: &[Zone]) -> Result<ZoneId, EditError> {
    let mut seen = HashSet::with_capacity(zones.len());
    for zone in zones {
        zone.validate()?;
        if !seen.insert(zone.id) {
            return Err(EditError::DuplicateZoneId(zone.id));
        }
    }
    match zones.iter().map(|z| z.id).max() {
        Some(max) => max.checked_add(1).ok_or(EditError::IdsExhausted(max)),
        None => Ok(1),
    }
}

/// Normalises an angle to (-pi, pi].
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % TAU;
    if a <= -PI {
        a += TAU;
    } else if a > PI {
        a -= TAU;
    }
    a
}
