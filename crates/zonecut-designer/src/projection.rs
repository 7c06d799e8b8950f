//! Projection of zones into clamped 3D world bounds.
//!
//! A zone's on-screen rectangle is taken back into the container's plan frame,
//! extruded over the container's full height, placed in the world with the
//! container's transform and clamped against the container's world AABB. The
//! result is what the packing service receives; anything that collapses is
//! rejected instead of being emitted empty.
//!
//! Non-rectangular footprints are handled the same way as the editor always
//! has: the box is clamped per axis against the container's outer bounds. A
//! zone is refused outright when the part of it inside the footprint's
//! bounding box is empty, or centred in a notch or beside a stem. Corners may
//! therefore still overhang a cut-out.

use serde::{Deserialize, Serialize};
use zonecut_core::{Aabb3, Point, Point3, Size3, ZoneRejected};

use crate::container::ContainerConfig;
use crate::viewport::{PixelRect, PixelScale};
use crate::zone::{Zone, ZoneId};

/// Axis-aligned world volume of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldZoneBounds {
    pub min: Point3,
    pub size: Size3,
}

impl WorldZoneBounds {
    pub fn from_aabb(aabb: &Aabb3) -> Self {
        Self {
            min: aabb.min,
            size: aabb.size(),
        }
    }

    pub fn max(&self) -> Point3 {
        Point3::new(
            self.min.x + self.size.width,
            self.min.y + self.size.height,
            self.min.z + self.size.depth,
        )
    }

    pub fn volume(&self) -> f64 {
        self.size.width * self.size.height * self.size.depth
    }
}

/// Projects a canvas rectangle into the container's world volume.
///
/// # Arguments
/// * `rect` - Zone rectangle in canvas pixels (top-left anchored)
/// * `scale` - Canvas mapping the rectangle was drawn with
/// * `container` - Footprint, height and world placement of the container
/// * `container_aabb` - The container's world AABB, as measured by the scene
///
/// # Returns
/// The clamped bounds, or why the zone cannot be used.
pub fn project(
    rect: &PixelRect,
    scale: &PixelScale,
    container: &ContainerConfig,
    container_aabb: &Aabb3,
) -> Result<WorldZoneBounds, ZoneRejected> {
    let finite = [rect.x, rect.y, rect.width, rect.height]
        .iter()
        .all(|v| v.is_finite());
    if !finite || rect.width <= 0.0 || rect.height <= 0.0 {
        return Err(ZoneRejected::NonPositiveArea);
    }

    let top_left = scale.canvas_to_world(Point::new(rect.x, rect.y));
    let width = scale.px_to_world(rect.width);
    let depth = scale.px_to_world(rect.height);

    let bbox = container.bounding_box();
    let plan_min = Point::new(top_left.x.max(0.0), top_left.y.max(0.0));
    let plan_max = Point::new(
        (top_left.x + width).min(bbox.width),
        (top_left.y + depth).min(bbox.height),
    );
    if plan_max.x <= plan_min.x || plan_max.y <= plan_min.y {
        return Err(ZoneRejected::OutsideContainer);
    }
    let inside_center = Point::new(
        (plan_min.x + plan_max.x) / 2.0,
        (plan_min.y + plan_max.y) / 2.0,
    );
    if !container.shape.contains_point(inside_center) {
        return Err(ZoneRejected::OutsideContainer);
    }

    let half_height = container.height / 2.0;
    let min_x = top_left.x - bbox.width / 2.0;
    let min_z = top_left.y - bbox.height / 2.0;
    let local = Aabb3::new(
        Point3::new(min_x, -half_height, min_z),
        Point3::new(min_x + width, half_height, min_z + depth),
    );
    let world = container.world_transform.transform_aabb(&local);

    let c = container_aabb;
    let clamped = Aabb3::new(
        Point3::new(
            world.min.x.max(c.min.x),
            world.min.y.max(c.min.y),
            world.min.z.max(c.min.z),
        ),
        Point3::new(
            world.max.x.min(c.max.x),
            world.max.y.max(c.max.y),
            world.max.z.min(c.max.z),
        ),
    );

    let size = clamped.size();
    if size.width <= 0.0 || size.depth <= 0.0 {
        return Err(ZoneRejected::OutsideContainer);
    }
    Ok(WorldZoneBounds::from_aabb(&clamped))
}

/// Canvas rectangle covering a zone's rotated outline.
pub fn zone_pixel_rect(zone: &Zone, scale: &PixelScale) -> PixelRect {
    let corners = zone.corners().map(|c| scale.world_to_canvas(c));
    PixelRect::bounding(&corners)
}

/// Projects a zone through its on-screen rectangle.
pub fn project_zone(
    zone: &Zone,
    scale: &PixelScale,
    container: &ContainerConfig,
    container_aabb: &Aabb3,
) -> Result<WorldZoneBounds, ZoneRejected> {
    project(&zone_pixel_rect(zone, scale), scale, container, container_aabb)
}

/// A zone accepted for packing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedZone {
    pub id: ZoneId,
    pub label: String,
    pub bounds: WorldZoneBounds,
    /// The zone's plan geometry at commit time.
    pub zone: Zone,
}

/// A zone refused at commit time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedZone {
    pub id: ZoneId,
    pub label: String,
    pub reason: ZoneRejected,
    pub message: String,
}

/// Outcome of projecting every zone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommitReport {
    pub accepted: Vec<ProjectedZone>,
    pub rejected: Vec<RejectedZone>,
}

impl CommitReport {
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Projects every zone, keeping zone order. Rejections do not stop the others.
pub fn commit_zones(
    zones: &[Zone],
    scale: &PixelScale,
    container: &ContainerConfig,
    container_aabb: &Aabb3,
) -> CommitReport {
    let mut report = CommitReport::default();
    for zone in zones {
        match project_zone(zone, scale, container, container_aabb) {
            Ok(bounds) => report.accepted.push(ProjectedZone {
                id: zone.id,
                label: zone.label.clone(),
                bounds,
                zone: zone.clone(),
            }),
            Err(reason) => {
                tracing::warn!("Zone {} rejected: {}", zone.label, reason);
                report.rejected.push(RejectedZone {
                    id: zone.id,
                    label: zone.label.clone(),
                    reason,
                    message: reason.to_string(),
                });
            }
        }
    }
    tracing::info!(
        "Committed {} zones, {} rejected",
        report.accepted.len(),
        report.rejected.len()
    );
    report
}
