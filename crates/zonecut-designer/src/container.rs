//! Container footprint shapes and placement.
//!
//! A container's usable floor is one of a closed set of footprints. Every
//! footprint lives in a local plan frame with the origin at the top-left of its
//! bounding box, `x` along the container width and `y` along its depth.
//!
//! The configuration reads and writes the flat JSON used by the container
//! definition step:
//!
//! ```json
//! { "shape": "u_shape", "outerWidthX": 6000, "outerDepthZ": 3000,
//!   "gapWidthX": 2000, "gapDepthZ": 1000, "heightY": 2400 }
//! ```

use nalgebra::{Isometry3, Point3 as NPoint3, Translation3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};
use zonecut_core::constants::{
    DEFAULT_CONTAINER_HEIGHT, DEFAULT_RECT, DEFAULT_T_SHAPE, DEFAULT_U_SHAPE, EPSILON,
};
use zonecut_core::{Aabb3, ContainerError, Point, Point3, Size2};

/// Footprint of a container's usable floor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape")]
pub enum ShapeKind {
    /// Plain rectangle.
    #[serde(rename = "rect")]
    Rect {
        #[serde(rename = "widthX")]
        width: f64,
        #[serde(rename = "depthZ")]
        depth: f64,
    },
    /// Rectangle with a centered notch cut from its far long edge.
    #[serde(rename = "u_shape")]
    UShape {
        #[serde(rename = "outerWidthX")]
        outer_width: f64,
        #[serde(rename = "outerDepthZ")]
        outer_depth: f64,
        #[serde(rename = "gapWidthX")]
        gap_width: f64,
        #[serde(rename = "gapDepthZ")]
        gap_depth: f64,
    },
    /// A centered stem running the full depth, crossed by a full-width bar
    /// starting `cross_offset` from the near end.
    #[serde(rename = "t_shape")]
    TShape {
        #[serde(rename = "stemWidthX")]
        stem_width: f64,
        #[serde(rename = "stemDepthZ")]
        stem_depth: f64,
        #[serde(rename = "crossWidthX")]
        cross_width: f64,
        #[serde(rename = "crossDepthZ")]
        cross_depth: f64,
        #[serde(rename = "crossOffsetZ")]
        cross_offset: f64,
    },
}

impl ShapeKind {
    pub fn default_rect() -> Self {
        let (width, depth) = DEFAULT_RECT;
        ShapeKind::Rect { width, depth }
    }

    pub fn default_u_shape() -> Self {
        let (outer_width, outer_depth, gap_width, gap_depth) = DEFAULT_U_SHAPE;
        ShapeKind::UShape {
            outer_width,
            outer_depth,
            gap_width,
            gap_depth,
        }
    }

    pub fn default_t_shape() -> Self {
        let (stem_width, stem_depth, cross_width, cross_depth, cross_offset) = DEFAULT_T_SHAPE;
        ShapeKind::TShape {
            stem_width,
            stem_depth,
            cross_width,
            cross_depth,
            cross_offset,
        }
    }

    /// Wire name of the shape kind.
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Rect { .. } => "rect",
            ShapeKind::UShape { .. } => "u_shape",
            ShapeKind::TShape { .. } => "t_shape",
        }
    }

    /// Checks the footprint invariants.
    pub fn validate(&self) -> Result<(), ContainerError> {
        match *self {
            ShapeKind::Rect { width, depth } => {
                positive("widthX", width)?;
                positive("depthZ", depth)?;
            }
            ShapeKind::UShape {
                outer_width,
                outer_depth,
                gap_width,
                gap_depth,
            } => {
                positive("outerWidthX", outer_width)?;
                positive("outerDepthZ", outer_depth)?;
                positive("gapWidthX", gap_width)?;
                positive("gapDepthZ", gap_depth)?;
                if gap_width >= outer_width {
                    return Err(ContainerError::GapTooWide {
                        gap: gap_width,
                        outer: outer_width,
                    });
                }
                if gap_depth >= outer_depth {
                    return Err(ContainerError::GapTooDeep {
                        gap: gap_depth,
                        outer: outer_depth,
                    });
                }
            }
            ShapeKind::TShape {
                stem_width,
                stem_depth,
                cross_width,
                cross_depth,
                cross_offset,
            } => {
                positive("stemWidthX", stem_width)?;
                positive("stemDepthZ", stem_depth)?;
                positive("crossWidthX", cross_width)?;
                positive("crossDepthZ", cross_depth)?;
                if stem_width > cross_width {
                    return Err(ContainerError::StemWiderThanCross {
                        stem: stem_width,
                        cross: cross_width,
                    });
                }
                if !cross_offset.is_finite()
                    || cross_offset < 0.0
                    || cross_offset + cross_depth > stem_depth
                {
                    return Err(ContainerError::CrossOutsideStem {
                        offset: cross_offset,
                        depth: cross_depth,
                        stem: stem_depth,
                    });
                }
            }
        }
        Ok(())
    }

    /// Outer extents of the footprint.
    pub fn bounding_box(&self) -> Size2 {
        match *self {
            ShapeKind::Rect { width, depth } => Size2::new(width, depth),
            ShapeKind::UShape {
                outer_width,
                outer_depth,
                ..
            } => Size2::new(outer_width, outer_depth),
            ShapeKind::TShape {
                stem_depth,
                cross_width,
                ..
            } => Size2::new(cross_width, stem_depth),
        }
    }

    /// Tests whether a local-frame point lies in the footprint's solid region.
    ///
    /// Boundaries of the solid region count as inside.
    pub fn contains_point(&self, p: Point) -> bool {
        let bbox = self.bounding_box();
        if !in_range(p.x, 0.0, bbox.width) || !in_range(p.y, 0.0, bbox.height) {
            return false;
        }

        match *self {
            ShapeKind::Rect { .. } => true,
            ShapeKind::UShape {
                outer_width,
                outer_depth,
                gap_width,
                gap_depth,
            } => {
                let left = (outer_width - gap_width) / 2.0;
                let right = (outer_width + gap_width) / 2.0;
                let top = outer_depth - gap_depth;
                let in_notch = p.x > left && p.x < right && p.y > top;
                !in_notch
            }
            ShapeKind::TShape {
                stem_width,
                stem_depth,
                cross_width,
                cross_depth,
                cross_offset,
            } => {
                let left = (cross_width - stem_width) / 2.0;
                let right = (cross_width + stem_width) / 2.0;
                let in_stem = in_range(p.x, left, right) && in_range(p.y, 0.0, stem_depth);
                let in_cross = in_range(p.x, 0.0, cross_width)
                    && in_range(p.y, cross_offset, cross_offset + cross_depth);
                in_stem || in_cross
            }
        }
    }

    /// Closed outline of the footprint, clockwise on a y-down canvas.
    ///
    /// Rect yields 4 vertices, U-shape 8 and T-shape 12. Coincident and
    /// collinear vertices are dropped, so a T whose bar sits flush with an end
    /// of the stem has fewer.
    pub fn polygon_vertices(&self) -> Vec<Point> {
        let ring = match *self {
            ShapeKind::Rect { width, depth } => vec![
                Point::new(0.0, 0.0),
                Point::new(width, 0.0),
                Point::new(width, depth),
                Point::new(0.0, depth),
            ],
            ShapeKind::UShape {
                outer_width,
                outer_depth,
                gap_width,
                gap_depth,
            } => {
                let left = (outer_width - gap_width) / 2.0;
                let right = (outer_width + gap_width) / 2.0;
                let top = outer_depth - gap_depth;
                vec![
                    Point::new(0.0, 0.0),
                    Point::new(outer_width, 0.0),
                    Point::new(outer_width, outer_depth),
                    Point::new(right, outer_depth),
                    Point::new(right, top),
                    Point::new(left, top),
                    Point::new(left, outer_depth),
                    Point::new(0.0, outer_depth),
                ]
            }
            ShapeKind::TShape {
                stem_width,
                stem_depth,
                cross_width,
                cross_depth,
                cross_offset,
            } => {
                let left = (cross_width - stem_width) / 2.0;
                let right = (cross_width + stem_width) / 2.0;
                let bar_top = cross_offset;
                let bar_bottom = cross_offset + cross_depth;
                vec![
                    Point::new(left, 0.0),
                    Point::new(right, 0.0),
                    Point::new(right, bar_top),
                    Point::new(cross_width, bar_top),
                    Point::new(cross_width, bar_bottom),
                    Point::new(right, bar_bottom),
                    Point::new(right, stem_depth),
                    Point::new(left, stem_depth),
                    Point::new(left, bar_bottom),
                    Point::new(0.0, bar_bottom),
                    Point::new(0.0, bar_top),
                    Point::new(left, bar_top),
                ]
            }
        };
        simplify_ring(ring)
    }
}

impl Default for ShapeKind {
    fn default() -> Self {
        Self::default_rect()
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ContainerError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ContainerError::NonPositiveDimension { field, value })
    }
}

fn in_range(v: f64, lo: f64, hi: f64) -> bool {
    v >= lo && v <= hi
}

/// Drops repeated and collinear vertices from a closed ring.
fn simplify_ring(mut ring: Vec<Point>) -> Vec<Point> {
    loop {
        let n = ring.len();
        if n < 3 {
            return ring;
        }
        let redundant = (0..n).find(|&i| {
            let prev = ring[(i + n - 1) % n];
            let cur = ring[i];
            let next = ring[(i + 1) % n];
            if cur.distance_to(&prev) < EPSILON {
                return true;
            }
            let a = cur - prev;
            let b = next - cur;
            (a.x * b.y - a.y * b.x).abs() < EPSILON
        });
        match redundant {
            Some(i) => {
                ring.remove(i);
            }
            None => return ring,
        }
    }
}

/// Placement of the container in the 3D scene: translation of its center plus
/// a rotation about the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldTransform {
    pub position: Point3,
    #[serde(default)]
    pub rotation_y: f64,
}

impl WorldTransform {
    pub fn new(position: Point3, rotation_y: f64) -> Self {
        Self {
            position,
            rotation_y,
        }
    }

    pub fn isometry(&self) -> Isometry3<f64> {
        Isometry3::from_parts(
            Translation3::new(self.position.x, self.position.y, self.position.z),
            UnitQuaternion::from_axis_angle(&Vector3::y_axis(), self.rotation_y),
        )
    }

    /// Maps a point from the container's local frame into world space.
    pub fn transform_point(&self, p: Point3) -> Point3 {
        let out = self.isometry() * NPoint3::new(p.x, p.y, p.z);
        Point3::new(out.x, out.y, out.z)
    }

    /// World AABB of a local box after placement.
    pub fn transform_aabb(&self, local: &Aabb3) -> Aabb3 {
        let corners = local.corners().map(|c| self.transform_point(c));
        // Eight corners are always present.
        Aabb3::from_points(corners).unwrap_or(*local)
    }
}

fn default_height() -> f64 {
    DEFAULT_CONTAINER_HEIGHT
}

/// A container definition: footprint, interior height and scene placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerConfig {
    #[serde(flatten)]
    pub shape: ShapeKind,
    #[serde(rename = "heightY", default = "default_height")]
    pub height: f64,
    #[serde(rename = "worldTransform", default)]
    pub world_transform: WorldTransform,
}

impl ContainerConfig {
    pub fn new(shape: ShapeKind, height: f64) -> Self {
        Self {
            shape,
            height,
            world_transform: WorldTransform::default(),
        }
    }

    pub fn with_transform(mut self, world_transform: WorldTransform) -> Self {
        self.world_transform = world_transform;
        self
    }

    /// Parses and validates a container definition from JSON.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ContainerError> {
        self.shape.validate()?;
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(ContainerError::NonPositiveHeight(self.height));
        }
        Ok(())
    }

    pub fn bounding_box(&self) -> Size2 {
        self.shape.bounding_box()
    }

    /// The container's local box: footprint recentred on the origin, full height
    /// centred on the origin. Plan `x` maps to X and plan `y` to Z.
    pub fn local_aabb(&self) -> Aabb3 {
        let bbox = self.bounding_box();
        let (hw, hh, hd) = (bbox.width / 2.0, self.height / 2.0, bbox.height / 2.0);
        Aabb3::new(Point3::new(-hw, -hh, -hd), Point3::new(hw, hh, hd))
    }

    /// World-space AABB of the placed container.
    pub fn world_aabb(&self) -> Aabb3 {
        self.world_transform.transform_aabb(&self.local_aabb())
    }
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self::new(ShapeKind::default(), DEFAULT_CONTAINER_HEIGHT)
    }
}
