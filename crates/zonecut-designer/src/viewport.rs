//! Canvas mapping for the floor-plan editor.
//!
//! Handles conversion between canvas coordinates (device pixels, origin at the
//! top-left, +Y down) and world coordinates (container plan millimetres, origin
//! at the footprint's top-left, +Y along the container depth). The footprint is
//! fitted into the canvas with a uniform scale, centred, with a padding margin.
//! Both frames grow in the same directions, so there is no axis flip.

use std::fmt;

use serde::{Deserialize, Serialize};
use zonecut_core::constants::{FALLBACK_FOOTPRINT, VIEW_PADDING_FACTOR};
use zonecut_core::{Point, Size2};

/// Uniform scale plus origin offset such that `canvas = world * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelScale {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl PixelScale {
    /// Fits a footprint bounding box into a canvas.
    ///
    /// # Arguments
    /// * `canvas` - Canvas size in device pixels
    /// * `bbox` - Footprint bounding box in world units
    /// * `padding` - Fraction of the limiting canvas axis the footprint fills
    ///
    /// # Returns
    /// The scale and offset that centre the footprint in the canvas.
    ///
    /// A non-positive bounding box falls back to a 100 x 100 footprint and
    /// canvas axes are treated as at least one pixel, so the result is always
    /// invertible. The same inputs always give bit-identical output.
    pub fn recompute(canvas: Size2, bbox: Size2, padding: f64) -> Self {
        let bbox = if bbox.is_positive() {
            bbox
        } else {
            Size2::new(FALLBACK_FOOTPRINT.0, FALLBACK_FOOTPRINT.1)
        };
        let canvas_w = canvas.width.max(1.0);
        let canvas_h = canvas.height.max(1.0);

        let scale = (canvas_w / bbox.width).min(canvas_h / bbox.height) * padding;
        Self {
            scale,
            offset_x: (canvas_w - bbox.width * scale) / 2.0,
            offset_y: (canvas_h - bbox.height * scale) / 2.0,
        }
    }

    pub fn world_to_canvas(&self, p: Point) -> Point {
        Point::new(
            p.x * self.scale + self.offset_x,
            p.y * self.scale + self.offset_y,
        )
    }

    pub fn canvas_to_world(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.offset_x) / self.scale,
            (p.y - self.offset_y) / self.scale,
        )
    }

    /// Converts a canvas length to world units.
    pub fn px_to_world(&self, len: f64) -> f64 {
        len / self.scale
    }

    /// Converts a world length to canvas pixels.
    pub fn world_to_px(&self, len: f64) -> f64 {
        len * self.scale
    }
}

impl fmt::Display for PixelScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scale: {:.4} px/mm | Offset: ({:.1}, {:.1})",
            self.scale, self.offset_x, self.offset_y
        )
    }
}

/// Axis-aligned rectangle in canvas pixels, anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Normalised rectangle spanning two arbitrary corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    /// Bounding rectangle of a set of points; empty input gives a zero rect.
    pub fn bounding(points: &[Point]) -> Self {
        let Some(first) = points.first() else {
            return Self::default();
        };
        let (mut min, mut max) = (*first, *first);
        for p in &points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Self::from_corners(min, max)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Stateful mapper owned by an editor view.
///
/// Holds the canvas size and the footprint bounding box and recomputes the
/// [`PixelScale`] whenever either changes.
#[derive(Debug, Clone)]
pub struct CoordinateMapper {
    canvas: Size2,
    footprint: Size2,
    padding: f64,
    scale: PixelScale,
}

impl CoordinateMapper {
    pub fn new(canvas: Size2, footprint: Size2) -> Self {
        Self::with_padding(canvas, footprint, VIEW_PADDING_FACTOR)
    }

    pub fn with_padding(canvas: Size2, footprint: Size2, padding: f64) -> Self {
        Self {
            canvas,
            footprint,
            padding,
            scale: PixelScale::recompute(canvas, footprint, padding),
        }
    }

    /// Gets the canvas size.
    pub fn canvas_size(&self) -> Size2 {
        self.canvas
    }

    /// Gets the footprint bounding box.
    pub fn footprint(&self) -> Size2 {
        self.footprint
    }

    /// Gets the current scale.
    pub fn scale(&self) -> &PixelScale {
        &self.scale
    }

    /// Sets the canvas dimensions (typically called when the view resizes).
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas = Size2::new(width, height);
        self.recompute();
    }

    /// Sets the footprint bounding box (called when the container shape changes).
    pub fn set_footprint(&mut self, footprint: Size2) {
        self.footprint = footprint;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.scale = PixelScale::recompute(self.canvas, self.footprint, self.padding);
        tracing::debug!("Canvas mapping recomputed: {}", self.scale);
    }

    pub fn world_to_canvas(&self, p: Point) -> Point {
        self.scale.world_to_canvas(p)
    }

    pub fn canvas_to_world(&self, p: Point) -> Point {
        self.scale.canvas_to_world(p)
    }
}

impl Default for CoordinateMapper {
    fn default() -> Self {
        let (w, h) = zonecut_core::constants::DEFAULT_CANVAS_SIZE;
        Self::new(
            Size2::new(w, h),
            Size2::new(FALLBACK_FOOTPRINT.0, FALLBACK_FOOTPRINT.1),
        )
    }
}
