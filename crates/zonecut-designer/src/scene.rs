//! Canvas display list for the zone editor
//! Everything is in canvas pixels, recomputed from the editor state on demand
//! Features:
//! - Container outline polygon
//! - Zone outlines with labels and selection flag
//! - Handles for the selected zone while editing
//! - Live draw preview

use std::fmt::Write;

use serde::Serialize;
use zonecut_core::{Point, Size2};

use crate::container::ContainerConfig;
use crate::editor::{EditorState, InteractionController};
use crate::viewport::PixelRect;
use crate::zone::{ZoneHandle, ZoneId};

const HANDLE_DRAW_RADIUS_PX: f64 = 5.0;

/// A zone as drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneZone {
    pub id: ZoneId,
    pub label: String,
    pub outline: [Point; 4],
    pub label_at: Point,
    pub selected: bool,
}

/// A handle as drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SceneHandle {
    pub handle: ZoneHandle,
    pub position: Point,
}

/// Everything needed to paint one frame of the editor canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub canvas: Size2,
    pub container_outline: Vec<Point>,
    pub zones: Vec<SceneZone>,
    pub handles: Vec<SceneHandle>,
    pub preview: Option<PixelRect>,
}

/// Build the display list for the current editor state
pub fn build_scene(
    state: &EditorState,
    controller: &InteractionController,
    container: &ContainerConfig,
) -> Scene {
    let mapper = controller.mapper();
    let scale = mapper.scale();

    let container_outline = container
        .shape
        .polygon_vertices()
        .into_iter()
        .map(|p| scale.world_to_canvas(p))
        .collect();

    let selected = state.selected_zone_id();
    let zones = state
        .zones()
        .iter()
        .map(|zone| SceneZone {
            id: zone.id,
            label: zone.label.clone(),
            outline: zone.corners().map(|c| scale.world_to_canvas(c)),
            label_at: scale.world_to_canvas(zone.center),
            selected: selected == Some(zone.id),
        })
        .collect();

    let handles = match state.selected_zone() {
        Some(zone) if state.is_editing() => zone
            .handle_positions(scale.scale, controller.settings().rotate_handle_offset_px)
            .iter()
            .map(|(handle, p)| SceneHandle {
                handle,
                position: scale.world_to_canvas(p),
            })
            .collect(),
        _ => Vec::new(),
    };

    Scene {
        canvas: mapper.canvas_size(),
        container_outline,
        zones,
        handles,
        preview: controller.draw_preview(state),
    }
}

fn path_data(points: &[Point]) -> String {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{} {:.2} {:.2} ", cmd, p.x, p.y);
    }
    d.push('Z');
    d
}

/// Render the display list as a standalone SVG document
pub fn to_svg(scene: &Scene) -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = scene.canvas.width,
        h = scene.canvas.height
    );

    if !scene.container_outline.is_empty() {
        let _ = writeln!(
            svg,
            r##"  <path class="container" d="{}" fill="#f4f4f4" stroke="#333" stroke-width="2"/>"##,
            path_data(&scene.container_outline)
        );
    }

    for zone in &scene.zones {
        let (fill, stroke) = if zone.selected {
            ("rgba(255,165,0,0.35)", "#ff8c00")
        } else {
            ("rgba(0,123,255,0.25)", "#007bff")
        };
        let _ = writeln!(
            svg,
            r#"  <path class="zone" data-id="{}" d="{}" fill="{}" stroke="{}" stroke-width="2"/>"#,
            zone.id,
            path_data(&zone.outline),
            fill,
            stroke
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{:.2}" y="{:.2}" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
            zone.label_at.x,
            zone.label_at.y,
            escape_text(&zone.label)
        );
    }

    for h in &scene.handles {
        let class = if h.handle.is_corner() {
            "handle"
        } else {
            "rotate-handle"
        };
        let _ = writeln!(
            svg,
            r##"  <circle class="{}" cx="{:.2}" cy="{:.2}" r="{}" fill="#fff" stroke="#ff8c00"/>"##,
            class, h.position.x, h.position.y, HANDLE_DRAW_RADIUS_PX
        );
    }

    if let Some(r) = scene.preview {
        let _ = writeln!(
            svg,
            r##"  <rect class="preview" x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="none" stroke="#007bff" stroke-dasharray="4 2"/>"##,
            r.x, r.y, r.width, r.height
        );
    }

    svg.push_str("</svg>\n");
    svg
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
