//! Editor state and the pointer-driven interaction state machine.
//!
//! [`EditorState`] is a plain owned value: the zone list, the selection, the
//! edit-mode flag and the in-progress drag. [`InteractionController`] holds the
//! canvas mapping and the editor tolerances and mutates an `EditorState`
//! passed to it by reference, one event at a time.
//!
//! # Gesture model
//!
//! - **Idle** → pointer down: selected zone's handles first (resize or rotate),
//!   then zone bodies topmost first (move), otherwise empty canvas (draw).
//! - **Drawing**: the preview follows the pointer; pointer up commits a zone if
//!   it is large enough, Escape or leaving the canvas discards it.
//! - **Moving / Resizing / Rotating**: applied incrementally on every move;
//!   pointer up or leave simply returns to idle.

use serde::{Deserialize, Serialize};
use zonecut_core::{EditError, Point, Size2};
use zonecut_settings::EditorSettings;

use crate::container::ContainerConfig;
use crate::viewport::{CoordinateMapper, PixelRect};
use crate::zone::{
    normalize_angle, validate_geometry, validate_zone_list, Zone, ZoneHandle, ZoneId,
};

/// Active gesture kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragMode {
    /// Idle: no gesture in progress
    #[default]
    None,
    /// Drawing a new zone
    Draw,
    /// Translating the selected zone
    Move,
    /// Dragging a corner handle
    Resize,
    /// Dragging the rotate handle
    Rotate,
}

/// In-progress gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragState {
    pub mode: DragMode,
    /// World position of the pointer-down.
    pub start_world: Point,
    /// World position at the previous move step.
    pub last_world: Point,
    /// Canvas position of the pointer-down (draw anchor).
    pub anchor_px: Point,
    /// Latest canvas position during a draw.
    pub current_px: Point,
    pub active_handle: Option<ZoneHandle>,
}

impl DragState {
    pub fn is_active(&self) -> bool {
        self.mode != DragMode::None
    }
}

/// Values from the zone list's numeric fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneGeometry {
    pub center: Point,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
}

impl From<&Zone> for ZoneGeometry {
    fn from(zone: &Zone) -> Self {
        Self {
            center: zone.center,
            width: zone.width,
            height: zone.height,
            rotation: zone.rotation,
        }
    }
}

/// State of one editor view.
///
/// Zones are kept in creation order; later zones are drawn on top and win hit
/// tests.
#[derive(Debug, Clone)]
pub struct EditorState {
    zones: Vec<Zone>,
    selected: Option<ZoneId>,
    is_editing: bool,
    drag: DragState,
    next_id: ZoneId,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    pub fn new() -> Self {
        Self {
            zones: Vec::new(),
            selected: None,
            is_editing: false,
            drag: DragState::default(),
            next_id: 1,
        }
    }

    /// Returns to the initial empty state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn zone(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == id)
    }

    fn zone_mut(&mut self, id: ZoneId) -> Option<&mut Zone> {
        self.zones.iter_mut().find(|z| z.id == id)
    }

    pub fn selected_zone_id(&self) -> Option<ZoneId> {
        self.selected
    }

    pub fn selected_zone(&self) -> Option<&Zone> {
        self.selected.and_then(|id| self.zone(id))
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    /// Id the next created zone will get.
    pub fn next_id(&self) -> ZoneId {
        self.next_id
    }

    /// Turns edit mode on or off.
    ///
    /// Entering edit mode selects the first zone when nothing is selected;
    /// leaving it clears the selection and abandons any gesture.
    pub fn set_editing(&mut self, editing: bool) {
        if self.is_editing == editing {
            return;
        }
        self.is_editing = editing;
        if editing {
            if self.selected.is_none() {
                self.selected = self.zones.first().map(|z| z.id);
            }
        } else {
            self.selected = None;
            self.drag = DragState::default();
        }
        tracing::debug!("Edit mode {}", if editing { "on" } else { "off" });
    }

    /// Flips edit mode and returns the new value.
    pub fn toggle_edit_mode(&mut self) -> bool {
        self.set_editing(!self.is_editing);
        self.is_editing
    }

    /// Selects a zone from the zone list. Only allowed while editing.
    pub fn select_zone(&mut self, id: ZoneId) -> Result<(), EditError> {
        if !self.is_editing {
            return Err(EditError::EditingDisabled);
        }
        if self.zone(id).is_none() {
            return Err(EditError::ZoneNotFound(id));
        }
        self.selected = Some(id);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Appends a new axis-aligned zone and returns its id. Does not select it.
    pub fn add_zone(
        &mut self,
        center: Point,
        width: f64,
        height: f64,
    ) -> Result<ZoneId, EditError> {
        validate_geometry(center, width, height, 0.0)?;
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(EditError::IdsExhausted(id))?;
        let label = self.next_label();
        tracing::info!(
            "Created zone {} (label {}) at ({:.1}, {:.1}) size {:.1}x{:.1}",
            id,
            label,
            center.x,
            center.y,
            width,
            height
        );
        self.zones.push(Zone::new(id, label, center, width, height));
        Ok(id)
    }

    /// Next sequential label: one past the largest numeric label.
    fn next_label(&self) -> String {
        let max = self
            .zones
            .iter()
            .filter_map(|z| z.label.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        (max + 1).to_string()
    }

    /// Deletes a zone and renumbers the remaining labels from "1".
    ///
    /// Deleting the selected zone moves the selection to the first remaining
    /// zone. Works whether or not edit mode is on.
    pub fn delete_zone(&mut self, id: ZoneId) -> Result<Zone, EditError> {
        let index = self
            .zones
            .iter()
            .position(|z| z.id == id)
            .ok_or(EditError::ZoneNotFound(id))?;
        let removed = self.zones.remove(index);

        for (i, zone) in self.zones.iter_mut().enumerate() {
            zone.label = (i + 1).to_string();
        }

        if self.selected == Some(id) {
            self.selected = self.zones.first().map(|z| z.id);
        }
        if self.drag.is_active() && self.drag.mode != DragMode::Draw {
            self.drag = DragState::default();
        }

        tracing::info!("Deleted zone {} ({} remaining)", id, self.zones.len());
        Ok(removed)
    }

    /// Applies a numeric-field edit to a zone.
    pub fn set_zone_geometry(
        &mut self,
        id: ZoneId,
        geometry: ZoneGeometry,
    ) -> Result<(), EditError> {
        let ZoneGeometry {
            center,
            width,
            height,
            rotation,
        } = geometry;
        validate_geometry(center, width, height, rotation)?;

        let zone = self.zone_mut(id).ok_or(EditError::ZoneNotFound(id))?;
        zone.center = center;
        zone.width = width;
        zone.height = height;
        zone.rotation = normalize_angle(rotation);
        tracing::debug!("Zone {} geometry set from fields", id);
        Ok(())
    }

    /// Replaces the zone list with persisted zones.
    ///
    /// Ids are kept; new zones continue from the largest id. Selection and any
    /// gesture are cleared. An invalid list leaves the state untouched.
    pub fn restore_zones(&mut self, zones: Vec<Zone>) -> Result<(), EditError> {
        self.next_id = validate_zone_list(&zones)?;
        self.zones = zones;
        self.selected = if self.is_editing {
            self.zones.first().map(|z| z.id)
        } else {
            None
        };
        self.drag = DragState::default();
        tracing::info!("Restored {} zones", self.zones.len());
        Ok(())
    }

    /// Topmost zone containing a world point.
    pub fn zone_at(&self, world: Point) -> Option<ZoneId> {
        self.zones
            .iter()
            .rev()
            .find(|z| z.contains_point(world))
            .map(|z| z.id)
    }
}

/// A recorded editor input, for scripted replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EditorEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    PointerLeave,
    KeyEscape,
    SetEditing { enabled: bool },
    ToggleEdit,
    SelectZone { id: ZoneId },
    DeleteZone { id: ZoneId },
    SetZoneGeometry { id: ZoneId, geometry: ZoneGeometry },
    ResizeCanvas { width: f64, height: f64 },
}

/// Turns canvas pointer input into zone edits.
#[derive(Debug, Clone)]
pub struct InteractionController {
    mapper: CoordinateMapper,
    settings: EditorSettings,
}

impl InteractionController {
    pub fn new(mapper: CoordinateMapper, settings: EditorSettings) -> Self {
        Self { mapper, settings }
    }

    /// Controller fitted to a container's footprint on a canvas of `canvas` pixels.
    pub fn for_container(
        container: &ContainerConfig,
        canvas: Size2,
        settings: EditorSettings,
    ) -> Self {
        let mapper = CoordinateMapper::with_padding(
            canvas,
            container.bounding_box(),
            settings.view_padding_factor,
        );
        Self::new(mapper, settings)
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.mapper.set_canvas_size(width, height);
    }

    pub fn set_container(&mut self, container: &ContainerConfig) {
        self.mapper.set_footprint(container.bounding_box());
    }

    /// Handle of the selected zone under a world point, if any.
    ///
    /// # Arguments
    /// * `zone` - The selected zone
    /// * `world` - Pointer position in world units
    ///
    /// # Returns
    /// The first handle, in [`ZoneHandle::ALL`] order, within the hit radius.
    pub fn hit_test_handle(&self, zone: &Zone, world: Point) -> Option<ZoneHandle> {
        let scale = self.mapper.scale();
        let radius = scale.px_to_world(self.settings.handle_hit_radius_px);
        zone.handle_positions(scale.scale, self.settings.rotate_handle_offset_px)
            .iter()
            .find(|(_, pos)| pos.distance_to(&world) <= radius)
            .map(|(handle, _)| handle)
    }

    pub fn pointer_down(&self, state: &mut EditorState, p: Point) {
        if !state.is_editing {
            return;
        }
        let world = self.mapper.canvas_to_world(p);
        let mut drag = DragState {
            start_world: world,
            last_world: world,
            anchor_px: p,
            current_px: p,
            ..DragState::default()
        };

        let handle_hit = state
            .selected_zone()
            .and_then(|zone| self.hit_test_handle(zone, world));

        if let Some(handle) = handle_hit {
            drag.mode = if handle.is_corner() {
                DragMode::Resize
            } else {
                DragMode::Rotate
            };
            drag.active_handle = Some(handle);
        } else if let Some(id) = state.zone_at(world) {
            state.selected = Some(id);
            drag.mode = DragMode::Move;
        } else {
            state.selected = None;
            drag.mode = DragMode::Draw;
        }

        tracing::debug!(
            "Gesture {:?} started at ({:.1}, {:.1}) px, handle {:?}",
            drag.mode,
            p.x,
            p.y,
            drag.active_handle
        );
        state.drag = drag;
    }

    pub fn pointer_move(&self, state: &mut EditorState, p: Point) {
        if !state.is_editing || !state.drag.is_active() {
            return;
        }
        let world = self.mapper.canvas_to_world(p);

        if state.drag.mode == DragMode::Draw {
            state.drag.current_px = p;
            return;
        }

        let Some(id) = state.selected else {
            tracing::warn!("Gesture {:?} lost its zone; cancelling", state.drag.mode);
            state.drag = DragState::default();
            return;
        };
        let mode = state.drag.mode;
        let handle = state.drag.active_handle;
        let last = state.drag.last_world;
        let min_extent = self.settings.min_resize_extent;

        let Some(zone) = state.zone_mut(id) else {
            tracing::warn!("Gesture {:?} lost zone {}; cancelling", mode, id);
            state.drag = DragState::default();
            return;
        };
        match (mode, handle) {
            (DragMode::Move, _) => zone.translate(world - last),
            (DragMode::Resize, Some(h)) => zone.resize(h, world, min_extent),
            (DragMode::Rotate, _) => zone.rotate_towards(world),
            _ => {}
        }
        state.drag.last_world = world;
    }

    /// Ends the current gesture. Returns the id of a zone created by a draw.
    pub fn pointer_up(&self, state: &mut EditorState, p: Point) -> Option<ZoneId> {
        if !state.is_editing || !state.drag.is_active() {
            return None;
        }
        let drag = std::mem::take(&mut state.drag);

        match drag.mode {
            DragMode::Draw => self.commit_draw(state, drag.anchor_px, p),
            mode => {
                if let Some(zone) = state.selected_zone() {
                    tracing::debug!(
                        "{:?} finished: zone {} center ({:.1}, {:.1}) size {:.1}x{:.1} rotation {:.4}",
                        mode,
                        zone.id,
                        zone.center.x,
                        zone.center.y,
                        zone.width,
                        zone.height,
                        zone.rotation
                    );
                }
                None
            }
        }
    }

    fn commit_draw(&self, state: &mut EditorState, anchor: Point, end: Point) -> Option<ZoneId> {
        let rect = PixelRect::from_corners(anchor, end);
        let min_px = self.settings.min_zone_size_px;
        if rect.width < min_px || rect.height < min_px {
            tracing::debug!(
                "Draw discarded: {:.1}x{:.1} px below minimum",
                rect.width,
                rect.height
            );
            return None;
        }

        let scale = self.mapper.scale();
        let width = scale.px_to_world(rect.width);
        let height = scale.px_to_world(rect.height);
        let min_world = self.settings.min_zone_size_world;
        if width < min_world || height < min_world {
            tracing::debug!(
                "Draw discarded: {:.1}x{:.1} world units below minimum",
                width,
                height
            );
            return None;
        }

        let center = self.mapper.canvas_to_world(rect.center());
        match state.add_zone(center, width, height) {
            Ok(id) => {
                state.selected = Some(id);
                Some(id)
            }
            Err(e) => {
                tracing::warn!("Draw discarded: {}", e);
                None
            }
        }
    }

    /// Pointer left the canvas: abandon the gesture without committing a draw.
    pub fn pointer_leave(&self, state: &mut EditorState) {
        if state.drag.is_active() {
            tracing::debug!("Gesture {:?} ended by pointer leave", state.drag.mode);
            state.drag = DragState::default();
        }
    }

    /// Escape cancels an in-progress draw.
    pub fn key_escape(&self, state: &mut EditorState) {
        if state.drag.mode == DragMode::Draw {
            tracing::debug!("Draw cancelled");
            state.drag = DragState::default();
        }
    }

    /// Canvas rectangle of the draw in progress.
    pub fn draw_preview(&self, state: &EditorState) -> Option<PixelRect> {
        (state.drag.mode == DragMode::Draw)
            .then(|| PixelRect::from_corners(state.drag.anchor_px, state.drag.current_px))
    }

    /// Dispatches a recorded event. Returns the id of a zone a draw created.
    pub fn apply(
        &mut self,
        state: &mut EditorState,
        event: &EditorEvent,
    ) -> Result<Option<ZoneId>, EditError> {
        match *event {
            EditorEvent::PointerDown { x, y } => self.pointer_down(state, Point::new(x, y)),
            EditorEvent::PointerMove { x, y } => self.pointer_move(state, Point::new(x, y)),
            EditorEvent::PointerUp { x, y } => return Ok(self.pointer_up(state, Point::new(x, y))),
            EditorEvent::PointerLeave => self.pointer_leave(state),
            EditorEvent::KeyEscape => self.key_escape(state),
            EditorEvent::SetEditing { enabled } => state.set_editing(enabled),
            EditorEvent::ToggleEdit => {
                state.toggle_edit_mode();
            }
            EditorEvent::SelectZone { id } => state.select_zone(id)?,
            EditorEvent::DeleteZone { id } => {
                state.delete_zone(id)?;
            }
            EditorEvent::SetZoneGeometry { id, geometry } => {
                state.set_zone_geometry(id, geometry)?
            }
            EditorEvent::ResizeCanvas { width, height } => self.set_canvas_size(width, height),
        }
        Ok(None)
    }
}
