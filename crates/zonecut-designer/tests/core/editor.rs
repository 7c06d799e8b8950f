use std::f64::consts::FRAC_PI_2;

use zonecut_core::{EditError, Point, Size2};
use zonecut_designer::container::{ContainerConfig, ShapeKind};
use zonecut_designer::editor::{
    DragMode, EditorEvent, EditorState, InteractionController, ZoneGeometry,
};
use zonecut_designer::zone::{Zone, ZoneHandle, ZoneId};
use zonecut_settings::EditorSettings;

/// 1000 x 500 container on a 1200 x 800 canvas: scale 1.14, offset (30, 115).
fn setup() -> (InteractionController, EditorState) {
    let container = ContainerConfig::new(
        ShapeKind::Rect {
            width: 1000.0,
            depth: 500.0,
        },
        2400.0,
    );
    let controller = InteractionController::for_container(
        &container,
        Size2::new(1200.0, 800.0),
        EditorSettings::default(),
    );
    let mut state = EditorState::new();
    state.set_editing(true);
    (controller, state)
}

fn drag(
    c: &InteractionController,
    s: &mut EditorState,
    from: (f64, f64),
    to: (f64, f64),
) -> Option<ZoneId> {
    c.pointer_down(s, Point::new(from.0, from.1));
    c.pointer_move(s, Point::new(to.0, to.1));
    c.pointer_up(s, Point::new(to.0, to.1))
}

fn close(a: Point, b: Point) -> bool {
    a.distance_to(&b) < 1e-9
}

#[test]
fn test_small_draw_is_discarded() {
    let (c, mut s) = setup();
    assert_eq!(drag(&c, &mut s, (0.0, 0.0), (5.0, 5.0)), None);
    assert!(s.zones().is_empty());
    assert_eq!(s.drag().mode, DragMode::None);
}

#[test]
fn test_draw_creates_selected_zone() {
    let (c, mut s) = setup();
    let id = drag(&c, &mut s, (0.0, 0.0), (50.0, 50.0)).expect("zone should be created");

    assert_eq!(s.zones().len(), 1);
    assert_eq!(s.selected_zone_id(), Some(id));
    let zone = s.zone(id).unwrap();
    assert_eq!(zone.label, "1");
    assert_eq!(zone.rotation, 0.0);
    assert!((zone.width - 50.0 / 1.14).abs() < 1e-9);
    assert!((zone.height - 50.0 / 1.14).abs() < 1e-9);
    assert!(close(
        zone.center,
        c.mapper().canvas_to_world(Point::new(25.0, 25.0))
    ));
}

#[test]
fn test_draw_in_reverse_direction() {
    let (c, mut s) = setup();
    let id = drag(&c, &mut s, (400.0, 380.0), (300.0, 300.0)).unwrap();
    let zone = s.zone(id).unwrap();
    assert!(close(
        zone.corner(ZoneHandle::TopLeft),
        c.mapper().canvas_to_world(Point::new(300.0, 300.0))
    ));
}

#[test]
fn test_draw_below_world_minimum_is_discarded() {
    let container = ContainerConfig::new(
        ShapeKind::Rect {
            width: 10.0,
            depth: 10.0,
        },
        100.0,
    );
    // 10 mm fills ~760 px, so a 20 px drag is well under 10 mm
    let c = InteractionController::for_container(
        &container,
        Size2::new(1200.0, 800.0),
        EditorSettings::default(),
    );
    let mut s = EditorState::new();
    s.set_editing(true);
    assert_eq!(drag(&c, &mut s, (100.0, 100.0), (120.0, 120.0)), None);
    assert!(s.zones().is_empty());
}

#[test]
fn test_move_is_delta_based() {
    let (c, mut s) = setup();
    let id = drag(&c, &mut s, (300.0, 300.0), (400.0, 380.0)).unwrap();

    c.pointer_down(&mut s, Point::new(350.0, 340.0));
    assert_eq!(s.drag().mode, DragMode::Move);
    c.pointer_move(&mut s, Point::new(380.0, 350.0));
    c.pointer_move(&mut s, Point::new(390.0, 360.0));
    c.pointer_up(&mut s, Point::new(390.0, 360.0));

    let zone = s.zone(id).unwrap();
    assert!(close(
        zone.center,
        c.mapper().canvas_to_world(Point::new(390.0, 360.0))
    ));
    assert_eq!(s.drag().mode, DragMode::None);
}

#[test]
fn test_grab_off_centre_preserves_offset() {
    let (c, mut s) = setup();
    let id = drag(&c, &mut s, (300.0, 300.0), (400.0, 380.0)).unwrap();
    let before = s.zone(id).unwrap().center;

    c.pointer_down(&mut s, Point::new(320.0, 320.0));
    c.pointer_move(&mut s, Point::new(334.0, 320.0));
    c.pointer_up(&mut s, Point::new(334.0, 320.0));

    let after = s.zone(id).unwrap().center;
    assert!(close(after, before + Point::new(14.0 / 1.14, 0.0)));
}

#[test]
fn test_corner_handle_resizes() {
    let (c, mut s) = setup();
    let id = drag(&c, &mut s, (300.0, 300.0), (400.0, 380.0)).unwrap();
    let tl_before = s.zone(id).unwrap().corner(ZoneHandle::TopLeft);

    c.pointer_down(&mut s, Point::new(403.0, 382.0));
    assert_eq!(s.drag().mode, DragMode::Resize);
    assert_eq!(s.drag().active_handle, Some(ZoneHandle::BottomRight));

    c.pointer_move(&mut s, Point::new(500.0, 450.0));
    c.pointer_up(&mut s, Point::new(500.0, 450.0));

    let zone = s.zone(id).unwrap();
    assert!(close(zone.corner(ZoneHandle::TopLeft), tl_before));
    assert!(close(
        zone.corner(ZoneHandle::BottomRight),
        c.mapper().canvas_to_world(Point::new(500.0, 450.0))
    ));
}

#[test]
fn test_rotate_handle_rotates() {
    let (c, mut s) = setup();
    let id = drag(&c, &mut s, (300.0, 300.0), (400.0, 380.0)).unwrap();

    // Rotate handle sits 25 px above the top edge
    c.pointer_down(&mut s, Point::new(350.0, 275.0));
    assert_eq!(s.drag().mode, DragMode::Rotate);
    assert_eq!(s.drag().active_handle, Some(ZoneHandle::Rotate));

    c.pointer_move(&mut s, Point::new(450.0, 340.0));
    c.pointer_up(&mut s, Point::new(450.0, 340.0));

    let zone = s.zone(id).unwrap();
    assert!((zone.rotation - FRAC_PI_2).abs() < 1e-9, "rotation {}", zone.rotation);
}

#[test]
fn test_handles_only_for_selected_zone() {
    let (c, mut s) = setup();
    drag(&c, &mut s, (300.0, 300.0), (400.0, 380.0)).unwrap();
    // Click empty canvas to deselect, then release without drawing
    c.pointer_down(&mut s, Point::new(1000.0, 700.0));
    assert_eq!(s.selected_zone_id(), None);
    c.pointer_up(&mut s, Point::new(1000.0, 700.0));

    // The old rotate-handle spot is now empty canvas
    c.pointer_down(&mut s, Point::new(350.0, 275.0));
    assert_eq!(s.drag().mode, DragMode::Draw);
}

#[test]
fn test_topmost_zone_wins_hit_test() {
    let (c, mut s) = setup();
    let a = drag(&c, &mut s, (300.0, 300.0), (400.0, 380.0)).unwrap();
    let b = drag(&c, &mut s, (450.0, 400.0), (350.0, 320.0)).unwrap();
    assert_eq!(s.zones().len(), 2);

    c.pointer_down(&mut s, Point::new(375.0, 350.0));
    assert_eq!(s.selected_zone_id(), Some(b));
    assert_eq!(s.drag().mode, DragMode::Move);
    c.pointer_up(&mut s, Point::new(375.0, 350.0));

    c.pointer_down(&mut s, Point::new(320.0, 310.0));
    assert_eq!(s.selected_zone_id(), Some(a));
}

#[test]
fn test_pointer_ignored_when_not_editing() {
    let (c, mut s) = setup();
    s.set_editing(false);
    assert_eq!(drag(&c, &mut s, (0.0, 0.0), (200.0, 200.0)), None);
    assert!(s.zones().is_empty());
    assert_eq!(s.drag().mode, DragMode::None);
}

#[test]
fn test_escape_cancels_draw() {
    let (c, mut s) = setup();
    c.pointer_down(&mut s, Point::new(100.0, 100.0));
    c.pointer_move(&mut s, Point::new(300.0, 250.0));

    let preview = c.draw_preview(&s).expect("preview while drawing");
    assert_eq!((preview.width, preview.height), (200.0, 150.0));

    c.key_escape(&mut s);
    assert!(c.draw_preview(&s).is_none());
    assert_eq!(c.pointer_up(&mut s, Point::new(300.0, 250.0)), None);
    assert!(s.zones().is_empty());
}

#[test]
fn test_pointer_leave_discards_draw() {
    let (c, mut s) = setup();
    c.pointer_down(&mut s, Point::new(100.0, 100.0));
    c.pointer_move(&mut s, Point::new(300.0, 250.0));
    c.pointer_leave(&mut s);
    assert_eq!(s.drag().mode, DragMode::None);
    assert_eq!(c.pointer_up(&mut s, Point::new(300.0, 250.0)), None);
    assert!(s.zones().is_empty());
}

#[test]
fn test_pointer_leave_ends_move() {
    let (c, mut s) = setup();
    let id = drag(&c, &mut s, (300.0, 300.0), (400.0, 380.0)).unwrap();

    c.pointer_down(&mut s, Point::new(350.0, 340.0));
    c.pointer_move(&mut s, Point::new(360.0, 340.0));
    c.pointer_leave(&mut s);
    let after_leave = s.zone(id).unwrap().center;

    c.pointer_move(&mut s, Point::new(500.0, 500.0));
    assert_eq!(s.zone(id).unwrap().center, after_leave);
}

#[test]
fn test_delete_renumbers_labels() {
    let mut s = EditorState::new();
    let ids: Vec<ZoneId> = (0..3)
        .map(|i| s.add_zone(Point::new(100.0 * i as f64, 50.0), 40.0, 20.0).unwrap())
        .collect();
    let labels: Vec<&str> = s.zones().iter().map(|z| z.label.as_str()).collect();
    assert_eq!(labels, ["1", "2", "3"]);

    s.delete_zone(ids[1]).unwrap();

    let remaining: Vec<(ZoneId, &str)> =
        s.zones().iter().map(|z| (z.id, z.label.as_str())).collect();
    assert_eq!(remaining, [(ids[0], "1"), (ids[2], "2")]);

    // Ids are never reused
    let next = s.add_zone(Point::new(0.0, 0.0), 40.0, 20.0).unwrap();
    assert_eq!(next, ids[2] + 1);
    assert_eq!(s.zone(next).unwrap().label, "3");
}

#[test]
fn test_delete_selected_moves_selection() {
    let mut s = EditorState::new();
    let a = s.add_zone(Point::new(0.0, 0.0), 40.0, 20.0).unwrap();
    let b = s.add_zone(Point::new(100.0, 0.0), 40.0, 20.0).unwrap();
    let c = s.add_zone(Point::new(200.0, 0.0), 40.0, 20.0).unwrap();
    s.set_editing(true);
    s.select_zone(b).unwrap();

    s.delete_zone(c).unwrap();
    assert_eq!(s.selected_zone_id(), Some(b));

    s.delete_zone(b).unwrap();
    assert_eq!(s.selected_zone_id(), Some(a));

    s.delete_zone(a).unwrap();
    assert_eq!(s.selected_zone_id(), None);

    assert_eq!(s.delete_zone(a), Err(EditError::ZoneNotFound(a)));
}

#[test]
fn test_edit_mode_toggle() {
    let mut s = EditorState::new();
    let first = s.add_zone(Point::new(0.0, 0.0), 40.0, 20.0).unwrap();
    let second = s.add_zone(Point::new(100.0, 0.0), 40.0, 20.0).unwrap();

    assert_eq!(s.select_zone(second), Err(EditError::EditingDisabled));

    assert!(s.toggle_edit_mode());
    assert_eq!(s.selected_zone_id(), Some(first));
    s.select_zone(second).unwrap();
    assert_eq!(s.select_zone(99), Err(EditError::ZoneNotFound(99)));
    assert_eq!(s.selected_zone_id(), Some(second));

    assert!(!s.toggle_edit_mode());
    assert_eq!(s.selected_zone_id(), None);
}

#[test]
fn test_set_zone_geometry() {
    let mut s = EditorState::new();
    let id = s.add_zone(Point::new(0.0, 0.0), 40.0, 20.0).unwrap();

    let geometry = ZoneGeometry {
        center: Point::new(10.0, 20.0),
        width: 300.0,
        height: 150.0,
        rotation: 3.0 * FRAC_PI_2,
    };
    s.set_zone_geometry(id, geometry).unwrap();
    let zone = s.zone(id).unwrap();
    assert_eq!(zone.center, Point::new(10.0, 20.0));
    assert_eq!((zone.width, zone.height), (300.0, 150.0));
    assert!((zone.rotation + FRAC_PI_2).abs() < 1e-12);

    let bad = ZoneGeometry {
        width: 0.0,
        ..geometry
    };
    assert_eq!(
        s.set_zone_geometry(id, bad),
        Err(EditError::InvalidGeometry {
            field: "width",
            value: 0.0
        })
    );
    let bad = ZoneGeometry {
        center: Point::new(f64::NAN, 0.0),
        ..geometry
    };
    assert!(matches!(
        s.set_zone_geometry(id, bad),
        Err(EditError::InvalidGeometry {
            field: "center.x",
            ..
        })
    ));
    assert_eq!(
        s.set_zone_geometry(42, geometry),
        Err(EditError::ZoneNotFound(42))
    );
    // Rejected edits leave the zone alone
    assert_eq!(s.zone(id).unwrap().width, 300.0);
}

#[test]
fn test_restore_rejects_invalid_zones() {
    let mut s = EditorState::new();
    s.add_zone(Point::new(0.0, 0.0), 40.0, 20.0).unwrap();
    let before = s.zones().to_vec();

    let flipped = vec![Zone::new(5, "1", Point::new(0.0, 0.0), -200.0, 20.0)];
    assert_eq!(
        s.restore_zones(flipped),
        Err(EditError::InvalidGeometry {
            field: "width",
            value: -200.0
        })
    );

    let twins = vec![
        Zone::new(5, "1", Point::new(0.0, 0.0), 10.0, 10.0),
        Zone::new(5, "2", Point::new(50.0, 0.0), 10.0, 10.0),
    ];
    assert_eq!(s.restore_zones(twins), Err(EditError::DuplicateZoneId(5)));

    // Failed restores leave the state as it was
    assert_eq!(s.zones(), before.as_slice());
    assert_eq!(s.next_id(), 2);
}

#[test]
fn test_restore_at_id_limit() {
    let mut s = EditorState::new();
    let last = vec![Zone::new(u64::MAX, "1", Point::new(0.0, 0.0), 10.0, 10.0)];
    assert_eq!(
        s.restore_zones(last),
        Err(EditError::IdsExhausted(u64::MAX))
    );
    assert!(s.zones().is_empty());

    let near = vec![Zone::new(u64::MAX - 1, "1", Point::new(0.0, 0.0), 10.0, 10.0)];
    s.restore_zones(near).unwrap();
    assert_eq!(s.next_id(), u64::MAX);
    assert_eq!(
        s.add_zone(Point::new(50.0, 50.0), 10.0, 10.0),
        Err(EditError::IdsExhausted(u64::MAX))
    );
    assert_eq!(s.zones().len(), 1);
}

#[test]
fn test_reset_clears_everything() {
    let (c, mut s) = setup();
    drag(&c, &mut s, (300.0, 300.0), (400.0, 380.0)).unwrap();
    s.reset();
    assert!(s.zones().is_empty());
    assert!(!s.is_editing());
    assert_eq!(s.selected_zone_id(), None);
    assert_eq!(s.next_id(), 1);
}

#[test]
fn test_replay_recorded_events() {
    let (mut c, mut s) = setup();
    let script = r#"[
        {"type": "pointer_down", "x": 300, "y": 300},
        {"type": "pointer_move", "x": 350, "y": 340},
        {"type": "pointer_up", "x": 400, "y": 380},
        {"type": "set_editing", "enabled": false},
        {"type": "pointer_down", "x": 500, "y": 500},
        {"type": "pointer_up", "x": 600, "y": 600},
        {"type": "delete_zone", "id": 1}
    ]"#;
    let events: Vec<EditorEvent> = serde_json::from_str(script).unwrap();

    let mut created = Vec::new();
    for event in &events {
        if let Some(id) = c.apply(&mut s, event).unwrap() {
            created.push(id);
        }
    }
    assert_eq!(created, vec![1]);
    assert!(s.zones().is_empty());

    let err = c
        .apply(&mut s, &EditorEvent::DeleteZone { id: 1 })
        .unwrap_err();
    assert_eq!(err, EditError::ZoneNotFound(1));
}
