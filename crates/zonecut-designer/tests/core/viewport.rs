use zonecut_core::{Point, Size2};
use zonecut_designer::viewport::{CoordinateMapper, PixelRect, PixelScale};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_recompute_fits_and_centres() {
    let s = PixelScale::recompute(Size2::new(1200.0, 800.0), Size2::new(1000.0, 500.0), 0.95);
    // Width is the limiting axis: 1200 / 1000 * 0.95
    assert!(approx(s.scale, 1.14), "scale {}", s.scale);
    assert!(approx(s.offset_x, 30.0), "offset_x {}", s.offset_x);
    assert!(approx(s.offset_y, 115.0), "offset_y {}", s.offset_y);

    let tl = s.world_to_canvas(Point::new(0.0, 0.0));
    let br = s.world_to_canvas(Point::new(1000.0, 500.0));
    assert!(approx(tl.x, 1200.0 - br.x), "horizontal margins must match");
    assert!(approx(tl.y, 800.0 - br.y), "vertical margins must match");
}

#[test]
fn test_recompute_height_limited() {
    let s = PixelScale::recompute(Size2::new(1200.0, 400.0), Size2::new(1000.0, 500.0), 1.0);
    assert!(approx(s.scale, 0.8));
    assert!(approx(s.offset_x, 200.0));
    assert!(approx(s.offset_y, 0.0));
}

#[test]
fn test_recompute_is_bit_identical() {
    let canvas = Size2::new(937.0, 611.0);
    let bbox = Size2::new(5800.0, 2300.0);
    let a = PixelScale::recompute(canvas, bbox, 0.95);
    let b = PixelScale::recompute(canvas, bbox, 0.95);
    assert_eq!(a.scale.to_bits(), b.scale.to_bits());
    assert_eq!(a.offset_x.to_bits(), b.offset_x.to_bits());
    assert_eq!(a.offset_y.to_bits(), b.offset_y.to_bits());
}

#[test]
fn test_recompute_falls_back_for_empty_footprint() {
    let s = PixelScale::recompute(Size2::new(1200.0, 800.0), Size2::new(0.0, 0.0), 0.95);
    // 100 x 100 fallback: min(12, 8) * 0.95
    assert!(approx(s.scale, 7.6));
    assert!(s.scale.is_finite() && s.scale > 0.0);
}

#[test]
fn test_round_trip() {
    let s = PixelScale::recompute(Size2::new(1200.0, 800.0), Size2::new(6000.0, 3000.0), 0.95);
    for p in [
        Point::new(0.0, 0.0),
        Point::new(600.0, 400.0),
        Point::new(1199.0, 799.0),
        Point::new(13.5, 702.25),
    ] {
        let back = s.world_to_canvas(s.canvas_to_world(p));
        assert!(p.distance_to(&back) < 1e-9, "{:?} -> {:?}", p, back);
    }
}

#[test]
fn test_length_conversion() {
    let s = PixelScale::recompute(Size2::new(1000.0, 1000.0), Size2::new(500.0, 500.0), 1.0);
    assert!(approx(s.world_to_px(10.0), 20.0));
    assert!(approx(s.px_to_world(20.0), 10.0));
}

#[test]
fn test_mapper_recomputes_on_resize() {
    let mut mapper = CoordinateMapper::new(Size2::new(1200.0, 800.0), Size2::new(1000.0, 500.0));
    let before = *mapper.scale();

    mapper.set_canvas_size(600.0, 400.0);
    assert_eq!(mapper.canvas_size(), Size2::new(600.0, 400.0));
    assert!(approx(mapper.scale().scale, before.scale / 2.0));

    mapper.set_footprint(Size2::new(2000.0, 500.0));
    assert!(approx(mapper.scale().scale, 600.0 / 2000.0 * 0.95));
    assert_eq!(
        *mapper.scale(),
        PixelScale::recompute(Size2::new(600.0, 400.0), Size2::new(2000.0, 500.0), 0.95)
    );
}

#[test]
fn test_pixel_rect_from_corners_normalises() {
    let r = PixelRect::from_corners(Point::new(50.0, 10.0), Point::new(20.0, 40.0));
    assert_eq!(r, PixelRect::new(20.0, 10.0, 30.0, 30.0));
    assert_eq!(r.center(), Point::new(35.0, 25.0));
}
