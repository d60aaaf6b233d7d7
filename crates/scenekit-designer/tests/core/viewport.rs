use proptest::prelude::*;
use scenekit_designer::geometry::Point;
use scenekit_designer::Viewport;
use scenekit_settings::ZoomSettings;

fn assert_point(actual: Point, expected: Point) {
    assert!(
        (actual.x - expected.x).abs() < 1e-9 && (actual.y - expected.y).abs() < 1e-9,
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}

#[test]
fn test_viewport_default() {
    let vp = Viewport::default();
    assert_eq!(vp.zoom(), 1.0);
    assert_eq!(vp.pan_x(), 0.0);
    assert_eq!(vp.pan_y(), 0.0);
    assert_eq!(vp.canvas_height(), 800.0);
}

#[test]
fn test_screen_y_axis_is_flipped() {
    let vp = Viewport::new(1200.0, 800.0);
    assert_point(vp.screen_to_scene(Point::new(0.0, 800.0)), Point::new(0.0, 0.0));
    assert_point(vp.screen_to_scene(Point::new(100.0, 700.0)), Point::new(100.0, 100.0));
    assert_point(vp.scene_to_screen(Point::new(100.0, 100.0)), Point::new(100.0, 700.0));
}

#[test]
fn test_coordinate_round_trip_with_zoom_and_pan() {
    let mut vp = Viewport::new(640.0, 480.0);
    vp.zoom_in();
    vp.zoom_in();
    vp.set_pan(37.0, -12.5);
    let scene = Point::new(123.4, -56.7);
    assert_point(vp.screen_to_scene(vp.scene_to_screen(scene)), scene);
}

#[test]
fn test_pan_by_follows_pointer() {
    let mut vp = Viewport::default();
    let before = vp.screen_to_scene(Point::new(300.0, 300.0));
    vp.pan_by(20.0, 10.0);
    // The scene point follows the pointer to its new screen position.
    assert_point(vp.screen_to_scene(Point::new(320.0, 310.0)), before);
}

#[test]
fn test_zoom_refuses_step_past_limits() {
    let settings = ZoomSettings {
        factor: 2.0,
        min: 0.5,
        max: 4.0,
    };
    let mut vp = Viewport::with_zoom_settings(800.0, 600.0, &settings);

    assert!(vp.zoom_in());
    assert_eq!(vp.zoom(), 2.0);
    // 4.0 is not below max, so the step is refused rather than clamped.
    assert!(!vp.zoom_in());
    assert_eq!(vp.zoom(), 2.0);

    assert!(vp.zoom_out());
    assert_eq!(vp.zoom(), 1.0);
    assert!(!vp.zoom_out());
    assert_eq!(vp.zoom(), 1.0);
}

#[test]
fn test_zoom_at_keeps_cursor_point() {
    let mut vp = Viewport::default();
    vp.set_pan(15.0, 25.0);
    let cursor = Point::new(400.0, 300.0);
    let anchor = vp.screen_to_scene(cursor);

    assert!(vp.zoom_in_at(cursor));
    assert_point(vp.screen_to_scene(cursor), anchor);
    assert!(vp.zoom_out_at(cursor));
    assert!(vp.zoom_out_at(cursor));
    assert_point(vp.screen_to_scene(cursor), anchor);
}

#[test]
fn test_center_on_and_reset() {
    let mut vp = Viewport::new(1000.0, 500.0);
    vp.center_on(Point::new(100.0, 50.0));
    assert_point(vp.scene_to_screen(Point::new(100.0, 50.0)), Point::new(500.0, 250.0));

    vp.reset();
    assert_eq!(vp.zoom(), 1.0);
    assert_eq!((vp.pan_x(), vp.pan_y()), (0.0, 0.0));
}

#[test]
fn test_viewport_display() {
    let vp = Viewport::default();
    assert_eq!(vp.to_string(), "Zoom: 1.00x | Pan: (0.0, 0.0)");
}

proptest! {
    #[test]
    fn prop_zoom_stays_within_bounds(steps in proptest::collection::vec(any::<bool>(), 0..200)) {
        let mut vp = Viewport::default();
        for zoom_in in steps {
            if zoom_in {
                vp.zoom_in();
            } else {
                vp.zoom_out();
            }
            prop_assert!(vp.zoom() < vp.max_zoom());
            prop_assert!(vp.zoom() > vp.min_zoom());
        }
    }
}
