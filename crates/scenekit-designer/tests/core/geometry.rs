use proptest::prelude::*;
use scenekit_core::constants::FAR_DISTANCE;
use scenekit_designer::geometry::{
    de_scale, distance, distance_to_segment, get_arrow_head, get_point_at_t, parallel_segments,
    perpendicular_points_from_segment, point_towards, project_point_to_segment,
    rectangle_from_line, rotate_point, scale, Point,
};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_parallel_segments_horizontal() {
    let segments = parallel_segments(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 1.0);
    let mut ys: Vec<f64> = segments.iter().map(|s| s.start.y).collect();
    ys.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(ys, vec![-1.0, 1.0]);

    for segment in &segments {
        assert_eq!(segment.start.y, segment.end.y);
        let (lo, hi) = if segment.start.x < segment.end.x {
            (segment.start.x, segment.end.x)
        } else {
            (segment.end.x, segment.start.x)
        };
        assert_eq!((lo, hi), (0.0, 10.0));
    }
}

#[test]
fn test_parallel_segments_vertical() {
    let segments = parallel_segments(Point::new(0.0, 0.0), Point::new(0.0, 10.0), 2.0);
    let mut xs: Vec<f64> = segments.iter().map(|s| s.start.x).collect();
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(xs, vec![-2.0, 2.0]);
    for segment in &segments {
        assert_eq!(segment.start.x, segment.end.x);
    }
}

#[test]
fn test_parallel_segments_diagonal_keep_distance() {
    let (p1, p2) = (Point::new(0.0, 0.0), Point::new(30.0, 40.0));
    for segment in parallel_segments(p1, p2, 5.0) {
        assert!((segment.length() - 50.0).abs() < 1e-6);
        // Both ends sit 5 units off the centerline.
        let mid = segment.middle();
        let cross = ((p2.x - p1.x) * (mid.y - p1.y) - (p2.y - p1.y) * (mid.x - p1.x)).abs() / 50.0;
        assert!((cross - 5.0).abs() < 1e-6);
    }
}

#[test]
fn test_perpendicular_points_are_at_distance() {
    let (p1, p2) = (Point::new(1.0, 1.0), Point::new(4.0, 5.0));
    for p in perpendicular_points_from_segment(p1, p2, 2.0) {
        assert!((distance(p, p2) - 2.0).abs() < 1e-9);
    }
}

#[test]
fn test_rectangle_from_line_corners() {
    let corners = rectangle_from_line(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 1.0);
    for c in corners {
        assert!(approx(c.y.abs(), 1.0));
        assert!(c.x == 0.0 || c.x == 10.0);
    }
}

#[test]
fn test_distance_to_segment_off_segment_is_far() {
    let (p1, p2) = (Point::new(0.0, 0.0), Point::new(10.0, 0.0));
    assert_eq!(distance_to_segment(p1, p2, Point::new(11.0, 0.0)), FAR_DISTANCE);
    assert_eq!(distance_to_segment(p1, p2, Point::new(-0.5, 1.0)), FAR_DISTANCE);
    assert!(approx(distance_to_segment(p1, p2, Point::new(5.0, 3.0)), 3.0));
}

#[test]
fn test_distance_to_degenerate_segment() {
    let p = Point::new(2.0, 2.0);
    assert!(approx(distance_to_segment(p, p, Point::new(5.0, 6.0)), 5.0));
}

#[test]
fn test_project_clamps_only_in_segment() {
    let (p1, p2) = (Point::new(0.0, 0.0), Point::new(10.0, 0.0));
    let outside = Point::new(15.0, 4.0);
    assert_eq!(project_point_to_segment(p1, p2, outside, true), Point::new(10.0, 0.0));
    assert_eq!(project_point_to_segment(p1, p2, outside, false), Point::new(15.0, 0.0));
}

#[test]
fn test_arrow_head_tip_is_last() {
    let head = get_arrow_head(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 10.0, 30.0);
    assert_eq!(head[2], Point::new(100.0, 0.0));
    assert!(head[0].x < 100.0 && head[1].x < 100.0);
    assert!(approx(head[0].y, -head[1].y));
    assert!(approx(distance(head[0], head[2]), 10.0));
}

#[test]
fn test_point_towards_keeps_distance() {
    let p = point_towards(Point::new(0.0, 0.0), Point::new(80.0, 80.0), 100.0);
    assert!((distance(Point::new(0.0, 0.0), p) - 100.0).abs() < 1e-9);
    assert!(approx(p.x, p.y));

    let left = point_towards(Point::new(0.0, 0.0), Point::new(-5.0, 0.0), 3.0);
    assert_eq!(left, Point::new(-3.0, 0.0));
}

#[test]
fn test_rotate_point_quarter_turn() {
    let p = rotate_point(Point::new(2.0, 1.0), Point::new(1.0, 1.0), 90.0);
    assert!(approx(p.x, 1.0));
    assert!(approx(p.y, 2.0));
}

proptest! {
    #[test]
    fn prop_scale_round_trip(x in -1.0e6f64..1.0e6, f in 0.001f64..1000.0) {
        let back = de_scale(scale(x, f), f);
        prop_assert!((back - x).abs() <= 1e-12 * x.abs().max(1.0));
    }

    #[test]
    fn prop_points_on_segment_have_zero_distance(
        x1 in -1000.0f64..1000.0,
        y1 in -1000.0f64..1000.0,
        x2 in -1000.0f64..1000.0,
        y2 in -1000.0f64..1000.0,
        t in 0.001f64..0.999,
    ) {
        let (p1, p2) = (Point::new(x1, y1), Point::new(x2, y2));
        prop_assume!(distance(p1, p2) > 1.0);
        let p = get_point_at_t(p1, p2, t);
        prop_assert!(distance_to_segment(p1, p2, p) < 1e-6);
    }

    #[test]
    fn prop_points_past_the_end_are_far(
        x2 in 1.0f64..1000.0,
        y2 in -1000.0f64..1000.0,
        t in 1.01f64..3.0,
    ) {
        let (p1, p2) = (Point::new(0.0, 0.0), Point::new(x2, y2));
        let p = get_point_at_t(p1, p2, t);
        prop_assert_eq!(distance_to_segment(p1, p2, p), FAR_DISTANCE);
    }
}
