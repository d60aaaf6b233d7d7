use scenekit_core::{keys, ShapeDefinition};
use scenekit_designer::geometry::Point;
use scenekit_designer::model::{
    BuildContext, LineEnd, SceneCircle, SceneCorridor, SceneLine, SceneRectangle, SceneShape, Shape,
};

fn ctx() -> BuildContext {
    BuildContext::default()
}

fn line_def() -> ShapeDefinition {
    ShapeDefinition::with_type("line")
        .with(keys::NAME, "l1")
        .with(keys::START, [0.0, 0.0])
        .with(keys::END, [1.0, 0.0])
}

fn circle_def() -> ShapeDefinition {
    ShapeDefinition::with_type("circle")
        .with(keys::NAME, "c1")
        .with(keys::CENTER, [0.0, 0.0])
        .with(keys::RADIUS, 0.5)
}

#[test]
fn test_line_pixel_geometry() {
    let line = SceneLine::from_definition(&line_def(), &ctx()).unwrap();
    assert_eq!(line.p1(), Point::new(0.0, 0.0));
    assert_eq!(line.p2(), Point::new(100.0, 0.0));
    assert_eq!(line.length_in_pixels(), 100.0);
    assert_eq!(line.type_and_name(), "line l1");
}

#[test]
fn test_line_hit_test_uses_contain_width() {
    let line = SceneLine::from_definition(&line_def(), &ctx()).unwrap();
    assert!(line.contains(Point::new(50.0, 9.0)));
    assert!(!line.contains(Point::new(50.0, 11.0)));
    // Beyond the end is a miss even when close.
    assert!(!line.contains(Point::new(101.0, 0.0)));
}

#[test]
fn test_line_missing_end_is_rejected() {
    let def = ShapeDefinition::with_type("line").with(keys::START, [0.0, 0.0]);
    assert!(SceneLine::from_definition(&def, &ctx()).is_err());
}

#[test]
fn test_circle_radius_and_hit_test() {
    let circle = SceneCircle::from_definition(&circle_def(), &ctx()).unwrap();
    assert_eq!(circle.radius_pixels(), 50.0);
    assert!(circle.contains(Point::new(40.0, 0.0)));
    assert!(!circle.contains(Point::new(60.0, 0.0)));
}

#[test]
fn test_circle_update_size_keeps_center() {
    let def = circle_def().with(keys::CENTER, [1.0, 2.0]);
    let mut circle = SceneCircle::from_definition(&def, &ctx()).unwrap();
    circle.update_size(75.0);
    assert_eq!(circle.center_pixel_point(), Point::new(100.0, 200.0));
    assert_eq!(circle.radius(), 0.75);
    assert_eq!(circle.center(), [1.0, 2.0]);
}

#[test]
fn test_corridor_is_hit_inside_band() {
    let def = ShapeDefinition::with_type("corridor")
        .with(keys::START, [0.0, 0.0])
        .with(keys::END, [2.0, 0.0])
        .with(keys::CORRIDOR_WIDTH, 1.0)
        .with(keys::SHOW_BORDERS, true);
    let corridor = SceneCorridor::from_definition(&def, &ctx()).unwrap();
    assert_eq!(corridor.corridor_width(), 100.0);
    assert!(corridor.contains(Point::new(100.0, 80.0)));
    assert!(!corridor.contains(Point::new(100.0, 120.0)));
}

#[test]
fn test_corridor_borders_follow_centerline() {
    let def = ShapeDefinition::with_type("corridor")
        .with(keys::START, [0.0, 0.0])
        .with(keys::END, [2.0, 0.0])
        .with(keys::CORRIDOR_WIDTH, 1.0)
        .with(keys::SHOW_BORDERS, true);
    let mut corridor = SceneCorridor::from_definition(&def, &ctx()).unwrap();

    let mut ys: Vec<f64> = corridor.borders().unwrap().iter().map(|b| b.start.y).collect();
    ys.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(ys, vec![-50.0, 50.0]);

    corridor.translate(Point::new(0.0, 10.0));
    let mut ys: Vec<f64> = corridor.borders().unwrap().iter().map(|b| b.start.y).collect();
    ys.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(ys, vec![-40.0, 60.0]);

    corridor.update_line_end_point(LineEnd::End, Point::new(300.0, 10.0));
    for border in corridor.borders().unwrap() {
        let xs = [border.start.x, border.end.x];
        assert!(xs.contains(&300.0));
    }
}

#[test]
fn test_corridor_without_borders() {
    let def = ShapeDefinition::with_type("corridor")
        .with(keys::START, [0.0, 0.0])
        .with(keys::END, [2.0, 0.0]);
    let corridor = SceneCorridor::from_definition(&def, &ctx()).unwrap();
    assert!(corridor.borders().is_none());
}

#[test]
fn test_rectangle_rotated_hit_test() {
    let def = ShapeDefinition::with_type("rectangle")
        .with(keys::CENTER, [1.0, 1.0])
        .with(keys::WIDTH, 2.0)
        .with(keys::HEIGHT, 1.0)
        .with(keys::ROTATION, 90.0);
    let rect = SceneRectangle::from_definition(&def, &ctx()).unwrap();
    assert!(rect.contains(Point::new(100.0, 190.0)));
    assert!(!rect.contains(Point::new(190.0, 100.0)));

    let upright = SceneRectangle::from_definition(&def.clone().with(keys::ROTATION, 0.0), &ctx()).unwrap();
    assert!(upright.contains(Point::new(190.0, 100.0)));
    assert!(!upright.contains(Point::new(100.0, 190.0)));
}

#[test]
fn test_rectangle_serialize_after_translate() {
    let def = ShapeDefinition::with_type("rectangle")
        .with(keys::CENTER, [1.0, 1.0])
        .with(keys::WIDTH, 2.0)
        .with(keys::HEIGHT, 1.0)
        .with(keys::ROTATION, 30.0);
    let mut rect = SceneRectangle::from_definition(&def, &ctx()).unwrap();
    rect.translate(Point::new(100.0, -50.0));
    let out = rect.serialize();
    assert_eq!(out.get_point(keys::CENTER), Some([2.0, 0.5]));
    assert_eq!(out.get_number(keys::ROTATION), Some(30.0));
    assert_eq!(out.get_number(keys::WIDTH), Some(2.0));
}

#[test]
fn test_serialize_is_idempotent() {
    let shapes = vec![
        Shape::Line(SceneLine::from_definition(&line_def(), &ctx()).unwrap()),
        Shape::Circle(SceneCircle::from_definition(&circle_def(), &ctx()).unwrap()),
    ];
    for mut shape in shapes {
        shape.translate(Point::new(12.5, -3.25));
        let first = shape.serialize();
        let second = shape.serialize();
        assert_eq!(first, second);
    }
}

#[test]
fn test_serialize_reports_live_geometry() {
    let mut line = SceneLine::from_definition(&line_def(), &ctx()).unwrap();
    line.translate(Point::new(50.0, 100.0));
    let out = line.serialize();
    assert_eq!(out.get_point(keys::START), Some([0.5, 1.0]));
    assert_eq!(out.get_point(keys::END), Some([1.5, 1.0]));
    assert_eq!(out.get_str(keys::NAME), Some("l1"));
}

#[test]
fn test_scale_factor_is_captured_at_construction() {
    let ctx = BuildContext {
        scale_factor: 20.0,
        ..BuildContext::default()
    };
    let line = SceneLine::from_definition(&line_def(), &ctx).unwrap();
    assert_eq!(line.p2(), Point::new(20.0, 0.0));
    assert_eq!(line.serialize().get_point(keys::END), Some([1.0, 0.0]));
}

#[test]
fn test_update_properties_rebuilds_geometry_and_style() {
    let mut shape = Shape::Circle(SceneCircle::from_definition(&circle_def(), &ctx()).unwrap());
    let changes = ShapeDefinition::new()
        .with(keys::RADIUS, 1.0)
        .with(keys::COLOR, "#ff0000");
    shape.update_properties(&changes).unwrap();
    assert_eq!(shape.as_circle().unwrap().radius_pixels(), 100.0);
    assert_eq!(shape.style().color.as_deref(), Some("#ff0000"));
}

#[test]
fn test_update_properties_rejects_bad_value() {
    let mut shape = Shape::Circle(SceneCircle::from_definition(&circle_def(), &ctx()).unwrap());
    let before = shape.clone();
    let changes = ShapeDefinition::new().with(keys::RADIUS, "large");
    assert!(shape.update_properties(&changes).is_err());
    assert_eq!(shape.serialize(), before.serialize());
    assert_eq!(shape.as_circle().unwrap().radius_pixels(), 50.0);
}
