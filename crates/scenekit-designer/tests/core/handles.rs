use scenekit_core::{keys, ShapeDefinition};
use scenekit_designer::geometry::Point;
use scenekit_designer::handles::{Handle, HandleKind, HandleShape, HandleStyle};
use scenekit_designer::model::{BuildContext, LineEnd, SceneCircle, SceneLine, SceneRectangle, Shape};
use scenekit_designer::{SceneCanvas, SceneCommand};

fn line() -> Shape {
    let def = ShapeDefinition::with_type("line")
        .with(keys::START, [0.0, 0.0])
        .with(keys::END, [1.0, 0.0]);
    Shape::Line(SceneLine::from_definition(&def, &BuildContext::default()).unwrap())
}

fn circle() -> Shape {
    let def = ShapeDefinition::with_type("circle")
        .with(keys::CENTER, [0.0, 0.0])
        .with(keys::RADIUS, 0.5);
    Shape::Circle(SceneCircle::from_definition(&def, &BuildContext::default()).unwrap())
}

fn handle(kind: HandleKind, shape: &Shape) -> Handle {
    Handle::new(1, kind, shape, &HandleStyle::default()).unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn test_line_handle_set_order() {
    let kinds: Vec<HandleKind> = Handle::for_item(1, &line(), &HandleStyle::default())
        .iter()
        .map(Handle::kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            HandleKind::ChangeEndPoint(LineEnd::Start),
            HandleKind::ChangeEndPoint(LineEnd::End),
            HandleKind::Rotate(LineEnd::Start),
            HandleKind::Rotate(LineEnd::End),
            HandleKind::Move,
        ]
    );
}

#[test]
fn test_circle_and_rectangle_handle_sets() {
    let kinds: Vec<HandleKind> = Handle::for_item(1, &circle(), &HandleStyle::default())
        .iter()
        .map(Handle::kind)
        .collect();
    assert_eq!(kinds, vec![HandleKind::ChangeSize, HandleKind::Move]);

    let def = ShapeDefinition::with_type("rectangle").with(keys::CENTER, [0.0, 0.0]);
    let rect = Shape::Rectangle(SceneRectangle::from_definition(&def, &BuildContext::default()).unwrap());
    let handles = Handle::for_item(1, &rect, &HandleStyle::default());
    assert_eq!(handles.len(), 1);
    assert_eq!(handles[0].kind(), HandleKind::Move);
}

#[test]
fn test_kind_not_applicable_to_item() {
    let style = HandleStyle::default();
    assert!(Handle::new(1, HandleKind::ChangeSize, &line(), &style).is_none());
    assert!(Handle::new(1, HandleKind::Rotate(LineEnd::End), &circle(), &style).is_none());
}

#[test]
fn test_move_handle_sits_on_center() {
    let h = handle(HandleKind::Move, &line());
    assert_eq!(
        h.outline(),
        HandleShape::Square {
            center: Point::new(50.0, 0.0),
            size: 10.0
        }
    );
    assert!(h.contains(Point::new(54.0, 4.0)));
    assert!(!h.contains(Point::new(56.0, 0.0)));
}

#[test]
fn test_move_handle_emits_translate_delta() {
    let shape = line();
    let h = handle(HandleKind::Move, &shape);
    assert!(h.command_for(&shape, Point::ORIGIN).is_none());

    match h.command_for(&shape, Point::new(5.0, -3.0)) {
        Some(SceneCommand::Translate(cmd)) => assert_eq!(cmd.delta(), Point::new(5.0, -3.0)),
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn test_end_point_handle_projects_on_line() {
    let shape = line();
    let h = handle(HandleKind::ChangeEndPoint(LineEnd::End), &shape);
    match h.outline() {
        HandleShape::Arrow(points) => assert_eq!(points[2], Point::new(100.0, 0.0)),
        other => panic!("unexpected outline {:?}", other),
    }

    match h.command_for(&shape, Point::new(20.0, 5.0)) {
        Some(SceneCommand::ChangeEndPoint(cmd)) => {
            assert_eq!(cmd.end(), LineEnd::End);
            assert!(approx(cmd.pos().x, 120.0));
            assert!(approx(cmd.pos().y, 0.0));
        }
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn test_rotate_handle_keeps_length() {
    let shape = line();
    let h = handle(HandleKind::Rotate(LineEnd::End), &shape);
    match h.outline() {
        HandleShape::Disc { center, .. } => {
            assert!(approx(center.x, 80.0));
            assert!(approx(center.y, 0.0));
        }
        other => panic!("unexpected outline {:?}", other),
    }

    match h.command_for(&shape, Point::new(0.0, 80.0)) {
        Some(SceneCommand::ChangeEndPoint(cmd)) => {
            let pos = cmd.pos();
            assert!(approx(pos.x, pos.y));
            assert!(approx((pos.x * pos.x + pos.y * pos.y).sqrt(), 100.0));
        }
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn test_change_size_handle_sets_radius() {
    let shape = circle();
    let h = handle(HandleKind::ChangeSize, &shape);
    match h.outline() {
        HandleShape::Disc { center, radius } => {
            assert_eq!(center, Point::new(50.0, 0.0));
            assert_eq!(radius, 5.0);
        }
        other => panic!("unexpected outline {:?}", other),
    }

    match h.command_for(&shape, Point::new(10.0, 0.0)) {
        Some(SceneCommand::ChangeSize(cmd)) => assert!(approx(cmd.radius(), 60.0)),
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn test_canvas_handles_follow_item() {
    let mut canvas = SceneCanvas::new();
    let id = canvas.generate_id();
    canvas.add_item(id, circle());

    canvas.set_handles(id);
    assert_eq!(canvas.handles().len(), 2);
    assert_eq!(canvas.handles_owner(), Some(id));
    assert_eq!(canvas.handle_at(Point::new(50.0, 0.0)), Some(0));
    assert_eq!(canvas.handle_at(Point::new(0.0, 0.0)), Some(1));
    assert_eq!(canvas.handle_at(Point::new(20.0, 20.0)), None);

    canvas.remove_handles_except(0);
    assert_eq!(canvas.handles().len(), 1);
    assert_eq!(canvas.handles()[0].kind(), HandleKind::ChangeSize);

    canvas.remove_item(id);
    assert!(canvas.handles().is_empty());
}
