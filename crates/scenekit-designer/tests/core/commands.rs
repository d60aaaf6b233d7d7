use scenekit_core::{keys, ShapeDefinition};
use scenekit_designer::commands::{
    AddItem, ChangeEndPoint, ChangeProperties, ChangeSize, CopyPaste, RemoveItem, RemoveItems,
    SceneCommand, Translate,
};
use scenekit_designer::geometry::Point;
use scenekit_designer::model::{BuildContext, LineEnd, SceneCircle, SceneLine, SceneShape, Shape};
use scenekit_designer::{ItemId, SceneCanvas, UndoStack};

fn line(name: &str) -> Shape {
    let def = ShapeDefinition::with_type("line")
        .with(keys::NAME, name)
        .with(keys::START, [0.0, 0.0])
        .with(keys::END, [1.0, 0.0]);
    Shape::Line(SceneLine::from_definition(&def, &BuildContext::default()).unwrap())
}

fn circle(name: &str) -> Shape {
    let def = ShapeDefinition::with_type("circle")
        .with(keys::NAME, name)
        .with(keys::CENTER, [0.0, 0.0])
        .with(keys::RADIUS, 0.5);
    Shape::Circle(SceneCircle::from_definition(&def, &BuildContext::default()).unwrap())
}

fn canvas_with(items: Vec<Shape>) -> (SceneCanvas, Vec<ItemId>) {
    let mut canvas = SceneCanvas::new();
    let ids = items
        .into_iter()
        .map(|item| {
            let id = canvas.generate_id();
            canvas.add_item(id, item);
            id
        })
        .collect();
    (canvas, ids)
}

/// `redo` then `undo` must leave the item exactly as it was.
fn assert_round_trip(mut cmd: SceneCommand, canvas: &mut SceneCanvas, id: ItemId) {
    let before = canvas.item(id).cloned();
    cmd.redo(canvas);
    assert_ne!(canvas.item(id).cloned(), before, "{} changed nothing", cmd.name());
    cmd.undo(canvas);
    assert_eq!(canvas.item(id).cloned(), before, "{} did not restore", cmd.name());
}

#[test]
fn test_geometry_commands_restore_exactly() {
    let (mut canvas, ids) = canvas_with(vec![line("l1"), circle("c1")]);
    let (l, c) = (ids[0], ids[1]);

    assert_round_trip(Translate::new(l, Point::new(0.1, 0.7)).into(), &mut canvas, l);
    assert_round_trip(
        ChangeEndPoint::new(l, LineEnd::End, Point::new(33.3, 17.1)).into(),
        &mut canvas,
        l,
    );
    assert_round_trip(ChangeSize::new(c, 71.3).into(), &mut canvas, c);
    assert_round_trip(
        ChangeProperties::new(c, ShapeDefinition::new().with(keys::RADIUS, 2.0)).into(),
        &mut canvas,
        c,
    );
}

#[test]
fn test_change_end_point_on_circle_is_noop() {
    let (mut canvas, ids) = canvas_with(vec![circle("c1")]);
    let before = canvas.item(ids[0]).cloned();
    let mut cmd: SceneCommand = ChangeEndPoint::new(ids[0], LineEnd::End, Point::new(5.0, 5.0)).into();
    cmd.redo(&mut canvas);
    assert_eq!(canvas.item(ids[0]).cloned(), before);
    cmd.undo(&mut canvas);
    assert_eq!(canvas.item(ids[0]).cloned(), before);
}

#[test]
fn test_change_properties_with_bad_value_leaves_item() {
    let (mut canvas, ids) = canvas_with(vec![circle("c1")]);
    let before = canvas.item(ids[0]).cloned();
    let mut cmd: SceneCommand =
        ChangeProperties::new(ids[0], ShapeDefinition::new().with(keys::RADIUS, "big")).into();
    cmd.redo(&mut canvas);
    assert_eq!(canvas.item(ids[0]).cloned(), before);
}

#[test]
fn test_change_properties_captures_state_when_pushed() {
    let (mut canvas, ids) = canvas_with(vec![circle("c1")]);
    let id = ids[0];
    let cmd = ChangeProperties::new(id, ShapeDefinition::new().with(keys::RADIUS, 2.0));

    // Moved after the command was built but before it ran.
    canvas.item_mut(id).unwrap().translate(Point::new(30.0, 0.0));
    let mut stack = UndoStack::new();
    stack.push(cmd.into(), &mut canvas);
    assert!(stack.undo(&mut canvas));

    let item = canvas.item(id).unwrap();
    assert_eq!(item.center_pixel_point(), Point::new(30.0, 0.0));
    assert_eq!(item.as_circle().unwrap().radius_pixels(), 50.0);
}

#[test]
fn test_add_item_undo_redo() {
    let mut canvas = SceneCanvas::new();
    let id = canvas.generate_id();
    let mut cmd: SceneCommand = AddItem::new(id, circle("c1")).into();

    cmd.redo(&mut canvas);
    assert!(canvas.contains_item(id));
    cmd.undo(&mut canvas);
    assert!(!canvas.contains_item(id));
    cmd.redo(&mut canvas);
    assert!(canvas.contains_item(id));
    assert_eq!(canvas.item(id).unwrap().name(), "c1");
}

#[test]
fn test_remove_item_restores_draw_position() {
    let (mut canvas, ids) = canvas_with(vec![line("a"), line("b"), line("c")]);
    let mut cmd: SceneCommand = RemoveItem::new(ids[1]).into();
    cmd.redo(&mut canvas);
    assert_eq!(canvas.ids(), &[ids[0], ids[2]]);
    cmd.undo(&mut canvas);
    assert_eq!(canvas.ids(), ids.as_slice());
}

#[test]
fn test_remove_items_restores_order() {
    let (mut canvas, ids) = canvas_with(vec![line("a"), line("b"), line("c"), line("d")]);
    let mut cmd: SceneCommand = RemoveItems::new(vec![ids[3], ids[0], ids[2]]).into();
    cmd.redo(&mut canvas);
    assert_eq!(canvas.ids(), &[ids[1]]);
    cmd.undo(&mut canvas);
    assert_eq!(canvas.ids(), ids.as_slice());
}

#[test]
fn test_remove_item_drops_handles_and_selection() {
    let (mut canvas, ids) = canvas_with(vec![circle("c1")]);
    canvas.set_handles(ids[0]);
    canvas.select(ids[0], false);
    let mut cmd: SceneCommand = RemoveItem::new(ids[0]).into();
    cmd.redo(&mut canvas);
    assert!(canvas.handles().is_empty());
    assert!(canvas.selection().is_empty());
}

#[test]
fn test_copy_paste_adds_prebuilt_instance() {
    let (mut canvas, ids) = canvas_with(vec![circle("c1")]);
    let id = canvas.generate_id();
    let mut copy = circle("c1");
    copy.translate(Point::new(200.0, 0.0));

    let mut cmd: SceneCommand = CopyPaste::new(ids[0], id, copy.clone()).into();
    assert_eq!(cmd.name(), "Paste item");
    cmd.redo(&mut canvas);
    assert_eq!(canvas.item(id), Some(&copy));
    cmd.undo(&mut canvas);
    assert!(!canvas.contains_item(id));
    assert!(canvas.contains_item(ids[0]));
}

#[test]
fn test_undo_stack_walks_history() {
    let (mut canvas, ids) = canvas_with(vec![circle("c1")]);
    let id = ids[0];
    let mut stack = UndoStack::new();
    assert!(!stack.can_undo());

    stack.push(Translate::new(id, Point::new(10.0, 0.0)).into(), &mut canvas);
    stack.push(ChangeSize::new(id, 80.0).into(), &mut canvas);
    assert_eq!(stack.undo_text(), Some("Change size"));
    assert_eq!(canvas.item(id).unwrap().center_pixel_point(), Point::new(10.0, 0.0));

    assert!(stack.undo(&mut canvas));
    assert_eq!(stack.redo_text(), Some("Change size"));
    assert_eq!(canvas.item(id).unwrap().as_circle().unwrap().radius_pixels(), 50.0);

    assert!(stack.undo(&mut canvas));
    assert!(!stack.undo(&mut canvas));
    assert_eq!(canvas.item(id).unwrap().center_pixel_point(), Point::new(0.0, 0.0));

    assert!(stack.redo(&mut canvas));
    assert!(stack.redo(&mut canvas));
    assert!(!stack.redo(&mut canvas));
    assert_eq!(canvas.item(id).unwrap().as_circle().unwrap().radius_pixels(), 80.0);
}

#[test]
fn test_push_after_undo_drops_redo_tail() {
    let (mut canvas, ids) = canvas_with(vec![circle("c1")]);
    let mut stack = UndoStack::new();
    stack.push(Translate::new(ids[0], Point::new(1.0, 0.0)).into(), &mut canvas);
    stack.push(Translate::new(ids[0], Point::new(2.0, 0.0)).into(), &mut canvas);
    stack.undo(&mut canvas);

    stack.push(ChangeSize::new(ids[0], 20.0).into(), &mut canvas);
    assert_eq!(stack.len(), 2);
    assert!(!stack.can_redo());
    assert_eq!(stack.undo_text(), Some("Change size"));
}

#[test]
fn test_undo_stack_limit() {
    let (mut canvas, ids) = canvas_with(vec![circle("c1")]);
    let mut stack = UndoStack::with_limit(2);
    for _ in 0..3 {
        stack.push(Translate::new(ids[0], Point::new(1.0, 0.0)).into(), &mut canvas);
    }
    assert_eq!(stack.len(), 2);
    assert_eq!(stack.index(), 2);

    assert!(stack.undo(&mut canvas));
    assert!(stack.undo(&mut canvas));
    assert!(!stack.undo(&mut canvas));
    // The oldest move fell off the history and stays applied.
    assert_eq!(canvas.item(ids[0]).unwrap().center_pixel_point(), Point::new(1.0, 0.0));
}
