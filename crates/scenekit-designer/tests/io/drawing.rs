use scenekit_core::{keys, ShapeDefinition};
use scenekit_designer::drawing_io::load_value;
use scenekit_designer::geometry::Point;
use scenekit_designer::{Drawing, SceneEditor};
use tempfile::TempDir;

fn sample_editor() -> SceneEditor {
    let mut editor = SceneEditor::default();
    editor
        .add_definition(
            &ShapeDefinition::with_type("line")
                .with(keys::NAME, "wall")
                .with(keys::START, [0.0, 0.0])
                .with(keys::END, [4.0, 0.0]),
        )
        .unwrap();
    editor
        .add_definition(
            &ShapeDefinition::with_type("corridor")
                .with(keys::START, [0.0, 1.0])
                .with(keys::END, [4.0, 1.0])
                .with(keys::CORRIDOR_WIDTH, 0.8)
                .with(keys::SHOW_BORDERS, true),
        )
        .unwrap();
    editor
        .add_definition(
            &ShapeDefinition::with_type("rectangle")
                .with(keys::CENTER, [2.0, 3.0])
                .with(keys::WIDTH, 1.0)
                .with(keys::HEIGHT, 0.5)
                .with(keys::ROTATION, 45.0)
                .with(keys::COLOR, "#336699"),
        )
        .unwrap();
    editor
}

#[test]
fn test_drawing_round_trip_json_and_toml() {
    let temp_dir = TempDir::new().unwrap();
    let drawing = sample_editor().drawing();
    assert_eq!(drawing.len(), 3);

    for name in ["drawing.json", "drawing.toml"] {
        let path = temp_dir.path().join(name);
        drawing.save_to_file(&path).unwrap();
        let loaded = Drawing::load_from_file(&path).unwrap();
        assert_eq!(loaded, drawing, "{}", name);
    }
}

#[test]
fn test_unsupported_extension() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("drawing.yaml");
    assert!(Drawing::default().save_to_file(&path).is_err());
    assert!(Drawing::load_from_file(&path).is_err());
}

#[test]
fn test_missing_file_error_names_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.json");
    let err = Drawing::load_from_file(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("absent.json"));
}

#[test]
fn test_reloaded_drawing_matches_edited_scene() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("edited.json");

    let mut editor = sample_editor();
    let first = editor.canvas().ids()[0];
    editor.push(scenekit_designer::Translate::new(first, Point::new(50.0, 50.0)).into());
    editor.drawing().save_to_file(&path).unwrap();

    let mut reloaded = SceneEditor::default();
    let failures = reloaded.add_items(&load_value(&path).unwrap());
    assert!(failures.is_empty(), "{:?}", failures);
    assert_eq!(reloaded.get_items(), editor.get_items());
    assert_eq!(
        reloaded.get_items()[0].get_point(keys::START),
        Some([0.5, 0.5])
    );
}

#[test]
fn test_load_drawing_skips_bad_entries() {
    let mut drawing = sample_editor().drawing();
    drawing.items.push(scenekit_designer::DrawingEntry {
        item: ShapeDefinition::with_type("polygon"),
    });

    let mut editor = SceneEditor::default();
    let failures = editor.load_drawing(&drawing);
    assert_eq!(failures, vec!["polygon type is not implemented".to_string()]);
    assert_eq!(editor.canvas().len(), 3);
}
