//! # scenekit
//!
//! Core of an interactive 2D scene editor. Items are described in meters,
//! drawn in scene pixels, and every edit goes through an undoable command.
//!
//! ## Architecture
//!
//! scenekit is organized as a workspace with multiple crates:
//!
//! 1. **scenekit-core** - Shape definitions, constants, definition errors
//! 2. **scenekit-settings** - Editor configuration and the item metadata catalog
//! 3. **scenekit-designer** - Geometry, items, handles, commands, undo, editor
//! 4. **scenekit** - Logging setup, scene loading, and the command-line tool
//!
//! ## Features
//!
//! - **Items**: lines, corridors, circles and rotated rectangles
//! - **Handles**: move, resize, end point and rotate
//! - **Undo/Redo**: linear history with a configurable limit
//! - **Files**: drawings and settings in JSON or TOML

use std::path::Path;

use anyhow::Context;
use tracing::{info, warn};

pub use scenekit_core::{keys, DefinitionError, PropertyValue, ShapeDefinition};
pub use scenekit_designer as designer;
pub use scenekit_designer::{
    Drawing, EventOutcome, InputEvent, ItemId, Point, SceneCanvas, SceneCommand, SceneEditor,
    Shape, ShapeRegistry, UndoStack, Viewport,
};
pub use scenekit_settings::{EditorConfig, Metadata};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output (stderr, so stdout stays free for drawing output)
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to install the logging subscriber")?;

    Ok(())
}

/// Editor configuration from `path`, or the default file when it exists, or
/// the built-in defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<EditorConfig> {
    if let Some(path) = path {
        return EditorConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }
    match scenekit_settings::default_config_path() {
        Ok(default) if default.exists() => EditorConfig::load_from_file(&default)
            .with_context(|| format!("Failed to load config {}", default.display())),
        _ => Ok(EditorConfig::default()),
    }
}

/// Builds an editor and loads `drawing` into it.
///
/// Entries that cannot be built are skipped; their messages are logged and
/// returned alongside the editor.
pub fn open_scene(
    mut config: EditorConfig,
    metadata: Option<&Path>,
    drawing: Option<&Path>,
) -> anyhow::Result<(SceneEditor, Vec<String>)> {
    if let Some(metadata) = metadata {
        config.metadata_file = Some(metadata.to_path_buf());
    }
    let mut editor = SceneEditor::from_config(config).context("Failed to load item metadata")?;

    let mut failures = Vec::new();
    if let Some(path) = drawing {
        let value = scenekit_designer::drawing_io::load_value(path)?;
        failures = editor.add_items(&value);
        for failure in &failures {
            warn!("{}", failure);
        }
        info!(
            "Loaded {} items from {}",
            editor.canvas().len(),
            path.display()
        );
    }
    Ok((editor, failures))
}
