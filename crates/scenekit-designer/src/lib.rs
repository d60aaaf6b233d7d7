//! # scenekit Designer
//!
//! Interactive 2D scene editing: geometry, scene items, handles, and the
//! undoable command engine behind them.
//!
//! ## Core Components
//!
//! - **Geometry**: stateless point/segment math in scene pixels
//! - **Items**: lines, corridors, circles and rectangles built from
//!   meters-space definitions through a type-keyed registry
//! - **Handles**: move, resize, end point and rotate affordances that turn
//!   drags into commands
//! - **Commands/Undo**: every mutation is a reversible command on a linear
//!   history
//! - **Editor**: input dispatch, context menu, copy buffer and selection
//!
//! ## Architecture
//!
//! ```text
//! SceneEditor (events, menu, copy buffer)
//!   ├── UndoStack ── SceneCommand
//!   ├── ShapeRegistry + Metadata (construction)
//!   └── SceneCanvas
//!         ├── ItemStore (items by id, draw order)
//!         ├── Handles (ids only)
//!         └── Viewport (zoom/pan)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use scenekit_designer::{Point, SceneEditor};
//!
//! let mut editor = SceneEditor::default();
//! let id = editor.add_item_from_ui("circle", Point::new(200.0, 100.0));
//! editor.undo();
//! ```

pub mod canvas;
pub mod commands;
pub mod dialog;
pub mod drawing_io;
pub mod editor;
pub mod factory;
pub mod geometry;
pub mod handles;
pub mod item_store;
pub mod model;
pub mod render;
pub mod undo;
pub mod viewport;

pub use canvas::SceneCanvas;
pub use commands::{
    AddItem, ChangeEndPoint, ChangeProperties, ChangeSize, CopyPaste, RemoveItem, RemoveItems,
    SceneCommand, Translate,
};
pub use dialog::{CancelDialog, DialogConfig, FixedDialog, PropertyDialog};
pub use drawing_io::{Drawing, DrawingEntry};
pub use editor::{
    DragState, EventOutcome, InputEvent, Key, MenuAction, MenuEntry, Modifiers, MouseButton,
    SceneEditor,
};
pub use factory::{ShapeConstructor, ShapeRegistry};
pub use geometry::{Bounds, Point, Segment};
pub use handles::{Handle, HandleKind, HandleShape, HandleStyle};
pub use item_store::{ItemId, ItemStore};
pub use model::{
    BuildContext, ItemStyle, LineEnd, Pen, SceneCircle, SceneCorridor, SceneLine, SceneRectangle,
    SceneShape, Shape, ShapeKind,
};
pub use render::{render_handle, render_item, render_scene, RenderPrimitive};
pub use undo::UndoStack;
pub use viewport::Viewport;
