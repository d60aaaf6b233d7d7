//! Scene editor.
//!
//! Owns the canvas, the undo history, the copy buffer and the metadata
//! catalog, and turns input events and menu actions into commands.

mod events;
mod menu;

pub use events::{EventOutcome, InputEvent, Key, Modifiers, MouseButton};
pub use menu::{find_action, MenuAction, MenuEntry};

use scenekit_core::{DefinitionError, ShapeDefinition};
use scenekit_settings::{EditorConfig, Metadata, SettingsResult};
use serde_json::Value;
use tracing::{debug, warn};

use crate::canvas::SceneCanvas;
use crate::commands::{
    AddItem, ChangeProperties, CopyPaste, RemoveItem, RemoveItems, SceneCommand, Translate,
};
use crate::dialog::{DialogConfig, PropertyDialog};
use crate::drawing_io::{Drawing, ITEMS_KEY, ITEM_KEY};
use crate::factory::ShapeRegistry;
use crate::geometry::{Bounds, Point};
use crate::item_store::ItemId;
use crate::model::{BuildContext, SceneShape};
use crate::undo::UndoStack;

/// Pointer gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    /// Dragging the handle at `index`; `origin` is the press position.
    HandleDrag { index: usize, origin: Point },
    /// Dragging a movable item; `last` is the previous pointer position.
    ItemDrag { id: ItemId, last: Point, moved: bool },
    /// Panning the view; `last` is in screen pixels.
    Pan { last: Point },
    /// Rubber-band selection between two scene points.
    RubberBand { origin: Point, current: Point },
}

#[derive(Debug, Clone)]
pub struct SceneEditor {
    canvas: SceneCanvas,
    undo_stack: UndoStack,
    copy_buffer: Option<ItemId>,
    metadata: Metadata,
    registry: ShapeRegistry,
    config: EditorConfig,
    build: BuildContext,
    drag: DragState,
    cursor: Point,
}

impl Default for SceneEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default(), Metadata::builtin())
    }
}

impl SceneEditor {
    pub fn new(config: EditorConfig, metadata: Metadata) -> Self {
        Self {
            canvas: SceneCanvas::with_config(&config),
            undo_stack: UndoStack::with_limit(config.undo.limit),
            copy_buffer: None,
            metadata,
            registry: ShapeRegistry::with_builtin(),
            build: BuildContext::from(&config),
            config,
            drag: DragState::Idle,
            cursor: Point::ORIGIN,
        }
    }

    /// Editor using the metadata file named by `config`, or the built-in
    /// catalog when there is none.
    pub fn from_config(config: EditorConfig) -> SettingsResult<Self> {
        let metadata = match &config.metadata_file {
            Some(path) => Metadata::load_from_file(path)?,
            None => Metadata::builtin(),
        };
        Ok(Self::new(config, metadata))
    }

    pub fn with_registry(mut self, registry: ShapeRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn canvas(&self) -> &SceneCanvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut SceneCanvas {
        &mut self.canvas
    }

    pub fn undo_stack(&self) -> &UndoStack {
        &self.undo_stack
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn registry(&self) -> &ShapeRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ShapeRegistry {
        &mut self.registry
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn build_context(&self) -> &BuildContext {
        &self.build
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Last known pointer position, scene pixels.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn set_cursor(&mut self, screen: Point) {
        self.cursor = self.to_scene(screen);
    }

    pub fn copy_buffer(&self) -> Option<ItemId> {
        self.copy_buffer
    }

    fn to_scene(&self, screen: Point) -> Point {
        self.canvas.viewport().screen_to_scene(screen)
    }

    /// Executes `cmd` and records it in the undo history.
    pub fn push(&mut self, cmd: SceneCommand) {
        self.undo_stack.push(cmd, &mut self.canvas);
    }

    pub fn undo(&mut self) -> bool {
        self.end_gesture();
        self.undo_stack.undo(&mut self.canvas)
    }

    pub fn redo(&mut self) -> bool {
        self.end_gesture();
        self.undo_stack.redo(&mut self.canvas)
    }

    fn end_gesture(&mut self) {
        self.canvas.remove_handles();
        self.drag = DragState::Idle;
    }

    // Loading

    /// Adds every entry of a drawing value. Entries that cannot be built are
    /// skipped and their messages returned.
    pub fn add_items(&mut self, drawing: &Value) -> Vec<String> {
        let Some(entries) = drawing.get(ITEMS_KEY).and_then(Value::as_array) else {
            let err = DefinitionError::InvalidFormat(format!(
                "group {} not present in {}",
                ITEMS_KEY, drawing
            ));
            return vec![err.to_string()];
        };
        entries
            .iter()
            .filter_map(|entry| self.add_item(entry).err())
            .map(|err| err.to_string())
            .collect()
    }

    /// Adds one `{ "item": {...} }` entry, outside the undo history.
    pub fn add_item(&mut self, entry: &Value) -> Result<ItemId, DefinitionError> {
        let item = entry.get(ITEM_KEY).ok_or_else(|| {
            DefinitionError::InvalidFormat(format!("{} not present in {}", ITEM_KEY, entry))
        })?;
        let def: ShapeDefinition = serde_json::from_value(item.clone())
            .map_err(|err| DefinitionError::InvalidFormat(err.to_string()))?;
        self.add_definition(&def)
    }

    /// Builds `def` and puts it on top of the scene, outside the undo history.
    pub fn add_definition(&mut self, def: &ShapeDefinition) -> Result<ItemId, DefinitionError> {
        let item = self
            .registry
            .create(def, &self.metadata, &self.build)
            .inspect_err(|err| warn!("{}", err))?;
        let id = self.canvas.generate_id();
        self.canvas.add_item(id, item);
        Ok(id)
    }

    /// Adds every item of a typed drawing, collecting failure messages.
    pub fn load_drawing(&mut self, drawing: &Drawing) -> Vec<String> {
        drawing
            .definitions()
            .filter_map(|def| self.add_definition(def).err())
            .map(|err| err.to_string())
            .collect()
    }

    /// Serialized items in draw order.
    pub fn get_items(&self) -> Vec<ShapeDefinition> {
        self.canvas.get_items()
    }

    pub fn drawing(&self) -> Drawing {
        Drawing::from_items(self.get_items())
    }

    // Undoable operations

    /// Builds the default item of `item_type`, moves it by `pos` (scene
    /// pixels) and adds it through the undo history.
    pub fn add_item_from_ui(&mut self, item_type: &str, pos: Point) -> Option<ItemId> {
        let def = self.metadata.default_definition(item_type);
        let mut item = match self.registry.create(&def, &self.metadata, &self.build) {
            Ok(item) => item,
            Err(err) => {
                warn!("Cannot add {}: {}", item_type, err);
                return None;
            }
        };
        item.translate(pos);
        let id = self.canvas.generate_id();
        self.push(AddItem::new(id, item).into());
        Some(id)
    }

    pub fn delete_item(&mut self, id: ItemId) -> bool {
        if !self.canvas.contains_item(id) {
            return false;
        }
        self.push(RemoveItem::new(id).into());
        true
    }

    /// Removes the selection as one undoable step. Returns the number removed.
    pub fn delete_selected_items(&mut self) -> usize {
        let ids = self.canvas.selection().to_vec();
        if ids.is_empty() {
            return 0;
        }
        let count = ids.len();
        self.push(RemoveItems::new(ids).into());
        count
    }

    /// Removes every item as one undoable step.
    pub fn clear(&mut self) {
        let ids = self.canvas.ids().to_vec();
        if !ids.is_empty() {
            self.push(RemoveItems::new(ids).into());
        }
    }

    pub fn copy_item(&mut self, id: ItemId) -> bool {
        if !self.canvas.contains_item(id) {
            return false;
        }
        self.copy_buffer = Some(id);
        true
    }

    /// Pastes a copy of the copy buffer item centered on `pos` (scene pixels).
    pub fn paste_item(&mut self, pos: Point) -> Option<ItemId> {
        let source = self.copy_buffer?;
        let Some(item) = self.canvas.item(source) else {
            warn!("Copied item {} is no longer in the scene", source);
            return None;
        };
        let mut copy = match self.registry.clone_item(item, &self.metadata, &self.build) {
            Ok(copy) => copy,
            Err(err) => {
                warn!("Cannot paste item {}: {}", source, err);
                return None;
            }
        };
        let delta = pos - copy.center_pixel_point();
        copy.translate(delta);
        let id = self.canvas.generate_id();
        self.end_gesture();
        self.push(CopyPaste::new(source, id, copy).into());
        Some(id)
    }

    /// Shows the editable properties of `id` in `dialog` and applies the
    /// result as one undoable step. Cancelling changes nothing.
    pub fn edit_item(&mut self, id: ItemId, dialog: &mut dyn PropertyDialog) -> bool {
        let Some(item) = self.canvas.item(id) else {
            return false;
        };
        let Some(item_metadata) = self.metadata.for_type(item.item_type()) else {
            warn!("{} type is not implemented", item.item_type());
            return false;
        };
        let values = item_metadata.editable_subset(&item.serialize());
        let config = DialogConfig {
            title: format!("Edit {}", item.type_and_name()),
            fields: self
                .metadata
                .dialog_fields(item_metadata.editable_properties.iter().map(String::as_str)),
        };

        match dialog.show(&values, &config) {
            Some(changes) if !changes.is_empty() => {
                // Active handles would keep the old geometry.
                self.end_gesture();
                self.push(ChangeProperties::new(id, changes).into());
                true
            }
            _ => false,
        }
    }

    pub fn set_visible_type(&mut self, item_type: &str, visible: bool) {
        self.canvas.set_visible_type(item_type, visible);
    }

    // Context menu

    /// Menu for a right click at `pos` (scene pixels).
    pub fn context_menu(&self, pos: Point) -> Vec<MenuEntry> {
        let mut entries: Vec<MenuEntry> = self
            .metadata
            .types_with_default()
            .map(|item_type| {
                MenuEntry::action(
                    format!("Add {}", item_type),
                    MenuAction::AddItem {
                        item_type: item_type.to_string(),
                        pos,
                    },
                )
            })
            .collect();

        let under_cursor = self
            .canvas
            .item_at(pos)
            .and_then(|id| self.canvas.item(id).map(|item| (id, item.type_and_name())));

        let mut copy_paste = Vec::new();
        if let Some((id, name)) = &under_cursor {
            copy_paste.push(MenuEntry::action(format!("Copy {}", name), MenuAction::Copy(*id)));
        }
        if let Some(source) = self.copy_buffer.and_then(|id| self.canvas.item(id)) {
            copy_paste.push(MenuEntry::action(
                format!("Paste {}", source.type_and_name()),
                MenuAction::Paste(pos),
            ));
        }
        if !entries.is_empty() && !copy_paste.is_empty() {
            entries.push(MenuEntry::Separator);
        }
        entries.extend(copy_paste);

        if let Some((id, name)) = under_cursor {
            entries.push(MenuEntry::Separator);
            entries.push(MenuEntry::action(format!("Edit {}", name), MenuAction::Edit(id)));
            entries.push(MenuEntry::action(format!("Delete {}", name), MenuAction::Delete(id)));
        }
        entries
    }

    /// Runs a menu action. Returns whether anything changed.
    pub fn trigger(&mut self, action: &MenuAction, dialog: &mut dyn PropertyDialog) -> bool {
        debug!("menu action {:?}", action);
        match action {
            MenuAction::AddItem { item_type, pos } => self.add_item_from_ui(item_type, *pos).is_some(),
            MenuAction::Copy(id) => self.copy_item(*id),
            MenuAction::Paste(pos) => self.paste_item(*pos).is_some(),
            MenuAction::Edit(id) => self.edit_item(*id, dialog),
            MenuAction::Delete(id) => self.delete_item(*id),
        }
    }

    // Input dispatch

    pub fn handle_event(&mut self, event: &InputEvent) -> EventOutcome {
        debug!("{}", event.description());
        match *event {
            InputEvent::Press {
                pos,
                button,
                modifiers,
            } => self.on_press(pos, button, modifiers),
            InputEvent::Move { pos } => self.on_move(pos),
            InputEvent::Release { pos, .. } => self.on_release(pos),
            InputEvent::Wheel { pos, delta } => self.on_wheel(pos, delta),
            InputEvent::ContextMenu { pos } => {
                self.cursor = self.to_scene(pos);
                EventOutcome::ContextMenu(self.context_menu(self.cursor))
            }
            InputEvent::Key { key, modifiers } => self.on_key(key, modifiers),
        }
    }

    fn on_press(&mut self, screen: Point, button: MouseButton, modifiers: Modifiers) -> EventOutcome {
        let scene = self.to_scene(screen);
        self.cursor = scene;
        match button {
            MouseButton::Right => EventOutcome::Ignored,
            MouseButton::Middle => {
                self.drag = DragState::Pan { last: screen };
                EventOutcome::Handled
            }
            MouseButton::Left => {
                if let Some(index) = self.canvas.handle_at(scene) {
                    self.drag = DragState::HandleDrag {
                        index,
                        origin: scene,
                    };
                    return EventOutcome::Handled;
                }
                match self.canvas.item_at(scene) {
                    Some(id) => self.press_on_item(id, scene, modifiers),
                    None => {
                        self.canvas.clear_selection();
                        self.canvas.remove_handles();
                        self.drag = if self.config.view.multiple_selection {
                            DragState::RubberBand {
                                origin: scene,
                                current: scene,
                            }
                        } else {
                            DragState::Idle
                        };
                        EventOutcome::Handled
                    }
                }
            }
        }
    }

    fn press_on_item(&mut self, id: ItemId, scene: Point, modifiers: Modifiers) -> EventOutcome {
        let Some(item) = self.canvas.item(id) else {
            return EventOutcome::Ignored;
        };
        let (selectable, movable) = (item.style().is_selectable, item.style().is_movable);

        if selectable {
            let extend =
                self.config.view.multiple_selection && (modifiers.ctrl || modifiers.shift);
            self.canvas.select(id, extend);
        } else {
            self.canvas.clear_selection();
        }
        self.canvas.set_handles(id);

        if movable {
            self.drag = DragState::ItemDrag {
                id,
                last: scene,
                moved: false,
            };
        }
        EventOutcome::Handled
    }

    fn on_move(&mut self, screen: Point) -> EventOutcome {
        let scene = self.to_scene(screen);
        self.cursor = scene;
        match self.drag {
            DragState::Idle => EventOutcome::Ignored,
            DragState::HandleDrag { index, origin } => self.drag_handle(index, origin, scene),
            DragState::ItemDrag { id, last, moved } => {
                let delta = scene - last;
                if delta == Point::ORIGIN {
                    return EventOutcome::Ignored;
                }
                if !moved {
                    self.canvas.remove_handles();
                }
                self.push(Translate::new(id, delta).into());
                self.drag = DragState::ItemDrag {
                    id,
                    last: scene,
                    moved: true,
                };
                EventOutcome::Handled
            }
            DragState::Pan { last } => {
                self.canvas
                    .viewport_mut()
                    .pan_by(screen.x - last.x, screen.y - last.y);
                self.drag = DragState::Pan { last: screen };
                EventOutcome::Handled
            }
            DragState::RubberBand { origin, .. } => {
                self.drag = DragState::RubberBand {
                    origin,
                    current: scene,
                };
                EventOutcome::Handled
            }
        }
    }

    fn drag_handle(&mut self, index: usize, origin: Point, scene: Point) -> EventOutcome {
        let mut index = index;
        if self.canvas.handles().len() > 1 {
            // The dragged handle is the only one left while it moves.
            self.canvas.remove_handles_except(index);
            index = 0;
            self.drag = DragState::HandleDrag { index, origin };
        }

        let offset = scene - origin;
        let command = {
            let Some(handle) = self.canvas.handles().get(index) else {
                self.drag = DragState::Idle;
                return EventOutcome::Ignored;
            };
            let Some(item) = self.canvas.item(handle.item()) else {
                self.end_gesture();
                return EventOutcome::Ignored;
            };
            handle.command_for(item, offset)
        };

        if let Some(command) = command {
            self.push(command);
        }
        if let Some(handle) = self.canvas.handle_mut(index) {
            handle.set_offset(offset);
        }
        EventOutcome::Handled
    }

    fn on_release(&mut self, screen: Point) -> EventOutcome {
        self.cursor = self.to_scene(screen);
        let outcome = match self.drag {
            DragState::Idle => EventOutcome::Ignored,
            DragState::HandleDrag { .. } => {
                // Handles are rebuilt on the next click.
                self.canvas.remove_handles();
                EventOutcome::Handled
            }
            DragState::ItemDrag { id, moved, .. } => {
                if moved {
                    self.canvas.set_handles(id);
                }
                EventOutcome::Handled
            }
            DragState::Pan { .. } => EventOutcome::Handled,
            DragState::RubberBand { origin, current } => {
                let band = Bounds::from_corners(origin, current);
                let ids = self.canvas.items_in_bounds(&band);
                debug!("rubber band selected {} items", ids.len());
                self.canvas.set_selection(ids);
                EventOutcome::Handled
            }
        };
        self.drag = DragState::Idle;
        outcome
    }

    fn on_wheel(&mut self, screen: Point, delta: f64) -> EventOutcome {
        if delta == 0.0 {
            return EventOutcome::Ignored;
        }
        let viewport = self.canvas.viewport_mut();
        let changed = if delta > 0.0 {
            viewport.zoom_in_at(screen)
        } else {
            viewport.zoom_out_at(screen)
        };
        if changed {
            EventOutcome::Handled
        } else {
            EventOutcome::Ignored
        }
    }

    fn on_key(&mut self, key: Key, modifiers: Modifiers) -> EventOutcome {
        let changed = match key {
            Key::Char(c) if modifiers.ctrl => match c.to_ascii_lowercase() {
                'z' => self.undo(),
                'y' => self.redo(),
                'c' => match self.canvas.item_at(self.cursor) {
                    Some(id) => self.copy_item(id),
                    None => false,
                },
                'v' => self.paste_item(self.cursor).is_some(),
                _ => false,
            },
            Key::Char(_) => false,
            Key::Delete => self.delete_selected_items() > 0,
            Key::Escape => {
                self.canvas.clear_selection();
                self.end_gesture();
                true
            }
        };
        if changed {
            EventOutcome::Handled
        } else {
            EventOutcome::Ignored
        }
    }
}
