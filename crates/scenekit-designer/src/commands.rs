//! Reversible scene mutations.
//!
//! Every change to the item collection goes through a [`SceneCommand`].
//! Commands hold item ids, never item references. Geometry commands take a
//! value snapshot of the item on `redo` and put it back on `undo`, so a
//! `redo(); undo()` pair leaves the item exactly as it was.

use scenekit_core::ShapeDefinition;
use tracing::{debug, warn};

use crate::canvas::SceneCanvas;
use crate::geometry::Point;
use crate::item_store::ItemId;
use crate::model::{LineEnd, SceneShape, Shape};

#[derive(Debug, Clone)]
#[allow(clippy::large_enum_variant)]
pub enum SceneCommand {
    AddItem(AddItem),
    RemoveItem(RemoveItem),
    RemoveItems(RemoveItems),
    Translate(Translate),
    ChangeEndPoint(ChangeEndPoint),
    ChangeSize(ChangeSize),
    ChangeProperties(ChangeProperties),
    CopyPaste(CopyPaste),
}

impl SceneCommand {
    /// Applies (or re-applies) the command.
    pub fn redo(&mut self, canvas: &mut SceneCanvas) {
        debug!("redo {}", self.name());
        match self {
            SceneCommand::AddItem(cmd) => cmd.redo(canvas),
            SceneCommand::RemoveItem(cmd) => cmd.redo(canvas),
            SceneCommand::RemoveItems(cmd) => cmd.redo(canvas),
            SceneCommand::Translate(cmd) => cmd.redo(canvas),
            SceneCommand::ChangeEndPoint(cmd) => cmd.redo(canvas),
            SceneCommand::ChangeSize(cmd) => cmd.redo(canvas),
            SceneCommand::ChangeProperties(cmd) => cmd.redo(canvas),
            SceneCommand::CopyPaste(cmd) => cmd.redo(canvas),
        }
    }

    /// Reverts the last `redo`.
    pub fn undo(&mut self, canvas: &mut SceneCanvas) {
        debug!("undo {}", self.name());
        match self {
            SceneCommand::AddItem(cmd) => cmd.undo(canvas),
            SceneCommand::RemoveItem(cmd) => cmd.undo(canvas),
            SceneCommand::RemoveItems(cmd) => cmd.undo(canvas),
            SceneCommand::Translate(cmd) => cmd.snapshot.restore(canvas, cmd.id),
            SceneCommand::ChangeEndPoint(cmd) => cmd.snapshot.restore(canvas, cmd.id),
            SceneCommand::ChangeSize(cmd) => cmd.snapshot.restore(canvas, cmd.id),
            SceneCommand::ChangeProperties(cmd) => cmd.snapshot.restore(canvas, cmd.id),
            SceneCommand::CopyPaste(cmd) => cmd.undo(canvas),
        }
    }

    /// Label shown next to "Undo"/"Redo".
    pub fn name(&self) -> &str {
        match self {
            SceneCommand::AddItem(_) => "Add item",
            SceneCommand::RemoveItem(_) => "Remove item",
            SceneCommand::RemoveItems(_) => "Remove items",
            SceneCommand::Translate(_) => "Move item",
            SceneCommand::ChangeEndPoint(_) => "Change end point",
            SceneCommand::ChangeSize(_) => "Change size",
            SceneCommand::ChangeProperties(_) => "Change properties",
            SceneCommand::CopyPaste(_) => "Paste item",
        }
    }
}

macro_rules! impl_from_command {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for SceneCommand {
                fn from(cmd: $variant) -> Self {
                    SceneCommand::$variant(cmd)
                }
            }
        )*
    };
}

impl_from_command!(
    AddItem,
    RemoveItem,
    RemoveItems,
    Translate,
    ChangeEndPoint,
    ChangeSize,
    ChangeProperties,
    CopyPaste,
);

/// Value copy of an item taken just before a geometry command mutates it.
#[derive(Debug, Clone, Default)]
struct Snapshot(Option<Shape>);

impl Snapshot {
    /// Runs `apply` on the item, keeping a copy of its prior state. When
    /// `apply` reports nothing changed the item is put back untouched.
    fn capture(
        &mut self,
        canvas: &mut SceneCanvas,
        id: ItemId,
        apply: impl FnOnce(&mut Shape) -> bool,
    ) {
        let Some(item) = canvas.item_mut(id) else {
            warn!("item {} is no longer in the scene", id);
            return;
        };
        let before = item.clone();
        if apply(item) {
            self.0 = Some(before);
        } else {
            *item = before;
        }
    }

    fn restore(&mut self, canvas: &mut SceneCanvas, id: ItemId) {
        if let Some(before) = self.0.take() {
            canvas.replace_item(id, before);
        }
    }
}

/// Puts a new item on top of the scene.
#[derive(Debug, Clone)]
pub struct AddItem {
    id: ItemId,
    index: Option<usize>,
    item: Option<Shape>, // Some while the item is off the canvas
}

impl AddItem {
    pub fn new(id: ItemId, item: Shape) -> Self {
        Self {
            id,
            index: None,
            item: Some(item),
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    fn redo(&mut self, canvas: &mut SceneCanvas) {
        if let Some(item) = self.item.take() {
            match self.index {
                Some(index) => canvas.insert_item_at(index, self.id, item),
                None => canvas.add_item(self.id, item),
            }
        }
    }

    fn undo(&mut self, canvas: &mut SceneCanvas) {
        if let Some((index, item)) = canvas.remove_item(self.id) {
            self.index = Some(index);
            self.item = Some(item);
        }
    }
}

#[derive(Debug, Clone)]
pub struct RemoveItem {
    id: ItemId,
    removed: Option<(usize, Shape)>,
}

impl RemoveItem {
    pub fn new(id: ItemId) -> Self {
        Self { id, removed: None }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    fn redo(&mut self, canvas: &mut SceneCanvas) {
        self.removed = canvas.remove_item(self.id);
    }

    fn undo(&mut self, canvas: &mut SceneCanvas) {
        if let Some((index, item)) = self.removed.take() {
            canvas.insert_item_at(index, self.id, item);
        }
    }
}

/// Removes several items at once; undo puts each back at its old position.
#[derive(Debug, Clone)]
pub struct RemoveItems {
    ids: Vec<ItemId>,
    removed: Vec<(usize, ItemId, Shape)>,
}

impl RemoveItems {
    pub fn new(ids: Vec<ItemId>) -> Self {
        Self {
            ids,
            removed: Vec::new(),
        }
    }

    pub fn ids(&self) -> &[ItemId] {
        &self.ids
    }

    fn redo(&mut self, canvas: &mut SceneCanvas) {
        self.removed.clear();
        for &id in &self.ids {
            if let Some((index, item)) = canvas.remove_item(id) {
                self.removed.push((index, id, item));
            }
        }
    }

    fn undo(&mut self, canvas: &mut SceneCanvas) {
        // Reverse removal order so every captured index is valid again.
        while let Some((index, id, item)) = self.removed.pop() {
            canvas.insert_item_at(index, id, item);
        }
    }
}

#[derive(Debug, Clone)]
pub struct Translate {
    id: ItemId,
    delta: Point,
    snapshot: Snapshot,
}

impl Translate {
    pub fn new(id: ItemId, delta: Point) -> Self {
        Self {
            id,
            delta,
            snapshot: Snapshot::default(),
        }
    }

    pub fn delta(&self) -> Point {
        self.delta
    }

    fn redo(&mut self, canvas: &mut SceneCanvas) {
        let delta = self.delta;
        self.snapshot.capture(canvas, self.id, |item| {
            item.translate(delta);
            true
        });
    }
}

#[derive(Debug, Clone)]
pub struct ChangeEndPoint {
    id: ItemId,
    end: LineEnd,
    pos: Point,
    snapshot: Snapshot,
}

impl ChangeEndPoint {
    pub fn new(id: ItemId, end: LineEnd, pos: Point) -> Self {
        Self {
            id,
            end,
            pos,
            snapshot: Snapshot::default(),
        }
    }

    pub fn end(&self) -> LineEnd {
        self.end
    }

    pub fn pos(&self) -> Point {
        self.pos
    }

    fn redo(&mut self, canvas: &mut SceneCanvas) {
        let (end, pos) = (self.end, self.pos);
        self.snapshot
            .capture(canvas, self.id, |item| item.update_line_end_point(end, pos));
    }
}

#[derive(Debug, Clone)]
pub struct ChangeSize {
    id: ItemId,
    radius: f64,
    snapshot: Snapshot,
}

impl ChangeSize {
    /// `radius` in pixels.
    pub fn new(id: ItemId, radius: f64) -> Self {
        Self {
            id,
            radius,
            snapshot: Snapshot::default(),
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    fn redo(&mut self, canvas: &mut SceneCanvas) {
        let radius = self.radius;
        self.snapshot
            .capture(canvas, self.id, |item| item.update_size(radius));
    }
}

/// Merges edited properties into an item's definition. The whole prior
/// item is captured on the first redo, which `UndoStack::push` runs
/// immediately, rather than when the command is created.
#[derive(Debug, Clone)]
pub struct ChangeProperties {
    id: ItemId,
    changes: ShapeDefinition,
    snapshot: Snapshot,
}

impl ChangeProperties {
    pub fn new(id: ItemId, changes: ShapeDefinition) -> Self {
        Self {
            id,
            changes,
            snapshot: Snapshot::default(),
        }
    }

    pub fn changes(&self) -> &ShapeDefinition {
        &self.changes
    }

    fn redo(&mut self, canvas: &mut SceneCanvas) {
        let (id, changes) = (self.id, &self.changes);
        self.snapshot.capture(canvas, id, |item| match item.update_properties(changes) {
            Ok(()) => true,
            Err(err) => {
                warn!("Properties of item {} not changed: {}", id, err);
                false
            }
        });
    }
}

/// Adds a copy of another item. The copy is built when the command is
/// created, so undo removes exactly that instance.
#[derive(Debug, Clone)]
pub struct CopyPaste {
    source: ItemId,
    id: ItemId,
    index: Option<usize>,
    item: Option<Shape>,
}

impl CopyPaste {
    pub fn new(source: ItemId, id: ItemId, item: Shape) -> Self {
        Self {
            source,
            id,
            index: None,
            item: Some(item),
        }
    }

    pub fn source(&self) -> ItemId {
        self.source
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    fn redo(&mut self, canvas: &mut SceneCanvas) {
        if let Some(item) = self.item.take() {
            match self.index {
                Some(index) => canvas.insert_item_at(index, self.id, item),
                None => canvas.add_item(self.id, item),
            }
        }
    }

    fn undo(&mut self, canvas: &mut SceneCanvas) {
        if let Some((index, item)) = canvas.remove_item(self.id) {
            self.index = Some(index);
            self.item = Some(item);
        }
    }
}
