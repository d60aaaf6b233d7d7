//! Canvas holding the scene items, the active handles, the selection and
//! the viewport.

use std::collections::HashSet;

use scenekit_core::ShapeDefinition;
use scenekit_settings::EditorConfig;
use tracing::debug;

use crate::geometry::{Bounds, Point};
use crate::handles::{Handle, HandleStyle};
use crate::item_store::{ItemId, ItemStore};
use crate::model::{SceneShape, Shape};
use crate::viewport::Viewport;

#[derive(Debug, Clone)]
pub struct SceneCanvas {
    store: ItemStore,
    handles: Vec<Handle>,
    selection: Vec<ItemId>,
    hidden_types: HashSet<String>,
    viewport: Viewport,
    handle_style: HandleStyle,
}

impl Default for SceneCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneCanvas {
    pub fn new() -> Self {
        Self::with_config(&EditorConfig::default())
    }

    pub fn with_config(config: &EditorConfig) -> Self {
        Self {
            store: ItemStore::new(),
            handles: Vec::new(),
            selection: Vec::new(),
            hidden_types: HashSet::new(),
            viewport: Viewport::with_zoom_settings(1200.0, 800.0, &config.zoom),
            handle_style: HandleStyle::from(&config.handles),
        }
    }

    pub fn generate_id(&mut self) -> ItemId {
        self.store.generate_id()
    }

    /// Adds an item on top of the draw order.
    pub fn add_item(&mut self, id: ItemId, item: Shape) {
        self.store.insert(id, item);
    }

    pub fn insert_item_at(&mut self, index: usize, id: ItemId, item: Shape) {
        self.store.insert_at(index, id, item);
    }

    /// Removes an item together with its handles and selection entry.
    pub fn remove_item(&mut self, id: ItemId) -> Option<(usize, Shape)> {
        let removed = self.store.remove(id)?;
        self.handles.retain(|h| h.item() != id);
        self.selection.retain(|s| *s != id);
        Some(removed)
    }

    /// Swaps in a new state for an existing item, keeping its draw position.
    pub fn replace_item(&mut self, id: ItemId, item: Shape) {
        if let Some(slot) = self.store.get_mut(id) {
            *slot = item;
        }
    }

    pub fn item(&self, id: ItemId) -> Option<&Shape> {
        self.store.get(id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Shape> {
        self.store.get_mut(id)
    }

    pub fn contains_item(&self, id: ItemId) -> bool {
        self.store.contains(id)
    }

    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.store.index_of(id)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Item ids bottom to top.
    pub fn ids(&self) -> &[ItemId] {
        self.store.ids()
    }

    /// Items bottom to top.
    pub fn items(&self) -> impl DoubleEndedIterator<Item = (ItemId, &Shape)> {
        self.store.iter()
    }

    /// Serialized items in draw order.
    pub fn get_items(&self) -> Vec<ShapeDefinition> {
        self.store.iter().map(|(_, item)| item.serialize()).collect()
    }

    pub fn is_visible(&self, item: &Shape) -> bool {
        !self.hidden_types.contains(item.item_type())
    }

    /// Shows or hides every item of `item_type`. Hidden items lose their
    /// handles and selection.
    pub fn set_visible_type(&mut self, item_type: &str, visible: bool) {
        if visible {
            self.hidden_types.remove(item_type);
            return;
        }
        self.hidden_types.insert(item_type.to_string());
        let hidden: Vec<ItemId> = self
            .store
            .iter()
            .filter(|(_, item)| item.item_type() == item_type)
            .map(|(id, _)| id)
            .collect();
        self.handles.retain(|h| !hidden.contains(&h.item()));
        self.selection.retain(|s| !hidden.contains(s));
    }

    pub fn is_type_visible(&self, item_type: &str) -> bool {
        !self.hidden_types.contains(item_type)
    }

    /// Top-most visible item containing `point` (scene pixels).
    pub fn item_at(&self, point: Point) -> Option<ItemId> {
        self.store
            .iter_top_down()
            .find(|(_, item)| self.is_visible(item) && item.contains(point))
            .map(|(id, _)| id)
    }

    /// Visible, selectable items whose bounds intersect `bounds`, bottom to top.
    pub fn items_in_bounds(&self, bounds: &Bounds) -> Vec<ItemId> {
        self.store
            .iter()
            .filter(|(_, item)| {
                self.is_visible(item) && item.style().is_selectable && item.bounds().intersects(bounds)
            })
            .map(|(id, _)| id)
            .collect()
    }

    pub fn handles(&self) -> &[Handle] {
        &self.handles
    }

    pub(crate) fn handle_mut(&mut self, index: usize) -> Option<&mut Handle> {
        self.handles.get_mut(index)
    }

    /// Index of the top-most handle containing `point`.
    pub fn handle_at(&self, point: Point) -> Option<usize> {
        self.handles.iter().rposition(|h| h.contains(point))
    }

    /// Replaces every active handle with the handle set of `id`.
    pub fn set_handles(&mut self, id: ItemId) {
        self.handles.clear();
        if let Some(item) = self.store.get(id) {
            self.handles = Handle::for_item(id, item, &self.handle_style);
            debug!("{} handles on item {}", self.handles.len(), id);
        }
    }

    pub fn remove_handles(&mut self) {
        self.handles.clear();
    }

    /// Drops every handle but the one at `index`, which becomes index 0.
    pub fn remove_handles_except(&mut self, index: usize) {
        if index < self.handles.len() {
            let keep = self.handles.swap_remove(index);
            self.handles.clear();
            self.handles.push(keep);
        }
    }

    /// Item owning the active handles, if any.
    pub fn handles_owner(&self) -> Option<ItemId> {
        self.handles.first().map(Handle::item)
    }

    pub fn handle_style(&self) -> &HandleStyle {
        &self.handle_style
    }

    pub fn selection(&self) -> &[ItemId] {
        &self.selection
    }

    pub fn is_selected(&self, id: ItemId) -> bool {
        self.selection.contains(&id)
    }

    /// Selects `id`; without `extend` the previous selection is dropped.
    pub fn select(&mut self, id: ItemId, extend: bool) {
        if !extend {
            self.selection.clear();
        }
        if self.store.contains(id) && !self.selection.contains(&id) {
            self.selection.push(id);
        }
    }

    pub fn set_selection(&mut self, ids: Vec<ItemId>) {
        self.selection = ids.into_iter().filter(|id| self.store.contains(*id)).collect();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }
}
