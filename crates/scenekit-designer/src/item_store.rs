//! Item storage with stable ids and draw order.

use std::collections::HashMap;

use crate::model::Shape;

pub type ItemId = u64;

/// Owns every scene item. Ids are never reused; the draw order lists ids
/// bottom to top, so the top-most item is last.
#[derive(Debug, Clone)]
pub struct ItemStore {
    items: HashMap<ItemId, Shape>,
    order: Vec<ItemId>,
    next_id: ItemId,
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemStore {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            order: Vec::new(),
            next_id: 1,
        }
    }

    /// Reserves a fresh id.
    pub fn generate_id(&mut self) -> ItemId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Adds an item on top of the draw order, replacing any item with the same id.
    pub fn insert(&mut self, id: ItemId, shape: Shape) {
        let index = self.order.len();
        self.insert_at(index, id, shape);
    }

    /// Adds an item at `index` in the draw order (clamped to the end).
    pub fn insert_at(&mut self, index: usize, id: ItemId, shape: Shape) {
        if self.items.insert(id, shape).is_some() {
            self.order.retain(|existing| *existing != id);
        }
        let index = index.min(self.order.len());
        self.order.insert(index, id);
        if id >= self.next_id {
            self.next_id = id + 1;
        }
    }

    /// Removes an item, returning its draw-order index and the item.
    pub fn remove(&mut self, id: ItemId) -> Option<(usize, Shape)> {
        let shape = self.items.remove(&id)?;
        let index = self.index_of(id).unwrap_or(self.order.len());
        if index < self.order.len() {
            self.order.remove(index);
        }
        Some((index, shape))
    }

    pub fn get(&self, id: ItemId) -> Option<&Shape> {
        self.items.get(&id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut Shape> {
        self.items.get_mut(&id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.order.iter().position(|existing| *existing == id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Ids bottom to top.
    pub fn ids(&self) -> &[ItemId] {
        &self.order
    }

    /// Items bottom to top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (ItemId, &Shape)> {
        self.order
            .iter()
            .filter_map(move |id| self.items.get(id).map(|shape| (*id, shape)))
    }

    /// Items top to bottom, the order hit tests use.
    pub fn iter_top_down(&self) -> impl Iterator<Item = (ItemId, &Shape)> {
        self.iter().rev()
    }
}
