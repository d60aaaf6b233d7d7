//! Context menu content.

use crate::geometry::Point;
use crate::item_store::ItemId;

/// Action carried by a context menu entry. Positions are scene pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuAction {
    AddItem { item_type: String, pos: Point },
    Copy(ItemId),
    Paste(Point),
    Edit(ItemId),
    Delete(ItemId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MenuEntry {
    Action { label: String, action: MenuAction },
    Separator,
}

impl MenuEntry {
    pub fn action(label: impl Into<String>, action: MenuAction) -> Self {
        MenuEntry::Action {
            label: label.into(),
            action,
        }
    }

    /// Label, or `None` for separators.
    pub fn label(&self) -> Option<&str> {
        match self {
            MenuEntry::Action { label, .. } => Some(label),
            MenuEntry::Separator => None,
        }
    }

    pub fn menu_action(&self) -> Option<&MenuAction> {
        match self {
            MenuEntry::Action { action, .. } => Some(action),
            MenuEntry::Separator => None,
        }
    }

    pub fn is_separator(&self) -> bool {
        matches!(self, MenuEntry::Separator)
    }
}

/// First entry whose label matches `label`.
pub fn find_action<'a>(entries: &'a [MenuEntry], label: &str) -> Option<&'a MenuAction> {
    entries
        .iter()
        .find(|entry| entry.label() == Some(label))
        .and_then(MenuEntry::menu_action)
}
