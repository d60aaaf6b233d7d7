//! Drawing files.
//!
//! A drawing is the list of serialized items, `{ "items": [ { "item": {...} } ] }`,
//! stored as JSON or TOML depending on the file extension.

use std::path::Path;

use anyhow::{Context, Result};
use scenekit_core::ShapeDefinition;
use scenekit_settings::FileFormat;
use serde::{Deserialize, Serialize};

/// Key of the item list in a drawing.
pub const ITEMS_KEY: &str = "items";
/// Key wrapping each definition in the item list.
pub const ITEM_KEY: &str = "item";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingEntry {
    pub item: ShapeDefinition,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    #[serde(default)]
    pub items: Vec<DrawingEntry>,
}

impl Drawing {
    pub fn from_items(items: impl IntoIterator<Item = ShapeDefinition>) -> Self {
        Self {
            items: items.into_iter().map(|item| DrawingEntry { item }).collect(),
        }
    }

    pub fn definitions(&self) -> impl Iterator<Item = &ShapeDefinition> {
        self.items.iter().map(|entry| &entry.item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Save drawing to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let format = FileFormat::from_path(path)?;
        let content = format
            .render(self)
            .with_context(|| format!("Failed to serialize drawing for {}", path.display()))?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write drawing file {}", path.display()))?;
        Ok(())
    }

    /// Load drawing from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let value = load_value(path)?;
        serde_json::from_value(value).context("Failed to parse drawing file")
    }
}

/// Loads a drawing file without checking its shape, for callers that
/// report format problems per entry.
pub fn load_value(path: impl AsRef<Path>) -> Result<serde_json::Value> {
    let path = path.as_ref();
    let format = FileFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read drawing file {}", path.display()))?;
    format
        .parse(&content)
        .with_context(|| format!("Failed to parse drawing file {}", path.display()))
}
