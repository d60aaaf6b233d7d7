//! Item metadata catalog
//!
//! Describes, per item type, which constructor builds it, which definition
//! keys must be present, which keys the edit dialog exposes, and the default
//! definition used when an item is added from the context menu. A second
//! table describes each property for dialog rendering.

use scenekit_core::{keys, DefinitionError, ShapeDefinition};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{ConfigError, SettingsError, SettingsResult};
use crate::format;

/// Kind of value a property holds, used to pick a dialog widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    Number,
    Point,
    Text,
    Bool,
    Color,
}

/// Dialog description of one property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyMetadata {
    pub name: String,
    pub label: String,
    pub kind: PropertyKind,
}

impl PropertyMetadata {
    pub fn new(name: &str, label: &str, kind: PropertyKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
        }
    }
}

/// Metadata of one item type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemMetadata {
    #[serde(rename = "type")]
    pub item_type: String,
    /// Identifier of the registered constructor
    pub constructor: String,
    #[serde(default)]
    pub required_properties: Vec<String>,
    #[serde(default)]
    pub editable_properties: Vec<String>,
    /// Definition used by "Add <type>"; types without one are not offered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ShapeDefinition>,
}

impl ItemMetadata {
    /// First required key missing from `def`, as a definition error.
    pub fn check_required_properties(&self, def: &ShapeDefinition) -> Result<(), DefinitionError> {
        match self
            .required_properties
            .iter()
            .find(|key| !def.contains_key(key))
        {
            Some(key) => Err(DefinitionError::MissingProperty {
                key: key.clone(),
                definition: def.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// The editable keys of `def` (keys absent from `def` are left out).
    pub fn editable_subset(&self, def: &ShapeDefinition) -> ShapeDefinition {
        def.subset(self.editable_properties.iter().map(String::as_str))
    }
}

/// The whole catalog
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub items: Vec<ItemMetadata>,
    #[serde(default)]
    pub properties: Vec<PropertyMetadata>,
}

impl Metadata {
    /// Catalog for the four built-in shape types
    pub fn builtin() -> Self {
        let style = ["name", "color", "alpha", "tooltip", "is_movable", "is_selectable"];
        let editable = |extra: &[&str]| -> Vec<String> {
            style.iter().chain(extra.iter()).map(|s| s.to_string()).collect()
        };
        let required = |keys: &[&str]| -> Vec<String> { keys.iter().map(|s| s.to_string()).collect() };

        let items = vec![
            ItemMetadata {
                item_type: "line".into(),
                constructor: "SceneLine".into(),
                required_properties: required(&[keys::START, keys::END]),
                editable_properties: editable(&[keys::WIDTH, keys::START, keys::END]),
                default: Some(
                    ShapeDefinition::new()
                        .with(keys::NAME, "line")
                        .with(keys::START, [0.0, 0.0])
                        .with(keys::END, [1.0, 0.0])
                        .with(keys::COLOR, "blue"),
                ),
            },
            ItemMetadata {
                item_type: "corridor".into(),
                constructor: "SceneCorridor".into(),
                required_properties: required(&[keys::START, keys::END]),
                editable_properties: editable(&[
                    keys::WIDTH,
                    keys::CORRIDOR_WIDTH,
                    keys::SHOW_BORDERS,
                    keys::START,
                    keys::END,
                ]),
                default: Some(
                    ShapeDefinition::new()
                        .with(keys::NAME, "corridor")
                        .with(keys::START, [0.0, 0.0])
                        .with(keys::END, [2.0, 0.0])
                        .with(keys::CORRIDOR_WIDTH, 1.0)
                        .with(keys::SHOW_BORDERS, true)
                        .with(keys::COLOR, "gray"),
                ),
            },
            ItemMetadata {
                item_type: "circle".into(),
                constructor: "SceneCircle".into(),
                required_properties: required(&[keys::CENTER, keys::RADIUS]),
                editable_properties: editable(&[keys::WIDTH, keys::CENTER, keys::RADIUS]),
                default: Some(
                    ShapeDefinition::new()
                        .with(keys::NAME, "circle")
                        .with(keys::CENTER, [0.0, 0.0])
                        .with(keys::RADIUS, 0.5)
                        .with(keys::COLOR, "red"),
                ),
            },
            ItemMetadata {
                item_type: "rectangle".into(),
                constructor: "SceneRectangle".into(),
                required_properties: required(&[keys::CENTER, keys::WIDTH, keys::HEIGHT]),
                editable_properties: editable(&[
                    keys::BORDER_WIDTH,
                    keys::CENTER,
                    keys::WIDTH,
                    keys::HEIGHT,
                    keys::ROTATION,
                ]),
                default: Some(
                    ShapeDefinition::new()
                        .with(keys::NAME, "rectangle")
                        .with(keys::CENTER, [0.0, 0.0])
                        .with(keys::WIDTH, 1.0)
                        .with(keys::HEIGHT, 0.5)
                        .with(keys::ROTATION, 0.0)
                        .with(keys::COLOR, "green"),
                ),
            },
        ];

        use PropertyKind::*;
        let properties = vec![
            PropertyMetadata::new(keys::NAME, "Name", Text),
            PropertyMetadata::new(keys::COLOR, "Color", Color),
            PropertyMetadata::new(keys::ALPHA, "Alpha (0-10)", Number),
            PropertyMetadata::new(keys::TOOLTIP, "Tooltip", Text),
            PropertyMetadata::new(keys::IS_MOVABLE, "Movable", Bool),
            PropertyMetadata::new(keys::IS_SELECTABLE, "Selectable", Bool),
            PropertyMetadata::new(keys::WIDTH, "Width (m)", Number),
            PropertyMetadata::new(keys::HEIGHT, "Height (m)", Number),
            PropertyMetadata::new(keys::START, "Start (m)", Point),
            PropertyMetadata::new(keys::END, "End (m)", Point),
            PropertyMetadata::new(keys::CENTER, "Center (m)", Point),
            PropertyMetadata::new(keys::RADIUS, "Radius (m)", Number),
            PropertyMetadata::new(keys::ROTATION, "Rotation (deg)", Number),
            PropertyMetadata::new(keys::CORRIDOR_WIDTH, "Corridor width (m)", Number),
            PropertyMetadata::new(keys::SHOW_BORDERS, "Show borders", Bool),
            PropertyMetadata::new(keys::BORDER_WIDTH, "Border width (px)", Number),
        ];

        Self { items, properties }
    }

    /// Load a catalog from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let metadata: Self = format::read_file(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;
        metadata.validate()?;
        tracing::debug!(
            "Loaded metadata for {} item types from {}",
            metadata.items.len(),
            path.display()
        );
        Ok(metadata)
    }

    /// Save the catalog to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        format::write_file(path, self)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))
    }

    /// Reject duplicate type names and empty constructor identifiers
    pub fn validate(&self) -> SettingsResult<()> {
        let mut seen = HashSet::new();
        for item in &self.items {
            if !seen.insert(item.item_type.as_str()) {
                return Err(ConfigError::DuplicateType(item.item_type.clone()).into());
            }
            if item.constructor.trim().is_empty() {
                return Err(ConfigError::MissingKey(format!("{}.constructor", item.item_type)).into());
            }
        }
        Ok(())
    }

    pub fn for_type(&self, item_type: &str) -> Option<&ItemMetadata> {
        self.items.iter().find(|item| item.item_type == item_type)
    }

    pub fn property(&self, name: &str) -> Option<&PropertyMetadata> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Item types in catalog order
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.item_type.as_str())
    }

    /// Item types that declare a default definition, in catalog order
    pub fn types_with_default(&self) -> impl Iterator<Item = &str> {
        self.items
            .iter()
            .filter(|item| item.default.is_some())
            .map(|item| item.item_type.as_str())
    }

    /// Default definition for `item_type`, tagged with its type.
    ///
    /// Types without a default yield an empty definition.
    pub fn default_definition(&self, item_type: &str) -> ShapeDefinition {
        match self.for_type(item_type).and_then(|item| item.default.as_ref()) {
            Some(default) => {
                let mut def = default.clone();
                def.insert(keys::TYPE, item_type);
                def
            }
            None => {
                tracing::warn!("No default values for type {}", item_type);
                ShapeDefinition::new()
            }
        }
    }

    /// Checks `def` can be constructed: `type` present and known, required keys present.
    pub fn validate_definition(&self, def: &ShapeDefinition) -> Result<&ItemMetadata, DefinitionError> {
        let item_type = def.item_type().ok_or_else(|| DefinitionError::MissingType {
            definition: def.to_string(),
        })?;
        let item = self
            .for_type(item_type)
            .ok_or_else(|| DefinitionError::UnknownType {
                item_type: item_type.to_string(),
            })?;
        item.check_required_properties(def)?;
        Ok(item)
    }

    /// Dialog descriptions for the given property names, skipping unknown ones
    pub fn dialog_fields<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Vec<PropertyMetadata> {
        names
            .into_iter()
            .filter_map(|name| self.property(name).cloned())
            .collect()
    }
}
