//! Serializable shape definitions.
//!
//! A [`ShapeDefinition`] is the flat, meters-space description of one scene
//! item: a mapping from string keys to primitive values. It is the contract
//! any persistence layer round-trips and the snapshot that undo commands keep.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DefinitionError;

/// Well-known definition keys.
pub mod keys {
    pub const TYPE: &str = "type";
    pub const NAME: &str = "name";
    pub const START: &str = "start";
    pub const END: &str = "end";
    pub const CENTER: &str = "center";
    pub const RADIUS: &str = "radius";
    pub const WIDTH: &str = "width";
    pub const HEIGHT: &str = "height";
    pub const ROTATION: &str = "rotation";
    pub const COLOR: &str = "color";
    pub const ALPHA: &str = "alpha";
    pub const TOOLTIP: &str = "tooltip";
    pub const IS_MOVABLE: &str = "is_movable";
    pub const IS_SELECTABLE: &str = "is_selectable";
    pub const CORRIDOR_WIDTH: &str = "corridor_width";
    pub const SHOW_BORDERS: &str = "show_borders";
    pub const BORDER_WIDTH: &str = "border_width";
}

/// A single definition value.
///
/// Variant order matters for untagged deserialization: booleans and numbers
/// are tried before point pairs and strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Number(f64),
    Point([f64; 2]),
    Text(String),
}

impl PropertyValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_point(&self) -> Option<[f64; 2]> {
        match self {
            PropertyValue::Point(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Short name of the value kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            PropertyValue::Bool(_) => "bool",
            PropertyValue::Number(_) => "number",
            PropertyValue::Point(_) => "point",
            PropertyValue::Text(_) => "text",
        }
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Number(value)
    }
}

impl From<[f64; 2]> for PropertyValue {
    fn from(value: [f64; 2]) -> Self {
        PropertyValue::Point(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

/// Flat key/value description of a scene item.
///
/// Keys are kept sorted so two definitions with the same content compare and
/// serialize identically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeDefinition {
    values: BTreeMap<String, PropertyValue>,
}

impl ShapeDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a definition carrying only its `type` tag.
    pub fn with_type(item_type: impl Into<String>) -> Self {
        let mut def = Self::new();
        def.insert(keys::TYPE, item_type.into());
        def
    }

    /// Builder-style insert.
    pub fn with(mut self, key: &str, value: impl Into<PropertyValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<PropertyValue>) -> Option<PropertyValue> {
        self.values.insert(key.to_string(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<PropertyValue> {
        self.values.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The `type` tag, if present and textual.
    pub fn item_type(&self) -> Option<&str> {
        self.get_str(keys::TYPE)
    }

    pub fn get_number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(PropertyValue::as_number)
    }

    pub fn get_point(&self, key: &str) -> Option<[f64; 2]> {
        self.get(key).and_then(PropertyValue::as_point)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(PropertyValue::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(PropertyValue::as_bool)
    }

    pub fn number_or(&self, key: &str, default: f64) -> f64 {
        self.get_number(key).unwrap_or(default)
    }

    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        self.get_bool(key).unwrap_or(default)
    }

    /// Reads a required number, distinguishing "absent" from "wrong kind".
    pub fn require_number(&self, key: &str) -> Result<f64, DefinitionError> {
        match self.get(key) {
            None => Err(self.missing(key)),
            Some(value) => value.as_number().ok_or_else(|| DefinitionError::InvalidValue {
                key: key.to_string(),
                expected: "number",
                found: value.kind(),
            }),
        }
    }

    /// Reads a required point pair, distinguishing "absent" from "wrong kind".
    pub fn require_point(&self, key: &str) -> Result<[f64; 2], DefinitionError> {
        match self.get(key) {
            None => Err(self.missing(key)),
            Some(value) => value.as_point().ok_or_else(|| DefinitionError::InvalidValue {
                key: key.to_string(),
                expected: "point",
                found: value.kind(),
            }),
        }
    }

    /// Overwrites the keys present in `changes`, keeping every other key.
    pub fn merge(&mut self, changes: &ShapeDefinition) {
        for (key, value) in &changes.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    /// Copies the listed keys that are present; absent keys are skipped.
    pub fn subset<'a>(&self, wanted: impl IntoIterator<Item = &'a str>) -> ShapeDefinition {
        let mut out = ShapeDefinition::new();
        for key in wanted {
            if let Some(value) = self.values.get(key) {
                out.values.insert(key.to_string(), value.clone());
            }
        }
        out
    }

    fn missing(&self, key: &str) -> DefinitionError {
        DefinitionError::MissingProperty {
            key: key.to_string(),
            definition: self.to_string(),
        }
    }
}

impl fmt::Display for ShapeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(&self.values) {
            Ok(text) => f.write_str(&text),
            Err(_) => write!(f, "{:?}", self.values),
        }
    }
}

impl FromIterator<(String, PropertyValue)> for ShapeDefinition {
    fn from_iter<T: IntoIterator<Item = (String, PropertyValue)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
