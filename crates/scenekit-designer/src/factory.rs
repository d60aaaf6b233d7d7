//! Type-keyed item construction.

use std::collections::HashMap;

use scenekit_core::{DefinitionError, ShapeDefinition};
use scenekit_settings::Metadata;

use crate::model::{
    BuildContext, SceneCircle, SceneCorridor, SceneLine, SceneRectangle, SceneShape, Shape,
};

/// Builds an item from a definition already checked against its metadata.
pub type ShapeConstructor = fn(&ShapeDefinition, &BuildContext) -> Result<Shape, DefinitionError>;

/// Maps the constructor identifiers named in item metadata to constructors.
#[derive(Debug, Clone)]
pub struct ShapeRegistry {
    constructors: HashMap<String, ShapeConstructor>,
}

impl ShapeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Registry with the four built-in constructors.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry
            .register("SceneLine", |def, ctx| {
                SceneLine::from_definition(def, ctx).map(Shape::Line)
            })
            .register("SceneCorridor", |def, ctx| {
                SceneCorridor::from_definition(def, ctx).map(Shape::Corridor)
            })
            .register("SceneCircle", |def, ctx| {
                SceneCircle::from_definition(def, ctx).map(Shape::Circle)
            })
            .register("SceneRectangle", |def, ctx| {
                SceneRectangle::from_definition(def, ctx).map(Shape::Rectangle)
            });
        registry
    }

    /// Register a constructor under `name`, replacing any previous one
    pub fn register(&mut self, name: impl Into<String>, constructor: ShapeConstructor) -> &mut Self {
        self.constructors.insert(name.into(), constructor);
        self
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered constructor names, sorted
    pub fn list_registered(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Validates `def` against `metadata` and runs the constructor its type
    /// declares.
    pub fn create(
        &self,
        def: &ShapeDefinition,
        metadata: &Metadata,
        ctx: &BuildContext,
    ) -> Result<Shape, DefinitionError> {
        let item = metadata.validate_definition(def)?;
        let constructor = self.constructors.get(&item.constructor).ok_or_else(|| {
            DefinitionError::UnknownConstructor {
                constructor: item.constructor.clone(),
            }
        })?;
        constructor(def, ctx)
    }

    /// Independent copy of `shape` rebuilt from its serialized definition,
    /// at the scale factor the source was built with.
    pub fn clone_item(
        &self,
        shape: &Shape,
        metadata: &Metadata,
        ctx: &BuildContext,
    ) -> Result<Shape, DefinitionError> {
        let ctx = BuildContext {
            scale_factor: shape.base().scale_factor(),
            ..*ctx
        };
        self.create(&shape.serialize(), metadata, &ctx)
    }
}

impl Default for ShapeRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}
