//! # scenekit Core
//!
//! Core types and utilities shared by the scenekit crates.
//! Provides the serializable shape definition model, the numeric
//! tolerances used by the geometry code, and the error taxonomy.

pub mod constants;
pub mod definition;
pub mod error;

pub use definition::{keys, PropertyValue, ShapeDefinition};
pub use error::DefinitionError;
