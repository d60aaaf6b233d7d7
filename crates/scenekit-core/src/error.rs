//! Error handling for scenekit
//!
//! Provides the error types shared by the scenekit crates:
//! - Definition errors (validation of shape definitions against metadata)
//!
//! All error types use `thiserror` for ergonomic error handling.
//! Degenerate geometry is not an error anywhere in scenekit; the geometry
//! code returns sentinel values instead.

use thiserror::Error;

/// Definition validation error
///
/// Raised when a shape definition cannot be turned into a scene item.
/// The `Display` text is the message shown to the user, so batch loaders
/// collect `to_string()` of these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DefinitionError {
    /// The definition has no `type` key
    #[error("type not present in {definition}, ignored")]
    MissingType {
        /// The offending definition, rendered as JSON.
        definition: String,
    },

    /// No metadata is registered for the type
    #[error("{item_type} type is not implemented")]
    UnknownType {
        /// The unrecognized type tag.
        item_type: String,
    },

    /// A property required by the type metadata is absent
    #[error("{key} not present in {definition}, ignored")]
    MissingProperty {
        /// The missing key.
        key: String,
        /// The offending definition, rendered as JSON.
        definition: String,
    },

    /// Metadata names a constructor that was never registered
    #[error("{constructor} constructor name not implemented")]
    UnknownConstructor {
        /// The constructor identifier declared in metadata.
        constructor: String,
    },

    /// A property is present but holds the wrong kind of value
    #[error("{key} must be a {expected}, found {found}")]
    InvalidValue {
        /// The key holding the bad value.
        key: String,
        /// The expected value kind.
        expected: &'static str,
        /// The value kind actually found.
        found: &'static str,
    },

    /// The input does not follow the `item` wrapper format
    #[error("Invalid items definition format, {0}")]
    InvalidFormat(String),
}
