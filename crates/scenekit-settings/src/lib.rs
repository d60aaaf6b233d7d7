//! scenekit Settings Crate
//!
//! Handles editor configuration, the item metadata catalog, and the
//! JSON/TOML file format rule shared by every persisted file.

pub mod config;
pub mod error;
pub mod format;
pub mod metadata;

pub use config::{
    default_config_path, EditorConfig, HandleSettings, UndoSettings, ViewSettings, ZoomSettings,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
pub use format::FileFormat;
pub use metadata::{ItemMetadata, Metadata, PropertyKind, PropertyMetadata};
