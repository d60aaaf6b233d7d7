//! Editor configuration for scenekit
//!
//! Provides configuration file handling and validation for the editable
//! scene. Supports JSON and TOML file formats.
//!
//! Configuration is organized into logical sections:
//! - View settings (scale factor, selection mode)
//! - Zoom settings (step factor and bounds)
//! - Handle settings (sizes and arrow geometry)
//! - Undo settings (history limit)

use scenekit_core::constants::{
    ARROW_ANGLE_DEGREES, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, DEFAULT_SCALE_FACTOR,
    DEFAULT_ZOOM_FACTOR, HANDLE_SIZE, LINE_CONTAIN_WIDTH, ROTATE_HANDLE_PERCENTAGE,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{SettingsError, SettingsResult};
use crate::format;

/// View settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Pixels per meter, captured by every item at construction
    pub scale_factor: f64,
    /// Allow rubber-band multi-selection on empty canvas
    pub multiple_selection: bool,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            scale_factor: DEFAULT_SCALE_FACTOR,
            multiple_selection: true,
        }
    }
}

/// Zoom settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomSettings {
    /// Multiplicative step per wheel notch
    pub factor: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            factor: DEFAULT_ZOOM_FACTOR,
            min: DEFAULT_MIN_ZOOM,
            max: DEFAULT_MAX_ZOOM,
        }
    }
}

/// Handle settings (pixels and degrees)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandleSettings {
    /// Side of the move handle square and length of arrow heads
    pub size: f64,
    /// Half-angle of end point arrow heads
    pub arrow_angle_degrees: f64,
    /// Position of rotate handles along the line, measured from the pivot
    pub rotate_percentage: f64,
    /// Diameter of the circle resize handle
    pub change_size_diameter: f64,
}

impl Default for HandleSettings {
    fn default() -> Self {
        Self {
            size: HANDLE_SIZE,
            arrow_angle_degrees: ARROW_ANGLE_DEGREES,
            rotate_percentage: ROTATE_HANDLE_PERCENTAGE,
            change_size_diameter: HANDLE_SIZE,
        }
    }
}

/// Undo settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UndoSettings {
    /// Maximum number of commands kept, 0 means unlimited
    pub limit: usize,
}

/// Complete editor configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Hit-test band around plain lines, in pixels
    pub line_contain_width: f64,
    /// Metadata catalog to load instead of the built-in one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_file: Option<PathBuf>,
    pub view: ViewSettings,
    pub zoom: ZoomSettings,
    pub handles: HandleSettings,
    pub undo: UndoSettings,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            line_contain_width: LINE_CONTAIN_WIDTH,
            metadata_file: None,
            view: ViewSettings::default(),
            zoom: ZoomSettings::default(),
            handles: HandleSettings::default(),
            undo: UndoSettings::default(),
        }
    }
}

impl EditorConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let config: Self = format::read_file(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        tracing::debug!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        format::write_file(path, self)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.view.scale_factor <= 0.0 {
            return Err(invalid("view.scale_factor", "must be > 0"));
        }

        if self.zoom.factor <= 1.0 {
            return Err(invalid("zoom.factor", "must be > 1"));
        }

        if self.zoom.min <= 0.0 || self.zoom.min >= self.zoom.max {
            return Err(invalid("zoom.min", "must be > 0 and below zoom.max"));
        }

        if self.handles.size <= 0.0 || self.handles.change_size_diameter <= 0.0 {
            return Err(invalid("handles.size", "must be > 0"));
        }

        if !(0.0..=1.0).contains(&self.handles.rotate_percentage) {
            return Err(invalid("handles.rotate_percentage", "must be within [0, 1]"));
        }

        if self.line_contain_width <= 0.0 {
            return Err(invalid("line_contain_width", "must be > 0"));
        }

        Ok(())
    }
}

fn invalid(key: &str, reason: &str) -> SettingsError {
    SettingsError::InvalidSetting {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

/// Default location of the editor config file: `<config dir>/scenekit/config.toml`
pub fn default_config_path() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("scenekit").join("config.toml"))
        .ok_or_else(|| {
            SettingsError::ConfigDirectory("no configuration directory on this platform".into())
        })
}
