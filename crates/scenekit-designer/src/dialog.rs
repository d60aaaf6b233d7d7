//! Property-edit dialog contract.
//!
//! The host application owns the actual dialog; the editor only hands it
//! the editable subset of an item's definition and waits for the result.

use scenekit_core::ShapeDefinition;
use scenekit_settings::PropertyMetadata;

/// What the dialog should show.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogConfig {
    pub title: String,
    /// Field descriptions for the editable keys, in display order.
    pub fields: Vec<PropertyMetadata>,
}

/// Modal property editor supplied by the host.
pub trait PropertyDialog {
    /// Shows `values` for editing. Returns the changed keys with their new
    /// values, or `None` when the user cancelled.
    fn show(&mut self, values: &ShapeDefinition, config: &DialogConfig) -> Option<ShapeDefinition>;
}

/// Dialog that always cancels. Useful for headless hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct CancelDialog;

impl PropertyDialog for CancelDialog {
    fn show(&mut self, _values: &ShapeDefinition, _config: &DialogConfig) -> Option<ShapeDefinition> {
        None
    }
}

/// Dialog that answers with a fixed set of changes.
#[derive(Debug, Clone, Default)]
pub struct FixedDialog {
    pub changes: ShapeDefinition,
    /// The last values and config shown.
    pub shown: Option<(ShapeDefinition, DialogConfig)>,
}

impl FixedDialog {
    pub fn new(changes: ShapeDefinition) -> Self {
        Self {
            changes,
            shown: None,
        }
    }
}

impl PropertyDialog for FixedDialog {
    fn show(&mut self, values: &ShapeDefinition, config: &DialogConfig) -> Option<ShapeDefinition> {
        self.shown = Some((values.clone(), config.clone()));
        Some(self.changes.clone())
    }
}
