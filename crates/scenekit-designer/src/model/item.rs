use scenekit_core::constants::{DEFAULT_SCALE_FACTOR, LINE_CONTAIN_WIDTH};
use scenekit_core::{DefinitionError, ShapeDefinition};
use scenekit_settings::EditorConfig;

use crate::geometry::{de_scale, pixel_point_to_point, point_to_pixel_point, scale, Point};

use super::style::ItemStyle;

/// Values an item captures when it is built.
///
/// The scale factor is frozen per item: zooming the view never rescales
/// stored geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildContext {
    pub scale_factor: f64,
    /// Hit-test band around plain lines, in pixels.
    pub line_contain_width: f64,
}

impl Default for BuildContext {
    fn default() -> Self {
        Self {
            scale_factor: DEFAULT_SCALE_FACTOR,
            line_contain_width: LINE_CONTAIN_WIDTH,
        }
    }
}

impl From<&EditorConfig> for BuildContext {
    fn from(config: &EditorConfig) -> Self {
        Self {
            scale_factor: config.view.scale_factor,
            line_contain_width: config.line_contain_width,
        }
    }
}

/// State every item carries: its definition, derived style, and scale factor.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemBase {
    pub(crate) definition: ShapeDefinition,
    pub(crate) style: ItemStyle,
    scale_factor: f64,
}

impl ItemBase {
    pub fn new(definition: ShapeDefinition, scale_factor: f64) -> Self {
        let style = ItemStyle::from_definition(&definition, scale_factor);
        Self {
            definition,
            style,
            scale_factor,
        }
    }

    pub fn definition(&self) -> &ShapeDefinition {
        &self.definition
    }

    pub fn style(&self) -> &ItemStyle {
        &self.style
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub(crate) fn refresh_style(&mut self) {
        self.style = ItemStyle::from_definition(&self.definition, self.scale_factor);
    }

    pub fn to_pixels(&self, point: [f64; 2]) -> Point {
        point_to_pixel_point(point, self.scale_factor)
    }

    pub fn to_meters(&self, pixel: Point) -> [f64; 2] {
        pixel_point_to_point(pixel, self.scale_factor, Point::ORIGIN)
    }

    pub fn length_to_pixels(&self, meters: f64) -> f64 {
        scale(meters, self.scale_factor)
    }

    pub fn length_to_meters(&self, pixels: f64) -> f64 {
        de_scale(pixels, self.scale_factor)
    }

    /// Reads a required point key and converts it to pixels.
    pub(crate) fn pixel_point(&self, key: &str) -> Result<Point, DefinitionError> {
        Ok(self.to_pixels(self.definition.require_point(key)?))
    }
}
