use scenekit_core::constants::{DEFAULT_ALPHA, DEFAULT_PEN_WIDTH_METERS};
use scenekit_core::{keys, ShapeDefinition};

use crate::geometry::scale;

/// Line end cap used when stroking an item outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapStyle {
    Flat,
    Round,
}

/// Stroke parameters for one outline.
#[derive(Debug, Clone, PartialEq)]
pub struct Pen {
    /// Color name or `#rrggbb`; `None` leaves the host default.
    pub color: Option<String>,
    /// Width in pixels.
    pub width: f64,
    pub cap: CapStyle,
    pub dashed: bool,
}

impl Pen {
    pub fn solid(color: Option<String>, width: f64) -> Self {
        Self {
            color,
            width,
            cap: CapStyle::Flat,
            dashed: false,
        }
    }

    /// One-pixel dashed black pen used for corridor centerlines.
    pub fn centerline() -> Self {
        Self {
            color: Some("black".to_string()),
            width: 1.0,
            cap: CapStyle::Flat,
            dashed: true,
        }
    }
}

/// Presentation state derived from a definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStyle {
    pub name: String,
    pub item_type: String,
    pub color: Option<String>,
    /// 0 to 10, opacity is `alpha / 10`.
    pub alpha: f64,
    /// Pen width in pixels, from the `width` key in meters. Only line-like
    /// items stroke with it; on a rectangle `width` is the size and the
    /// outline uses `border_width` instead.
    pub pen_width: f64,
    pub tooltip: Option<String>,
    pub is_movable: bool,
    pub is_selectable: bool,
}

impl ItemStyle {
    pub fn from_definition(def: &ShapeDefinition, scale_factor: f64) -> Self {
        let name = def.get_str(keys::NAME).unwrap_or_default().to_string();
        let tooltip = def
            .get_str(keys::TOOLTIP)
            .map(str::to_string)
            .unwrap_or_else(|| name.clone());

        Self {
            item_type: def.item_type().unwrap_or_default().to_string(),
            color: def
                .get_str(keys::COLOR)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            alpha: def.number_or(keys::ALPHA, DEFAULT_ALPHA),
            pen_width: scale(
                def.number_or(keys::WIDTH, DEFAULT_PEN_WIDTH_METERS),
                scale_factor,
            ),
            tooltip: (!tooltip.is_empty()).then_some(tooltip),
            is_movable: def.bool_or(keys::IS_MOVABLE, false),
            is_selectable: def.bool_or(keys::IS_SELECTABLE, false),
            name,
        }
    }

    pub fn opacity(&self) -> f64 {
        (self.alpha / 10.0).clamp(0.0, 1.0)
    }

    pub fn pen(&self) -> Pen {
        Pen::solid(self.color.clone(), self.pen_width)
    }
}
