//! Scene items.
//!
//! Each item owns its definition (meters), its live geometry (scene
//! pixels), and a style derived from the definition. Live geometry is
//! folded back into the definition by [`SceneShape::serialize`].

use scenekit_core::{DefinitionError, ShapeDefinition};

use crate::geometry::{Bounds, Point};
use crate::handles::HandleKinds;

mod circle;
mod corridor;
mod item;
mod line;
mod rectangle;
mod style;

pub use circle::SceneCircle;
pub use corridor::SceneCorridor;
pub use item::{BuildContext, ItemBase};
pub use line::{LineEnd, SceneLine};
pub use rectangle::SceneRectangle;
pub use style::{CapStyle, ItemStyle, Pen};

/// Capabilities shared by every scene item.
pub trait SceneShape {
    fn base(&self) -> &ItemBase;
    fn base_mut(&mut self) -> &mut ItemBase;

    /// Hit test in scene pixels.
    fn contains(&self, point: Point) -> bool;
    fn translate(&mut self, delta: Point);
    fn center_pixel_point(&self) -> Point;
    fn bounds(&self) -> Bounds;

    /// Geometry keys (meters) computed from the live pixel geometry.
    fn geometry_definition(&self) -> ShapeDefinition;

    /// Recomputes live geometry from the stored definition. Leaves the
    /// geometry untouched on error.
    fn rebuild_geometry(&mut self) -> Result<(), DefinitionError>;

    /// Handles shown when the item is selected, in display order.
    fn handle_kinds(&self) -> HandleKinds;

    /// Definition with the current geometry folded in.
    fn serialize(&self) -> ShapeDefinition {
        let mut def = self.base().definition().clone();
        def.merge(&self.geometry_definition());
        def
    }

    /// Writes the current geometry back into the stored definition.
    fn sync_definition(&mut self) {
        let geometry = self.geometry_definition();
        self.base_mut().definition.merge(&geometry);
    }

    /// Merges `changes` into the definition, then rebuilds style and geometry
    /// from the merged result. On failure the item is left as it was.
    fn update_properties(&mut self, changes: &ShapeDefinition) -> Result<(), DefinitionError> {
        self.sync_definition();
        let previous = self.base().definition().clone();

        let base = self.base_mut();
        base.definition.merge(changes);
        base.refresh_style();

        if let Err(err) = self.rebuild_geometry() {
            let base = self.base_mut();
            base.definition = previous;
            base.refresh_style();
            return Err(err);
        }
        Ok(())
    }

    fn item_type(&self) -> &str {
        &self.base().style().item_type
    }

    fn name(&self) -> &str {
        &self.base().style().name
    }

    fn type_and_name(&self) -> String {
        format!("{} {}", self.item_type(), self.name())
    }

    fn style(&self) -> &ItemStyle {
        self.base().style()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Line,
    Corridor,
    Circle,
    Rectangle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line(SceneLine),
    Corridor(SceneCorridor),
    Circle(SceneCircle),
    Rectangle(SceneRectangle),
}

impl SceneShape for Shape {
    fn base(&self) -> &ItemBase {
        match self {
            Shape::Line(s) => s.base(),
            Shape::Corridor(s) => s.base(),
            Shape::Circle(s) => s.base(),
            Shape::Rectangle(s) => s.base(),
        }
    }

    fn base_mut(&mut self) -> &mut ItemBase {
        match self {
            Shape::Line(s) => s.base_mut(),
            Shape::Corridor(s) => s.base_mut(),
            Shape::Circle(s) => s.base_mut(),
            Shape::Rectangle(s) => s.base_mut(),
        }
    }

    fn contains(&self, point: Point) -> bool {
        match self {
            Shape::Line(s) => s.contains(point),
            Shape::Corridor(s) => s.contains(point),
            Shape::Circle(s) => s.contains(point),
            Shape::Rectangle(s) => s.contains(point),
        }
    }

    fn translate(&mut self, delta: Point) {
        match self {
            Shape::Line(s) => s.translate(delta),
            Shape::Corridor(s) => s.translate(delta),
            Shape::Circle(s) => s.translate(delta),
            Shape::Rectangle(s) => s.translate(delta),
        }
    }

    fn center_pixel_point(&self) -> Point {
        match self {
            Shape::Line(s) => s.center_pixel_point(),
            Shape::Corridor(s) => s.center_pixel_point(),
            Shape::Circle(s) => s.center_pixel_point(),
            Shape::Rectangle(s) => s.center_pixel_point(),
        }
    }

    fn bounds(&self) -> Bounds {
        match self {
            Shape::Line(s) => s.bounds(),
            Shape::Corridor(s) => s.bounds(),
            Shape::Circle(s) => s.bounds(),
            Shape::Rectangle(s) => s.bounds(),
        }
    }

    fn geometry_definition(&self) -> ShapeDefinition {
        match self {
            Shape::Line(s) => s.geometry_definition(),
            Shape::Corridor(s) => s.geometry_definition(),
            Shape::Circle(s) => s.geometry_definition(),
            Shape::Rectangle(s) => s.geometry_definition(),
        }
    }

    fn rebuild_geometry(&mut self) -> Result<(), DefinitionError> {
        match self {
            Shape::Line(s) => s.rebuild_geometry(),
            Shape::Corridor(s) => s.rebuild_geometry(),
            Shape::Circle(s) => s.rebuild_geometry(),
            Shape::Rectangle(s) => s.rebuild_geometry(),
        }
    }

    fn handle_kinds(&self) -> HandleKinds {
        match self {
            Shape::Line(s) => s.handle_kinds(),
            Shape::Corridor(s) => s.handle_kinds(),
            Shape::Circle(s) => s.handle_kinds(),
            Shape::Rectangle(s) => s.handle_kinds(),
        }
    }
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Line(_) => ShapeKind::Line,
            Shape::Corridor(_) => ShapeKind::Corridor,
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Rectangle(_) => ShapeKind::Rectangle,
        }
    }

    /// The centerline of lines and corridors.
    pub fn as_line(&self) -> Option<&SceneLine> {
        match self {
            Shape::Line(s) => Some(s),
            Shape::Corridor(s) => Some(s.line()),
            _ => None,
        }
    }

    pub fn as_circle(&self) -> Option<&SceneCircle> {
        match self {
            Shape::Circle(s) => Some(s),
            _ => None,
        }
    }

    /// Moves one end of a line or corridor. Returns `false` for other items.
    pub fn update_line_end_point(&mut self, end: LineEnd, pos: Point) -> bool {
        match self {
            Shape::Line(s) => s.update_line_end_point(end, pos),
            Shape::Corridor(s) => s.update_line_end_point(end, pos),
            _ => return false,
        }
        true
    }

    /// Sets a circle radius in pixels. Returns `false` for other items.
    pub fn update_size(&mut self, radius: f64) -> bool {
        match self {
            Shape::Circle(s) => {
                s.update_size(radius);
                true
            }
            _ => false,
        }
    }
}
