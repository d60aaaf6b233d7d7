use scenekit_core::{keys, DefinitionError, ShapeDefinition};
use smallvec::smallvec;

use crate::geometry::{distance, Bounds, Point};
use crate::handles::{HandleKind, HandleKinds};

use super::item::{BuildContext, ItemBase};
use super::SceneShape;

/// A circle kept as its bounding square, so center and radius stay
/// derivable from the live geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneCircle {
    base: ItemBase,
    rect: Bounds,
}

impl SceneCircle {
    pub fn from_definition(def: &ShapeDefinition, ctx: &BuildContext) -> Result<Self, DefinitionError> {
        let base = ItemBase::new(def.clone(), ctx.scale_factor);
        let rect = Self::rect_from(&base)?;
        Ok(Self { base, rect })
    }

    fn rect_from(base: &ItemBase) -> Result<Bounds, DefinitionError> {
        let center = base.pixel_point(keys::CENTER)?;
        let radius = base.length_to_pixels(base.definition().require_number(keys::RADIUS)?);
        Ok(square_around(center, radius))
    }

    pub fn radius_pixels(&self) -> f64 {
        self.rect.width() / 2.0
    }

    /// Center in meters.
    pub fn center(&self) -> [f64; 2] {
        self.base.to_meters(self.center_pixel_point())
    }

    /// Radius in meters.
    pub fn radius(&self) -> f64 {
        self.base.length_to_meters(self.radius_pixels())
    }

    /// Sets the radius (pixels), keeping the center.
    pub fn update_size(&mut self, new_radius: f64) {
        self.rect = square_around(self.rect.center(), new_radius.abs());
    }
}

fn square_around(center: Point, radius: f64) -> Bounds {
    Bounds::new(
        center.x - radius,
        center.y - radius,
        center.x + radius,
        center.y + radius,
    )
}

impl SceneShape for SceneCircle {
    fn base(&self) -> &ItemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ItemBase {
        &mut self.base
    }

    fn contains(&self, point: Point) -> bool {
        distance(self.center_pixel_point(), point) < self.radius_pixels()
    }

    fn translate(&mut self, delta: Point) {
        self.rect = Bounds::new(
            self.rect.min_x + delta.x,
            self.rect.min_y + delta.y,
            self.rect.max_x + delta.x,
            self.rect.max_y + delta.y,
        );
    }

    fn center_pixel_point(&self) -> Point {
        self.rect.center()
    }

    fn bounds(&self) -> Bounds {
        self.rect
    }

    fn geometry_definition(&self) -> ShapeDefinition {
        ShapeDefinition::new()
            .with(keys::CENTER, self.center())
            .with(keys::RADIUS, self.radius())
    }

    fn rebuild_geometry(&mut self) -> Result<(), DefinitionError> {
        self.rect = Self::rect_from(&self.base)?;
        Ok(())
    }

    fn handle_kinds(&self) -> HandleKinds {
        smallvec![HandleKind::ChangeSize, HandleKind::Move]
    }
}
