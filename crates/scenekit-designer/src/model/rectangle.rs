use nalgebra::{Isometry2, Point2, Vector2};
use scenekit_core::constants::DEFAULT_BORDER_WIDTH_PIXELS;
use scenekit_core::{keys, DefinitionError, ShapeDefinition};
use smallvec::smallvec;

use crate::geometry::{Bounds, Point};
use crate::handles::{HandleKind, HandleKinds};
use crate::model::style::Pen;

use super::item::{BuildContext, ItemBase};
use super::SceneShape;

/// Filled rectangle given by center, size, and a rotation (degrees) about
/// its center.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneRectangle {
    base: ItemBase,
    center: Point,
    width: f64,
    height: f64,
    rotation: f64,
    border_width: f64,
}

impl SceneRectangle {
    pub fn from_definition(def: &ShapeDefinition, ctx: &BuildContext) -> Result<Self, DefinitionError> {
        let base = ItemBase::new(def.clone(), ctx.scale_factor);
        let mut rect = Self {
            base,
            center: Point::ORIGIN,
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
            border_width: DEFAULT_BORDER_WIDTH_PIXELS,
        };
        rect.rebuild_geometry()?;
        Ok(rect)
    }

    pub fn width_pixels(&self) -> f64 {
        self.width
    }

    pub fn height_pixels(&self) -> f64 {
        self.height
    }

    /// Rotation in degrees.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn border_width(&self) -> f64 {
        self.border_width
    }

    /// Border pen: default color, fixed pixel width independent of the
    /// scale factor. The item color fills the rectangle instead.
    pub fn border_pen(&self) -> Pen {
        Pen::solid(None, self.border_width)
    }

    fn isometry(&self) -> Isometry2<f64> {
        Isometry2::new(
            Vector2::new(self.center.x, self.center.y),
            self.rotation.to_radians(),
        )
    }

    /// Corners in scene pixels, counter-clockwise from the local bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        let iso = self.isometry();
        let (hw, hh) = (self.width / 2.0, self.height / 2.0);
        [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)].map(|(x, y)| {
            let p = iso * Point2::new(x, y);
            Point::new(p.x, p.y)
        })
    }

    /// Maps a scene point into the rectangle's local frame.
    pub fn map_from_scene(&self, point: Point) -> Point {
        let local = self
            .isometry()
            .inverse_transform_point(&Point2::new(point.x, point.y));
        Point::new(local.x, local.y)
    }
}

impl SceneShape for SceneRectangle {
    fn base(&self) -> &ItemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ItemBase {
        &mut self.base
    }

    fn contains(&self, point: Point) -> bool {
        let local = self.map_from_scene(point);
        local.x.abs() <= self.width / 2.0 && local.y.abs() <= self.height / 2.0
    }

    fn translate(&mut self, delta: Point) {
        self.center = self.center + delta;
    }

    fn center_pixel_point(&self) -> Point {
        self.center
    }

    fn bounds(&self) -> Bounds {
        Bounds::from_points(self.corners()).unwrap_or_else(|| Bounds::from_corners(self.center, self.center))
    }

    fn geometry_definition(&self) -> ShapeDefinition {
        ShapeDefinition::new()
            .with(keys::CENTER, self.base.to_meters(self.center))
            .with(keys::WIDTH, self.base.length_to_meters(self.width))
            .with(keys::HEIGHT, self.base.length_to_meters(self.height))
            .with(keys::ROTATION, self.rotation)
    }

    fn rebuild_geometry(&mut self) -> Result<(), DefinitionError> {
        let def = self.base.definition();
        let center = self.base.pixel_point(keys::CENTER)?;
        let width = self.base.length_to_pixels(def.number_or(keys::WIDTH, 1.0));
        let height = self.base.length_to_pixels(def.number_or(keys::HEIGHT, 1.0));
        let rotation = def.number_or(keys::ROTATION, 0.0);
        let border_width = def.number_or(keys::BORDER_WIDTH, DEFAULT_BORDER_WIDTH_PIXELS);

        self.center = center;
        self.width = width;
        self.height = height;
        self.rotation = rotation;
        self.border_width = border_width;
        Ok(())
    }

    fn handle_kinds(&self) -> HandleKinds {
        smallvec![HandleKind::Move]
    }
}
