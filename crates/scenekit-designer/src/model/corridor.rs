use scenekit_core::constants::DEFAULT_CORRIDOR_WIDTH_METERS;
use scenekit_core::{keys, DefinitionError, ShapeDefinition};

use crate::geometry::{parallel_segments, rectangle_from_line, Bounds, Point, Segment};
use crate::handles::HandleKinds;

use super::item::{BuildContext, ItemBase};
use super::line::{LineEnd, SceneLine};
use super::SceneShape;

/// A centerline with a width, drawn with two optional border lines.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneCorridor {
    line: SceneLine,
    /// Full band width in pixels.
    corridor_width: f64,
    show_borders: bool,
    borders: [Segment; 2],
}

impl SceneCorridor {
    pub fn from_definition(def: &ShapeDefinition, ctx: &BuildContext) -> Result<Self, DefinitionError> {
        let mut line = SceneLine::from_definition(def, ctx)?;
        let corridor_width = line
            .base()
            .length_to_pixels(def.number_or(keys::CORRIDOR_WIDTH, DEFAULT_CORRIDOR_WIDTH_METERS));
        line.set_contain_width(corridor_width);
        let mut corridor = Self {
            line,
            corridor_width,
            show_borders: def.bool_or(keys::SHOW_BORDERS, false),
            borders: [Segment::new(Point::ORIGIN, Point::ORIGIN); 2],
        };
        corridor.update_borders();
        Ok(corridor)
    }

    pub fn line(&self) -> &SceneLine {
        &self.line
    }

    pub fn corridor_width(&self) -> f64 {
        self.corridor_width
    }

    pub fn show_borders(&self) -> bool {
        self.show_borders
    }

    /// Border segments, only when the definition asks for them.
    pub fn borders(&self) -> Option<&[Segment; 2]> {
        self.show_borders.then_some(&self.borders)
    }

    /// Centerline, drawn dashed on top of the band.
    pub fn center_line(&self) -> Segment {
        self.line.segment()
    }

    pub fn update_line_end_point(&mut self, end: LineEnd, pos: Point) {
        self.line.update_line_end_point(end, pos);
        self.update_borders();
    }

    fn update_borders(&mut self) {
        self.borders = parallel_segments(self.line.p1(), self.line.p2(), self.corridor_width / 2.0);
    }
}

impl SceneShape for SceneCorridor {
    fn base(&self) -> &ItemBase {
        self.line.base()
    }

    fn base_mut(&mut self) -> &mut ItemBase {
        self.line.base_mut()
    }

    fn contains(&self, point: Point) -> bool {
        self.line.contains_within(point, self.corridor_width)
    }

    fn translate(&mut self, delta: Point) {
        self.line.translate(delta);
        self.update_borders();
    }

    fn center_pixel_point(&self) -> Point {
        self.line.center_pixel_point()
    }

    fn bounds(&self) -> Bounds {
        let corners = rectangle_from_line(self.line.p1(), self.line.p2(), self.corridor_width / 2.0);
        Bounds::from_points(corners).unwrap_or_else(|| self.line.bounds())
    }

    fn geometry_definition(&self) -> ShapeDefinition {
        self.line.geometry_definition()
    }

    fn rebuild_geometry(&mut self) -> Result<(), DefinitionError> {
        let def = self.line.base().definition();
        let width = def.number_or(keys::CORRIDOR_WIDTH, DEFAULT_CORRIDOR_WIDTH_METERS);
        let show_borders = def.bool_or(keys::SHOW_BORDERS, false);
        self.line.rebuild_geometry()?;
        self.corridor_width = self.line.base().length_to_pixels(width);
        self.line.set_contain_width(self.corridor_width);
        self.show_borders = show_borders;
        self.update_borders();
        Ok(())
    }

    fn handle_kinds(&self) -> HandleKinds {
        self.line.handle_kinds()
    }
}
