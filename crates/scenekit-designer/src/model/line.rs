use scenekit_core::{keys, DefinitionError, ShapeDefinition};
use smallvec::smallvec;

use crate::geometry::{distance, distance_to_segment, middle_point, Bounds, Point, Segment};
use crate::handles::{HandleKind, HandleKinds};

use super::item::{BuildContext, ItemBase};
use super::SceneShape;

/// Which end of a line a handle or command acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnd {
    Start,
    End,
}

impl LineEnd {
    pub fn other(self) -> LineEnd {
        match self {
            LineEnd::Start => LineEnd::End,
            LineEnd::End => LineEnd::Start,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneLine {
    base: ItemBase,
    p1: Point,
    p2: Point,
    contain_width: f64,
}

impl SceneLine {
    pub fn from_definition(def: &ShapeDefinition, ctx: &BuildContext) -> Result<Self, DefinitionError> {
        let base = ItemBase::new(def.clone(), ctx.scale_factor);
        let p1 = base.pixel_point(keys::START)?;
        let p2 = base.pixel_point(keys::END)?;
        Ok(Self {
            base,
            p1,
            p2,
            contain_width: ctx.line_contain_width,
        })
    }

    pub fn p1(&self) -> Point {
        self.p1
    }

    pub fn p2(&self) -> Point {
        self.p2
    }

    pub fn end_point(&self, end: LineEnd) -> Point {
        match end {
            LineEnd::Start => self.p1,
            LineEnd::End => self.p2,
        }
    }

    pub fn segment(&self) -> Segment {
        Segment::new(self.p1, self.p2)
    }

    /// Start point in meters.
    pub fn start_point(&self) -> [f64; 2] {
        self.base.to_meters(self.p1)
    }

    /// End point in meters.
    pub fn end_point_meters(&self) -> [f64; 2] {
        self.base.to_meters(self.p2)
    }

    pub fn length_in_pixels(&self) -> f64 {
        distance(self.p1, self.p2)
    }

    pub fn contain_width(&self) -> f64 {
        self.contain_width
    }

    pub(crate) fn set_contain_width(&mut self, width: f64) {
        self.contain_width = width;
    }

    /// Hit test against an explicit band width.
    pub(crate) fn contains_within(&self, point: Point, width: f64) -> bool {
        distance_to_segment(self.p1, self.p2, point) < width
    }

    pub fn update_line_end_point(&mut self, end: LineEnd, pos: Point) {
        match end {
            LineEnd::Start => self.p1 = pos,
            LineEnd::End => self.p2 = pos,
        }
    }
}

impl SceneShape for SceneLine {
    fn base(&self) -> &ItemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ItemBase {
        &mut self.base
    }

    fn contains(&self, point: Point) -> bool {
        self.contains_within(point, self.contain_width)
    }

    fn translate(&mut self, delta: Point) {
        self.p1 = self.p1 + delta;
        self.p2 = self.p2 + delta;
    }

    fn center_pixel_point(&self) -> Point {
        middle_point(self.p1, self.p2)
    }

    fn bounds(&self) -> Bounds {
        Bounds::from_corners(self.p1, self.p2)
    }

    fn geometry_definition(&self) -> ShapeDefinition {
        ShapeDefinition::new()
            .with(keys::START, self.start_point())
            .with(keys::END, self.end_point_meters())
    }

    fn rebuild_geometry(&mut self) -> Result<(), DefinitionError> {
        let p1 = self.base.pixel_point(keys::START)?;
        let p2 = self.base.pixel_point(keys::END)?;
        self.p1 = p1;
        self.p2 = p2;
        Ok(())
    }

    fn handle_kinds(&self) -> HandleKinds {
        smallvec![
            HandleKind::ChangeEndPoint(LineEnd::Start),
            HandleKind::ChangeEndPoint(LineEnd::End),
            HandleKind::Rotate(LineEnd::Start),
            HandleKind::Rotate(LineEnd::End),
            HandleKind::Move,
        ]
    }
}
