//! Interactive handles.
//!
//! Handles exist only while an item is selected. Each one keeps the
//! geometry it had when created plus the offset accumulated by the current
//! drag, and turns a new offset into a command; it never mutates the item
//! itself.

use scenekit_settings::HandleSettings;
use smallvec::SmallVec;

use crate::commands::{ChangeEndPoint, ChangeSize, SceneCommand, Translate};
use crate::geometry::{
    distance, get_arrow_head, get_point_at_t, near_zero, point_towards, project_point_to_segment,
    Bounds, Point,
};
use crate::item_store::ItemId;
use crate::model::{LineEnd, SceneLine, SceneShape, Shape};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleKind {
    /// Translates the whole item.
    Move,
    /// Sets a circle radius.
    ChangeSize,
    /// Slides one end of a line along the line.
    ChangeEndPoint(LineEnd),
    /// Swings one end of a line around the other, keeping the length.
    Rotate(LineEnd),
}

pub type HandleKinds = SmallVec<[HandleKind; 5]>;

/// Handle dimensions in pixels / degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleStyle {
    pub size: f64,
    pub arrow_angle_degrees: f64,
    pub rotate_percentage: f64,
    pub change_size_diameter: f64,
}

impl Default for HandleStyle {
    fn default() -> Self {
        Self::from(&HandleSettings::default())
    }
}

impl From<&HandleSettings> for HandleStyle {
    fn from(settings: &HandleSettings) -> Self {
        Self {
            size: settings.size,
            arrow_angle_degrees: settings.arrow_angle_degrees,
            rotate_percentage: settings.rotate_percentage,
            change_size_diameter: settings.change_size_diameter,
        }
    }
}

/// On-canvas outline of a handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HandleShape {
    Square { center: Point, size: f64 },
    Disc { center: Point, radius: f64 },
    /// Two back corners then the tip.
    Arrow([Point; 3]),
}

impl HandleShape {
    fn translated(&self, delta: Point) -> HandleShape {
        match *self {
            HandleShape::Square { center, size } => HandleShape::Square {
                center: center + delta,
                size,
            },
            HandleShape::Disc { center, radius } => HandleShape::Disc {
                center: center + delta,
                radius,
            },
            HandleShape::Arrow(points) => HandleShape::Arrow(points.map(|p| p + delta)),
        }
    }

    /// Reference vertex: square/disc center or arrow tip.
    pub fn anchor(&self) -> Point {
        match *self {
            HandleShape::Square { center, .. } | HandleShape::Disc { center, .. } => center,
            HandleShape::Arrow(points) => points[2],
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        match *self {
            HandleShape::Square { center, size } => {
                (p.x - center.x).abs() <= size / 2.0 && (p.y - center.y).abs() <= size / 2.0
            }
            HandleShape::Disc { center, radius } => distance(center, p) <= radius,
            HandleShape::Arrow([a, b, c]) => point_in_triangle(p, a, b, c),
        }
    }

    pub fn bounds(&self) -> Bounds {
        match *self {
            HandleShape::Square { center, size } => {
                Bounds::from_corners(center, center).inflate(size / 2.0)
            }
            HandleShape::Disc { center, radius } => {
                Bounds::from_corners(center, center).inflate(radius)
            }
            HandleShape::Arrow(points) => Bounds::from_points(points)
                .unwrap_or_else(|| Bounds::from_corners(points[2], points[2])),
        }
    }
}

fn point_in_triangle(p: Point, a: Point, b: Point, c: Point) -> bool {
    let cross = |u: Point, v: Point, w: Point| (v.x - u.x) * (w.y - u.y) - (v.y - u.y) * (w.x - u.x);
    let d1 = cross(a, b, p);
    let d2 = cross(b, c, p);
    let d3 = cross(c, a, p);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Handle {
    item: ItemId,
    kind: HandleKind,
    shape: HandleShape,
    offset: Point,
}

impl Handle {
    /// Builds a handle of `kind` for `shape`; `None` when the kind does not
    /// apply to that item.
    pub fn new(item: ItemId, kind: HandleKind, shape: &Shape, style: &HandleStyle) -> Option<Self> {
        let outline = match kind {
            HandleKind::Move => HandleShape::Square {
                center: shape.center_pixel_point(),
                size: style.size,
            },
            HandleKind::ChangeSize => {
                let circle = shape.as_circle()?;
                let center = circle.center_pixel_point();
                HandleShape::Disc {
                    center: Point::new(center.x + circle.radius_pixels(), center.y),
                    radius: style.change_size_diameter / 2.0,
                }
            }
            HandleKind::ChangeEndPoint(end) => {
                let line = shape.as_line()?;
                let (from, to) = (line.end_point(end.other()), line.end_point(end));
                HandleShape::Arrow(get_arrow_head(from, to, style.size, style.arrow_angle_degrees))
            }
            HandleKind::Rotate(end) => {
                let line = shape.as_line()?;
                let (from, to) = (line.end_point(end.other()), line.end_point(end));
                HandleShape::Disc {
                    center: get_point_at_t(from, to, style.rotate_percentage),
                    radius: style.change_size_diameter / 2.0,
                }
            }
        };

        Some(Self {
            item,
            kind,
            shape: outline,
            offset: Point::ORIGIN,
        })
    }

    /// Every handle `shape` declares, in its declared order.
    pub fn for_item(item: ItemId, shape: &Shape, style: &HandleStyle) -> Vec<Handle> {
        shape
            .handle_kinds()
            .into_iter()
            .filter_map(|kind| Handle::new(item, kind, shape, style))
            .collect()
    }

    pub fn item(&self) -> ItemId {
        self.item
    }

    pub fn kind(&self) -> HandleKind {
        self.kind
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Outline at its current (dragged) position.
    pub fn outline(&self) -> HandleShape {
        self.shape.translated(self.offset)
    }

    pub fn contains(&self, p: Point) -> bool {
        self.outline().contains(p)
    }

    pub(crate) fn set_offset(&mut self, offset: Point) {
        self.offset = offset;
    }

    /// Command produced by dragging the handle to `new_offset` (relative to
    /// where it was created). `None` when nothing would change.
    pub fn command_for(&self, shape: &Shape, new_offset: Point) -> Option<SceneCommand> {
        let dragged = self.shape.anchor() + new_offset;
        match self.kind {
            HandleKind::Move => {
                let delta = new_offset - self.offset;
                (delta != Point::ORIGIN).then(|| Translate::new(self.item, delta).into())
            }
            HandleKind::ChangeSize => {
                let circle = shape.as_circle()?;
                let radius = distance(circle.center_pixel_point(), dragged);
                (!near_zero(radius - circle.radius_pixels()))
                    .then(|| ChangeSize::new(self.item, radius).into())
            }
            HandleKind::ChangeEndPoint(end) => {
                let line = shape.as_line()?;
                let on_line = project_point_to_segment(line.p1(), line.p2(), dragged, false);
                moves_end(line, end, on_line).then(|| ChangeEndPoint::new(self.item, end, on_line).into())
            }
            HandleKind::Rotate(end) => {
                let line = shape.as_line()?;
                let pivot = line.end_point(end.other());
                let target = point_towards(pivot, dragged, line.length_in_pixels());
                moves_end(line, end, target).then(|| ChangeEndPoint::new(self.item, end, target).into())
            }
        }
    }
}

fn moves_end(line: &SceneLine, end: LineEnd, target: Point) -> bool {
    !near_zero(distance(line.end_point(end), target))
}
