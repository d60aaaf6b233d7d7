//! Render primitives.
//!
//! Items and handles are turned into `lyon` paths with a stroke and an
//! optional fill; the host canvas draws them with its own backend.

use lyon::math::point;
use lyon::path::{Path, Winding};

use crate::canvas::SceneCanvas;
use crate::geometry::{Bounds, Point, Segment};
use crate::handles::{Handle, HandleShape};
use crate::model::{Pen, SceneShape, Shape};

/// Solid fill.
#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    pub color: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RenderPrimitive {
    pub path: Path,
    pub stroke: Option<Pen>,
    pub fill: Option<Fill>,
    /// 0.0 to 1.0
    pub opacity: f64,
}

impl RenderPrimitive {
    fn stroked(path: Path, pen: Pen, opacity: f64) -> Self {
        Self {
            path,
            stroke: Some(pen),
            fill: None,
            opacity,
        }
    }

    pub fn bounds(&self) -> Bounds {
        path_bounds(&self.path)
    }
}

fn to_lyon(p: Point) -> lyon::math::Point {
    point(p.x as f32, p.y as f32)
}

fn segment_path(segment: &Segment) -> Path {
    let mut builder = Path::builder();
    builder.begin(to_lyon(segment.start));
    builder.line_to(to_lyon(segment.end));
    builder.end(false);
    builder.build()
}

fn polygon_path(points: &[Point]) -> Path {
    let mut builder = Path::builder();
    if let Some((first, rest)) = points.split_first() {
        builder.begin(to_lyon(*first));
        for p in rest {
            builder.line_to(to_lyon(*p));
        }
        builder.close();
    }
    builder.build()
}

fn circle_path(center: Point, radius: f64) -> Path {
    let mut builder = Path::builder();
    builder.add_circle(to_lyon(center), radius as f32, Winding::Positive);
    builder.build()
}

/// Axis-aligned bounds of a path.
pub fn path_bounds(path: &Path) -> Bounds {
    let bb = lyon::algorithms::aabb::bounding_box(path.iter());
    Bounds::new(
        bb.min.x as f64,
        bb.min.y as f64,
        bb.max.x as f64,
        bb.max.y as f64,
    )
}

/// Primitives of one item, back to front.
pub fn render_item(shape: &Shape) -> Vec<RenderPrimitive> {
    let style = shape.style();
    let opacity = style.opacity();
    match shape {
        Shape::Line(line) => vec![RenderPrimitive::stroked(
            segment_path(&line.segment()),
            style.pen(),
            opacity,
        )],
        Shape::Corridor(corridor) => {
            let mut primitives = vec![
                RenderPrimitive::stroked(segment_path(&corridor.center_line()), style.pen(), opacity),
                RenderPrimitive::stroked(segment_path(&corridor.center_line()), Pen::centerline(), opacity),
            ];
            if let Some(borders) = corridor.borders() {
                primitives.extend(
                    borders
                        .iter()
                        .map(|b| RenderPrimitive::stroked(segment_path(b), style.pen(), opacity)),
                );
            }
            primitives
        }
        Shape::Circle(circle) => vec![RenderPrimitive::stroked(
            circle_path(circle.center_pixel_point(), circle.radius_pixels()),
            style.pen(),
            opacity,
        )],
        Shape::Rectangle(rect) => vec![RenderPrimitive {
            path: polygon_path(&rect.corners()),
            stroke: Some(rect.border_pen()),
            fill: style.color.clone().map(|color| Fill { color: Some(color) }),
            opacity,
        }],
    }
}

/// Outline of a handle at its current position.
pub fn render_handle(handle: &Handle) -> RenderPrimitive {
    let path = match handle.outline() {
        HandleShape::Square { center, size } => {
            let h = size / 2.0;
            polygon_path(&[
                Point::new(center.x - h, center.y - h),
                Point::new(center.x + h, center.y - h),
                Point::new(center.x + h, center.y + h),
                Point::new(center.x - h, center.y + h),
            ])
        }
        HandleShape::Disc { center, radius } => circle_path(center, radius),
        HandleShape::Arrow(points) => polygon_path(&points),
    };
    RenderPrimitive {
        path,
        stroke: Some(Pen::solid(Some("black".to_string()), 1.0)),
        fill: Some(Fill {
            color: Some("white".to_string()),
        }),
        opacity: 1.0,
    }
}

/// Every visible item bottom to top, then the active handles.
pub fn render_scene(canvas: &SceneCanvas) -> Vec<RenderPrimitive> {
    let mut primitives: Vec<RenderPrimitive> = canvas
        .items()
        .filter(|(_, item)| canvas.is_visible(item))
        .flat_map(|(_, item)| render_item(item))
        .collect();
    primitives.extend(canvas.handles().iter().map(render_handle));
    primitives
}
