//! Geometry kernel.
//!
//! Pure functions over 2D points and segments. Two coordinate spaces are in
//! play: meters (definition space) and scene pixels (live geometry). The
//! kernel never fails: degenerate input yields sentinel values.

use std::ops::{Add, Mul, Neg, Sub};

use scenekit_core::constants::{
    FAR_DISTANCE, NEAR_ZERO, POINT_PRECISION, SEGMENT_EPSILON, SLOPE_EPSILON,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl From<[f64; 2]> for Point {
    fn from(p: [f64; 2]) -> Self {
        Point::new(p[0], p[1])
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        p.to_array()
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// A closed segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        distance(self.start, self.end)
    }

    pub fn middle(&self) -> Point {
        middle_point(self.start, self.end)
    }

    pub fn translated(&self, delta: Point) -> Segment {
        Segment::new(self.start + delta, self.end + delta)
    }
}

/// Axis-aligned bounds in scene pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Smallest bounds holding every point; `None` for an empty input.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut b = Bounds::new(first.x, first.y, first.x, first.y);
        for p in iter {
            b.min_x = b.min_x.min(p.x);
            b.min_y = b.min_y.min(p.y);
            b.max_x = b.max_x.max(p.x);
            b.max_y = b.max_y.max(p.y);
        }
        Some(b)
    }

    /// Bounds of the box spanned by two opposite corners in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Bounds::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    pub fn inflate(&self, amount: f64) -> Bounds {
        Bounds::new(
            self.min_x - amount,
            self.min_y - amount,
            self.max_x + amount,
            self.max_y + amount,
        )
    }
}

/// Meters to pixels.
pub fn scale(distance: f64, scale_factor: f64) -> f64 {
    distance * scale_factor
}

/// Pixels to meters, inverse of [`scale`].
pub fn de_scale(distance: f64, scale_factor: f64) -> f64 {
    distance / scale_factor
}

pub fn point_to_pixel_point(point: [f64; 2], scale_factor: f64) -> Point {
    Point::new(scale(point[0], scale_factor), scale(point[1], scale_factor))
}

/// Pixels to meters after applying `translate` (an item position offset).
pub fn pixel_point_to_point(pixel: Point, scale_factor: f64, translate: Point) -> [f64; 2] {
    [
        de_scale(pixel.x + translate.x, scale_factor),
        de_scale(pixel.y + translate.y, scale_factor),
    ]
}

pub fn distance(p1: Point, p2: Point) -> f64 {
    p1.distance_to(&p2)
}

pub fn middle_point(p1: Point, p2: Point) -> Point {
    Point::new((p1.x + p2.x) / 2.0, (p1.y + p2.y) / 2.0)
}

pub fn difference_point(p1: Point, p2: Point) -> Point {
    p1 - p2
}

pub fn translate_point(p: Point, translation: Point) -> Point {
    p + translation
}

/// Distance from `p3` to segment `[p1, p2]`.
///
/// Points whose perpendicular projection falls outside the segment are
/// reported at [`FAR_DISTANCE`], not at their nearest-endpoint distance, so
/// hit tests treat them as misses. A near-zero segment degrades to the
/// distance from `p1`.
pub fn distance_to_segment(p1: Point, p2: Point, p3: Point) -> f64 {
    let px = p2.x - p1.x;
    let py = p2.y - p1.y;
    let d2 = px * px + py * py;

    if d2.abs() < SEGMENT_EPSILON {
        return (p1.x - p3.x).hypot(p1.y - p3.y);
    }

    let u = ((p3.x - p1.x) * px + (p3.y - p1.y) * py) / d2;
    if !(0.0..=1.0).contains(&u) {
        return FAR_DISTANCE;
    }

    let x = p1.x + u * px;
    let y = p1.y + u * py;
    (x - p3.x).hypot(y - p3.y)
}

/// Projection of `p3` on the line through `p1`, `p2`.
///
/// With `in_segment` the projection parameter is clamped to `[0, 1]`, so the
/// result is the closest point of the segment; otherwise the infinite line
/// is used. A near-zero segment returns `p1`.
pub fn project_point_to_segment(p1: Point, p2: Point, p3: Point, in_segment: bool) -> Point {
    let px = p2.x - p1.x;
    let py = p2.y - p1.y;
    let d2 = px * px + py * py;

    if d2.abs() < SEGMENT_EPSILON {
        return p1;
    }

    let mut u = ((p3.x - p1.x) * px + (p3.y - p1.y) * py) / d2;
    if in_segment {
        u = u.clamp(0.0, 1.0);
    }

    Point::new(p1.x + u * px, p1.y + u * py)
}

/// Parametric point: `t = 0` is `p1`, `t = 1` is `p2`.
pub fn get_point_at_t(p1: Point, p2: Point, t: f64) -> Point {
    Point::new(p1.x + (p2.x - p1.x) * t, p1.y + (p2.y - p1.y) * t)
}

pub fn near_zero(value: f64) -> bool {
    value.abs() < NEAR_ZERO
}

pub fn similar_values(a: f64, b: f64, precision: f64) -> bool {
    (a - b).abs() <= precision
}

/// `1` when `a < b`, `-1` when `a > b`, `0` otherwise.
pub fn relation_sign(a: f64, b: f64) -> f64 {
    if a < b {
        1.0
    } else if a > b {
        -1.0
    } else {
        0.0
    }
}

pub fn is_vertical_line(p1: Point, p2: Point) -> bool {
    near_zero(p1.x - p2.x)
}

pub fn is_horizontal_line(p1: Point, p2: Point) -> bool {
    near_zero(p1.y - p2.y)
}

/// Line through two points, `y = slope * x + intercept` when it exists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineEquation {
    Sloped { slope: f64, intercept: f64 },
    Vertical { x: f64 },
    /// Both points coincide; no line is defined.
    Degenerate,
}

pub fn line_slope_equation(p1: Point, p2: Point) -> LineEquation {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    if dx.abs() < SEGMENT_EPSILON {
        if dy.abs() < SEGMENT_EPSILON {
            LineEquation::Degenerate
        } else {
            LineEquation::Vertical { x: p2.x }
        }
    } else {
        let slope = dy / dx;
        LineEquation::Sloped {
            slope,
            intercept: p1.y - slope * p1.x,
        }
    }
}

/// Slope of the perpendicular; infinite for (near) horizontal input.
pub fn perpendicular_slope(slope: f64) -> f64 {
    if slope.abs() > SLOPE_EPSILON {
        -1.0 / slope
    } else {
        f64::INFINITY
    }
}

/// Point on the line of slope `a` through `point`, at distance `d` on the
/// side selected by `sign` (`1` towards growing x, `-1` otherwise).
pub fn point_in_line_at_distance(a: f64, point: Point, d: f64, sign: f64) -> Point {
    let x2 = point.x + sign * d / (1.0 + a * a).sqrt();
    let y2 = a * (x2 - point.x) + point.y;
    Point::new(x2, y2)
}

/// The two points at distance `d` from `p2` on the perpendicular to `[p1, p2]`.
pub fn perpendicular_points_from_segment(p1: Point, p2: Point, d: f64) -> [Point; 2] {
    let vertical_offsets = [Point::new(p2.x, p2.y + d), Point::new(p2.x, p2.y - d)];

    if is_horizontal_line(p1, p2) {
        return vertical_offsets;
    }
    if is_vertical_line(p1, p2) {
        return [Point::new(p2.x + d, p2.y), Point::new(p2.x - d, p2.y)];
    }

    let slope = match line_slope_equation(p1, p2) {
        LineEquation::Sloped { slope, .. } => slope,
        _ => return vertical_offsets,
    };
    let a90 = perpendicular_slope(slope);
    if a90.is_infinite() {
        return vertical_offsets;
    }

    [
        point_in_line_at_distance(a90, p2, d, -1.0),
        point_in_line_at_distance(a90, p2, d, 1.0),
    ]
}

/// Point on the line `(p1, p2)` at distance `d` from `p1`, heading to `p2`.
pub fn point_between_points_at_distance(p1: Point, p2: Point, d: f64, precision: f64) -> Point {
    let x_sign = relation_sign(p1.x, p2.x);

    if similar_values(p1.y, p2.y, precision) {
        return Point::new(p1.x + x_sign * d, p1.y);
    }
    if similar_values(p1.x, p2.x, precision) {
        return Point::new(p1.x, p1.y + relation_sign(p1.y, p2.y) * d);
    }

    let a = (p2.y - p1.y) / (p2.x - p1.x);
    point_in_line_at_distance(a, p1, d, x_sign)
}

/// [`point_between_points_at_distance`] with the default precision.
pub fn point_towards(p1: Point, p2: Point, d: f64) -> Point {
    point_between_points_at_distance(p1, p2, d, POINT_PRECISION)
}

/// Corners of the band of half-width `width` around the centerline `[p1, p2]`.
///
/// Order: the two offsets at `p2`, then the two offsets at `p1` (reversed).
pub fn rectangle_from_line(p1: Point, p2: Point, width: f64) -> [Point; 4] {
    let [p21, p22] = perpendicular_points_from_segment(p1, p2, width);
    let [p11, p12] = perpendicular_points_from_segment(p2, p1, width);
    [p21, p22, p12, p11]
}

/// The two segments parallel to `[p1, p2]` at `distance` on either side.
pub fn parallel_segments(p1: Point, p2: Point, distance: f64) -> [Segment; 2] {
    let [p21, p22, p11, p12] = rectangle_from_line(p1, p2, distance);
    [Segment::new(p11, p22), Segment::new(p12, p21)]
}

/// Arrow head pointing at `end`: two back corners, then the tip.
///
/// The tip is always last; handle drags read it as the dragged vertex.
pub fn get_arrow_head(start: Point, end: Point, size: f64, arrow_angle_degrees: f64) -> [Point; 3] {
    let line_angle = (end.y - start.y).atan2(end.x - start.x);
    let angle = arrow_angle_degrees.to_radians();
    let back = |sign: f64| {
        Point::new(
            end.x - size * (line_angle + sign * angle).cos(),
            end.y - size * (line_angle + sign * angle).sin(),
        )
    };
    [back(1.0), back(-1.0), end]
}

pub fn rotate_point(p: Point, center: Point, angle_deg: f64) -> Point {
    let (s, c) = angle_deg.to_radians().sin_cos();
    let dx = p.x - center.x;
    let dy = p.y - center.y;
    Point::new(center.x + dx * c - dy * s, center.y + dx * s + dy * c)
}
