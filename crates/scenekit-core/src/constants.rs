//! Numeric tolerances and editor defaults.

/// Squared-length threshold below which a segment is treated as a point.
pub const SEGMENT_EPSILON: f64 = 0.0001;

/// Slope magnitude below which a perpendicular slope is considered infinite.
pub const SLOPE_EPSILON: f64 = 0.00001;

/// Coordinate difference below which a segment counts as horizontal/vertical.
pub const NEAR_ZERO: f64 = 0.001;

/// Default precision for `similar_values`.
pub const SIMILAR_PRECISION: f64 = 0.08;

/// Precision used when walking a fixed distance along a line.
pub const POINT_PRECISION: f64 = 0.01;

/// Distance reported for points whose projection falls outside a segment.
pub const FAR_DISTANCE: f64 = 999_999.0;

/// Pixels per meter used when nothing else is configured.
pub const DEFAULT_SCALE_FACTOR: f64 = 100.0;

/// Multiplicative zoom step for one wheel notch.
pub const DEFAULT_ZOOM_FACTOR: f64 = 1.15;
pub const DEFAULT_MIN_ZOOM: f64 = 0.1;
pub const DEFAULT_MAX_ZOOM: f64 = 10.0;

/// Hit-test band (pixels) around plain lines.
pub const LINE_CONTAIN_WIDTH: f64 = 10.0;

/// Handle defaults (pixels / degrees / line fraction).
pub const HANDLE_SIZE: f64 = 10.0;
pub const ARROW_ANGLE_DEGREES: f64 = 30.0;
pub const ROTATE_HANDLE_PERCENTAGE: f64 = 0.8;

/// Style defaults taken when a definition omits them.
pub const DEFAULT_ALPHA: f64 = 5.0;
pub const DEFAULT_PEN_WIDTH_METERS: f64 = 0.01;
pub const DEFAULT_CORRIDOR_WIDTH_METERS: f64 = 1.0;
pub const DEFAULT_BORDER_WIDTH_PIXELS: f64 = 1.0;
