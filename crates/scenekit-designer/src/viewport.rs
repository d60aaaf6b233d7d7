//! Viewport and coordinate transformation for the scene view.
//!
//! Handles conversion between screen coordinates (widget pixels, y down) and
//! scene coordinates (scene pixels, y up). Zoom is a pure view transform:
//! it never touches item geometry.

use std::fmt;

use scenekit_settings::ZoomSettings;

use crate::geometry::Point;

/// Represents the viewport transformation state (zoom and pan).
#[derive(Debug, Clone)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    canvas_width: f64,
    canvas_height: f64,
    zoom_factor: f64,
    min_zoom: f64,
    max_zoom: f64,
}

impl Viewport {
    /// Creates a viewport with the scene origin at the bottom-left corner.
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self::with_zoom_settings(canvas_width, canvas_height, &ZoomSettings::default())
    }

    pub fn with_zoom_settings(canvas_width: f64, canvas_height: f64, zoom: &ZoomSettings) -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            canvas_width,
            canvas_height,
            zoom_factor: zoom.factor,
            min_zoom: zoom.min,
            max_zoom: zoom.max,
        }
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Sets the canvas dimensions (typically called when the host resizes).
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    /// Current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn zoom_factor(&self) -> f64 {
        self.zoom_factor
    }

    pub fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    /// One zoom step in. A step that would reach `max_zoom` is refused.
    pub fn zoom_in(&mut self) -> bool {
        let next = self.zoom * self.zoom_factor;
        if next < self.max_zoom {
            self.zoom = next;
            true
        } else {
            false
        }
    }

    /// One zoom step out. A step that would reach `min_zoom` is refused.
    pub fn zoom_out(&mut self) -> bool {
        let next = self.zoom / self.zoom_factor;
        if next > self.min_zoom {
            self.zoom = next;
            true
        } else {
            false
        }
    }

    /// Zoom step in keeping the scene point under `screen` fixed on screen.
    pub fn zoom_in_at(&mut self, screen: Point) -> bool {
        let anchor = self.screen_to_scene(screen);
        let changed = self.zoom_in();
        if changed {
            self.keep_on_screen(anchor, screen);
        }
        changed
    }

    /// Zoom step out keeping the scene point under `screen` fixed on screen.
    pub fn zoom_out_at(&mut self, screen: Point) -> bool {
        let anchor = self.screen_to_scene(screen);
        let changed = self.zoom_out();
        if changed {
            self.keep_on_screen(anchor, screen);
        }
        changed
    }

    fn keep_on_screen(&mut self, scene: Point, screen: Point) {
        // screen_x = scene_x * zoom + pan_x
        // screen_y = canvas_height - (scene_y * zoom + pan_y)
        self.pan_x = screen.x - scene.x * self.zoom;
        self.pan_y = self.canvas_height - screen.y - scene.y * self.zoom;
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = 1.0;
    }

    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    /// Pans by a screen-space delta (y down, as delivered by pointer events).
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y -= dy;
    }

    /// Converts screen coordinates to scene coordinates.
    ///
    /// ```text
    /// scene_x = (screen_x - pan_x) / zoom
    /// scene_y = (canvas_height - screen_y - pan_y) / zoom
    /// ```
    pub fn screen_to_scene(&self, screen: Point) -> Point {
        let x = (screen.x - self.pan_x) / self.zoom;
        let y = (self.canvas_height - screen.y - self.pan_y) / self.zoom;
        Point::new(x, y)
    }

    /// Converts scene coordinates to screen coordinates.
    pub fn scene_to_screen(&self, scene: Point) -> Point {
        let x = scene.x * self.zoom + self.pan_x;
        let y = self.canvas_height - (scene.y * self.zoom + self.pan_y);
        Point::new(x, y)
    }

    /// Centers the viewport on a scene point.
    pub fn center_on(&mut self, scene: Point) {
        self.pan_x = self.canvas_width / 2.0 - scene.x * self.zoom;
        self.pan_y = self.canvas_height / 2.0 - scene.y * self.zoom;
    }

    /// Resets viewport to 1:1 zoom with no pan.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1})",
            self.zoom, self.pan_x, self.pan_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}
