//! Drawing surface state shared by the Color and Draw screens: freehand
//! strokes, palette selection, pinch zoom and background-page placement.
//! Pure geometry; the browser glue feeds it canvas-relative points.

use crate::catalog::PALETTE;

pub const LINE_WIDTH: f64 = 6.0;
pub const LINE_CAP: &str = "round";
pub const LINE_JOIN: &str = "round";
pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 3.0;
/// Coloring pages are drawn desaturated and faint under the strokes.
pub const PAGE_FILTER: &str = "grayscale(1)";
pub const PAGE_ALPHA: f64 = 0.4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Map a client-space pointer position into canvas drawing space, undoing
/// the current zoom.
pub fn to_canvas_point(client: Point, rect_left: f64, rect_top: f64, zoom: f64) -> Point {
    let zoom = if zoom > 0.0 { zoom } else { 1.0 };
    Point::new((client.x - rect_left) / zoom, (client.y - rect_top) / zoom)
}

/// Currently selected palette swatch. The first swatch starts selected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Palette {
    selected: usize,
}

impl Palette {
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn color(&self) -> &'static str {
        PALETTE[self.selected]
    }

    /// Out-of-range indices keep the current selection.
    pub fn select(&mut self, index: usize) -> &'static str {
        if index < PALETTE.len() {
            self.selected = index;
        }
        self.color()
    }
}

/// A segment to draw with the current palette color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

/// Pen state: down/up plus the last point so each move yields one segment.
#[derive(Clone, Copy, Debug, Default)]
pub struct Stroke {
    last: Option<Point>,
}

impl Stroke {
    pub fn drawing(&self) -> bool {
        self.last.is_some()
    }

    pub fn press(&mut self, at: Point) {
        self.last = Some(at);
    }

    pub fn drag(&mut self, to: Point) -> Option<Segment> {
        let from = self.last?;
        self.last = Some(to);
        Some(Segment { from, to })
    }

    pub fn release(&mut self) {
        self.last = None;
    }
}

/// CSS transform to apply to the canvas element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomTransform {
    pub scale: f64,
    pub origin: Point,
}

impl ZoomTransform {
    pub fn css_transform(&self) -> String {
        format!("scale({})", self.scale)
    }

    pub fn css_origin(&self) -> String {
        format!("{}px {}px", self.origin.x, self.origin.y)
    }
}

#[derive(Clone, Copy, Debug)]
struct Pinch {
    initial_distance: f64,
    initial_scale: f64,
    origin: Point,
}

/// Two-finger pinch recognizer. Scale is relative to the finger distance at
/// gesture start, clamped to `[MIN_ZOOM, MAX_ZOOM]`, and anchored at the
/// starting midpoint.
#[derive(Clone, Copy, Debug)]
pub struct PinchZoom {
    scale: f64,
    pinch: Option<Pinch>,
}

impl Default for PinchZoom {
    fn default() -> Self {
        Self {
            scale: 1.0,
            pinch: None,
        }
    }
}

impl PinchZoom {
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn active(&self) -> bool {
        self.pinch.is_some()
    }

    pub fn touch_start(&mut self, touches: &[Point]) {
        if let [a, b] = touches {
            let initial_distance = a.distance(*b);
            if initial_distance > 0.0 {
                self.pinch = Some(Pinch {
                    initial_distance,
                    initial_scale: self.scale,
                    origin: a.midpoint(*b),
                });
            }
        }
    }

    pub fn touch_move(&mut self, touches: &[Point]) -> Option<ZoomTransform> {
        let pinch = self.pinch?;
        let [a, b] = touches else {
            return None;
        };
        let ratio = a.distance(*b) / pinch.initial_distance;
        self.scale = (pinch.initial_scale * ratio).clamp(MIN_ZOOM, MAX_ZOOM);
        Some(ZoomTransform {
            scale: self.scale,
            origin: pinch.origin,
        })
    }

    /// Ends the gesture once fewer than two fingers remain; the scale sticks.
    pub fn touch_end(&mut self, remaining: usize) {
        if remaining < 2 {
            self.pinch = None;
        }
    }
}

/// Where to draw a page image so it fits the canvas, centered, keeping its
/// aspect ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

pub fn fit_centered(img_w: f64, img_h: f64, canvas_w: f64, canvas_h: f64) -> Placement {
    if img_w <= 0.0 || img_h <= 0.0 || canvas_h <= 0.0 {
        return Placement {
            x: 0.0,
            y: 0.0,
            width: canvas_w,
            height: canvas_h,
        };
    }
    let aspect = img_w / img_h;
    let (width, height) = if aspect > canvas_w / canvas_h {
        (canvas_w, canvas_w / aspect)
    } else {
        (canvas_h * aspect, canvas_h)
    };
    Placement {
        x: (canvas_w - width) / 2.0,
        y: (canvas_h - height) / 2.0,
        width,
        height,
    }
}

/// New backing-store size for a canvas shown at `css_w x css_h`, or `None`
/// when the logical size already matches (resizing would wipe the drawing).
pub fn backing_size(
    css_w: f64,
    css_h: f64,
    dpr: f64,
    current_w: u32,
    current_h: u32,
) -> Option<(u32, u32)> {
    let dpr = if dpr > 0.0 { dpr } else { 1.0 };
    let logical_w = (current_w as f64 / dpr).round();
    let logical_h = (current_h as f64 / dpr).round();
    if logical_w == css_w.round() && logical_h == css_h.round() {
        return None;
    }
    Some(((css_w * dpr) as u32, (css_h * dpr) as u32))
}
