//! Geometry helpers shared by the renderer, the hit tester and the dirty tracker.
//!
//! This module provides:
//! - Arrowhead geometry
//! - Integer rectangles for dirty region tracking ([`Rect`])
//! - Floating-point bounds for hit zones and text boxes ([`Bounds`])

// ============================================================================
// Arrowhead Geometry
// ============================================================================

/// Calculates the two side points of an arrowhead drawn at `(to_x, to_y)`.
///
/// The head opens back towards `(from_x, from_y)`. Both side lines have the
/// same `length` and sit `angle_degrees` off the shaft. The geometry does not
/// depend on the stroke width.
///
/// # Returns
/// Array of two points `[(top_x, top_y), (bottom_x, bottom_y)]`.
pub fn calculate_arrowhead(
    from_x: f64,
    from_y: f64,
    to_x: f64,
    to_y: f64,
    length: f64,
    angle_degrees: f64,
) -> [(f64, f64); 2] {
    // Direction from END back to START
    let angle = (from_y - to_y).atan2(from_x - to_x);
    let theta = angle_degrees.to_radians();

    let top = (angle + theta).sin_cos();
    let bottom = (angle - theta).sin_cos();

    [
        (to_x + length * top.1, to_y + length * top.0),
        (to_x + length * bottom.1, to_y + length * bottom.0),
    ]
}

/// Rounds to two decimal places (canvas dimensions are kept at this precision).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Euclidean distance between two points.
pub fn distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    (x2 - x1).hypot(y2 - y1)
}

// ============================================================================
// Rectangles
// ============================================================================

/// Axis-aligned rectangle helper used for dirty region tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle. Width/height must be positive.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            None
        } else {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Builds a rectangle from min/max bounds (inclusive min, exclusive max).
    pub fn from_min_max(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<Self> {
        let width = max_x - min_x;
        let height = max_y - min_y;
        Self::new(min_x, min_y, width, height)
    }

    /// Returns true if rectangle has a positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Floating-point axis-aligned box. Containment checks are inclusive on all edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square of side `size` centered on `(cx, cy)`.
    pub fn centered_square(cx: f64, cy: f64, size: f64) -> Self {
        let half = size / 2.0;
        Self::new(cx - half, cy - half, size, size)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && y >= self.y && x <= self.right() && y <= self.bottom()
    }

    /// Whether the two boxes share any point.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }

    /// Grows the box by `amount` on every side.
    pub fn inflate(&self, amount: f64) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }

    /// Smallest integer rectangle covering these bounds.
    pub fn to_rect(&self) -> Option<Rect> {
        Rect::from_min_max(
            self.x.floor() as i32,
            self.y.floor() as i32,
            self.right().ceil() as i32,
            self.bottom().ceil() as i32,
        )
    }
}
