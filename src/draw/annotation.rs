//! Annotation definitions: freehand curves, arrows and text labels.

use super::color::Color;
use super::point::Point;
use super::style::ArrowStyle;
use super::text::TextAnnotation;
use crate::util::{self, Rect};
use std::fmt;

/// Identifier of an annotation, unique within its store and allocated in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnnotationId(pub u64);

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The two pointer-driven annotation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeKind {
    Curve,
    Arrow,
}

/// Point sequence shared by curves and arrows.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub id: AnnotationId,
    /// Samples in insertion order
    pub points: Vec<Point>,
    pub color: Color,
    /// Line width in pixels
    pub size: f64,
}

impl Stroke {
    pub fn new(id: AnnotationId, color: Color, size: f64) -> Self {
        Self {
            id,
            points: Vec::new(),
            color,
            size,
        }
    }

    /// First and latest point, once at least two samples exist.
    pub fn endpoints(&self) -> Option<(&Point, &Point)> {
        match self.points.as_slice() {
            [first, .., last] => Some((first, last)),
            _ => None,
        }
    }
}

/// Represents a drawable annotation on the canvas.
///
/// Render order is the order of the store's list; later annotations draw on top.
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    /// Freehand stroke connecting every sampled point
    Curve(Stroke),
    /// Straight shaft from the first to the latest point with a head at the end
    Arrow(Stroke),
    /// Movable, resizable text label
    Text(TextAnnotation),
}

impl Annotation {
    pub(crate) fn new_stroke(kind: StrokeKind, id: AnnotationId, color: Color, size: f64) -> Self {
        let stroke = Stroke::new(id, color, size);
        match kind {
            StrokeKind::Curve => Annotation::Curve(stroke),
            StrokeKind::Arrow => Annotation::Arrow(stroke),
        }
    }

    pub fn id(&self) -> AnnotationId {
        match self {
            Annotation::Curve(stroke) | Annotation::Arrow(stroke) => stroke.id,
            Annotation::Text(text) => text.id,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Annotation::Curve(stroke) | Annotation::Arrow(stroke) => stroke.color,
            Annotation::Text(text) => text.color,
        }
    }

    pub fn as_stroke(&self) -> Option<&Stroke> {
        match self {
            Annotation::Curve(stroke) | Annotation::Arrow(stroke) => Some(stroke),
            Annotation::Text(_) => None,
        }
    }

    pub fn as_stroke_mut(&mut self) -> Option<&mut Stroke> {
        match self {
            Annotation::Curve(stroke) | Annotation::Arrow(stroke) => Some(stroke),
            Annotation::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextAnnotation> {
        match self {
            Annotation::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextAnnotation> {
        match self {
            Annotation::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the axis-aligned bounding box, expanded to cover stroke width.
    ///
    /// Suitable for dirty region tracking. Returns `None` when the annotation has
    /// nothing to draw yet (fewer than two stroke samples).
    pub fn bounding_box(&self, arrow: &ArrowStyle) -> Option<Rect> {
        match self {
            Annotation::Curve(stroke) => {
                if stroke.points.len() < 2 {
                    return None;
                }
                bounding_box_for_points(stroke.points.iter().map(|p| (p.x, p.y)), stroke.size)
            }
            Annotation::Arrow(stroke) => {
                let (from, to) = stroke.endpoints()?;
                bounding_box_for_arrow(from, to, stroke.size, arrow)
            }
            // Handles overhang the box by half their size; callers inflate as needed.
            Annotation::Text(text) => text.bounds().to_rect(),
        }
    }
}

fn stroke_padding(size: f64) -> f64 {
    (size / 2.0).ceil().max(1.0)
}

pub(crate) fn bounding_box_for_points(
    points: impl IntoIterator<Item = (f64, f64)>,
    size: f64,
) -> Option<Rect> {
    let mut iter = points.into_iter();
    let (x0, y0) = iter.next()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (x0, y0, x0, y0);

    for (x, y) in iter {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    let padding = stroke_padding(size);
    ensure_positive_rect(
        min_x - padding,
        min_y - padding,
        max_x + padding,
        max_y + padding,
    )
}

pub(crate) fn bounding_box_for_arrow(
    from: &Point,
    to: &Point,
    size: f64,
    arrow: &ArrowStyle,
) -> Option<Rect> {
    let head = util::calculate_arrowhead(
        from.x,
        from.y,
        to.x,
        to.y,
        arrow.head_length,
        arrow.head_angle,
    );
    let corners = [(from.x, from.y), (to.x, to.y), head[0], head[1]];
    bounding_box_for_points(corners, size)
}

fn ensure_positive_rect(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Option<Rect> {
    let min_x = min_x.floor() as i32;
    let min_y = min_y.floor() as i32;
    let mut max_x = max_x.ceil() as i32;
    let mut max_y = max_y.ceil() as i32;
    if min_x == max_x {
        max_x += 1;
    }
    if min_y == max_y {
        max_y += 1;
    }
    Rect::from_min_max(min_x, min_y, max_x, max_y)
}
