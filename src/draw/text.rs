//! Text annotations: layout, bounding box and hit zones.

use super::annotation::AnnotationId;
use super::color::Color;
use super::font::TextMeasure;
use super::style::TextStyle;
use crate::util::Bounds;

/// Which part of a text box a point falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextZone {
    /// Bottom-right handle (drag to resize)
    Resize,
    /// Top-left handle (tap to delete)
    Delete,
    /// The box itself (drag to move, tap to edit)
    Body,
}

/// Hit rectangles of one text box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextZones {
    pub delete: Bounds,
    pub resize: Bounds,
    pub body: Bounds,
}

/// Text label positioned by its top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct TextAnnotation {
    pub id: AnnotationId,
    /// Text content (may contain '\n' for manual line breaks)
    pub content: String,
    pub color: Color,
    /// Font size in pixels
    pub font_size: f64,
    /// Left edge of the bounding box
    pub x: f64,
    /// Top edge of the bounding box
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Selected texts draw their outline and handles
    pub selected: bool,
    /// Space between the box edge and the glyphs
    pub padding: f64,
    /// Vertical step between consecutive lines
    pub line_height: f64,
}

impl TextAnnotation {
    /// Creates a laid-out text box with its top-left corner at the origin.
    pub fn new(
        id: AnnotationId,
        content: impl Into<String>,
        color: Color,
        font_size: f64,
        style: &TextStyle,
        measure: &dyn TextMeasure,
    ) -> Self {
        let mut text = Self {
            id,
            content: content.into(),
            color,
            font_size,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            selected: false,
            padding: 0.0,
            line_height: 0.0,
        };
        text.relayout(style, measure);
        text
    }

    /// The manual lines of the content.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.split('\n')
    }

    /// Recomputes padding, line height and box size. The top-left corner stays put.
    pub fn relayout(&mut self, style: &TextStyle, measure: &dyn TextMeasure) {
        self.padding = self.font_size * style.padding_ratio;
        self.line_height = self.font_size + style.line_spacing;

        let widest = self
            .lines()
            .map(|line| measure.line_width(line, &style.font, self.font_size))
            .fold(0.0, f64::max);
        let line_count = self.lines().count() as f64;

        self.width = widest + self.padding;
        self.height = self.line_height * line_count + self.padding;
    }

    /// Replaces content, color and font size, then relays out.
    pub fn update(
        &mut self,
        content: impl Into<String>,
        color: Color,
        font_size: f64,
        style: &TextStyle,
        measure: &dyn TextMeasure,
    ) {
        self.content = content.into();
        self.color = color;
        self.font_size = font_size;
        self.relayout(style, measure);
    }

    /// Places the box centered inside a canvas of the given size.
    pub fn center_in(&mut self, canvas_width: f64, canvas_height: f64) {
        self.x = (canvas_width - self.width) / 2.0;
        self.y = (canvas_height - self.height) / 2.0;
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    pub fn center(&self) -> (f64, f64) {
        self.bounds().center()
    }

    /// Top-left position of line `index` when drawn.
    pub fn line_origin(&self, index: usize) -> (f64, f64) {
        (
            self.x + self.padding / 2.0,
            self.y + index as f64 * self.line_height,
        )
    }

    /// Hit rectangles for the handles and body.
    pub fn zones(&self, style: &TextStyle) -> TextZones {
        TextZones {
            delete: Bounds::centered_square(self.x, self.y, style.handle_size),
            resize: Bounds::centered_square(
                self.x + self.width,
                self.y + self.height,
                style.handle_size,
            ),
            body: Bounds::new(
                self.x - style.body_margin,
                self.y - style.body_margin,
                self.width + style.body_margin,
                self.height + style.body_margin,
            ),
        }
    }

    /// Classifies a point. Precedence: resize > delete > body.
    ///
    /// Handles only respond while the text is selected.
    pub fn hit_test(&self, x: f64, y: f64, style: &TextStyle) -> Option<TextZone> {
        let zones = self.zones(style);
        if self.selected && zones.resize.contains(x, y) {
            Some(TextZone::Resize)
        } else if self.selected && zones.delete.contains(x, y) {
            Some(TextZone::Delete)
        } else if zones.body.contains(x, y) {
            Some(TextZone::Body)
        } else {
            None
        }
    }
}
