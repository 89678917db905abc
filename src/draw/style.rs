//! Rendering and layout parameters shared by the store, the renderer and the hit tester.

use super::color::{BLACK, Color, WHITE};
use super::font::FontDescriptor;

/// Color and line width of a curve or arrow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    /// Line width in pixels
    pub size: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: WHITE,
            size: 2.0,
        }
    }
}

/// Arrowhead geometry. Independent of the stroke width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowStyle {
    /// Length of each arrowhead side in pixels
    pub head_length: f64,
    /// Angle between each side and the shaft, in degrees
    pub head_angle: f64,
}

impl Default for ArrowStyle {
    fn default() -> Self {
        Self {
            head_length: 10.0,
            head_angle: 30.0,
        }
    }
}

/// Text layout and handle geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font: FontDescriptor,
    /// Extra pixels between lines; line height is `font_size + line_spacing`
    pub line_spacing: f64,
    /// Box padding as a fraction of the font size
    pub padding_ratio: f64,
    /// Side of the square delete/resize handles
    pub handle_size: f64,
    /// Extra grab margin above and left of the body
    pub body_margin: f64,
    /// Smallest width/height a resize may produce
    pub min_dimension: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: FontDescriptor::default(),
            line_spacing: 2.0,
            padding_ratio: 0.66,
            handle_size: 24.0,
            body_margin: 10.0,
            min_dimension: 5.0,
        }
    }
}

/// Everything the render engine needs besides the annotations themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    /// Fill painted under the background image
    pub background_color: Color,
    pub arrow: ArrowStyle,
    pub text: TextStyle,
    /// Outline and handle color for the selected text
    pub selection_color: Color,
    /// When false, selection outlines and handles are not drawn (export)
    pub show_selection: bool,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background_color: BLACK,
            arrow: ArrowStyle::default(),
            text: TextStyle::default(),
            selection_color: WHITE,
            show_selection: true,
        }
    }
}

impl RenderStyle {
    /// Copy of this style with selection decorations suppressed.
    pub fn without_selection(&self) -> Self {
        Self {
            show_selection: false,
            ..self.clone()
        }
    }
}
