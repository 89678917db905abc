//! Configuration type definitions.

use super::enums::ColorSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the initial tool color and sizes, the canvas fill and the font
/// used for text labels. Hosts change color and sizes at runtime through the
/// controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Initial ink color - a palette name, a CSS-style hex/rgb() string, or an
    /// RGB array like `[255, 0, 0]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Initial stroke width in pixels (valid range: 1.0 - 50.0)
    ///
    /// Applies to curves, and to arrows unless `[arrow] size` is set.
    #[serde(default = "default_size")]
    pub default_size: f64,

    /// Initial font size for text labels in pixels (valid range: 8.0 - 200.0)
    #[serde(default = "default_font_size")]
    pub default_font_size: f64,

    /// Fill painted under the background image
    #[serde(default = "default_background_color")]
    pub background_color: ColorSpec,

    /// Font family name for text rendering (e.g., "Sans", "Monospace")
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font weight (e.g., "normal", "bold", "light", 400, 700)
    #[serde(default = "default_font_weight")]
    pub font_weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    #[serde(default = "default_font_style")]
    pub font_style: String,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_size: default_size(),
            default_font_size: default_font_size(),
            background_color: default_background_color(),
            font_family: default_font_family(),
            font_weight: default_font_weight(),
            font_style: default_font_style(),
        }
    }
}

/// Arrow settings. The head geometry does not scale with stroke width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ArrowConfig {
    /// Arrowhead side length in pixels (valid range: 5.0 - 50.0)
    #[serde(default = "default_arrow_length")]
    pub head_length: f64,

    /// Angle between each head side and the shaft in degrees (valid range: 15.0 - 60.0)
    #[serde(default = "default_arrow_angle")]
    pub head_angle_degrees: f64,

    /// Initial arrow color; `drawing.default_color` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorSpec>,

    /// Initial arrow line width; `drawing.default_size` when unset (valid range: 1.0 - 50.0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

impl Default for ArrowConfig {
    fn default() -> Self {
        Self {
            head_length: default_arrow_length(),
            head_angle_degrees: default_arrow_angle(),
            color: None,
            size: None,
        }
    }
}

/// Text label layout and handle settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TextConfig {
    /// Pixels added to the font size to get the line height (valid range: 0.0 - 20.0)
    #[serde(default = "default_line_spacing")]
    pub line_spacing: f64,

    /// Box padding as a fraction of the font size (valid range: 0.0 - 2.0)
    #[serde(default = "default_padding_ratio")]
    pub padding_ratio: f64,

    /// Side of the square delete and resize handles (valid range: 8.0 - 64.0)
    #[serde(default = "default_handle_size")]
    pub handle_size: f64,

    /// Extra grab margin above and left of the text body (valid range: 0.0 - 40.0)
    #[serde(default = "default_body_margin")]
    pub body_margin: f64,

    /// Smallest width or height a resize can produce (valid range: 1.0 - 100.0)
    #[serde(default = "default_min_dimension")]
    pub min_dimension: f64,

    /// Outline and handle color of the selected label
    #[serde(default = "default_selection_color")]
    pub selection_color: ColorSpec,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            line_spacing: default_line_spacing(),
            padding_ratio: default_padding_ratio(),
            handle_size: default_handle_size(),
            body_margin: default_body_margin(),
            min_dimension: default_min_dimension(),
            selection_color: default_selection_color(),
        }
    }
}

/// Initial canvas size, used until the host reports its viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Viewport width in pixels (valid range: 1.0 - 16384.0)
    #[serde(default = "default_viewport_width")]
    pub viewport_width: f64,

    /// Viewport height in pixels (valid range: 1.0 - 16384.0)
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
        }
    }
}

/// Export defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// MIME type ("image/png" or "image/jpeg"; anything else exports PNG)
    #[serde(default = "default_export_mime")]
    pub mime: String,

    /// JPEG quality (valid range: 0.0 - 1.0)
    #[serde(default = "default_export_quality")]
    pub quality: f64,

    /// Directory exports are saved to (supports ~ expansion)
    #[serde(default = "default_save_directory")]
    pub save_directory: String,

    /// Filename template with chrono format specifiers
    #[serde(default = "default_filename_template")]
    pub filename_template: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            mime: default_export_mime(),
            quality: default_export_quality(),
            save_directory: default_save_directory(),
            filename_template: default_filename_template(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_color() -> ColorSpec {
    ColorSpec::Name("#fff".to_string())
}

fn default_size() -> f64 {
    2.0
}

fn default_font_size() -> f64 {
    20.0
}

fn default_background_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_font_family() -> String {
    "Sans".to_string()
}

fn default_font_weight() -> String {
    "bold".to_string()
}

fn default_font_style() -> String {
    "normal".to_string()
}

fn default_arrow_length() -> f64 {
    10.0
}

fn default_arrow_angle() -> f64 {
    30.0
}

fn default_line_spacing() -> f64 {
    2.0
}

fn default_padding_ratio() -> f64 {
    0.66
}

fn default_handle_size() -> f64 {
    24.0
}

fn default_body_margin() -> f64 {
    10.0
}

fn default_min_dimension() -> f64 {
    5.0
}

fn default_selection_color() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_viewport_width() -> f64 {
    800.0
}

fn default_viewport_height() -> f64 {
    600.0
}

fn default_export_mime() -> String {
    "image/png".to_string()
}

fn default_export_quality() -> f64 {
    crate::export::DEFAULT_JPEG_QUALITY
}

fn default_save_directory() -> String {
    "~/Pictures/Graffiti".to_string()
}

fn default_filename_template() -> String {
    "graffiti_%Y-%m-%d_%H%M%S".to_string()
}
