//! Font descriptor and text measurement.

/// Font configuration for text rendering.
///
/// Describes which font to use, including family name, weight, and style.
/// The same descriptor is used when measuring and when drawing so that the
/// computed bounding boxes match the rendered glyphs.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    /// Font family name (e.g., "Sans", "Monospace", "JetBrains Mono")
    pub family: String,

    /// Font weight (e.g., "normal", "bold", "light" or numeric 100-900)
    pub weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    pub style: String,
}

impl Default for FontDescriptor {
    /// Bold system sans-serif.
    fn default() -> Self {
        Self {
            family: "Sans".to_string(),
            weight: "bold".to_string(),
            style: "normal".to_string(),
        }
    }
}

impl FontDescriptor {
    /// Creates a new font descriptor with the specified parameters.
    pub fn new(family: String, weight: String, style: String) -> Self {
        Self {
            family,
            weight,
            style,
        }
    }

    /// Converts this descriptor to a size-less Pango font string.
    ///
    /// Format: "Family Style Weight", e.g. "Sans Bold" or "Monospace Italic".
    pub fn to_pango_string(&self) -> String {
        let mut parts = vec![self.family.clone()];

        if self.style.to_lowercase() != "normal" {
            parts.push(capitalize_first(&self.style));
        }

        if self.weight.to_lowercase() != "normal" {
            parts.push(capitalize_first(&self.weight));
        }

        parts.join(" ")
    }

    /// Builds a Pango description whose size is `size_px` device pixels.
    pub fn to_pango_description(&self, size_px: f64) -> pango::FontDescription {
        let mut desc = pango::FontDescription::from_string(&self.to_pango_string());
        desc.set_absolute_size(size_px * pango::SCALE as f64);
        desc
    }
}

/// Capitalizes the first letter of a string.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Measures single lines of text for layout.
pub trait TextMeasure {
    /// Logical advance width of `line` in pixels.
    fn line_width(&self, line: &str, font: &FontDescriptor, size_px: f64) -> f64;
}

/// Measures text with Pango on a scratch Cairo surface.
#[derive(Debug, Default, Clone, Copy)]
pub struct PangoMeasure;

impl TextMeasure for PangoMeasure {
    fn line_width(&self, line: &str, font: &FontDescriptor, size_px: f64) -> f64 {
        if line.is_empty() {
            return 0.0;
        }

        // A tiny image surface is enough; only the layout is needed.
        let surface = match cairo::ImageSurface::create(cairo::Format::ARgb32, 1, 1) {
            Ok(surface) => surface,
            Err(err) => {
                log::warn!("Text measurement surface unavailable: {err}");
                return 0.0;
            }
        };
        let ctx = match cairo::Context::new(&surface) {
            Ok(ctx) => ctx,
            Err(err) => {
                log::warn!("Text measurement context unavailable: {err}");
                return 0.0;
            }
        };

        let layout = pangocairo::functions::create_layout(&ctx);
        layout.set_font_description(Some(&font.to_pango_description(size_px)));
        layout.set_text(line);

        let (_ink_rect, logical_rect) = layout.extents();
        logical_rect.width() as f64 / pango::SCALE as f64
    }
}
