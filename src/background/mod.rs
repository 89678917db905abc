//! Background image management.
//!
//! Loads an encoded image, fits it into the host viewport and paints it under
//! the annotations, optionally rotated by quarter turns.

pub mod source;
pub mod types;

pub use source::{DefaultImageSource, ImageSource, parse_location};
pub use types::{Dimensions, ImageLoadError, Orientation, Viewport};

use crate::util;

/// Computes the canvas size for an image shown in `viewport`.
///
/// Landscape images keep the viewport width and derive the height from the
/// aspect ratio. Images narrower than the viewport are shown at native size.
pub fn fit_dimensions(image_width: f64, image_height: f64, viewport: Viewport) -> Dimensions {
    let mut width = viewport.width;
    let mut height = viewport.height;

    if image_width > image_height {
        height = util::round2(viewport.width / image_width * image_height);
    }
    if image_width < viewport.width {
        width = image_width;
        height = image_height;
    }

    Dimensions::new(width, height)
}

/// Decodes PNG/JPEG/WebP bytes into a premultiplied ARGB32 Cairo surface.
pub fn decode_surface(bytes: &[u8]) -> Result<cairo::ImageSurface, ImageLoadError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(ImageLoadError::EmptyImage);
    }

    let format = cairo::Format::ARgb32;
    let stride = format.stride_for_width(width)?;
    let row_len = stride as usize;
    let mut data = vec![0u8; row_len * height as usize];

    for (y, row) in rgba.rows().enumerate() {
        let line = &mut data[y * row_len..(y + 1) * row_len];
        for (x, pixel) in row.enumerate() {
            let [r, g, b, a] = pixel.0;
            let alpha = u32::from(a);
            let premultiply = |c: u8| (u32::from(c) * alpha + 127) / 255;
            let argb =
                alpha << 24 | premultiply(r) << 16 | premultiply(g) << 8 | premultiply(b);
            line[x * 4..x * 4 + 4].copy_from_slice(&argb.to_ne_bytes());
        }
    }

    Ok(cairo::ImageSurface::create_for_data(
        data,
        format,
        width as i32,
        height as i32,
        stride,
    )?)
}

/// A decoded background image plus how it is presented.
pub struct BackgroundImage {
    surface: cairo::ImageSurface,
    orientation: Orientation,
}

impl BackgroundImage {
    /// Decodes encoded image bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ImageLoadError> {
        Ok(Self::from_surface(decode_surface(bytes)?))
    }

    pub fn from_surface(surface: cairo::ImageSurface) -> Self {
        Self {
            surface,
            orientation: Orientation::UPRIGHT,
        }
    }

    /// Native pixel size of the image, ignoring orientation.
    pub fn image_size(&self) -> Dimensions {
        Dimensions::new(self.surface.width() as f64, self.surface.height() as f64)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    /// Canvas size for this image in `viewport`, with sideways orientations swapped.
    pub fn canvas_dimensions(&self, viewport: Viewport) -> Dimensions {
        let size = self.image_size();
        let fitted = fit_dimensions(size.width, size.height, viewport);
        if self.orientation.is_sideways() {
            fitted.swapped()
        } else {
            fitted
        }
    }

    /// Paints the image stretched over a `width`×`height` canvas, rotated about
    /// the canvas center.
    pub fn draw(&self, ctx: &cairo::Context, width: f64, height: f64) {
        let size = self.image_size();
        let (upright_w, upright_h) = if self.orientation.is_sideways() {
            (height, width)
        } else {
            (width, height)
        };

        let _ = ctx.save();
        ctx.translate(width / 2.0, height / 2.0);
        ctx.rotate(self.orientation.radians());
        ctx.translate(-upright_w / 2.0, -upright_h / 2.0);
        ctx.scale(upright_w / size.width, upright_h / size.height);
        if let Err(err) = ctx.set_source_surface(&self.surface, 0.0, 0.0) {
            log::warn!("Failed to use background surface: {}", err);
        } else {
            ctx.source().set_filter(cairo::Filter::Good);
            let _ = ctx.paint();
        }
        let _ = ctx.restore();
    }
}

impl std::fmt::Debug for BackgroundImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundImage")
            .field("size", &self.image_size())
            .field("orientation", &self.orientation)
            .finish()
    }
}
