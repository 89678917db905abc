//! Data types for background image loading.

use thiserror::Error;

/// Pixel size of the drawing canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Same dimensions with width and height exchanged.
    pub fn swapped(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// Integer surface size, at least one pixel per side.
    pub fn to_pixels(self) -> (i32, i32) {
        (
            (self.width.round() as i32).max(1),
            (self.height.round() as i32).max(1),
        )
    }
}

/// Area the host gives the canvas; images are fitted into it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl From<Viewport> for Dimensions {
    fn from(viewport: Viewport) -> Self {
        Dimensions::new(viewport.width, viewport.height)
    }
}

/// Rotation of the background in quarter turns clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Orientation(u8);

impl Orientation {
    pub const UPRIGHT: Orientation = Orientation(0);

    /// Orientation after `quarter_turns` more turns; negative turns rotate back.
    pub fn rotated(self, quarter_turns: i32) -> Self {
        let turns = (self.0 as i32 + quarter_turns).rem_euclid(4);
        Orientation(turns as u8)
    }

    /// Quarter turns from upright, in `0..4`.
    pub fn quarter_turns(self) -> u8 {
        self.0
    }

    /// True when width and height are exchanged relative to upright.
    pub fn is_sideways(self) -> bool {
        self.0 % 2 == 1
    }

    pub fn radians(self) -> f64 {
        f64::from(self.0) * std::f64::consts::FRAC_PI_2
    }
}

/// Errors that can occur while loading a background image.
///
/// The engine keeps its previous background when any of these is returned.
#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("Invalid image location: {0}")]
    InvalidUrl(String),

    #[error("Unsupported URL scheme '{0}'")]
    UnsupportedScheme(String),

    #[error("Failed to read image: {0}")]
    Fetch(#[from] std::io::Error),

    #[error("Failed to download image: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Failed to create image surface: {0}")]
    Surface(#[from] cairo::Error),

    #[error("Image has no pixels")]
    EmptyImage,
}

impl From<crate::GraffitiError> for ImageLoadError {
    fn from(err: crate::GraffitiError) -> Self {
        match err {
            crate::GraffitiError::SurfaceUnavailable(err) => ImageLoadError::Surface(err),
        }
    }
}
