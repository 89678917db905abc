//! Embeddable annotation engine.
//!
//! Draws freehand curves, arrows and movable text labels over a background
//! image on Cairo surfaces, keeps an undoable annotation history and exports
//! the composited result as PNG or JPEG.
//!
//! The host owns the window and the gesture recognizer. It feeds normalized
//! gestures into [`Graffiti`], presents [`Graffiti::surface`] and receives
//! notifications through [`input::HostCallbacks`].

pub mod background;
pub mod config;
pub mod draw;
pub mod export;
pub mod input;
pub mod util;

pub use config::Config;
pub use input::{Graffiti, GestureEvent, GestureHandler, GestureKind, HostCallbacks, Tool};

use thiserror::Error;

/// Errors that prevent the engine from drawing at all.
#[derive(Debug, Error)]
pub enum GraffitiError {
    #[error("Drawing surface unavailable: {0}")]
    SurfaceUnavailable(#[from] cairo::Error),
}
