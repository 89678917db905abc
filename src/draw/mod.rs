//! Rendering primitives and annotation definitions (Cairo-based).
//!
//! This module defines the core drawing types of the engine:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`Annotation`]: curves, arrows and text labels
//! - [`AnnotationStore`]: the ordered annotation list with undo/redo
//! - [`Canvas`]: primary surface plus the off-screen arrow cache
//! - Rendering functions for Cairo-based output

pub mod annotation;
pub mod color;
pub mod dirty;
pub mod font;
pub mod point;
pub mod render;
pub mod store;
pub mod style;
pub mod surface;
pub mod text;

// Re-export commonly used types at module level
pub use annotation::{Annotation, AnnotationId, Stroke, StrokeKind};
pub use color::Color;
pub use dirty::DirtyTracker;
pub use font::{FontDescriptor, PangoMeasure, TextMeasure};
pub use point::Point;
pub use render::{render_annotation, render_annotations, render_scene};
pub use store::AnnotationStore;
pub use style::{ArrowStyle, RenderStyle, StrokeStyle, TextStyle};
pub use surface::Canvas;
pub use text::{TextAnnotation, TextZone, TextZones};

// Re-export color constants for public API (unused internally but part of public interface)
#[allow(unused_imports)]
pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, TRANSPARENT, WHITE, YELLOW};
