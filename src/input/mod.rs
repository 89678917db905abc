//! Gesture handling and the interaction state machine.
//!
//! This module translates normalized pan/tap gestures into annotation edits.
//! It holds the active tool and drawing parameters (color, size, font size)
//! and drives the state machine for stroking, dragging and resizing.

pub mod callbacks;
pub mod events;
pub mod state;
pub mod tool;

// Re-export commonly used types at module level
pub use callbacks::{HostCallbacks, NoopCallbacks};
pub use events::{GestureEvent, GestureHandler, GestureKind};
pub use state::{Graffiti, InteractionState};
pub use tool::Tool;
