mod actions;
mod core;
mod gesture;
mod render;

pub use core::{Graffiti, InteractionState};
