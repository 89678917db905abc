//! Notifications from the engine to its host.

use crate::background::{Dimensions, ImageLoadError};
use crate::draw::{Annotation, Color};

/// Host hooks. Every method defaults to doing nothing.
pub trait HostCallbacks {
    /// A text label was tapped; hosts typically open an edit field.
    fn on_select_text(&mut self, _content: &str, _font_size: f64, _color: Color) {}

    /// An edit finished: stroke end, text add/edit/move/resize, or delete.
    fn on_draw_end(&mut self, _current: &[Annotation], _can_undo: bool, _can_redo: bool) {}

    /// A background load finished, with the new canvas size on success.
    fn on_background_loaded(&mut self, _result: Result<Dimensions, &ImageLoadError>) {}
}

/// Callbacks that ignore every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCallbacks;

impl HostCallbacks for NoopCallbacks {}
