//! Normalized gesture events.
//!
//! Any platform recognizer (touch, mouse, stylus) maps its native events to
//! these before handing them to the engine.

/// Kind of gesture event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    /// Pointer went down and started moving
    PanStart,
    /// Pointer moved while down
    PanMove,
    /// Pointer was released
    PanEnd,
    /// The platform aborted the pan
    PanCancel,
    /// Short press without movement
    Tap,
}

/// One gesture sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureEvent {
    pub kind: GestureKind,
    /// Pointer position in host coordinates
    pub center: (f64, f64),
    /// Offset from the pan start position
    pub delta: (f64, f64),
}

impl GestureEvent {
    pub fn new(kind: GestureKind, center: (f64, f64), delta: (f64, f64)) -> Self {
        Self {
            kind,
            center,
            delta,
        }
    }

    pub fn pan_start(x: f64, y: f64) -> Self {
        Self::new(GestureKind::PanStart, (x, y), (0.0, 0.0))
    }

    pub fn pan_move(x: f64, y: f64, delta_x: f64, delta_y: f64) -> Self {
        Self::new(GestureKind::PanMove, (x, y), (delta_x, delta_y))
    }

    pub fn pan_end(x: f64, y: f64, delta_x: f64, delta_y: f64) -> Self {
        Self::new(GestureKind::PanEnd, (x, y), (delta_x, delta_y))
    }

    pub fn pan_cancel(x: f64, y: f64, delta_x: f64, delta_y: f64) -> Self {
        Self::new(GestureKind::PanCancel, (x, y), (delta_x, delta_y))
    }

    pub fn tap(x: f64, y: f64) -> Self {
        Self::new(GestureKind::Tap, (x, y), (0.0, 0.0))
    }
}

/// Receiver of normalized gestures.
pub trait GestureHandler {
    fn on_pan_start(&mut self, event: &GestureEvent);
    fn on_pan_move(&mut self, event: &GestureEvent);
    fn on_pan_end(&mut self, event: &GestureEvent);
    fn on_pan_cancel(&mut self, event: &GestureEvent);
    fn on_tap(&mut self, event: &GestureEvent);

    /// Dispatches on `event.kind`.
    fn handle_gesture(&mut self, event: &GestureEvent) {
        match event.kind {
            GestureKind::PanStart => self.on_pan_start(event),
            GestureKind::PanMove => self.on_pan_move(event),
            GestureKind::PanEnd => self.on_pan_end(event),
            GestureKind::PanCancel => self.on_pan_cancel(event),
            GestureKind::Tap => self.on_tap(event),
        }
    }
}
