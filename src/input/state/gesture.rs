use crate::draw::{AnnotationId, Point, StrokeKind, TextZone};
use crate::input::events::{GestureEvent, GestureHandler};
use crate::input::tool::Tool;
use crate::util::{self, Bounds};

use super::{Graffiti, InteractionState};

impl Graffiti {
    /// Handles a pan start.
    ///
    /// # Behavior
    /// - On a selected label's resize handle: starts resizing it
    /// - On a label body: selects it and starts dragging it
    /// - Elsewhere with the curve or arrow tool: starts a stroke
    fn begin_pan(&mut self, event: &GestureEvent) {
        if self.state != InteractionState::Idle {
            log::debug!("Ignoring pan start while {:?}", self.state);
            return;
        }
        let (x, y) = self.to_canvas(event.center);

        if let Some((id, zone)) = self.store.hit_test_text(x, y, &self.style.text) {
            match zone {
                TextZone::Resize => self.begin_resize(id, (x, y)),
                TextZone::Body => self.begin_drag(id),
                TextZone::Delete => log::debug!("Pan on delete handle of text {id} ignored"),
            }
            return;
        }

        match self.mode {
            Some(Tool::Curve) => self.begin_stroke(StrokeKind::Curve, x, y),
            Some(Tool::Arrow) => self.begin_stroke(StrokeKind::Arrow, x, y),
            Some(Tool::Text) | None => log::debug!("No drawing tool active, ignoring pan"),
        }
    }

    fn begin_stroke(&mut self, kind: StrokeKind, x: f64, y: f64) {
        if kind == StrokeKind::Arrow
            && let Err(err) = self.canvas.snapshot_base()
        {
            log::warn!("Cannot start arrow: {}", err);
            return;
        }

        let style = self.stroke_style(kind);
        let id = self.store.begin_stroke(kind, style.color, style.size);
        self.store.append_point(Point::new(x, y));
        self.state = match kind {
            StrokeKind::Curve => InteractionState::StrokingCurve { id },
            StrokeKind::Arrow => InteractionState::StrokingArrow { id },
        };
        log::debug!("Started {:?} {id} at ({x:.1}, {y:.1})", kind);
    }

    fn begin_drag(&mut self, id: AnnotationId) {
        self.store.select_text(id);
        let Some(text) = self.store.text(id) else {
            return;
        };
        self.state = InteractionState::DraggingText {
            id,
            anchor: (text.x, text.y),
        };
        log::debug!("Dragging text {id}");
        self.redraw();
    }

    fn begin_resize(&mut self, id: AnnotationId, start: (f64, f64)) {
        let Some(text) = self.store.text(id) else {
            return;
        };
        self.state = InteractionState::ResizingText {
            id,
            start,
            initial_size: (text.width, text.height),
            center: text.center(),
        };
        log::debug!("Resizing text {id}");
    }

    /// Scales the label so the pointer's distance change from the center maps
    /// onto width, with height following the initial aspect ratio.
    fn apply_resize(&mut self, state: InteractionState, pointer: (f64, f64)) {
        let InteractionState::ResizingText {
            id,
            start,
            initial_size: (initial_w, initial_h),
            center: (cx, cy),
        } = state
        else {
            return;
        };

        let min = self.style.text.min_dimension;
        let delta = util::distance(pointer.0, pointer.1, cx, cy)
            - util::distance(start.0, start.1, cx, cy);
        let ratio = if initial_w > 0.0 {
            initial_h / initial_w
        } else {
            1.0
        };

        if let Some(text) = self.store.text_mut(id) {
            text.width = (initial_w + delta).max(min);
            text.height = (initial_h + delta * ratio).max(min);
            text.x = cx - text.width / 2.0;
            text.y = cy - text.height / 2.0;
        }
    }

    fn drag_to(&mut self, id: AnnotationId, anchor: (f64, f64), delta: (f64, f64)) {
        if let Some(text) = self.store.text_mut(id) {
            text.move_to(anchor.0 + delta.0, anchor.1 + delta.1);
        }
    }

    fn move_pan(&mut self, event: &GestureEvent) {
        let (x, y) = self.to_canvas(event.center);

        match self.state {
            InteractionState::Idle => {
                log::debug!("Ignoring stray pan move");
            }
            InteractionState::StrokingCurve { .. } => {
                self.store.append_point(Point::new(x, y));
                self.draw_latest_segment();
            }
            InteractionState::StrokingArrow { .. } => {
                self.store.append_point(Point::new(x, y));
                self.request_frame();
            }
            InteractionState::DraggingText { id, anchor } => {
                self.drag_to(id, anchor, event.delta);
                self.request_frame();
            }
            state @ InteractionState::ResizingText { .. } => {
                self.apply_resize(state, (x, y));
                self.redraw();
            }
        }
    }

    /// Finishes the active pan. Cancelled pans keep their result.
    fn finish_pan(&mut self, event: &GestureEvent) {
        let (x, y) = self.to_canvas(event.center);
        let state = std::mem::replace(&mut self.state, InteractionState::Idle);
        self.frame_pending = false;

        match state {
            InteractionState::Idle => {
                log::debug!("Ignoring pan end with nothing in progress");
                return;
            }
            InteractionState::StrokingCurve { id } => {
                self.store.append_point(Point::new(x, y));
                self.draw_latest_segment();
                self.store.end_stroke();
                log::debug!("Finished curve {id}");
            }
            InteractionState::StrokingArrow { id } => {
                self.store.append_point(Point::new(x, y));
                self.store.end_stroke();
                self.render_arrow_frame(id);
                self.canvas.clear_base();
                self.last_preview_bounds = None;
                log::debug!("Finished arrow {id}");
            }
            InteractionState::DraggingText { id, anchor } => {
                self.drag_to(id, anchor, event.delta);
                let (width, height) = self.canvas.size();
                let canvas = Bounds::new(0.0, 0.0, width, height);
                if let Some(text) = self.store.text_mut(id)
                    && !text.bounds().intersects(&canvas)
                {
                    log::debug!("Text {id} dropped off canvas, reverting");
                    text.move_to(anchor.0, anchor.1);
                }
                self.redraw();
            }
            state @ InteractionState::ResizingText { .. } => {
                self.apply_resize(state, (x, y));
                self.redraw();
            }
        }

        self.notify_draw_end();
    }

    /// Handles a tap.
    ///
    /// # Behavior
    /// - On a selected label's delete handle: deletes the label
    /// - On a label body: selects it and reports it to the host for editing
    /// - Elsewhere: deselects every label
    fn tap(&mut self, event: &GestureEvent) {
        if self.state != InteractionState::Idle {
            log::debug!("Ignoring tap while {:?}", self.state);
            return;
        }
        let (x, y) = self.to_canvas(event.center);

        match self.store.hit_test_text(x, y, &self.style.text) {
            Some((id, TextZone::Delete)) => {
                self.store.delete_text(id);
                log::debug!("Deleted text {id}");
                self.redraw();
                self.notify_draw_end();
            }
            Some((id, TextZone::Body)) => {
                self.store.select_text(id);
                self.redraw();
                if let Some(text) = self.store.text(id) {
                    self.callbacks
                        .on_select_text(&text.content, text.font_size, text.color);
                }
            }
            Some((id, TextZone::Resize)) => {
                log::debug!("Tap on resize handle of text {id} ignored");
            }
            None => {
                self.store.deselect_all_text();
                self.redraw();
            }
        }
    }
}

impl GestureHandler for Graffiti {
    fn on_pan_start(&mut self, event: &GestureEvent) {
        self.begin_pan(event);
    }

    fn on_pan_move(&mut self, event: &GestureEvent) {
        self.move_pan(event);
    }

    fn on_pan_end(&mut self, event: &GestureEvent) {
        self.finish_pan(event);
    }

    fn on_pan_cancel(&mut self, event: &GestureEvent) {
        log::debug!("Pan cancelled in {:?}", self.state);
        self.finish_pan(event);
    }

    fn on_tap(&mut self, event: &GestureEvent) {
        self.tap(event);
    }
}
