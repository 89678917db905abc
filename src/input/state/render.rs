use crate::draw::annotation::bounding_box_for_points;
use crate::draw::render::{render_background, render_curve_segment};
use crate::draw::{Annotation, AnnotationId, render_annotation};
use crate::util::Rect;

use super::{Graffiti, InteractionState};

impl Graffiti {
    /// Redraws background and every current annotation onto the primary surface.
    ///
    /// During an arrow stroke the base snapshot is retaken without the arrow,
    /// since resizes drop it and other edits make it stale.
    pub fn redraw(&mut self) {
        let (width, height) = self.canvas.size();
        let ctx = match self.canvas.primary_context() {
            Ok(ctx) => ctx,
            Err(err) => {
                log::warn!("Skipping redraw: {}", err);
                return;
            }
        };
        let arrow = match self.state {
            InteractionState::StrokingArrow { id } => Some(id),
            _ => None,
        };

        render_background(
            &ctx,
            width,
            height,
            self.style.background_color,
            self.background.as_ref(),
        );
        for annotation in self.store.current() {
            if Some(annotation.id()) != arrow {
                render_annotation(&ctx, annotation, &self.style);
            }
        }
        drop(ctx);
        self.dirty.mark_full();

        if let Some(id) = arrow {
            if let Err(err) = self.canvas.snapshot_base() {
                log::warn!("Failed to refresh arrow base: {}", err);
            }
            self.render_arrow_frame(id);
        }
    }

    /// Draws only the newest segment of the in-progress curve.
    pub(super) fn draw_latest_segment(&mut self) {
        let Some(Annotation::Curve(stroke)) = self.store.in_progress() else {
            return;
        };
        let [.., from, to] = stroke.points.as_slice() else {
            return;
        };

        let ctx = match self.canvas.primary_context() {
            Ok(ctx) => ctx,
            Err(err) => {
                log::warn!("Skipping curve segment: {}", err);
                return;
            }
        };
        render_curve_segment(&ctx, from, to, stroke.color, stroke.size);

        let rect = bounding_box_for_points([(from.x, from.y), (to.x, to.y)], stroke.size);
        self.dirty.mark_optional_rect(rect);
    }

    /// Rebuilds the cache from the arrow base plus the arrow so far, then
    /// copies it to the primary surface.
    pub(super) fn render_arrow_frame(&mut self, id: AnnotationId) {
        let ctx = match self.canvas.begin_cache_frame() {
            Ok(ctx) => ctx,
            Err(err) => {
                log::warn!("Skipping arrow frame: {}", err);
                return;
            }
        };

        let arrow = self.store.get(id);
        if let Some(arrow) = arrow {
            render_annotation(&ctx, arrow, &self.style);
        }
        drop(ctx);

        if let Err(err) = self.canvas.present_cache() {
            log::warn!("Failed to present arrow frame: {}", err);
            return;
        }

        // The previous preview is erased by this frame, so both areas changed
        self.dirty.mark_optional_rect(self.last_preview_bounds.take());
        if let Some(arrow) = arrow {
            self.dirty.mark_annotation(arrow, &self.style);
            self.last_preview_bounds = arrow.bounding_box(&self.style.arrow);
        }
    }

    /// Whether a coalesced redraw is waiting for [`Graffiti::on_animation_frame`].
    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    pub(super) fn request_frame(&mut self) {
        self.frame_pending = true;
    }

    /// Runs the pending coalesced redraw, if any. Hosts call this once per
    /// display frame. Returns `true` when something was drawn.
    pub fn on_animation_frame(&mut self) -> bool {
        if !std::mem::take(&mut self.frame_pending) {
            return false;
        }

        match self.state {
            InteractionState::StrokingArrow { id } => self.render_arrow_frame(id),
            InteractionState::DraggingText { .. } => self.redraw(),
            _ => return false,
        }
        true
    }

    /// Drains the areas of the primary surface changed since the last call.
    pub fn take_dirty_regions(&mut self) -> Vec<Rect> {
        self.dirty.take_regions(self.canvas.width(), self.canvas.height())
    }

    /// Whether anything was drawn since the last [`Graffiti::take_dirty_regions`].
    pub fn needs_present(&self) -> bool {
        self.dirty.is_dirty()
    }
}
