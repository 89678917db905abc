//! Ordered annotation list with undo/redo history.

use super::annotation::{Annotation, AnnotationId, StrokeKind};
use super::color::Color;
use super::font::TextMeasure;
use super::point::Point;
use super::style::TextStyle;
use super::text::{TextAnnotation, TextZone};

/// Single source of truth for what is on the canvas.
///
/// The full history is the append-only superset that enables redo; the
/// current view is the prefix of it that is actually drawn. Both views live in
/// one vector: `current == history[..cursor]`.
#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    history: Vec<Annotation>,
    cursor: usize,
    /// Id of the stroke still receiving points (always `history[cursor - 1]`)
    in_progress: Option<AnnotationId>,
    next_id: u64,
}

impl AnnotationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Annotations currently on the canvas, in render order.
    pub fn current(&self) -> &[Annotation] {
        &self.history[..self.cursor]
    }

    /// The current view plus any undone annotations that redo can restore.
    pub fn full_history(&self) -> &[Annotation] {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.history.len() > self.cursor
    }

    /// The stroke still receiving points, if any.
    pub fn in_progress(&self) -> Option<&Annotation> {
        let id = self.in_progress?;
        self.current().last().filter(|a| a.id() == id)
    }

    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.current().iter().find(|a| a.id() == id)
    }

    pub fn get_mut(&mut self, id: AnnotationId) -> Option<&mut Annotation> {
        self.history[..self.cursor].iter_mut().find(|a| a.id() == id)
    }

    pub fn text(&self, id: AnnotationId) -> Option<&TextAnnotation> {
        self.get(id).and_then(Annotation::as_text)
    }

    pub fn text_mut(&mut self, id: AnnotationId) -> Option<&mut TextAnnotation> {
        self.get_mut(id).and_then(Annotation::as_text_mut)
    }

    fn allocate_id(&mut self) -> AnnotationId {
        self.next_id += 1;
        AnnotationId(self.next_id)
    }

    /// Appends a new annotation to the current view, discarding any redo tail.
    fn push(&mut self, annotation: Annotation) {
        if self.history.len() > self.cursor {
            log::debug!(
                "Discarding {} redo entries",
                self.history.len() - self.cursor
            );
            self.history.truncate(self.cursor);
        }
        self.history.push(annotation);
        self.cursor = self.history.len();
    }

    /// Starts a new empty curve or arrow and makes it the in-progress stroke.
    pub fn begin_stroke(&mut self, kind: StrokeKind, color: Color, size: f64) -> AnnotationId {
        if self.in_progress.is_some() {
            log::debug!("Finalizing unfinished stroke before starting a new one");
            self.end_stroke();
        }

        let id = self.allocate_id();
        self.push(Annotation::new_stroke(kind, id, color, size));
        self.in_progress = Some(id);
        id
    }

    /// Appends a sample to the in-progress stroke. Returns `false` when there is none.
    pub fn append_point(&mut self, point: Point) -> bool {
        let Some(id) = self.in_progress else {
            log::debug!("Ignoring point with no stroke in progress");
            return false;
        };
        match self.get_mut(id).and_then(Annotation::as_stroke_mut) {
            Some(stroke) => {
                stroke.points.push(point);
                true
            }
            None => false,
        }
    }

    /// Finalizes the in-progress stroke and returns its id.
    ///
    /// A stroke that never received a point is dropped instead of entering history.
    pub fn end_stroke(&mut self) -> Option<AnnotationId> {
        let id = self.in_progress.take()?;
        let empty = self
            .get(id)
            .and_then(Annotation::as_stroke)
            .is_none_or(|stroke| stroke.points.is_empty());

        if empty {
            log::debug!("Dropping empty stroke {id}");
            self.delete(id);
            return None;
        }
        Some(id)
    }

    /// Adds a selected text label centered on the canvas.
    ///
    /// While a stroke is in progress the label is slotted just below it.
    pub fn add_text(
        &mut self,
        content: &str,
        color: Color,
        font_size: f64,
        canvas_size: (f64, f64),
        style: &TextStyle,
        measure: &dyn TextMeasure,
    ) -> AnnotationId {
        let id = self.allocate_id();
        let mut text = TextAnnotation::new(id, content, color, font_size, style, measure);
        text.center_in(canvas_size.0, canvas_size.1);

        self.deselect_all_text();
        text.selected = true;
        let annotation = Annotation::Text(text);
        match self.in_progress {
            // The open stroke stays last so it keeps receiving points
            Some(_) if self.cursor > 0 => {
                self.history.insert(self.cursor - 1, annotation);
                self.cursor += 1;
            }
            _ => self.push(annotation),
        }
        id
    }

    /// Edits a text label in place and selects it. Returns `false` for unknown ids.
    pub fn edit_text(
        &mut self,
        id: AnnotationId,
        content: &str,
        color: Color,
        font_size: f64,
        style: &TextStyle,
        measure: &dyn TextMeasure,
    ) -> bool {
        let Some(text) = self.text_mut(id) else {
            log::debug!("Ignoring edit of unknown text {id}");
            return false;
        };
        text.update(content, color, font_size, style, measure);
        self.select_text(id)
    }

    /// Removes an annotation from both the current view and the full history.
    pub fn delete(&mut self, id: AnnotationId) -> bool {
        let Some(index) = self.history.iter().position(|a| a.id() == id) else {
            return false;
        };
        self.history.remove(index);
        if index < self.cursor {
            self.cursor -= 1;
        }
        if self.in_progress == Some(id) {
            self.in_progress = None;
        }
        true
    }

    /// Deletes a text label. Non-text annotations are left alone.
    pub fn delete_text(&mut self, id: AnnotationId) -> bool {
        if self.text(id).is_none() {
            return false;
        }
        self.delete(id)
    }

    /// Hides the most recent annotation. No-op while a stroke is in progress.
    pub fn undo(&mut self) -> bool {
        if self.in_progress.is_some() || !self.can_undo() {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Restores the next undone annotation. No-op while a stroke is in progress.
    pub fn redo(&mut self) -> bool {
        if self.in_progress.is_some() || !self.can_redo() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Removes every annotation, including the redo tail.
    pub fn clear(&mut self) {
        self.history.clear();
        self.cursor = 0;
        self.in_progress = None;
    }

    pub fn deselect_all_text(&mut self) {
        for annotation in &mut self.history {
            if let Annotation::Text(text) = annotation {
                text.selected = false;
            }
        }
    }

    /// Selects one text label and deselects every other one.
    pub fn select_text(&mut self, id: AnnotationId) -> bool {
        if self.text(id).is_none() {
            return false;
        }
        for annotation in &mut self.history {
            if let Annotation::Text(text) = annotation {
                text.selected = text.id == id;
            }
        }
        true
    }

    /// The selected text label, if any.
    pub fn selected_text(&self) -> Option<&TextAnnotation> {
        self.current()
            .iter()
            .filter_map(Annotation::as_text)
            .find(|text| text.selected)
    }

    /// Finds the topmost text under a point.
    ///
    /// Texts are checked in render order and the last match wins, because later
    /// annotations are drawn on top.
    pub fn hit_test_text(&self, x: f64, y: f64, style: &TextStyle) -> Option<(AnnotationId, TextZone)> {
        self.current()
            .iter()
            .filter_map(Annotation::as_text)
            .filter_map(|text| text.hit_test(x, y, style).map(|zone| (text.id, zone)))
            .last()
    }
}
