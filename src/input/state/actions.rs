use crate::GraffitiError;
use crate::background::{BackgroundImage, Dimensions, ImageLoadError, Viewport, parse_location};
use crate::draw::{AnnotationId, Color};
use crate::export::{self, ExportError, ExportFormat, ExportedImage};
use std::path::PathBuf;

use super::{Graffiti, InteractionState};

impl Graffiti {
    // =========================================================================
    // Text labels
    // =========================================================================

    /// Adds a selected label centered on the canvas.
    pub fn add_text(&mut self, content: &str, color: Color, font_size: f64) -> AnnotationId {
        let id = self.store.add_text(
            content,
            color,
            font_size,
            self.canvas.size(),
            &self.style.text,
            self.measure.as_ref(),
        );
        log::debug!("Added text {id}");
        self.redraw();
        self.notify_draw_end();
        id
    }

    /// Replaces content, color and font size of the selected label.
    ///
    /// Returns `false` when no label is selected.
    pub fn edit_text(&mut self, content: &str, color: Color, font_size: f64) -> bool {
        let Some(id) = self.store.selected_text().map(|text| text.id) else {
            log::debug!("Ignoring text edit with no selected text");
            return false;
        };

        if !self.store.edit_text(
            id,
            content,
            color,
            font_size,
            &self.style.text,
            self.measure.as_ref(),
        ) {
            return false;
        }
        self.redraw();
        self.notify_draw_end();
        true
    }

    /// Deletes a label by id.
    pub fn delete_text(&mut self, id: AnnotationId) -> bool {
        if !self.store.delete_text(id) {
            return false;
        }
        self.redraw();
        self.notify_draw_end();
        true
    }

    /// Deselects every label.
    pub fn deselect_all_text(&mut self) {
        self.store.deselect_all_text();
        self.redraw();
    }

    // =========================================================================
    // History
    // =========================================================================

    /// Hides the most recent annotation.
    pub fn undo(&mut self) -> bool {
        if !self.store.undo() {
            log::debug!("Nothing to undo");
            return false;
        }
        self.redraw();
        true
    }

    /// Restores the most recently undone annotation.
    pub fn redo(&mut self) -> bool {
        if !self.store.redo() {
            log::debug!("Nothing to redo");
            return false;
        }
        self.redraw();
        true
    }

    /// Removes every annotation, redo history included.
    pub fn clear(&mut self) {
        self.state = InteractionState::Idle;
        self.frame_pending = false;
        self.canvas.clear_base();
        self.last_preview_bounds = None;
        self.store.clear();
        self.redraw();
        self.notify_draw_end();
    }

    // =========================================================================
    // Background and canvas geometry
    // =========================================================================

    /// Loads a background image from a URL or a filesystem path.
    ///
    /// On success the canvas is resized to fit the image into the viewport and
    /// redrawn. On failure the previous background stays in place. Either way
    /// the host is told through `on_background_loaded`.
    pub fn load_background(&mut self, location: &str) -> Result<Dimensions, ImageLoadError> {
        let result = self.try_load_background(location);
        match &result {
            Ok(dimensions) => {
                log::info!(
                    "Loaded background {} ({}x{})",
                    location,
                    dimensions.width,
                    dimensions.height
                );
                self.callbacks.on_background_loaded(Ok(*dimensions));
            }
            Err(err) => {
                log::warn!("Failed to load background {}: {}", location, err);
                self.callbacks.on_background_loaded(Err(err));
            }
        }
        result
    }

    fn try_load_background(&mut self, location: &str) -> Result<Dimensions, ImageLoadError> {
        let url = parse_location(location)?;
        let bytes = self.source.fetch(&url)?;
        let mut background = BackgroundImage::from_bytes(&bytes)?;
        background.set_orientation(self.orientation);

        let previous = self.background.replace(background);
        let dimensions = self.target_dimensions();
        if let Err(err) = self.apply_canvas_size(dimensions) {
            self.background = previous;
            return Err(err.into());
        }
        Ok(dimensions)
    }

    /// Rotates the background by quarter turns (negative turns rotate back).
    ///
    /// Odd turns swap the canvas width and height. Annotations keep their
    /// coordinates and are redrawn on top.
    pub fn rotate(&mut self, quarter_turns: i32) -> Result<(), GraffitiError> {
        if quarter_turns.rem_euclid(4) == 0 {
            return Ok(());
        }

        self.orientation = self.orientation.rotated(quarter_turns);
        if let Some(background) = self.background.as_mut() {
            background.set_orientation(self.orientation);
        }
        log::debug!(
            "Orientation now {} quarter turns",
            self.orientation.quarter_turns()
        );

        self.apply_canvas_size(self.target_dimensions())
    }

    /// Updates the viewport and refits the canvas.
    pub fn set_viewport(&mut self, viewport: Viewport) -> Result<(), GraffitiError> {
        self.viewport = viewport;
        self.apply_canvas_size(self.target_dimensions())
    }

    /// Resizes the surfaces when needed and redraws.
    fn apply_canvas_size(&mut self, dimensions: Dimensions) -> Result<(), GraffitiError> {
        let (width, height) = dimensions.to_pixels();
        self.canvas.resize(width, height)?;
        self.redraw();
        Ok(())
    }

    // =========================================================================
    // Export
    // =========================================================================

    /// Exports the canvas as `mime` ("image/png" or "image/jpeg"; anything else
    /// gives PNG). `quality` only applies to JPEG.
    pub fn export_image(
        &self,
        mime: &str,
        quality: Option<f64>,
    ) -> Result<ExportedImage, ExportError> {
        self.export_as(ExportFormat::from_mime(mime, quality))
    }

    /// Exports with the configured format.
    pub fn export_default(&self) -> Result<ExportedImage, ExportError> {
        self.export_as(self.export_format)
    }

    fn export_as(&self, format: ExportFormat) -> Result<ExportedImage, ExportError> {
        export::export_scene(
            self.canvas.width(),
            self.canvas.height(),
            self.background.as_ref(),
            self.store.current(),
            &self.style,
            format,
        )
    }

    /// Exports with the configured format into the configured directory.
    pub fn save_export(&self) -> Result<PathBuf, ExportError> {
        let image = self.export_default()?;
        export::save_export(&image, &self.export_save)
    }
}
