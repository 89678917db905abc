//! Interaction state machine and engine state.

use crate::GraffitiError;
use crate::background::{
    BackgroundImage, DefaultImageSource, Dimensions, ImageSource, Orientation, Viewport,
};
use crate::config::Config;
use crate::draw::{
    Annotation, AnnotationId, AnnotationStore, Canvas, Color, DirtyTracker, PangoMeasure,
    RenderStyle, StrokeKind, StrokeStyle, TextAnnotation, TextMeasure,
};
use crate::export::{ExportFormat, ExportSaveConfig};
use crate::input::callbacks::{HostCallbacks, NoopCallbacks};
use crate::input::tool::Tool;
use crate::util::Rect;

/// Current gesture state machine.
///
/// Every pan starts from `Idle` and returns to it on pan end or cancel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionState {
    /// Waiting for a pan or tap
    Idle,
    /// Freehand curve receiving points
    StrokingCurve { id: AnnotationId },
    /// Arrow receiving points; previewed through the cache surface
    StrokingArrow { id: AnnotationId },
    /// Moving a text label
    DraggingText {
        id: AnnotationId,
        /// Top-left corner when the drag started
        anchor: (f64, f64),
    },
    /// Scaling a text label around its center
    ResizingText {
        id: AnnotationId,
        /// Pointer position when the resize started
        start: (f64, f64),
        /// Box size when the resize started
        initial_size: (f64, f64),
        /// Box center, fixed for the whole resize
        center: (f64, f64),
    },
}

/// The annotation engine.
///
/// Owns the annotation store, the drawing surfaces and the background image,
/// and turns gestures and host calls into edits and redraws.
pub struct Graffiti {
    pub(super) store: AnnotationStore,
    pub(super) canvas: Canvas,
    pub(super) background: Option<BackgroundImage>,
    pub(super) orientation: Orientation,
    pub(super) viewport: Viewport,
    /// Top-left of the canvas in host coordinates
    pub(super) canvas_origin: (f64, f64),
    pub(super) style: RenderStyle,
    pub(super) mode: Option<Tool>,
    pub(super) curve_stroke: StrokeStyle,
    pub(super) arrow_stroke: StrokeStyle,
    pub(super) font_size: f64,
    pub(super) state: InteractionState,
    /// Set by coalesced moves, consumed by `on_animation_frame`
    pub(super) frame_pending: bool,
    pub(super) dirty: DirtyTracker,
    /// Area covered by the last arrow preview frame
    pub(super) last_preview_bounds: Option<Rect>,
    pub(super) export_format: ExportFormat,
    pub(super) export_save: ExportSaveConfig,
    pub(super) measure: Box<dyn TextMeasure>,
    pub(super) callbacks: Box<dyn HostCallbacks>,
    pub(super) source: Box<dyn ImageSource>,
}

impl Graffiti {
    /// Creates an engine with a blank canvas sized to the configured viewport.
    ///
    /// Text is measured with Pango, callbacks are no-ops and backgrounds are
    /// read from local files; see the `with_*` methods to replace them.
    ///
    /// # Errors
    /// Returns [`GraffitiError::SurfaceUnavailable`] when the drawing surfaces
    /// cannot be allocated.
    pub fn new(config: &Config) -> Result<Self, GraffitiError> {
        let viewport = config.viewport();
        let (width, height) = Dimensions::from(viewport).to_pixels();

        let mut engine = Self {
            store: AnnotationStore::new(),
            canvas: Canvas::new(width, height)?,
            background: None,
            orientation: Orientation::UPRIGHT,
            viewport,
            canvas_origin: (0.0, 0.0),
            style: config.render_style(),
            mode: None,
            curve_stroke: config.curve_stroke(),
            arrow_stroke: config.arrow_stroke(),
            font_size: config.drawing.default_font_size,
            state: InteractionState::Idle,
            frame_pending: false,
            dirty: DirtyTracker::new(),
            last_preview_bounds: None,
            export_format: config.export_format(),
            export_save: config.export_save_config(),
            measure: Box::new(PangoMeasure),
            callbacks: Box::new(NoopCallbacks),
            source: Box::new(DefaultImageSource),
        };
        log::debug!("Created {}x{} canvas", width, height);
        engine.redraw();
        Ok(engine)
    }

    /// Replaces the host notification hooks.
    pub fn with_callbacks(mut self, callbacks: impl HostCallbacks + 'static) -> Self {
        self.callbacks = Box::new(callbacks);
        self
    }

    /// Replaces the text measurer used for label layout.
    pub fn with_measure(mut self, measure: impl TextMeasure + 'static) -> Self {
        self.measure = Box::new(measure);
        self
    }

    /// Replaces where background bytes are fetched from.
    pub fn with_image_source(mut self, source: impl ImageSource + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    // =========================================================================
    // Host settings
    // =========================================================================

    /// Selects the active tool; `None` disables stroking.
    pub fn set_mode(&mut self, mode: Option<Tool>) {
        log::debug!("Tool: {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
    }

    pub fn mode(&self) -> Option<Tool> {
        self.mode
    }

    /// Color for new curves and arrows.
    pub fn set_color(&mut self, color: Color) {
        self.set_curve_color(color);
        self.set_arrow_color(color);
    }

    /// Line width for new curves and arrows, at least one pixel.
    pub fn set_size(&mut self, size: f64) {
        self.set_curve_size(size);
        self.set_arrow_size(size);
    }

    pub fn set_curve_color(&mut self, color: Color) {
        self.curve_stroke.color = color;
    }

    pub fn set_arrow_color(&mut self, color: Color) {
        self.arrow_stroke.color = color;
    }

    pub fn set_curve_size(&mut self, size: f64) {
        self.curve_stroke.size = size.max(1.0);
    }

    pub fn set_arrow_size(&mut self, size: f64) {
        self.arrow_stroke.size = size.max(1.0);
    }

    /// Color and width the next stroke of `kind` starts with.
    pub fn stroke_style(&self, kind: StrokeKind) -> StrokeStyle {
        match kind {
            StrokeKind::Curve => self.curve_stroke,
            StrokeKind::Arrow => self.arrow_stroke,
        }
    }

    /// Default font size hosts can use for new labels.
    pub fn set_font_size(&mut self, font_size: f64) {
        self.font_size = font_size.max(1.0);
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    /// Position of the canvas's top-left corner in gesture coordinates.
    pub fn set_canvas_origin(&mut self, x: f64, y: f64) {
        self.canvas_origin = (x, y);
    }

    pub fn canvas_origin(&self) -> (f64, f64) {
        self.canvas_origin
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The surface hosts present.
    pub fn surface(&self) -> &cairo::ImageSurface {
        self.canvas.primary()
    }

    /// Canvas size in pixels.
    pub fn canvas_size(&self) -> (i32, i32) {
        (self.canvas.width(), self.canvas.height())
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// Annotations currently on the canvas, in render order.
    pub fn current(&self) -> &[Annotation] {
        self.store.current()
    }

    pub fn can_undo(&self) -> bool {
        self.store.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.store.can_redo()
    }

    pub fn selected_text(&self) -> Option<&TextAnnotation> {
        self.store.selected_text()
    }

    pub fn background(&self) -> Option<&BackgroundImage> {
        self.background.as_ref()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    /// Converts host coordinates to canvas coordinates.
    pub(super) fn to_canvas(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (x - self.canvas_origin.0, y - self.canvas_origin.1)
    }

    pub(super) fn notify_draw_end(&mut self) {
        self.callbacks.on_draw_end(
            self.store.current(),
            self.store.can_undo(),
            self.store.can_redo(),
        );
    }

    /// Canvas size for the current viewport, background and orientation.
    pub(super) fn target_dimensions(&self) -> Dimensions {
        match &self.background {
            Some(background) => background.canvas_dimensions(self.viewport),
            None if self.orientation.is_sideways() => Dimensions::from(self.viewport).swapped(),
            None => Dimensions::from(self.viewport),
        }
    }
}

impl std::fmt::Debug for Graffiti {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graffiti")
            .field("canvas", &self.canvas)
            .field("state", &self.state)
            .field("mode", &self.mode)
            .field("annotations", &self.store.current().len())
            .field("background", &self.background)
            .finish()
    }
}
