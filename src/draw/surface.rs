//! Drawing surfaces: the visible primary buffer and the off-screen arrow cache.
//!
//! Arrows are previewed by double buffering. When an arrow starts, the primary
//! surface is snapshotted; each preview frame restores the snapshot into the
//! cache, draws the arrow there and copies the cache to the primary surface.

use crate::GraffitiError;

/// Owns the image surfaces the engine draws into.
pub struct Canvas {
    width: i32,
    height: i32,
    primary: cairo::ImageSurface,
    cache: cairo::ImageSurface,
    /// Primary contents captured at arrow start
    base: Option<cairo::ImageSurface>,
}

fn create_surface(width: i32, height: i32) -> Result<cairo::ImageSurface, GraffitiError> {
    cairo::ImageSurface::create(cairo::Format::ARgb32, width.max(1), height.max(1))
        .map_err(GraffitiError::SurfaceUnavailable)
}

/// Replaces everything in `target` with `source`.
fn blit(source: &cairo::ImageSurface, target: &cairo::ImageSurface) -> Result<(), GraffitiError> {
    let ctx = cairo::Context::new(target).map_err(GraffitiError::SurfaceUnavailable)?;
    ctx.set_operator(cairo::Operator::Source);
    ctx.set_source_surface(source, 0.0, 0.0)
        .map_err(GraffitiError::SurfaceUnavailable)?;
    ctx.paint().map_err(GraffitiError::SurfaceUnavailable)?;
    Ok(())
}

impl Canvas {
    /// Allocates primary and cache surfaces of the given pixel size.
    pub fn new(width: i32, height: i32) -> Result<Self, GraffitiError> {
        Ok(Self {
            width,
            height,
            primary: create_surface(width, height)?,
            cache: create_surface(width, height)?,
            base: None,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width as f64, self.height as f64)
    }

    /// The surface the host presents.
    pub fn primary(&self) -> &cairo::ImageSurface {
        &self.primary
    }

    /// Reallocates both surfaces. Contents are discarded; callers redraw.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), GraffitiError> {
        if width == self.width && height == self.height {
            return Ok(());
        }
        log::debug!("Resizing canvas {}x{} -> {}x{}", self.width, self.height, width, height);
        // Allocate both before touching state so a failure leaves the canvas intact
        let primary = create_surface(width, height)?;
        let cache = create_surface(width, height)?;
        self.primary = primary;
        self.cache = cache;
        self.width = width;
        self.height = height;
        self.base = None;
        Ok(())
    }

    /// Drawing context on the primary surface.
    pub fn primary_context(&self) -> Result<cairo::Context, GraffitiError> {
        cairo::Context::new(&self.primary).map_err(GraffitiError::SurfaceUnavailable)
    }

    /// Captures the current primary contents as the arrow preview base.
    pub fn snapshot_base(&mut self) -> Result<(), GraffitiError> {
        let base = create_surface(self.width, self.height)?;
        self.primary.flush();
        blit(&self.primary, &base)?;
        self.base = Some(base);
        Ok(())
    }

    /// Whether an arrow preview base is held.
    pub fn has_base(&self) -> bool {
        self.base.is_some()
    }

    /// Drops the arrow preview base.
    pub fn clear_base(&mut self) {
        self.base = None;
    }

    /// Restores the base into the cache and returns a context for drawing over it.
    ///
    /// Without a base the cache starts from the current primary contents.
    pub fn begin_cache_frame(&self) -> Result<cairo::Context, GraffitiError> {
        let source = self.base.as_ref().unwrap_or(&self.primary);
        source.flush();
        blit(source, &self.cache)?;
        cairo::Context::new(&self.cache).map_err(GraffitiError::SurfaceUnavailable)
    }

    /// Copies the cache onto the primary surface.
    pub fn present_cache(&self) -> Result<(), GraffitiError> {
        self.cache.flush();
        blit(&self.cache, &self.primary)
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("has_base", &self.has_base())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reads alpha from an exclusive copy; `data()` refuses shared surfaces.
    fn alpha_at(surface: &cairo::ImageSurface, x: i32, y: i32) -> u8 {
        let mut copy = create_surface(surface.width(), surface.height()).unwrap();
        blit(surface, &copy).unwrap();
        let stride = copy.stride() as usize;
        let data = copy.data().unwrap();
        data[y as usize * stride + x as usize * 4 + 3]
    }

    fn fill_rect(ctx: &cairo::Context, x: f64, y: f64) {
        ctx.set_source_rgba(1.0, 0.0, 0.0, 1.0);
        ctx.rectangle(x, y, 4.0, 4.0);
        ctx.fill().unwrap();
    }

    #[test]
    fn cache_frames_start_from_base() {
        let mut canvas = Canvas::new(20, 20).unwrap();
        {
            let ctx = canvas.primary_context().unwrap();
            fill_rect(&ctx, 0.0, 0.0);
        }
        canvas.snapshot_base().unwrap();

        // First preview frame draws at (10, 10)
        {
            let ctx = canvas.begin_cache_frame().unwrap();
            fill_rect(&ctx, 10.0, 10.0);
        }
        canvas.present_cache().unwrap();

        // Second frame draws elsewhere; the first preview must be gone
        {
            let ctx = canvas.begin_cache_frame().unwrap();
            fill_rect(&ctx, 14.0, 0.0);
        }
        canvas.present_cache().unwrap();

        let primary = canvas.primary();
        assert_eq!(alpha_at(primary, 1, 1), 255);
        assert_eq!(alpha_at(primary, 11, 11), 0);
        assert_eq!(alpha_at(primary, 15, 1), 255);
    }

    #[test]
    fn failed_resize_leaves_canvas_untouched() {
        let mut canvas = Canvas::new(10, 10).unwrap();
        canvas.snapshot_base().unwrap();

        // Past cairo's 32767 pixel limit
        assert!(canvas.resize(40_000, 20).is_err());
        assert_eq!(canvas.size(), (10.0, 10.0));
        assert_eq!(canvas.primary().width(), 10);
        assert!(canvas.has_base());
        assert!(canvas.begin_cache_frame().is_ok());
    }

    #[test]
    fn resize_discards_base() {
        let mut canvas = Canvas::new(10, 10).unwrap();
        canvas.snapshot_base().unwrap();
        assert!(canvas.has_base());
        canvas.resize(30, 20).unwrap();
        assert!(!canvas.has_base());
        assert_eq!(canvas.size(), (30.0, 20.0));
        assert_eq!(canvas.primary().width(), 30);
    }
}
