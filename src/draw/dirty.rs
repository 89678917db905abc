//! Dirty region tracking for host repaints.
//!
//! Collects axis-aligned rectangles of the primary surface that changed since
//! the host last presented it.

use super::annotation::Annotation;
use super::style::RenderStyle;
use crate::util::Rect;

/// Tracks dirty rectangles accumulated between presents.
#[derive(Debug, Default)]
pub struct DirtyTracker {
    regions: Vec<Rect>,
    force_full: bool,
}

impl DirtyTracker {
    /// Creates a new, empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the entire surface as dirty. Clears any accumulated rectangles.
    pub fn mark_full(&mut self) {
        self.force_full = true;
        self.regions.clear();
    }

    /// Adds a dirty rectangle if the tracker is not already full.
    pub fn mark_rect(&mut self, rect: Rect) {
        if !rect.is_valid() || self.force_full {
            return;
        }
        self.regions.push(rect);
    }

    /// Adds a dirty rectangle when present.
    pub fn mark_optional_rect(&mut self, rect: Option<Rect>) {
        if let Some(rect) = rect {
            self.mark_rect(rect);
        }
    }

    /// Adds the area covered by an annotation, selection handles included.
    ///
    /// Annotations without bounds yet (single-sample strokes) mark nothing.
    pub fn mark_annotation(&mut self, annotation: &Annotation, style: &RenderStyle) {
        let rect = match annotation {
            Annotation::Text(text) => {
                let overhang = style.text.handle_size / 2.0 + 1.0;
                text.bounds().inflate(overhang).to_rect()
            }
            _ => annotation.bounding_box(&style.arrow),
        };
        self.mark_optional_rect(rect);
    }

    /// True when anything has been marked since the last drain.
    pub fn is_dirty(&self) -> bool {
        self.force_full || !self.regions.is_empty()
    }

    /// Drains the dirty regions gathered so far.
    ///
    /// When the full surface is marked, returns a single rectangle covering the
    /// entire surface; otherwise returns accumulated rectangles.
    pub fn take_regions(&mut self, width: i32, height: i32) -> Vec<Rect> {
        if self.force_full {
            self.force_full = false;
            self.regions.clear();
            if width > 0 && height > 0 {
                if let Some(full) = Rect::new(0, 0, width, height) {
                    return vec![full];
                }
            }
            Vec::new()
        } else {
            self.regions.drain(..).collect()
        }
    }
}
