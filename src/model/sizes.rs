//! Viewport size tracking.
//!
//! `Sizes` holds the current canvas dimensions and triggers `resize`
//! whenever the host reports a new viewport. Camera and renderer subscribe
//! to it instead of listening to the host directly.

use std::cell::Cell;

use serde_json::Value;
use tracing::debug;

use super::constants::*;
use crate::events::{EventEmitter, Observable};

/// Dimensions reported by the host window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub device_pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT, 1.0)
    }
}

/// Current viewport, broadcasting `resize` on change.
pub struct Sizes {
    width: Cell<f64>,
    height: Cell<f64>,
    pixel_ratio: Cell<f64>,
    max_pixel_ratio: f64,
    events: EventEmitter,
}

impl Sizes {
    /// Record the initial viewport. Does not trigger `resize`.
    pub fn new(viewport: Viewport) -> Self {
        Self::with_max_pixel_ratio(viewport, MAX_PIXEL_RATIO)
    }

    pub fn with_max_pixel_ratio(viewport: Viewport, max_pixel_ratio: f64) -> Self {
        let sizes = Self {
            width: Cell::new(0.0),
            height: Cell::new(0.0),
            pixel_ratio: Cell::new(1.0),
            max_pixel_ratio,
            events: EventEmitter::new(),
        };
        sizes.apply(viewport);
        sizes
    }

    /// Store a new viewport, then trigger `resize` with no arguments.
    pub fn resize(&self, viewport: Viewport) {
        self.apply(viewport);
        debug!(
            width = self.width(),
            height = self.height(),
            pixel_ratio = self.pixel_ratio(),
            "viewport resized"
        );
        self.events.trigger(EVENT_RESIZE, &[]).ok();
    }

    /// Drop every `resize` listener.
    pub fn destroy(&self) {
        self.events.off(EVENT_RESIZE).ok();
    }

    pub fn width(&self) -> f64 {
        self.width.get()
    }

    pub fn height(&self) -> f64 {
        self.height.get()
    }

    /// Device pixel ratio, capped at the configured maximum.
    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio.get()
    }

    /// Width over height; a zero height counts as one pixel.
    pub fn aspect_ratio(&self) -> f64 {
        self.width() / self.height().max(1.0)
    }

    fn apply(&self, viewport: Viewport) {
        let ratio = if viewport.device_pixel_ratio.is_finite() && viewport.device_pixel_ratio > 0.0 {
            viewport.device_pixel_ratio.min(self.max_pixel_ratio)
        } else {
            1.0
        };

        self.width.set(viewport.width.max(0.0));
        self.height.set(viewport.height.max(0.0));
        self.pixel_ratio.set(ratio);
    }
}

impl Default for Sizes {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl Observable for Sizes {
    type Arg = Value;
    type Output = ();

    fn events(&self) -> &EventEmitter {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_new_does_not_trigger() {
        let sizes = Sizes::new(Viewport::new(1024.0, 768.0, 1.0));
        assert_eq!(sizes.width(), 1024.0);
        assert_eq!(sizes.height(), 768.0);
        assert!(sizes.events().is_empty());
    }

    #[test]
    fn test_pixel_ratio_is_capped() {
        let sizes = Sizes::new(Viewport::new(100.0, 100.0, 3.0));
        assert_eq!(sizes.pixel_ratio(), MAX_PIXEL_RATIO);
    }

    #[test]
    fn test_invalid_pixel_ratio_falls_back_to_one() {
        let sizes = Sizes::new(Viewport::new(100.0, 100.0, f64::NAN));
        assert_eq!(sizes.pixel_ratio(), 1.0);

        sizes.resize(Viewport::new(100.0, 100.0, 0.0));
        assert_eq!(sizes.pixel_ratio(), 1.0);
    }

    #[test]
    fn test_aspect_ratio_with_zero_height() {
        let sizes = Sizes::new(Viewport::new(300.0, 0.0, 1.0));
        assert_eq!(sizes.aspect_ratio(), 300.0);
    }

    #[test]
    fn test_listener_reads_updated_size() {
        let sizes = Rc::new(Sizes::default());
        let seen = Rc::new(Cell::new(0.0));

        let weak = Rc::downgrade(&sizes);
        let sink = Rc::clone(&seen);
        sizes
            .on(EVENT_RESIZE, move |_| {
                if let Some(sizes) = weak.upgrade() {
                    sink.set(sizes.width());
                }
            })
            .unwrap();

        sizes.resize(Viewport::new(1920.0, 1080.0, 1.0));
        assert_eq!(seen.get(), 1920.0);
    }

    #[test]
    fn test_destroy_removes_resize_listeners() {
        let sizes = Sizes::default();
        sizes.on("resize.camera", |_| {}).unwrap();
        sizes.on(EVENT_RESIZE, |_| {}).unwrap();

        sizes.destroy();

        assert_eq!(sizes.events().listener_count(EVENT_RESIZE), 0);
        assert!(!sizes.events().has_namespace("camera"));
    }
}
