//! Carousel geometry: pure sizing math for the three-slide film strip.
//!
//! All functions here are pure and testable without a rendering surface.
//! The engine recomputes geometry on open and on every viewport change
//! (resize, orientation, visual-viewport shifts from browser chrome).
//!
//! ## Track positions
//!
//! Slides sit left-to-right in slot order `[prev, current, next]`, each
//! `slide_step` apart (slide width plus the inter-slide gap). The track
//! offset that centers the current slot is `base_position = -slide_step`;
//! at rest the track is always exactly there. Exposing a neighbor means
//! animating one step further in the travel direction and then — after the
//! slot rotation — snapping instantly back to base, which is invisible
//! because the rotated slide occupies the same screen position the
//! animation ended at.
//!
//! ## Image box
//!
//! The displayed image plus its matte border must never exceed available
//! space in either axis. On desktop the box is the measured carousel
//! viewport (the page chrome already carved out frame padding). On
//! touch-primary devices the box is the viewport minus fixed physical
//! margins, so the matte stays a constant real-world size across pixel
//! densities.

use crate::config::LayoutConfig;
use crate::gesture::Direction;

/// CSS reference pixel: 96 px per inch, 25.4 mm per inch.
pub const MM_TO_PX: f64 = 96.0 / 25.4;

/// Measured carousel viewport in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Derived film-strip geometry, recomputed on open/resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselGeometry {
    /// Pixel width of one slide (the carousel viewport width).
    pub slide_width: f64,
    /// One slide plus the inter-slide gap.
    pub slide_step: f64,
    /// Track offset that centers the current slot. Always `-slide_step`.
    pub base_position: f64,
    /// Maximum image display box (width, height).
    pub max_image_box: (f64, f64),
}

impl CarouselGeometry {
    /// Compute geometry for a viewport. `touch_primary` selects the
    /// physical-margin image box.
    pub fn compute(viewport: Viewport, layout: &LayoutConfig, touch_primary: bool) -> Self {
        let slide_width = viewport.width.max(0.0);
        let slide_step = slide_width + layout.slide_gap_px;
        let max_image_box = if touch_primary {
            (
                (viewport.width - layout.margin_x_mm * MM_TO_PX).max(0.0),
                (viewport.height - layout.margin_y_mm * MM_TO_PX).max(0.0),
            )
        } else {
            (viewport.width, viewport.height)
        };
        Self {
            slide_width,
            slide_step,
            base_position: -slide_step,
            max_image_box,
        }
    }

    /// Track offset that fully exposes the neighbor in `direction`.
    /// Next lies one step further left (more negative), prev one step
    /// right of base.
    pub fn target_offset(&self, direction: Direction) -> f64 {
        self.base_position - direction.delta() as f64 * self.slide_step
    }

    /// Fit source pixel dimensions into the image box, preserving aspect
    /// ratio and never enlarging past the source size.
    pub fn fit_image(&self, source: (u32, u32)) -> (f64, f64) {
        fit_within(source, self.max_image_box)
    }
}

/// Scale `source` to fit inside `max_box` preserving aspect ratio. Images
/// smaller than the box display at natural size — derived web images are
/// already sized for quality, upscaling only blurs them.
pub fn fit_within(source: (u32, u32), max_box: (f64, f64)) -> (f64, f64) {
    let (src_w, src_h) = (source.0 as f64, source.1 as f64);
    let (max_w, max_h) = max_box;
    if src_w <= 0.0 || src_h <= 0.0 || max_w <= 0.0 || max_h <= 0.0 {
        return (0.0, 0.0);
    }
    let scale = (max_w / src_w).min(max_h / src_h).min(1.0);
    (src_w * scale, src_h * scale)
}

/// Fixed minimum height to reserve for the caption container.
///
/// Measured against every caption's rendering at the current width so that
/// switching between photos with and without captions never shifts the
/// image vertically. Text measurement belongs to the rendering surface, so
/// the caller supplies it as a closure from caption text and available
/// width to rendered height.
pub fn caption_reserve<'a, I, F>(captions: I, width: f64, measure: F) -> f64
where
    I: IntoIterator<Item = &'a str>,
    F: Fn(&str, f64) -> f64,
{
    captions
        .into_iter()
        .map(|caption| measure(caption, width))
        .fold(0.0, f64::max)
}
