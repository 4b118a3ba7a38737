//! Engine configuration and device capabilities.
//!
//! All gesture and motion tuning lives in one sparse `galbox.toml` rather
//! than as scattered magic numbers. Every value has a default matching the
//! shipped behavior; a config file only needs the overrides:
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [gesture]
//! axis_dead_zone_px = 8.0    # Movement before a drag locks its axis
//! drag_commit_px = 120.0     # Absolute drag commit threshold cap
//! drag_commit_fraction = 0.18 # Commit threshold as a fraction of slide step
//! rubber_band_factor = 0.35  # Displacement scaling past either boundary
//! wheel_commit_px = 50.0     # Accumulated wheel delta that commits once
//! wheel_gesture_gap_ms = 200 # Quiet gap that ends a wheel gesture
//! swipe_close_px = 100.0     # Downward swipe that closes (touch)
//! pinch_close_ratio = 0.7    # Pinch-in distance ratio that closes (touch)
//!
//! [motion]
//! slide_ms = 400             # Track transition duration
//! metadata_fade_ms = 200     # Metadata fade out/in duration
//!
//! [layout]
//! slide_gap_px = 16.0        # Gap between film-strip slides
//! margin_x_mm = 46.0         # Horizontal image margin on touch devices
//! margin_y_mm = 66.0         # Vertical image margin on touch devices
//!
//! [preload]
//! cache_capacity = 30        # Neighbor-image cache entries (FIFO)
//! ```
//!
//! Unknown keys are rejected to catch typos early.
//!
//! ## Two commit policies, on purpose
//!
//! Drag and wheel use different commit heuristics. A drag moves the actual
//! slide under the finger, so its threshold is geometric — capped
//! absolute distance or a fraction of the slide step, whichever is
//! smaller. Trackpad wheel deltas are unitless device counts with nothing
//! anchored to the finger, so they use a plain accumulated threshold with
//! a quiet-gap debounce. Both end in the same navigation request; only
//! the recognition differs.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Gesture recognition thresholds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GestureConfig {
    /// Pointer movement before a drag resolves to horizontal or vertical.
    pub axis_dead_zone_px: f64,
    /// Absolute cap on the drag commit threshold.
    pub drag_commit_px: f64,
    /// Commit threshold as a fraction of the slide step. The effective
    /// threshold is `min(drag_commit_px, drag_commit_fraction × step)`.
    pub drag_commit_fraction: f64,
    /// Displacement multiplier once a drag pushes past either boundary.
    pub rubber_band_factor: f64,
    /// Accumulated horizontal wheel delta that commits one navigation.
    pub wheel_commit_px: f64,
    /// A wheel gesture ends after this many ms without a wheel event.
    pub wheel_gesture_gap_ms: u64,
    /// Downward swipe distance that closes the lightbox (touch only).
    pub swipe_close_px: f64,
    /// Pinch distance ratio below which the lightbox closes (touch only).
    pub pinch_close_ratio: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            axis_dead_zone_px: 8.0,
            drag_commit_px: 120.0,
            drag_commit_fraction: 0.18,
            rubber_band_factor: 0.35,
            wheel_commit_px: 50.0,
            wheel_gesture_gap_ms: 200,
            swipe_close_px: 100.0,
            pinch_close_ratio: 0.7,
        }
    }
}

/// Animation durations. The engine itself never sleeps — these ride on
/// the effects handed to the host so its transitions match the state
/// machine's expectations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MotionConfig {
    pub slide_ms: u64,
    pub metadata_fade_ms: u64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            slide_ms: 400,
            metadata_fade_ms: 200,
        }
    }
}

/// Film-strip and image-box layout values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Gap between adjacent slides in the track.
    pub slide_gap_px: f64,
    /// Horizontal margin around the image on touch devices, in millimeters.
    /// Physical units so the matte border stays constant across pixel
    /// densities.
    pub margin_x_mm: f64,
    /// Vertical margin around the image on touch devices, in millimeters.
    pub margin_y_mm: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            slide_gap_px: 16.0,
            margin_x_mm: 46.0,
            margin_y_mm: 66.0,
        }
    }
}

/// Neighbor preloading settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PreloadConfig {
    /// Cache capacity; oldest-inserted entries are evicted past this.
    pub cache_capacity: usize,
}

impl Default for PreloadConfig {
    fn default() -> Self {
        Self { cache_capacity: 30 }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub gesture: GestureConfig,
    pub motion: MotionConfig,
    pub layout: LayoutConfig,
    pub preload: PreloadConfig,
}

impl EngineConfig {
    /// Load from a TOML file, validating after parse.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the state machine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.gesture;
        if g.axis_dead_zone_px < 0.0 {
            return Err(validation("gesture.axis_dead_zone_px must be >= 0"));
        }
        if g.drag_commit_px <= 0.0 {
            return Err(validation("gesture.drag_commit_px must be > 0"));
        }
        if !(0.0..=1.0).contains(&g.drag_commit_fraction) || g.drag_commit_fraction == 0.0 {
            return Err(validation(
                "gesture.drag_commit_fraction must be in (0, 1]",
            ));
        }
        if !(0.0..=1.0).contains(&g.rubber_band_factor) {
            return Err(validation("gesture.rubber_band_factor must be in [0, 1]"));
        }
        if g.wheel_commit_px <= 0.0 {
            return Err(validation("gesture.wheel_commit_px must be > 0"));
        }
        if g.wheel_gesture_gap_ms == 0 {
            return Err(validation("gesture.wheel_gesture_gap_ms must be > 0"));
        }
        if g.swipe_close_px <= 0.0 {
            return Err(validation("gesture.swipe_close_px must be > 0"));
        }
        if !(0.0..1.0).contains(&g.pinch_close_ratio) || g.pinch_close_ratio == 0.0 {
            return Err(validation("gesture.pinch_close_ratio must be in (0, 1)"));
        }
        if self.layout.slide_gap_px < 0.0 {
            return Err(validation("layout.slide_gap_px must be >= 0"));
        }
        if self.layout.margin_x_mm < 0.0 || self.layout.margin_y_mm < 0.0 {
            return Err(validation("layout margins must be >= 0"));
        }
        if self.preload.cache_capacity == 0 {
            return Err(validation("preload.cache_capacity must be > 0"));
        }
        Ok(())
    }
}

fn validation(msg: &str) -> ConfigError {
    ConfigError::Validation(msg.to_string())
}

/// Device capabilities, computed once per session and passed into the
/// engine instead of re-queried ad hoc. On the web front end this comes
/// from touch-point and media-query probes; the CLI replay harness sets it
/// from the trace header.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Capabilities {
    /// Touch is the primary pointer (phones, tablets). Selects compact
    /// image variants, pinned-scroll behavior, fullscreen, and the
    /// history-entry close path.
    pub is_touch_primary: bool,
    /// User prefers reduced motion; hosts should snap instead of animate.
    pub reduced_motion: bool,
}
