//! Gesture recognition: pure trackers with no I/O and no clocks.
//!
//! Every input device reduces to the same two decisions — "navigate one
//! slide in some direction" or "close" — and this module owns the
//! recognition that gets there. The trackers are plain state machines fed
//! coordinates and timestamps by the engine; nothing here reads a clock or
//! touches a rendering surface, so every threshold is unit-testable.
//!
//! ## Axis lock
//!
//! A drag starts with an unresolved axis. Once movement from the origin
//! exceeds the dead zone the gesture locks to horizontal or vertical and
//! never re-resolves; a locked-vertical gesture is never interpreted as
//! navigation, which is what keeps page-scroll swipes from being
//! intercepted. Perfectly diagonal movement locks vertical — the safer
//! default, native scrolling wins.
//!
//! ## Wheel gestures
//!
//! A trackpad two-finger swipe arrives as a burst of wheel events with no
//! begin/end marker. A "gesture" is therefore defined by time: events
//! closer together than the quiet gap belong to one gesture, and one
//! gesture commits at most one navigation no matter how much delta it
//! accumulates. Gap detection runs on event timestamps supplied by the
//! caller.

use crate::config::GestureConfig;
use serde::{Deserialize, Serialize};

/// Navigation direction through the collection sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    /// Signed index delta: `Prev` = -1, `Next` = +1.
    pub fn delta(self) -> isize {
        match self {
            Direction::Prev => -1,
            Direction::Next => 1,
        }
    }
}

/// Axis a drag gesture has resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Unresolved,
    Horizontal,
    Vertical,
}

/// One pointer drag from down to up.
#[derive(Debug, Clone)]
pub struct DragTracker {
    origin: (f64, f64),
    last: (f64, f64),
    axis: Axis,
    dead_zone: f64,
}

impl DragTracker {
    pub fn new(x: f64, y: f64, config: &GestureConfig) -> Self {
        Self {
            origin: (x, y),
            last: (x, y),
            axis: Axis::Unresolved,
            dead_zone: config.axis_dead_zone_px,
        }
    }

    /// Feed a pointer move. Returns the axis after this move; the first
    /// call that escapes the dead zone locks it permanently.
    pub fn update(&mut self, x: f64, y: f64) -> Axis {
        self.last = (x, y);
        if self.axis == Axis::Unresolved {
            let dx = (x - self.origin.0).abs();
            let dy = (y - self.origin.1).abs();
            if dx.max(dy) > self.dead_zone {
                // Ties resolve vertical: never steal a scroll
                self.axis = if dx > dy {
                    Axis::Horizontal
                } else {
                    Axis::Vertical
                };
            }
        }
        self.axis
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Signed horizontal displacement from the gesture origin.
    pub fn displacement_x(&self) -> f64 {
        self.last.0 - self.origin.0
    }

    /// Signed vertical displacement from the gesture origin.
    pub fn displacement_y(&self) -> f64 {
        self.last.1 - self.origin.1
    }
}

/// Effective drag commit threshold for the current slide step:
/// the absolute cap or a fraction of the step, whichever is smaller, so
/// narrow viewports still commit on proportionally short drags.
pub fn commit_threshold(config: &GestureConfig, slide_step: f64) -> f64 {
    config
        .drag_commit_px
        .min(config.drag_commit_fraction * slide_step)
}

/// Apply boundary resistance to a horizontal drag displacement.
///
/// Dragging toward a neighbor that doesn't exist (before the first photo or
/// past the last) scales the displacement by the rubber-band factor:
/// visible movement, no pretense of content.
pub fn rubber_band(
    displacement: f64,
    at_first: bool,
    at_last: bool,
    config: &GestureConfig,
) -> f64 {
    let out_of_bounds =
        (displacement > 0.0 && at_first) || (displacement < 0.0 && at_last);
    if out_of_bounds {
        displacement * config.rubber_band_factor
    } else {
        displacement
    }
}

/// Decide what a finished horizontal drag does.
///
/// Past the threshold and toward an existing neighbor → that direction.
/// Anything else (short drag, or a rubber-banded boundary drag however
/// long) → `None`, the track springs back. Dragging left (negative
/// displacement) exposes the next photo.
pub fn drag_outcome(
    displacement: f64,
    threshold: f64,
    at_first: bool,
    at_last: bool,
) -> Option<Direction> {
    if displacement <= -threshold && !at_last {
        Some(Direction::Next)
    } else if displacement >= threshold && !at_first {
        Some(Direction::Prev)
    } else {
        None
    }
}

/// Wheel events below this horizontal delta are noise, not intent.
const WHEEL_INTENT_MIN_PX: f64 = 5.0;

/// Debounced trackpad wheel gesture recognizer.
#[derive(Debug, Clone)]
pub struct WheelTracker {
    accumulated: f64,
    navigated: bool,
    last_event_ms: Option<u64>,
    commit_px: f64,
    gap_ms: u64,
}

impl WheelTracker {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            accumulated: 0.0,
            navigated: false,
            last_event_ms: None,
            commit_px: config.wheel_commit_px,
            gap_ms: config.wheel_gesture_gap_ms,
        }
    }

    /// Feed one wheel event. Returns a direction at most once per gesture,
    /// the moment the accumulated horizontal delta crosses the commit
    /// threshold. Positive `delta_x` (content pushed left) means next.
    pub fn on_wheel(&mut self, delta_x: f64, delta_y: f64, now_ms: u64) -> Option<Direction> {
        // Vertical scrolling belongs to the page
        if delta_x.abs() <= delta_y.abs() {
            return None;
        }

        // A quiet gap starts a fresh gesture. Sub-intent jitter refreshes
        // the timestamp without accumulating: a momentum tail of tiny
        // deltas is still the same gesture, not silence.
        if let Some(last) = self.last_event_ms
            && now_ms.saturating_sub(last) > self.gap_ms
        {
            self.accumulated = 0.0;
            self.navigated = false;
        }
        self.last_event_ms = Some(now_ms);

        if delta_x.abs() <= WHEEL_INTENT_MIN_PX || self.navigated {
            return None;
        }

        self.accumulated += delta_x;
        if self.accumulated.abs() > self.commit_px {
            self.navigated = true;
            let direction = if self.accumulated > 0.0 {
                Direction::Next
            } else {
                Direction::Prev
            };
            self.accumulated = 0.0;
            Some(direction)
        } else {
            None
        }
    }
}

/// Two-finger pinch tracker. Closing past the configured distance ratio
/// means "dismiss the lightbox".
#[derive(Debug, Clone)]
pub struct PinchTracker {
    initial_distance: f64,
    close_ratio: f64,
}

impl PinchTracker {
    /// Start tracking from the initial finger distance. Degenerate
    /// distances (fingers on the same point) produce a tracker that never
    /// fires.
    pub fn begin(initial_distance: f64, config: &GestureConfig) -> Self {
        Self {
            initial_distance,
            close_ratio: config.pinch_close_ratio,
        }
    }

    /// True when the fingers have pinched in far enough to close.
    pub fn should_close(&self, distance: f64) -> bool {
        self.initial_distance > 0.0 && distance / self.initial_distance < self.close_ratio
    }
}
