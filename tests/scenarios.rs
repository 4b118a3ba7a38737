//! End-to-end lightbox scenarios driven through the public API: a full
//! session from open to close, exercised the way a host would drive it.

use galbox::catalog::{Catalog, Collection, PhotoRecord};
use galbox::config::{Capabilities, EngineConfig};
use galbox::engine::{
    ChromeEffect, Host, InputEvent, Key, Lightbox, NavState, SlideContent,
};
use galbox::geometry::Viewport;
use galbox::gesture::Direction;
use galbox::metadata::PhotoMetadata;
use galbox::preload::{ImageLoader, LoadError, LoadedImage};
use galbox::slots::SlotId;

// ---------------------------------------------------------------------------
// Setup helpers
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq)]
enum Effect {
    Render(SlotId, Option<String>),
    Snap(f64),
    Animate(f64, u64),
    Metadata(bool),
    Arrows(bool, bool),
    Counter(String),
    Chrome(ChromeEffect, bool),
    Dismiss,
    Index(String, usize),
}

#[derive(Debug, Default)]
struct LogHost {
    effects: Vec<Effect>,
}

impl LogHost {
    fn counters(&self) -> Vec<&str> {
        self.effects
            .iter()
            .filter_map(|e| match e {
                Effect::Counter(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn committed_indices(&self) -> Vec<usize> {
        self.effects
            .iter()
            .filter_map(|e| match e {
                Effect::Index(_, index) => Some(*index),
                _ => None,
            })
            .collect()
    }
}

impl Host for LogHost {
    fn render_slide(&mut self, slot: SlotId, content: &SlideContent) {
        self.effects
            .push(Effect::Render(slot, content.photo_id.clone()));
    }

    fn snap_track(&mut self, offset: f64) {
        self.effects.push(Effect::Snap(offset));
    }

    fn animate_track(&mut self, offset: f64, duration_ms: u64) {
        self.effects.push(Effect::Animate(offset, duration_ms));
    }

    fn set_metadata_visible(&mut self, visible: bool, _fade_ms: u64) {
        self.effects.push(Effect::Metadata(visible));
    }

    fn set_arrows(&mut self, prev_visible: bool, next_visible: bool) {
        self.effects.push(Effect::Arrows(prev_visible, next_visible));
    }

    fn set_counter(&mut self, text: &str) {
        self.effects.push(Effect::Counter(text.to_string()));
    }

    fn set_caption_reserve(&mut self, _height: f64) {}

    fn apply_chrome(&mut self, effect: ChromeEffect) {
        self.effects.push(Effect::Chrome(effect, true));
    }

    fn revert_chrome(&mut self, effect: ChromeEffect) {
        self.effects.push(Effect::Chrome(effect, false));
    }

    fn dismiss(&mut self) {
        self.effects.push(Effect::Dismiss);
    }

    fn index_changed(&mut self, collection_id: &str, index: usize, _total: usize) {
        self.effects
            .push(Effect::Index(collection_id.to_string(), index));
    }
}

struct OkLoader;

impl ImageLoader for OkLoader {
    fn load(&mut self, _url: &str) -> Result<LoadedImage, LoadError> {
        Ok(LoadedImage {
            width: 2560,
            height: 1707,
        })
    }
}

fn catalog(n: usize) -> Catalog {
    let photos = (1..=n)
        .map(|i| PhotoRecord {
            id: format!("street-{i}"),
            url: format!("images/street-{i}.jpg"),
            mobile_url: None,
            thumb: None,
            width: Some(2560),
            height: Some(1707),
            title: None,
            metadata: PhotoMetadata::default(),
            comment: None,
        })
        .collect();
    Catalog {
        sections: vec![Collection {
            id: "street".to_string(),
            title: "Street".to_string(),
            description: None,
            photos,
        }],
    }
}

fn lightbox(capabilities: Capabilities) -> Lightbox<LogHost, OkLoader> {
    Lightbox::new(
        EngineConfig::default(),
        capabilities,
        Viewport {
            width: 1200.0,
            height: 800.0,
        },
        LogHost::default(),
        OkLoader,
    )
}

fn desktop() -> Lightbox<LogHost, OkLoader> {
    lightbox(Capabilities::default())
}

fn touch() -> Lightbox<LogHost, OkLoader> {
    lightbox(Capabilities {
        is_touch_primary: true,
        reduced_motion: false,
    })
}

fn commit(lb: &mut Lightbox<LogHost, OkLoader>, direction: Direction) {
    lb.handle(InputEvent::NavButton { direction });
    lb.handle(InputEvent::AnimationComplete);
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn open_at_first_photo_shows_boundary_state() {
    let mut lb = desktop();
    assert!(lb.open(&catalog(5), "street", 0));

    assert_eq!(lb.state(), NavState::Idle);
    assert_eq!(lb.host().counters(), vec!["1 / 5"]);
    assert!(lb
        .host()
        .effects
        .contains(&Effect::Arrows(false, true)));
    // Prev slot holds the placeholder at the left boundary
    assert!(lb
        .host()
        .effects
        .contains(&Effect::Render(SlotId(0), None)));
}

#[test]
fn three_sequential_commits_land_three_photos_forward() {
    let mut lb = desktop();
    lb.open(&catalog(5), "street", 0);
    for _ in 0..3 {
        commit(&mut lb, Direction::Next);
    }
    assert_eq!(lb.current_index(), Some(3));
    assert_eq!(lb.host().counters().last(), Some(&"4 / 5"));
    assert_eq!(lb.host().committed_indices(), vec![0, 1, 2, 3]);
}

#[test]
fn navigation_requests_never_skip_photos() {
    let mut lb = desktop();
    lb.open(&catalog(5), "street", 0);

    // A burst of requests with only one completed animation
    lb.handle(InputEvent::NavButton {
        direction: Direction::Next,
    });
    lb.handle(InputEvent::NavButton {
        direction: Direction::Next,
    });
    lb.handle(InputEvent::Key {
        key: Key::ArrowRight,
    });
    lb.handle(InputEvent::AnimationComplete);

    assert_eq!(lb.current_index(), Some(1));
    assert_eq!(lb.host().committed_indices(), vec![0, 1]);
}

#[test]
fn drag_commit_exactness_single_index_step() {
    let mut lb = desktop();
    lb.open(&catalog(5), "street", 2);

    // A long, fast drag still commits exactly one step
    lb.handle(InputEvent::PointerDown { x: 1000.0, y: 400.0 });
    lb.handle(InputEvent::PointerMove { x: 100.0, y: 410.0 });
    lb.handle(InputEvent::PointerUp);
    lb.handle(InputEvent::AnimationComplete);

    assert_eq!(lb.current_index(), Some(3));
}

#[test]
fn cancelled_drag_is_fully_reversible() {
    let mut lb = desktop();
    lb.open(&catalog(5), "street", 2);
    let effects_snapshot = lb.host().committed_indices();

    lb.handle(InputEvent::PointerDown { x: 600.0, y: 400.0 });
    lb.handle(InputEvent::PointerMove { x: 540.0, y: 404.0 });
    lb.handle(InputEvent::PointerUp);
    lb.handle(InputEvent::AnimationComplete);

    assert_eq!(lb.current_index(), Some(2));
    assert_eq!(lb.state(), NavState::Idle);
    assert_eq!(lb.track_offset(), lb.base_position());
    // No new committed index was announced
    assert_eq!(lb.host().committed_indices(), effects_snapshot);
}

#[test]
fn rubber_band_at_last_photo_moves_but_never_commits() {
    let mut lb = desktop();
    lb.open(&catalog(3), "street", 2);

    lb.handle(InputEvent::PointerDown { x: 900.0, y: 400.0 });
    lb.handle(InputEvent::PointerMove { x: 500.0, y: 405.0 });

    let base = lb.base_position().unwrap();
    let offset = lb.track_offset().unwrap();
    // Visible movement, scaled well below the raw 400 px drag
    assert!(offset < base);
    assert!((base - offset) < 200.0);

    lb.handle(InputEvent::PointerUp);
    lb.handle(InputEvent::AnimationComplete);
    assert_eq!(lb.current_index(), Some(2));
    assert_eq!(lb.track_offset(), Some(base));
}

#[test]
fn wheel_momentum_burst_commits_exactly_once() {
    let mut lb = desktop();
    lb.open(&catalog(5), "street", 0);

    // A trackpad momentum tail: many events, short gaps, huge total delta
    for i in 0..40 {
        lb.handle(InputEvent::Wheel {
            delta_x: 25.0,
            delta_y: 1.0,
            time_ms: i * 20,
        });
        lb.handle(InputEvent::AnimationComplete);
    }
    assert_eq!(lb.current_index(), Some(1));

    // After a quiet gap, the next swipe is a fresh gesture
    lb.handle(InputEvent::Wheel {
        delta_x: 60.0,
        delta_y: 0.0,
        time_ms: 5000,
    });
    lb.handle(InputEvent::AnimationComplete);
    assert_eq!(lb.current_index(), Some(2));
}

#[test]
fn full_touch_session_restores_page_state_on_close() {
    let mut lb = touch();
    lb.open(&catalog(5), "street", 1);
    commit(&mut lb, Direction::Next);
    lb.handle(InputEvent::Key { key: Key::Escape });

    assert_eq!(lb.state(), NavState::Closed);
    let applied: Vec<_> = lb
        .host()
        .effects
        .iter()
        .filter_map(|e| match e {
            Effect::Chrome(effect, true) => Some(*effect),
            _ => None,
        })
        .collect();
    let reverted: Vec<_> = lb
        .host()
        .effects
        .iter()
        .filter_map(|e| match e {
            Effect::Chrome(effect, false) => Some(*effect),
            _ => None,
        })
        .collect();
    let mut expected = applied.clone();
    expected.reverse();
    assert_eq!(reverted, expected);

    // Close is idempotent
    lb.handle(InputEvent::Key { key: Key::Escape });
    let dismissals = lb
        .host()
        .effects
        .iter()
        .filter(|e| matches!(e, Effect::Dismiss))
        .count();
    assert_eq!(dismissals, 1);
}

#[test]
fn events_round_trip_through_json_for_replay_traces() {
    let events = vec![
        InputEvent::PointerDown { x: 600.0, y: 400.0 },
        InputEvent::Wheel {
            delta_x: 60.0,
            delta_y: 0.0,
            time_ms: 120,
        },
        InputEvent::Key { key: Key::Escape },
        InputEvent::NavButton {
            direction: Direction::Next,
        },
        InputEvent::AnimationComplete,
    ];
    let json = serde_json::to_string(&events).unwrap();
    let parsed: Vec<InputEvent> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, events);

    // The trace format is stable: tagged snake_case variants
    assert!(json.contains("\"event\":\"pointer_down\""));
    assert!(json.contains("\"key\":\"escape\""));
    assert!(json.contains("\"direction\":\"next\""));
}

#[test]
fn identical_traces_replay_to_identical_effects() {
    let run = || {
        let mut lb = desktop();
        lb.open(&catalog(5), "street", 0);
        commit(&mut lb, Direction::Next);
        lb.handle(InputEvent::PointerDown { x: 600.0, y: 400.0 });
        lb.handle(InputEvent::PointerMove { x: 430.0, y: 404.0 });
        lb.handle(InputEvent::PointerUp);
        lb.handle(InputEvent::AnimationComplete);
        lb.handle(InputEvent::CloseButton);
        lb.into_host().effects
    };
    assert_eq!(run(), run());
}
