//! The lightbox controller: session lifecycle and navigation state machine.
//!
//! One [`Lightbox`] instance owns at most one live session at a time. All
//! session state — the committed photo index, the slot ring, the gesture
//! trackers, the side-effect journal — lives inside the controller; nothing
//! is ambient. The page chrome talks to it through three entry points
//! ([`Lightbox::open`], [`Lightbox::close`], [`Lightbox::handle`]) and gets
//! committed-index notifications back through the [`Host`].
//!
//! ## The Host seam
//!
//! The engine is headless. Everything that touches a rendering surface or
//! the surrounding page — drawing slides, moving the track, locking
//! scroll, pushing history entries — goes through the [`Host`] trait, and
//! animated track moves complete only when the host feeds
//! [`InputEvent::AnimationComplete`] back in. That keeps the state machine
//! synchronous and fully deterministic: tests drive it with plain method
//! calls and a recording host, no event loop required.
//!
//! ## Navigation states
//!
//! ```text
//!            pointer-down              past threshold on release
//!    Idle ──────────────▶ Dragging ──────────────────────────▶ Animating
//!     ▲                      │         (or button/key/wheel        │
//!     │   below threshold    │          request while Idle)        │
//!     └──────────────────────┴──────────◀───────────────────────────
//!                                    animation complete (commit or cancel)
//! ```
//!
//! While `Animating`, every navigation request is ignored — commits are
//! strictly serialized, so the displayed index can never skip or overlap.
//! A cancelled drag leaves the committed index untouched.
//!
//! ## Teardown journal
//!
//! Chrome side effects applied on open (scroll lock, fullscreen, the
//! synthetic history entry) are recorded in order; close replays them
//! inverted, newest first, so the page is restored exactly as it was.
//! Close is idempotent — the journal travels with the session and is gone
//! after the first close.

use crate::catalog::{Catalog, Collection};
use crate::config::{Capabilities, EngineConfig};
use crate::geometry::{self, CarouselGeometry, Viewport};
use crate::gesture::{
    self, Axis, Direction, DragTracker, PinchTracker, WheelTracker,
};
use crate::metadata;
use crate::preload::{self, ImageLoader, PreloadCache};
use crate::slots::{SlotId, SlotRing, SlotRole};
use serde::{Deserialize, Serialize};

/// Keyboard keys the lightbox reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
}

/// One input event, already translated out of device specifics by the
/// host's input adapters. Timestamps ride on the events that need them;
/// the engine never reads a clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    Wheel { delta_x: f64, delta_y: f64, time_ms: u64 },
    Key { key: Key },
    NavButton { direction: Direction },
    CloseButton,
    BackgroundClick,
    BackNavigation,
    PinchStart { distance: f64 },
    PinchMove { distance: f64 },
    Resize { width: f64, height: f64 },
    AnimationComplete,
}

/// Page-level side effects applied on open and reverted on close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeEffect {
    /// Suppress background page scroll. `pin_top` pins the scroll position
    /// to the top (touch devices, so browser chrome can auto-hide) instead
    /// of freezing overflow in place.
    LockScroll { pin_top: bool },
    /// Auto-entered fullscreen (touch-primary only).
    EnterFullscreen,
    /// Synthetic history entry so a hardware back action closes the
    /// session instead of leaving the page (touch-primary only).
    PushHistoryEntry,
}

/// Content for one render slot. A placeholder (all-`None`) slide stands in
/// for the missing neighbor at either end of the collection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SlideContent {
    pub photo_id: Option<String>,
    pub image_url: Option<String>,
    /// Fitted display size when the catalog knows the source dimensions.
    pub display_size: Option<(f64, f64)>,
    pub metadata_line: Option<String>,
    pub caption: Option<String>,
}

impl SlideContent {
    pub fn placeholder() -> Self {
        Self::default()
    }

    pub fn is_placeholder(&self) -> bool {
        self.image_url.is_none()
    }
}

/// Rendering surface and page chrome, as the engine sees them.
///
/// `animate_track` is the only asynchronous seam: the host runs the
/// transition and feeds [`InputEvent::AnimationComplete`] back when it
/// finishes (immediately, for a zero-duration reduced-motion move).
pub trait Host {
    fn render_slide(&mut self, slot: SlotId, content: &SlideContent);
    /// Move the track instantly, no transition.
    fn snap_track(&mut self, offset: f64);
    /// Animate the track to `offset` over `duration_ms`, then report
    /// completion as an `AnimationComplete` event.
    fn animate_track(&mut self, offset: f64, duration_ms: u64);
    fn set_metadata_visible(&mut self, visible: bool, fade_ms: u64);
    fn set_arrows(&mut self, prev_visible: bool, next_visible: bool);
    fn set_counter(&mut self, text: &str);
    fn set_caption_reserve(&mut self, height: f64);
    /// Rendered height of a caption at the given width. Hosts without
    /// text layout can leave the zero default.
    fn measure_caption(&self, _text: &str, _width: f64) -> f64 {
        0.0
    }
    fn apply_chrome(&mut self, effect: ChromeEffect);
    fn revert_chrome(&mut self, effect: ChromeEffect);
    /// Tear down the session's view (listeners, surfaces).
    fn dismiss(&mut self);
    /// Committed index changed (open counts as the first commit).
    fn index_changed(&mut self, collection_id: &str, index: usize, total: usize);
}

/// Observable navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Closed,
    Idle,
    Dragging,
    Animating,
}

enum Nav {
    Idle,
    Dragging(DragTracker),
    /// `commit: None` is a cancel animation back to base.
    Animating { commit: Option<Direction> },
}

struct Session {
    collection: Collection,
    index: usize,
    geometry: CarouselGeometry,
    ring: SlotRing,
    nav: Nav,
    wheel: WheelTracker,
    pinch: Option<PinchTracker>,
    journal: Vec<ChromeEffect>,
    track_offset: f64,
}

impl Session {
    fn at_first(&self) -> bool {
        self.index == 0
    }

    fn at_last(&self) -> bool {
        self.index + 1 == self.collection.len()
    }
}

/// The lightbox engine. Generic over its rendering/chrome seam and its
/// image loader so hosts and tests plug in their own.
pub struct Lightbox<H: Host, L: ImageLoader> {
    config: EngineConfig,
    capabilities: Capabilities,
    viewport: Viewport,
    host: H,
    loader: L,
    cache: PreloadCache,
    session: Option<Session>,
}

impl<H: Host, L: ImageLoader> Lightbox<H, L> {
    pub fn new(
        config: EngineConfig,
        capabilities: Capabilities,
        viewport: Viewport,
        host: H,
        loader: L,
    ) -> Self {
        let cache = PreloadCache::new(config.preload.cache_capacity);
        Self {
            config,
            capabilities,
            viewport,
            host,
            loader,
            cache,
            session: None,
        }
    }

    // =========================================================================
    // Session lifecycle
    // =========================================================================

    /// Open a session on `collection_id` at `start_index` (clamped into
    /// bounds). Declines silently — returning `false` — for a missing or
    /// empty collection. A live session is torn down first.
    pub fn open(&mut self, catalog: &Catalog, collection_id: &str, start_index: usize) -> bool {
        if self.session.is_some() {
            self.close();
        }
        let Some(collection) = catalog.get_collection(collection_id) else {
            return false;
        };
        if collection.is_empty() {
            return false;
        }

        let collection = collection.clone();
        let index = start_index.min(collection.len() - 1);
        let touch = self.capabilities.is_touch_primary;
        let geometry =
            CarouselGeometry::compute(self.viewport, &self.config.layout, touch);

        self.session = Some(Session {
            collection,
            index,
            geometry,
            ring: SlotRing::new(),
            nav: Nav::Idle,
            wheel: WheelTracker::new(&self.config.gesture),
            pinch: None,
            journal: Vec::new(),
            track_offset: geometry.base_position,
        });

        self.render_all_slides();
        self.update_caption_reserve();
        self.host.snap_track(geometry.base_position);
        self.update_controls();
        self.host.set_metadata_visible(true, 0);
        self.apply_chrome();
        self.preload();
        self.notify_index();
        true
    }

    /// Close the session, reverting every chrome side effect in the
    /// inverse order it was applied. Idempotent: a second close is a no-op.
    pub fn close(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        self.host.dismiss();
        for effect in session.journal.into_iter().rev() {
            self.host.revert_chrome(effect);
        }
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Feed one translated input event through the state machine.
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { x, y } => self.on_pointer_down(x, y),
            InputEvent::PointerMove { x, y } => self.on_pointer_move(x, y),
            InputEvent::PointerUp => self.on_pointer_up(),
            InputEvent::Wheel {
                delta_x,
                delta_y,
                time_ms,
            } => self.on_wheel(delta_x, delta_y, time_ms),
            InputEvent::Key { key } => match key {
                Key::Escape => self.close(),
                Key::ArrowLeft => self.request_navigate(Direction::Prev),
                Key::ArrowRight => self.request_navigate(Direction::Next),
            },
            InputEvent::NavButton { direction } => self.request_navigate(direction),
            InputEvent::CloseButton | InputEvent::BackgroundClick => self.close(),
            InputEvent::BackNavigation => self.on_back_navigation(),
            InputEvent::PinchStart { distance } => self.on_pinch_start(distance),
            InputEvent::PinchMove { distance } => self.on_pinch_move(distance),
            InputEvent::Resize { width, height } => self.on_resize(width, height),
            InputEvent::AnimationComplete => self.on_animation_complete(),
        }
    }

    /// Navigate one step, if a session is open, the machine is idle, and a
    /// neighbor exists in that direction. Every input adapter funnels here.
    pub fn request_navigate(&mut self, direction: Direction) {
        let metadata_fade = self.config.motion.metadata_fade_ms;
        let duration = self.slide_duration();
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !matches!(session.nav, Nav::Idle) {
            return;
        }
        let blocked = match direction {
            Direction::Prev => session.at_first(),
            Direction::Next => session.at_last(),
        };
        if blocked {
            return;
        }

        let target = session.geometry.target_offset(direction);
        session.nav = Nav::Animating {
            commit: Some(direction),
        };
        session.track_offset = target;
        self.host.set_metadata_visible(false, metadata_fade);
        self.host.animate_track(target, duration);
    }

    // =========================================================================
    // Observers
    // =========================================================================

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn state(&self) -> NavState {
        match &self.session {
            None => NavState::Closed,
            Some(session) => match session.nav {
                Nav::Idle => NavState::Idle,
                Nav::Dragging(_) => NavState::Dragging,
                Nav::Animating { .. } => NavState::Animating,
            },
        }
    }

    /// Committed photo index of the open session.
    pub fn current_index(&self) -> Option<usize> {
        self.session.as_ref().map(|s| s.index)
    }

    pub fn collection_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.collection.id.as_str())
    }

    /// Current track offset (the in-flight target while animating).
    pub fn track_offset(&self) -> Option<f64> {
        self.session.as_ref().map(|s| s.track_offset)
    }

    pub fn base_position(&self) -> Option<f64> {
        self.session.as_ref().map(|s| s.geometry.base_position)
    }

    pub fn cache(&self) -> &PreloadCache {
        &self.cache
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    // =========================================================================
    // Pointer gestures
    // =========================================================================

    fn on_pointer_down(&mut self, x: f64, y: f64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        // Input is locked while a transition is in flight
        if matches!(session.nav, Nav::Idle) {
            session.nav = Nav::Dragging(DragTracker::new(x, y, &self.config.gesture));
        }
    }

    fn on_pointer_move(&mut self, x: f64, y: f64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let at_first = session.at_first();
        let at_last = session.at_last();
        let Nav::Dragging(tracker) = &mut session.nav else {
            return;
        };

        let axis_before = tracker.axis();
        let axis = tracker.update(x, y);
        if axis != Axis::Horizontal {
            return;
        }
        if axis_before != Axis::Horizontal {
            // Axis just locked horizontal: hide metadata before anything moves
            self.host
                .set_metadata_visible(false, self.config.motion.metadata_fade_ms);
        }

        let displacement = gesture::rubber_band(
            tracker.displacement_x(),
            at_first,
            at_last,
            &self.config.gesture,
        );
        let offset = session.geometry.base_position + displacement;
        session.track_offset = offset;
        self.host.snap_track(offset);
    }

    fn on_pointer_up(&mut self) {
        let metadata_fade = self.config.motion.metadata_fade_ms;
        let duration = self.slide_duration();
        let touch = self.capabilities.is_touch_primary;
        let swipe_close = self.config.gesture.swipe_close_px;

        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Nav::Dragging(tracker) = &session.nav else {
            return;
        };
        let axis = tracker.axis();
        let dx = tracker.displacement_x();
        let dy = tracker.displacement_y();

        match axis {
            Axis::Horizontal => {
                let threshold =
                    gesture::commit_threshold(&self.config.gesture, session.geometry.slide_step);
                let outcome =
                    gesture::drag_outcome(dx, threshold, session.at_first(), session.at_last());
                match outcome {
                    Some(direction) => {
                        let target = session.geometry.target_offset(direction);
                        session.nav = Nav::Animating {
                            commit: Some(direction),
                        };
                        session.track_offset = target;
                        self.host.animate_track(target, duration);
                    }
                    None => {
                        // Cancel: spring back, index untouched
                        let base = session.geometry.base_position;
                        if dx == 0.0 {
                            // Already home; no spring-back animation, but the
                            // metadata hidden at axis-lock still comes back
                            session.nav = Nav::Idle;
                            session.track_offset = base;
                            self.host.snap_track(base);
                            self.host.set_metadata_visible(true, metadata_fade);
                        } else {
                            session.nav = Nav::Animating { commit: None };
                            session.track_offset = base;
                            self.host.animate_track(base, duration);
                        }
                    }
                }
            }
            Axis::Vertical => {
                session.nav = Nav::Idle;
                if touch && dy > swipe_close {
                    self.close();
                }
            }
            Axis::Unresolved => {
                // A tap; background-click close arrives as its own event
                session.nav = Nav::Idle;
            }
        }
    }

    // =========================================================================
    // Wheel, pinch, chrome events
    // =========================================================================

    fn on_wheel(&mut self, delta_x: f64, delta_y: f64, time_ms: u64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        // The tracker always advances so gesture debouncing stays correct
        // even while a transition has input locked.
        let decision = session.wheel.on_wheel(delta_x, delta_y, time_ms);
        let idle = matches!(session.nav, Nav::Idle);
        if let Some(direction) = decision
            && idle
        {
            self.request_navigate(direction);
        }
    }

    fn on_pinch_start(&mut self, distance: f64) {
        if !self.capabilities.is_touch_primary {
            return;
        }
        let gesture_config = &self.config.gesture;
        if let Some(session) = self.session.as_mut() {
            session.pinch = Some(PinchTracker::begin(distance, gesture_config));
        }
    }

    fn on_pinch_move(&mut self, distance: f64) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        if session
            .pinch
            .as_ref()
            .is_some_and(|p| p.should_close(distance))
        {
            self.close();
        }
    }

    fn on_back_navigation(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        // The browser already consumed the synthetic entry; reverting it
        // again would pop a real one.
        session
            .journal
            .retain(|e| !matches!(e, ChromeEffect::PushHistoryEntry));
        self.close();
    }

    fn on_resize(&mut self, width: f64, height: f64) {
        self.viewport = Viewport { width, height };
        let touch = self.capabilities.is_touch_primary;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.geometry = CarouselGeometry::compute(self.viewport, &self.config.layout, touch);
        let idle = matches!(session.nav, Nav::Idle);
        let base = session.geometry.base_position;
        if idle {
            session.track_offset = base;
        }
        self.render_all_slides();
        self.update_caption_reserve();
        if idle {
            self.host.snap_track(base);
        }
    }

    fn on_animation_complete(&mut self) {
        let commit = match self.session.as_ref().map(|s| &s.nav) {
            Some(Nav::Animating { commit }) => Some(*commit),
            _ => None,
        };
        match commit {
            Some(Some(direction)) => self.finish_navigation(direction),
            Some(None) => self.finish_cancel(),
            None => {}
        }
    }

    // =========================================================================
    // Commit / cancel
    // =========================================================================

    /// The commit: rotate slot roles, advance the index, rebuild the one
    /// newly-exposed neighbor, snap the track home, warm the new
    /// neighbors. The instant snap back to base is invisible because the
    /// rotated slide occupies the exact screen position the animation
    /// ended at.
    fn finish_navigation(&mut self, direction: Direction) {
        let touch = self.capabilities.is_touch_primary;
        let metadata_fade = self.config.motion.metadata_fade_ms;
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let Some(new_index) = session
            .index
            .checked_add_signed(direction.delta())
            .filter(|i| *i < session.collection.len())
        else {
            // Guarded upstream; resolve to a clean idle rather than panic
            session.nav = Nav::Idle;
            session.track_offset = session.geometry.base_position;
            return;
        };

        session.index = new_index;
        let rebuild = session.ring.rotate(direction);
        session.nav = Nav::Idle;
        let base = session.geometry.base_position;
        session.track_offset = base;

        let neighbor_index = new_index as isize + direction.delta();
        let content =
            slide_content(&session.collection, &session.geometry, touch, neighbor_index);

        self.host.snap_track(base);
        self.host.render_slide(rebuild, &content);
        preload::preload_neighbors(
            &mut self.cache,
            &mut self.loader,
            &session.collection,
            new_index,
            touch,
        );
        self.update_controls();
        self.host.set_metadata_visible(true, metadata_fade);
        self.notify_index();
    }

    fn finish_cancel(&mut self) {
        let metadata_fade = self.config.motion.metadata_fade_ms;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.nav = Nav::Idle;
        let base = session.geometry.base_position;
        session.track_offset = base;
        self.host.snap_track(base);
        // Same index as before the drag; its metadata comes back
        self.host.set_metadata_visible(true, metadata_fade);
    }

    // =========================================================================
    // Rendering and side effects
    // =========================================================================

    fn render_all_slides(&mut self) {
        let touch = self.capabilities.is_touch_primary;
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let index = session.index as isize;
        for (role, offset) in [
            (SlotRole::Prev, -1),
            (SlotRole::Current, 0),
            (SlotRole::Next, 1),
        ] {
            let slot = session.ring.slot(role);
            let content =
                slide_content(&session.collection, &session.geometry, touch, index + offset);
            self.host.render_slide(slot, &content);
        }
    }

    fn update_caption_reserve(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let width = session.geometry.max_image_box.0;
        let captions = session
            .collection
            .photos
            .iter()
            .filter_map(|p| p.comment.as_deref());
        let reserve =
            geometry::caption_reserve(captions, width, |text, w| self.host.measure_caption(text, w));
        self.host.set_caption_reserve(reserve);
    }

    fn update_controls(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let counter = metadata::format_counter(session.index, session.collection.len());
        self.host
            .set_arrows(!session.at_first(), !session.at_last());
        self.host.set_counter(&counter);
    }

    fn apply_chrome(&mut self) {
        let touch = self.capabilities.is_touch_primary;
        let mut effects = vec![ChromeEffect::LockScroll { pin_top: touch }];
        if touch {
            effects.push(ChromeEffect::EnterFullscreen);
            effects.push(ChromeEffect::PushHistoryEntry);
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        for effect in effects {
            session.journal.push(effect);
            self.host.apply_chrome(effect);
        }
    }

    fn preload(&mut self) {
        let touch = self.capabilities.is_touch_primary;
        let Some(session) = self.session.as_ref() else {
            return;
        };
        preload::preload_neighbors(
            &mut self.cache,
            &mut self.loader,
            &session.collection,
            session.index,
            touch,
        );
    }

    fn notify_index(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        self.host
            .index_changed(&session.collection.id, session.index, session.collection.len());
    }

    fn slide_duration(&self) -> u64 {
        if self.capabilities.reduced_motion {
            0
        } else {
            self.config.motion.slide_ms
        }
    }
}

/// Build the content for the slide at `index`, or a placeholder when the
/// index falls outside the collection (the empty neighbor at either end).
fn slide_content(
    collection: &Collection,
    geometry: &CarouselGeometry,
    touch_primary: bool,
    index: isize,
) -> SlideContent {
    let photo = usize::try_from(index)
        .ok()
        .and_then(|i| collection.photos.get(i));
    match photo {
        None => SlideContent::placeholder(),
        Some(photo) => SlideContent {
            photo_id: Some(photo.id.clone()),
            image_url: Some(photo.display_url(touch_primary).to_string()),
            display_size: photo
                .width
                .zip(photo.height)
                .map(|dims| geometry.fit_image(dims)),
            metadata_line: photo.metadata.display_line(),
            caption: metadata::resolve_caption(photo.comment.as_deref()),
        },
    }
}
