//! # Galbox
//!
//! A headless, gesture-driven lightbox engine for photo portfolios. Given a
//! catalog of photo collections and a stream of translated input events,
//! the engine runs the whole viewing experience — opening, a three-slide
//! film-strip carousel, drag/wheel/keyboard/pinch navigation, metadata
//! display, neighbor preloading, and teardown — and emits rendering
//! effects through a host trait. It owns every decision; hosts own every
//! pixel.
//!
//! # Architecture: Engine and Host
//!
//! The split is strict. The [`engine`] holds all state (the committed
//! index, the slot ring, the gesture trackers, the side-effect journal)
//! and is purely synchronous: feed it an [`engine::InputEvent`], get host
//! calls back. The [`engine::Host`] is a thin rendering surface — it draws
//! slides into stable slots, moves the track, toggles chrome — and never
//! makes a decision of its own.
//!
//! ```text
//! input adapters ──events──▶ Lightbox ──effects──▶ Host (DOM, GUI, trace log)
//!                               │
//!                               └──loads──▶ ImageLoader (network, disk, stub)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Determinism**: the engine reads no clocks and touches no I/O, so a
//!   recorded input trace replays to identical effects every time.
//! - **Testability**: every gesture threshold, geometry rule, and state
//!   transition is exercised with plain method calls and a recording host.
//! - **Portability**: the same engine drives a web front end, a native
//!   viewer, or the bundled CLI replay harness unchanged.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Session lifecycle and the navigation state machine — the controller everything else serves |
//! | [`catalog`] | `photos.json` manifests: collections, photo records, directory scanning |
//! | [`metadata`] | Capture-attribute display: the metadata line, counters, caption resolution |
//! | [`gesture`] | Pure gesture recognition: axis-locked drags, debounced wheel gestures, pinch |
//! | [`geometry`] | Film-strip sizing math: track positions, image boxes, caption reserve |
//! | [`slots`] | The three-slot render ring that relabels surfaces instead of rebuilding them |
//! | [`preload`] | Best-effort neighbor preloading behind a bounded FIFO cache |
//! | [`config`] | Engine tuning via `TOML`: gesture thresholds, motion, layout, preload |
//! | [`output`] | CLI output formatting — catalog inventories and replay transcripts |
//!
//! # Design Decisions
//!
//! ## Three Slots, Rotated
//!
//! The carousel keeps exactly three render surfaces alive and relabels
//! them on every committed navigation ([`slots::SlotRing`]). The surface
//! ids never change mid-session, so hosts bind them to long-lived nodes
//! and only one slide's content is rebuilt per navigation — the one that
//! wrapped around to hold the new far neighbor.
//!
//! ## Commit Then Snap
//!
//! Navigation animates the track one step, then — in a single commit —
//! rotates the slot roles and snaps the track back to its base offset.
//! The snap is invisible because the promoted slide occupies the exact
//! screen position the animation ended at. At rest the track is always at
//! base, which makes "where is the track" a non-question everywhere else.
//!
//! ## One Navigation at a Time
//!
//! While a transition runs, every further navigation request is dropped,
//! not queued. Arrow-key autorepeat and wheel momentum therefore step
//! through photos one commit at a time instead of skipping ahead, and the
//! committed index is always the index on screen.
//!
//! ## Timestamps Ride on Events
//!
//! Wheel-gesture debouncing needs wall time, but the engine never reads a
//! clock — events carry their own timestamps. Tests and the replay
//! harness fabricate time; production hosts pass the event's native
//! timestamp through.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod geometry;
pub mod gesture;
pub mod metadata;
pub mod output;
pub mod preload;
pub mod slots;

#[cfg(test)]
pub(crate) mod test_helpers;
