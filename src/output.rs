//! CLI output formatting for catalog inspection and trace replay.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entity (section, photo) is its semantic identity — title and
//! positional index — with URLs shown as secondary context via indented
//! `Image:` lines. This makes the output readable as a content inventory
//! while still letting users trace entries back to specific files.
//!
//! # Output Format
//!
//! ## Inspect
//!
//! ```text
//! Sections
//! 001 Urban (5 photos)
//!     001 urban-1
//!         Image: images/urban-1-2560.jpg (2560×1707)
//!         Metadata: Leica Q2 • 35mm f/2 • f/5.6
//!     002 urban-2
//!         Image: images/urban-2-2560.jpg
//!         Caption: Shot from the overpass at dusk.
//!
//! 2 sections, 8 photos
//! ```
//!
//! ## Replay
//!
//! Every engine effect becomes one indented line under the event that
//! caused it, so a trace reads as cause and consequence:
//!
//! ```text
//! event nav_button next
//!     metadata: hidden (fade 200 ms)
//!     track: animate to -2432 over 400 ms
//! event animation_complete
//!     track: snap to -1216
//!     render slot 0: urban-4
//!     ...
//! ```
//!
//! # Architecture
//!
//! Each surface has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects. [`TraceHost`] is the
//! replay counterpart: a [`Host`] whose only rendering surface is this
//! line log.

use crate::catalog::Catalog;
use crate::engine::{ChromeEffect, Host, InputEvent, SlideContent};
use crate::metadata::resolve_caption;
use crate::slots::SlotId;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Truncate text to `max` characters, appending `...` if truncated.
/// Counts chars, not bytes, so multi-byte text never splits mid-character.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn chrome_label(effect: ChromeEffect) -> &'static str {
    match effect {
        ChromeEffect::LockScroll { pin_top: true } => "scroll-lock (pinned)",
        ChromeEffect::LockScroll { pin_top: false } => "scroll-lock",
        ChromeEffect::EnterFullscreen => "fullscreen",
        ChromeEffect::PushHistoryEntry => "history-entry",
    }
}

// ============================================================================
// Inspect output
// ============================================================================

/// Format catalog inspection output showing sections and their photos.
///
/// Information-first: each entity leads with its positional index and
/// title. Image URLs, capture metadata, and captions are indented context.
pub fn format_inspect_output(catalog: &Catalog) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push("Sections".to_string());

    for (i, section) in catalog.sections.iter().enumerate() {
        lines.push(format!(
            "{} {} ({} photos)",
            format_index(i + 1),
            section.title,
            section.photos.len()
        ));
        if let Some(desc) = &section.description {
            let truncated = truncate_desc(desc.trim(), 60);
            if !truncated.is_empty() {
                lines.push(format!("    {}", truncated));
            }
        }

        for (j, photo) in section.photos.iter().enumerate() {
            let display = photo.title.as_deref().unwrap_or(&photo.id);
            lines.push(format!("    {} {}", format_index(j + 1), display));

            let dims = match (photo.width, photo.height) {
                (Some(w), Some(h)) => format!(" ({w}\u{d7}{h})"),
                _ => String::new(),
            };
            lines.push(format!("        Image: {}{}", photo.url, dims));
            if let Some(mobile) = &photo.mobile_url {
                lines.push(format!("        Mobile: {}", mobile));
            }
            if let Some(line) = photo.metadata.display_line() {
                lines.push(format!("        Metadata: {}", line));
            }
            if let Some(caption) = resolve_caption(photo.comment.as_deref()) {
                lines.push(format!(
                    "        Caption: {}",
                    truncate_desc(&caption, 60)
                ));
            }
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "{} sections, {} photos",
        catalog.sections.len(),
        catalog.total_photos()
    ));
    lines
}

/// Print inspect output to stdout.
pub fn print_inspect_output(catalog: &Catalog) {
    for line in format_inspect_output(catalog) {
        println!("{}", line);
    }
}

// ============================================================================
// Replay output
// ============================================================================

/// One-line description of an input event, for the replay transcript.
pub fn format_event(event: &InputEvent) -> String {
    match event {
        InputEvent::PointerDown { x, y } => format!("event pointer_down ({x:.0}, {y:.0})"),
        InputEvent::PointerMove { x, y } => format!("event pointer_move ({x:.0}, {y:.0})"),
        InputEvent::PointerUp => "event pointer_up".to_string(),
        InputEvent::Wheel {
            delta_x,
            delta_y,
            time_ms,
        } => format!("event wheel ({delta_x:.0}, {delta_y:.0}) at {time_ms} ms"),
        InputEvent::Key { key } => format!("event key {key:?}"),
        InputEvent::NavButton { direction } => format!("event nav_button {direction:?}"),
        InputEvent::CloseButton => "event close_button".to_string(),
        InputEvent::BackgroundClick => "event background_click".to_string(),
        InputEvent::BackNavigation => "event back_navigation".to_string(),
        InputEvent::PinchStart { distance } => format!("event pinch_start ({distance:.0})"),
        InputEvent::PinchMove { distance } => format!("event pinch_move ({distance:.0})"),
        InputEvent::Resize { width, height } => {
            format!("event resize ({width:.0}\u{d7}{height:.0})")
        }
        InputEvent::AnimationComplete => "event animation_complete".to_string(),
    }
}

/// A [`Host`] whose rendering surface is a line log. The replay command
/// drives the engine with it and prints the log, turning an input trace
/// into a readable effect transcript.
#[derive(Debug, Default)]
pub struct TraceHost {
    lines: Vec<String>,
}

impl TraceHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a non-effect marker line (the replay loop logs each input
    /// event before feeding it, so effects nest under their cause).
    pub fn mark(&mut self, line: String) {
        self.lines.push(line);
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    fn effect(&mut self, line: String) {
        self.lines.push(format!("    {}", line));
    }
}

impl Host for TraceHost {
    fn render_slide(&mut self, slot: SlotId, content: &SlideContent) {
        let what = match (&content.photo_id, content.display_size) {
            (Some(id), Some((w, h))) => format!("{id} ({w:.0}\u{d7}{h:.0})"),
            (Some(id), None) => id.clone(),
            _ => "(empty)".to_string(),
        };
        self.effect(format!("render slot {}: {}", slot.0, what));
    }

    fn snap_track(&mut self, offset: f64) {
        self.effect(format!("track: snap to {offset:.0}"));
    }

    fn animate_track(&mut self, offset: f64, duration_ms: u64) {
        self.effect(format!("track: animate to {offset:.0} over {duration_ms} ms"));
    }

    fn set_metadata_visible(&mut self, visible: bool, fade_ms: u64) {
        let state = if visible { "visible" } else { "hidden" };
        self.effect(format!("metadata: {state} (fade {fade_ms} ms)"));
    }

    fn set_arrows(&mut self, prev_visible: bool, next_visible: bool) {
        let onoff = |v| if v { "on" } else { "off" };
        self.effect(format!(
            "arrows: prev {}, next {}",
            onoff(prev_visible),
            onoff(next_visible)
        ));
    }

    fn set_counter(&mut self, text: &str) {
        self.effect(format!("counter: {text}"));
    }

    fn set_caption_reserve(&mut self, height: f64) {
        self.effect(format!("caption reserve: {height:.0} px"));
    }

    fn apply_chrome(&mut self, effect: ChromeEffect) {
        self.effect(format!("chrome: +{}", chrome_label(effect)));
    }

    fn revert_chrome(&mut self, effect: ChromeEffect) {
        self.effect(format!("chrome: -{}", chrome_label(effect)));
    }

    fn dismiss(&mut self) {
        self.effect("dismiss".to_string());
    }

    fn index_changed(&mut self, collection_id: &str, index: usize, total: usize) {
        self.effect(format!("index: {collection_id} {}/{total}", index + 1));
    }
}
