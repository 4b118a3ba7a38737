//! Photo metadata display resolution.
//!
//! Each photo can carry up to six independent capture attributes (camera,
//! lens, focal length, aperture, shutter speed, ISO) plus a free-text
//! caption. Every field is optional on its own: a phone snapshot may have
//! only a camera name, a scanned negative may have nothing at all.
//!
//! ## Display line
//!
//! The lightbox shows whatever attributes exist as a single line joined by
//! bullet separators, in fixed field order:
//!
//! ```text
//! Canon EOS R5 • 50mm f/1.4 • f/2.8 • 1/500 • ISO 400
//! ```
//!
//! Absent fields are skipped rather than rendered as blanks, so the line
//! never shows dangling separators. A photo with no attributes produces no
//! line at all — the metadata block collapses instead of showing an empty
//! row under the image.
//!
//! ## Fade synchronization
//!
//! The engine hides this block the instant a horizontal gesture is
//! recognized and re-reveals it only once the destination slide is final,
//! so a stale attribute line is never displayed against an incoming image.
//! That timing lives in [`crate::engine`]; this module is only the pure
//! formatting side.

use serde::{Deserialize, Serialize};

/// Separator between attribute fields in the display line.
const FIELD_SEPARATOR: &str = " • ";

/// Capture attributes for one photo. All fields independently optional.
///
/// Field names follow the catalog JSON produced by the build pipeline
/// (camelCase on disk, see [`crate::catalog`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lens: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focal_length: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aperture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shutter_speed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso: Option<String>,
}

impl PhotoMetadata {
    /// Present fields in display order. Whitespace-only values count as
    /// absent: a field the build stage emitted as `""` was never
    /// deliberately curated.
    pub fn fields(&self) -> Vec<&str> {
        [
            &self.camera,
            &self.lens,
            &self.focal_length,
            &self.aperture,
            &self.shutter_speed,
            &self.iso,
        ]
        .into_iter()
        .filter_map(|opt| opt.as_deref().map(str::trim).filter(|s| !s.is_empty()))
        .collect()
    }

    /// True when no attribute field carries a displayable value.
    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }

    /// Bullet-joined display line, or `None` when every field is absent.
    pub fn display_line(&self) -> Option<String> {
        let fields = self.fields();
        if fields.is_empty() {
            None
        } else {
            Some(fields.join(FIELD_SEPARATOR))
        }
    }
}

/// Photo counter text shown at the bottom of the lightbox.
///
/// `index` is zero-based (the session's committed index); display is
/// one-based: `format_counter(0, 5)` → `"1 / 5"`.
pub fn format_counter(index: usize, total: usize) -> String {
    format!("{} / {}", index + 1, total)
}

/// Resolve a caption for display: trimmed, `None` when empty.
pub fn resolve_caption(caption: Option<&str>) -> Option<String> {
    caption
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
