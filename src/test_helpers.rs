//! Shared fixtures for unit tests: demo catalogs, a recording host, and
//! a stub image loader. Compiled only for tests.

use crate::catalog::{Catalog, Collection, PhotoRecord};
use crate::config::{Capabilities, EngineConfig};
use crate::engine::{ChromeEffect, Host, Lightbox, SlideContent};
use crate::geometry::Viewport;
use crate::metadata::PhotoMetadata;
use crate::preload::{ImageLoader, LoadError, LoadedImage};
use crate::slots::SlotId;

/// Collection id used by most engine tests.
pub(crate) const COLLECTION: &str = "urban";

/// Build a collection of `n` photos named `{id}-1` through `{id}-n`.
///
/// Texture mirrors real manifests: every third photo has no capture
/// metadata, captions appear on a couple of photos only, and one photo
/// carries a mobile variant.
pub(crate) fn demo_collection(id: &str, n: usize) -> Collection {
    let cameras = ["Leica Q2", "Fujifilm X100V", "Nikon FM2"];
    let photos = (1..=n)
        .map(|i| {
            let metadata = if i % 3 == 0 {
                PhotoMetadata::default()
            } else {
                PhotoMetadata {
                    camera: Some(cameras[i % cameras.len()].to_string()),
                    lens: Some("35mm f/2".to_string()),
                    focal_length: Some("35mm".to_string()),
                    aperture: Some("f/5.6".to_string()),
                    shutter_speed: Some("1/250".to_string()),
                    iso: Some("400".to_string()),
                }
            };
            PhotoRecord {
                id: format!("{id}-{i}"),
                url: format!("images/{id}-{i}-2560.jpg"),
                mobile_url: (i == 1).then(|| format!("images/{id}-{i}-1280.jpg")),
                thumb: Some(format!("images/{id}-{i}-thumb.jpg")),
                width: Some(2560),
                height: Some(1707),
                title: None,
                metadata,
                comment: (i == 2).then(|| "Shot from the overpass at dusk.".to_string()),
            }
        })
        .collect();
    Collection {
        id: id.to_string(),
        title: id.to_string(),
        description: None,
        photos,
    }
}

/// A catalog with one five-photo section plus an empty one.
pub(crate) fn demo_catalog() -> Catalog {
    Catalog {
        sections: vec![
            demo_collection(COLLECTION, 5),
            Collection {
                id: "empty".to_string(),
                title: "Empty".to_string(),
                description: None,
                photos: Vec::new(),
            },
        ],
    }
}

/// Every host call the engine can make, in recorded form.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum HostCall {
    RenderSlide(SlotId, SlideContent),
    SnapTrack(f64),
    AnimateTrack { offset: f64, duration_ms: u64 },
    MetadataVisible { visible: bool, fade_ms: u64 },
    Arrows { prev: bool, next: bool },
    Counter(String),
    CaptionReserve(f64),
    ApplyChrome(ChromeEffect),
    RevertChrome(ChromeEffect),
    Dismiss,
    IndexChanged {
        collection_id: String,
        index: usize,
        total: usize,
    },
}

/// Host that records every call for later assertions.
#[derive(Debug, Default)]
pub(crate) struct RecordingHost {
    pub(crate) calls: Vec<HostCall>,
}

impl RecordingHost {
    pub(crate) fn renders(&self) -> Vec<(SlotId, SlideContent)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HostCall::RenderSlide(slot, content) => Some((*slot, content.clone())),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn snaps(&self) -> Vec<f64> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HostCall::SnapTrack(offset) => Some(*offset),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn chrome_applied(&self) -> Vec<ChromeEffect> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HostCall::ApplyChrome(effect) => Some(*effect),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn chrome_reverted(&self) -> Vec<ChromeEffect> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HostCall::RevertChrome(effect) => Some(*effect),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn last_counter(&self) -> Option<String> {
        self.calls.iter().rev().find_map(|c| match c {
            HostCall::Counter(text) => Some(text.clone()),
            _ => None,
        })
    }

    pub(crate) fn last_arrows(&self) -> Option<(bool, bool)> {
        self.calls.iter().rev().find_map(|c| match c {
            HostCall::Arrows { prev, next } => Some((*prev, *next)),
            _ => None,
        })
    }

    pub(crate) fn last_metadata_visibility(&self) -> Option<bool> {
        self.calls.iter().rev().find_map(|c| match c {
            HostCall::MetadataVisible { visible, .. } => Some(*visible),
            _ => None,
        })
    }

    pub(crate) fn last_animate(&self) -> Option<(f64, u64)> {
        self.calls.iter().rev().find_map(|c| match c {
            HostCall::AnimateTrack {
                offset,
                duration_ms,
            } => Some((*offset, *duration_ms)),
            _ => None,
        })
    }

    pub(crate) fn last_index_change(&self) -> Option<(String, usize, usize)> {
        self.calls.iter().rev().find_map(|c| match c {
            HostCall::IndexChanged {
                collection_id,
                index,
                total,
            } => Some((collection_id.clone(), *index, *total)),
            _ => None,
        })
    }
}

impl Host for RecordingHost {
    fn render_slide(&mut self, slot: SlotId, content: &SlideContent) {
        self.calls.push(HostCall::RenderSlide(slot, content.clone()));
    }

    fn snap_track(&mut self, offset: f64) {
        self.calls.push(HostCall::SnapTrack(offset));
    }

    fn animate_track(&mut self, offset: f64, duration_ms: u64) {
        self.calls.push(HostCall::AnimateTrack {
            offset,
            duration_ms,
        });
    }

    fn set_metadata_visible(&mut self, visible: bool, fade_ms: u64) {
        self.calls
            .push(HostCall::MetadataVisible { visible, fade_ms });
    }

    fn set_arrows(&mut self, prev_visible: bool, next_visible: bool) {
        self.calls.push(HostCall::Arrows {
            prev: prev_visible,
            next: next_visible,
        });
    }

    fn set_counter(&mut self, text: &str) {
        self.calls.push(HostCall::Counter(text.to_string()));
    }

    fn set_caption_reserve(&mut self, height: f64) {
        self.calls.push(HostCall::CaptionReserve(height));
    }

    fn apply_chrome(&mut self, effect: ChromeEffect) {
        self.calls.push(HostCall::ApplyChrome(effect));
    }

    fn revert_chrome(&mut self, effect: ChromeEffect) {
        self.calls.push(HostCall::RevertChrome(effect));
    }

    fn dismiss(&mut self) {
        self.calls.push(HostCall::Dismiss);
    }

    fn index_changed(&mut self, collection_id: &str, index: usize, total: usize) {
        self.calls.push(HostCall::IndexChanged {
            collection_id: collection_id.to_string(),
            index,
            total,
        });
    }
}

/// Loader that succeeds for every URL and records what it was asked for.
#[derive(Debug, Default)]
pub(crate) struct StubLoader {
    pub(crate) loaded: Vec<String>,
}

impl ImageLoader for StubLoader {
    fn load(&mut self, url: &str) -> Result<LoadedImage, LoadError> {
        self.loaded.push(url.to_string());
        Ok(LoadedImage {
            width: 2560,
            height: 1707,
        })
    }
}

pub(crate) type TestLightbox = Lightbox<RecordingHost, StubLoader>;

fn lightbox_with(capabilities: Capabilities) -> TestLightbox {
    Lightbox::new(
        EngineConfig::default(),
        capabilities,
        Viewport {
            width: 1200.0,
            height: 800.0,
        },
        RecordingHost::default(),
        StubLoader::default(),
    )
}

/// Desktop lightbox on a 1200×800 viewport.
pub(crate) fn new_lightbox() -> TestLightbox {
    lightbox_with(Capabilities::default())
}

/// Touch-primary lightbox on a 1200×800 viewport.
pub(crate) fn new_touch_lightbox() -> TestLightbox {
    lightbox_with(Capabilities {
        is_touch_primary: true,
        reduced_motion: false,
    })
}

pub(crate) fn new_reduced_motion_lightbox() -> TestLightbox {
    lightbox_with(Capabilities {
        is_touch_primary: false,
        reduced_motion: true,
    })
}

/// Run a full pointer gesture: down at `from`, one move to `to`, up.
pub(crate) fn drag(lb: &mut TestLightbox, from: (f64, f64), to: (f64, f64)) {
    lb.handle(crate::engine::InputEvent::PointerDown {
        x: from.0,
        y: from.1,
    });
    lb.handle(crate::engine::InputEvent::PointerMove { x: to.0, y: to.1 });
    lb.handle(crate::engine::InputEvent::PointerUp);
}
