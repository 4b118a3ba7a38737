//! Best-effort neighbor preloading.
//!
//! Every commit (and the initial open) eagerly warms the immediate
//! predecessor and successor of the new current index so that the next
//! navigation reveals an already-loaded image. Preloading is strictly
//! best-effort: a failed load is discarded silently and never blocks
//! navigation — the destination slide simply renders its broken-image
//! state when its turn comes.
//!
//! ## Cache policy
//!
//! Loaded entries live in a bounded FIFO map: once the cache exceeds its
//! capacity the oldest-*inserted* entry is dropped. Deliberately FIFO
//! rather than LRU — the engine never tracks access recency, and a
//! browsing session walks mostly forward anyway, so the bookkeeping of a
//! recency list buys nothing here.
//!
//! The actual loading sits behind [`ImageLoader`] so the engine stays
//! independent of the rendering surface: the web host resolves URLs to
//! `Image` objects, the CLI host probes files on disk, tests count calls.

use crate::catalog::Collection;
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image decode error: {0}")]
    Decode(#[from] image::ImageError),
}

/// What a completed preload knows about the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
}

/// Resolves an image URL into a warm, decodable image.
pub trait ImageLoader {
    fn load(&mut self, url: &str) -> Result<LoadedImage, LoadError>;
}

/// Loader for catalogs whose URLs are filesystem paths. Probes image
/// headers only — enough to validate the file and pull dimensions without
/// decoding full pixel data.
#[derive(Debug, Default)]
pub struct FsLoader;

impl ImageLoader for FsLoader {
    fn load(&mut self, url: &str) -> Result<LoadedImage, LoadError> {
        let (width, height) = image::image_dimensions(Path::new(url))?;
        Ok(LoadedImage { width, height })
    }
}

/// Bounded FIFO cache of preloaded images keyed by URL.
#[derive(Debug)]
pub struct PreloadCache {
    entries: HashMap<String, LoadedImage>,
    insertion_order: VecDeque<String>,
    capacity: usize,
}

impl PreloadCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            insertion_order: VecDeque::new(),
            capacity,
        }
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    pub fn get(&self, url: &str) -> Option<&LoadedImage> {
        self.entries.get(url)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert an entry, evicting the oldest-inserted once over capacity.
    /// Re-inserting an existing URL refreshes the value but keeps its
    /// original queue position (FIFO, not LRU).
    pub fn insert(&mut self, url: String, image: LoadedImage) {
        if self.entries.insert(url.clone(), image).is_none() {
            self.insertion_order.push_back(url);
        }
        while self.entries.len() > self.capacity {
            match self.insertion_order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
    }
}

/// Warm the neighbors of `index` in `collection`. Already-cached URLs are
/// skipped; load failures are dropped on the floor.
pub fn preload_neighbors<L: ImageLoader>(
    cache: &mut PreloadCache,
    loader: &mut L,
    collection: &Collection,
    index: usize,
    touch_primary: bool,
) {
    let neighbors = [index.checked_sub(1), index.checked_add(1)];
    for neighbor in neighbors.into_iter().flatten() {
        let Some(photo) = collection.photos.get(neighbor) else {
            continue;
        };
        let url = photo.display_url(touch_primary);
        if cache.contains(url) {
            continue;
        }
        if let Ok(image) = loader.load(url) {
            cache.insert(url.to_string(), image);
        }
    }
}
