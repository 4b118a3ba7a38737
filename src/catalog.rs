//! Photo catalog: the ordered collections the lightbox browses.
//!
//! The catalog is read-only input to the engine. It normally comes from the
//! `photos.json` manifest the build pipeline writes next to the derived
//! images, but a directory tree of images works too (each subdirectory
//! becomes a collection) — handy for inspecting a portfolio before the
//! manifest exists.
//!
//! ## Manifest shape
//!
//! `photos.json` is a `sections` array. Photo fields are camelCase and
//! sparse: the build stage omits any EXIF attribute it could not extract,
//! so every attribute deserializes as `Option`.
//!
//! ```json
//! {
//!   "sections": [{
//!     "id": "urban-nights",
//!     "title": "Urban Nights",
//!     "description": "Cities after dark.",
//!     "photos": [{
//!       "id": "urban-nights-1",
//!       "url": "/images/web/urban/001.jpg",
//!       "mobileUrl": "/images/mobile/urban/001.jpg",
//!       "thumb": "/images/thumbs/urban/001.jpg",
//!       "width": 2560, "height": 1707,
//!       "camera": "Canon EOS R5", "aperture": "f/2.8",
//!       "comment": "A quiet moment in the fading light."
//!     }]
//!   }]
//! }
//! ```
//!
//! ## Ordering invariant
//!
//! Within one collection, photos form a fixed-order sequence for the
//! lifetime of a lightbox session. The engine holds indices into that
//! sequence and never mutates it; this module only ever hands out shared
//! references.

use crate::metadata::PhotoMetadata;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Catalog root is not a directory: {0}")]
    NotADirectory(std::path::PathBuf),
}

/// One photo as the lightbox sees it. Identifiers are opaque strings;
/// URLs are whatever the build pipeline wrote (site-relative paths for
/// the web front end, filesystem paths for local catalogs).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRecord {
    pub id: String,
    /// Primary display URL (the full-size derived image).
    pub url: String,
    /// Lower-resolution alternative for touch-primary devices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_url: Option<String>,
    /// Grid thumbnail — unused by the engine, kept so manifests round-trip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb: Option<String>,
    /// Pixel dimensions of the display image, when the manifest carries them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Capture attributes, flattened into the record (manifest photos carry
    /// `camera`, `lens`, … as top-level keys).
    #[serde(flatten)]
    pub metadata: PhotoMetadata,
    /// Free-text caption shown under the attribute line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl PhotoRecord {
    /// URL to display for the given device class: the compact variant on
    /// touch-primary devices when one exists, the full image otherwise.
    pub fn display_url(&self, touch_primary: bool) -> &str {
        if touch_primary && let Some(mobile) = &self.mobile_url {
            mobile
        } else {
            &self.url
        }
    }
}

/// An ordered, fixed sequence of photos (one themed gallery section).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub photos: Vec<PhotoRecord>,
}

impl Collection {
    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}

/// The full set of collections a portfolio exposes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub sections: Vec<Collection>,
}

impl Catalog {
    /// Load a catalog from a `photos.json` manifest.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Look up a collection by id. Empty collections are valid catalog
    /// content; callers (the engine included) must tolerate both `None`
    /// and an empty photo list.
    pub fn get_collection(&self, id: &str) -> Option<&Collection> {
        self.sections.iter().find(|c| c.id == id)
    }

    /// Build a catalog from a directory tree of images.
    ///
    /// Each immediate subdirectory of `root` becomes a collection (directory
    /// name as id and title); images directly under `root` form a catch-all
    /// collection named after the root directory itself. Files are ordered
    /// by filename, dimensions probed from image headers, and non-image
    /// files skipped. No derived assets are produced — records point at the
    /// originals.
    pub fn from_dir(root: &Path) -> Result<Self, CatalogError> {
        if !root.is_dir() {
            return Err(CatalogError::NotADirectory(root.to_path_buf()));
        }

        let mut sections = Vec::new();
        let root_id = dir_name(root);
        if let Some(loose) = collect_images(root, &root_id, 1)? {
            sections.push(loose);
        }

        let mut subdirs: Vec<_> = std::fs::read_dir(root)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .collect();
        subdirs.sort();

        for dir in subdirs {
            let id = dir_name(&dir);
            if let Some(collection) = collect_images(&dir, &id, usize::MAX)? {
                sections.push(collection);
            }
        }

        Ok(Self { sections })
    }

    pub fn total_photos(&self) -> usize {
        self.sections.iter().map(Collection::len).sum()
    }
}

/// Extensions the directory scanner treats as images.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| ".".to_string())
}

/// Scan one directory (to `depth` levels) into a collection. Returns `None`
/// when the directory holds no images at all, so empty subdirectories don't
/// produce empty collections.
fn collect_images(
    dir: &Path,
    id: &str,
    depth: usize,
) -> Result<Option<Collection>, CatalogError> {
    let mut paths: Vec<_> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(depth)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_image(p))
        .collect();
    paths.sort();

    if paths.is_empty() {
        return Ok(None);
    }

    let photos = paths
        .iter()
        .enumerate()
        .map(|(i, path)| {
            // Header-only probe; a corrupt file still gets a record, just
            // without dimensions.
            let dims = image::image_dimensions(path).ok();
            PhotoRecord {
                id: format!("{}-{}", id, i + 1),
                url: path.to_string_lossy().to_string(),
                mobile_url: None,
                thumb: None,
                width: dims.map(|(w, _)| w),
                height: dims.map(|(_, h)| h),
                title: path
                    .file_stem()
                    .map(|s| s.to_string_lossy().replace('-', " ")),
                metadata: PhotoMetadata::default(),
                comment: None,
            }
        })
        .collect();

    Ok(Some(Collection {
        id: id.to_string(),
        title: id.replace('-', " "),
        description: None,
        photos,
    }))
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}
