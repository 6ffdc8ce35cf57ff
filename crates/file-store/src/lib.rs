//! Per-game file layout management.
//!
//! Every (game, category) pair owns exactly one directory under the media
//! root (`<root>/games/<id>/<category>`) and one URL prefix under the media
//! URL. This crate computes those paths, lists and empties directories,
//! copies a finished build set to another category, reconciles stored file
//! records against what is actually on disk, and snapshots versioned game
//! text.

mod reconcile;
mod snapshot;
mod store;

pub use reconcile::{FileRecord, ReconcileReport};
pub use store::{FileEntry, GameFileStore};

use std::path::PathBuf;

/// Errors from file layout operations.
#[derive(Debug, thiserror::Error)]
pub enum FileStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("source directory does not exist: {0}")]
    SourceDirMissing(PathBuf),

    #[error("no files found in source directory: {0}")]
    SourceDirEmpty(PathBuf),
}

/// Where game media lives on disk and on the web.
#[derive(Debug, Clone)]
pub struct FileLayout {
    media_root: PathBuf,
    media_url: String,
}

impl FileLayout {
    /// Creates a layout rooted at the given media directory and URL.
    ///
    /// A trailing slash on the URL is dropped so joined URLs stay canonical.
    pub fn new(media_root: impl Into<PathBuf>, media_url: impl Into<String>) -> FileLayout {
        let mut media_url = media_url.into();
        while media_url.ends_with('/') {
            media_url.pop();
        }
        FileLayout {
            media_root: media_root.into(),
            media_url,
        }
    }

    pub fn media_root(&self) -> &std::path::Path {
        &self.media_root
    }

    pub fn media_url(&self) -> &str {
        &self.media_url
    }
}
