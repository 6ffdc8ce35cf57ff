//! Directory paths, listing, emptying, and cross-category copies.

use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use storypress_model::BuildCategory;

use crate::{FileLayout, FileStoreError};

/// One file found in a category directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub url: String,
    /// Modification time, unix seconds (0 when the filesystem won't say).
    pub modified: i64,
    pub size: u64,
}

/// File layout manager for a single game.
#[derive(Debug, Clone)]
pub struct GameFileStore {
    layout: FileLayout,
    game_id: Uuid,
}

impl GameFileStore {
    pub fn new(layout: FileLayout, game_id: Uuid) -> GameFileStore {
        GameFileStore { layout, game_id }
    }

    pub fn game_id(&self) -> Uuid {
        self.game_id
    }

    pub fn media_root(&self) -> &Path {
        self.layout.media_root()
    }

    /// Absolute directory for one category's files.
    pub fn dir_path(&self, category: BuildCategory) -> PathBuf {
        self.layout
            .media_root()
            .join("games")
            .join(self.game_id.to_string())
            .join(category.as_str())
    }

    /// Directory for one category, relative to the media root.
    pub fn media_subdir(&self, category: BuildCategory) -> PathBuf {
        Path::new("games")
            .join(self.game_id.to_string())
            .join(category.as_str())
    }

    /// URL prefix for one category's files.
    pub fn url_path(&self, category: BuildCategory) -> String {
        format!(
            "{}/games/{}/{}",
            self.layout.media_url(),
            self.game_id,
            category.as_str()
        )
    }

    /// Lists the files in a category directory.
    ///
    /// A missing directory is an empty listing, not an error. Order is
    /// whatever the filesystem enumerates; callers must not rely on it.
    pub fn list_files(&self, category: BuildCategory) -> Result<Vec<FileEntry>, FileStoreError> {
        let dir = self.dir_path(category);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let url_base = self.url_path(category);
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            let meta = entry.metadata()?;
            if !meta.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let modified = meta
                .modified()
                .ok()
                .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                .map(|d| d.as_secs() as i64)
                .unwrap_or(0);
            entries.push(FileEntry {
                url: format!("{url_base}/{name}"),
                name,
                path: entry.path(),
                modified,
                size: meta.len(),
            });
        }
        debug!(game = %self.game_id, category = %category, count = entries.len(), "listed category files");
        Ok(entries)
    }

    /// Deletes every file in a category directory (subdirectories and a
    /// missing directory are left alone).
    pub fn delete_all_files(&self, category: BuildCategory) -> Result<(), FileStoreError> {
        let entries = self.list_files(category)?;
        let count = entries.len();
        for entry in entries {
            std::fs::remove_file(&entry.path)?;
        }
        if count > 0 {
            info!(game = %self.game_id, category = %category, count, "deleted category files");
        }
        Ok(())
    }

    /// Empties a category directory and makes sure it exists afterwards.
    ///
    /// Safe to call repeatedly and on directories that don't exist yet.
    pub fn prepare_empty_dir(&self, category: BuildCategory) -> Result<(), FileStoreError> {
        self.delete_all_files(category)?;
        std::fs::create_dir_all(self.dir_path(category))?;
        Ok(())
    }

    /// Empties the directories of every category in the given set.
    ///
    /// The caller passes the distinct output categories of a build plan
    /// (zip aggregation tasks are not output categories of their own).
    pub fn prepare_build_directories(
        &self,
        categories: &[BuildCategory],
    ) -> Result<(), FileStoreError> {
        for category in categories {
            self.prepare_empty_dir(*category)?;
        }
        Ok(())
    }

    /// Copies every file in `from`'s directory into `to`'s directory,
    /// emptying the destination first.
    ///
    /// Zip artifacts embed the category token in their filename; that token
    /// is rewritten from the source to the destination category so the
    /// copied archive is named for its new home. Fails when the source
    /// directory is missing or holds zero files, and in that case the
    /// destination is left untouched.
    pub fn copy_category_files(
        &self,
        from: BuildCategory,
        to: BuildCategory,
    ) -> Result<usize, FileStoreError> {
        let from_dir = self.dir_path(from);
        if !from_dir.is_dir() {
            return Err(FileStoreError::SourceDirMissing(from_dir));
        }
        let sources = self.list_files(from)?;
        if sources.is_empty() {
            return Err(FileStoreError::SourceDirEmpty(from_dir));
        }

        self.prepare_empty_dir(to)?;
        let to_dir = self.dir_path(to);

        let mut copied = 0usize;
        for entry in sources {
            let mut name = entry.name.clone();
            let is_zip = Path::new(&name)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));
            if is_zip {
                name = name.replace(from.as_str(), to.as_str());
            }
            std::fs::copy(&entry.path, to_dir.join(&name))?;
            copied += 1;
        }
        info!(game = %self.game_id, from = %from, to = %to, copied, "copied category files");
        Ok(copied)
    }
}
