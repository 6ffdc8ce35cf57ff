//! Timestamped snapshots of the game text.

use std::path::PathBuf;

use chrono::Local;
use tracing::info;

use storypress_model::BuildCategory;

use crate::store::GameFileStore;
use crate::FileStoreError;

impl GameFileStore {
    /// Writes the current game text into the versioned-text category as
    /// `{name}_gameText_v{version}_{YYYYMMDD_HHMMSS}.txt`.
    ///
    /// Returns the path of the written snapshot.
    pub fn save_versioned_text(
        &self,
        game_name: &str,
        version: &str,
        text: &str,
    ) -> Result<PathBuf, FileStoreError> {
        let dir = self.dir_path(BuildCategory::VersionedText);
        std::fs::create_dir_all(&dir)?;

        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let file_name = safe_filename(&format!("{game_name}_gameText_v{version}_{stamp}"));
        let path = dir.join(format!("{file_name}.txt"));
        std::fs::write(&path, text)?;
        info!(game = %self.game_id(), path = %path.display(), "saved versioned game text");
        Ok(path)
    }
}

/// Replaces characters unsafe for filenames with underscores.
fn safe_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
