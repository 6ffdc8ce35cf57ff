//! Two-way sync between stored file records and the files on disk.
//!
//! Authors sometimes drop files straight into a game's upload directory (or
//! delete them) outside the app; reconciliation brings the stored records
//! back in line in both directions.

use serde::{Deserialize, Serialize};
use tracing::info;

use storypress_model::BuildCategory;

use crate::store::GameFileStore;
use crate::FileStoreError;

/// A persisted pointer to one file in a category directory.
///
/// The path is relative to the media root (`games/<id>/<category>/<name>`)
/// so records stay valid when the media root moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub relative_path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub note: String,
}

impl FileRecord {
    pub fn new(relative_path: impl Into<String>) -> FileRecord {
        FileRecord {
            relative_path: relative_path.into(),
            note: String::new(),
        }
    }
}

/// What a reconciliation pass found and changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileReport {
    pub found: usize,
    pub added: usize,
    pub removed: usize,
    pub messages: Vec<String>,
}

impl ReconcileReport {
    /// The user-facing multi-line summary.
    pub fn render(&self) -> String {
        self.messages.join("\n")
    }
}

impl GameFileStore {
    /// Reconciles stored records for one category against the directory.
    ///
    /// Records whose file vanished from disk are dropped; files on disk
    /// with no record get one. Tolerates files placed there by hand while
    /// a build is not running.
    pub fn reconcile(
        &self,
        category: BuildCategory,
        records: &mut Vec<FileRecord>,
    ) -> Result<ReconcileReport, FileStoreError> {
        let mut report = ReconcileReport::default();

        let on_disk = self.list_files(category)?;
        report.found = on_disk.len();
        report
            .messages
            .push(format!("Found {} files in game {} directory.", on_disk.len(), category));

        // Step 1: drop records whose file no longer exists.
        records.retain(|record| {
            let absolute = self.media_root().join(&record.relative_path);
            if absolute.exists() {
                true
            } else {
                report
                    .messages
                    .push(format!("Removed record for missing file '{}'.", record.relative_path));
                report.removed += 1;
                false
            }
        });

        // Step 2: add records for files nobody is tracking.
        let subdir = self.media_subdir(category);
        for entry in &on_disk {
            let relative = subdir.join(&entry.name).to_string_lossy().into_owned();
            if records.iter().any(|r| r.relative_path == relative) {
                continue;
            }
            report
                .messages
                .push(format!("Added record for found file '{}'.", relative));
            records.push(FileRecord::new(relative));
            report.added += 1;
        }

        report.messages.push(format!(
            "Added {} found files, and removed {} missing files.",
            report.added, report.removed
        ));
        info!(
            game = %self.game_id(),
            category = %category,
            added = report.added,
            removed = report.removed,
            "reconciled file records"
        );
        Ok(report)
    }
}
