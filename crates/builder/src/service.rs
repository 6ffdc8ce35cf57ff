//! Public build surface: start, cancel, publish, reconcile.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use storypress_file_store::{FileLayout, FileRecord, GameFileStore};
use storypress_model::{
    BuildCategory, BuildMode, BuildResult, Game, GameStore, QueueStatus, StoreError,
};
use storypress_queue::{BuildJob, Enqueued, QueueError, TaskQueue};

/// Errors surfaced by the build service.
///
/// Render failures never appear here; they end up inside the build record.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Fatal: no record is written and no job submitted.
    #[error("build mode not understood: '{0}'")]
    UnknownMode(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error("result record error: {0}")]
    Record(#[from] serde_json::Error),
}

/// Entry point for everything build-related on a game.
///
/// Every method returns a human-readable status string; rendering and
/// cancelation failures are folded into that string rather than raised.
pub struct BuildService {
    store: Arc<dyn GameStore>,
    queue: Arc<dyn TaskQueue>,
    layout: FileLayout,
}

impl BuildService {
    pub fn new(
        store: Arc<dyn GameStore>,
        queue: Arc<dyn TaskQueue>,
        layout: FileLayout,
    ) -> BuildService {
        BuildService {
            store,
            queue,
            layout,
        }
    }

    fn files_for(&self, game_id: Uuid) -> GameFileStore {
        GameFileStore::new(self.layout.clone(), game_id)
    }

    /// Starts a build, superseding any pending one for the same category.
    ///
    /// The queued record is persisted before submission so outside
    /// observers see "queued" even if the job defers. An unrecognized mode
    /// token is fatal: nothing is written, nothing submitted.
    pub async fn start_build(&self, game_id: Uuid, mode: &str) -> Result<String, ServiceError> {
        let mode = BuildMode::parse(mode).ok_or_else(|| ServiceError::UnknownMode(mode.into()))?;
        let category = mode.category();

        let mut game = self.store.load(game_id).await?;
        self.cancel_pending(&mut game, category).await;

        let previous = game.build_results.get(category).cloned();
        game.build_results.set(
            category,
            BuildResult::queued(Utc::now().timestamp(), previous.as_ref()),
        );
        self.store.save(&game).await?;

        let outcome = self.queue.enqueue(BuildJob { game_id, mode }).await?;
        match outcome {
            Enqueued::Completed(result) => {
                info!(game = %game_id, mode = %category, %result, "build ran inline");
                Ok(format!(
                    "Result of {} for game '{}': {}.",
                    mode.describe(),
                    game.name,
                    result
                ))
            }
            Enqueued::Deferred(handle) => {
                // The runner may already be writing records; reload rather
                // than save the copy from before submission.
                let mut game = self.store.load(game_id).await?;
                if let Some(record) = game.build_results.get_mut(category) {
                    if record.queue_status == QueueStatus::Queued {
                        record.task_type = Some(handle.task_type.clone());
                        record.task_id = Some(handle.task_id.clone());
                    }
                }
                self.store.save(&game).await?;
                info!(game = %game_id, mode = %category, task = %handle.task_id, "build queued");
                Ok(format!(
                    "Generation of {} for game '{}' has been queued for delayed build.",
                    mode.describe(),
                    game.name
                ))
            }
        }
    }

    /// Cancels the pending build for one category, if there is one.
    pub async fn cancel_build(
        &self,
        game_id: Uuid,
        category: BuildCategory,
    ) -> Result<String, ServiceError> {
        let mut game = self.store.load(game_id).await?;
        let canceled = self.cancel_pending(&mut game, category).await;
        self.store.save(&game).await?;
        Ok(match canceled {
            Some(message) => message,
            None => "No queued tasks to cancel.".to_string(),
        })
    }

    /// Cancels every pending build across all categories.
    pub async fn cancel_all_pending(&self, game_id: Uuid) -> Result<String, ServiceError> {
        let mut game = self.store.load(game_id).await?;
        let mut canceled = 0usize;
        for category in game.build_results.categories() {
            if self.cancel_pending(&mut game, category).await.is_some() {
                canceled += 1;
            }
        }
        self.store.save(&game).await?;
        Ok(if canceled == 0 {
            "No queued tasks to cancel.".to_string()
        } else {
            format!("Canceled {canceled} queued tasks.")
        })
    }

    /// Attempts to cancel the non-terminal record for a category.
    ///
    /// Returns a status message when a queue-level cancel succeeded, `None`
    /// otherwise. Mutates the record in place; the caller saves.
    ///
    /// Terminal, absent, and already-canceled records are left alone. When
    /// the queue reports the task already finished, only the local
    /// `canceled` flag is set. A successful queue cancel also moves the
    /// status to aborted, unless the job is running, in which case it is
    /// left to write its own terminal state.
    async fn cancel_pending(&self, game: &mut Game, category: BuildCategory) -> Option<String> {
        let record = game.build_results.get_mut(category)?;
        if !record.is_cancelable() {
            return None;
        }
        let task_id = record.task_id.clone()?;
        let task_type = record.task_type.clone().unwrap_or_default();

        if self.queue.is_canceled(&task_id).await {
            record.canceled = true;
            return None;
        }
        if !self.queue.cancel(&task_id).await {
            warn!(game = %game.id, %category, task = %task_id, "queue refused cancel");
            return None;
        }

        record.canceled = true;
        if record.queue_status != QueueStatus::Running {
            record.queue_status = QueueStatus::Aborted;
        }
        info!(game = %game.id, %category, task = %task_id, "canceled queued build");
        Some(format!(
            "Canceling previously queued {task_type} task #{task_id}."
        ))
    }

    /// Promotes the draft build's files to the published category.
    ///
    /// Copy failures (including "nothing to publish") become the publish
    /// result text; they are recorded, never raised. The published
    /// category's record is cloned from the draft's with the publish
    /// outcome merged on top.
    pub async fn publish(&self, game_id: Uuid) -> Result<String, ServiceError> {
        let mut game = self.store.load(game_id).await?;
        let files = self.files_for(game_id);
        let now = Utc::now().timestamp();

        let (result, errored) =
            match files.copy_category_files(BuildCategory::DraftBuild, BuildCategory::Published) {
                Ok(copied) => {
                    info!(game = %game_id, copied, "published draft files");
                    game.publish_date = Some(now);
                    ("Successfully published".to_string(), false)
                }
                Err(e) => {
                    warn!(game = %game_id, error = %e, "publish failed");
                    (format!("ERROR: Failed to copy publish files. Exception = {e}"), true)
                }
            };

        game.build_results.copy_results(
            BuildCategory::Published,
            BuildCategory::DraftBuild,
            &json!({
                "publishResult": result,
                "publishErrored": errored,
                "publishDate": now,
            }),
        )?;
        self.store.save(&game).await?;
        Ok(result)
    }

    /// Two-way sync of upload records against the upload directory.
    pub async fn reconcile_files(
        &self,
        game_id: Uuid,
        records: &mut Vec<FileRecord>,
    ) -> Result<String, ServiceError> {
        // Confirm the game exists before touching records.
        let game = self.store.load(game_id).await?;
        let files = self.files_for(game_id);
        let report = files
            .reconcile(BuildCategory::StoryUpload, records)
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        info!(game = %game.id, added = report.added, removed = report.removed, "reconciled upload records");
        Ok(report.render())
    }

    /// Saves a timestamped snapshot of the game text into the
    /// versioned-text category.
    pub async fn snapshot_versioned_text(&self, game_id: Uuid) -> Result<String, ServiceError> {
        let game = self.store.load(game_id).await?;
        let files = self.files_for(game_id);
        let path = files
            .save_versioned_text(&game.name, &game.version, &game.text)
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        Ok(format!("Saved versioned game text to '{}'.", path.display()))
    }
}
