//! Executes one queued build job end to end.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use storypress_build_plan::{expand, PlanRequest};
use storypress_file_store::{FileLayout, GameFileStore};
use storypress_model::{BuildResult, GameStore, QueueStatus, StoreError};
use storypress_queue::{BuildJob, JobExecutor};

use crate::renderer::{Renderer, RenderReport};

/// Runs build jobs: expands the plan, drives the renderer, and records the
/// terminal result.
///
/// A runner is shared between the queue (which executes jobs through it)
/// and the [`BuildService`](crate::BuildService) that submits them.
pub struct JobRunner {
    store: Arc<dyn GameStore>,
    renderer: Arc<dyn Renderer>,
    layout: FileLayout,
}

impl JobRunner {
    pub fn new(
        store: Arc<dyn GameStore>,
        renderer: Arc<dyn Renderer>,
        layout: FileLayout,
    ) -> JobRunner {
        JobRunner {
            store,
            renderer,
            layout,
        }
    }

    /// Runs one job to its terminal state.
    ///
    /// Renderer failures are recoverable: they are folded into the build
    /// log and recorded as an errored terminal result. Only persistence
    /// failures propagate, since without the store there is nowhere to
    /// record anything.
    async fn run_job(&self, job: BuildJob) -> Result<String, StoreError> {
        let started = Utc::now().timestamp();
        let category = job.mode.category();

        let mut game = self.store.load(job.game_id).await?;
        info!(game = %job.game_id, mode = %category, "build job starting");

        let previous = game.build_results.get(category).cloned();
        let queued_at = previous
            .as_ref()
            .map(|r| r.build_date_queued)
            .filter(|t| *t > 0)
            .unwrap_or(started);

        // Mark running right away; the build may take minutes and outside
        // observers watch this record.
        game.build_results
            .set(category, BuildResult::running(queued_at, previous.as_ref()));
        self.store.save(&game).await?;

        // Snapshot everything the terminal record needs, since the entity
        // is reloaded fresh before the final write.
        let game_name = game.game_name.clone();
        let text = game.text.clone();
        let text_hash = game.text_hash.clone();
        let build_version = game.version.clone();
        let build_version_date = game.version_date.clone();

        let request = PlanRequest {
            game_name: &game_name,
            paper_size: game.preferred_paper_size,
            layout: game.preferred_layout,
        };
        let tasks = expand(&request, job.mode);

        let files = GameFileStore::new(self.layout.clone(), job.game_id);
        let mut categories: Vec<_> = tasks
            .iter()
            .filter(|t| !t.is_zip())
            .map(|t| t.category())
            .collect();
        categories.dedup();

        let mut build_log = format!("Building: '{category}'...\n");
        let mut errored = false;
        let mut report = RenderReport::default();

        match files.prepare_build_directories(&categories) {
            Ok(()) => match self.renderer.run_build_list(&text, &tasks, &files).await {
                Ok(r) => report = r,
                Err(e) => {
                    build_log
                        .push_str(&format!("ERROR: Exception while building storybook. Exception = {e}"));
                    errored = true;
                }
            },
            Err(e) => {
                build_log
                    .push_str(&format!("ERROR: Failed preparing build directories. Exception = {e}"));
                errored = true;
            }
        }
        errored = errored || report.errored;

        if !report.generated_files.is_empty() {
            build_log.push_str("\n\n-----\n\n");
            build_log.push_str("Generated file list:\n");
            build_log.push_str(&report.generated_files.join("\n"));
        }
        if !report.build_log.is_empty() {
            build_log.push_str("\n\n-----\n\n");
            build_log.push_str("Renderer build log:\n");
            build_log.push_str(&report.build_log);
        }

        let ended = Utc::now().timestamp();
        build_log.push_str(&format!("\nActual build time: {}.", nice_elapsed(ended - started)));
        build_log.push_str(&format!("\nBuild wait time: {}.", nice_elapsed(started - queued_at)));

        // Fresh reload before the final write, so edits made while the
        // build ran are not clobbered. A weak mitigation, not a lock.
        let mut game = self.store.load(job.game_id).await?;
        game.build_results.set(
            category,
            BuildResult {
                queue_status: if errored {
                    QueueStatus::Errored
                } else {
                    QueueStatus::Completed
                },
                build_date_queued: queued_at,
                build_date_start: started,
                build_date_end: ended,
                build_version,
                build_version_date,
                build_text_hash: text_hash,
                build_error: errored,
                build_log,
                ..BuildResult::default()
            },
        );

        let outcome = if errored {
            "Errors during build"
        } else {
            game.lead_stats = report.lead_stats.clone();
            "Build was successful"
        };
        self.store.save(&game).await?;
        info!(game = %job.game_id, mode = %category, outcome, "build job finished");
        Ok(outcome.to_string())
    }
}

impl JobExecutor for JobRunner {
    fn execute(&self, job: BuildJob) -> Pin<Box<dyn Future<Output = String> + Send + '_>> {
        Box::pin(async move {
            match self.run_job(job).await {
                Ok(message) => message,
                Err(e) => {
                    error!(game = %job.game_id, error = %e, "build job could not record results");
                    format!("ERROR: {e}")
                }
            }
        })
    }
}

/// "N secs" under a minute, "M mins, N secs" above.
fn nice_elapsed(secs: i64) -> String {
    let secs = secs.max(0);
    if secs < 60 {
        format!("{secs} secs")
    } else {
        format!("{} mins, {} secs", secs / 60, secs % 60)
    }
}
