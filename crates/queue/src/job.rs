//! Job descriptors and the executor/queue trait seams.

use std::future::Future;
use std::pin::Pin;

use uuid::Uuid;

use storypress_model::BuildMode;

use crate::QueueError;

/// One unit of queued work: build one game in one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildJob {
    pub game_id: Uuid,
    pub mode: BuildMode,
}

/// Identifies a deferred task so the caller can cancel or poll it later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskHandle {
    /// Which queue flavor owns the task ("inline" or "worker").
    pub task_type: String,
    /// Queue-assigned task id.
    pub task_id: String,
}

/// Outcome of submitting a job to a queue.
#[derive(Debug)]
pub enum Enqueued {
    /// The job ran to completion before `enqueue` returned. Carries the
    /// executor's status message.
    Completed(String),
    /// The job was accepted and will run later.
    Deferred(TaskHandle),
}

/// Runs one build job to completion.
///
/// Implementations do their own error handling and persistence; the
/// returned string is a human-readable status for whoever triggered
/// the build.
pub trait JobExecutor: Send + Sync {
    fn execute(&self, job: BuildJob) -> Pin<Box<dyn Future<Output = String> + Send + '_>>;
}

/// Accepts build jobs and tracks cancelation of unfinished ones.
pub trait TaskQueue: Send + Sync {
    /// Submits a job for execution.
    fn enqueue(
        &self,
        job: BuildJob,
    ) -> Pin<Box<dyn Future<Output = Result<Enqueued, QueueError>> + Send + '_>>;

    /// Returns `true` if the task was canceled and has not yet been
    /// discarded by the queue.
    fn is_canceled<'a>(
        &'a self,
        task_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = bool> + Send + 'a>>;

    /// Attempts to cancel a task. A pending task is skipped by the queue;
    /// a running task keeps executing but is marked canceled. Returns
    /// `true` if the cancelation was accepted.
    fn cancel<'a>(&'a self, task_id: &'a str) -> Pin<Box<dyn Future<Output = bool> + Send + 'a>>;
}
