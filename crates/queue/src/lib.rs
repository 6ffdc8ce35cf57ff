//! Task queues for build execution.
//!
//! A [`BuildJob`] names a game and a build mode; a [`JobExecutor`] knows
//! how to run one. The two queue flavors differ in when execution happens:
//! [`InlineQueue`] runs the job before `enqueue` returns (useful for tests
//! and single-user deployments), [`WorkerQueue`] hands it to a background
//! worker and returns a [`TaskHandle`] the caller can cancel with while
//! the job is still pending.

mod inline;
mod job;
mod worker;

pub use inline::InlineQueue;
pub use job::{BuildJob, Enqueued, JobExecutor, TaskHandle, TaskQueue};
pub use worker::WorkerQueue;

/// Errors from queue operations.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    /// The worker has shut down and no longer accepts jobs.
    #[error("queue is closed")]
    Closed,
}
