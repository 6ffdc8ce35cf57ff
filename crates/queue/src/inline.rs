//! Immediate in-process execution.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::job::{BuildJob, Enqueued, JobExecutor, TaskQueue};
use crate::QueueError;

/// Runs every job inline, before `enqueue` returns.
///
/// There is no pending window, so cancelation is always a no-op.
pub struct InlineQueue {
    executor: Arc<dyn JobExecutor>,
}

impl InlineQueue {
    pub fn new(executor: Arc<dyn JobExecutor>) -> InlineQueue {
        InlineQueue { executor }
    }
}

impl TaskQueue for InlineQueue {
    fn enqueue(
        &self,
        job: BuildJob,
    ) -> Pin<Box<dyn Future<Output = Result<Enqueued, QueueError>> + Send + '_>> {
        Box::pin(async move {
            tracing::debug!(game = %job.game_id, mode = ?job.mode, "running job inline");
            let message = self.executor.execute(job).await;
            Ok(Enqueued::Completed(message))
        })
    }

    fn is_canceled<'a>(
        &'a self,
        _task_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = bool> + Send + 'a>> {
        Box::pin(async { false })
    }

    fn cancel<'a>(&'a self, _task_id: &'a str) -> Pin<Box<dyn Future<Output = bool> + Send + 'a>> {
        Box::pin(async { false })
    }
}
