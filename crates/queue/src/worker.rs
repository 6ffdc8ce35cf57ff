//! Background worker execution.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::job::{BuildJob, Enqueued, JobExecutor, TaskHandle, TaskQueue};
use crate::QueueError;

/// Queue flavor token recorded with deferred task handles.
pub const WORKER_TASK_TYPE: &str = "worker";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TaskState {
    Pending,
    Running,
    Canceled,
}

/// Hands jobs to a single background worker task.
///
/// Each job gets a task id at submission. Canceling a pending job makes
/// the worker skip it; canceling a running job marks it canceled but
/// lets the executor run to completion. The worker drops its bookkeeping
/// for a task once it is done with it.
pub struct WorkerQueue {
    tx: mpsc::UnboundedSender<(String, BuildJob)>,
    states: Arc<Mutex<HashMap<String, TaskState>>>,
    cancel: CancellationToken,
}

impl WorkerQueue {
    /// Starts the worker task and returns the queue handle.
    pub fn start(executor: Arc<dyn JobExecutor>) -> Arc<WorkerQueue> {
        let (tx, rx) = mpsc::unbounded_channel();
        let states = Arc::new(Mutex::new(HashMap::new()));
        let cancel = CancellationToken::new();

        tokio::spawn(run_worker(executor, rx, states.clone(), cancel.clone()));

        Arc::new(WorkerQueue { tx, states, cancel })
    }

    /// Stops the worker. Pending jobs are dropped.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Number of tasks still waiting for the worker.
    pub async fn pending_count(&self) -> usize {
        self.states
            .lock()
            .await
            .values()
            .filter(|s| **s == TaskState::Pending)
            .count()
    }
}

async fn run_worker(
    executor: Arc<dyn JobExecutor>,
    mut rx: mpsc::UnboundedReceiver<(String, BuildJob)>,
    states: Arc<Mutex<HashMap<String, TaskState>>>,
    cancel: CancellationToken,
) {
    loop {
        let (task_id, job) = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("build worker shutting down");
                return;
            }
            msg = rx.recv() => match msg {
                Some(msg) => msg,
                None => return,
            },
        };

        {
            let mut lock = states.lock().await;
            match lock.get(&task_id) {
                Some(TaskState::Canceled) => {
                    tracing::info!(task = %task_id, "skipping canceled task");
                    lock.remove(&task_id);
                    continue;
                }
                _ => {
                    lock.insert(task_id.clone(), TaskState::Running);
                }
            }
        }

        tracing::info!(task = %task_id, game = %job.game_id, "worker starting job");
        let message = executor.execute(job).await;
        tracing::info!(task = %task_id, %message, "worker finished job");

        states.lock().await.remove(&task_id);
    }
}

impl TaskQueue for WorkerQueue {
    fn enqueue(
        &self,
        job: BuildJob,
    ) -> Pin<Box<dyn Future<Output = Result<Enqueued, QueueError>> + Send + '_>> {
        Box::pin(async move {
            let task_id = Uuid::new_v4().to_string();
            self.states
                .lock()
                .await
                .insert(task_id.clone(), TaskState::Pending);
            self.tx
                .send((task_id.clone(), job))
                .map_err(|_| QueueError::Closed)?;
            tracing::debug!(task = %task_id, game = %job.game_id, "job queued");
            Ok(Enqueued::Deferred(TaskHandle {
                task_type: WORKER_TASK_TYPE.to_string(),
                task_id,
            }))
        })
    }

    fn is_canceled<'a>(
        &'a self,
        task_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = bool> + Send + 'a>> {
        Box::pin(async move {
            matches!(
                self.states.lock().await.get(task_id),
                Some(TaskState::Canceled)
            )
        })
    }

    fn cancel<'a>(&'a self, task_id: &'a str) -> Pin<Box<dyn Future<Output = bool> + Send + 'a>> {
        Box::pin(async move {
            let mut lock = self.states.lock().await;
            match lock.get(task_id) {
                Some(TaskState::Pending | TaskState::Running) => {
                    lock.insert(task_id.to_string(), TaskState::Canceled);
                    true
                }
                _ => false,
            }
        })
    }
}
