//! Fire-and-forget background jobs with a join point for tests and shutdown.

use std::future::Future;
use std::sync::Mutex;
use tokio::task::JoinSet;

/// Tracks spawned background jobs.
///
/// Jobs never report results to the caller; they log their own failures.
/// `wait_idle` lets tests and shutdown paths wait for everything submitted so
/// far, including jobs submitted while waiting.
#[derive(Default)]
pub struct BackgroundTasks {
    tasks: Mutex<JoinSet<()>>,
}

impl BackgroundTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns `job` on the current runtime.
    pub fn submit<F>(&self, name: &'static str, job: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        match self.tasks.lock() {
            Ok(mut tasks) => {
                // Reap finished jobs so the set does not grow without bound.
                while tasks.try_join_next().is_some() {}
                tasks.spawn(job);
                tracing::debug!(target: "background", "[BackgroundTasks] submitted {}", name);
            }
            Err(poisoned) => {
                tracing::error!(target: "background", "[BackgroundTasks] lock poisoned, dropping {}: {}", name, poisoned);
            }
        }
    }

    /// Number of jobs not yet reaped.
    pub fn pending(&self) -> usize {
        self.tasks.lock().map(|tasks| tasks.len()).unwrap_or(0)
    }

    /// Waits until every submitted job has finished.
    pub async fn wait_idle(&self) {
        loop {
            let mut batch = match self.tasks.lock() {
                Ok(mut tasks) => std::mem::take(&mut *tasks),
                Err(_) => return,
            };
            if batch.is_empty() {
                return;
            }
            while let Some(result) = batch.join_next().await {
                if let Err(e) = result {
                    tracing::warn!(target: "background", "[BackgroundTasks] job failed to complete: {}", e);
                }
            }
        }
    }
}
