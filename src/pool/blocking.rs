//! Default pool: a tokio runtime's blocking threads behind a semaphore.

use super::{PoolConfig, PoolError, Task, WorkerPool};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::runtime::{Builder, Runtime};
use tokio::sync::Semaphore;
use tracing::info;

/// Bounded pool running each task on a blocking worker thread.
///
/// Admission is decided by a semaphore with `max_workers` permits taken
/// with `try_acquire`, so a full pool refuses work instead of queueing it.
/// Idle threads are reclaimed after `max_idle`.
pub struct BlockingPool {
    config: PoolConfig,
    capacity: usize,
    permits: Arc<Semaphore>,
    runtime: RwLock<Option<Runtime>>,
}

impl BlockingPool {
    /// Create a stopped pool. An unusable `config` is reported by `start`.
    pub fn new(config: PoolConfig) -> Self {
        let capacity = config.max_workers.min(Semaphore::MAX_PERMITS);
        Self {
            config,
            capacity,
            permits: Arc::new(Semaphore::new(capacity)),
            runtime: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Number of tasks currently running.
    pub fn in_flight(&self) -> usize {
        self.capacity - self.permits.available_permits()
    }

    pub fn is_running(&self) -> bool {
        self.runtime
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl WorkerPool for BlockingPool {
    fn start(&self) -> Result<(), PoolError> {
        if let Some(reason) = self.config.problem() {
            return Err(PoolError::InvalidConfig(reason));
        }

        let mut runtime = self.runtime.write().unwrap_or_else(PoisonError::into_inner);
        if runtime.is_some() {
            return Ok(());
        }

        *runtime = Some(
            Builder::new_multi_thread()
                .worker_threads(1)
                .max_blocking_threads(self.config.max_workers)
                .thread_keep_alive(self.config.max_idle())
                .thread_name("statem-worker")
                .build()?,
        );
        info!(
            max_workers = self.config.max_workers,
            max_idle_secs = self.config.max_idle_secs,
            "worker pool started"
        );
        Ok(())
    }

    fn stop(&self) {
        let runtime = self
            .runtime
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(runtime) = runtime {
            runtime.shutdown_background();
            info!("worker pool stopped");
        }
    }

    fn submit(&self, task: Task) -> bool {
        let runtime = self.runtime.read().unwrap_or_else(PoisonError::into_inner);
        let Some(runtime) = runtime.as_ref() else {
            return false;
        };
        let Ok(permit) = Arc::clone(&self.permits).try_acquire_owned() else {
            return false;
        };

        runtime.spawn_blocking(move || {
            let _permit = permit;
            task();
        });
        true
    }
}

impl Drop for BlockingPool {
    fn drop(&mut self) {
        self.stop();
    }
}
