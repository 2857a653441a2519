//! Worker pool contract used by the asynchronous engine.
//!
//! The engine only needs three things from a pool: start it, stop it, and
//! hand it a task without waiting. `submit` must never block or queue; a
//! pool with no free worker refuses the task and the engine reports the
//! refusal as saturation.

mod blocking;
mod config;

pub use blocking::BlockingPool;
pub use config::PoolConfig;

use thiserror::Error;

/// A unit of work handed to a pool.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Errors raised while starting a pool.
#[derive(Debug, Error)]
pub enum PoolError {
    #[error("Failed to build worker runtime: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("Invalid pool configuration: {0}")]
    InvalidConfig(String),
}

/// Bounded, non-blocking worker pool.
pub trait WorkerPool: Send + Sync {
    /// Make the pool ready to accept tasks. Starting twice is a no-op.
    fn start(&self) -> Result<(), PoolError>;

    /// Stop accepting tasks. Tasks already running finish on their own.
    fn stop(&self);

    /// Hand `task` to an idle worker.
    ///
    /// Returns `false` when no worker is free (or the pool is stopped);
    /// the task is dropped without running.
    fn submit(&self, task: Task) -> bool;
}
