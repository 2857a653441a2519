//! Build errors for machine and transition builders.

use crate::pool::PoolError;
use thiserror::Error;

/// Errors that can occur when building machines and transitions.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Transition source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Transition event not specified. Call .on(event)")]
    MissingEvent,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingToState,

    #[error("Action name must not be empty. Omit .action() for a transition without one")]
    EmptyActionName,

    #[error("Invalid pool configuration: {0}")]
    InvalidPoolConfig(String),

    #[error("Worker pool failed to start: {0}")]
    PoolStart(#[from] PoolError),
}
