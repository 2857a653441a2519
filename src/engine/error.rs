//! Dispatch errors.

use crate::core::BoxError;
use std::fmt;
use thiserror::Error;

/// Which lifecycle step produced a handler failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hook {
    Exit,
    Action(String),
    Enter,
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exit => f.write_str("exit hook"),
            Self::Action(name) => write!(f, "action '{name}'"),
            Self::Enter => f.write_str("enter hook"),
        }
    }
}

/// Errors that can occur while firing an event
#[derive(Debug, Error)]
pub enum FsmError {
    #[error("No transition for event '{event}' in state '{state}'")]
    NoTransition { event: String, state: String },

    #[error("{hook} failed: {source}")]
    HandlerFailed {
        hook: Hook,
        #[source]
        source: BoxError,
    },

    #[error("Action '{action}' is not registered")]
    UnknownAction { action: String },

    #[error("Worker pool saturated, rejected event '{event}' in state '{state}'")]
    Saturation { event: String, state: String },
}

impl FsmError {
    pub fn is_no_transition(&self) -> bool {
        matches!(self, Self::NoTransition { .. })
    }

    pub fn is_saturation(&self) -> bool {
        matches!(self, Self::Saturation { .. })
    }

    /// The handler's own error, if this is a handler failure.
    pub fn handler_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::HandlerFailed { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
