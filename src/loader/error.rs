//! Loader error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a declarative load. Nothing is partially loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid transition document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Transition document must be a list of triples or an object with transitions, found {0}")]
    InvalidStructure(&'static str),

    #[error("Transition #{index} has {fields} fields, expected at least 3 (from, event, to)")]
    MalformedTransition { index: usize, fields: usize },

    #[error("Transition #{index} has an empty '{field}'")]
    EmptyField { index: usize, field: &'static str },
}
