//! Edge-list export for graph tooling.
//!
//! Generating the edge list and the DOT text is deterministic and follows
//! registration order. Turning that text into an image is left to the
//! external Graphviz `dot` binary, which may be missing; rendering is
//! optional and never touches dispatch.

use crate::core::{Label, Transition};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;
use tracing::debug;

/// One transition as seen by a graph renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    /// `event`, or `event | action` when the transition names an action
    pub label: String,
}

impl Edge {
    pub fn from_transition<S: Label, E: Label, P>(transition: &Transition<S, E, P>) -> Self {
        let label = match transition.action_name() {
            Some(action) => format!("{} | {}", transition.event.name(), action),
            None => transition.event.name().to_string(),
        };
        Self {
            from: transition.from.name().to_string(),
            to: transition.to.name().to_string(),
            label,
        }
    }
}

/// Errors from the external renderer.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to run dot: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("Failed to write graph to dot: {0}")]
    Io(#[source] std::io::Error),

    #[error("dot exited with {0}")]
    Failed(ExitStatus),
}

fn quoted(text: &str) -> String {
    let escaped = text.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

/// Graphviz DOT text for `edges`, in the order given.
pub fn to_dot(edges: &[Edge]) -> String {
    let mut dot = String::from(
        "digraph StateMachine {\n    rankdir=LR\n    node[width=1 fixedsize=false shape=ellipse style=filled fillcolor=\"darkorchid1\"]\n",
    );
    for edge in edges {
        dot.push_str(&format!(
            "    {} -> {} [label={}]\n",
            quoted(&edge.from),
            quoted(&edge.to),
            quoted(&edge.label)
        ));
    }
    dot.push_str("}\n");
    dot
}

fn with_extension(outfile: &Path, format: &str) -> PathBuf {
    if outfile.extension().is_some_and(|ext| ext == format) {
        outfile.to_path_buf()
    } else {
        let mut name = outfile.as_os_str().to_owned();
        name.push(".");
        name.push(format);
        PathBuf::from(name)
    }
}

/// Render `dot` text to `outfile` with `dot -T<format>`.
///
/// `.<format>` is appended to `outfile` when it is missing.
pub fn render(dot: &str, outfile: impl AsRef<Path>, format: &str) -> Result<(), RenderError> {
    let outfile = with_extension(outfile.as_ref(), format);
    debug!(outfile = %outfile.display(), format, "rendering state graph");

    let mut child = Command::new("dot")
        .arg(format!("-T{format}"))
        .arg("-o")
        .arg(&outfile)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .spawn()
        .map_err(RenderError::Spawn)?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(dot.as_bytes()).map_err(RenderError::Io)?;
    }

    let status = child.wait().map_err(RenderError::Io)?;
    if !status.success() {
        return Err(RenderError::Failed(status));
    }
    Ok(())
}
