//! Declarative loader for transition tables.
//!
//! Two JSON shapes are accepted:
//!
//! - a list of `[from, event, to]` triples, with an optional fourth field
//!   naming the action;
//! - an object `{"name": ..., "transitions": [{"from", "event", "to",
//!   "action", "child"}]}` where `child` is a nested object of the same
//!   shape. Capitalized keys (`Name`, `From`, ...) are accepted too.
//!
//! Loading is all-or-nothing: the first malformed entry aborts it. The
//! result is a [`MachineBuilder`] so actions, hooks and the error sink can
//! be registered before building.
//!
//! ```rust
//! let builder = statem::loader::from_str::<()>(r#"[["idle", "start", "running", "boot"]]"#).unwrap();
//! let machine = builder.build();
//! assert_eq!(machine.find(&"idle".to_string(), &"start".to_string()).unwrap().to, "running");
//! ```

mod error;

pub use error::LoadError;

use crate::builder::MachineBuilder;
use crate::core::Transition;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Builder produced by the loader.
pub type LoadedBuilder<P> = MachineBuilder<String, String, P>;

#[derive(Debug, Deserialize)]
struct MachineDoc {
    #[serde(default, alias = "Name")]
    name: Option<String>,
    #[serde(alias = "Transitions")]
    transitions: Vec<TransitionDoc>,
}

#[derive(Debug, Deserialize)]
struct TransitionDoc {
    #[serde(alias = "From")]
    from: String,
    #[serde(alias = "Event")]
    event: String,
    #[serde(default, alias = "Action")]
    action: Option<String>,
    #[serde(alias = "To")]
    to: String,
    #[serde(default, alias = "Child")]
    child: Option<MachineDoc>,
}

/// Load from JSON bytes.
pub fn from_json<P>(bytes: &[u8]) -> Result<LoadedBuilder<P>, LoadError> {
    from_json_with(bytes, &|builder| builder)
}

/// Load from JSON text.
pub fn from_str<P>(text: &str) -> Result<LoadedBuilder<P>, LoadError> {
    from_json(text.as_bytes())
}

/// Load from a JSON file.
pub fn from_file<P>(path: impl AsRef<Path>) -> Result<LoadedBuilder<P>, LoadError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_json(&bytes)
}

/// Load from JSON bytes, passing every child machine's builder through
/// `configure` before it is built.
///
/// Child machines are built inside the loader, so this is where their
/// actions and hooks get registered. The returned top-level builder is
/// not passed through `configure`.
pub fn from_json_with<P>(
    bytes: &[u8],
    configure: &dyn Fn(LoadedBuilder<P>) -> LoadedBuilder<P>,
) -> Result<LoadedBuilder<P>, LoadError> {
    let document: Value = serde_json::from_slice(bytes)?;
    match document {
        Value::Array(entries) => from_triples(entries),
        Value::Object(_) => {
            let doc: MachineDoc = serde_json::from_value(document)?;
            from_doc(doc, configure)
        }
        Value::Null => Err(LoadError::InvalidStructure("null")),
        Value::Bool(_) => Err(LoadError::InvalidStructure("a boolean")),
        Value::Number(_) => Err(LoadError::InvalidStructure("a number")),
        Value::String(_) => Err(LoadError::InvalidStructure("a string")),
    }
}

fn required(value: &str, index: usize, field: &'static str) -> Result<String, LoadError> {
    if value.is_empty() {
        return Err(LoadError::EmptyField { index, field });
    }
    Ok(value.to_string())
}

fn from_triples<P>(entries: Vec<Value>) -> Result<LoadedBuilder<P>, LoadError> {
    let mut builder = MachineBuilder::new();
    for (index, entry) in entries.into_iter().enumerate() {
        let fields: Vec<String> = serde_json::from_value(entry)?;
        if fields.len() < 3 {
            return Err(LoadError::MalformedTransition {
                index,
                fields: fields.len(),
            });
        }

        let mut transition = Transition::new(
            required(&fields[0], index, "from")?,
            required(&fields[1], index, "event")?,
            required(&fields[2], index, "to")?,
        );
        transition.action = fields.get(3).filter(|a| !a.is_empty()).cloned();
        builder = builder.add_transition(transition);
    }
    Ok(builder)
}

fn from_doc<P>(
    doc: MachineDoc,
    configure: &dyn Fn(LoadedBuilder<P>) -> LoadedBuilder<P>,
) -> Result<LoadedBuilder<P>, LoadError> {
    let mut builder = MachineBuilder::new();
    if let Some(name) = doc.name {
        debug!(machine = %name, transitions = doc.transitions.len(), "loading machine");
        builder = builder.named(name);
    }

    for (index, spec) in doc.transitions.into_iter().enumerate() {
        let mut transition = Transition::new(
            required(&spec.from, index, "from")?,
            required(&spec.event, index, "event")?,
            required(&spec.to, index, "to")?,
        );
        transition.action = spec.action.filter(|a| !a.is_empty());
        if let Some(child) = spec.child {
            let child = configure(from_doc(child, configure)?).build();
            transition.child = Some(Arc::new(child));
        }
        builder = builder.add_transition(transition);
    }
    Ok(builder)
}
