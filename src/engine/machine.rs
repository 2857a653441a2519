//! Synchronous machine: resolves and fires events on the caller's thread.

use super::dispatch::{Lifecycle, MissingActionPolicy};
use super::error::FsmError;
use crate::core::{Label, Transition, TransitionTable};
use crate::graph::{self, Edge, RenderError};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// A stateless rule evaluator.
///
/// The machine never stores an entity's current state. Callers pass the
/// state they persisted on every call and record the new state themselves
/// once `event` succeeds, so one machine can serve any number of entities
/// concurrently. It has no mutating methods: everything is configured
/// through [`MachineBuilder`](crate::builder::MachineBuilder) before the
/// machine exists.
pub struct Machine<S: Label, E: Label, P = ()> {
    pub(crate) name: Option<String>,
    pub(crate) table: TransitionTable<S, E, P>,
    pub(crate) lifecycle: Lifecycle<S, E, P>,
}

impl<S: Label, E: Label, P> Machine<S, E, P> {
    /// Fire `event` for an entity currently in `current`.
    ///
    /// Runs inline and blocks for as long as the hooks and action take.
    /// Returns `FsmError::NoTransition` without invoking anything when no
    /// transition matches, otherwise the first hook or action error.
    pub fn event(&self, current: &S, event: &E, payload: &P) -> Result<(), FsmError> {
        let transition = self.table.find(current, event).ok_or_else(|| {
            debug!(state = current.name(), event = event.name(), "no transition");
            FsmError::NoTransition {
                event: event.name().to_string(),
                state: current.name().to_string(),
            }
        })?;
        self.lifecycle.fire(transition, payload)
    }

    /// Fire `event` for an entity whose state path is `path`, outermost first.
    ///
    /// When the outermost state has a child machine and the path goes
    /// deeper, the child gets the event first with the rest of the path.
    /// Only a `NoTransition` from the child falls back to this machine's
    /// own table.
    pub fn event_nested(&self, path: &[S], event: &E, payload: &P) -> Result<(), FsmError> {
        let Some((current, inner)) = path.split_first() else {
            return Err(FsmError::NoTransition {
                event: event.name().to_string(),
                state: String::new(),
            });
        };

        if !inner.is_empty() {
            if let Some(child) = self.child(current) {
                match child.event_nested(inner, event, payload) {
                    Err(FsmError::NoTransition { .. }) => {
                        debug!(
                            state = current.name(),
                            event = event.name(),
                            "child machine has no transition, falling back to parent"
                        );
                    }
                    handled => return handled,
                }
            }
        }

        self.event(current, event, payload)
    }

    /// Child machine of the first transition into `state` that carries one.
    ///
    /// Transitions entering `state` without a child are skipped.
    pub fn child(&self, state: &S) -> Option<&Machine<S, E, P>> {
        self.table
            .iter()
            .find(|t| t.to == *state && t.child.is_some())
            .and_then(|t| t.child.as_deref())
    }

    /// The transition `event` would fire from `current`, if any (pure).
    pub fn find(&self, current: &S, event: &E) -> Option<&Transition<S, E, P>> {
        self.table.find(current, event)
    }

    /// Check whether `event` has a transition from `current` (pure)
    pub fn can_fire(&self, current: &S, event: &E) -> bool {
        self.find(current, event).is_some()
    }

    /// Transitions in registration order.
    pub fn transitions(&self) -> impl Iterator<Item = &Transition<S, E, P>> {
        self.table.iter()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn missing_action_policy(&self) -> MissingActionPolicy {
        self.lifecycle.missing_action
    }

    /// Edge list for graph tooling, one edge per transition in order.
    pub fn edges(&self) -> Vec<Edge> {
        self.table.iter().map(Edge::from_transition).collect()
    }

    /// Graphviz DOT description of the transition table.
    pub fn to_dot(&self) -> String {
        graph::to_dot(&self.edges())
    }

    /// Render the table to PNG with the external `dot` tool.
    pub fn export_png(&self, outfile: impl AsRef<Path>) -> Result<(), RenderError> {
        graph::render(&self.to_dot(), outfile, "png")
    }

    /// Render the table to JPG with the external `dot` tool.
    pub fn export_jpg(&self, outfile: impl AsRef<Path>) -> Result<(), RenderError> {
        graph::render(&self.to_dot(), outfile, "jpg")
    }
}

impl<S: Label, E: Label, P> fmt::Debug for Machine<S, E, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("name", &self.name)
            .field("transitions", &self.table.len())
            .field("actions", &self.lifecycle.actions)
            .field("missing_action", &self.lifecycle.missing_action)
            .finish()
    }
}
