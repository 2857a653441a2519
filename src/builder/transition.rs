//! Builder for constructing transitions.

use crate::builder::error::BuildError;
use crate::core::{Label, Transition};
use crate::engine::Machine;
use std::sync::Arc;

/// Builder for constructing transitions with a fluent API.
pub struct TransitionBuilder<S: Label, E: Label, P = ()> {
    from: Option<S>,
    event: Option<E>,
    to: Option<S>,
    action: Option<String>,
    child: Option<Arc<Machine<S, E, P>>>,
}

impl<S: Label, E: Label, P> TransitionBuilder<S, E, P> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            from: None,
            event: None,
            to: None,
            action: None,
            child: None,
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: S) -> Self {
        self.from = Some(state);
        self
    }

    /// Set the triggering event (required).
    pub fn on(mut self, event: E) -> Self {
        self.event = Some(event);
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.to = Some(state);
        self
    }

    /// Name the action to run when the transition fires (optional).
    ///
    /// The handler is looked up by name each time the transition fires.
    pub fn action(mut self, name: impl Into<String>) -> Self {
        self.action = Some(name.into());
        self
    }

    /// Attach a child machine entered through this transition (optional).
    pub fn child(mut self, machine: impl Into<Arc<Machine<S, E, P>>>) -> Self {
        self.child = Some(machine.into());
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition<S, E, P>, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let event = self.event.ok_or(BuildError::MissingEvent)?;
        let to = self.to.ok_or(BuildError::MissingToState)?;

        if self.action.as_deref() == Some("") {
            return Err(BuildError::EmptyActionName);
        }

        Ok(Transition {
            from,
            event,
            action: self.action,
            to,
            child: self.child,
        })
    }
}

impl<S: Label, E: Label, P> Default for TransitionBuilder<S, E, P> {
    fn default() -> Self {
        Self::new()
    }
}
