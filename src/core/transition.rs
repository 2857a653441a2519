//! Transition records and the transition table.

use super::label::Label;
use crate::engine::Machine;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// An immutable rule mapping `(from, event)` to `to`, optionally naming
/// an action and carrying a child machine for hierarchical dispatch.
pub struct Transition<S: Label, E: Label, P = ()> {
    pub from: S,
    pub event: E,
    pub action: Option<String>,
    pub to: S,
    pub child: Option<Arc<Machine<S, E, P>>>,
}

impl<S: Label, E: Label, P> Transition<S, E, P> {
    /// Create a transition without an action or child machine.
    pub fn new(from: S, event: E, to: S) -> Self {
        Self {
            from,
            event,
            action: None,
            to,
            child: None,
        }
    }

    /// Check whether this transition answers `(current, event)` (pure)
    pub fn matches(&self, current: &S, event: &E) -> bool {
        self.from == *current && self.event == *event
    }

    /// Self-transitions never run the exit or enter hooks.
    pub fn is_self_transition(&self) -> bool {
        self.from == self.to
    }

    /// The action name, if one is set and non-empty.
    pub fn action_name(&self) -> Option<&str> {
        self.action.as_deref().filter(|name| !name.is_empty())
    }
}

impl<S: Label, E: Label, P> Clone for Transition<S, E, P> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            event: self.event.clone(),
            action: self.action.clone(),
            to: self.to.clone(),
            child: self.child.as_ref().map(Arc::clone),
        }
    }
}

impl<S: Label, E: Label, P> fmt::Debug for Transition<S, E, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("from", &self.from)
            .field("event", &self.event)
            .field("action", &self.action)
            .field("to", &self.to)
            .field("child", &self.child.is_some())
            .finish()
    }
}

/// Ordered list of transitions with a `(from, event)` index.
///
/// Duplicate `(from, event)` pairs are kept in registration order but the
/// index never overwrites an existing entry, so the earliest registered
/// transition always wins and later ones are shadowed.
pub struct TransitionTable<S: Label, E: Label, P = ()> {
    transitions: Vec<Transition<S, E, P>>,
    index: HashMap<S, HashMap<E, usize>>,
}

impl<S: Label, E: Label, P> TransitionTable<S, E, P> {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Append a transition.
    ///
    /// Returns `false` when an earlier transition with the same
    /// `(from, event)` already exists and this one is shadowed.
    pub fn push(&mut self, transition: Transition<S, E, P>) -> bool {
        let position = self.transitions.len();
        let slot = self
            .index
            .entry(transition.from.clone())
            .or_default()
            .entry(transition.event.clone())
            .or_insert(position);
        let active = *slot == position;
        self.transitions.push(transition);
        active
    }

    /// Find the first registered transition for `(from, event)`.
    pub fn find(&self, from: &S, event: &E) -> Option<&Transition<S, E, P>> {
        self.index
            .get(from)
            .and_then(|events| events.get(event))
            .map(|&position| &self.transitions[position])
    }

    /// Transitions in registration order, shadowed ones included.
    pub fn iter(&self) -> impl Iterator<Item = &Transition<S, E, P>> {
        self.transitions.iter()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

impl<S: Label, E: Label, P> Default for TransitionTable<S, E, P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&'static str, &'static str, &'static str)]) -> TransitionTable<&'static str, &'static str> {
        let mut table = TransitionTable::new();
        for &(from, event, to) in entries {
            table.push(Transition::new(from, event, to));
        }
        table
    }

    #[test]
    fn find_matches_from_and_event() {
        let table = table(&[("idle", "start", "running"), ("running", "stop", "idle")]);

        let found = table.find(&"running", &"stop").unwrap();
        assert_eq!(found.to, "idle");
        assert!(found.matches(&"running", &"stop"));
        assert!(!found.matches(&"idle", &"stop"));
        assert!(table.find(&"running", &"start").is_none());
        assert!(table.find(&"paused", &"stop").is_none());
    }

    #[test]
    fn first_registered_transition_wins() {
        let mut table = table(&[("a", "go", "b")]);
        let active = table.push(Transition::new("a", "go", "c"));

        assert!(!active);
        assert_eq!(table.len(), 2);
        for _ in 0..10 {
            assert_eq!(table.find(&"a", &"go").unwrap().to, "b");
        }
    }

    #[test]
    fn iter_preserves_registration_order() {
        let table = table(&[("a", "x", "b"), ("b", "y", "c"), ("a", "x", "c")]);
        let targets: Vec<_> = table.iter().map(|t| t.to).collect();
        assert_eq!(targets, vec!["b", "c", "c"]);
    }

    #[test]
    fn empty_action_name_is_no_action() {
        let mut transition: Transition<&str, &str> = Transition::new("a", "go", "b");
        assert_eq!(transition.action_name(), None);

        transition.action = Some(String::new());
        assert_eq!(transition.action_name(), None);

        transition.action = Some("boot".to_string());
        assert_eq!(transition.action_name(), Some("boot"));
    }

    #[test]
    fn self_transition_detected() {
        let heartbeat: Transition<&str, &str> = Transition::new("running", "ping", "running");
        assert!(heartbeat.is_self_transition());
        assert!(!Transition::<&str, &str>::new("a", "go", "b").is_self_transition());
    }
}
