//! Named action handlers and the lifecycle hook signatures.

use super::label::Label;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Opaque error returned by handlers and hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type returned by handlers and hooks.
pub type HookResult = Result<(), BoxError>;

/// Action handler: `(from, event, action, to, payload)`.
pub type ActionFn<S, E, P> = Arc<dyn Fn(&S, &E, &str, &S, &P) -> HookResult + Send + Sync>;

/// Exit hook: `(from, event, payload)`.
pub type ExitFn<S, E, P> = Arc<dyn Fn(&S, &E, &P) -> HookResult + Send + Sync>;

/// Enter hook: `(event, to, payload)`.
pub type EnterFn<S, E, P> = Arc<dyn Fn(&E, &S, &P) -> HookResult + Send + Sync>;

/// Name to handler mapping, resolved when a transition fires.
///
/// Registering a name twice replaces the earlier handler.
pub struct ActionRegistry<S: Label, E: Label, P = ()> {
    actions: HashMap<String, ActionFn<S, E, P>>,
}

impl<S: Label, E: Label, P> ActionRegistry<S, E, P> {
    pub fn new() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }

    /// Register a handler, returning the one it replaced.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        handler: ActionFn<S, E, P>,
    ) -> Option<ActionFn<S, E, P>> {
        self.actions.insert(name.into(), handler)
    }

    pub fn get(&self, name: &str) -> Option<&ActionFn<S, E, P>> {
        self.actions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl<S: Label, E: Label, P> Default for ActionRegistry<S, E, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Label, E: Label, P> fmt::Debug for ActionRegistry<S, E, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.actions.keys().collect();
        names.sort();
        f.debug_struct("ActionRegistry").field("actions", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(tag: &'static str) -> ActionFn<&'static str, &'static str, Vec<&'static str>> {
        Arc::new(move |_: &&str, _: &&str, _: &str, _: &&str, _: &Vec<&str>| -> HookResult {
            Err(tag.into())
        })
    }

    #[test]
    fn last_registration_wins() {
        let mut registry = ActionRegistry::new();
        assert!(registry.register("boot", tagged("first")).is_none());
        assert!(registry.register("boot", tagged("second")).is_some());

        let handler = registry.get("boot").unwrap();
        let err = handler(&"idle", &"start", "boot", &"running", &Vec::new()).unwrap_err();
        assert_eq!(err.to_string(), "second");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn missing_name_is_not_found() {
        let registry: ActionRegistry<&str, &str> = ActionRegistry::new();
        assert!(registry.get("boot").is_none());
        assert!(!registry.contains("boot"));
        assert!(registry.is_empty());
    }
}
