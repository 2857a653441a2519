//! Builder for constructing machines.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::{ActionRegistry, HookResult, Label, Transition, TransitionTable};
use crate::engine::{AsyncMachine, ErrorSink, Failure, Lifecycle, Machine, MissingActionPolicy};
use crate::pool::{BlockingPool, PoolConfig, WorkerPool};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Builder for constructing machines with a fluent API.
///
/// Configuration only happens here. `build()` consumes the builder, and the
/// machine it returns cannot be changed afterwards, so sharing it across
/// threads needs no locking.
pub struct MachineBuilder<S: Label, E: Label, P = ()> {
    name: Option<String>,
    table: TransitionTable<S, E, P>,
    lifecycle: Lifecycle<S, E, P>,
    sink: Option<ErrorSink<S, E, P>>,
}

impl<S: Label, E: Label, P> MachineBuilder<S, E, P> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            name: None,
            table: TransitionTable::new(),
            lifecycle: Lifecycle {
                actions: ActionRegistry::new(),
                on_exit: None,
                on_enter: None,
                missing_action: MissingActionPolicy::default(),
            },
            sink: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a transition without an action.
    pub fn transition(self, from: S, event: E, to: S) -> Self {
        self.add_transition(Transition::new(from, event, to))
    }

    /// Add a transition that runs the action registered under `action`.
    pub fn transition_with_action(self, from: S, event: E, action: impl Into<String>, to: S) -> Self {
        let mut transition = Transition::new(from, event, to);
        transition.action = Some(action.into());
        self.add_transition(transition)
    }

    /// Add a transition whose target state owns a child machine.
    pub fn with_child(self, from: S, event: E, to: S, child: Machine<S, E, P>) -> Self {
        let mut transition = Transition::new(from, event, to);
        transition.child = Some(Arc::new(child));
        self.add_transition(transition)
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn try_transition(self, builder: TransitionBuilder<S, E, P>) -> Result<Self, BuildError> {
        Ok(self.add_transition(builder.build()?))
    }

    /// Add a pre-built transition.
    ///
    /// A transition whose `(from, event)` was already registered is kept
    /// for graph export but never fires.
    pub fn add_transition(mut self, transition: Transition<S, E, P>) -> Self {
        let (from, event) = (transition.from.clone(), transition.event.clone());
        if !self.table.push(transition) {
            debug!(
                from = from.name(),
                event = event.name(),
                "transition shadowed by an earlier registration"
            );
        }
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(self, transitions: impl IntoIterator<Item = Transition<S, E, P>>) -> Self {
        transitions
            .into_iter()
            .fold(self, |builder, transition| builder.add_transition(transition))
    }

    /// Register an action handler. A later registration under the same
    /// name replaces the earlier one.
    pub fn action<F>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&S, &E, &str, &S, &P) -> HookResult + Send + Sync + 'static,
    {
        self.lifecycle.actions.register(name, Arc::new(handler));
        self
    }

    /// Set the hook run when leaving a state on a real state change.
    pub fn on_exit<F>(mut self, hook: F) -> Self
    where
        F: Fn(&S, &E, &P) -> HookResult + Send + Sync + 'static,
    {
        self.lifecycle.on_exit = Some(Arc::new(hook));
        self
    }

    /// Set the hook run when entering a state on a real state change.
    pub fn on_enter<F>(mut self, hook: F) -> Self
    where
        F: Fn(&E, &S, &P) -> HookResult + Send + Sync + 'static,
    {
        self.lifecycle.on_enter = Some(Arc::new(hook));
        self
    }

    /// Choose what happens when a named action is not registered.
    pub fn missing_action(mut self, policy: MissingActionPolicy) -> Self {
        self.lifecycle.missing_action = policy;
        self
    }

    /// Set the sink that receives failures from asynchronous dispatch.
    ///
    /// Without a sink those failures are dropped. Ignored by `build()`.
    pub fn on_error<F>(mut self, sink: F) -> Self
    where
        F: Fn(Failure<S, E, P>) + Send + Sync + 'static,
    {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Build the synchronous machine.
    pub fn build(self) -> Machine<S, E, P> {
        Machine {
            name: self.name,
            table: self.table,
            lifecycle: self.lifecycle,
        }
    }

    /// Build an asynchronous machine on a [`BlockingPool`] sized by `config`.
    pub fn build_async(self, config: PoolConfig) -> Result<AsyncMachine<S, E, P>, BuildError>
    where
        P: Send + Sync + 'static,
    {
        config.validate()?;
        self.build_async_with(Arc::new(BlockingPool::new(config)))
    }

    /// Build an asynchronous machine on any worker pool. The pool is started here.
    pub fn build_async_with(
        mut self,
        pool: Arc<dyn WorkerPool>,
    ) -> Result<AsyncMachine<S, E, P>, BuildError>
    where
        P: Send + Sync + 'static,
    {
        pool.start()?;
        let sink = self.sink.take();
        Ok(AsyncMachine::new(self.build(), pool, sink))
    }
}

impl<S: Label, E: Label, P> fmt::Debug for MachineBuilder<S, E, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MachineBuilder")
            .field("name", &self.name)
            .field("transitions", &self.table.len())
            .field("actions", &self.lifecycle.actions)
            .field("missing_action", &self.lifecycle.missing_action)
            .finish()
    }
}

impl<S: Label, E: Label, P> Default for MachineBuilder<S, E, P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_registration_order() {
        let machine = MachineBuilder::<&str, &str>::new()
            .transition("a", "go", "b")
            .transition("b", "go", "c")
            .transition("a", "go", "c")
            .build();

        let order: Vec<_> = machine.transitions().map(|t| (t.from, t.to)).collect();
        assert_eq!(order, vec![("a", "b"), ("b", "c"), ("a", "c")]);
        assert_eq!(machine.find(&"a", &"go").unwrap().to, "b");
    }

    #[test]
    fn try_transition_propagates_validation() {
        let result = MachineBuilder::<&str, &str>::new()
            .try_transition(TransitionBuilder::new().from("a").to("b"));

        assert!(matches!(result, Err(BuildError::MissingEvent)));
    }

    #[test]
    fn later_action_registration_replaces_earlier() {
        let machine = MachineBuilder::<&str, &str>::new()
            .transition_with_action("a", "go", "work", "b")
            .action("work", |_, _, _, _, _| Err("old handler".into()))
            .action("work", |_, _, _, _, _| Ok(()))
            .build();

        assert!(machine.event(&"a", &"go", &()).is_ok());
    }

    #[test]
    fn missing_action_policy_is_configurable() {
        let machine = MachineBuilder::<&str, &str>::new()
            .transition_with_action("a", "go", "work", "b")
            .missing_action(MissingActionPolicy::Fail)
            .build();

        assert_eq!(machine.missing_action_policy(), MissingActionPolicy::Fail);
        assert!(matches!(
            machine.event(&"a", &"go", &()),
            Err(crate::engine::FsmError::UnknownAction { .. })
        ));
    }

    #[test]
    fn build_async_rejects_zero_workers() {
        let result = MachineBuilder::<&str, &str>::new()
            .transition("a", "go", "b")
            .build_async(PoolConfig {
                max_workers: 0,
                ..PoolConfig::default()
            });

        assert!(matches!(result, Err(BuildError::InvalidPoolConfig(_))));
    }

    #[test]
    fn build_async_rejects_worker_count_from_config_file() {
        let config: PoolConfig =
            serde_json::from_str(r#"{"max_workers": 18446744073709551615}"#).unwrap();

        let result = MachineBuilder::<&str, &str>::new()
            .transition("a", "go", "b")
            .build_async(config);

        assert!(matches!(result, Err(BuildError::InvalidPoolConfig(_))));
    }
}
