//! Lifecycle dispatcher: exit, action, enter for one resolved transition.

use super::error::{FsmError, Hook};
use crate::core::{ActionRegistry, EnterFn, ExitFn, Label, Transition};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// What to do when a transition names an action that is not registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingActionPolicy {
    /// Skip the action and carry on with the enter hook
    #[default]
    Ignore,

    /// Abort with `FsmError::UnknownAction`
    Fail,
}

/// Hooks and handlers applied around every transition of a machine.
pub(crate) struct Lifecycle<S: Label, E: Label, P> {
    pub(crate) actions: ActionRegistry<S, E, P>,
    pub(crate) on_exit: Option<ExitFn<S, E, P>>,
    pub(crate) on_enter: Option<EnterFn<S, E, P>>,
    pub(crate) missing_action: MissingActionPolicy,
}

impl<S: Label, E: Label, P> Lifecycle<S, E, P> {
    /// Run exit, action and enter in order, stopping at the first error.
    ///
    /// Nothing is rolled back: if the action fails after the exit hook ran,
    /// the exit hook's side effects stand.
    pub(crate) fn fire(&self, transition: &Transition<S, E, P>, payload: &P) -> Result<(), FsmError> {
        let Transition {
            from, event, to, ..
        } = transition;
        let changing = !transition.is_self_transition();

        debug!(
            from = from.name(),
            event = event.name(),
            to = to.name(),
            action = transition.action_name(),
            "firing transition"
        );

        if changing {
            if let Some(on_exit) = &self.on_exit {
                on_exit(from, event, payload).map_err(|source| FsmError::HandlerFailed {
                    hook: Hook::Exit,
                    source,
                })?;
            }
        } else {
            trace!(state = from.name(), "self-transition, skipping exit and enter hooks");
        }

        if let Some(name) = transition.action_name() {
            match self.actions.get(name) {
                Some(handler) => {
                    handler(from, event, name, to, payload).map_err(|source| {
                        FsmError::HandlerFailed {
                            hook: Hook::Action(name.to_string()),
                            source,
                        }
                    })?;
                }
                None => match self.missing_action {
                    MissingActionPolicy::Ignore => {
                        warn!(action = name, event = event.name(), "action not registered, skipping");
                    }
                    MissingActionPolicy::Fail => {
                        return Err(FsmError::UnknownAction {
                            action: name.to_string(),
                        });
                    }
                },
            }
        }

        if changing {
            if let Some(on_enter) = &self.on_enter {
                on_enter(event, to, payload).map_err(|source| FsmError::HandlerFailed {
                    hook: Hook::Enter,
                    source,
                })?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    type Calls = Arc<Mutex<Vec<String>>>;

    fn lifecycle(calls: &Calls, fail_at: Option<&'static str>) -> Lifecycle<&'static str, &'static str, ()> {
        let mut actions = ActionRegistry::new();
        let log = Arc::clone(calls);
        actions.register(
            "boot",
            Arc::new(move |from: &&str, event: &&str, action: &str, to: &&str, _: &()| -> crate::core::HookResult {
                log.lock().unwrap().push(format!("action {from} {event} {action} {to}"));
                if fail_at == Some("action") {
                    return Err("action failed".into());
                }
                Ok(())
            }) as crate::core::ActionFn<_, _, _>,
        );

        let log = Arc::clone(calls);
        let on_exit: ExitFn<&str, &str, ()> = Arc::new(move |from: &&str, event: &&str, _: &()| -> crate::core::HookResult {
            log.lock().unwrap().push(format!("exit {from} {event}"));
            if fail_at == Some("exit") {
                return Err("exit failed".into());
            }
            Ok(())
        });

        let log = Arc::clone(calls);
        let on_enter: EnterFn<&str, &str, ()> = Arc::new(move |event: &&str, to: &&str, _: &()| -> crate::core::HookResult {
            log.lock().unwrap().push(format!("enter {event} {to}"));
            Ok(())
        });

        Lifecycle {
            actions,
            on_exit: Some(on_exit),
            on_enter: Some(on_enter),
            missing_action: MissingActionPolicy::Ignore,
        }
    }

    fn with_action(from: &'static str, event: &'static str, action: &str, to: &'static str) -> Transition<&'static str, &'static str> {
        let mut transition = Transition::new(from, event, to);
        transition.action = Some(action.to_string());
        transition
    }

    #[test]
    fn runs_exit_action_enter_in_order() {
        let calls = Calls::default();
        let lifecycle = lifecycle(&calls, None);

        lifecycle
            .fire(&with_action("idle", "start", "boot", "running"), &())
            .unwrap();

        assert_eq!(
            *calls.lock().unwrap(),
            vec![
                "exit idle start",
                "action idle start boot running",
                "enter start running",
            ]
        );
    }

    #[test]
    fn self_transition_runs_only_the_action() {
        let calls = Calls::default();
        let lifecycle = lifecycle(&calls, None);

        lifecycle
            .fire(&with_action("running", "ping", "boot", "running"), &())
            .unwrap();

        assert_eq!(*calls.lock().unwrap(), vec!["action running ping boot running"]);
    }

    #[test]
    fn exit_failure_short_circuits() {
        let calls = Calls::default();
        let lifecycle = lifecycle(&calls, Some("exit"));

        let err = lifecycle
            .fire(&with_action("idle", "start", "boot", "running"), &())
            .unwrap_err();

        assert!(matches!(err, FsmError::HandlerFailed { hook: Hook::Exit, .. }));
        assert_eq!(err.handler_error().unwrap().to_string(), "exit failed");
        assert_eq!(*calls.lock().unwrap(), vec!["exit idle start"]);
    }

    #[test]
    fn action_failure_skips_enter() {
        let calls = Calls::default();
        let lifecycle = lifecycle(&calls, Some("action"));

        let err = lifecycle
            .fire(&with_action("idle", "start", "boot", "running"), &())
            .unwrap_err();

        assert!(matches!(err, FsmError::HandlerFailed { hook: Hook::Action(ref name), .. } if name == "boot"));
        assert_eq!(
            *calls.lock().unwrap(),
            vec!["exit idle start", "action idle start boot running"]
        );
    }

    #[test]
    fn missing_action_ignored_by_default() {
        let calls = Calls::default();
        let lifecycle = lifecycle(&calls, None);

        lifecycle
            .fire(&with_action("idle", "start", "typo", "running"), &())
            .unwrap();

        assert_eq!(
            *calls.lock().unwrap(),
            vec!["exit idle start", "enter start running"]
        );
    }

    #[test]
    fn missing_action_fails_when_configured() {
        let calls = Calls::default();
        let mut lifecycle = lifecycle(&calls, None);
        lifecycle.missing_action = MissingActionPolicy::Fail;

        let err = lifecycle
            .fire(&with_action("idle", "start", "typo", "running"), &())
            .unwrap_err();

        assert!(matches!(err, FsmError::UnknownAction { ref action } if action == "typo"));
        assert_eq!(*calls.lock().unwrap(), vec!["exit idle start"]);
    }

    #[test]
    fn empty_action_name_never_resolves() {
        let calls = Calls::default();
        let lifecycle = lifecycle(&calls, None);

        lifecycle
            .fire(&with_action("running", "ping", "", "running"), &())
            .unwrap();

        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn policy_deserializes_from_snake_case() {
        let policy: MissingActionPolicy = serde_json::from_str("\"fail\"").unwrap();
        assert_eq!(policy, MissingActionPolicy::Fail);
        assert_eq!(MissingActionPolicy::default(), MissingActionPolicy::Ignore);
    }
}
