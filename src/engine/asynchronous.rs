//! Asynchronous machine: dispatch on a bounded worker pool.

use super::error::FsmError;
use super::machine::Machine;
use crate::core::Label;
use crate::pool::WorkerPool;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info_span, warn};
use uuid::Uuid;

/// A failure that happened away from the caller's stack.
#[derive(Debug)]
pub struct Failure<S, E, P> {
    pub error: FsmError,
    pub state: S,
    pub event: E,
    pub payload: Arc<P>,
    pub occurred_at: DateTime<Utc>,
    /// Same id as the `dispatch` span of the submission
    pub dispatch_id: Uuid,
}

/// Callback receiving every asynchronous failure.
pub type ErrorSink<S, E, P> = Arc<dyn Fn(Failure<S, E, P>) + Send + Sync>;

/// Outcome of handing an event to the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// A worker took the event; any failure goes to the error sink
    Accepted,

    /// No worker was free; a `Saturation` failure went to the error sink
    Rejected,
}

impl Submission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

struct Shared<S: Label, E: Label, P> {
    machine: Machine<S, E, P>,
    sink: Option<ErrorSink<S, E, P>>,
}

impl<S: Label, E: Label, P> Shared<S, E, P> {
    fn report(&self, error: FsmError, state: S, event: E, payload: Arc<P>, dispatch_id: Uuid) {
        let Some(sink) = &self.sink else {
            debug!(%dispatch_id, %error, "no error sink configured, dropping failure");
            return;
        };
        sink(Failure {
            error,
            state,
            event,
            payload,
            occurred_at: Utc::now(),
            dispatch_id,
        });
    }
}

/// Machine whose events run on a bounded worker pool.
///
/// `event` returns as soon as the pool accepts or refuses the work. There
/// is no ordering between submissions: two events for the same entity may
/// run concurrently or in either order, so callers needing per-entity
/// ordering must serialize before submitting.
pub struct AsyncMachine<S: Label, E: Label, P = ()> {
    shared: Arc<Shared<S, E, P>>,
    pool: Arc<dyn WorkerPool>,
}

impl<S: Label, E: Label, P: Send + Sync + 'static> AsyncMachine<S, E, P> {
    pub(crate) fn new(
        machine: Machine<S, E, P>,
        pool: Arc<dyn WorkerPool>,
        sink: Option<ErrorSink<S, E, P>>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared { machine, sink }),
            pool,
        }
    }

    /// Submit `event` for an entity currently in `current`.
    ///
    /// Never blocks and never returns an error: dispatch failures, missing
    /// transitions and saturation are all delivered to the error sink.
    pub fn event(&self, current: S, event: E, payload: P) -> Submission {
        let dispatch_id = Uuid::new_v4();
        let payload = Arc::new(payload);

        let shared = Arc::clone(&self.shared);
        let (state, ev, data) = (current.clone(), event.clone(), Arc::clone(&payload));
        let accepted = self.pool.submit(Box::new(move || {
            let span = info_span!("dispatch", %dispatch_id, state = state.name(), event = ev.name());
            let _guard = span.enter();
            if let Err(error) = shared.machine.event(&state, &ev, &data) {
                shared.report(error, state, ev, data, dispatch_id);
            }
        }));

        if accepted {
            return Submission::Accepted;
        }

        warn!(
            %dispatch_id,
            state = current.name(),
            event = event.name(),
            "worker pool saturated, rejecting event"
        );
        let error = FsmError::Saturation {
            event: event.name().to_string(),
            state: current.name().to_string(),
        };
        self.shared.report(error, current, event, payload, dispatch_id);
        Submission::Rejected
    }

    /// The rule set events are dispatched against.
    pub fn machine(&self) -> &Machine<S, E, P> {
        &self.shared.machine
    }

    /// Stop the pool. Running dispatches finish; later submissions are
    /// rejected as saturation.
    pub fn shutdown(&self) {
        self.pool.stop();
    }
}

impl<S: Label, E: Label, P> Drop for AsyncMachine<S, E, P> {
    fn drop(&mut self) {
        self.pool.stop();
    }
}

impl<S: Label, E: Label, P> fmt::Debug for AsyncMachine<S, E, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncMachine")
            .field("machine", &self.shared.machine)
            .field("sink", &self.shared.sink.is_some())
            .finish()
    }
}
