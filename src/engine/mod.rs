//! Dispatch engines.
//!
//! Both engines share one lifecycle: on a real state change the exit hook
//! runs, then the named action, then the enter hook, stopping at the first
//! error. Self-transitions only run the action.
//!
//! - [`Machine`] fires events inline on the caller's thread and returns the
//!   first error.
//! - [`AsyncMachine`] hands each event to a bounded [`WorkerPool`](crate::pool::WorkerPool)
//!   and delivers every failure, saturation included, to an error sink.

mod asynchronous;
mod dispatch;
mod error;
mod machine;

pub use asynchronous::{AsyncMachine, ErrorSink, Failure, Submission};
pub(crate) use dispatch::Lifecycle;
pub use dispatch::MissingActionPolicy;
pub use error::{FsmError, Hook};
pub use machine::Machine;
