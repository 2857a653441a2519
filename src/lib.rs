//! Statem: a stateless, reentrant finite state machine engine
//!
//! A machine is a rule set, not an actor. You declare the transition table
//! once, then fire events for as many independent entities as you like,
//! passing each entity's current state on every call. The machine never
//! stores that state, so one instance can be shared by reference across
//! threads with no locking.
//!
//! # Core Concepts
//!
//! - **Labels**: states and events are opaque values implementing `Label`
//! - **Transitions**: `(from, event) -> to`, optionally naming an action;
//!   the first registered transition for a pair wins
//! - **Lifecycle**: exit hook, then action, then enter hook, stopping at
//!   the first error; self-transitions only run the action
//! - **Engines**: [`Machine`] dispatches inline, [`AsyncMachine`] hands
//!   events to a bounded worker pool and reports failures to an error sink
//!
//! # Example
//!
//! ```rust
//! use statem::{FsmError, MachineBuilder};
//!
//! let machine = MachineBuilder::<&str, &str>::new()
//!     .transition_with_action("idle", "start", "boot", "running")
//!     .transition_with_action("running", "stop", "halt", "idle")
//!     .action("boot", |from, event, action, to, _| {
//!         assert_eq!((*from, *event, action, *to), ("idle", "start", "boot", "running"));
//!         Ok(())
//!     })
//!     .build();
//!
//! // The caller owns the entity's state.
//! let mut state = "idle";
//! machine.event(&state, &"start", &()).unwrap();
//! state = machine.find(&state, &"start").unwrap().to;
//! assert_eq!(state, "running");
//!
//! let err = machine.event(&state, &"pause", &()).unwrap_err();
//! assert!(matches!(err, FsmError::NoTransition { .. }));
//! ```

pub mod builder;
pub mod core;
pub mod engine;
pub mod graph;
pub mod loader;
pub mod pool;

// Re-export commonly used types
pub use crate::builder::{BuildError, MachineBuilder, TransitionBuilder};
pub use crate::core::{BoxError, HookResult, Label, Transition};
pub use crate::engine::{AsyncMachine, Failure, FsmError, Hook, Machine, MissingActionPolicy, Submission};
pub use crate::pool::{BlockingPool, PoolConfig, WorkerPool};
