//! Core state machine types.
//!
//! This module contains the data model shared by both engines:
//! - Labels via the `Label` trait
//! - Transition records and the first-registered-wins transition table
//! - The action registry and handler signatures
//!
//! Nothing here stores an entity's current state; callers own that.

mod label;
mod registry;
mod transition;

pub use label::Label;
pub use registry::{ActionFn, ActionRegistry, BoxError, EnterFn, ExitFn, HookResult};
pub use transition::{Transition, TransitionTable};
