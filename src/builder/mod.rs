//! Builder API for ergonomic machine construction.
//!
//! This module provides fluent builders and macros for declaring a
//! transition table, its actions and hooks, and then freezing them into a
//! [`Machine`](crate::engine::Machine) or
//! [`AsyncMachine`](crate::engine::AsyncMachine).

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::BuildError;
pub use machine::MachineBuilder;
pub use transition::TransitionBuilder;
