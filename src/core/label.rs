//! Label trait for states and events.
//!
//! The engine treats states and events as opaque labels: it compares and
//! hashes them, and asks for a display name when logging or exporting a
//! graph. It never enumerates or validates the universe of labels.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state and event labels.
///
/// # Required Traits
///
/// - `Clone`: labels are copied into errors and failure reports
/// - `Eq` + `Hash`: transitions are indexed by `(from, event)`
/// - `Debug`: labels must be debuggable for diagnostics
/// - `Send` + `Sync`: a built machine is shared across threads
///
/// # Example
///
/// ```rust
/// use statem::core::Label;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum TaskState {
///     Pending,
///     Running,
///     Complete,
/// }
///
/// impl Label for TaskState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Pending => "Pending",
///             Self::Running => "Running",
///             Self::Complete => "Complete",
///         }
///     }
/// }
///
/// assert_eq!(TaskState::Running.name(), "Running");
/// assert_eq!("idle".name(), "idle");
/// ```
pub trait Label: Clone + Eq + Hash + Debug + Send + Sync + 'static {
    /// Get the label's name for display/logging.
    fn name(&self) -> &str;
}

impl Label for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}

impl Label for &'static str {
    fn name(&self) -> &str {
        self
    }
}
