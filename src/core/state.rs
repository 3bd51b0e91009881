//! Core State trait for state machine states.
//!
//! A state is a closed set of mutually exclusive variants, expressed as a
//! Rust `enum`. Exactly one variant is active at any instant.

use std::fmt::Debug;

/// Trait for state machine states.
///
/// Implementors are closed tagged unions: a plain `enum` whose variants are
/// the possible states. Methods are pure and only inspect the active variant.
///
/// # Required Traits
///
/// - `Clone`: readers receive independent snapshots of the state
/// - `Debug`: states must be debuggable for diagnostics
/// - `Send` + `Sync`: the state is shared between threads behind a lock
///
/// # Example
///
/// ```rust
/// use fsmcell::core::State;
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum TaskState {
///     Pending,
///     Running { worker: u32 },
///     Complete,
///     Failed(String),
/// }
///
/// impl State for TaskState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Pending => "Pending",
///             Self::Running { .. } => "Running",
///             Self::Complete => "Complete",
///             Self::Failed(_) => "Failed",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Complete | Self::Failed(_))
///     }
///
///     fn is_error(&self) -> bool {
///         matches!(self, Self::Failed(_))
///     }
/// }
///
/// assert_eq!(TaskState::Running { worker: 7 }.name(), "Running");
/// ```
pub trait State: Clone + Debug + Send + Sync {
    /// Name of the active variant, for display and logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// The machine does not enforce this: a final state is simply one the
    /// transition policy never leaves. Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is an error state.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug)]
    enum TestState {
        Initial,
        Processing { progress: u8 },
        Complete,
        Failed(String),
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Initial => "Initial",
                Self::Processing { .. } => "Processing",
                Self::Complete => "Complete",
                Self::Failed(_) => "Failed",
            }
        }

        fn is_final(&self) -> bool {
            matches!(self, Self::Complete | Self::Failed(_))
        }

        fn is_error(&self) -> bool {
            matches!(self, Self::Failed(_))
        }
    }

    #[derive(Clone, Debug)]
    enum Bare {
        Only,
    }

    impl State for Bare {
        fn name(&self) -> &str {
            "Only"
        }
    }

    #[test]
    fn state_name_ignores_payload() {
        assert_eq!(TestState::Processing { progress: 0 }.name(), "Processing");
        assert_eq!(TestState::Processing { progress: 99 }.name(), "Processing");
        assert_eq!(TestState::Failed("disk".into()).name(), "Failed");
    }

    #[test]
    fn is_final_identifies_terminal_states() {
        assert!(!TestState::Initial.is_final());
        assert!(!TestState::Processing { progress: 1 }.is_final());
        assert!(TestState::Complete.is_final());
        assert!(TestState::Failed("boom".into()).is_final());
    }

    #[test]
    fn is_error_identifies_error_states() {
        assert!(!TestState::Initial.is_error());
        assert!(!TestState::Complete.is_error());
        assert!(TestState::Failed("boom".into()).is_error());
    }

    #[test]
    fn defaults_are_neither_final_nor_error() {
        assert!(!Bare::Only.is_final());
        assert!(!Bare::Only.is_error());
        assert_eq!(Bare::Only.name(), "Only");
    }
}
