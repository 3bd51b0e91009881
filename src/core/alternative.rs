//! Type-level selectors for the variants of a state enum.

use super::state::State;

/// One variant of the closed state set `S`, named by its payload type.
///
/// `Alternative` is what [`StateMachine::hold`](crate::machine::StateMachine::hold)
/// and [`StateMachine::get`](crate::machine::StateMachine::get) are
/// parameterized by. Naming a type that is not a variant of `S` does not
/// compile, because there is no `Alternative<S>` impl for it.
///
/// The [`state_enum!`](crate::state_enum) macro implements this trait for
/// every variant it declares. Hand-written impls look like:
///
/// ```rust
/// use fsmcell::core::{Alternative, State};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Idle;
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Running {
///     job: u64,
/// }
///
/// #[derive(Clone, Debug, PartialEq)]
/// enum Worker {
///     Idle(Idle),
///     Running(Running),
/// }
///
/// impl State for Worker {
///     fn name(&self) -> &str {
///         match self {
///             Self::Idle(_) => "Idle",
///             Self::Running(_) => "Running",
///         }
///     }
/// }
///
/// impl Alternative<Worker> for Running {
///     fn project(state: &Worker) -> Option<&Self> {
///         match state {
///             Worker::Running(running) => Some(running),
///             _ => None,
///         }
///     }
///
///     fn inject(self) -> Worker {
///         Worker::Running(self)
///     }
/// }
///
/// let state: Worker = Running { job: 3 }.inject();
/// assert!(Running::is_active(&state));
/// assert_eq!(Running::project(&state), Some(&Running { job: 3 }));
/// ```
pub trait Alternative<S: State>: Sized {
    /// Borrow the payload if `state` is this variant.
    fn project(state: &S) -> Option<&Self>;

    /// Wrap the payload into the state enum.
    fn inject(self) -> S;

    /// Check whether `state` is this variant.
    fn is_active(state: &S) -> bool {
        Self::project(state).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Open {
        peers: usize,
    }

    #[derive(Clone, Debug, PartialEq)]
    struct Closed;

    #[derive(Clone, Debug, PartialEq)]
    enum Door {
        Open(Open),
        Closed(Closed),
    }

    impl State for Door {
        fn name(&self) -> &str {
            match self {
                Self::Open(_) => "Open",
                Self::Closed(_) => "Closed",
            }
        }
    }

    impl Alternative<Door> for Open {
        fn project(state: &Door) -> Option<&Self> {
            match state {
                Door::Open(open) => Some(open),
                _ => None,
            }
        }

        fn inject(self) -> Door {
            Door::Open(self)
        }
    }

    impl Alternative<Door> for Closed {
        fn project(state: &Door) -> Option<&Self> {
            match state {
                Door::Closed(closed) => Some(closed),
                _ => None,
            }
        }

        fn inject(self) -> Door {
            Door::Closed(self)
        }
    }

    #[test]
    fn project_borrows_matching_payload() {
        let door = Door::Open(Open { peers: 2 });

        assert_eq!(Open::project(&door), Some(&Open { peers: 2 }));
        assert_eq!(Closed::project(&door), None);
    }

    #[test]
    fn exactly_one_alternative_is_active() {
        for door in [Door::Open(Open { peers: 0 }), Door::Closed(Closed)] {
            let active = [Open::is_active(&door), Closed::is_active(&door)];
            assert_eq!(active.iter().filter(|a| **a).count(), 1);
        }
    }

    struct Knock;
    struct Doorman;

    impl crate::core::Transitions<Door, Knock> for Doorman {
        type Error = std::convert::Infallible;

        fn on_event(&self, state: &Door, _: Knock) -> Result<Option<Door>, Self::Error> {
            Ok(match state {
                Door::Closed(_) => Some(Open { peers: 1 }.inject()),
                Door::Open(open) => Some(
                    Open {
                        peers: open.peers + 1,
                    }
                    .inject(),
                ),
            })
        }
    }

    #[test]
    fn machine_runs_on_hand_written_alternatives_without_serde() {
        let machine = crate::machine::StateMachine::new(Doorman, Door::Closed(Closed));

        machine.dispatch(Knock).unwrap();
        machine.dispatch(Knock).unwrap();

        assert!(!machine.hold::<Closed>());
        assert_eq!(machine.get::<Open>(), Some(Open { peers: 2 }));
    }

    #[test]
    fn inject_wraps_payload() {
        assert_eq!(Door::Closed(Closed), Closed.inject());

        let door: Door = Open { peers: 5 }.inject();
        assert_eq!(door.name(), "Open");
    }
}
