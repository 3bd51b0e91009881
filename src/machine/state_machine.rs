//! State machine that serializes transitions behind a reader/writer lock.

use crate::core::{Alternative, State, Transitions};
use crate::machine::outcome::Outcome;
use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, TryLockError};

/// A finite state machine shareable between threads.
///
/// The machine stores exactly one value of the state enum `S` and a policy
/// `P` that decides how events move it. The policy implements
/// [`Transitions<S, E>`] for every event type `E` it accepts.
///
/// # Example
///
/// ```rust
/// use fsmcell::core::Transitions;
/// use fsmcell::machine::{Outcome, StateMachine};
/// use fsmcell::state_enum;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// struct Idle;
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// struct Running;
///
/// state_enum! {
///     enum Job {
///         Idle,
///         Running,
///     }
/// }
///
/// struct Start;
/// struct Ping;
/// struct Policy;
///
/// impl Transitions<Job, Start> for Policy {
///     type Error = std::convert::Infallible;
///
///     fn on_event(&self, state: &Job, _: Start) -> Result<Option<Job>, Self::Error> {
///         Ok(match state {
///             Job::Idle(_) => Some(Running.into()),
///             Job::Running(_) => None,
///         })
///     }
/// }
///
/// impl Transitions<Job, Ping> for Policy {
///     type Error = std::convert::Infallible;
///
///     fn on_event(&self, _: &Job, _: Ping) -> Result<Option<Job>, Self::Error> {
///         Ok(None)
///     }
/// }
///
/// let machine = StateMachine::new(Policy, Job::Idle(Idle));
///
/// assert_eq!(machine.dispatch(Start), Ok(Outcome::Transitioned));
/// assert!(machine.hold::<Running>());
/// assert!(!machine.hold::<Idle>());
///
/// assert_eq!(machine.dispatch(Ping), Ok(Outcome::Unchanged));
/// assert_eq!(machine.get::<Running>(), Some(Running));
/// ```
pub struct StateMachine<S: State, P> {
    state: RwLock<S>,
    policy: P,
    name: Option<String>,
}

impl<S: State, P> StateMachine<S, P> {
    /// Create a machine in the given initial state.
    pub fn new(policy: P, initial: S) -> Self {
        Self::with_name(policy, initial, None)
    }

    pub(crate) fn with_name(policy: P, initial: S, name: Option<String>) -> Self {
        Self {
            state: RwLock::new(initial),
            policy,
            name,
        }
    }

    /// Feed an event to the policy and commit the state it returns.
    ///
    /// The write lock is held for the whole call, so dispatches on one
    /// machine never overlap and no reader sees the state mid-transition.
    /// When the policy returns a new state, its
    /// [`on_transition`](Transitions::on_transition) hook runs first with the
    /// outgoing and incoming states, and the stored state is replaced
    /// afterwards.
    ///
    /// A policy error is returned as-is and leaves the state untouched. The
    /// hook is not called in that case, nor when the policy declines the
    /// event.
    pub fn dispatch<E>(&self, event: E) -> Result<Outcome, P::Error>
    where
        P: Transitions<S, E>,
    {
        let mut state = self.write_guard();
        tracing::trace!(machine = self.label(), state = state.name(), "dispatching event");

        let next = match self.policy.on_event(&*state, event) {
            Ok(Some(next)) => next,
            Ok(None) => {
                tracing::trace!(
                    machine = self.label(),
                    state = state.name(),
                    "event left state unchanged"
                );
                return Ok(Outcome::Unchanged);
            }
            Err(err) => {
                tracing::trace!(machine = self.label(), state = state.name(), "event rejected");
                return Err(err);
            }
        };

        self.policy.on_transition(&*state, &next);
        tracing::debug!(
            machine = self.label(),
            from = state.name(),
            to = next.name(),
            "state transition committed"
        );
        *state = next;

        Ok(Outcome::Transitioned)
    }

    /// Check whether the machine is currently in alternative `A`.
    ///
    /// The answer is only guaranteed for the instant of the check; a
    /// concurrent dispatch may change the state right after.
    pub fn hold<A: Alternative<S>>(&self) -> bool {
        A::is_active(&*self.read_guard())
    }

    /// Copy out the payload of alternative `A`, if it is the current one.
    pub fn get<A: Alternative<S> + Clone>(&self) -> Option<A> {
        let state = self.read_guard();
        A::project(&*state).cloned()
    }

    /// Borrow the full current state.
    ///
    /// The returned guard holds the read lock until it is dropped, blocking
    /// dispatches in the meantime. Do not call this from inside the policy
    /// of the same machine: the dispatching thread already holds the write
    /// lock there, and the policy receives the state as an argument instead.
    ///
    /// While the guard is alive, make no other call on the same machine from
    /// this thread, reads included. `RwLock` may queue a second read behind
    /// a waiting writer, which then waits on this guard forever. Use the
    /// guard itself for further queries:
    ///
    /// ```rust
    /// # use fsmcell::core::Alternative;
    /// # use fsmcell::machine::StateMachine;
    /// # use fsmcell::state_enum;
    /// # use serde::{Deserialize, Serialize};
    /// # #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    /// # struct Idle;
    /// # #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    /// # struct Busy;
    /// # state_enum! { enum Job { Idle, Busy } }
    /// # struct Policy;
    /// let machine = StateMachine::new(Policy, Job::Idle(Idle));
    ///
    /// let state = machine.current();
    /// assert!(Idle::is_active(&*state));
    /// assert!(!Busy::is_active(&*state));
    /// ```
    pub fn current(&self) -> RwLockReadGuard<'_, S> {
        self.read_guard()
    }

    /// Run `f` against the current state under the read lock.
    ///
    /// `f` must not call back into the same machine; the same rule as for
    /// the guard returned by [`current`](Self::current) applies.
    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&*self.read_guard())
    }

    /// Clone the full current state.
    pub fn snapshot(&self) -> S {
        self.read(S::clone)
    }

    /// Check if the current state is final.
    pub fn is_final(&self) -> bool {
        self.read(S::is_final)
    }

    /// Check if the current state is an error state.
    pub fn is_error(&self) -> bool {
        self.read(S::is_error)
    }

    /// Label given to the machine at build time.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The transition policy.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Take the machine apart into its policy and final state.
    pub fn into_parts(self) -> (P, S) {
        let state = self
            .state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        (self.policy, state)
    }

    fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("-")
    }

    // A panicking policy poisons the lock, but the state is only written as
    // the last step of a dispatch, so the stored value is always whole.
    fn read_guard(&self) -> RwLockReadGuard<'_, S> {
        self.state.read().unwrap_or_else(|poisoned| {
            let guard = poisoned.into_inner();
            self.clear_poison();
            guard
        })
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, S> {
        self.state.write().unwrap_or_else(|poisoned| {
            let guard = poisoned.into_inner();
            self.clear_poison();
            guard
        })
    }

    fn clear_poison(&self) {
        tracing::warn!(
            machine = self.label(),
            "recovering state lock poisoned by a panicking transition policy"
        );
        self.state.clear_poison();
    }
}

impl<S: State, P> fmt::Debug for StateMachine<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("StateMachine");
        debug.field("name", &self.name);
        match self.state.try_read() {
            Ok(state) => debug.field("state", &*state),
            Err(TryLockError::Poisoned(poisoned)) => debug.field("state", &*poisoned.into_inner()),
            Err(TryLockError::WouldBlock) => debug.field("state", &format_args!("<locked>")),
        };
        debug.finish()
    }
}
