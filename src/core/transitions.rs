//! The transition policy supplied by the user of a state machine.

use super::state::State;

/// Transition logic for events of type `E` over states `S`.
///
/// A policy type implements this trait once per event type it accepts. The
/// machine calls [`on_event`](Transitions::on_event) with the current state
/// while holding its write lock, so implementations see a stable state and
/// must not call back into the same machine.
///
/// # Example
///
/// ```rust
/// use fsmcell::core::{State, Transitions};
/// use std::convert::Infallible;
///
/// #[derive(Clone, Debug, PartialEq)]
/// enum Light {
///     Off,
///     On,
/// }
///
/// impl State for Light {
///     fn name(&self) -> &str {
///         match self {
///             Self::Off => "Off",
///             Self::On => "On",
///         }
///     }
/// }
///
/// struct Toggle;
/// struct Switch;
///
/// impl Transitions<Light, Toggle> for Switch {
///     type Error = Infallible;
///
///     fn on_event(&self, state: &Light, _: Toggle) -> Result<Option<Light>, Infallible> {
///         Ok(Some(match state {
///             Light::Off => Light::On,
///             Light::On => Light::Off,
///         }))
///     }
/// }
///
/// assert_eq!(Switch.on_event(&Light::Off, Toggle).unwrap(), Some(Light::On));
/// ```
pub trait Transitions<S: State, E> {
    /// Failure for an event the current state cannot handle.
    type Error;

    /// Compute the next state.
    ///
    /// Returns `Ok(None)` to leave the state unchanged and `Ok(Some(next))`
    /// to commit `next`. Returning the same variant again is a regular
    /// transition: the hook runs and the state is replaced.
    fn on_event(&self, state: &S, event: E) -> Result<Option<S>, Self::Error>;

    /// Observe a transition that is about to be committed.
    ///
    /// Called exactly once per committing dispatch, under the write lock and
    /// before the stored state is replaced. `current` is the state still
    /// stored at that point and `next` the one about to replace it.
    fn on_transition(&self, current: &S, next: &S) {
        tracing::debug!(
            target: "fsmcell::transition",
            from = current.name(),
            to = next.name(),
            "entering state"
        );
    }
}
