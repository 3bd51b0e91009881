//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::core::State;
use crate::machine::StateMachine;

/// Builder for constructing state machines with a fluent API.
///
/// Both the initial state and the policy are required; the label is
/// optional and shows up in log events and checkpoints.
pub struct StateMachineBuilder<S: State, P> {
    initial: Option<S>,
    policy: Option<P>,
    name: Option<String>,
}

impl<S: State, P> StateMachineBuilder<S, P> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            policy: None,
            name: None,
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: impl Into<S>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Set the transition policy (required).
    pub fn policy(mut self, policy: P) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Label the machine for logging and checkpoints.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Build the state machine.
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<StateMachine<S, P>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        let policy = self.policy.ok_or(BuildError::MissingPolicy)?;

        tracing::debug!(
            machine = self.name.as_deref().unwrap_or("-"),
            initial = initial.name(),
            "state machine built"
        );

        Ok(StateMachine::with_name(policy, initial, self.name))
    }
}

impl<S: State, P> Default for StateMachineBuilder<S, P> {
    fn default() -> Self {
        Self::new()
    }
}
