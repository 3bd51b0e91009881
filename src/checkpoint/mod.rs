//! Checkpoint and resume functionality for state machines.
//!
//! A checkpoint captures the current state of one machine so it can be
//! stored by the caller and used to rebuild an equivalent machine later,
//! for example after a process restart. Only the current state is kept;
//! the policy is code and is supplied again on restore.

use crate::core::State;
use crate::machine::StateMachine;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable checkpoint of a machine's current state.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(serialize = "S: Serialize", deserialize = "S: DeserializeOwned"))]
pub struct Checkpoint<S: State> {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Label of the machine the checkpoint was taken from
    pub machine: Option<String>,

    /// State of the machine at checkpoint time
    pub state: S,
}

impl<S: State> Checkpoint<S> {
    /// Capture `state` under the current format version.
    pub fn new(machine: Option<String>, state: S) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            machine,
            state,
        }
    }

    /// Check that this checkpoint can be restored by this version.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(())
    }

    /// Encode as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, CheckpointError>
    where
        S: Serialize,
    {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Decode from JSON and validate the version.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError>
    where
        S: DeserializeOwned,
    {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    /// Encode in the compact binary format.
    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError>
    where
        S: Serialize,
    {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Decode from the binary format and validate the version.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError>
    where
        S: DeserializeOwned,
    {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }
}

impl<S: State, P> StateMachine<S, P> {
    /// Capture the current state under the read lock.
    pub fn checkpoint(&self) -> Checkpoint<S> {
        Checkpoint::new(self.name().map(str::to_owned), self.snapshot())
    }

    /// Rebuild a machine from a checkpoint.
    ///
    /// The checkpointed state becomes the initial state of the new machine,
    /// so no transition hook runs. The machine keeps the checkpoint's label.
    pub fn restore(policy: P, checkpoint: Checkpoint<S>) -> Result<Self, CheckpointError> {
        checkpoint.validate()?;

        tracing::debug!(
            machine = checkpoint.machine.as_deref().unwrap_or("-"),
            checkpoint = %checkpoint.id,
            state = checkpoint.state.name(),
            "restoring state machine from checkpoint"
        );

        Ok(Self::with_name(policy, checkpoint.state, checkpoint.machine))
    }

    /// Rebuild a machine from a checkpoint taken from the machine labelled
    /// `name`, rejecting checkpoints of any other machine.
    pub fn restore_named(
        policy: P,
        name: &str,
        checkpoint: Checkpoint<S>,
    ) -> Result<Self, CheckpointError> {
        if checkpoint.machine.as_deref() != Some(name) {
            return Err(CheckpointError::ValidationFailed(format!(
                "checkpoint {} belongs to machine {:?}, expected {:?}",
                checkpoint.id, checkpoint.machine, name
            )));
        }
        Self::restore(policy, checkpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::StateMachineBuilder;
    use crate::core::Transitions;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    struct Mapping {
        done: usize,
        total: usize,
    }

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    struct Reducing;

    crate::state_enum! {
        enum Workflow {
            Mapping,
            Reducing,
        }
    }

    struct Advance;
    struct Policy;

    impl Transitions<Workflow, Advance> for Policy {
        type Error = std::convert::Infallible;

        fn on_event(&self, state: &Workflow, _: Advance) -> Result<Option<Workflow>, Self::Error> {
            Ok(match state {
                Workflow::Mapping(m) if m.done + 1 < m.total => Some(
                    Mapping {
                        done: m.done + 1,
                        total: m.total,
                    }
                    .into(),
                ),
                Workflow::Mapping(_) => Some(Reducing.into()),
                Workflow::Reducing(_) => None,
            })
        }
    }

    fn mapping_machine() -> StateMachine<Workflow, Policy> {
        StateMachineBuilder::<Workflow, _>::new()
            .initial(Workflow::Mapping(Mapping { done: 0, total: 3 }))
            .policy(Policy)
            .name("batch")
            .build()
            .unwrap()
    }

    #[test]
    fn checkpoint_captures_current_state() {
        let machine = mapping_machine();
        machine.dispatch(Advance).unwrap();

        let checkpoint = machine.checkpoint();

        assert_eq!(checkpoint.version, CHECKPOINT_VERSION);
        assert_eq!(checkpoint.machine.as_deref(), Some("batch"));
        assert_eq!(
            checkpoint.state,
            Workflow::Mapping(Mapping { done: 1, total: 3 })
        );
    }

    #[test]
    fn resumed_machine_continues_from_checkpoint() {
        let machine = mapping_machine();
        machine.dispatch(Advance).unwrap();
        let json = machine.checkpoint().to_json().unwrap();

        let restored =
            StateMachine::restore(Policy, Checkpoint::<Workflow>::from_json(&json).unwrap())
                .unwrap();

        assert_eq!(restored.name(), Some("batch"));
        assert_eq!(restored.get::<Mapping>(), Some(Mapping { done: 1, total: 3 }));

        restored.dispatch(Advance).unwrap();
        restored.dispatch(Advance).unwrap();
        assert!(restored.hold::<Reducing>());
    }

    #[test]
    fn binary_checkpoint_restores_state() {
        let machine = mapping_machine();
        let bytes = machine.checkpoint().to_binary().unwrap();

        let checkpoint = Checkpoint::<Workflow>::from_binary(&bytes).unwrap();

        assert_eq!(checkpoint.state, machine.snapshot());
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let mut checkpoint = mapping_machine().checkpoint();
        checkpoint.version = CHECKPOINT_VERSION + 1;
        let json = serde_json::to_string(&checkpoint).unwrap();

        let result = Checkpoint::<Workflow>::from_json(&json);

        assert!(matches!(
            result,
            Err(CheckpointError::UnsupportedVersion { found: 2, supported: 1 })
        ));
        assert!(StateMachine::restore(Policy, checkpoint).is_err());
    }

    #[test]
    fn malformed_json_is_a_deserialization_error() {
        let result = Checkpoint::<Workflow>::from_json("{\"version\": 1");

        assert!(matches!(result, Err(CheckpointError::DeserializationFailed(_))));
    }

    #[test]
    fn restore_named_rejects_foreign_checkpoint() {
        let checkpoint = mapping_machine().checkpoint();

        let foreign = StateMachine::restore_named(Policy, "other", checkpoint.clone());
        let own = StateMachine::restore_named(Policy, "batch", checkpoint);

        assert!(matches!(foreign, Err(CheckpointError::ValidationFailed(_))));
        assert!(own.is_ok());
    }
}
