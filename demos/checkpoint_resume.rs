//! Checkpoint and Resume
//!
//! This example demonstrates checkpointing a machine mid-workflow and
//! resuming it in a fresh machine.
//!
//! Key concepts:
//! - Checkpoints capture only the current state
//! - Serialization formats (JSON for readability, binary for compactness)
//! - Restoring does not run the transition hook
//!
//! Run with: cargo run --example checkpoint_resume

use fsmcell::builder::StateMachineBuilder;
use fsmcell::checkpoint::Checkpoint;
use fsmcell::core::Transitions;
use fsmcell::machine::StateMachine;
use fsmcell::state_enum;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
struct Mapping {
    processed: usize,
    total: usize,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
struct Reducing;

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
struct Complete;

state_enum! {
    enum Workflow {
        Mapping,
        Reducing,
        Complete,
    }
    final: [Complete]
}

struct Advance;
struct Pipeline;

impl Transitions<Workflow, Advance> for Pipeline {
    type Error = std::convert::Infallible;

    fn on_event(&self, state: &Workflow, _: Advance) -> Result<Option<Workflow>, Self::Error> {
        Ok(match state {
            Workflow::Mapping(m) if m.processed + 1 < m.total => Some(
                Mapping {
                    processed: m.processed + 1,
                    total: m.total,
                }
                .into(),
            ),
            Workflow::Mapping(_) => Some(Reducing.into()),
            Workflow::Reducing(_) => Some(Complete.into()),
            Workflow::Complete(_) => None,
        })
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Checkpoint and Resume ===\n");

    let machine = StateMachineBuilder::<Workflow, _>::new()
        .initial(Mapping {
            processed: 0,
            total: 5,
        })
        .policy(Pipeline)
        .name("word-count")
        .build()
        .unwrap();

    for _ in 0..3 {
        machine.dispatch(Advance).unwrap();
    }
    println!("Progress before interrupt: {:?}", machine.get::<Mapping>());

    let json = machine.checkpoint().to_json().unwrap();
    println!("\nJSON checkpoint:\n{json}\n");

    let bytes = machine.checkpoint().to_binary().unwrap();
    println!("Binary checkpoint: {} bytes (JSON: {} bytes)\n", bytes.len(), json.len());

    drop(machine);
    println!("[INTERRUPT] Machine dropped.\n");

    let checkpoint = Checkpoint::<Workflow>::from_json(&json).unwrap();
    let resumed = StateMachine::restore_named(Pipeline, "word-count", checkpoint).unwrap();
    println!("Resumed at: {:?}", resumed.get::<Mapping>());

    while !resumed.is_final() {
        resumed.dispatch(Advance).unwrap();
        println!("  -> {:?}", resumed.snapshot());
    }

    println!("\n=== Example Complete ===");
}
