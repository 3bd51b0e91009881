//! Traffic Light State Machine
//!
//! This example demonstrates a simple cyclic state machine.
//!
//! Key concepts:
//! - Cyclic state transitions (states repeat)
//! - Payload-carrying states selected by type with `hold` / `get`
//! - The default transition hook logging through `tracing`
//!
//! Run with: RUST_LOG=debug cargo run --example traffic_light

use fsmcell::builder::StateMachineBuilder;
use fsmcell::core::Transitions;
use fsmcell::state_enum;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
struct Red;

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
struct Green {
    cars_passed: u32,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
struct Yellow;

state_enum! {
    enum TrafficLight {
        Red,
        Green,
        Yellow,
    }
}

struct Timer;
struct Car;

struct Controller;

impl Transitions<TrafficLight, Timer> for Controller {
    type Error = std::convert::Infallible;

    fn on_event(
        &self,
        state: &TrafficLight,
        _: Timer,
    ) -> Result<Option<TrafficLight>, Self::Error> {
        Ok(Some(match state {
            TrafficLight::Red(_) => Green { cars_passed: 0 }.into(),
            TrafficLight::Green(_) => Yellow.into(),
            TrafficLight::Yellow(_) => Red.into(),
        }))
    }
}

impl Transitions<TrafficLight, Car> for Controller {
    type Error = std::convert::Infallible;

    fn on_event(&self, state: &TrafficLight, _: Car) -> Result<Option<TrafficLight>, Self::Error> {
        Ok(match state {
            TrafficLight::Green(green) => Some(
                Green {
                    cars_passed: green.cars_passed + 1,
                }
                .into(),
            ),
            _ => None,
        })
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Traffic Light State Machine ===\n");

    let light = StateMachineBuilder::<TrafficLight, _>::new()
        .initial(Red)
        .policy(Controller)
        .name("main-street")
        .build()
        .unwrap();

    println!("Initial state: {:?}\n", light.snapshot());

    for cycle in 1..=2 {
        println!("Cycle {cycle}:");

        light.dispatch(Car).unwrap();
        println!("  Car at red light, still red: {}", light.hold::<Red>());

        light.dispatch(Timer).unwrap();
        for _ in 0..3 {
            light.dispatch(Car).unwrap();
        }
        println!("  Green: {:?}", light.get::<Green>());

        light.dispatch(Timer).unwrap();
        println!("  Yellow: {}", light.hold::<Yellow>());

        light.dispatch(Timer).unwrap();
        println!("  Back to red: {}\n", light.hold::<Red>());
    }

    println!("Key Characteristics:");
    println!("- No final state (cycles indefinitely)");
    println!("- Events a state does not handle leave it unchanged");
    println!("- Self-transitions (Green -> Green) still run the hook");

    println!("\n=== Example Complete ===");
}
