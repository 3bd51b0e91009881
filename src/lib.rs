//! Fsmcell: a thread-safe finite state machine core
//!
//! A machine stores one value of a closed state enum behind a reader/writer
//! lock. Events are dispatched into a user-supplied transition policy under
//! the write lock; queries for the current state run under the read lock and
//! never observe a transition halfway through.
//!
//! # Core Concepts
//!
//! - **State**: a closed `enum` implementing the `State` trait
//! - **Alternative**: a payload type naming one variant, used by `hold`/`get`
//! - **Transitions**: the policy mapping (state, event) to an optional next state
//! - **StateMachine**: lock-guarded storage with `dispatch`, `hold` and `get`
//!
//! # Example
//!
//! ```rust
//! use fsmcell::core::Transitions;
//! use fsmcell::machine::StateMachine;
//! use fsmcell::state_enum;
//! use serde::{Deserialize, Serialize};
//! use std::sync::Arc;
//! use std::thread;
//!
//! #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
//! struct Closed;
//!
//! #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
//! struct Open {
//!     visitors: u32,
//! }
//!
//! state_enum! {
//!     enum Gate {
//!         Closed,
//!         Open,
//!     }
//! }
//!
//! struct Push;
//! struct Turnstile;
//!
//! impl Transitions<Gate, Push> for Turnstile {
//!     type Error = std::convert::Infallible;
//!
//!     fn on_event(&self, state: &Gate, _: Push) -> Result<Option<Gate>, Self::Error> {
//!         Ok(Some(match state {
//!             Gate::Closed(_) => Open { visitors: 1 }.into(),
//!             Gate::Open(open) => Open { visitors: open.visitors + 1 }.into(),
//!         }))
//!     }
//! }
//!
//! let gate = Arc::new(StateMachine::new(Turnstile, Gate::Closed(Closed)));
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|_| {
//!         let gate = Arc::clone(&gate);
//!         thread::spawn(move || gate.dispatch(Push).unwrap())
//!     })
//!     .collect();
//! for handle in handles {
//!     let _ = handle.join().unwrap();
//! }
//!
//! assert_eq!(gate.get::<Open>(), Some(Open { visitors: 4 }));
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder};
pub use checkpoint::{Checkpoint, CheckpointError};
pub use core::{Alternative, State, Transitions};
pub use machine::{Outcome, StateMachine};
