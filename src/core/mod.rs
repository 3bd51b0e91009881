//! Core state machine types.
//!
//! This module contains the building blocks a state machine is made of:
//! - State definitions via the `State` trait
//! - Variant selectors via the `Alternative` trait
//! - Transition logic via the `Transitions` trait
//!
//! Nothing here locks or mutates; the `machine` module owns the state.

mod alternative;
mod state;
mod transitions;

pub use alternative::Alternative;
pub use state::State;
pub use transitions::Transitions;
