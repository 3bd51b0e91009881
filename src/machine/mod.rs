//! Thread-safe state storage and event dispatch.
//!
//! A [`StateMachine`] owns the current state behind one reader/writer lock.
//! Dispatches take the write lock for their whole duration; `hold`, `get`
//! and the other queries take the read lock.

mod outcome;
mod state_machine;

pub use outcome::Outcome;
pub use state_machine::StateMachine;
