//! Builder API for ergonomic state machine construction.
//!
//! This module provides a fluent builder for machines and the
//! [`state_enum!`](crate::state_enum) macro for declaring state enums with
//! minimal boilerplate.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
