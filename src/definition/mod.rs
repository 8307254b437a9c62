//! Declarative machine definitions.
//!
//! A definition is assembled with fluent builders and validated once:
//! an unknown initial state or a transition aimed at an undefined state is
//! a construction error, never a silent run-time no-op.

mod error;
mod machine;
mod state_node;
mod transition;

pub use error::DefinitionError;
pub use machine::{MachineBuilder, MachineDefinition};
pub use state_node::StateNode;
pub use transition::Transition;
