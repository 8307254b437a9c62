//! The pure transition engine.
//!
//! Given a definition, a snapshot and an event, the engine decides whether a
//! transition fires and which actions it implies, in execution order:
//! exit actions of the source, the transition's own actions, then entry
//! actions of the target. Executing those actions is the actor's job.

mod transition;

pub use transition::{transition, Outcome, Step};
