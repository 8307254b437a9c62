//! Core state machine types.
//!
//! This module contains the pure data of the runtime:
//! - State values and actor status via the `State` trait
//! - Events and context records
//! - Guard predicates and actions
//! - Snapshots and transition history
//!
//! Nothing here performs side effects on its own; actions only run when an
//! actor executes them.

mod action;
mod context;
mod event;
mod guard;
mod history;
mod snapshot;
mod state;

pub use action::{Action, ActionKind, AssignFn, EffectFn};
pub use context::{merge, Context};
pub use event::{Event, INIT_EVENT};
pub use guard::Guard;
pub(crate) use guard::all_pass;
pub use history::{StateHistory, StateTransition};
pub use snapshot::Snapshot;
pub use state::{State, StateValue, Status};
