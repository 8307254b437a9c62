//! Statecraft: a small finite state machine runtime
//!
//! Statecraft separates a pure core from an imperative shell. A
//! [`MachineDefinition`] declares states, transitions, guards and actions;
//! the [`engine`] computes, without side effects, what an event would do;
//! an [`Actor`] applies events one at a time, runs the selected actions and
//! notifies subscribers of each settled snapshot.
//!
//! # Core Concepts
//!
//! - **Definition**: immutable, validated description of a machine
//! - **Guards**: pure predicates that gate transitions
//! - **Actions**: `Assign` (merged into context) or `Effect` (side effects)
//! - **Actor**: run-to-completion event processing with observable snapshots
//!
//! # Example
//!
//! ```rust
//! use statecraft::{Action, Actor, ActorRef, Context, Event, MachineDefinition, StateNode, Transition};
//! use serde_json::json;
//!
//! let add_coin = Action::assign("addCoin", |ctx: &Context, _: &Event, _: &ActorRef| {
//!     json!({ "coins": ctx["coins"].as_i64().unwrap_or(0) + 1 })
//! });
//!
//! let machine = MachineDefinition::builder("turnstile")
//!     .initial("locked")
//!     .context(json!({ "coins": 2 }))
//!     .state(
//!         "locked",
//!         StateNode::new()
//!             .on("COIN", Transition::internal().action(add_coin))
//!             .on(
//!                 "PUSH",
//!                 Transition::to("unlocked").when("paid", |ctx: &Context, _: &Event| {
//!                     ctx["coins"].as_i64().unwrap_or(0) >= 3
//!                 }),
//!             ),
//!     )
//!     .state("unlocked", StateNode::new())
//!     .build()
//!     .unwrap();
//!
//! let mut actor = Actor::new(machine);
//! actor.send("PUSH");
//! assert!(actor.matches("locked"));
//!
//! actor.send("COIN");
//! actor.send("PUSH");
//! assert!(actor.matches("unlocked"));
//! ```

pub mod actor;
pub mod core;
pub mod definition;
pub mod engine;

// Re-export commonly used types
pub use actor::{ActionError, Actor, ActorOptions, ActorRef, SharedActor, Subscription};
pub use core::{Action, Context, Event, Guard, Snapshot, State, StateValue, Status};
pub use definition::{DefinitionError, MachineDefinition, StateNode, Transition};
