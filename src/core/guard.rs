//! Guard predicates for controlling state transitions.
//!
//! Guards are pure boolean functions over the current context and the
//! incoming event. A transition fires only when every attached guard passes.

use super::context::Context;
use super::event::Event;
use std::fmt;
use std::sync::Arc;

type Predicate = Arc<dyn Fn(&Context, &Event) -> bool + Send + Sync>;

/// Named pure predicate that determines if a transition can execute.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{Context, Event, Guard};
/// use serde_json::json;
///
/// let enough_coins = Guard::new("enoughCoins", |ctx: &Context, _event: &Event| {
///     ctx.get("coins").and_then(|v| v.as_i64()).unwrap_or(0) >= 3
/// });
///
/// let mut context = Context::new();
/// context.insert("coins".into(), json!(2));
/// assert!(!enough_coins.check(&context, &Event::new("INSERT_COIN")));
///
/// context.insert("coins".into(), json!(3));
/// assert!(enough_coins.check(&context, &Event::new("INSERT_COIN")));
/// ```
#[derive(Clone)]
pub struct Guard {
    name: String,
    predicate: Predicate,
}

impl Guard {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic, must not mutate anything, and
    /// must be thread-safe (Send + Sync).
    pub fn new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Context, &Event) -> bool + Send + Sync + 'static,
    {
        Guard {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if the guard allows the transition for this context and event.
    pub fn check(&self, context: &Context, event: &Event) -> bool {
        (self.predicate)(context, event)
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Guard").field(&self.name).finish()
    }
}

/// All guards must pass; an empty list always passes.
pub(crate) fn all_pass(guards: &[Guard], context: &Context, event: &Event) -> bool {
    guards.iter().all(|guard| guard.check(context, event))
}
