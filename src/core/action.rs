//! Actions executed by an actor while taking a transition.
//!
//! Actions come in exactly two kinds: assignments, whose result is merged
//! into the context, and effects, which run for their side effects only.

use super::context::Context;
use super::event::Event;
use crate::actor::{ActionError, ActorRef};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Body of an assignment action. Must return a JSON object (the partial
/// context update).
pub type AssignFn =
    Arc<dyn Fn(&Context, &Event, &ActorRef) -> Result<Value, ActionError> + Send + Sync>;

/// Body of an effect action.
pub type EffectFn =
    Arc<dyn Fn(&Context, &Event, &ActorRef) -> Result<(), ActionError> + Send + Sync>;

#[derive(Clone)]
pub enum ActionKind {
    Assign(AssignFn),
    Effect(EffectFn),
}

/// A named unit of work attached to a transition or to a state's entry/exit.
///
/// Two actions are equal when they have the same name and share the same
/// body; cloning an action keeps it equal to the original.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{Action, Context, Event};
/// use statecraft::actor::ActorRef;
/// use serde_json::json;
///
/// let increment = Action::assign("increment", |ctx: &Context, _: &Event, _: &ActorRef| {
///     json!({ "count": ctx["count"].as_i64().unwrap_or(0) + 1 })
/// });
/// let log = Action::effect("log", |ctx: &Context, _: &Event, _: &ActorRef| {
///     println!("count is {}", ctx["count"]);
/// });
///
/// assert!(increment.is_assign());
/// assert!(!log.is_assign());
/// ```
#[derive(Clone)]
pub struct Action {
    name: String,
    kind: ActionKind,
}

impl Action {
    /// Assignment action whose returned object is shallow-merged into context.
    pub fn assign<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Context, &Event, &ActorRef) -> Value + Send + Sync + 'static,
    {
        Self::try_assign(name, move |ctx: &Context, event: &Event, actor: &ActorRef| {
            Ok(f(ctx, event, actor))
        })
    }

    /// Fallible assignment action. An `Err` faults the actor.
    pub fn try_assign<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Context, &Event, &ActorRef) -> Result<Value, ActionError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            kind: ActionKind::Assign(Arc::new(f)),
        }
    }

    /// Effect action. Runs for side effects only.
    pub fn effect<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Context, &Event, &ActorRef) + Send + Sync + 'static,
    {
        Self::try_effect(name, move |ctx: &Context, event: &Event, actor: &ActorRef| {
            f(ctx, event, actor);
            Ok(())
        })
    }

    /// Fallible effect action. An `Err` faults the actor.
    pub fn try_effect<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Context, &Event, &ActorRef) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            kind: ActionKind::Effect(Arc::new(f)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ActionKind {
        &self.kind
    }

    pub fn is_assign(&self) -> bool {
        matches!(self.kind, ActionKind::Assign(_))
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && match (&self.kind, &other.kind) {
                (ActionKind::Assign(a), ActionKind::Assign(b)) => Arc::ptr_eq(a, b),
                (ActionKind::Effect(a), ActionKind::Effect(b)) => Arc::ptr_eq(a, b),
                _ => false,
            }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            ActionKind::Assign(_) => "Assign",
            ActionKind::Effect(_) => "Effect",
        };
        write!(f, "{kind}({:?})", self.name)
    }
}
