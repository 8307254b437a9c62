//! Declarative transitions.

use crate::core::{Action, Context, Event, Guard, StateValue};

/// A transition taken in response to one event type.
///
/// A transition without a target keeps the current state (an internal
/// transition) and runs only its own actions, unless `reenter` is set.
///
/// # Example
///
/// ```rust
/// use statecraft::definition::Transition;
/// use statecraft::core::{Context, Event};
///
/// let unlock = Transition::to("unlocked")
///     .when("enoughCoins", |ctx: &Context, _: &Event| {
///         ctx["coins"].as_i64().unwrap_or(0) >= 3
///     });
/// assert_eq!(unlock.target().map(|t| t.as_str()), Some("unlocked"));
/// assert_eq!(unlock.guards().len(), 1);
///
/// let stay = Transition::internal();
/// assert!(stay.target().is_none());
/// assert!(!stay.is_reenter());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Transition {
    target: Option<StateValue>,
    actions: Vec<Action>,
    guards: Vec<Guard>,
    reenter: bool,
}

impl Transition {
    /// Transition to `target`.
    pub fn to(target: impl Into<StateValue>) -> Self {
        Self {
            target: Some(target.into()),
            ..Self::default()
        }
    }

    /// Transition that keeps the current state.
    pub fn internal() -> Self {
        Self::default()
    }

    /// Append an action; actions run in the order they are added.
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn actions(mut self, actions: impl IntoIterator<Item = Action>) -> Self {
        self.actions.extend(actions);
        self
    }

    /// Attach a guard. Every attached guard must pass for the transition
    /// to fire.
    pub fn guard(mut self, guard: Guard) -> Self {
        self.guards.push(guard);
        self
    }

    /// Attach a guard built from a closure.
    pub fn when<F>(self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Context, &Event) -> bool + Send + Sync + 'static,
    {
        self.guard(Guard::new(name, predicate))
    }

    /// Run exit and entry actions even when the target is the current state.
    pub fn reenter(mut self, reenter: bool) -> Self {
        self.reenter = reenter;
        self
    }

    pub fn target(&self) -> Option<&StateValue> {
        self.target.as_ref()
    }

    pub fn action_list(&self) -> &[Action] {
        &self.actions
    }

    pub fn guards(&self) -> &[Guard] {
        &self.guards
    }

    pub fn is_reenter(&self) -> bool {
        self.reenter
    }
}
