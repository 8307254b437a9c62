//! Transition history tracking.
//!
//! The history is an ordered log of the transitions an actor has applied.
//! It is observational only: nothing in the runtime reads it back.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single applied transition.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{StateTransition, StateValue};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: StateValue::from("locked"),
///     to: StateValue::from("unlocked"),
///     event: "INSERT_COIN".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert!(!transition.is_internal());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// Type of the event that triggered the transition
    pub event: String,
    /// When the transition was applied
    pub timestamp: DateTime<Utc>,
}

impl<S: State> StateTransition<S> {
    /// Whether source and target are the same state.
    pub fn is_internal(&self) -> bool {
        self.from == self.to
    }
}

/// Ordered history of state transitions.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{StateHistory, StateTransition, StateValue};
/// use chrono::Utc;
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: StateValue::from("inactive"),
///         to: StateValue::from("active"),
///         event: "TOGGLE".to_string(),
///         timestamp: Utc::now(),
///     })
///     .record(StateTransition {
///         from: StateValue::from("active"),
///         to: StateValue::from("inactive"),
///         event: "TOGGLE".to_string(),
///         timestamp: Utc::now(),
///     });
///
/// let path = history.get_path();
/// assert_eq!(path.len(), 3);
/// assert_eq!(path[2], &StateValue::from("inactive"));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning the extended history.
    pub fn record(mut self, transition: StateTransition<S>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Keep only the `limit` most recent transitions.
    pub fn retain_last(mut self, limit: usize) -> Self {
        if self.transitions.len() > limit {
            let excess = self.transitions.len() - limit;
            self.transitions.drain(..excess);
        }
        self
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the oldest retained transition followed
    /// by the `to` state of each transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the first and last retained transitions.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
