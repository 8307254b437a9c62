//! Per-state configuration: entry/exit actions and event handlers.

use super::transition::Transition;
use crate::core::Action;
use std::collections::HashMap;

/// Configuration of a single state.
#[derive(Clone, Debug, Default)]
pub struct StateNode {
    entry: Vec<Action>,
    exit: Vec<Action>,
    on: HashMap<String, Transition>,
}

impl StateNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action run when the state becomes current.
    pub fn entry(mut self, action: Action) -> Self {
        self.entry.push(action);
        self
    }

    /// Append an action run when the state stops being current.
    pub fn exit(mut self, action: Action) -> Self {
        self.exit.push(action);
        self
    }

    /// Handle `event_type` with `transition`, replacing any earlier handler
    /// for the same event type.
    pub fn on(mut self, event_type: impl Into<String>, transition: Transition) -> Self {
        self.on.insert(event_type.into(), transition);
        self
    }

    pub fn entry_actions(&self) -> &[Action] {
        &self.entry
    }

    pub fn exit_actions(&self) -> &[Action] {
        &self.exit
    }

    pub fn transition_for(&self, event_type: &str) -> Option<&Transition> {
        self.on.get(event_type)
    }

    pub fn transitions(&self) -> impl Iterator<Item = (&str, &Transition)> {
        self.on.iter().map(|(event, transition)| (event.as_str(), transition))
    }
}
