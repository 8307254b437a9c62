//! Machine definitions and their builder.

use super::error::DefinitionError;
use super::state_node::StateNode;
use super::transition::Transition;
use crate::core::{Context, StateValue};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Immutable description of a finite state machine.
///
/// A definition is validated once when built and is never mutated
/// afterwards, so it can be shared (behind an `Arc`) by any number of
/// actors on any number of threads.
#[derive(Debug)]
pub struct MachineDefinition {
    id: String,
    initial: StateValue,
    context: Context,
    states: BTreeMap<StateValue, StateNode>,
    global: HashMap<String, Transition>,
}

impl MachineDefinition {
    /// Start building a definition with the given diagnostic id.
    pub fn builder(id: impl Into<String>) -> MachineBuilder {
        MachineBuilder::new(id)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn initial_state(&self) -> &StateValue {
        &self.initial
    }

    /// A fresh copy of the initial context. Every call returns an
    /// independent value.
    pub fn initial_context(&self) -> Context {
        self.context.clone()
    }

    pub fn state(&self, value: &StateValue) -> Option<&StateNode> {
        self.states.get(value)
    }

    pub fn contains_state(&self, value: &str) -> bool {
        self.states.contains_key(value)
    }

    /// Defined state values, in sorted order.
    pub fn state_values(&self) -> impl Iterator<Item = &StateValue> {
        self.states.keys()
    }

    /// Find the transition handling `event_type` in `state`.
    ///
    /// A handler declared on the state shadows a global handler for the
    /// same event type.
    pub fn transition_for(&self, state: &StateValue, event_type: &str) -> Option<&Transition> {
        self.states
            .get(state)
            .and_then(|node| node.transition_for(event_type))
            .or_else(|| self.global.get(event_type))
    }
}

/// Builder for machine definitions with a fluent API.
///
/// # Example
///
/// ```rust
/// use statecraft::definition::{DefinitionError, MachineDefinition, StateNode, Transition};
/// use serde_json::json;
///
/// let machine = MachineDefinition::builder("toggle")
///     .initial("inactive")
///     .context(json!({ "count": 0 }))
///     .state("inactive", StateNode::new().on("TOGGLE", Transition::to("active")))
///     .state("active", StateNode::new().on("TOGGLE", Transition::to("inactive")))
///     .build()
///     .unwrap();
/// assert_eq!(machine.initial_state().as_str(), "inactive");
///
/// let broken = MachineDefinition::builder("broken")
///     .initial("missing")
///     .state("present", StateNode::new())
///     .build();
/// assert!(matches!(broken, Err(DefinitionError::InvalidInitialState { .. })));
/// ```
pub struct MachineBuilder {
    id: String,
    initial: Option<StateValue>,
    context: Value,
    states: BTreeMap<StateValue, StateNode>,
    global: HashMap<String, Transition>,
}

impl MachineBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            initial: None,
            context: Value::Object(Context::new()),
            states: BTreeMap::new(),
            global: HashMap::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: impl Into<StateValue>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Set the initial context. Must be a JSON object; defaults to `{}`.
    pub fn context(mut self, context: Value) -> Self {
        self.context = context;
        self
    }

    /// Declare a state, replacing any earlier declaration of the same value.
    pub fn state(mut self, value: impl Into<StateValue>, node: StateNode) -> Self {
        self.states.insert(value.into(), node);
        self
    }

    /// Declare a global transition, used from any state that does not
    /// handle `event_type` itself.
    pub fn on(mut self, event_type: impl Into<String>, transition: Transition) -> Self {
        self.global.insert(event_type.into(), transition);
        self
    }

    /// Check the configuration, accumulating every problem found.
    ///
    /// The initial-state check is always reported first.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<DefinitionError>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<DefinitionError>>> = Vec::new();

        checks.push(match &self.initial {
            None => Validation::fail(DefinitionError::MissingInitialState),
            Some(initial) if !self.states.contains_key(initial) => {
                Validation::fail(DefinitionError::InvalidInitialState {
                    machine: self.id.clone(),
                    initial: initial.clone(),
                })
            }
            Some(_) => Validation::success(()),
        });

        checks.push(if self.context.is_object() {
            Validation::success(())
        } else {
            Validation::fail(DefinitionError::ContextNotObject {
                machine: self.id.clone(),
            })
        });

        for (state, node) in &self.states {
            let mut handlers: Vec<(&str, &Transition)> = node.transitions().collect();
            handlers.sort_by_key(|(event, _)| *event);
            for (event, transition) in handlers {
                checks.push(self.check_target(Some(state), event, transition));
            }
        }

        let mut global: Vec<(&String, &Transition)> = self.global.iter().collect();
        global.sort_by_key(|(event, _)| *event);
        for (event, transition) in global {
            checks.push(self.check_target(None, event, transition));
        }

        Validation::all_vec(checks).map(|_| ())
    }

    fn check_target(
        &self,
        state: Option<&StateValue>,
        event: &str,
        transition: &Transition,
    ) -> Validation<(), NonEmptyVec<DefinitionError>> {
        match transition.target() {
            Some(target) if !self.states.contains_key(target) => {
                Validation::fail(DefinitionError::UnknownTarget {
                    machine: self.id.clone(),
                    state: state.cloned(),
                    event: event.to_string(),
                    target: target.clone(),
                })
            }
            _ => Validation::success(()),
        }
    }

    /// Build the definition, failing with the first configuration error.
    pub fn build(self) -> Result<MachineDefinition, DefinitionError> {
        if let Validation::Failure(errors) = self.validate() {
            if let Some(first) = errors.iter().next() {
                return Err(first.clone());
            }
        }

        let initial = self.initial.ok_or(DefinitionError::MissingInitialState)?;
        let Value::Object(context) = self.context else {
            return Err(DefinitionError::ContextNotObject { machine: self.id });
        };

        Ok(MachineDefinition {
            id: self.id,
            initial,
            context,
            states: self.states,
            global: self.global,
        })
    }
}
