//! The transition function.

use crate::core::{all_pass, Action, Event, Snapshot, StateValue};
use crate::definition::MachineDefinition;

/// A matched transition, ready for an actor to execute.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    pub source: StateValue,
    pub target: StateValue,
    /// Exit actions of `source`, then the transition's actions, then entry
    /// actions of `target`.
    pub actions: Vec<Action>,
    /// Whether `source` is exited and `target` entered.
    pub exits_source: bool,
}

/// Result of evaluating an event against a snapshot.
///
/// `NoTransition` is distinct from a matched transition that happens to
/// keep the state and carry no actions.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    NoTransition,
    Transition(Step),
}

impl Outcome {
    pub fn is_transition(&self) -> bool {
        matches!(self, Self::Transition(_))
    }

    pub fn into_step(self) -> Option<Step> {
        match self {
            Self::Transition(step) => Some(step),
            Self::NoTransition => None,
        }
    }
}

/// Compute the outcome of `event` for `snapshot` under `definition`.
///
/// Pure: guards are evaluated but no action is run and nothing is mutated.
/// The snapshot's status is not consulted; gating on status belongs to the
/// actor.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{Context, Event, Snapshot, StateValue, Status};
/// use statecraft::definition::{MachineDefinition, StateNode, Transition};
/// use statecraft::engine::{transition, Outcome};
///
/// let machine = MachineDefinition::builder("light")
///     .initial("off")
///     .state("off", StateNode::new().on("FLIP", Transition::to("on")))
///     .state("on", StateNode::new().on("FLIP", Transition::to("off")))
///     .build()
///     .unwrap();
/// let snapshot = Snapshot::new(StateValue::from("off"), Context::new(), Status::Active);
///
/// let Outcome::Transition(step) = transition(&machine, &snapshot, &Event::new("FLIP")) else {
///     panic!("FLIP is handled in 'off'");
/// };
/// assert_eq!(step.target.as_str(), "on");
///
/// let outcome = transition(&machine, &snapshot, &Event::new("UNKNOWN"));
/// assert_eq!(outcome, Outcome::NoTransition);
/// ```
pub fn transition(definition: &MachineDefinition, snapshot: &Snapshot, event: &Event) -> Outcome {
    let source = snapshot.value();

    let Some(handler) = definition.transition_for(source, event.event_type()) else {
        return Outcome::NoTransition;
    };

    if !all_pass(handler.guards(), snapshot.context(), event) {
        return Outcome::NoTransition;
    }

    let target = handler.target().unwrap_or(source);
    let exits_source = target != source || handler.is_reenter();

    let mut actions = Vec::new();
    if exits_source {
        if let Some(node) = definition.state(source) {
            actions.extend_from_slice(node.exit_actions());
        }
    }
    actions.extend_from_slice(handler.action_list());
    if exits_source {
        if let Some(node) = definition.state(target) {
            actions.extend_from_slice(node.entry_actions());
        }
    }

    Outcome::Transition(Step {
        source: source.clone(),
        target: target.clone(),
        actions,
        exits_source,
    })
}
