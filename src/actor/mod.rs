//! The actor runtime.
//!
//! An [`Actor`] owns one live snapshot of a machine, applies events to it one
//! at a time, executes the actions the engine selects, and notifies
//! subscribers after every effective change. Everything runs synchronously
//! on the caller's stack: `send` returns only once the event (and any event
//! the actions queued for the actor itself) has been fully processed.

mod actor_ref;
mod error;
mod options;
mod shared;
mod subscription;

pub use actor_ref::ActorRef;
pub use error::{ActionError, ActionFault};
pub use options::{ActorOptions, IdSource, DEFAULT_HISTORY_LIMIT};
pub use shared::SharedActor;
pub use subscription::Subscription;

use crate::core::{
    merge, Action, ActionKind, Context, Event, Snapshot, StateHistory, StateTransition, StateValue,
    Status,
};
use crate::definition::MachineDefinition;
use crate::engine::{self, Outcome, Step};
use chrono::Utc;
use serde_json::Value;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, OnceLock};
use subscription::Subscribers;

/// A running instance of a machine definition.
///
/// # Example
///
/// ```rust
/// use statecraft::actor::{Actor, ActorRef};
/// use statecraft::core::{Action, Context, Event, Status};
/// use statecraft::definition::{MachineDefinition, StateNode, Transition};
/// use serde_json::json;
///
/// let increment = Action::assign("increment", |ctx: &Context, _: &Event, _: &ActorRef| {
///     json!({ "count": ctx["count"].as_i64().unwrap_or(0) + 1 })
/// });
///
/// let machine = MachineDefinition::builder("toggle")
///     .initial("inactive")
///     .context(json!({ "count": 0 }))
///     .state("inactive", StateNode::new().on("TOGGLE", Transition::to("active")))
///     .state(
///         "active",
///         StateNode::new()
///             .on("TOGGLE", Transition::to("inactive"))
///             .on("INCREMENT", Transition::internal().action(increment)),
///     )
///     .build()
///     .unwrap();
///
/// let mut actor = Actor::new(machine);
/// actor.send("TOGGLE");
/// actor.send("INCREMENT");
///
/// let snapshot = actor.snapshot();
/// assert!(snapshot.matches("active"));
/// assert_eq!(snapshot.context()["count"], json!(1));
/// assert_eq!(snapshot.status(), Status::Active);
/// ```
pub struct Actor {
    id: String,
    definition: Arc<MachineDefinition>,
    current: Snapshot,
    cache: OnceLock<Arc<Snapshot>>,
    subscribers: Subscribers,
    self_ref: ActorRef,
    history: StateHistory<StateValue>,
    last_error: Option<ActionFault>,
    options: ActorOptions,
}

impl Actor {
    /// Create an actor with default options.
    pub fn new(definition: impl Into<Arc<MachineDefinition>>) -> Self {
        Self::with_options(definition, ActorOptions::default())
    }

    /// Create an actor and run the initial state's entry actions.
    ///
    /// If an entry action fails, the actor starts out in `error`.
    pub fn with_options(
        definition: impl Into<Arc<MachineDefinition>>,
        options: ActorOptions,
    ) -> Self {
        let definition = definition.into();
        let id = options.next_id();
        let self_ref = ActorRef::new(&id, definition.id());
        let initial = definition.initial_state().clone();
        let current = Snapshot::new(initial.clone(), definition.initial_context(), Status::Active);

        let mut actor = Self {
            id,
            definition,
            current,
            cache: OnceLock::new(),
            subscribers: Subscribers::default(),
            self_ref,
            history: StateHistory::new(),
            last_error: None,
            options,
        };

        let entry = actor
            .definition
            .state(&initial)
            .map(|node| node.entry_actions().to_vec())
            .unwrap_or_default();
        let event = Event::init();
        let (context, result) = run_actions(
            &entry,
            &event,
            actor.current.context().clone(),
            &actor.self_ref,
        );
        actor.current.set_context(context);
        if let Err(fault) = result {
            actor.fail(fault);
        }

        tracing::debug!(
            actor = %actor.id,
            machine = %actor.definition.id(),
            state = %initial,
            status = %actor.current.status(),
            "Actor created"
        );

        actor.drain_mailbox();
        actor
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn definition(&self) -> &Arc<MachineDefinition> {
        &self.definition
    }

    pub fn status(&self) -> Status {
        self.current.status()
    }

    /// A handle to this actor, as passed to its actions.
    pub fn actor_ref(&self) -> ActorRef {
        self.self_ref.clone()
    }

    /// Process `event`, then any events queued through the actor's
    /// `ActorRef`, each to completion and in order.
    ///
    /// Unhandled events and events rejected by guards are silent no-ops.
    /// Events reaching a non-active actor are ignored.
    pub fn send(&mut self, event: impl Into<Event>) {
        self.self_ref.send(event);
        self.drain_mailbox();
    }

    /// Process every queued event. Returns how many were taken from the
    /// mailbox.
    pub fn drain_mailbox(&mut self) -> usize {
        let mut processed = 0;
        while let Some(event) = self.self_ref.take_next() {
            self.process(event);
            processed += 1;
        }
        processed
    }

    fn process(&mut self, event: Event) {
        let status = self.current.status();
        if !status.accepts_events() {
            if self.options.diagnostics_enabled() {
                tracing::warn!(
                    actor = %self.id,
                    machine = %self.definition.id(),
                    event = %event.event_type(),
                    status = %status,
                    "Event sent to a non-active actor; ignoring"
                );
            }
            return;
        }

        let step = match engine::transition(&self.definition, &self.current, &event) {
            Outcome::NoTransition => {
                tracing::trace!(
                    actor = %self.id,
                    state = %self.current.value(),
                    event = %event.event_type(),
                    "No transition"
                );
                return;
            }
            Outcome::Transition(step) => step,
        };

        let (context, result) = run_actions(
            &step.actions,
            &event,
            self.current.context().clone(),
            &self.self_ref,
        );
        match result {
            Ok(()) => {
                tracing::debug!(
                    actor = %self.id,
                    from = %step.source,
                    to = %step.target,
                    event = %event.event_type(),
                    actions = step.actions.len(),
                    "Transition applied"
                );
                self.record(&step, &event);
                self.current.replace(step.target, context);
            }
            Err(fault) => {
                self.current.set_context(context);
                self.fail(fault);
            }
        }

        self.invalidate();
        self.notify();
    }

    fn fail(&mut self, fault: ActionFault) {
        tracing::error!(
            actor = %self.id,
            machine = %self.definition.id(),
            state = %self.current.value(),
            error = %fault,
            "Action failed; actor is now in error"
        );
        self.current.set_status(Status::Error);
        self.last_error = Some(fault);
    }

    fn record(&mut self, step: &Step, event: &Event) {
        let limit = self.options.max_history();
        if limit == 0 {
            return;
        }
        let transition = StateTransition {
            from: step.source.clone(),
            to: step.target.clone(),
            event: event.event_type().to_string(),
            timestamp: Utc::now(),
        };
        self.history = std::mem::take(&mut self.history)
            .record(transition)
            .retain_last(limit);
    }

    /// The current snapshot.
    ///
    /// Repeated calls without an intervening change return the same `Arc`.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(self.cache.get_or_init(|| Arc::new(self.current.clone())))
    }

    fn invalidate(&mut self) {
        self.cache.take();
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        self.subscribers.notify(&snapshot, &self.id);
    }

    /// Register `callback`. It is called immediately with the current
    /// snapshot and then after every effective change.
    ///
    /// Callbacks must not call back into the actor that notifies them
    /// (they run while it is mutably borrowed); use the `ActorRef` to
    /// queue events instead.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Snapshot) + Send + Sync + 'static,
    {
        let snapshot = self.snapshot();
        self.subscribers.add(Box::new(callback), &snapshot, &self.id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Whether the current state value is `value`.
    pub fn matches(&self, value: &str) -> bool {
        self.current.matches(value)
    }

    /// Whether `event` would cause a transition from the current snapshot.
    /// Runs guards only; no action runs and nothing changes.
    pub fn can(&self, event: &Event) -> bool {
        engine::transition(&self.definition, &self.current, event).is_transition()
    }

    /// Resume a stopped actor. Has no effect in any other status; an actor
    /// in `error` stays there.
    pub fn start(&mut self) {
        self.set_status_from(Status::Stopped, Status::Active);
    }

    /// Stop an active actor. Internal state is kept, so it can be started
    /// again.
    pub fn stop(&mut self) {
        self.set_status_from(Status::Active, Status::Stopped);
    }

    fn set_status_from(&mut self, from: Status, to: Status) {
        let status = self.current.status();
        if status != from {
            if status != to && self.options.diagnostics_enabled() {
                tracing::warn!(
                    actor = %self.id,
                    status = %status,
                    requested = %to,
                    "Status change ignored"
                );
            }
            return;
        }
        tracing::debug!(actor = %self.id, from = %from, to = %to, "Status changed");
        self.current.set_status(to);
        self.invalidate();
        self.notify();
    }

    pub fn history(&self) -> &StateHistory<StateValue> {
        &self.history
    }

    /// The fault that put the actor into `error`, if any.
    pub fn last_error(&self) -> Option<&ActionFault> {
        self.last_error.as_ref()
    }
}

impl std::fmt::Debug for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Actor")
            .field("id", &self.id)
            .field("machine", &self.definition.id())
            .field("snapshot", &self.current)
            .finish_non_exhaustive()
    }
}

/// Run `actions` in order against `context`.
///
/// Stops at the first failing action; the returned context keeps every
/// update applied before the failure.
fn run_actions(
    actions: &[Action],
    event: &Event,
    mut context: Context,
    actor: &ActorRef,
) -> (Context, Result<(), ActionFault>) {
    for action in actions {
        if let Err(source) = run_action(action, event, &mut context, actor) {
            let fault = ActionFault {
                action: action.name().to_string(),
                event: event.event_type().to_string(),
                source,
            };
            return (context, Err(fault));
        }
    }
    (context, Ok(()))
}

fn run_action(
    action: &Action,
    event: &Event,
    context: &mut Context,
    actor: &ActorRef,
) -> Result<(), ActionError> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| match action.kind() {
        ActionKind::Assign(body) => match body(context, event, actor)? {
            Value::Object(partial) => {
                merge(context, partial);
                Ok(())
            }
            other => Err(ActionError::InvalidAssignment {
                found: json_kind(&other).to_string(),
            }),
        },
        ActionKind::Effect(body) => body(context, event, actor),
    }));
    outcome.unwrap_or_else(|payload| Err(ActionError::from_panic(payload.as_ref())))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
