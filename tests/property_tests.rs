//! Property-based tests for the transition engine and actor.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use proptest::prelude::*;
use serde_json::{json, Value};
use statecraft::core::{Action, Context, Event, Snapshot, StateValue, Status};
use statecraft::definition::{MachineDefinition, StateNode, Transition};
use statecraft::engine::{transition, Outcome};
use statecraft::{Actor, ActorRef};
use std::sync::{Arc, Mutex};

const STATES: [&str; 3] = ["idle", "running", "paused"];
const EVENTS: [&str; 5] = ["START", "PAUSE", "RESUME", "STOP", "BOGUS"];

type Log = Arc<Mutex<Vec<String>>>;

fn logging(name: &str, log: &Log) -> Action {
    let log = Arc::clone(log);
    let label = name.to_string();
    Action::effect(name, move |_: &Context, _: &Event, _: &ActorRef| {
        log.lock().unwrap().push(label.clone());
    })
}

fn bump() -> Action {
    Action::assign("bump", |ctx: &Context, _: &Event, _: &ActorRef| {
        json!({ "steps": ctx["steps"].as_i64().unwrap_or(0) + 1 })
    })
}

/// Media-player style machine; `RESUME` is guarded on `allow_resume`.
fn player(log: &Log) -> MachineDefinition {
    let node = |name: &str| {
        StateNode::new()
            .entry(logging(&format!("enter:{name}"), log))
            .exit(logging(&format!("exit:{name}"), log))
    };

    MachineDefinition::builder("player")
        .initial("idle")
        .context(json!({ "steps": 0, "allow_resume": true }))
        .state(
            "idle",
            node("idle").on("START", Transition::to("running").action(bump())),
        )
        .state(
            "running",
            node("running")
                .on("PAUSE", Transition::to("paused").action(bump()))
                .on("STOP", Transition::to("idle")),
        )
        .state(
            "paused",
            node("paused").on(
                "RESUME",
                Transition::to("running")
                    .action(bump())
                    .when("allowed", |ctx: &Context, _: &Event| {
                        ctx["allow_resume"] == json!(true)
                    }),
            ),
        )
        .on("STOP", Transition::to("idle").action(logging("globalStop", log)))
        .build()
        .unwrap()
}

prop_compose! {
    fn arbitrary_state()(index in 0..STATES.len()) -> StateValue {
        StateValue::from(STATES[index])
    }
}

prop_compose! {
    fn arbitrary_event()(index in 0..EVENTS.len(), payload in any::<i64>()) -> Event {
        Event::new(EVENTS[index]).with("payload", json!(payload))
    }
}

prop_compose! {
    fn arbitrary_context()(steps in 0i64..100, allow_resume in any::<bool>()) -> Context {
        json!({ "steps": steps, "allow_resume": allow_resume })
            .as_object()
            .cloned()
            .unwrap()
    }
}

proptest! {
    #[test]
    fn transition_is_pure(
        state in arbitrary_state(),
        context in arbitrary_context(),
        event in arbitrary_event(),
    ) {
        let log: Log = Arc::default();
        let machine = player(&log);
        let snapshot = Snapshot::new(state, context, Status::Active);
        let copy = snapshot.clone();

        let first = transition(&machine, &snapshot, &event);
        let second = transition(&machine, &snapshot, &event);

        prop_assert_eq!(first, second);
        prop_assert_eq!(snapshot, copy);
        prop_assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn state_changes_order_exit_then_transition_then_entry(
        state in arbitrary_state(),
        context in arbitrary_context(),
        event in arbitrary_event(),
    ) {
        let log: Log = Arc::default();
        let machine = player(&log);
        let snapshot = Snapshot::new(state.clone(), context, Status::Active);

        if let Outcome::Transition(step) = transition(&machine, &snapshot, &event) {
            let names: Vec<&str> = step.actions.iter().map(Action::name).collect();
            if step.exits_source {
                let exit = format!("exit:{state}");
                let entry = format!("enter:{}", step.target);
                prop_assert_eq!(names.first().copied(), Some(exit.as_str()));
                prop_assert_eq!(names.last().copied(), Some(entry.as_str()));
            } else {
                prop_assert!(names.iter().all(|n| !n.starts_with("exit:") && !n.starts_with("enter:")));
            }
        }
    }

    #[test]
    fn unhandled_events_never_change_the_actor(
        events in prop::collection::vec(arbitrary_event(), 0..20),
    ) {
        let log: Log = Arc::default();
        let mut actor = Actor::new(player(&log));

        for event in events {
            let before = actor.snapshot();
            let log_len = log.lock().unwrap().len();
            let handled = actor.can(&event);

            actor.send(event);

            if !handled {
                prop_assert!(Arc::ptr_eq(&before, &actor.snapshot()));
                prop_assert_eq!(log.lock().unwrap().len(), log_len);
            }
        }
    }

    #[test]
    fn blocked_guard_behaves_like_no_transition(steps in 0i64..100) {
        let log: Log = Arc::default();
        let machine = player(&log);
        let context = json!({ "steps": steps, "allow_resume": false })
            .as_object()
            .cloned()
            .unwrap();
        let snapshot = Snapshot::new(StateValue::from("paused"), context, Status::Active);

        prop_assert_eq!(
            transition(&machine, &snapshot, &Event::new("RESUME")),
            Outcome::NoTransition
        );
    }

    #[test]
    fn stopped_actor_ignores_every_event(
        events in prop::collection::vec(arbitrary_event(), 1..20),
    ) {
        let log: Log = Arc::default();
        let mut actor = Actor::new(player(&log));
        actor.stop();
        let frozen = actor.snapshot();

        for event in events {
            actor.send(event);
        }

        prop_assert!(Arc::ptr_eq(&frozen, &actor.snapshot()));
        prop_assert_eq!(frozen.status(), Status::Stopped);
    }

    #[test]
    fn assignments_only_touch_returned_keys(
        extra in "[a-z]{1,8}",
        value in any::<i32>(),
    ) {
        prop_assume!(extra != "n");
        let machine = MachineDefinition::builder("merge")
            .initial("a")
            .context(json!({ "n": 0, extra.clone(): value }))
            .state(
                "a",
                StateNode::new().on(
                    "SET",
                    Transition::internal().action(Action::assign(
                        "set",
                        |_: &Context, event: &Event, _: &ActorRef| {
                            json!({ "n": event.get("n").cloned().unwrap_or(Value::Null) })
                        },
                    )),
                ),
            )
            .build()
            .unwrap();

        let mut actor = Actor::new(machine);
        actor.send(Event::new("SET").with("n", json!(7)));

        let snapshot = actor.snapshot();
        prop_assert_eq!(&snapshot.context()["n"], &json!(7));
        prop_assert_eq!(&snapshot.context()[extra.as_str()], &json!(value));
    }
}
