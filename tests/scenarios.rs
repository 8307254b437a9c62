//! End-to-end scenarios driving actors through their public API.

use serde_json::json;
use statecraft::{
    Action, ActionError, Actor, ActorRef, Context, Event, MachineDefinition, StateNode, Status,
    Transition,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

fn increment(key: &'static str) -> Action {
    Action::assign(format!("increment:{key}"), move |ctx: &Context, _: &Event, _: &ActorRef| {
        json!({ key: ctx[key].as_i64().unwrap_or(0) + 1 })
    })
}

#[test]
fn toggle_then_increment() {
    let machine = MachineDefinition::builder("toggle")
        .initial("inactive")
        .context(json!({ "count": 0 }))
        .state("inactive", StateNode::new().on("TOGGLE", Transition::to("active")))
        .state(
            "active",
            StateNode::new()
                .on("TOGGLE", Transition::to("inactive"))
                .on("INCREMENT", Transition::internal().action(increment("count"))),
        )
        .build()
        .unwrap();

    let mut actor = Actor::new(machine);
    actor.send("TOGGLE");
    actor.send("INCREMENT");

    assert_eq!(
        serde_json::to_value(&*actor.snapshot()).unwrap(),
        json!({ "value": "active", "context": { "count": 1 }, "status": "active" })
    );
}

#[test]
fn turnstile_unlocks_once_enough_coins() {
    let machine = MachineDefinition::builder("turnstile")
        .initial("locked")
        .context(json!({ "coins": 2 }))
        .state(
            "locked",
            StateNode::new()
                .on("ADD_COIN", Transition::internal().action(increment("coins")))
                .on(
                    "INSERT_COIN",
                    Transition::to("unlocked").when("enoughCoins", |ctx: &Context, _: &Event| {
                        ctx["coins"].as_i64().unwrap_or(0) >= 3
                    }),
                ),
        )
        .state("unlocked", StateNode::new())
        .build()
        .unwrap();

    let mut actor = Actor::new(machine);

    assert!(!actor.can(&Event::new("INSERT_COIN")));
    actor.send("INSERT_COIN");
    assert!(actor.matches("locked"));

    actor.send("ADD_COIN");
    assert_eq!(actor.snapshot().context()["coins"], json!(3));

    actor.send("INSERT_COIN");
    assert!(actor.matches("unlocked"));
}

#[test]
fn reentering_self_transition_runs_exit_and_entry() {
    let push = |label: &'static str| {
        Action::assign(label, move |ctx: &Context, _: &Event, _: &ActorRef| {
            let mut log = ctx["log"].as_array().cloned().unwrap_or_default();
            log.push(json!(label));
            json!({ "log": log })
        })
    };

    let machine = MachineDefinition::builder("counter")
        .initial("active")
        .context(json!({ "log": [] }))
        .state(
            "active",
            StateNode::new()
                .entry(push("entered"))
                .exit(push("exited"))
                .on("INCREMENT", Transition::to("active").reenter(true)),
        )
        .build()
        .unwrap();

    let mut actor = Actor::new(machine);
    assert_eq!(actor.snapshot().context()["log"], json!(["entered"]));

    actor.send("INCREMENT");
    assert_eq!(
        actor.snapshot().context()["log"],
        json!(["entered", "exited", "entered"])
    );
}

#[test]
fn faulting_action_isolates_the_actor() {
    let machine = MachineDefinition::builder("fragile")
        .initial("ok")
        .context(json!({ "count": 0 }))
        .state(
            "ok",
            StateNode::new()
                .on("INCREMENT", Transition::internal().action(increment("count")))
                .on(
                    "FAIL",
                    Transition::internal().action(Action::try_effect(
                        "explode",
                        |_: &Context, _: &Event, _: &ActorRef| Err(ActionError::failed("boom")),
                    )),
                ),
        )
        .build()
        .unwrap();

    let mut actor = Actor::new(machine);
    actor.send("FAIL");
    assert_eq!(actor.snapshot().status(), Status::Error);

    actor.send("INCREMENT");
    let snapshot = actor.snapshot();
    assert_eq!(snapshot.status(), Status::Error);
    assert_eq!(snapshot.context()["count"], json!(0));
}

#[test]
fn unsubscribed_callback_stops_receiving() {
    let machine = MachineDefinition::builder("toggle")
        .initial("off")
        .state("off", StateNode::new().on("TOGGLE", Transition::to("on")))
        .state("on", StateNode::new().on("TOGGLE", Transition::to("off")))
        .build()
        .unwrap();
    let mut actor = Actor::new(machine);
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let subscription = actor.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    actor.send("TOGGLE");
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    subscription.unsubscribe();
    actor.send("TOGGLE");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(actor.subscriber_count(), 0);
}

#[test]
fn panicking_subscriber_does_not_starve_others() {
    let machine = MachineDefinition::builder("toggle")
        .initial("off")
        .state("off", StateNode::new().on("TOGGLE", Transition::to("on")))
        .state("on", StateNode::new())
        .build()
        .unwrap();
    let mut actor = Actor::new(machine);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    let _faulty = actor.subscribe(|snapshot| {
        if snapshot.matches("on") {
            panic!("subscriber exploded");
        }
    });
    let _healthy = actor.subscribe(move |snapshot| {
        sink.lock().unwrap().push(snapshot.value().to_string());
    });

    actor.send("TOGGLE");

    assert_eq!(*seen.lock().unwrap(), vec!["off", "on"]);
    assert!(actor.matches("on"));
    assert_eq!(actor.status(), Status::Active);
}
