//! Toggle Machine
//!
//! This demo drives a two-state machine through an actor and prints every
//! snapshot its subscriber receives.
//!
//! Key concepts:
//! - Internal transitions with assignment actions
//! - Subscriptions delivering the current snapshot immediately
//! - Stopping and restarting an actor
//!
//! Run with: cargo run --example toggle

use serde_json::json;
use statecraft::{Action, Actor, ActorRef, Context, Event, MachineDefinition, StateNode, Transition};

fn main() {
    println!("=== Toggle Machine ===\n");

    let increment = Action::assign("increment", |ctx: &Context, _: &Event, _: &ActorRef| {
        json!({ "count": ctx["count"].as_i64().unwrap_or(0) + 1 })
    });

    let machine = MachineDefinition::builder("toggle")
        .initial("inactive")
        .context(json!({ "count": 0 }))
        .state("inactive", StateNode::new().on("TOGGLE", Transition::to("active")))
        .state(
            "active",
            StateNode::new()
                .on("TOGGLE", Transition::to("inactive"))
                .on("INCREMENT", Transition::internal().action(increment)),
        )
        .build()
        .unwrap();

    let mut actor = Actor::new(machine);
    let subscription = actor.subscribe(|snapshot| {
        println!(
            "  [{}] {} {}",
            snapshot.status(),
            snapshot.value(),
            serde_json::Value::Object(snapshot.context().clone())
        );
    });

    println!("\nINCREMENT while inactive is ignored:");
    actor.send("INCREMENT");

    println!("\nTOGGLE, then INCREMENT twice:");
    actor.send("TOGGLE");
    actor.send("INCREMENT");
    actor.send("INCREMENT");

    println!("\nStop, send TOGGLE (ignored), start again:");
    actor.stop();
    actor.send("TOGGLE");
    actor.start();

    subscription.unsubscribe();
    println!("\nTransitions recorded: {}", actor.history().len());

    println!("\n=== Demo Complete ===");
}
