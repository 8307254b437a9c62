//! Turnstile
//!
//! This demo shows guarded transitions, entry/exit actions and an effect
//! that queues a follow-up event through the actor's own reference.
//!
//! Key concepts:
//! - Guards gating a transition on context
//! - `can()` as a dry run
//! - Events queued by actions run after the current event completes
//!
//! Run with: cargo run --example turnstile

use serde_json::json;
use statecraft::{Action, Actor, ActorRef, Context, Event, MachineDefinition, StateNode, Transition};

const FARE: i64 = 3;

fn main() {
    println!("=== Turnstile ===\n");

    let add_coin = Action::assign("addCoin", |ctx: &Context, _: &Event, _: &ActorRef| {
        json!({ "coins": ctx["coins"].as_i64().unwrap_or(0) + 1 })
    });
    let pay = Action::assign("pay", |ctx: &Context, _: &Event, _: &ActorRef| {
        json!({ "coins": ctx["coins"].as_i64().unwrap_or(0) - FARE })
    });
    let auto_lock = Action::effect("autoLock", |_: &Context, _: &Event, me: &ActorRef| {
        println!("  (actor {} queues PASS)", me.id());
        me.send("PASS");
    });
    let announce = |message: &'static str| {
        Action::effect(message, move |_: &Context, _: &Event, _: &ActorRef| {
            println!("  {message}");
        })
    };

    let machine = MachineDefinition::builder("turnstile")
        .initial("locked")
        .context(json!({ "coins": 0 }))
        .state(
            "locked",
            StateNode::new()
                .entry(announce("locked"))
                .on("INSERT_COIN", Transition::internal().action(add_coin))
                .on(
                    "PUSH",
                    Transition::to("unlocked")
                        .action(pay)
                        .when("farePaid", |ctx: &Context, _: &Event| {
                            ctx["coins"].as_i64().unwrap_or(0) >= FARE
                        }),
                ),
        )
        .state(
            "unlocked",
            StateNode::new()
                .entry(announce("unlocked"))
                .entry(auto_lock)
                .exit(announce("rotating"))
                .on("PASS", Transition::to("locked")),
        )
        .build()
        .unwrap();

    let mut actor = Actor::new(machine);

    for _ in 0..2 {
        actor.send("INSERT_COIN");
    }
    println!("Can push with 2 coins? {}", actor.can(&Event::new("PUSH")));
    actor.send("PUSH");
    println!("State after push: {}", actor.snapshot().value());

    actor.send("INSERT_COIN");
    println!("Can push with 3 coins? {}", actor.can(&Event::new("PUSH")));
    actor.send("PUSH");

    let snapshot = actor.snapshot();
    println!(
        "Final state: {} with {} coins",
        snapshot.value(),
        snapshot.context()["coins"]
    );

    let path: Vec<&str> = actor.history().get_path().into_iter().map(|s| s.as_str()).collect();
    println!("Path: {}", path.join(" -> "));

    println!("\n=== Demo Complete ===");
}
