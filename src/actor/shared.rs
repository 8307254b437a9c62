//! Mutual exclusion for actors driven from several threads or tasks.

use super::{Actor, Subscription};
use crate::core::{Event, Snapshot, Status};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A cloneable, lock-protected handle to an [`Actor`].
///
/// Concurrent `send` calls are serialized: each event still runs to
/// completion before the next one starts. Subscriber callbacks run while
/// the lock is held and must not call back into the same `SharedActor`.
///
/// # Example
///
/// ```rust
/// use statecraft::actor::{Actor, SharedActor};
/// use statecraft::definition::{MachineDefinition, StateNode, Transition};
///
/// let machine = MachineDefinition::builder("door")
///     .initial("closed")
///     .state("closed", StateNode::new().on("OPEN", Transition::to("open")))
///     .state("open", StateNode::new().on("CLOSE", Transition::to("closed")))
///     .build()
///     .unwrap();
///
/// let shared = SharedActor::new(Actor::new(machine));
/// let handle = shared.clone();
/// std::thread::spawn(move || handle.send("OPEN")).join().unwrap();
///
/// assert!(shared.snapshot().matches("open"));
/// ```
#[derive(Clone)]
pub struct SharedActor {
    inner: Arc<Mutex<Actor>>,
}

impl SharedActor {
    pub fn new(actor: Actor) -> Self {
        Self {
            inner: Arc::new(Mutex::new(actor)),
        }
    }

    pub fn send(&self, event: impl Into<Event>) {
        self.lock().send(event);
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.lock().snapshot()
    }

    pub fn status(&self) -> Status {
        self.lock().status()
    }

    pub fn can(&self, event: &Event) -> bool {
        self.lock().can(event)
    }

    pub fn matches(&self, value: &str) -> bool {
        self.lock().matches(value)
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Snapshot) + Send + Sync + 'static,
    {
        self.lock().subscribe(callback)
    }

    pub fn start(&self) {
        self.lock().start();
    }

    pub fn stop(&self) {
        self.lock().stop();
    }

    /// Run `f` with exclusive access to the actor.
    pub fn with<R>(&self, f: impl FnOnce(&mut Actor) -> R) -> R {
        f(&mut self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Actor> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<Actor> for SharedActor {
    fn from(actor: Actor) -> Self {
        Self::new(actor)
    }
}
