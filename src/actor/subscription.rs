//! Snapshot subscribers.
//!
//! Each notification pass iterates over a copy of the subscriber list taken
//! when the pass starts, so callbacks may unsubscribe themselves or others
//! mid-pass. A subscriber removed during a pass is skipped if it has not
//! been called yet.

use crate::core::Snapshot;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Callback = Box<dyn Fn(&Snapshot) + Send + Sync>;

struct Subscriber {
    id: u64,
    active: AtomicBool,
    callback: Callback,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<Arc<Subscriber>>,
}

/// The set of callbacks observing one actor.
#[derive(Clone, Default)]
pub(crate) struct Subscribers {
    registry: Arc<Mutex<Registry>>,
}

impl Subscribers {
    /// Register `callback`, deliver `current` to it once, and return the
    /// handle that removes it.
    pub(crate) fn add(&self, callback: Callback, current: &Snapshot, actor: &str) -> Subscription {
        let subscriber = {
            let mut registry = self.lock();
            let id = registry.next_id;
            registry.next_id += 1;
            let subscriber = Arc::new(Subscriber {
                id,
                active: AtomicBool::new(true),
                callback,
            });
            registry.entries.push(Arc::clone(&subscriber));
            subscriber
        };

        deliver(&subscriber, current, actor);

        Subscription {
            id: subscriber.id,
            subscriber: Arc::downgrade(&subscriber),
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Deliver `snapshot` to every subscriber registered when the pass
    /// starts and still registered when its turn comes.
    pub(crate) fn notify(&self, snapshot: &Snapshot, actor: &str) {
        let pass: Vec<Arc<Subscriber>> = self.lock().entries.clone();
        for subscriber in &pass {
            if subscriber.active.load(Ordering::SeqCst) {
                deliver(subscriber, snapshot, actor);
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().entries.len()
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        lock_registry(&self.registry)
    }
}

fn lock_registry(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Invoke one callback; a panic is logged and swallowed.
fn deliver(subscriber: &Subscriber, snapshot: &Snapshot, actor: &str) {
    let result = panic::catch_unwind(AssertUnwindSafe(|| (subscriber.callback)(snapshot)));
    if result.is_err() {
        tracing::error!(
            actor,
            subscriber = subscriber.id,
            "Subscriber panicked during notification; continuing with remaining subscribers"
        );
    }
}

/// Handle returned by `Actor::subscribe`.
///
/// Dropping the handle does not unsubscribe; call `unsubscribe`.
pub struct Subscription {
    id: u64,
    subscriber: Weak<Subscriber>,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Remove exactly this subscriber. Calling it again is a no-op.
    pub fn unsubscribe(&self) {
        if let Some(subscriber) = self.subscriber.upgrade() {
            subscriber.active.store(false, Ordering::SeqCst);
        }
        if let Some(registry) = self.registry.upgrade() {
            lock_registry(&registry)
                .entries
                .retain(|entry| entry.id != self.id);
        }
    }

    pub fn is_active(&self) -> bool {
        self.subscriber
            .upgrade()
            .is_some_and(|subscriber| subscriber.active.load(Ordering::SeqCst))
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
