//! The self reference handed to actions.

use crate::core::Event;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Mailbox = Arc<Mutex<VecDeque<Event>>>;

/// Handle to an actor, as seen from inside its own actions.
///
/// Events sent through an `ActorRef` are queued and processed, in order,
/// once the event currently being handled has fully completed. A clone may
/// be kept by an effect (for instance a timer) and used later; its events
/// are picked up by the next `Actor::send` or `Actor::drain_mailbox`.
#[derive(Clone, Debug)]
pub struct ActorRef {
    id: Arc<str>,
    machine: Arc<str>,
    mailbox: Mailbox,
}

impl ActorRef {
    pub(crate) fn new(id: &str, machine: &str) -> Self {
        Self {
            id: Arc::from(id),
            machine: Arc::from(machine),
            mailbox: Mailbox::default(),
        }
    }

    /// A reference not attached to any actor, for exercising action bodies
    /// in isolation. Events sent to it are only queued.
    pub fn detached(id: &str) -> Self {
        Self::new(id, "detached")
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn machine_id(&self) -> &str {
        &self.machine
    }

    /// Queue an event for the actor.
    pub fn send(&self, event: impl Into<Event>) {
        self.lock().push_back(event.into());
    }

    /// Number of queued events.
    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    pub(crate) fn take_next(&self) -> Option<Event> {
        self.lock().pop_front()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Event>> {
        self.mailbox.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_queued_in_order() {
        let actor = ActorRef::detached("a1");
        actor.send("FIRST");
        actor.send(Event::new("SECOND"));

        assert_eq!(actor.pending(), 2);
        assert_eq!(actor.take_next(), Some(Event::new("FIRST")));
        assert_eq!(actor.take_next(), Some(Event::new("SECOND")));
        assert_eq!(actor.take_next(), None);
    }

    #[test]
    fn clones_share_the_mailbox() {
        let actor = ActorRef::new("a1", "machine");
        let clone = actor.clone();
        clone.send("PING");

        assert_eq!(actor.pending(), 1);
        assert_eq!(clone.id(), "a1");
        assert_eq!(clone.machine_id(), "machine");
    }
}
