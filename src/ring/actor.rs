//! # Ring Actors
//!
//! An actor sits between two resources and runs the same protocol every cycle:
//! lock both in global order, eat, release both, think. After its last cycle it
//! records its departure and leaves.

use super::event::RingEvent;
use super::resource::{ordered_acquire, AcquireOrder, ResourceId};
use super::session::Table;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Position of an actor in the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(pub usize);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where an actor is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorState {
    Arriving,
    /// At the table, waiting for everyone else to sit down.
    Seated,
    /// Waiting for its resources.
    Hungry,
    /// Holding both resources.
    Eating,
    /// Holding nothing.
    Thinking,
    Departed,
}

/// One participant in the ring.
#[derive(Debug, Clone)]
pub struct Actor {
    id: ActorId,
    name: String,
    left: ResourceId,
    right: ResourceId,
    state: ActorState,
}

impl Actor {
    /// Places actor `index` in a ring of `count`: its resources are `index` and
    /// `(index + 1) % count`. `None` if there is no such seat.
    pub fn seat(index: usize, count: usize, name: impl Into<String>) -> Option<Self> {
        (index < count).then(|| Self {
            id: ActorId(index),
            name: name.into(),
            left: ResourceId(index),
            right: ResourceId((index + 1) % count),
            state: ActorState::Arriving,
        })
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn left(&self) -> ResourceId {
        self.left
    }

    pub fn right(&self) -> ResourceId {
        self.right
    }

    pub fn state(&self) -> ActorState {
        self.state
    }

    /// The order this actor locks its resources in.
    pub fn acquire_order(&self) -> AcquireOrder {
        ordered_acquire(self.left, self.right)
    }

    fn transition(&mut self, next: ActorState) {
        trace!(actor = %self.id, from = ?self.state, to = ?next, "State");
        self.state = next;
    }

    /// Runs the actor to completion: rendezvous, `cycles` meals, departure.
    pub(crate) async fn dine(mut self, table: Arc<Table>) -> ActorId {
        let events = table.events();
        let actor = self.id;

        self.transition(ActorState::Seated);
        info!(%actor, name = %self.name, left = %self.left, right = %self.right, "Seated");
        events.emit(RingEvent::ActorSeated { actor });
        table.wait_until_seated().await;

        let order = self.acquire_order();
        for cycle in 1..=table.cycles() {
            self.transition(ActorState::Hungry);
            let mut held = Vec::with_capacity(2);
            for id in order.ids() {
                let resource = table.resource(id).acquire().await;
                debug!(%actor, resource = %id, "Acquired");
                events.emit(RingEvent::ActorAcquired { actor, resource: id });
                held.push(resource);
            }

            self.transition(ActorState::Eating);
            debug!(%actor, cycle, "Eating");
            events.emit(RingEvent::ActorEating { actor });
            tokio::time::sleep(table.eat_time()).await;

            // Report each release while the lock is still held, so a neighbour's
            // acquisition can never be stamped before it.
            for resource in held {
                debug!(%actor, resource = %resource.id(), "Released");
                events.emit(RingEvent::ActorReleased {
                    actor,
                    resource: resource.id(),
                });
                drop(resource);
            }

            self.transition(ActorState::Thinking);
            debug!(%actor, cycle, "Thinking");
            events.emit(RingEvent::ActorThinking { actor });
            if !table.think_time().is_zero() {
                tokio::time::sleep(table.think_time()).await;
            }
        }

        let remaining = table.depart(actor).await;
        self.transition(ActorState::Departed);
        info!(%actor, name = %self.name, remaining, "Departed");
        actor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_positions() {
        let first = Actor::seat(0, 5, "Plato").unwrap();
        assert_eq!((first.left(), first.right()), (ResourceId(0), ResourceId(1)));

        let last = Actor::seat(4, 5, "Locke").unwrap();
        assert_eq!((last.left(), last.right()), (ResourceId(4), ResourceId(0)));
        assert_eq!(last.acquire_order().ids(), vec![ResourceId(0), ResourceId(4)]);
        assert_eq!(last.state(), ActorState::Arriving);
    }

    #[test]
    fn test_every_actor_in_ring_orders_globally() {
        let n = 6;
        for i in 0..n {
            let actor = Actor::seat(i, n, format!("a{i}")).unwrap();
            let ids = actor.acquire_order().ids();
            assert!(ids[0] < ids[1], "actor {i} locks {:?}", ids);
        }
    }

    #[test]
    fn test_lonely_actor_uses_one_resource() {
        let actor = Actor::seat(0, 1, "Diogenes").unwrap();
        assert_eq!(actor.acquire_order(), AcquireOrder::Single(ResourceId(0)));
    }

    #[test]
    fn test_no_seat_outside_the_ring() {
        assert!(Actor::seat(0, 0, "Nobody").is_none());
        assert!(Actor::seat(5, 5, "Latecomer").is_none());
    }
}
