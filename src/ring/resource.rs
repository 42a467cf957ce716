//! # Shared Resources and the Acquisition Order
//!
//! Each resource is an exclusive async lock shared by two neighbouring actors. Deadlock
//! freedom rests on a single rule: **every actor locks its two resources in ascending
//! global id order**. A circular wait needs some actor to hold a higher id while waiting
//! for a lower one, which the rule makes impossible.
//!
//! The rule has to be global. Comparing "left" and "right" per actor looks equivalent,
//! but the actor sitting across the wrap-around holds `{N-1, 0}`, and a relative
//! comparison easily makes it take `N-1` first while everyone else takes the lower id
//! first. That reintroduces the cycle. [`ordered_acquire`] only ever looks at the ids.

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::{Mutex, MutexGuard};

/// Position of a resource in the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub usize);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The order in which an actor must lock its resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireOrder {
    /// Both roles map to the same resource (a ring of one).
    Single(ResourceId),
    /// Lock `first`, then `second`. Always `first < second`.
    Pair {
        first: ResourceId,
        second: ResourceId,
    },
}

impl AcquireOrder {
    /// Resource ids in locking order.
    pub fn ids(&self) -> Vec<ResourceId> {
        match *self {
            AcquireOrder::Single(id) => vec![id],
            AcquireOrder::Pair { first, second } => vec![first, second],
        }
    }
}

/// Sorts two resources by global identity. Which one is called "left" is irrelevant.
pub fn ordered_acquire(a: ResourceId, b: ResourceId) -> AcquireOrder {
    match a.cmp(&b) {
        std::cmp::Ordering::Equal => AcquireOrder::Single(a),
        std::cmp::Ordering::Less => AcquireOrder::Pair { first: a, second: b },
        std::cmp::Ordering::Greater => AcquireOrder::Pair { first: b, second: a },
    }
}

/// A shared exclusive-use unit.
#[derive(Debug)]
pub struct Resource {
    id: ResourceId,
    lock: Mutex<()>,
}

impl Resource {
    pub fn new(id: ResourceId) -> Self {
        Self {
            id,
            lock: Mutex::new(()),
        }
    }

    pub fn id(&self) -> ResourceId {
        self.id
    }

    /// Waits until the resource is free and takes it. No timeout.
    pub async fn acquire(&self) -> Held<'_> {
        let guard = self.lock.lock().await;
        Held {
            id: self.id,
            _guard: guard,
        }
    }
}

/// Proof that a resource is held. Dropping it releases the resource.
#[derive(Debug)]
pub struct Held<'a> {
    id: ResourceId,
    _guard: MutexGuard<'a, ()>,
}

impl Held<'_> {
    pub fn id(&self) -> ResourceId {
        self.id
    }
}
