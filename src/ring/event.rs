//! Events emitted by a ring session, in real time.

use super::actor::ActorId;
use super::resource::ResourceId;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum RingEvent {
    ActorSeated { actor: ActorId },
    ActorAcquired { actor: ActorId, resource: ResourceId },
    ActorEating { actor: ActorId },
    ActorThinking { actor: ActorId },
    ActorReleased { actor: ActorId, resource: ResourceId },
    ActorDeparted { actor: ActorId },
}

impl RingEvent {
    /// The actor this event is about.
    pub fn actor(&self) -> ActorId {
        match *self {
            RingEvent::ActorSeated { actor }
            | RingEvent::ActorAcquired { actor, .. }
            | RingEvent::ActorEating { actor }
            | RingEvent::ActorThinking { actor }
            | RingEvent::ActorReleased { actor, .. }
            | RingEvent::ActorDeparted { actor } => actor,
        }
    }
}
