//! Events emitted by a station.

use super::buffer::RejectReason;
use super::server::ServerId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Sequence number of an arrival, unique per station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArrivalId(pub u64);

impl fmt::Display for ArrivalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Someone who walked in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arrival {
    pub id: ArrivalId,
    pub label: String,
    /// Offset from the station's event epoch.
    pub arrived_at: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum StationEvent {
    ServerIdle {
        server: ServerId,
    },
    ServerServing {
        server: ServerId,
        arrival: Arrival,
    },
    ArrivalAccepted {
        arrival: Arrival,
    },
    ArrivalRejected {
        arrival: Arrival,
        reason: RejectReason,
    },
    ServerExited {
        server: ServerId,
    },
    /// `close` was invoked; admissions have stopped.
    StationDraining,
    StationClosed,
}
