//! Outcome counters.

use super::buffer::EnqueueOutcome;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Snapshot of what a station has done so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StationStats {
    pub accepted: usize,
    pub rejected_full: usize,
    pub rejected_closed: usize,
    pub served: usize,
    pub servers_exited: usize,
}

impl StationStats {
    pub fn rejected(&self) -> usize {
        self.rejected_full + self.rejected_closed
    }
}

#[derive(Debug, Default)]
pub(crate) struct Counters {
    accepted: AtomicUsize,
    rejected_full: AtomicUsize,
    rejected_closed: AtomicUsize,
    served: AtomicUsize,
    servers_exited: AtomicUsize,
}

impl Counters {
    pub(crate) fn record(&self, outcome: EnqueueOutcome) {
        let counter = match outcome {
            EnqueueOutcome::Accepted => &self.accepted,
            EnqueueOutcome::RejectedFull => &self.rejected_full,
            EnqueueOutcome::RejectedClosed => &self.rejected_closed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn served(&self) {
        self.served.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn server_exited(&self) {
        self.servers_exited.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> StationStats {
        StationStats {
            accepted: self.accepted.load(Ordering::Relaxed),
            rejected_full: self.rejected_full.load(Ordering::Relaxed),
            rejected_closed: self.rejected_closed.load(Ordering::Relaxed),
            served: self.served.load(Ordering::Relaxed),
            servers_exited: self.servers_exited.load(Ordering::Relaxed),
        }
    }
}
