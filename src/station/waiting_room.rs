//! # Waiting Room
//!
//! The [`BoundedBuffer`] behind a mutex, plus a [`Notify`] that wakes servers. Admission
//! events are emitted while the lock is held, so their timestamps follow the real order in
//! which arrivals were let in or turned away, and no admission can be stamped after the
//! `StationDraining` marker.
//!
//! The lock is a `std::sync::Mutex`: it is never held across an `.await`, and it keeps
//! [`WaitingRoom::admit`] synchronous so callers are never suspended.

use super::buffer::{BoundedBuffer, Dequeue, EnqueueOutcome};
use super::event::{Arrival, StationEvent};
use super::stats::Counters;
use crate::events::EventSender;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;
use tracing::{debug, warn};

#[derive(Debug)]
pub(crate) struct WaitingRoom {
    buffer: Mutex<BoundedBuffer<Arrival>>,
    available: Notify,
}

impl WaitingRoom {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            buffer: Mutex::new(BoundedBuffer::new(capacity)),
            available: Notify::new(),
        }
    }

    // A panic while holding the lock cannot leave the buffer half-updated: every
    // mutation is a single VecDeque or bool operation.
    fn lock(&self) -> MutexGuard<'_, BoundedBuffer<Arrival>> {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Tries once to seat `arrival`. Never waits.
    ///
    /// The outcome is counted under the lock too, so a stats snapshot taken after close
    /// never shows an admitted arrival as served but not accepted.
    pub(crate) fn admit(
        &self,
        arrival: Arrival,
        events: &EventSender<StationEvent>,
        counters: &Counters,
    ) -> EnqueueOutcome {
        let outcome = {
            let mut buffer = self.lock();
            let outcome = buffer.try_enqueue(arrival.clone());
            counters.record(outcome);
            match outcome.rejection() {
                None => {
                    debug!(arrival = %arrival.label, waiting = buffer.len(), "Takes a seat");
                    events.emit(StationEvent::ArrivalAccepted { arrival });
                }
                Some(reason) => {
                    warn!(arrival = %arrival.label, %reason, "Turned away");
                    events.emit(StationEvent::ArrivalRejected { arrival, reason });
                }
            }
            outcome
        };
        if outcome.is_accepted() {
            self.available.notify_one();
        }
        outcome
    }

    pub(crate) fn try_take(&self) -> Dequeue<Arrival> {
        self.lock().try_dequeue()
    }

    /// Waits for the next arrival. Returns `None` once the room is closed and empty.
    pub(crate) async fn take(&self) -> Option<Arrival> {
        loop {
            // Register interest before looking, so a wake-up between the check and the
            // await is not lost.
            let notified = self.available.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            match self.try_take() {
                Dequeue::Item(arrival) => return Some(arrival),
                Dequeue::Drained => return None,
                Dequeue::Empty => notified.await,
            }
        }
    }

    /// Stops admissions and wakes every waiting server. Returns `true` for the call that
    /// actually closed the room.
    pub(crate) fn close(&self, events: &EventSender<StationEvent>) -> bool {
        let first = {
            let mut buffer = self.lock();
            let first = buffer.close();
            if first {
                events.emit(StationEvent::StationDraining);
            }
            first
        };
        self.available.notify_waiters();
        first
    }

    pub(crate) fn pending(&self) -> usize {
        self.lock().len()
    }
}
