//! # Structured Event Stream
//!
//! Both cores report what they do as typed events instead of console text. An
//! [`event_channel`] returns the two halves:
//!
//! - [`EventSender`] is cloned into every worker task and stamps each event with the time
//!   elapsed since the channel was created.
//! - [`EventStream`] is kept by the caller, who can follow events live with
//!   [`EventStream::next`] or collect everything buffered with [`EventStream::drain`].
//!
//! Stamps come from the Tokio clock, so a paused test runtime sees virtual time.
//! The channel is unbounded, so emitting never suspends a worker. If the stream has been
//! dropped, events are discarded silently.

use serde::Serialize;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// An event together with the moment it was emitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timestamped<E> {
    /// Offset from the channel's epoch. Monotonic across all senders of one channel.
    pub at: Duration,
    pub event: E,
}

/// Creates a connected sender/stream pair sharing one epoch.
pub fn event_channel<E>() -> (EventSender<E>, EventStream<E>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let sender = EventSender {
        tx,
        epoch: Instant::now(),
    };
    (sender, EventStream { rx })
}

/// Emitting half of an event channel.
#[derive(Debug)]
pub struct EventSender<E> {
    tx: mpsc::UnboundedSender<Timestamped<E>>,
    epoch: Instant,
}

// Manual impl: `E` itself does not need to be `Clone`.
impl<E> Clone for EventSender<E> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            epoch: self.epoch,
        }
    }
}

impl<E> EventSender<E> {
    /// Stamps and sends an event.
    pub fn emit(&self, event: E) {
        let at = self.elapsed();
        let _ = self.tx.send(Timestamped { at, event });
    }

    /// Time since the channel was created.
    pub fn elapsed(&self) -> Duration {
        self.epoch.elapsed()
    }
}

/// Receiving half of an event channel.
#[derive(Debug)]
pub struct EventStream<E> {
    rx: mpsc::UnboundedReceiver<Timestamped<E>>,
}

impl<E> EventStream<E> {
    /// Waits for the next event. Returns `None` once every sender is gone and the
    /// buffer is empty.
    pub async fn next(&mut self) -> Option<Timestamped<E>> {
        self.rx.recv().await
    }

    /// Collects every event that is already buffered, without waiting.
    pub fn drain(&mut self) -> Vec<Timestamped<E>> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }
}
