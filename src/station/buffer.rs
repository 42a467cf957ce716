//! # Bounded Buffer
//!
//! A plain FIFO with a fixed capacity and a closed flag. It knows nothing about threads
//! or tasks; the [`WaitingRoom`](super::waiting_room::WaitingRoom) supplies the locking and
//! the wake-ups. Keeping it primitive-free lets the admission rules be tested directly.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Why an arrival was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RejectReason {
    Full,
    Closed,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Full => f.write_str("full"),
            RejectReason::Closed => f.write_str("closed"),
        }
    }
}

/// Result of a single, non-blocking enqueue attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EnqueueOutcome {
    Accepted,
    RejectedFull,
    RejectedClosed,
}

impl EnqueueOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, EnqueueOutcome::Accepted)
    }

    /// The rejection reason, or `None` when accepted.
    pub fn rejection(&self) -> Option<RejectReason> {
        match self {
            EnqueueOutcome::Accepted => None,
            EnqueueOutcome::RejectedFull => Some(RejectReason::Full),
            EnqueueOutcome::RejectedClosed => Some(RejectReason::Closed),
        }
    }
}

/// Result of a single, non-blocking dequeue attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dequeue<T> {
    /// The oldest pending item.
    Item(T),
    /// Nothing pending, but more may come.
    Empty,
    /// Closed and empty: nothing will ever come again.
    Drained,
}

#[derive(Debug, Clone)]
pub struct BoundedBuffer<T> {
    items: VecDeque<T>,
    capacity: usize,
    closed: bool,
}

impl<T> BoundedBuffer<T> {
    /// A capacity of zero is allowed; such a buffer rejects everything as full.
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
            closed: false,
        }
    }

    /// Closed takes precedence over full.
    pub fn try_enqueue(&mut self, item: T) -> EnqueueOutcome {
        if self.closed {
            EnqueueOutcome::RejectedClosed
        } else if self.items.len() >= self.capacity {
            EnqueueOutcome::RejectedFull
        } else {
            self.items.push_back(item);
            EnqueueOutcome::Accepted
        }
    }

    pub fn try_dequeue(&mut self) -> Dequeue<T> {
        match self.items.pop_front() {
            Some(item) => Dequeue::Item(item),
            None if self.closed => Dequeue::Drained,
            None => Dequeue::Empty,
        }
    }

    /// Stops admissions. Items already buffered stay available. Returns `true` only for
    /// the call that actually closed the buffer.
    pub fn close(&mut self) -> bool {
        !std::mem::replace(&mut self.closed, true)
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_until_full() {
        let mut buffer = BoundedBuffer::new(2);
        assert_eq!(buffer.try_enqueue("a"), EnqueueOutcome::Accepted);
        assert_eq!(buffer.try_enqueue("b"), EnqueueOutcome::Accepted);
        assert_eq!(buffer.try_enqueue("c"), EnqueueOutcome::RejectedFull);
        assert_eq!(buffer.len(), 2);

        assert_eq!(buffer.try_dequeue(), Dequeue::Item("a"));
        assert_eq!(buffer.try_enqueue("d"), EnqueueOutcome::Accepted);
        assert_eq!(buffer.try_dequeue(), Dequeue::Item("b"));
        assert_eq!(buffer.try_dequeue(), Dequeue::Item("d"));
        assert_eq!(buffer.try_dequeue(), Dequeue::Empty);
    }

    #[test]
    fn test_zero_capacity_rejects_everything_as_full() {
        let mut buffer = BoundedBuffer::new(0);
        for item in 0..3 {
            assert_eq!(buffer.try_enqueue(item), EnqueueOutcome::RejectedFull);
        }
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_closed_buffer_drains_then_reports_drained() {
        let mut buffer = BoundedBuffer::new(3);
        buffer.try_enqueue(1);
        buffer.try_enqueue(2);

        assert!(buffer.close());
        assert!(!buffer.close(), "second close is a no-op");
        assert_eq!(buffer.try_enqueue(3), EnqueueOutcome::RejectedClosed);

        assert_eq!(buffer.try_dequeue(), Dequeue::Item(1));
        assert_eq!(buffer.try_dequeue(), Dequeue::Item(2));
        assert_eq!(buffer.try_dequeue(), Dequeue::Drained);
    }

    #[test]
    fn test_closed_wins_over_full() {
        let mut buffer = BoundedBuffer::new(1);
        buffer.try_enqueue('x');
        buffer.close();
        assert_eq!(buffer.try_enqueue('y'), EnqueueOutcome::RejectedClosed);
    }

    #[test]
    fn test_outcome_rejection_reason() {
        assert_eq!(EnqueueOutcome::Accepted.rejection(), None);
        assert_eq!(
            EnqueueOutcome::RejectedFull.rejection(),
            Some(RejectReason::Full)
        );
        assert_eq!(
            EnqueueOutcome::RejectedClosed.rejection(),
            Some(RejectReason::Closed)
        );
    }
}
