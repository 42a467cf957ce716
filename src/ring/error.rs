//! Error types for the resource ring.

use super::actor::ActorId;
use crate::error::ConfigError;
use thiserror::Error;
use tokio::task::JoinError;

/// Errors that can end a ring session.
///
/// A deadlock is deliberately absent: it is a missing event, not a failure, and only a
/// [`watchdog`](crate::lifecycle::watchdog) around the session can observe it.
#[derive(Debug, Error)]
pub enum RingError {
    /// The configuration was rejected before anything was spawned.
    #[error("invalid ring configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// An actor task panicked or was cancelled.
    #[error("actor {actor} failed: {source}")]
    ActorFailed {
        actor: ActorId,
        #[source]
        source: JoinError,
    },
}
