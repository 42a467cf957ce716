//! Error types for the service station.

use super::server::ServerId;
use crate::error::ConfigError;
use thiserror::Error;

/// Errors returned by [`Station`](super::Station) operations.
///
/// A full or closed waiting room is not an error; see
/// [`EnqueueOutcome`](super::EnqueueOutcome).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StationError {
    #[error("invalid station configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// Servers can only be added while the station is open.
    #[error("station is no longer open")]
    NotOpen,

    /// A server task panicked or was cancelled before going home. Every `close` caller
    /// sees the same failure, so the task's error is kept as text.
    #[error("server {server} failed: {reason}")]
    ServerFailed { server: ServerId, reason: String },
}
