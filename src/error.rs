//! # Configuration Errors
//!
//! Validation failures shared by both concurrency cores. Every session and station
//! validates its configuration synchronously, before a single task is spawned, so a bad
//! value always surfaces to the caller as one of these variants.

use thiserror::Error;

/// Errors raised while validating a [`RingConfig`](crate::ring::RingConfig) or
/// [`StationConfig`](crate::station::StationConfig).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A ring needs at least one actor.
    #[error("actor count must be at least 1")]
    NoActors,

    /// Every actor must eat at least once.
    #[error("cycles per actor must be at least 1")]
    NoCycles,

    /// A duration that drives the simulation was zero.
    #[error("{field} must be greater than zero")]
    ZeroDuration { field: &'static str },

    /// More names were supplied than there are actors.
    #[error("{names} names supplied for {actors} actors")]
    TooManyNames { names: usize, actors: usize },
}
