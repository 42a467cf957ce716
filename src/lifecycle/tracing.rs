//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//! Both cores log lifecycle transitions at `info` and per-step detail at `debug`, always with
//! structured fields (`actor`, `resource`, `server`, `arrival`) rather than formatted text.
//!
//! ## Usage Examples
//!
//! ```bash
//! # Seating, departures, server start/exit, closing
//! RUST_LOG=info cargo run -- ring
//!
//! # Every acquire/release and every admission decision
//! RUST_LOG=debug cargo run -- station --capacity 3
//!
//! # Only the station core
//! RUST_LOG=sync_classics::station=debug cargo run -- station
//! ```
//!
//! ## Workflow Trace Example
//!
//! **With `RUST_LOG=debug`**, one ring cycle for a single actor reads:
//!
//! ```text
//! INFO Seated actor=1 name="Socrates" left=1 right=2
//! DEBUG Acquired actor=1 resource=1
//! DEBUG Acquired actor=1 resource=2
//! DEBUG Eating actor=1 cycle=1
//! DEBUG Released actor=1 resource=1
//! DEBUG Released actor=1 resource=2
//! DEBUG Thinking actor=1 cycle=1
//! INFO Departed actor=1 name="Socrates" remaining=4
//! ```
//!
//! Rejected arrivals are logged at `warn` so they stand out at the default level.

use tracing_subscriber::EnvFilter;

/// Initializes the global subscriber.
///
/// Reads `RUST_LOG`; when it is unset or invalid, falls back to `info`. Call once, at the
/// start of `main`.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // Module paths add noise; fields carry the context
        .compact()
        .init();
}
