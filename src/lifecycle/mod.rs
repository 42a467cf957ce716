//! Runtime plumbing shared by both cores.
//!
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure
//! - [`watchdog`] - Turns a stalled session into a reported [`LivenessError`]

pub mod tracing;
pub mod watchdog;

pub use self::tracing::*;
pub use self::watchdog::*;
