//! # Bounded-Queue Service Station
//!
//! A fixed-size waiting room fed by arrivals and drained by long-lived servers.
//!
//! ## Main Components
//!
//! - [`Station`] - Opens, adds servers and arrivals, and closes with a full drain
//! - [`BoundedBuffer`] - The admission rules (`Accepted` / `RejectedFull` / `RejectedClosed`)
//! - [`StationEvent`] - What the station reports while it runs
//! - [`run_business_day`] - Randomized arrivals for a fixed opening period, then close
//!
//! ## Guarantees
//!
//! - Admission never blocks: an arrival is seated or turned away on the spot.
//! - Arrivals are served in the order they were admitted.
//! - After [`Station::close`] returns, every admitted arrival has been served and every
//!   server that was ever started has exited exactly once.

pub mod buffer;
pub mod config;
pub mod demo;
pub mod error;
pub mod event;
pub mod server;
pub mod service;
pub mod stats;
mod waiting_room;

pub use buffer::{BoundedBuffer, Dequeue, EnqueueOutcome, RejectReason};
pub use config::StationConfig;
pub use demo::{run_business_day, Schedule};
pub use error::StationError;
pub use event::{Arrival, ArrivalId, StationEvent};
pub use server::ServerId;
pub use service::{CloseReport, Station, StationPhase};
pub use stats::StationStats;
