//! # Resource-Ring Coordinator
//!
//! N actors sit in a ring with one resource between each pair of neighbours. Every actor
//! needs both of its resources at once, a fixed number of times, and must never deadlock
//! or share a resource with a neighbour.
//!
//! ## Main Components
//!
//! - [`RingSession`] - Validates the config, spawns one task per actor, waits for all of them
//! - [`Actor`] - The per-actor protocol (seat, acquire in order, eat, release, think, depart)
//! - [`ordered_acquire`] - The deadlock-avoidance rule, as a pure function over resource ids
//! - [`RingEvent`] - What a session reports while it runs
//!
//! ## Guarantees
//!
//! - Resources are always locked lowest id first, so no circular wait can form.
//! - An actor holds both of its resources or none outside its acquisition window.
//! - The completion log holds every actor exactly once, in departure order. That order
//!   depends on scheduling and is not stable across runs.

pub mod actor;
pub mod config;
pub mod error;
pub mod event;
pub mod resource;
pub mod session;

pub use actor::{Actor, ActorId, ActorState};
pub use config::RingConfig;
pub use error::RingError;
pub use event::RingEvent;
pub use resource::{ordered_acquire, AcquireOrder, Held, Resource, ResourceId};
pub use session::{run_session, RingReport, RingSession};
