#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Sync Classics
//!
//! > **Two classic synchronization problems, built as testable concurrency cores on Tokio.**
//!
//! ## 🏗️ Design Philosophy
//!
//! Both problems are about shared state under contention. Each is modelled as an explicit
//! object (a session or a station) created per run and shared with its worker tasks by
//! `Arc`. There is no global state, so any number of independent runs can share a process,
//! which is exactly what the test suite does.
//!
//! Instead of printing to the console, both cores report a typed, timestamped
//! [event stream](events). Tests assert on events; the binary logs them or prints them as
//! JSON.
//!
//! ## 🚀 Core Concepts
//!
//! ### The Resource Ring (dining philosophers)
//! N actors around a table, one resource between each pair. Every actor needs both of its
//! resources to eat. Deadlock is avoided by one rule: resources are always locked in
//! ascending global id order ([`ring::ordered_acquire`]), including by the actor that sits
//! across the wrap-around.
//!
//! ### The Service Station (sleeping barber)
//! A bounded waiting room, servers that nap when it is empty, and a close that drains every
//! admitted arrival before the last server goes home ([`station::Station::close`]).
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! Each core has its own error type ([`ring::RingError`], [`station::StationError`]) built with
//! `thiserror`. Bad configuration is rejected synchronously with [`error::ConfigError`]
//! before any task is spawned. A full waiting room is an outcome, not an error.
//!
//! ### 2. Liveness
//! A deadlock is not an error anyone can raise; it is the absence of progress. Wrap a run in
//! [`lifecycle::watchdog`] to turn a stall into [`lifecycle::LivenessError`].
//!
//! ### 3. Concurrency Model
//! One Tokio task per actor or server, on the multi-threaded runtime. The only suspension
//! points are a resource lock (ring) and a server's wait for work (station).
//!
//! ### 4. Observability
//! `tracing` everywhere with structured fields. See [`lifecycle::tracing`].
//!
//! ## 🗺️ Module Tour
//!
//! - [`ring`] - Resource-ring coordinator
//! - [`station`] - Bounded-queue service station
//! - [`events`] - Timestamped event channel shared by both
//! - [`lifecycle`] - Tracing setup and the liveness watchdog
//! - [`error`] - Configuration validation errors
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Five philosophers, three meals each
//! RUST_LOG=info cargo run -- ring
//!
//! # One barber, twenty seats, events as JSON lines
//! cargo run -- station --json
//!
//! cargo test
//! ```

pub mod error;
pub mod events;
pub mod lifecycle;
pub mod ring;
pub mod station;
