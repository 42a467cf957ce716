//! # Ring Session
//!
//! The session is the orchestrator for one run of the ring: it validates the config, lays
//! the table, spawns one task per actor and awaits every join handle before reporting.
//!
//! All shared state lives in a [`Table`] owned by the session and handed to every actor
//! through an `Arc`. Nothing is global, so independent sessions can run side by side.

use super::actor::{Actor, ActorId};
use super::config::RingConfig;
use super::error::RingError;
use super::event::RingEvent;
use super::resource::{Resource, ResourceId};
use crate::events::{event_channel, EventSender, EventStream};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Barrier, Mutex};
use tokio::time::Instant;
use tracing::{error, info};

/// Departure bookkeeping. Guarded by one lock, separate from the resource locks.
#[derive(Debug)]
struct Departures {
    log: Vec<ActorId>,
    at_table: usize,
}

/// State shared by every actor of one session.
#[derive(Debug)]
pub(crate) struct Table {
    resources: Vec<Resource>,
    seated: Barrier,
    departures: Mutex<Departures>,
    events: EventSender<RingEvent>,
    cycles: usize,
    eat_time: Duration,
    think_time: Duration,
}

impl Table {
    fn new(config: &RingConfig, events: EventSender<RingEvent>) -> Self {
        Self {
            resources: (0..config.actor_count)
                .map(|i| Resource::new(ResourceId(i)))
                .collect(),
            seated: Barrier::new(config.actor_count),
            departures: Mutex::new(Departures {
                log: Vec::with_capacity(config.actor_count),
                at_table: config.actor_count,
            }),
            events,
            cycles: config.cycles_per_actor,
            eat_time: config.eat_time,
            think_time: config.think_time,
        }
    }

    pub(crate) fn resource(&self, id: ResourceId) -> &Resource {
        &self.resources[id.0]
    }

    pub(crate) fn events(&self) -> &EventSender<RingEvent> {
        &self.events
    }

    pub(crate) fn cycles(&self) -> usize {
        self.cycles
    }

    pub(crate) fn eat_time(&self) -> Duration {
        self.eat_time
    }

    pub(crate) fn think_time(&self) -> Duration {
        self.think_time
    }

    /// One-time rendezvous: returns once every actor has been seated.
    pub(crate) async fn wait_until_seated(&self) {
        self.seated.wait().await;
    }

    /// Appends `actor` to the completion log and returns how many are still at the table.
    ///
    /// The departure event is emitted under the same lock, so the order of
    /// `ActorDeparted` events is exactly the completion log.
    pub(crate) async fn depart(&self, actor: ActorId) -> usize {
        let mut departures = self.departures.lock().await;
        departures.log.push(actor);
        departures.at_table -= 1;
        self.events.emit(RingEvent::ActorDeparted { actor });
        departures.at_table
    }

    async fn completion_log(&self) -> Vec<ActorId> {
        self.departures.lock().await.log.clone()
    }
}

/// Outcome of a finished session.
#[derive(Debug, Clone, PartialEq)]
pub struct RingReport {
    /// Actor ids in the order they departed.
    pub completion_log: Vec<ActorId>,
    /// Display names, indexed by actor id.
    pub names: Vec<String>,
    pub elapsed: Duration,
}

impl RingReport {
    /// Names in departure order.
    pub fn departure_names(&self) -> Vec<&str> {
        self.completion_log
            .iter()
            .map(|id| self.names[id.0].as_str())
            .collect()
    }
}

/// One run of the resource ring.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use sync_classics::ring::{RingConfig, RingSession};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = RingConfig::new(3, 2)
///     .with_eat_time(Duration::from_millis(1))
///     .with_think_time(Duration::ZERO);
/// let (session, mut events) = RingSession::new(config)?;
/// let report = session.run().await?;
///
/// assert_eq!(report.completion_log.len(), 3);
/// assert!(!events.drain().is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RingSession {
    config: RingConfig,
    events: EventSender<RingEvent>,
}

impl RingSession {
    /// Validates `config` and returns the session with the stream of its events.
    pub fn new(config: RingConfig) -> Result<(Self, EventStream<RingEvent>), RingError> {
        config.validate()?;
        let (events, stream) = event_channel();
        Ok((Self { config, events }, stream))
    }

    pub fn config(&self) -> &RingConfig {
        &self.config
    }

    /// Seats every actor and waits until all have eaten and departed.
    ///
    /// Never times out on its own; see [`watchdog`](crate::lifecycle::watchdog).
    pub async fn run(self) -> Result<RingReport, RingError> {
        let started = Instant::now();
        let count = self.config.actor_count;
        let names: Vec<String> = (0..count).map(|i| self.config.name_of(i)).collect();
        let table = Arc::new(Table::new(&self.config, self.events));

        info!(actors = count, cycles = self.config.cycles_per_actor, "Table is set");

        let handles: Vec<_> = names
            .iter()
            .enumerate()
            .filter_map(|(i, name)| Actor::seat(i, count, name.clone()))
            .map(|actor| (actor.id(), tokio::spawn(actor.dine(Arc::clone(&table)))))
            .collect();

        // Await every actor before reporting a failure, so no task outlives the session.
        let mut failure = None;
        for (actor, handle) in handles {
            if let Err(source) = handle.await {
                error!(%actor, error = %source, "Actor task failed");
                failure.get_or_insert(RingError::ActorFailed { actor, source });
            }
        }
        if let Some(failure) = failure {
            return Err(failure);
        }

        let report = RingReport {
            completion_log: table.completion_log().await,
            names,
            elapsed: started.elapsed(),
        };
        info!(
            order = ?report.departure_names(),
            elapsed = ?report.elapsed,
            "Table is empty"
        );
        Ok(report)
    }
}

/// Runs a session with the classic timings and default names.
pub async fn run_session(
    actor_count: usize,
    cycles_per_actor: usize,
) -> Result<RingReport, RingError> {
    let (session, _events) = RingSession::new(RingConfig::new(actor_count, cycles_per_actor))?;
    session.run().await
}
