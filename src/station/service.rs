//! # The Station
//!
//! Owns the waiting room, the roster of servers and the phase machine
//! `Open -> Draining -> Closed`. Shutdown signals the workers, then awaits every join
//! handle.

use super::buffer::EnqueueOutcome;
use super::config::StationConfig;
use super::error::StationError;
use super::event::{Arrival, ArrivalId, StationEvent};
use super::server::{Server, ServerId};
use super::stats::{Counters, StationStats};
use super::waiting_room::WaitingRoom;
use crate::events::{event_channel, EventSender, EventStream};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StationPhase {
    /// Admitting arrivals and servers.
    Open,
    /// `close` was called; buffered arrivals are still being served.
    Draining,
    /// Every server has gone home.
    Closed,
}

/// What `close` found once everyone had gone home.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CloseReport {
    pub servers_started: usize,
    pub stats: StationStats,
}

#[derive(Debug, Default)]
struct Roster {
    started: usize,
    running: Vec<(ServerId, JoinHandle<()>)>,
}

/// A bounded-queue service station.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use sync_classics::station::{EnqueueOutcome, Station, StationConfig};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = StationConfig::new(1).with_service_time(Duration::from_millis(5));
/// let (station, _events) = Station::open(config)?;
/// station.add_server("Frank")?;
///
/// assert_eq!(station.add_arrival("Client #1"), EnqueueOutcome::Accepted);
/// let report = station.close().await?;
/// assert_eq!(report.stats.served, 1);
/// assert_eq!(station.add_arrival("Client #2"), EnqueueOutcome::RejectedClosed);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Station {
    config: StationConfig,
    room: Arc<WaitingRoom>,
    events: EventSender<StationEvent>,
    counters: Arc<Counters>,
    roster: Mutex<Roster>,
    phase: Arc<watch::Sender<StationPhase>>,
    outcome: Arc<OnceLock<Result<CloseReport, StationError>>>,
    next_arrival: AtomicU64,
}

impl Station {
    /// Validates `config` and opens an empty station with no servers.
    pub fn open(config: StationConfig) -> Result<(Self, EventStream<StationEvent>), StationError> {
        config.validate()?;
        let (events, stream) = event_channel();
        let (phase, _) = watch::channel(StationPhase::Open);

        info!(capacity = config.capacity, service_time = ?config.service_time, "The shop is open for the day");
        let station = Self {
            room: Arc::new(WaitingRoom::new(config.capacity)),
            config,
            events,
            counters: Arc::new(Counters::default()),
            roster: Mutex::new(Roster::default()),
            phase: Arc::new(phase),
            outcome: Arc::new(OnceLock::new()),
            next_arrival: AtomicU64::new(1),
        };
        Ok((station, stream))
    }

    // Roster updates are push/take on a Vec plus a counter; a poisoned lock still holds
    // consistent data.
    fn roster(&self) -> MutexGuard<'_, Roster> {
        self.roster.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Starts a server. Must be called from within a tokio runtime.
    pub fn add_server(&self, name: impl Into<String>) -> Result<ServerId, StationError> {
        let name = name.into();
        let mut roster = self.roster();
        if self.phase() != StationPhase::Open {
            warn!(name = %name, "Server arrived after closing");
            return Err(StationError::NotOpen);
        }

        let id = ServerId(roster.started);
        roster.started += 1;
        let server = Server::new(
            id,
            name.clone(),
            Arc::clone(&self.room),
            self.events.clone(),
            Arc::clone(&self.counters),
            self.config.service_time,
        );
        roster.running.push((id, tokio::spawn(server.run())));
        info!(server = %id, name = %name, "Server added");
        Ok(id)
    }

    /// Offers the waiting room a new arrival. Never blocks.
    pub fn add_arrival(&self, label: impl Into<String>) -> EnqueueOutcome {
        let arrival = Arrival {
            id: ArrivalId(self.next_arrival.fetch_add(1, Ordering::Relaxed)),
            label: label.into(),
            arrived_at: self.events.elapsed(),
        };
        debug!(arrival = %arrival.label, "Arrives");
        self.room.admit(arrival, &self.events, &self.counters)
    }

    /// Stops admissions, lets every server drain the waiting room and go home, and waits
    /// for all of them.
    ///
    /// The drain runs in its own task, so dropping this future (a watchdog firing, say)
    /// does not stall the shutdown. Every call, first, concurrent or later, returns the
    /// same outcome. If a server task panicked that outcome is
    /// [`StationError::ServerFailed`], reported after every other server has been awaited.
    pub async fn close(&self) -> Result<CloseReport, StationError> {
        self.begin_close();

        let mut phase = self.phase.subscribe();
        // The sender lives in `self`, so this can only end by observing `Closed`.
        let _ = phase.wait_for(|p| *p == StationPhase::Closed).await;
        match self.outcome.get() {
            Some(outcome) => outcome.clone(),
            None => Ok(self.report()),
        }
    }

    /// Moves `Open -> Draining` and spawns the drain. Does nothing if another call got
    /// there first.
    fn begin_close(&self) {
        let mut roster = self.roster();
        let began = self.phase.send_if_modified(|phase| {
            if *phase == StationPhase::Open {
                *phase = StationPhase::Draining;
                true
            } else {
                false
            }
        });
        if !began {
            return;
        }

        info!(servers = roster.started, waiting = self.room.pending(), "Closing shop for the day");
        self.room.close(&self.events);
        let drain = Drain {
            running: std::mem::take(&mut roster.running),
            servers_started: roster.started,
            events: self.events.clone(),
            counters: Arc::clone(&self.counters),
            phase: Arc::clone(&self.phase),
            outcome: Arc::clone(&self.outcome),
        };
        tokio::spawn(drain.run());
    }

    fn report(&self) -> CloseReport {
        CloseReport {
            servers_started: self.servers_started(),
            stats: self.stats(),
        }
    }

    pub fn phase(&self) -> StationPhase {
        *self.phase.borrow()
    }

    pub fn config(&self) -> &StationConfig {
        &self.config
    }

    /// Number of servers ever started.
    pub fn servers_started(&self) -> usize {
        self.roster().started
    }

    /// Arrivals currently waiting for a server.
    pub fn waiting(&self) -> usize {
        self.room.pending()
    }

    pub fn stats(&self) -> StationStats {
        self.counters.snapshot()
    }
}

/// The second half of `close`, owned by its own task: waits for every server, records
/// the outcome, then publishes `Closed`.
struct Drain {
    running: Vec<(ServerId, JoinHandle<()>)>,
    servers_started: usize,
    events: EventSender<StationEvent>,
    counters: Arc<Counters>,
    phase: Arc<watch::Sender<StationPhase>>,
    outcome: Arc<OnceLock<Result<CloseReport, StationError>>>,
}

impl Drain {
    async fn run(self) {
        let mut failure = None;
        for (server, handle) in self.running {
            if let Err(source) = handle.await {
                error!(%server, error = %source, "Server task failed");
                failure.get_or_insert(StationError::ServerFailed {
                    server,
                    reason: source.to_string(),
                });
            }
        }

        self.events.emit(StationEvent::StationClosed);
        let report = CloseReport {
            servers_started: self.servers_started,
            stats: self.counters.snapshot(),
        };
        info!(
            served = report.stats.served,
            turned_away = report.stats.rejected(),
            "The shop is now closed for the day, and everyone has gone home"
        );

        // The outcome is set before `Closed` is visible, so no caller can miss it.
        let _ = self.outcome.set(match failure {
            Some(failure) => Err(failure),
            None => Ok(report),
        });
        self.phase.send_replace(StationPhase::Closed);
    }
}

impl Drop for Station {
    fn drop(&mut self) {
        // Servers hold their own handle on the room; closing it lets them drain and
        // exit instead of napping forever.
        if self.room.close(&self.events) {
            warn!(
                servers = self.roster().started,
                "Station dropped without close; servers drain in the background"
            );
        }
    }
}
