//! # Servers
//!
//! A server is a long-lived task that takes the oldest arrival, serves it, and repeats.
//! With nothing to do it naps until an arrival or the close signal wakes it. It only
//! leaves once the waiting room is closed *and* empty, so every admitted arrival is
//! served before [`Station::close`](super::Station::close) returns.

use super::buffer::Dequeue;
use super::event::{Arrival, StationEvent};
use super::stats::Counters;
use super::waiting_room::WaitingRoom;
use crate::events::EventSender;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Identity of a server, assigned in the order servers are added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerId(pub usize);

impl fmt::Display for ServerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ServerState {
    Idle,
    Serving,
    Exited,
}

pub(crate) struct Server {
    id: ServerId,
    name: String,
    room: Arc<WaitingRoom>,
    events: EventSender<StationEvent>,
    counters: Arc<Counters>,
    service_time: Duration,
    state: ServerState,
}

impl Server {
    pub(crate) fn new(
        id: ServerId,
        name: String,
        room: Arc<WaitingRoom>,
        events: EventSender<StationEvent>,
        counters: Arc<Counters>,
        service_time: Duration,
    ) -> Self {
        Self {
            id,
            name,
            room,
            events,
            counters,
            service_time,
            state: ServerState::Idle,
        }
    }

    /// The worker loop. Emits exactly one `ServerExited` on the way out.
    pub(crate) async fn run(mut self) {
        let server = self.id;
        info!(%server, name = %self.name, "Checks the waiting room");

        loop {
            let arrival = match self.room.try_take() {
                Dequeue::Item(arrival) => arrival,
                Dequeue::Drained => break,
                Dequeue::Empty => {
                    self.state = ServerState::Idle;
                    info!(%server, name = %self.name, "Nothing to do, takes a nap");
                    self.events.emit(StationEvent::ServerIdle { server });
                    match self.room.take().await {
                        Some(arrival) => {
                            info!(%server, arrival = %arrival.label, "Wakes the server up");
                            arrival
                        }
                        None => break,
                    }
                }
            };
            self.serve(arrival).await;
        }

        self.state = ServerState::Exited;
        self.counters.server_exited();
        info!(%server, name = %self.name, "Going home");
        self.events.emit(StationEvent::ServerExited { server });
    }

    async fn serve(&mut self, arrival: Arrival) {
        let server = self.id;
        self.state = ServerState::Serving;
        debug!(%server, arrival = %arrival.label, "Serving");
        self.events.emit(StationEvent::ServerServing {
            server,
            arrival: arrival.clone(),
        });

        tokio::time::sleep(self.service_time).await;

        self.counters.served();
        debug!(%server, arrival = %arrival.label, state = ?self.state, "Finished");
    }
}
