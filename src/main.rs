//! # Sync Classics CLI
//!
//! Runs either demo with its parameters taken from the command line:
//!
//! ```bash
//! RUST_LOG=debug cargo run -- ring --actors 7 --cycles 2 --eat-ms 200 --think-ms 100
//! cargo run -- station --capacity 5 --servers 2 --open-secs 3 --json
//! ```
//!
//! Every run is guarded by the liveness watchdog, with a budget derived from its settings.

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::time::Duration;
use sync_classics::events::EventStream;
use sync_classics::lifecycle::{setup_tracing, watchdog};
use sync_classics::ring::{RingConfig, RingSession};
use sync_classics::station::{run_business_day, Schedule, Station, StationConfig};
use tokio::task::JoinHandle;
use tracing::{info, Instrument};

/// Slack added to every watchdog budget on top of the expected run time.
const WATCHDOG_SLACK: Duration = Duration::from_secs(5);

#[derive(Debug, Parser)]
#[command(name = "sync-classics", version, about = "Dining philosophers and the sleeping barber")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Dining philosophers: actors sharing resources around a ring.
    Ring(RingArgs),
    /// Sleeping barber: a bounded waiting room drained by servers.
    Station(StationArgs),
}

#[derive(Debug, Args)]
struct RingArgs {
    #[arg(long, default_value_t = 5)]
    actors: usize,
    #[arg(long, default_value_t = 3)]
    cycles: usize,
    #[arg(long, default_value_t = 1000)]
    eat_ms: u64,
    #[arg(long, default_value_t = 3000)]
    think_ms: u64,
    /// Print every event as a JSON line.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct StationArgs {
    #[arg(long, default_value_t = 20)]
    capacity: usize,
    #[arg(long, default_value_t = 1)]
    servers: usize,
    #[arg(long, default_value_t = 1000)]
    service_ms: u64,
    #[arg(long, default_value_t = 10)]
    open_secs: u64,
    /// Mean gap between arrivals.
    #[arg(long, default_value_t = 10)]
    arrival_ms: u64,
    /// Print every event as a JSON line.
    #[arg(long)]
    json: bool,
}

fn print_events<E>(mut stream: EventStream<E>, json: bool) -> Option<JoinHandle<()>>
where
    E: Serialize + Send + 'static,
{
    if !json {
        return None;
    }
    Some(tokio::spawn(async move {
        while let Some(event) = stream.next().await {
            match serde_json::to_string(&event) {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::warn!(error = %e, "Event could not be encoded"),
            }
        }
    }))
}

async fn run_ring(args: RingArgs) -> Result<(), String> {
    let config = RingConfig::new(args.actors, args.cycles)
        .with_eat_time(Duration::from_millis(args.eat_ms))
        .with_think_time(Duration::from_millis(args.think_ms));
    let budget = config.expected_duration().saturating_add(WATCHDOG_SLACK);

    let (session, stream) = RingSession::new(config).map_err(|e| e.to_string())?;
    let printer = print_events(stream, args.json);

    let report = watchdog(budget, session.run().instrument(tracing::info_span!("ring")))
        .await
        .map_err(|e| e.to_string())?
        .map_err(|e| e.to_string())?;

    if let Some(printer) = printer {
        let _ = printer.await;
    }
    info!(order = %report.departure_names().join(", "), "Order finished");
    Ok(())
}

async fn run_station(args: StationArgs) -> Result<(), String> {
    let config = StationConfig::new(args.capacity)
        .with_service_time(Duration::from_millis(args.service_ms));
    let schedule = Schedule {
        open_for: Duration::from_secs(args.open_secs),
        arrival_gap: Duration::from_millis(args.arrival_ms),
    };
    let backlog = u32::try_from(args.capacity.saturating_add(args.servers)).unwrap_or(u32::MAX);
    let budget = schedule
        .open_for
        .saturating_add(config.service_time.saturating_mul(backlog))
        .saturating_add(WATCHDOG_SLACK);

    let (station, stream) = Station::open(config).map_err(|e| e.to_string())?;
    let printer = print_events(stream, args.json);

    for i in 0..args.servers {
        let name = if i == 0 {
            "Frank".to_string()
        } else {
            format!("Server #{}", i + 1)
        };
        station.add_server(name).map_err(|e| e.to_string())?;
    }

    let report = watchdog(
        budget,
        run_business_day(&station, &schedule).instrument(tracing::info_span!("station")),
    )
    .await
    .map_err(|e| e.to_string())?
    .map_err(|e| e.to_string())?;

    // The station owns the last event sender; the printer finishes once it is gone.
    drop(station);
    if let Some(printer) = printer {
        let _ = printer.await;
    }
    info!(
        served = report.stats.served,
        turned_away_full = report.stats.rejected_full,
        turned_away_closed = report.stats.rejected_closed,
        "Business day over"
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Ring(args) => run_ring(args).await,
        Command::Station(args) => run_station(args).await,
    }
}
