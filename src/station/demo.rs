//! # A Business Day
//!
//! Drives a station the way the classic sleeping-barber demo does: clients walk in at
//! random intervals while the shop is open, then the shop closes and everyone still
//! waiting gets served before the barbers go home.

use super::error::StationError;
use super::service::{CloseReport, Station};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::{sleep, sleep_until, Instant};
use tracing::info;

/// When the doors close and how often clients show up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// How long arrivals keep coming.
    pub open_for: Duration,
    /// Mean gap between arrivals. Actual gaps are uniform in `[0, 2 * arrival_gap)`.
    pub arrival_gap: Duration,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            open_for: Duration::from_secs(10),
            arrival_gap: Duration::from_millis(10),
        }
    }
}

fn next_gap(mean: Duration) -> Duration {
    let span = (mean.as_micros() as u64).saturating_mul(2).max(1);
    Duration::from_micros(rand::thread_rng().gen_range(0..span))
}

/// Sends `Client #1`, `Client #2`, ... until closing time, then closes the station.
pub async fn run_business_day(
    station: &Station,
    schedule: &Schedule,
) -> Result<CloseReport, StationError> {
    let closing_time = sleep_until(Instant::now() + schedule.open_for);
    tokio::pin!(closing_time);

    let mut client = 1u64;
    loop {
        tokio::select! {
            _ = &mut closing_time => break,
            _ = sleep(next_gap(schedule.arrival_gap)) => {
                station.add_arrival(format!("Client #{client}"));
                client += 1;
            }
        }
    }

    info!(arrivals = client - 1, "Closing time");
    station.close().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::station::StationConfig;

    #[test]
    fn test_gap_stays_within_twice_the_mean() {
        let mean = Duration::from_millis(10);
        for _ in 0..1000 {
            assert!(next_gap(mean) < mean * 2);
        }
        assert_eq!(next_gap(Duration::ZERO), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_accepted_client_is_served_by_end_of_day() {
        let config = StationConfig::new(3).with_service_time(Duration::from_millis(20));
        let (station, _events) = Station::open(config).unwrap();
        station.add_server("Frank").unwrap();
        station.add_server("Gina").unwrap();

        let schedule = Schedule {
            open_for: Duration::from_millis(500),
            arrival_gap: Duration::from_millis(5),
        };
        let report = run_business_day(&station, &schedule).await.unwrap();

        assert!(report.stats.accepted > 0);
        assert!(report.stats.rejected_full > 0, "two servers cannot keep up");
        assert_eq!(report.stats.served, report.stats.accepted);
        assert_eq!(report.stats.rejected_closed, 0);
        assert_eq!(report.stats.servers_exited, 2);
    }
}
