//! Station configuration.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationConfig {
    /// Waiting-room seats. Zero means every arrival is turned away as full.
    pub capacity: usize,
    /// How long a server spends on one arrival.
    pub service_time: Duration,
}

impl StationConfig {
    /// Creates a config with a one-second service time.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            service_time: Duration::from_millis(1000),
        }
    }

    pub fn with_service_time(mut self, service_time: Duration) -> Self {
        self.service_time = service_time;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_time.is_zero() {
            return Err(ConfigError::ZeroDuration {
                field: "service_time",
            });
        }
        Ok(())
    }
}
