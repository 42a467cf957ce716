//! Session configuration for the resource ring.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Names used for the first actors when the caller supplies none.
pub const DEFAULT_NAMES: [&str; 5] = ["Plato", "Socrates", "Aristotle", "Pascal", "Locke"];

/// Everything a [`RingSession`](super::RingSession) needs to know up front.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use sync_classics::ring::RingConfig;
///
/// let config = RingConfig::new(5, 3)
///     .with_eat_time(Duration::from_millis(10))
///     .with_think_time(Duration::from_millis(5));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingConfig {
    /// Number of actors, and therefore of resources, at the table.
    pub actor_count: usize,
    /// How many times each actor eats before departing.
    pub cycles_per_actor: usize,
    /// How long an actor holds both resources per cycle.
    pub eat_time: Duration,
    /// Pause after releasing, before the next acquisition. May be zero.
    pub think_time: Duration,
    /// Optional display names, by actor index. Missing entries fall back to defaults.
    #[serde(default)]
    pub names: Vec<String>,
}

impl RingConfig {
    /// Creates a config with the classic timings: one second eating, three thinking.
    pub fn new(actor_count: usize, cycles_per_actor: usize) -> Self {
        Self {
            actor_count,
            cycles_per_actor,
            eat_time: Duration::from_secs(1),
            think_time: Duration::from_secs(3),
            names: Vec::new(),
        }
    }

    pub fn with_eat_time(mut self, eat_time: Duration) -> Self {
        self.eat_time = eat_time;
        self
    }

    pub fn with_think_time(mut self, think_time: Duration) -> Self {
        self.think_time = think_time;
        self
    }

    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Rejects configurations that could never run a meaningful session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.actor_count == 0 {
            return Err(ConfigError::NoActors);
        }
        if self.cycles_per_actor == 0 {
            return Err(ConfigError::NoCycles);
        }
        if self.eat_time.is_zero() {
            return Err(ConfigError::ZeroDuration { field: "eat_time" });
        }
        if self.names.len() > self.actor_count {
            return Err(ConfigError::TooManyNames {
                names: self.names.len(),
                actors: self.actor_count,
            });
        }
        Ok(())
    }

    /// Display name for actor `index`.
    pub fn name_of(&self, index: usize) -> String {
        self.names
            .get(index)
            .cloned()
            .or_else(|| DEFAULT_NAMES.get(index).map(|name| name.to_string()))
            .unwrap_or_else(|| format!("Philosopher #{}", index + 1))
    }

    /// Rough upper bound on how long a healthy session takes, used to size the watchdog.
    ///
    /// Assumes the worst case where every meal in the ring is serialized.
    pub fn expected_duration(&self) -> Duration {
        let per_cycle = self.eat_time.saturating_add(self.think_time);
        let meals = self.actor_count.saturating_mul(self.cycles_per_actor);
        let meals = u32::try_from(meals).unwrap_or(u32::MAX);
        per_cycle.saturating_mul(meals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_duration_saturates_instead_of_wrapping() {
        let config = RingConfig::new(5, 3)
            .with_eat_time(Duration::from_millis(10))
            .with_think_time(Duration::from_millis(10));
        assert_eq!(config.expected_duration(), Duration::from_millis(300));

        // 2^32 meals would wrap to zero in a u32.
        let huge = RingConfig::new(1 << 16, 1 << 16)
            .with_eat_time(Duration::from_millis(1))
            .with_think_time(Duration::ZERO);
        assert_eq!(
            huge.expected_duration(),
            Duration::from_millis(1).saturating_mul(u32::MAX)
        );
    }

    #[test]
    fn test_rejects_empty_ring() {
        assert_eq!(RingConfig::new(0, 3).validate(), Err(ConfigError::NoActors));
    }

    #[test]
    fn test_rejects_zero_cycles() {
        assert_eq!(RingConfig::new(5, 0).validate(), Err(ConfigError::NoCycles));
    }

    #[test]
    fn test_rejects_zero_eat_time_but_allows_zero_think_time() {
        let config = RingConfig::new(2, 1).with_eat_time(Duration::ZERO);
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroDuration { field: "eat_time" })
        );

        let config = RingConfig::new(2, 1).with_think_time(Duration::ZERO);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_more_names_than_actors() {
        let config = RingConfig::new(1, 1).with_names(["Hume", "Kant"]);
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooManyNames { names: 2, actors: 1 })
        );
    }

    #[test]
    fn test_name_fallbacks() {
        let config = RingConfig::new(7, 1).with_names(["Hume"]);
        assert_eq!(config.name_of(0), "Hume");
        assert_eq!(config.name_of(1), "Socrates");
        assert_eq!(config.name_of(6), "Philosopher #7");
    }
}
