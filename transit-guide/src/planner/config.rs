//! Routing configuration for the route planner.

use serde::Deserialize;

use crate::domain::InvalidSettings;

/// Configuration parameters for itinerary search.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RoutingSettings {
    /// Time spent waiting at a stop before every boarding (minutes).
    pub bus_wait_time: u32,

    /// Average bus speed (km/h).
    pub bus_velocity: f64,
}

impl RoutingSettings {
    /// Create a new configuration with the given parameters.
    pub fn new(bus_wait_time: u32, bus_velocity: f64) -> Self {
        Self {
            bus_wait_time,
            bus_velocity,
        }
    }

    /// Reject speeds that would make ride times meaningless.
    pub fn validate(&self) -> Result<(), InvalidSettings> {
        if !self.bus_velocity.is_finite() || self.bus_velocity <= 0.0 {
            return Err(InvalidSettings::new(
                "bus_velocity",
                "must be a positive number",
            ));
        }
        Ok(())
    }

    /// Returns the wait time in minutes as used for edge weights.
    pub fn wait_time(&self) -> f64 {
        f64::from(self.bus_wait_time)
    }

    /// Returns the bus speed in metres per minute.
    pub fn meters_per_minute(&self) -> f64 {
        self.bus_velocity * 1000.0 / 60.0
    }

    /// Minutes needed to ride `meters`.
    pub fn ride_time(&self, meters: u32) -> f64 {
        f64::from(meters) / self.meters_per_minute()
    }
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            bus_wait_time: 6,
            bus_velocity: 40.0,
        }
    }
}

/// Configuration for the per-origin route cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of origins whose shortest-path trees are kept.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { max_capacity: 1000 }
    }
}
