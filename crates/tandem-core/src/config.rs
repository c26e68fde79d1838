//! Timing parameters and matching thresholds for timeline generation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Componentwise tolerance for "same location" matches (~11 m at mid-latitudes).
pub const MATCH_TOLERANCE_DEG: f64 = 1e-4;

/// Truck segments at or below this length produce no travel event.
pub const MIN_TRAVEL_SEGMENT_M: f64 = 50.0;

/// A final route point this close to the depot counts as a depot return.
pub const DEPOT_RETURN_RADIUS_M: f64 = 100.0;

/// Vehicle speeds and service times used to estimate event durations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Truck cruise speed in km/h
    pub truck_speed_kmh: f64,
    /// Drone cruise speed in km/h
    pub drone_speed_kmh: f64,
    /// Time to load a drone before launch, also spent by the truck at recovery
    pub drone_load_time_secs: f64,
    /// Drone service time at the order
    pub drone_unload_time_secs: f64,
    /// Truck service time at an order
    pub truck_delivery_time_secs: f64,
    /// Truck dwell at a charging station
    pub charging_time_secs: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            truck_speed_kmh: 40.0,
            drone_speed_kmh: 60.0,
            drone_load_time_secs: 30.0,
            drone_unload_time_secs: 360.0, // 6 min service window
            truck_delivery_time_secs: 360.0,
            charging_time_secs: 600.0,
        }
    }
}

/// Invalid timing configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be a positive speed, got {value}")]
    NonPositiveSpeed { field: &'static str, value: f64 },
    #[error("{field} must be a non-negative duration, got {value}")]
    NegativeDuration { field: &'static str, value: f64 },
}

impl TimelineConfig {
    /// Check the configuration contract. The engine assumes a valid
    /// configuration and never calls this itself.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("truck_speed_kmh", self.truck_speed_kmh),
            ("drone_speed_kmh", self.drone_speed_kmh),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositiveSpeed { field, value });
            }
        }

        for (field, value) in [
            ("drone_load_time_secs", self.drone_load_time_secs),
            ("drone_unload_time_secs", self.drone_unload_time_secs),
            ("truck_delivery_time_secs", self.truck_delivery_time_secs),
            ("charging_time_secs", self.charging_time_secs),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::NegativeDuration { field, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = TimelineConfig::default();
        assert_eq!(config.truck_speed_kmh, 40.0);
        assert_eq!(config.drone_speed_kmh, 60.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_speed_is_rejected() {
        let config = TimelineConfig {
            drone_speed_kmh: 0.0,
            ..TimelineConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveSpeed {
                field: "drone_speed_kmh",
                value: 0.0
            })
        );
    }

    #[test]
    fn negative_duration_is_rejected() {
        let config = TimelineConfig {
            charging_time_secs: -1.0,
            ..TimelineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NegativeDuration {
                field: "charging_time_secs",
                ..
            })
        ));
    }

    #[test]
    fn partial_config_deserializes_with_defaults() {
        let config: TimelineConfig =
            serde_json::from_str(r#"{"truck_speed_kmh": 30.0}"#).unwrap();
        assert_eq!(config.truck_speed_kmh, 30.0);
        assert_eq!(config.drone_load_time_secs, 30.0);
    }
}
