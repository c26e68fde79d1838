//! Demo configuration from environment.

use std::env;
use tandem_core::TimelineConfig;

/// Drones in the fleet when nothing else is configured.
pub const DEFAULT_DRONE_COUNT: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    pub timeline: TimelineConfig,
    pub drone_count: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            timeline: TimelineConfig::default(),
            drone_count: DEFAULT_DRONE_COUNT,
        }
    }
}

impl CliConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Missing or unparsable values fall
    /// back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = TimelineConfig::default();
        let number = |key: &str, fallback: f64| {
            lookup(key)
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(fallback)
        };

        Self {
            timeline: TimelineConfig {
                truck_speed_kmh: number("TANDEM_TRUCK_SPEED_KMH", defaults.truck_speed_kmh),
                drone_speed_kmh: number("TANDEM_DRONE_SPEED_KMH", defaults.drone_speed_kmh),
                drone_load_time_secs: number(
                    "TANDEM_DRONE_LOAD_SECS",
                    defaults.drone_load_time_secs,
                ),
                drone_unload_time_secs: number(
                    "TANDEM_DRONE_UNLOAD_SECS",
                    defaults.drone_unload_time_secs,
                ),
                truck_delivery_time_secs: number(
                    "TANDEM_TRUCK_SERVICE_SECS",
                    defaults.truck_delivery_time_secs,
                ),
                charging_time_secs: number("TANDEM_CHARGING_SECS", defaults.charging_time_secs),
            },
            drone_count: lookup("TANDEM_DRONE_COUNT")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(DEFAULT_DRONE_COUNT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_empty_environment_uses_defaults() {
        assert_eq!(CliConfig::from_lookup(lookup(&[])), CliConfig::default());
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config = CliConfig::from_lookup(lookup(&[
            ("TANDEM_TRUCK_SPEED_KMH", "55"),
            ("TANDEM_CHARGING_SECS", " 900 "),
            ("TANDEM_DRONE_COUNT", "4"),
        ]));
        assert_eq!(config.timeline.truck_speed_kmh, 55.0);
        assert_eq!(config.timeline.charging_time_secs, 900.0);
        assert_eq!(config.drone_count, 4);
        assert_eq!(config.timeline.drone_speed_kmh, 60.0);
    }

    #[test]
    fn test_garbage_falls_back() {
        let config = CliConfig::from_lookup(lookup(&[
            ("TANDEM_DRONE_SPEED_KMH", "fast"),
            ("TANDEM_DRONE_COUNT", "-1"),
        ]));
        assert_eq!(config.timeline.drone_speed_kmh, 60.0);
        assert_eq!(config.drone_count, DEFAULT_DRONE_COUNT);
    }
}
