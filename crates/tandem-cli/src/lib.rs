//! Tandem CLI - demo harness for mission timelines.
//!
//! This crate provides:
//! - scenarios: synthetic truck-and-drone missions
//! - config: environment-driven timing and fleet settings
//! - render: text tables for timelines, rollups and schedules

pub mod config;
pub mod render;
pub mod scenarios;

pub use config::CliConfig;
pub use scenarios::{
    create_mixed_scenario, create_random_scenario, create_round_trip_scenario,
    create_single_excursion_scenario, Scenario,
};
