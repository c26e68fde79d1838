//! Rebuild and print the timeline of a synthetic truck-and-drone mission.
//!
//! Usage:
//!   cargo run -p tandem-cli --bin timeline_demo -- --scenario mixed --drones 3

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use tandem_cli::render;
use tandem_cli::{
    create_mixed_scenario, create_random_scenario, create_round_trip_scenario,
    create_single_excursion_scenario, CliConfig,
};
use tandem_core::{
    build_fleet_assignment, build_schedule, empty_schedule, generate_timeline, route_details,
    vehicle_details, FleetMode,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Available demo missions
#[derive(Debug, Clone, ValueEnum)]
enum ScenarioType {
    /// Truck out to one customer and back
    RoundTrip,
    /// Parked truck, one drone delivery
    SingleExcursion,
    /// Truck delivery, charging stop and two sorties
    Mixed,
    /// Seeded random mission
    Random,
}

/// Vehicles shown in the rollups
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Fleet {
    TruckDrone,
    TruckOnly,
    DronesOnly,
}

impl From<Fleet> for FleetMode {
    fn from(fleet: Fleet) -> Self {
        match fleet {
            Fleet::TruckDrone => FleetMode::TruckDrone,
            Fleet::TruckOnly => FleetMode::TruckOnly,
            Fleet::DronesOnly => FleetMode::DronesOnly,
        }
    }
}

/// Truck-and-drone mission timeline demo
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Mission to build
    #[arg(long, value_enum, default_value = "mixed")]
    scenario: ScenarioType,

    /// Depot latitude (default: Irvine, CA)
    #[arg(long, default_value_t = 33.6846)]
    lat: f64,

    /// Depot longitude (default: Irvine, CA)
    #[arg(long, default_value_t = -117.8265)]
    lon: f64,

    /// Drones in the fleet (overrides TANDEM_DRONE_COUNT)
    #[arg(long)]
    drones: Option<usize>,

    /// Vehicles included in the rollups
    #[arg(long, value_enum, default_value = "truck-drone")]
    fleet: Fleet,

    /// Truck speed in km/h (overrides TANDEM_TRUCK_SPEED_KMH)
    #[arg(long)]
    truck_speed: Option<f64>,

    /// Drone speed in km/h (overrides TANDEM_DRONE_SPEED_KMH)
    #[arg(long)]
    drone_speed: Option<f64>,

    /// Customers in the random scenario
    #[arg(long, default_value_t = 8)]
    orders: usize,

    /// Share of random customers served by drone
    #[arg(long, default_value_t = 0.4)]
    drone_share: f64,

    /// Seed for the random scenario
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Mission start for wall-clock times (RFC 3339)
    #[arg(long)]
    start: Option<DateTime<Utc>>,

    /// Seconds into the mission used for event status
    #[arg(long)]
    elapsed: Option<f64>,

    /// Print the timeline as JSON instead of tables
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("timeline_demo=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let mut config = CliConfig::from_env();
    if let Some(drones) = args.drones {
        config.drone_count = drones;
    }
    if let Some(speed) = args.truck_speed {
        config.timeline.truck_speed_kmh = speed;
    }
    if let Some(speed) = args.drone_speed {
        config.timeline.drone_speed_kmh = speed;
    }
    config
        .timeline
        .validate()
        .context("invalid timing configuration")?;
    if !(0.0..=1.0).contains(&args.drone_share) {
        anyhow::bail!("--drone-share must be between 0 and 1");
    }

    let scenario = match args.scenario {
        ScenarioType::RoundTrip => create_round_trip_scenario(args.lat, args.lon),
        ScenarioType::SingleExcursion => create_single_excursion_scenario(args.lat, args.lon),
        ScenarioType::Mixed => create_mixed_scenario(args.lat, args.lon),
        ScenarioType::Random => {
            create_random_scenario(args.lat, args.lon, args.orders, args.drone_share, args.seed)
        }
    };

    tracing::info!(
        scenario = %scenario.name,
        route_points = scenario.route.len(),
        excursions = scenario.excursions.len(),
        drones = config.drone_count,
        "building timeline"
    );

    let mut result = generate_timeline(
        &scenario.route,
        &scenario.excursions,
        &scenario.sites,
        &config.timeline,
    );
    if let Some(elapsed) = args.elapsed {
        result = result.at_elapsed(elapsed);
        if let Some(current) = result.current_event(elapsed) {
            tracing::info!(event = %current.id, label = %current.label, "current event");
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let mode = FleetMode::from(args.fleet);
    let schedule = if result.is_empty() {
        empty_schedule(mode, config.drone_count)
    } else {
        build_schedule(&result, mode, config.drone_count)
    };

    let mut out = String::new();
    render::write_timeline(&mut out, &result, args.start)?;
    out.push('\n');
    render::write_summary(&mut out, &result.summary)?;
    out.push('\n');
    render::write_fleet(
        &mut out,
        &build_fleet_assignment(&result.events, config.drone_count),
    )?;
    out.push('\n');
    render::write_route_details(&mut out, &route_details(&result.events, mode))?;
    out.push('\n');
    render::write_vehicle_details(
        &mut out,
        &vehicle_details(&result.events, mode, config.drone_count),
    )?;
    out.push('\n');
    render::write_schedule(&mut out, &schedule)?;

    println!("\nScenario: {}\n", scenario.name);
    print!("{out}");
    Ok(())
}
