use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use parking_allocator::lot::{DemoLayout, ParkingFacility, SpotCategory, SpotId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Parser)]
#[command(name = "parking_allocator")]
#[command(about = "Headless parking lot allocation simulation")]
struct Cli {
    /// Number of car spots in the demo lot
    #[arg(long, default_value = "12")]
    car_spots: usize,

    /// Number of motorcycle spots in the demo lot
    #[arg(long, default_value = "4")]
    motorcycle_spots: usize,

    /// Number of commercial spots in the demo lot
    #[arg(long, default_value = "2")]
    commercial_spots: usize,

    /// Number of arrival or departure events to simulate
    #[arg(
        long,
        default_value = "60",
        value_parser = clap::value_parser!(u32).range(..MAX_EVENTS)
    )]
    events: u32,

    /// Seed for the traffic generator
    #[arg(long, default_value = "7")]
    seed: u64,
}

/// Event numbers are written into plates with this many digits
const PLATE_DIGITS: usize = 6;

/// Upper bound on `--events` keeping every generated plate within 7 characters
const MAX_EVENTS: i64 = 1_000_000;

/// Counters reported at the end of a run
#[derive(Debug, Default)]
struct RunStats {
    arrivals: u32,
    parked: u32,
    turned_away: u32,
    rejected: u32,
    departures: u32,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn,parking_allocator=info"),
    )
    .init();

    let cli = Cli::parse();
    run_headless(&cli)
}

/// Run the allocation simulation without any interaction
fn run_headless(cli: &Cli) -> Result<()> {
    let layout = DemoLayout {
        car_spots: cli.car_spots,
        motorcycle_spots: cli.motorcycle_spots,
        commercial_spots: cli.commercial_spots,
    };
    let mut facility =
        ParkingFacility::create_demo_facility(layout).context("Failed to build demo lot")?;
    let mut rng = StdRng::seed_from_u64(cli.seed);

    info!("Initial state: {}", facility.lot().summary());
    if let Some(route) = facility.route_to(SpotId(1)) {
        let hops: Vec<String> = route.path.iter().map(ToString::to_string).collect();
        info!("Nearest spot route: {} ({})", hops.join(" -> "), route.distance);
    }

    let mut stats = RunStats::default();
    let mut parked: Vec<String> = Vec::new();

    for event in 0..cli.events {
        if !parked.is_empty() && rng.random_bool(0.35) {
            let plate = parked.swap_remove(rng.random_range(0..parked.len()));
            let spot = facility
                .lot_mut()
                .release(&plate)
                .with_context(|| format!("Failed to release {plate}"))?;
            if spot.is_some() {
                stats.departures += 1;
            }
            continue;
        }

        let category = match rng.random_range(0..10) {
            0 => SpotCategory::Commercial,
            1..=3 => SpotCategory::Motorcycle,
            _ => SpotCategory::Car,
        };
        let plate = format!(
            "{}-{:0width$}",
            category_prefix(category),
            event,
            width = PLATE_DIGITS
        );
        stats.arrivals += 1;

        match facility.lot_mut().occupy(&plate, category) {
            Ok(Some(spot)) => {
                info!(
                    "{} {} parked in spot {} ({:.1} from entrance)",
                    category,
                    plate,
                    spot.id(),
                    spot.distance()
                );
                stats.parked += 1;
                parked.push(plate);
            }
            Ok(None) => {
                info!("No {} spot left for {}", category, plate);
                stats.turned_away += 1;
            }
            Err(e) => {
                warn!("Rejected {}: {}", plate, e);
                stats.rejected += 1;
            }
        }
    }

    facility
        .lot()
        .audit()
        .context("Lot state is inconsistent after the run")?;

    let lot = facility.lot();
    info!("=== SIMULATION COMPLETE ===");
    info!("{}", lot.summary());
    info!("Total arrivals: {}", stats.arrivals);
    info!("Vehicles parked: {}", stats.parked);
    info!("Vehicles turned away: {}", stats.turned_away);
    info!("Rejected plates: {}", stats.rejected);
    info!("Departures: {}", stats.departures);
    info!("Occupied spots: {}", lot.occupied_count());
    info!(
        "Occupancy rate: {:.1}%",
        if lot.spot_count() > 0 {
            lot.occupied_count() as f32 / lot.spot_count() as f32 * 100.0
        } else {
            0.0
        }
    );

    Ok(())
}

/// One-letter plate prefix, so `C-000042` formats to the 7 character `C000042`
fn category_prefix(category: SpotCategory) -> char {
    match category {
        SpotCategory::Car => 'C',
        SpotCategory::Motorcycle => 'M',
        SpotCategory::Commercial => 'T',
    }
}
