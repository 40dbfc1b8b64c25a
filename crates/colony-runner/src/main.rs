//! Headless host that advances a colony world on a fixed interval.

mod telemetry;

use anyhow::Result;
use colony_core::{Owner, RunnerConfig};
use colony_world::{SharedWorld, World};
use std::path::PathBuf;
use tokio::signal;
use tokio::time::{interval, Duration};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_telemetry()?;

    // Load configuration
    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => {
            info!("Loading config from {}", path.display());
            RunnerConfig::from_json_file(&path)?
        }
        None => RunnerConfig::default(),
    };
    config.validate()?;

    let world = build_world(&config)?;
    info!(
        colonies = world.colony_count(),
        objects = world.occupancy().len(),
        "World ready"
    );
    let shared = SharedWorld::new(world);

    tokio::select! {
        result = run_loop(shared.clone(), &config) => {
            result?;
            info!("Tick limit reached");
        }
        _ = shutdown_signal() => {}
    }

    shared.read(|world| {
        for (owner, count) in world.population_by_owner() {
            info!(owner = %owner, ants = count, "Final population");
        }
        match colony_world::codec::to_json(&world.records()) {
            Ok(json) => info!(bytes = json.len(), "Final world encoded"),
            Err(e) => error!("Failed to encode world: {}", e),
        }
    });

    info!("Shutting down runner");
    Ok(())
}

fn build_world(config: &RunnerConfig) -> Result<World> {
    let mut world = match config.seed {
        Some(seed) => World::with_seed(config.world.clone(), seed),
        None => World::new(config.world.clone()),
    };

    for owner in &config.colonies {
        world.new_colony(Owner::new(owner.as_str()))?;
    }
    for (a, b) in &config.alliances {
        world.friend(&Owner::new(a.as_str()), &Owner::new(b.as_str()));
    }
    let placed = world.scatter_rocks(config.rocks)?;
    if placed < config.rocks {
        warn!("Only placed {} of {} rocks", placed, config.rocks);
    }

    Ok(world)
}

async fn run_loop(shared: SharedWorld, config: &RunnerConfig) -> Result<()> {
    config.validate()?;
    let mut interval = interval(Duration::from_millis(config.tick_interval_ms));

    loop {
        interval.tick().await;

        let report = shared.advance();

        if config.report_every > 0 && report.tick % config.report_every == 0 {
            info!(
                tick = report.tick,
                population = report.population,
                fights = report.fights,
                produced = report.produced,
                "Tick report"
            );
            shared.read(|world| {
                for (owner, count) in world.population_by_owner() {
                    record_gauge!("population", count, owner = owner.as_str());
                }
            });
        }

        if config.max_ticks.is_some_and(|max| report.tick >= max) {
            return Ok(());
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
