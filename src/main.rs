//! Bandwatch driver binary
//!
//! Thin stand-in for the surrounding application: loads configuration,
//! generates a mock device fleet, runs the monitor for a fixed number of
//! ticks, and prints the final allocation as JSON.
//!
//! # Usage
//!
//! ```bash
//! # Run 30 one-second ticks with defaults
//! cargo run --release
//!
//! # Reproducible run with a custom budget
//! cargo run --release -- --seed 42 --bandwidth 750 --ticks 10
//! ```
//!
//! # Environment Variables
//!
//! - `BANDWATCH_CONFIG`: path to a TOML config file
//! - `RUST_LOG`: logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use bandwatch::monitor::{SystemClock, UniformDrift};
use bandwatch::{generator, registry, HistoryStore, Monitor, NetworkConfig};

#[derive(Parser, Debug)]
#[command(name = "bandwatch")]
#[command(about = "Smart home network bandwidth manager")]
#[command(version)]
struct CliArgs {
    /// Path to a TOML config file (overrides the BANDWATCH_CONFIG search order)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducible fleets and drift
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to run before printing the final allocation
    #[arg(long, default_value = "30")]
    ticks: u64,

    /// Override the total bandwidth budget (Mbps)
    #[arg(long)]
    bandwidth: Option<f64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = CliArgs::parse();

    let mut config = match &args.config {
        Some(path) => NetworkConfig::load_from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => NetworkConfig::load(),
    };
    if let Some(bandwidth) = args.bandwidth {
        config.network.total_bandwidth_mbps = bandwidth;
    }
    let config = config.validate();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let count = rng.gen_range(config.devices.count_min..=config.devices.count_max);
    let devices = generator::mock_devices(&mut rng, count);

    info!(
        devices = devices.len(),
        total_bandwidth_mbps = config.network.total_bandwidth_mbps,
        tick_period_secs = config.network.tick_period_secs,
        "Starting bandwidth monitor"
    );

    let registry = registry::shared(devices);
    let history = HistoryStore::new(config.retention_window());
    let drift = match args.seed {
        Some(seed) => UniformDrift::seeded(seed),
        None => UniformDrift::from_entropy(),
    };
    let monitor = Monitor::with_parts(
        registry.clone(),
        history.clone(),
        &config,
        Box::new(drift),
        Arc::new(SystemClock),
    );

    monitor.start().await;

    // Wait until the requested number of ticks has completed.
    let poll = config.tick_period() / 2;
    loop {
        tokio::time::sleep(poll).await;
        if registry.read().await.ticks_completed >= args.ticks {
            break;
        }
    }

    monitor.stop().await;

    let state = registry.read().await;
    let stats = history.stats().await;
    info!(
        ticks = state.ticks_completed,
        snapshots = stats.snapshot_count,
        active_devices = state.active_devices(),
        total_usage_mbps = state.total_usage(),
        "Monitor run complete"
    );

    println!(
        "{}",
        serde_json::to_string_pretty(&state.latest_allocation)?
    );

    Ok(())
}
