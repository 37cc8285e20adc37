// Vane Agent - Edge client binary
// Copyright (c) 2025 Vane contributors
//
// Licensed under AGPL-3.0. See LICENSE file for details.

//! # Vane Agent
//!
//! Runs the edge client against a collector: simulated neighborhood
//! snapshots in, feature-vector frames out, paced by the collector's
//! control opcodes.
//!
//! ## Usage
//!
//! ```bash
//! # Send 5D vectors to a local collector
//! vane-agent --addr 127.0.0.1 --port 9000
//!
//! # 2D discomfort vectors from a custom site
//! vane-agent -a 10.0.0.5 -p 9000 -v 0 --site-config site.json
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;
use vane::{Controller, Link, RetryPolicy, VectorSchema, SIMULATION_EPOCH};
use vane_simdata::{SimulatedSite, SiteConfig};

/// Vane edge agent
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Collector address
    #[arg(short, long)]
    addr: String,

    /// Collector port
    #[arg(short, long)]
    port: u16,

    /// Vector schema id (0 = 2D, 1 = 3D, 2 = 5D)
    #[arg(short, long, default_value = "2")]
    vector: u8,

    /// First simulated timestamp (unix seconds)
    #[arg(long, default_value_t = SIMULATION_EPOCH)]
    start_time: i64,

    /// Site configuration file (JSON); flags below override it
    #[arg(long)]
    site_config: Option<PathBuf>,

    /// Number of simulated households
    #[arg(long)]
    households: Option<usize>,

    /// Simulation seed
    #[arg(long)]
    seed: Option<u64>,

    /// Cap on stalled-transport retries (default: retry forever)
    #[arg(long)]
    max_retries: Option<u32>,

    /// Delay between stalled-transport retries, milliseconds
    #[arg(long, default_value = "0")]
    retry_delay_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    // Initialize tracing; the library's `log` records are captured too
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match args.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };
        EnvFilter::from_default_env().add_directive(level.into())
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Vane Agent v{}", env!("CARGO_PKG_VERSION"));

    // Reject a bad schema id before any network activity
    let Some(schema) = VectorSchema::from_u8(args.vector) else {
        error!("invalid vector id {} (use 0, 1, or 2)", args.vector);
        process::exit(1);
    };

    let site = match build_site(&args) {
        Ok(site) => site,
        Err(e) => {
            error!("failed to load site config: {}", e);
            process::exit(1);
        }
    };
    info!(
        "site: {} households, seed {}",
        site.config().households,
        site.config().seed
    );

    let link = match Link::connect(&args.addr, args.port) {
        Ok(link) => link,
        Err(e) => {
            error!("{}", e);
            error!("please try again");
            process::exit(1);
        }
    };

    let delay = Duration::from_millis(args.retry_delay_ms);
    let policy = match args.max_retries {
        Some(cap) => RetryPolicy::bounded(cap, delay),
        None => RetryPolicy::unbounded().with_delay(delay),
    };

    let mut controller = Controller::new(site, link.with_retry_policy(policy), schema)
        .with_start_time(args.start_time);

    info!("sending {} vectors to {}:{}", schema, args.addr, args.port);
    if let Err(e) = controller.run() {
        error!("run aborted after {} cycles: {}", controller.cycles(), e);
        process::exit(1);
    }
    info!("collector ended the session after {} cycles", controller.cycles());
}

fn build_site(args: &Args) -> Result<SimulatedSite, String> {
    let mut config = match &args.site_config {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
            serde_json::from_str::<SiteConfig>(&text).map_err(|e| e.to_string())?
        }
        None => SiteConfig::new(),
    };
    if let Some(households) = args.households {
        config.households = households;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    Ok(SimulatedSite::new(config))
}
