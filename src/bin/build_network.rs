//! Precomputes the safety network for the first test case of an input file
//! and writes it next to a small metadata file.

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::info;
use safe_flight::config::SolverConfig;
use safe_flight::data::write_network_to_file;
use safe_flight::problem::parse_cases;
use serde::Serialize;

/// Precompute a safety network for later route queries
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Problem file in the plain-text format
    input: PathBuf,

    /// Output directory
    #[arg(long, default_value = "data")]
    out_dir: PathBuf,

    /// JSON solver config (planet_radius, epsilon)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct NetworkMetadata {
    source_file: String,
    airports: usize,
    vertices: usize,
    safe_legs: usize,
    safety_radius: f64,
    planet_radius: f64,
    generated_at_epoch: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SolverConfig::from_json_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => SolverConfig::from_env().context("failed to load config from environment")?,
    };

    let input = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let cases = parse_cases(&input).context("malformed input")?;
    let case = cases
        .first()
        .ok_or_else(|| anyhow!("{} contains no test case", args.input.display()))?;

    let network = case.network(&config);

    fs::create_dir_all(&args.out_dir).context("failed to create output directory")?;
    let network_path = args.out_dir.join("network.bin");
    write_network_to_file(&network, &network_path)
        .with_context(|| format!("failed to write network to {}", network_path.display()))?;

    let metadata = NetworkMetadata {
        source_file: args.input.display().to_string(),
        airports: network.airport_count(),
        vertices: network.vertex_count(),
        safe_legs: network.safe_legs,
        safety_radius: network.safety_radius,
        planet_radius: network.sphere.radius,
        generated_at_epoch: current_epoch_seconds(),
    };
    let metadata_path = args.out_dir.join("network.meta.json");
    let metadata_json = serde_json::to_vec_pretty(&metadata)?;
    fs::write(&metadata_path, metadata_json)
        .with_context(|| format!("failed to write metadata to {}", metadata_path.display()))?;

    info!(
        "Wrote network to {} ({} airports, {} vertices, {} safe legs)",
        network_path.display(),
        metadata.airports,
        metadata.vertices,
        metadata.safe_legs
    );

    Ok(())
}

fn current_epoch_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
