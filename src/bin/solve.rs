//! Solves problems in the plain-text format, printing one `Case k:` block per
//! test case.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use safe_flight::config::SolverConfig;
use safe_flight::problem::{format_case, parse_cases};

/// Shortest safe flight distances for fuel-limited queries
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Input file; reads stdin when omitted
    input: Option<PathBuf>,

    /// JSON solver config (planet_radius, epsilon)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SolverConfig::from_json_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => SolverConfig::from_env().context("failed to load config from environment")?,
    };

    let input = match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("failed to read stdin")?;
            buf
        }
    };

    let cases = parse_cases(&input).context("malformed input")?;
    info!("solving {} test cases", cases.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (i, case) in cases.iter().enumerate() {
        let answers = case
            .solve(&config)
            .with_context(|| format!("case {} failed", i + 1))?;
        out.write_all(format_case(i + 1, &answers).as_bytes())?;
    }
    out.flush()?;
    Ok(())
}
