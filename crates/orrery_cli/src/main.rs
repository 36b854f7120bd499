//! Orrery CLI
//!
//! Runs animation and particle scenarios without a renderer and validates
//! engine configuration files.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use orrery_app::{run_loaded_scenario, EngineConfig, Scenario};
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Headless runner for the Orrery animation and particle engine
#[derive(Parser, Debug)]
#[command(name = "orrery")]
#[command(about = "Run Orrery scenarios headlessly and validate engine configs")]
#[command(version)]
struct Cli {
    /// Log more (repeat for trace output)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a JSON scenario and print its report
    Run {
        /// Scenario file
        scenario: PathBuf,

        /// Engine config file, or a directory containing orrery.toml
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Also write the report to this relative path
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Override the config's random seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Validate an engine config and print it with defaults filled in
    Check {
        /// Config file, or a directory containing orrery.toml
        #[arg(default_value = ".")]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Run {
            scenario,
            config,
            report,
            seed,
        } => cmd_run(&scenario, config.as_deref(), report.as_deref(), seed),
        Command::Check { config } => cmd_check(&config),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(io::stderr)
        .init();
}

fn cmd_run(
    scenario_path: &Path,
    config_path: Option<&Path>,
    report_path: Option<&Path>,
    seed: Option<u64>,
) -> Result<()> {
    if !scenario_path.is_file() {
        bail!("Scenario not found: {}", scenario_path.display());
    }

    let mut config = match config_path {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if seed.is_some() {
        config.seed = seed;
    }

    let scenario = Scenario::from_path(scenario_path)?;
    info!(
        "Running {} ({} steps, {} nodes)",
        scenario_path.display(),
        scenario.steps.len(),
        scenario.nodes.len()
    );

    let report = run_loaded_scenario(&scenario, &config)?;
    info!(
        frames = report.frames,
        seconds = report.simulated_seconds,
        "Scenario finished"
    );

    if let Some(path) = report_path {
        report.write_to_path(path)?;
        info!("Report written to {}", path.display());
    }
    report.write_to_writer(&mut io::stdout().lock())
}

fn cmd_check(config_path: &Path) -> Result<()> {
    let config = EngineConfig::load(config_path)?;
    info!("Config OK: {}", config_path.display());
    print!("{}", config.to_toml()?);
    Ok(())
}
