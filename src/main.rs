//! `fancontrol`: entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  SysinfoSensor      HalFanActuator      LogEventSink     │
//! │  (SensorPort)       (ActuatorPort)      (EventSink)      │
//! │        └──── ProcessRunner (timeout per command) ───┘    │
//! │                                                          │
//! │  ──────────────── Port Trait Boundary ─────────────      │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │        ControlCycle (pure decision logic)      │      │
//! │  │        ProfileTable · FanBank · fail-safe      │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! By default one cycle runs and the process exits; an external timer
//! provides the schedule. `--interval` keeps the process alive and repeats
//! independent cycles itself.

use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use tracing_subscriber::EnvFilter;

use fancontrol::adapters::command::ProcessRunner;
use fancontrol::adapters::hal_fans::HalFanActuator;
use fancontrol::adapters::log_sink::LogEventSink;
use fancontrol::adapters::sysinfo::SysinfoSensor;
use fancontrol::app::service::ControlCycle;
use fancontrol::config::ControllerConfig;

/// Settings file looked up next to the executable when none is given.
const DEFAULT_CONFIG_FILE: &str = "settings.json";

#[derive(Parser)]
#[command(name = "fancontrol")]
#[command(about = "Stepwise chassis fan controller with fail-safe maximum cooling")]
#[command(version)]
struct Cli {
    /// Settings file (JSON)
    #[arg(short, long, env = "FANCONTROL_CONFIG")]
    config: Option<PathBuf>,

    /// Repeat a cycle every SECS seconds instead of running once
    #[arg(short, long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    interval: Option<u64>,

    /// Override the per-command timeout from the settings file
    #[arg(long, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    timeout_ms: Option<u64>,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // ── 1. Configuration (fatal on any error) ─────────────────
    let config_path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let mut config = ControllerConfig::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    if let Some(ms) = cli.timeout_ms {
        config.command_timeout_ms = ms;
    }

    // ── 2. Logging ────────────────────────────────────────────
    init_logging(&config.log_level)?;
    info!("Starting Fan Control v{}", env!("CARGO_PKG_VERSION"));

    // ── 3. Domain + adapters ──────────────────────────────────
    let cycle = ControlCycle::new(config.profile_table()?);
    let runner = ProcessRunner::new(config.command_timeout());
    let mut sensor = SysinfoSensor::new(runner, config.commands.sysinfo.as_str());
    let mut fans = HalFanActuator::new(
        runner,
        config.commands.sysinfo.as_str(),
        config.commands.fan_mode.as_str(),
    );
    let mut sink = LogEventSink::new();

    // ── 4. Cycles ─────────────────────────────────────────────
    let Some(secs) = cli.interval else {
        let outcome = cycle.run(&mut sensor, &mut fans, &mut sink);
        return Ok(ExitCode::from(outcome.exit_code()));
    };

    info!("Running a cycle every {}s", secs);
    let period = Duration::from_secs(secs);
    loop {
        cycle.run(&mut sensor, &mut fans, &mut sink);
        thread::sleep(period);
    }
}

fn default_config_path() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("locating executable")?;
    let dir = exe
        .parent()
        .context("executable has no parent directory")?;
    Ok(dir.join(DEFAULT_CONFIG_FILE))
}

/// `RUST_LOG` wins over the configured level.
fn init_logging(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .with_context(|| format!("invalid log level {default_level:?}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing logger: {e}"))
}
