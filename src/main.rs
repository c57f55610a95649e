//! cubenano-oled: OLED status daemon.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  OledConnector     HostTelemetry     ThreadSleeper           │
//! │  (DisplayConnector)(TelemetrySource) (Sleeper)               │
//! │  LogEventSink      ctrlc handler → ShutdownSignal            │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ─────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │  RefreshLoop                                           │  │
//! │  │  DiscoverySession · MetricSampler · PhaseCounter       │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

#![deny(unused_must_use)]

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::info;

use cubenano::adapters::host::HostTelemetry;
use cubenano::adapters::log_sink::LogEventSink;
use cubenano::adapters::oled::OledConnector;
use cubenano::adapters::time::ThreadSleeper;
use cubenano::app::refresh::{RefreshLoop, RefreshSettings};
use cubenano::config::{BusSelection, DaemonConfig};
use cubenano::sensors::MetricSampler;
use cubenano::session::DiscoverySession;
use cubenano::shutdown::ShutdownSignal;

#[derive(Debug, Parser)]
#[command(name = "cubenano-oled", version, about = "System stats on the CubeNano OLED")]
struct Cli {
    /// Display bus: `auto` to scan, or a bus number
    #[arg(long)]
    bus: Option<BusSelection>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip the welcome message
    #[arg(long)]
    no_welcome: bool,

    /// Verbose logging
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if cli.debug { "debug" } else { "warn" }),
    )
    .init();

    let config = load_config(&cli)?;
    info!("cubenano-oled starting: bus={:?}", config.display_bus);

    let shutdown = ShutdownSignal::new();
    let handler_signal = shutdown.clone();
    ctrlc::set_handler(move || handler_signal.request())
        .context("installing SIGINT/SIGTERM handler")?;

    let address = config.bus_address()?;
    let session = DiscoverySession::new(OledConnector::new(), address);
    let sampler = MetricSampler::new(HostTelemetry::new(), config.interfaces.clone());

    let mut refresh = RefreshLoop::new(
        session,
        sampler,
        ThreadSleeper::new(),
        LogEventSink::new(),
        shutdown,
        RefreshSettings::from_config(&config),
    );

    match refresh.run() {
        Ok(()) => {
            println!("\nOLED display stopped");
            Ok(())
        }
        Err(e) => {
            println!("Could not connect to OLED");
            Err(anyhow!(e))
        }
    }
}

/// File (if any) first, then command line overrides.
fn load_config(cli: &Cli) -> Result<DaemonConfig> {
    let mut config = match &cli.config {
        Some(path) => DaemonConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => DaemonConfig::default(),
    };
    if let Some(bus) = cli.bus {
        config.display_bus = bus;
    }
    if cli.no_welcome {
        config.welcome_message = None;
    }
    config.validate()?;
    Ok(config)
}
