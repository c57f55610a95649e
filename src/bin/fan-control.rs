//! fan-control: switch the CubeNano cooling fan.

#![deny(unused_must_use)]

use anyhow::Result;
use clap::{CommandFactory, Parser};
use log::warn;

use cubenano::adapters::i2c::open_accessory;
use cubenano::app::commands::{FanCommand, REMEDIATION_HINTS, is_help_word};
use cubenano::config::AccessoryConfig;
use cubenano::registers::DEFAULT_ACCESSORY_BUS;

const EXAMPLES: &str = "Examples:
  fan-control on    Start the fan
  fan-control off   Stop the fan";

#[derive(Debug, Parser)]
#[command(
    name = "fan-control",
    version,
    about = "Turn the CubeNano cooling fan on or off",
    after_help = EXAMPLES
)]
struct Cli {
    /// `on` or `off`
    command: Option<String>,

    /// I2C bus of the accessory controller
    #[arg(long, default_value_t = DEFAULT_ACCESSORY_BUS)]
    bus: u8,

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

    let Some(word) = cli.command.as_deref().filter(|w| !is_help_word(w)) else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let command = match FanCommand::parse(word) {
        Ok(c) => c,
        Err(e) => {
            println!("{e}");
            println!("{}", e.hint());
            return Ok(());
        }
    };

    let config = AccessoryConfig {
        bus: cli.bus,
        ..AccessoryConfig::default()
    };
    let mut driver = match open_accessory(&config) {
        Ok(d) => d,
        Err(e) => {
            println!("Error: {e}");
            for hint in REMEDIATION_HINTS {
                println!("{hint}");
            }
            return Ok(());
        }
    };

    if !command.apply(&mut driver) {
        warn!("fan: controller did not acknowledge the write");
    }
    println!("{}", command.describe());
    Ok(())
}
