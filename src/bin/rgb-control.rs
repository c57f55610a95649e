//! rgb-control: select an effect on the CubeNano RGB strip.

#![deny(unused_must_use)]

use anyhow::Result;
use clap::{CommandFactory, Parser};
use log::warn;

use cubenano::adapters::i2c::open_accessory;
use cubenano::app::commands::{LightCommand, REMEDIATION_HINTS, is_help_word};
use cubenano::config::AccessoryConfig;
use cubenano::registers::DEFAULT_ACCESSORY_BUS;

const DETAILS: &str = "Effects:
  off         Turn off all lights
  breathing   Slow fade in/out
  marquee     Running lights
  rainbow     Color cycling (no color option)
  dazzle      Fast color changes
  waterfall   Flowing effect
  cycle       Breathing with color cycle

Colors: red, green, blue, yellow, purple, cyan, white
Speeds: slow, medium, fast (default: medium)

Examples:
  rgb-control rainbow           Rainbow effect at medium speed
  rgb-control breathing blue    Blue breathing effect
  rgb-control marquee red fast  Fast red marquee
  rgb-control off               Turn off lights";

#[derive(Debug, Parser)]
#[command(
    name = "rgb-control",
    version,
    about = "Set the CubeNano RGB light effect",
    after_help = DETAILS
)]
struct Cli {
    /// Effect name
    effect: Option<String>,

    /// Optional colour and speed, in any order
    options: Vec<String>,

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

    let Some(effect) = cli.effect.as_deref().filter(|w| !is_help_word(w)) else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let command = match LightCommand::parse(effect, cli.options.iter().map(String::as_str)) {
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
        warn!("rgb: controller did not acknowledge every write");
    }
    println!("{}", command.describe());
    Ok(())
}
