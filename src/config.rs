//! Runtime configuration for the display daemon and the accessory CLIs.
//!
//! All fields have defaults matching the stock Jetson Orin Nano setup.
//! The daemon can load overrides from a JSON file; command line flags are
//! applied on top.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::registers::{ACCESSORY_ADDRESS, DEFAULT_ACCESSORY_BUS};
use crate::session::bus::{BusAddress, BusList};

/// Display buses in the order they are probed on Jetson carrier boards.
pub const DEFAULT_BUS_CANDIDATES: [u8; 5] = [7, 1, 0, 8, 4];

/// Interfaces checked, in order, for the IP row.
pub const DEFAULT_INTERFACES: [&str; 4] = ["eno1", "eth0", "wlP1p1s0", "wlan0"];

pub const DEFAULT_WELCOME_MESSAGE: &str = "Jetson Orin Ready!";

// ---------------------------------------------------------------------------
// Bus selection
// ---------------------------------------------------------------------------

/// How the daemon picks the display bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BusSelection {
    /// Scan the candidate list, advancing on each failure.
    #[default]
    Auto,
    /// Use exactly this bus; never scan.
    Fixed(u8),
}

impl FromStr for BusSelection {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }
        s.parse::<u8>()
            .map(Self::Fixed)
            .map_err(|_| ConfigError::InvalidBus(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Daemon configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    // --- Discovery ---
    pub display_bus: BusSelection,
    /// Probe order used when `display_bus` is `auto`.
    pub bus_candidates: BusList,
    /// Consecutive failures tolerated on a fixed bus before giving up.
    pub fixed_bus_attempts: u32,
    /// Wait between discovery attempts (milliseconds).
    pub reconnect_backoff_ms: u64,

    // --- Refresh ---
    /// Refresh tick period (milliseconds).
    pub tick_interval_ms: u64,
    /// Interfaces probed for the IP row, highest priority first.
    pub interfaces: Vec<String>,

    // --- Welcome screen ---
    /// Message shown after each connection; `None` disables it.
    pub welcome_message: Option<String>,
    pub welcome_duration_ms: u64,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        let mut bus_candidates = BusList::new();
        for bus in DEFAULT_BUS_CANDIDATES {
            // Capacity is larger than the default list.
            let _ = bus_candidates.push(bus);
        }
        Self {
            display_bus: BusSelection::Auto,
            bus_candidates,
            fixed_bus_attempts: 3,
            reconnect_backoff_ms: 2000,

            tick_interval_ms: 200,
            interfaces: DEFAULT_INTERFACES.iter().map(ToString::to_string).collect(),

            welcome_message: Some(DEFAULT_WELCOME_MESSAGE.to_string()),
            welcome_duration_ms: 3000,
        }
    }
}

impl DaemonConfig {
    /// Load from a JSON file; missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Unreadable(format!("{}: {e}", path.display())))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("tick_interval_ms must be > 0"));
        }
        if self.bus_candidates.is_empty() {
            return Err(ConfigError::ValidationFailed("bus_candidates must not be empty"));
        }
        if self.fixed_bus_attempts == 0 {
            return Err(ConfigError::ValidationFailed("fixed_bus_attempts must be >= 1"));
        }
        Ok(())
    }

    /// Addressing mode for the discovery session.
    pub fn bus_address(&self) -> Result<BusAddress, ConfigError> {
        match self.display_bus {
            BusSelection::Fixed(bus) => Ok(BusAddress::fixed(bus)),
            BusSelection::Auto => BusAddress::auto(&self.bus_candidates)
                .ok_or(ConfigError::ValidationFailed("bus_candidates must not be empty")),
        }
    }
}

// ---------------------------------------------------------------------------
// Accessory controller configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessoryConfig {
    pub bus: u8,
    pub address: u8,
    /// Gap after each register write (milliseconds).
    pub pacing_ms: u32,
}

impl Default for AccessoryConfig {
    fn default() -> Self {
        Self {
            bus: DEFAULT_ACCESSORY_BUS,
            address: ACCESSORY_ADDRESS,
            pacing_ms: crate::drivers::register_channel::DEFAULT_PACING_MS,
        }
    }
}
