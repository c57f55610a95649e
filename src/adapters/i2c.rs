//! Linux i2c-dev adapter for the accessory controller.
//!
//! Opens `/dev/i2c-{bus}` through `linux-embedded-hal` and wraps it in a
//! paced [`RegisterChannel`].  The drivers above only see the
//! `embedded-hal` traits.

use linux_embedded_hal::{Delay, I2cdev};
use log::debug;

use crate::config::AccessoryConfig;
use crate::drivers::actuator::ActuatorDriver;
use crate::drivers::register_channel::RegisterChannel;
use crate::error::{Error, Result};

/// Device node for an I2C bus number.
pub fn bus_path(bus: u8) -> String {
    format!("/dev/i2c-{bus}")
}

/// Open the accessory controller described by `config`.
pub fn open_accessory(config: &AccessoryConfig) -> Result<ActuatorDriver<I2cdev, Delay>> {
    let path = bus_path(config.bus);
    let i2c = I2cdev::new(&path).map_err(|e| {
        debug!("accessory: open {path}: {e:?}");
        Error::AccessoryUnavailable {
            bus: config.bus,
            reason: e.to_string(),
        }
    })?;
    debug!(
        "accessory: {path} addr=0x{:02X} pacing={}ms",
        config.address, config.pacing_ms
    );
    let channel = RegisterChannel::with_pacing(i2c, Delay, config.address, config.pacing_ms);
    Ok(ActuatorDriver::new(channel))
}
