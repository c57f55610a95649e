//! Paced single-register transactions on the accessory controller.
//!
//! The controller's firmware needs a minimum gap between commands, so
//! every successful write is followed by a fixed pacing delay.  Transport
//! failures are translated into [`RegisterError`] and handed back; this
//! layer never retries.
//!
//! ## Dual-target design
//!
//! Generic over the `embedded-hal` 1.0 [`I2c`] and [`DelayNs`] traits.
//! On Linux the binaries plug in `linux_embedded_hal::{I2cdev, Delay}`;
//! tests plug in recording mocks.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{Error as _, I2c};

use crate::error::RegisterError;
use crate::registers::VERSION_PROBE;

/// Default gap after each register write (milliseconds).
pub const DEFAULT_PACING_MS: u32 = 2;

pub struct RegisterChannel<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    pacing_ms: u32,
}

impl<I2C, D> RegisterChannel<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    pub fn new(i2c: I2C, delay: D, address: u8) -> Self {
        Self::with_pacing(i2c, delay, address, DEFAULT_PACING_MS)
    }

    pub fn with_pacing(i2c: I2C, delay: D, address: u8, pacing_ms: u32) -> Self {
        Self {
            i2c,
            delay,
            address,
            pacing_ms,
        }
    }

    /// Write one byte to `register`, then wait out the pacing interval.
    pub fn write(&mut self, register: u8, value: u8) -> Result<(), RegisterError> {
        self.i2c
            .write(self.address, &[register, value])
            .map_err(|e| RegisterError {
                register,
                cause: e.kind(),
            })?;
        self.delay.delay_ms(self.pacing_ms);
        Ok(())
    }

    /// Firmware version probe: write the probe byte, read one byte back.
    pub fn read_version(&mut self) -> Result<u8, RegisterError> {
        let fail = |e: I2C::Error| RegisterError {
            register: VERSION_PROBE,
            cause: e.kind(),
        };
        self.i2c.write(self.address, &[VERSION_PROBE]).map_err(fail)?;
        let mut buf = [0u8; 1];
        self.i2c.read(self.address, &mut buf).map_err(fail)?;
        Ok(buf[0])
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give back the bus and delay (tests inspect the recorded traffic).
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }
}
