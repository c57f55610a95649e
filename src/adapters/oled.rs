//! SSD1306 128×32 OLED adapter.
//!
//! Implements [`DisplayConnector`] and [`DisplayPort`] on top of the
//! `ssd1306` crate in buffered graphics mode over a Linux i2c-dev bus.
//! Controller errors carry no detail worth keeping past the log line, so
//! they are logged at `debug` and mapped onto [`DisplayError`].

use display_interface::DisplayError as InterfaceError;
use linux_embedded_hal::I2cdev;
use log::debug;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};

use super::i2c::bus_path;
use crate::app::ports::{DisplayConnector, DisplayPort};
use crate::display::FrameBuffer;
use crate::error::DisplayError;

/// 7-bit address of the SSD1306 on the CubeNano.
pub const OLED_ADDRESS: u8 = 0x3C;

type Driver = Ssd1306<I2CInterface<I2cdev>, DisplaySize128x32, BufferedGraphicsMode<DisplaySize128x32>>;

/// Binds the OLED on a given bus.
#[derive(Debug, Default)]
pub struct OledConnector;

impl OledConnector {
    pub fn new() -> Self {
        Self
    }
}

impl DisplayConnector for OledConnector {
    type Display = OledDisplay;

    fn connect(&mut self, bus: u8) -> Result<OledDisplay, DisplayError> {
        let path = bus_path(bus);
        let i2c = I2cdev::new(&path).map_err(|e| {
            debug!("oled: open {path}: {e}");
            DisplayError::BusUnavailable { bus }
        })?;

        let interface = I2CDisplayInterface::new_custom_address(i2c, OLED_ADDRESS);
        let mut driver = Ssd1306::new(interface, DisplaySize128x32, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();

        let init_failed = |stage: &str, e: InterfaceError| {
            debug!("oled: {stage} on bus {bus}: {e:?}");
            DisplayError::InitFailed { bus }
        };
        driver.init().map_err(|e| init_failed("init", e))?;
        driver.clear_buffer();
        driver.flush().map_err(|e| init_failed("first flush", e))?;

        Ok(OledDisplay { driver, bus })
    }
}

/// A bound OLED; dropped by the session on the first push failure.
pub struct OledDisplay {
    driver: Driver,
    bus: u8,
}

impl DisplayPort for OledDisplay {
    fn push(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError> {
        self.driver.clear_buffer();
        for (x, y) in frame.lit() {
            self.driver.set_pixel(x, y, true);
        }
        self.driver.flush().map_err(|e| {
            debug!("oled: flush on bus {}: {e:?}", self.bus);
            DisplayError::PushFailed
        })
    }
}
