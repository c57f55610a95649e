//! Fan and RGB strip driver for the CubeNano accessory controller.
//!
//! Pure command encoding on top of [`RegisterChannel`]: every operation
//! clamps its inputs, writes a fixed register sequence, and holds no
//! state of its own.
//!
//! ## Failure contract
//!
//! Individual write failures are logged at `debug` and swallowed; the
//! operation reports `false`.  A composite that fails half-way leaves the
//! controller in whatever partial state resulted (e.g. effect set but
//! speed not) and that is accepted.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::debug;

use super::register_channel::RegisterChannel;
use crate::registers::{
    ALL_LEDS, Effect, LightColour, REG_COLOR, REG_EFFECT, REG_FAN, REG_LED_BLUE, REG_LED_GREEN,
    REG_LED_INDEX, REG_LED_RED, REG_SPEED, Speed,
};

pub struct ActuatorDriver<I2C, D> {
    channel: RegisterChannel<I2C, D>,
}

impl<I2C, D> ActuatorDriver<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    pub fn new(channel: RegisterChannel<I2C, D>) -> Self {
        Self { channel }
    }

    // ── Fan ───────────────────────────────────────────────────

    pub fn set_fan(&mut self, on: bool) -> bool {
        self.write(REG_FAN, u8::from(on))
    }

    pub fn fan_on(&mut self) -> bool {
        self.set_fan(true)
    }

    pub fn fan_off(&mut self) -> bool {
        self.set_fan(false)
    }

    // ── Effect primitives ─────────────────────────────────────

    /// Select an effect by raw code, clamped to 0–6.
    pub fn set_effect(&mut self, effect: i32) -> bool {
        let code = effect.clamp(Effect::MIN, Effect::MAX) as u8;
        self.write(REG_EFFECT, code)
    }

    /// Set the animation speed by raw code, clamped to 1–3.
    pub fn set_speed(&mut self, speed: i32) -> bool {
        let code = speed.clamp(Speed::MIN, Speed::MAX) as u8;
        self.write(REG_SPEED, code)
    }

    /// Set the effect colour by raw code, clamped to 0–6.
    pub fn set_color(&mut self, color: i32) -> bool {
        let code = color.clamp(LightColour::MIN, LightColour::MAX) as u8;
        self.write(REG_COLOR, code)
    }

    pub fn lights_off(&mut self) -> bool {
        self.set_effect(i32::from(Effect::Off.code()))
    }

    // ── Composites ────────────────────────────────────────────

    /// Effect, then speed, then (when the effect uses one) colour.
    ///
    /// `Effect::Off` writes only the effect register.
    pub fn apply_effect(
        &mut self,
        effect: Effect,
        colour: Option<LightColour>,
        speed: Speed,
    ) -> bool {
        let mut ok = self.set_effect(i32::from(effect.code()));
        if effect == Effect::Off {
            return ok;
        }
        ok &= self.set_speed(i32::from(speed.code()));
        if let Some(colour) = colour.filter(|_| effect.takes_colour()) {
            ok &= self.set_color(i32::from(colour.code()));
        }
        ok
    }

    pub fn breathing(&mut self, colour: Option<LightColour>, speed: Speed) -> bool {
        self.apply_effect(Effect::Breathing, colour, speed)
    }

    pub fn rainbow(&mut self, speed: Speed) -> bool {
        self.apply_effect(Effect::Rainbow, None, speed)
    }

    pub fn marquee(&mut self, colour: Option<LightColour>, speed: Speed) -> bool {
        self.apply_effect(Effect::Marquee, colour, speed)
    }

    // ── Direct LED colour ─────────────────────────────────────

    /// Paint one LED (or all, with index 255) a raw RGB colour.
    ///
    /// The running effect is switched off first so the raw colour is
    /// visible; values are truncated to 8 bits.
    pub fn set_led(&mut self, index: i32, red: i32, green: i32, blue: i32) -> bool {
        let mut ok = self.write(REG_EFFECT, Effect::Off.code());
        ok &= self.write(REG_LED_INDEX, low_byte(index));
        ok &= self.write(REG_LED_RED, low_byte(red));
        ok &= self.write(REG_LED_GREEN, low_byte(green));
        ok &= self.write(REG_LED_BLUE, low_byte(blue));
        ok
    }

    pub fn set_all_leds(&mut self, red: i32, green: i32, blue: i32) -> bool {
        self.set_led(i32::from(ALL_LEDS), red, green, blue)
    }

    // ── Identification ────────────────────────────────────────

    pub fn read_version(&mut self) -> Option<u8> {
        match self.channel.read_version() {
            Ok(v) => Some(v),
            Err(e) => {
                debug!("accessory: version probe failed: {e}");
                None
            }
        }
    }

    pub fn into_channel(self) -> RegisterChannel<I2C, D> {
        self.channel
    }

    fn write(&mut self, register: u8, value: u8) -> bool {
        match self.channel.write(register, value) {
            Ok(()) => true,
            Err(e) => {
                debug!("accessory: I2C write error: {e}");
                false
            }
        }
    }
}

fn low_byte(value: i32) -> u8 {
    (value & 0xFF) as u8
}
