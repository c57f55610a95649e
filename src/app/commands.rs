//! Accessory commands issued by the `fan-control` and `rgb-control` tools.
//!
//! Parsing is separate from execution so that an unknown word is
//! rejected before the bus is ever opened.

use core::fmt;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::drivers::actuator::ActuatorDriver;
use crate::registers::{Effect, LightColour, Speed};

/// Words that ask for usage instead of an action.
pub const HELP_WORDS: [&str; 3] = ["-h", "--help", "help"];

pub fn is_help_word(word: &str) -> bool {
    HELP_WORDS.contains(&word)
}

/// Printed after any failure to reach the accessory controller.
pub const REMEDIATION_HINTS: [&str; 2] = [
    "Make sure I2C is enabled and you have permission.",
    "Try: sudo usermod -aG i2c $USER",
];

// ───────────────────────────────────────────────────────────────
// Errors
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    UnknownFanCommand(String),
    UnknownEffect(String),
}

impl CommandError {
    /// Follow-up line telling the user what is accepted.
    pub fn hint(&self) -> String {
        match self {
            Self::UnknownFanCommand(_) => "Use 'on' or 'off'".to_string(),
            Self::UnknownEffect(_) => {
                let names: Vec<&str> = Effect::ALL.iter().map(|e| e.name()).collect();
                format!("Available effects: {}", names.join(", "))
            }
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFanCommand(word) => write!(f, "Unknown command: {word}"),
            Self::UnknownEffect(word) => write!(f, "Unknown effect: {word}"),
        }
    }
}

impl std::error::Error for CommandError {}

// ───────────────────────────────────────────────────────────────
// Fan
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanCommand {
    On,
    Off,
}

impl FanCommand {
    /// Case-insensitive `on` / `off`.
    pub fn parse(word: &str) -> Result<Self, CommandError> {
        let word = word.to_ascii_lowercase();
        match word.as_str() {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            _ => Err(CommandError::UnknownFanCommand(word)),
        }
    }

    pub fn apply<I2C: I2c, D: DelayNs>(self, driver: &mut ActuatorDriver<I2C, D>) -> bool {
        match self {
            Self::On => driver.fan_on(),
            Self::Off => driver.fan_off(),
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Self::On => "Fan: ON",
            Self::Off => "Fan: OFF",
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Lights
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightCommand {
    pub effect: Effect,
    pub colour: Option<LightColour>,
    pub speed: Speed,
}

impl LightCommand {
    /// `effect` must name an effect; each extra word that names a colour
    /// or a speed overrides the previous one, anything else is ignored.
    pub fn parse<'a, I>(effect: &str, extras: I) -> Result<Self, CommandError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let effect = Effect::from_name(effect)
            .ok_or_else(|| CommandError::UnknownEffect(effect.to_ascii_lowercase()))?;

        let mut colour = None;
        let mut speed = Speed::default();
        for word in extras {
            if let Some(c) = LightColour::from_name(word) {
                colour = Some(c);
            } else if let Some(s) = Speed::from_name(word) {
                speed = s;
            }
        }

        Ok(Self {
            effect,
            colour,
            speed,
        })
    }

    pub fn apply<I2C: I2c, D: DelayNs>(&self, driver: &mut ActuatorDriver<I2C, D>) -> bool {
        driver.apply_effect(self.effect, self.colour, self.speed)
    }

    /// `RGB: <effect>[ (<colour>)][ @ <speed> speed]`; no speed for `off`.
    pub fn describe(&self) -> String {
        let mut out = format!("RGB: {}", self.effect);
        if let Some(colour) = self.colour {
            out.push_str(&format!(" ({colour})"));
        }
        if self.effect != Effect::Off {
            out.push_str(&format!(" @ {} speed", self.speed));
        }
        out
    }
}
