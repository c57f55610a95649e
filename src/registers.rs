//! Register map and value vocabulary of the CubeNano accessory controller.
//!
//! Single source of truth: every driver and CLI references this module
//! rather than hard-coding register addresses or effect codes.
//!
//! | Register    | Addr | Values                                   |
//! |-------------|------|------------------------------------------|
//! | `LED_INDEX` | 0x00 | 0–13, 255 = all LEDs                     |
//! | `LED_RED`   | 0x01 | 0–255                                    |
//! | `LED_GREEN` | 0x02 | 0–255                                    |
//! | `LED_BLUE`  | 0x03 | 0–255                                    |
//! | `EFFECT`    | 0x04 | [`Effect`] code 0–6                      |
//! | `SPEED`     | 0x05 | [`Speed`] code 1–3                       |
//! | `COLOR`     | 0x06 | [`LightColour`] code 0–6                 |
//! | `FAN`       | 0x08 | 0 = off, 1 = on                          |

use core::fmt;

// ---------------------------------------------------------------------------
// Bus addressing
// ---------------------------------------------------------------------------

/// 7-bit I2C address of the accessory controller.
pub const ACCESSORY_ADDRESS: u8 = 0x0E;
/// Bus the accessory controller sits on for Orin Nano carrier boards.
pub const DEFAULT_ACCESSORY_BUS: u8 = 7;

// ---------------------------------------------------------------------------
// Register addresses
// ---------------------------------------------------------------------------

pub const REG_LED_INDEX: u8 = 0x00;
pub const REG_LED_RED: u8 = 0x01;
pub const REG_LED_GREEN: u8 = 0x02;
pub const REG_LED_BLUE: u8 = 0x03;
pub const REG_EFFECT: u8 = 0x04;
pub const REG_SPEED: u8 = 0x05;
pub const REG_COLOR: u8 = 0x06;
pub const REG_FAN: u8 = 0x08;

/// Byte written before reading back the firmware version.
pub const VERSION_PROBE: u8 = 0x00;

/// LED index that addresses the whole 14-LED strip at once.
pub const ALL_LEDS: u8 = 0xFF;

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

/// Built-in RGB animation modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Effect {
    Off = 0,
    Breathing = 1,
    Marquee = 2,
    Rainbow = 3,
    Dazzle = 4,
    Waterfall = 5,
    Cycle = 6,
}

impl Effect {
    pub const MIN: i32 = 0;
    pub const MAX: i32 = 6;

    pub const ALL: [Effect; 7] = [
        Self::Off,
        Self::Breathing,
        Self::Marquee,
        Self::Rainbow,
        Self::Dazzle,
        Self::Waterfall,
        Self::Cycle,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Breathing => "breathing",
            Self::Marquee => "marquee",
            Self::Rainbow => "rainbow",
            Self::Dazzle => "dazzle",
            Self::Waterfall => "waterfall",
            Self::Cycle => "cycle",
        }
    }

    /// Case-insensitive lookup by CLI name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(name))
    }

    /// Whether the controller honours a discrete colour for this effect.
    /// Rainbow and cycle generate their own colours.
    pub fn takes_colour(self) -> bool {
        !matches!(self, Self::Off | Self::Rainbow | Self::Cycle)
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Colour
// ---------------------------------------------------------------------------

/// Discrete colours understood by the `COLOR` register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LightColour {
    Red = 0,
    Green = 1,
    Blue = 2,
    Yellow = 3,
    Purple = 4,
    Cyan = 5,
    White = 6,
}

impl LightColour {
    pub const MIN: i32 = 0;
    pub const MAX: i32 = 6;

    pub const ALL: [LightColour; 7] = [
        Self::Red,
        Self::Green,
        Self::Blue,
        Self::Yellow,
        Self::Purple,
        Self::Cyan,
        Self::White,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Yellow => "yellow",
            Self::Purple => "purple",
            Self::Cyan => "cyan",
            Self::White => "white",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for LightColour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Speed
// ---------------------------------------------------------------------------

/// Effect animation speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Speed {
    Slow = 1,
    #[default]
    Medium = 2,
    Fast = 3,
}

impl Speed {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 3;

    pub const ALL: [Speed; 3] = [Self::Slow, Self::Medium, Self::Fast];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Medium => "medium",
            Self::Fast => "fast",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
