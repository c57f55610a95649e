//! Unified error types for the CubeNano tools.
//!
//! Every failure is contained at the boundary that touches the external
//! resource: register writes, telemetry probes, and display pushes each
//! have their own type.  Only [`DiscoveryFailure`] (wrapped in
//! [`FatalError`]) is allowed to end the display daemon.

use core::fmt;

use embedded_hal::i2c::ErrorKind;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible library operation funnels into this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A register write or read on the accessory controller failed.
    Register(RegisterError),
    /// A telemetry probe could not produce a value.
    Probe(ProbeError),
    /// The display controller could not be bound or refreshed.
    Display(DisplayError),
    /// Display discovery gave up.
    Discovery(DiscoveryFailure),
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
    /// The accessory controller's bus device node could not be opened.
    AccessoryUnavailable { bus: u8, reason: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Register(e) => write!(f, "register: {e}"),
            Self::Probe(e) => write!(f, "probe: {e}"),
            Self::Display(e) => write!(f, "display: {e}"),
            Self::Discovery(e) => write!(f, "discovery: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::AccessoryUnavailable { bus, reason } => {
                write!(f, "cannot open /dev/i2c-{bus}: {reason}")
            }
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Register transport errors
// ---------------------------------------------------------------------------

/// A single register transaction failed on the I2C transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterError {
    /// Register the transaction was addressed to.
    pub register: u8,
    /// Transport-level cause reported by the I2C driver.
    pub cause: ErrorKind,
}

impl fmt::Display for RegisterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "register 0x{:02X}: {}", self.register, self.cause)
    }
}

impl std::error::Error for RegisterError {}

impl From<RegisterError> for Error {
    fn from(e: RegisterError) -> Self {
        Self::Register(e)
    }
}

// ---------------------------------------------------------------------------
// Telemetry probe errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeError {
    /// The source (file, syscall, mount) is not available on this host.
    Unavailable(&'static str),
    /// The source answered but the content could not be parsed.
    Malformed(&'static str),
    /// An external command could not be spawned or exited non-zero.
    CommandFailed(&'static str),
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(what) => write!(f, "{what} unavailable"),
            Self::Malformed(what) => write!(f, "{what} malformed"),
            Self::CommandFailed(what) => write!(f, "{what} command failed"),
        }
    }
}

impl std::error::Error for ProbeError {}

impl From<ProbeError> for Error {
    fn from(e: ProbeError) -> Self {
        Self::Probe(e)
    }
}

// ---------------------------------------------------------------------------
// Display errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// The bus device node could not be opened.
    BusUnavailable { bus: u8 },
    /// The controller did not accept the init/clear sequence.
    InitFailed { bus: u8 },
    /// A frame push failed on an already bound controller.
    PushFailed,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BusUnavailable { bus } => write!(f, "I2C bus {bus} unavailable"),
            Self::InitFailed { bus } => write!(f, "controller init failed on bus {bus}"),
            Self::PushFailed => write!(f, "frame push failed"),
        }
    }
}

impl std::error::Error for DisplayError {}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Self::Display(e)
    }
}

// ---------------------------------------------------------------------------
// Discovery failure
// ---------------------------------------------------------------------------

/// Discovery will not succeed without operator action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryFailure {
    /// A fixed (non-scanning) bus failed every allowed attempt.
    FixedBusUnavailable { bus: u8, attempts: u32 },
}

impl fmt::Display for DiscoveryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FixedBusUnavailable { bus, attempts } => {
                write!(f, "no display on fixed bus {bus} after {attempts} attempts")
            }
        }
    }
}

impl std::error::Error for DiscoveryFailure {}

impl From<DiscoveryFailure> for Error {
    fn from(e: DiscoveryFailure) -> Self {
        Self::Discovery(e)
    }
}

// ---------------------------------------------------------------------------
// Fatal daemon errors
// ---------------------------------------------------------------------------

/// Conditions that stop the display daemon outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalError {
    Discovery(DiscoveryFailure),
}

impl fmt::Display for FatalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discovery(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for FatalError {}

impl From<DiscoveryFailure> for FatalError {
    fn from(e: DiscoveryFailure) -> Self {
        Self::Discovery(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The config file could not be read.
    Unreadable(String),
    /// The config file is not valid JSON for [`DaemonConfig`](crate::config::DaemonConfig).
    Parse(String),
    /// A field failed range validation.
    ValidationFailed(&'static str),
    /// A bus selector was neither `auto` nor a bus number.
    InvalidBus(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreadable(msg) => write!(f, "cannot read config: {msg}"),
            Self::Parse(msg) => write!(f, "cannot parse config: {msg}"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
            Self::InvalidBus(raw) => write!(f, "invalid bus '{raw}' (expected 'auto' or a number)"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
