//! Port traits: the boundary between the session core and the host.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ DiscoverySession / MetricSampler / RefreshLoop
//! ```
//!
//! The Linux adapters in [`crate::adapters`] implement these traits; the
//! integration tests implement them with scripted mocks, so the whole
//! reconnection and refresh logic runs without an I2C bus or `/proc`.

use std::time::Duration;

use chrono::NaiveTime;

use super::events::SessionEvent;
use crate::display::FrameBuffer;
use crate::error::{DisplayError, ProbeError};
use crate::sensors::cpu::CpuTicks;

// ───────────────────────────────────────────────────────────────
// Display ports (driven adapter: domain → OLED)
// ───────────────────────────────────────────────────────────────

/// A bound, initialised display controller.
pub trait DisplayPort {
    /// Copy `frame` into the controller's RAM and show it.
    fn push(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError>;
}

/// Factory that binds a display controller on a given bus.
pub trait DisplayConnector {
    type Display: DisplayPort;

    /// Open `bus`, initialise the controller, clear it and flush one
    /// blank frame.  Any failure along the way is reported as an error
    /// and leaves nothing bound.
    fn connect(&mut self, bus: u8) -> Result<Self::Display, DisplayError>;
}

// ───────────────────────────────────────────────────────────────
// Telemetry port (driven adapter: host → domain)
// ───────────────────────────────────────────────────────────────

/// Memory totals in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryStats {
    pub total_bytes: u64,
    pub available_bytes: u64,
}

/// Root filesystem totals in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilesystemStats {
    pub total_bytes: u64,
    pub available_bytes: u64,
}

/// Raw host figures behind the display labels.
pub trait TelemetrySource {
    /// Aggregate CPU tick counters.
    fn cpu_ticks(&mut self) -> Result<CpuTicks, ProbeError>;

    fn memory(&mut self) -> Result<MemoryStats, ProbeError>;

    fn root_filesystem(&mut self) -> Result<FilesystemStats, ProbeError>;

    /// IPv4 address currently assigned to `interface`, `None` if the
    /// interface exists but has no address.
    fn interface_ipv4(&mut self, interface: &str) -> Result<Option<String>, ProbeError>;

    /// Local wall-clock time.
    fn local_time(&mut self) -> Result<NaiveTime, ProbeError>;
}

// ───────────────────────────────────────────────────────────────
// Sleeper (tick pacing and reconnect backoff)
// ───────────────────────────────────────────────────────────────

pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The session core emits structured [`SessionEvent`]s through this port.
pub trait EventSink {
    fn emit(&mut self, event: &SessionEvent);
}
