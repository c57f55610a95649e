//! Outbound session events.
//!
//! The discovery session and the refresh loop emit these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them; the daemon logs them.

use crate::error::{DiscoveryFailure, DisplayError};

/// Lifecycle of the display session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The display controller answered and was initialised on `bus`.
    Connected { bus: u8 },

    /// A bind attempt on `bus` failed.
    AttemptFailed { bus: u8, error: DisplayError },

    /// A frame push failed on a bound controller; the handle was dropped.
    ConnectionLost { bus: u8 },

    /// Discovery gave up for good.
    DiscoveryAbandoned(DiscoveryFailure),

    /// The daemon was asked to stop and blanked the display.
    Stopped,
}
