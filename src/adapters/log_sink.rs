//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing session events through the `log`
//! facade with a fixed `SESSION |` prefix, so they can be grepped out of
//! the daemon's output.
//!
//! Only events that need an operator (a lost panel, abandoned discovery)
//! reach `warn`; the per-attempt noise of a scan stays at `info`, below
//! the daemon's default filter.

use log::{Level, log};

use crate::app::events::SessionEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`SessionEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

/// Log level for `event`.
pub fn level(event: &SessionEvent) -> Level {
    match event {
        SessionEvent::ConnectionLost { .. } | SessionEvent::DiscoveryAbandoned(_) => Level::Warn,
        SessionEvent::Connected { .. }
        | SessionEvent::AttemptFailed { .. }
        | SessionEvent::Stopped => Level::Info,
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &SessionEvent) {
        let level = level(event);
        match event {
            SessionEvent::Connected { bus } => {
                log!(level, "SESSION | connected | bus={bus}");
            }
            SessionEvent::AttemptFailed { bus, error } => {
                log!(level, "SESSION | attempt failed | bus={bus} | {error}");
            }
            SessionEvent::ConnectionLost { bus } => {
                log!(level, "SESSION | connection lost | bus={bus}");
            }
            SessionEvent::DiscoveryAbandoned(failure) => {
                log!(level, "SESSION | discovery abandoned | {failure}");
            }
            SessionEvent::Stopped => {
                log!(level, "SESSION | stopped");
            }
        }
    }
}
