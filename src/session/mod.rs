//! Display discovery and hot-plug state machine.
//!
//! ```text
//!                 attempt fails (Auto: cursor += 1)
//!                ┌──────────────┐
//!                ▼              │
//!        ┌──────────────┐  attempt ok   ┌──────────────────────┐
//!        │ Disconnected │──────────────▶│ Connected {bus, disp}│
//!        └──────────────┘               └──────────┬───────────┘
//!                ▲         push I/O error          │
//!                └─────────────────────────────────┘
//! ```
//!
//! The session owns the only handle onto the display.  A failed push
//! drops that handle immediately, so nothing can write to a controller
//! that has gone away.  There is no user-triggered disconnect.

pub mod bus;

use std::time::Duration;

use log::debug;

use crate::app::events::SessionEvent;
use crate::app::ports::{DisplayConnector, DisplayPort, EventSink, Sleeper};
use crate::display::FrameBuffer;
use crate::error::{DiscoveryFailure, DisplayError};
use crate::shutdown::ShutdownSignal;
use bus::BusAddress;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Connection state.  The display handle only exists while connected.
#[derive(Debug)]
pub enum ConnectionState<D> {
    Disconnected,
    Connected { bus: u8, display: D },
}

/// How `connect_with_retry` paces and bounds its attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Wait after each failed attempt.
    pub backoff: Duration,
    /// Consecutive failures tolerated on a fixed bus.
    pub fixed_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            backoff: Duration::from_secs(2),
            fixed_attempts: 3,
        }
    }
}

/// Result of a retrying discovery run that did not fail terminally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discovery {
    Connected(u8),
    Cancelled,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

pub struct DiscoverySession<C: DisplayConnector> {
    connector: C,
    address: BusAddress,
    state: ConnectionState<C::Display>,
}

impl<C: DisplayConnector> DiscoverySession<C> {
    pub fn new(connector: C, address: BusAddress) -> Self {
        Self {
            connector,
            address,
            state: ConnectionState::Disconnected,
        }
    }

    pub fn address(&self) -> &BusAddress {
        &self.address
    }

    pub fn state(&self) -> &ConnectionState<C::Display> {
        &self.state
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.state, ConnectionState::Connected { .. })
    }

    /// Bus of the bound controller, if any.
    pub fn connected_bus(&self) -> Option<u8> {
        match &self.state {
            ConnectionState::Connected { bus, .. } => Some(*bus),
            ConnectionState::Disconnected => None,
        }
    }

    /// Single bind attempt on the current bus.
    ///
    /// On failure in `Auto` mode the cursor moves to the next candidate
    /// before returning.  Already connected is a successful no-op.
    pub fn attempt(&mut self) -> Result<u8, DisplayError> {
        if let Some(bus) = self.connected_bus() {
            return Ok(bus);
        }
        let bus = self.address.current();
        match self.connector.connect(bus) {
            Ok(display) => {
                self.state = ConnectionState::Connected { bus, display };
                Ok(bus)
            }
            Err(e) => {
                self.address.advance();
                Err(e)
            }
        }
    }

    /// Initial discovery: attempt until connected, cancelled, or (fixed
    /// bus only) `policy.fixed_attempts` consecutive failures.  Sleeps
    /// `policy.backoff` after every failure.
    pub fn connect_with_retry<S, E>(
        &mut self,
        policy: &RetryPolicy,
        sleeper: &mut S,
        shutdown: &ShutdownSignal,
        sink: &mut E,
    ) -> Result<Discovery, DiscoveryFailure>
    where
        S: Sleeper,
        E: EventSink,
    {
        let limit = self.address.is_fixed().then_some(policy.fixed_attempts);
        self.retry(policy.backoff, limit, sleeper, shutdown, sink)
    }

    /// Re-discovery after a lost connection: attempt until connected or
    /// cancelled, with no attempt limit in either mode.
    pub fn reconnect_with_retry<S, E>(
        &mut self,
        policy: &RetryPolicy,
        sleeper: &mut S,
        shutdown: &ShutdownSignal,
        sink: &mut E,
    ) -> Discovery
    where
        S: Sleeper,
        E: EventSink,
    {
        match self.retry(policy.backoff, None, sleeper, shutdown, sink) {
            Ok(discovery) => discovery,
            // Unreachable without a limit.
            Err(_) => Discovery::Cancelled,
        }
    }

    fn retry<S, E>(
        &mut self,
        backoff: Duration,
        limit: Option<u32>,
        sleeper: &mut S,
        shutdown: &ShutdownSignal,
        sink: &mut E,
    ) -> Result<Discovery, DiscoveryFailure>
    where
        S: Sleeper,
        E: EventSink,
    {
        let mut failures: u32 = 0;
        loop {
            if shutdown.is_requested() {
                return Ok(Discovery::Cancelled);
            }

            let bus = self.address.current();
            match self.attempt() {
                Ok(bus) => {
                    sink.emit(&SessionEvent::Connected { bus });
                    return Ok(Discovery::Connected(bus));
                }
                Err(error) => {
                    debug!("display: not found on bus {bus}: {error}");
                    sink.emit(&SessionEvent::AttemptFailed { bus, error });

                    failures = failures.saturating_add(1);
                    if limit.is_some_and(|max| failures >= max) {
                        let failure = DiscoveryFailure::FixedBusUnavailable {
                            bus,
                            attempts: failures,
                        };
                        sink.emit(&SessionEvent::DiscoveryAbandoned(failure));
                        return Err(failure);
                    }
                }
            }

            if shutdown.is_requested() {
                return Ok(Discovery::Cancelled);
            }
            sleeper.sleep(backoff);
        }
    }

    /// Push a frame to the bound display.
    ///
    /// An I/O failure demotes the session to `Disconnected`.  Pushing
    /// while disconnected fails with [`DisplayError::PushFailed`].
    pub fn push(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError> {
        let ConnectionState::Connected { display, .. } = &mut self.state else {
            return Err(DisplayError::PushFailed);
        };
        let result = display.push(frame);
        if result.is_err() {
            self.demote();
        }
        result
    }

    /// Drop the display handle and return to `Disconnected`.
    pub fn demote(&mut self) {
        if let ConnectionState::Connected { bus, .. } = self.state {
            debug!("display: connection on bus {bus} dropped");
        }
        self.state = ConnectionState::Disconnected;
    }

    pub fn display_mut(&mut self) -> Option<&mut C::Display> {
        match &mut self.state {
            ConnectionState::Connected { display, .. } => Some(display),
            ConnectionState::Disconnected => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
