//! Refresh loop: the display daemon's supervisor.
//!
//! [`RefreshLoop`] owns the discovery session and the metric sampler.  It
//! binds a display, optionally shows the welcome message, then paints the
//! status screen once per tick until the display goes away (re-discover)
//! or the shutdown signal is raised (blank the panel and return).
//!
//! ```text
//!            ┌──────────────────────────────────────────────┐
//!            ▼                                              │
//!   connect_with_retry ──▶ welcome ──▶ tick ─┬─▶ tick ...   │
//!      │          │                          │              │
//!      │ Err      │ Cancelled                └─ push fails ─┘
//!      ▼          ▼
//!  FatalError   Ok(())
//! ```

use std::time::{Duration, Instant};

use log::debug;

use super::events::SessionEvent;
use super::ports::{DisplayConnector, EventSink, Sleeper, TelemetrySource};
use crate::config::DaemonConfig;
use crate::display::{self, Dashboard, FrameBuffer};
use crate::error::FatalError;
use crate::scheduler::PhaseCounter;
use crate::sensors::MetricSampler;
use crate::session::{Discovery, DiscoverySession, RetryPolicy};
use crate::shutdown::ShutdownSignal;

/// Prefix of the IP row.
pub const IP_ROW_PREFIX: &str = "IPA:";

// ───────────────────────────────────────────────────────────────
// Settings
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Welcome {
    pub message: String,
    pub duration: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshSettings {
    pub tick: Duration,
    pub retry: RetryPolicy,
    pub welcome: Option<Welcome>,
}

impl RefreshSettings {
    pub fn from_config(config: &DaemonConfig) -> Self {
        Self {
            tick: Duration::from_millis(config.tick_interval_ms),
            retry: RetryPolicy {
                backoff: Duration::from_millis(config.reconnect_backoff_ms),
                fixed_attempts: config.fixed_bus_attempts,
            },
            welcome: config.welcome_message.as_ref().map(|message| Welcome {
                message: message.clone(),
                duration: Duration::from_millis(config.welcome_duration_ms),
            }),
        }
    }
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self::from_config(&DaemonConfig::default())
    }
}

/// Why a connected session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionExit {
    ConnectionLost,
    Stopped,
}

// ───────────────────────────────────────────────────────────────
// RefreshLoop
// ───────────────────────────────────────────────────────────────

pub struct RefreshLoop<C: DisplayConnector, T, S, E> {
    session: DiscoverySession<C>,
    sampler: MetricSampler<T>,
    sleeper: S,
    sink: E,
    shutdown: ShutdownSignal,
    settings: RefreshSettings,
    frame: FrameBuffer,
    phase: PhaseCounter,
    /// Labels of the last composed frame; RAM, disk and IP persist
    /// between their phase-0 refreshes.
    dashboard: Dashboard,
    ticks: u64,
}

impl<C, T, S, E> RefreshLoop<C, T, S, E>
where
    C: DisplayConnector,
    T: TelemetrySource,
    S: Sleeper,
    E: EventSink,
{
    pub fn new(
        session: DiscoverySession<C>,
        sampler: MetricSampler<T>,
        sleeper: S,
        sink: E,
        shutdown: ShutdownSignal,
        settings: RefreshSettings,
    ) -> Self {
        Self {
            session,
            sampler,
            sleeper,
            sink,
            shutdown,
            settings,
            frame: FrameBuffer::new(),
            phase: PhaseCounter::new(),
            dashboard: Dashboard::default(),
            ticks: 0,
        }
    }

    // ── Supervisor ────────────────────────────────────────────

    /// Discover, refresh, re-discover on loss, until stopped.
    ///
    /// Only initial discovery can fail terminally (fixed bus never
    /// answered); once a display has been shown, a lost connection is
    /// retried indefinitely in both modes.
    pub fn run(&mut self) -> Result<(), FatalError> {
        let retry = self.settings.retry;
        let mut discovery = self.session.connect_with_retry(
            &retry,
            &mut self.sleeper,
            &self.shutdown,
            &mut self.sink,
        )?;

        loop {
            if discovery == Discovery::Cancelled {
                self.stop();
                return Ok(());
            }

            match self.run_session() {
                SessionExit::ConnectionLost => {}
                SessionExit::Stopped => return Ok(()),
            }

            discovery = self.session.reconnect_with_retry(
                &retry,
                &mut self.sleeper,
                &self.shutdown,
                &mut self.sink,
            );
        }
    }

    /// Welcome plus tick loop on an already connected session.
    pub fn run_session(&mut self) -> SessionExit {
        self.phase.reset();

        if let Some(exit) = self.welcome() {
            return exit;
        }

        loop {
            if self.shutdown.is_requested() {
                self.stop();
                return SessionExit::Stopped;
            }

            let started = Instant::now();
            if !self.tick() {
                return SessionExit::ConnectionLost;
            }
            if let Some(rest) = self.settings.tick.checked_sub(started.elapsed()) {
                self.sleeper.sleep(rest);
            }
        }
    }

    // ── Frame production ──────────────────────────────────────

    /// Sample, compose and push one frame.  `false` when the push failed
    /// and the session was demoted.
    pub fn tick(&mut self) -> bool {
        self.dashboard.cpu = self.sampler.cpu_usage(self.phase);
        self.dashboard.time = self.sampler.clock_time();
        if self.phase.expensive_metrics_due() {
            self.dashboard.ram = self.sampler.ram_usage();
            self.dashboard.disk = self.sampler.disk_usage();
            self.dashboard.ip = format!("{IP_ROW_PREFIX}{}", self.sampler.ip_address());
        }

        display::compose_dashboard(&mut self.frame, &self.dashboard);
        if !self.push_frame() {
            return false;
        }

        self.ticks += 1;
        self.phase.advance();
        true
    }

    /// Show the welcome message and hold it, polling for shutdown once
    /// per tick period.  `Some` when the session ended meanwhile.
    fn welcome(&mut self) -> Option<SessionExit> {
        let welcome = self.settings.welcome.clone()?;

        display::compose_message(&mut self.frame, &welcome.message);
        if !self.push_frame() {
            return Some(SessionExit::ConnectionLost);
        }

        let mut remaining = welcome.duration;
        while !remaining.is_zero() {
            if self.shutdown.is_requested() {
                self.stop();
                return Some(SessionExit::Stopped);
            }
            let step = remaining.min(self.settings.tick);
            self.sleeper.sleep(step);
            remaining -= step;
        }
        None
    }

    fn push_frame(&mut self) -> bool {
        let bus = self.session.connected_bus();
        match self.session.push(&self.frame) {
            Ok(()) => true,
            Err(e) => {
                if let Some(bus) = bus {
                    debug!("display: lost on bus {bus}: {e}");
                    self.sink.emit(&SessionEvent::ConnectionLost { bus });
                }
                false
            }
        }
    }

    /// Blank the panel (if still bound) and report the stop.
    fn stop(&mut self) {
        self.frame.clear();
        if self.session.is_connected() {
            if let Err(e) = self.session.push(&self.frame) {
                debug!("display: final blank failed: {e}");
            }
        }
        self.sink.emit(&SessionEvent::Stopped);
    }

    // ── Introspection ─────────────────────────────────────────

    pub fn session(&self) -> &DiscoverySession<C> {
        &self.session
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn phase(&self) -> u8 {
        self.phase.phase()
    }

    /// Frames successfully pushed by the tick loop.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn sampler_mut(&mut self) -> &mut MetricSampler<T> {
        &mut self.sampler
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    pub fn sink(&self) -> &E {
        &self.sink
    }
}
