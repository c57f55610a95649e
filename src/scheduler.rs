//! Phase scheduler for the telemetry refresh loop.
//!
//! Metrics have very different costs: CPU counters and the wall clock are
//! cheap and cumulative, while RAM, disk and IP probes hit the filesystem
//! or spawn processes.  The refresh loop therefore runs on a five-phase
//! cycle and only pays for the expensive probes once per window.
//!
//! ```text
//!  tick:    0     1     2     3     4     0     1 ...
//!          ┌─────┬─────┬─────┬─────┬─────┐┌─────┬──
//!  CPU:    │ base│  -  │  -  │  -  │ calc││ base│
//!  time:   │  ✓  │  ✓  │  ✓  │  ✓  │  ✓  ││  ✓  │
//!  RAM/SDC │  ✓  │cache│cache│cache│cache││  ✓  │
//!  /IP:    └─────┴─────┴─────┴─────┴─────┘└─────┴──
//! ```

// ═══════════════════════════════════════════════════════════════
//  Phase counter
// ═══════════════════════════════════════════════════════════════

/// Number of ticks in one refresh window.
pub const PHASE_COUNT: u8 = 5;

/// Position within the refresh window, always in `0..PHASE_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhaseCounter {
    phase: u8,
}

impl PhaseCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> u8 {
        self.phase
    }

    /// Step to the next phase, wrapping after the last.
    pub fn advance(&mut self) {
        self.phase = (self.phase + 1) % PHASE_COUNT;
    }

    /// First tick of a window: the CPU baseline is latched and the
    /// expensive probes are refreshed.
    pub fn is_window_start(&self) -> bool {
        self.phase == 0
    }

    /// Last tick of a window: the CPU percentage is computed.
    pub fn is_window_end(&self) -> bool {
        self.phase == PHASE_COUNT - 1
    }

    /// Whether RAM, disk and IP should be probed this tick.
    pub fn expensive_metrics_due(&self) -> bool {
        self.is_window_start()
    }

    /// Back to phase 0 (used when a new display session starts).
    pub fn reset(&mut self) {
        self.phase = 0;
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
