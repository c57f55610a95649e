//! CPU load from the aggregate `/proc/stat` counters.
//!
//! Load is a ratio of tick deltas, so it needs two samples.  The
//! accumulator latches a baseline on the first tick of a refresh window
//! and computes the percentage on the last, giving a figure averaged over
//! the whole window.  In between, nothing is probed.

use log::debug;

use crate::error::ProbeError;

/// Number of leading counter fields summed into the total.
const SUMMED_FIELDS: usize = 10;
/// Position of the idle counter among the numeric fields.
const IDLE_FIELD: usize = 3;

pub const INITIAL_LABEL: &str = "CPU:0%";

// ---------------------------------------------------------------------------
// Tick counters
// ---------------------------------------------------------------------------

/// One reading of the aggregate CPU counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CpuTicks {
    /// Sum of the first ten counters (user through guest_nice).
    pub total: u64,
    /// The idle counter.
    pub idle: u64,
}

impl CpuTicks {
    /// Parse the aggregate `cpu  …` line of `/proc/stat`.
    ///
    /// Kernels older than 2.6.33 report fewer than ten counters; any
    /// line with at least the idle field is accepted.
    pub fn parse_stat_line(line: &str) -> Result<Self, ProbeError> {
        let mut fields = line.split_whitespace();
        match fields.next() {
            Some(label) if label.starts_with("cpu") => {}
            _ => return Err(ProbeError::Malformed("/proc/stat")),
        }

        let mut values = [0u64; SUMMED_FIELDS];
        let mut count = 0;
        for (slot, raw) in values.iter_mut().zip(fields) {
            *slot = raw
                .parse()
                .map_err(|_| ProbeError::Malformed("/proc/stat"))?;
            count += 1;
        }
        if count <= IDLE_FIELD {
            return Err(ProbeError::Malformed("/proc/stat"));
        }

        let total = values
            .iter()
            .try_fold(0u64, |acc, v| acc.checked_add(*v))
            .ok_or(ProbeError::Malformed("/proc/stat"))?;
        Ok(Self {
            total,
            idle: values[IDLE_FIELD],
        })
    }
}

// ---------------------------------------------------------------------------
// Accumulator
// ---------------------------------------------------------------------------

/// Baseline plus the last rendered label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuAccumulator {
    total_last: u64,
    idle_last: u64,
    label: String,
}

impl Default for CpuAccumulator {
    fn default() -> Self {
        Self {
            total_last: 0,
            idle_last: 0,
            label: INITIAL_LABEL.to_string(),
        }
    }
}

impl CpuAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn has_baseline(&self) -> bool {
        self.total_last > 0
    }

    /// Latch the window-start reading.
    pub fn latch(&mut self, ticks: CpuTicks) {
        self.total_last = ticks.total;
        self.idle_last = ticks.idle;
    }

    /// Close the window with the window-end reading.
    ///
    /// Returns the new percentage when one could be computed.  Without a
    /// baseline nothing changes; with one, the baseline is always cleared
    /// but the label only changes when the total advanced.
    pub fn complete(&mut self, ticks: CpuTicks) -> Option<u8> {
        if !self.has_baseline() {
            return None;
        }
        let total_diff = ticks.total.saturating_sub(self.total_last);
        let idle_diff = ticks.idle.saturating_sub(self.idle_last);
        self.total_last = 0;
        self.idle_last = 0;

        if total_diff == 0 {
            debug!("cpu: no tick progress over window");
            return None;
        }
        let busy = total_diff.saturating_sub(idle_diff);
        let usage = (busy.saturating_mul(100) / total_diff).min(100) as u8;
        self.label = format!("CPU:{usage}%");
        Some(usage)
    }
}
