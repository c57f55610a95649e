//! Host telemetry: label formatters and the aggregating [`MetricSampler`].
//!
//! The sampler owns a [`TelemetrySource`] and turns its raw figures into
//! the short labels drawn on the status screen.  Every probe failure is
//! logged at `debug` and degrades to a placeholder; a flaky source never
//! aborts a frame.

pub mod cpu;
pub mod disk;
pub mod memory;
pub mod network;

use log::debug;

use crate::app::ports::TelemetrySource;
use crate::scheduler::PhaseCounter;
use cpu::CpuAccumulator;

pub const TIME_PLACEHOLDER: &str = "00:00:00";

pub struct MetricSampler<T> {
    source: T,
    cpu: CpuAccumulator,
    interfaces: Vec<String>,
}

impl<T: TelemetrySource> MetricSampler<T> {
    /// `interfaces` are tried in order for the IP label.
    pub fn new(source: T, interfaces: Vec<String>) -> Self {
        Self {
            source,
            cpu: CpuAccumulator::new(),
            interfaces,
        }
    }

    /// CPU label for this phase.
    ///
    /// Phase 0 latches the baseline, the last phase computes the load;
    /// other phases return the current label without probing.
    pub fn cpu_usage(&mut self, phase: PhaseCounter) -> String {
        if phase.is_window_start() {
            match self.source.cpu_ticks() {
                Ok(ticks) => self.cpu.latch(ticks),
                Err(e) => debug!("cpu: baseline probe failed: {e}"),
            }
        } else if phase.is_window_end() && self.cpu.has_baseline() {
            match self.source.cpu_ticks() {
                Ok(ticks) => {
                    self.cpu.complete(ticks);
                }
                Err(e) => debug!("cpu: probe failed: {e}"),
            }
        }
        self.cpu.label().to_string()
    }

    /// Local time as `HH:MM:SS`.
    pub fn clock_time(&mut self) -> String {
        match self.source.local_time() {
            Ok(t) => t.format("%H:%M:%S").to_string(),
            Err(e) => {
                debug!("clock: {e}");
                TIME_PLACEHOLDER.to_string()
            }
        }
    }

    pub fn ram_usage(&mut self) -> String {
        let label = self
            .source
            .memory()
            .map_err(|e| debug!("memory: {e}"))
            .ok()
            .and_then(memory::format_label);
        label.unwrap_or_else(|| memory::PLACEHOLDER.to_string())
    }

    pub fn disk_usage(&mut self) -> String {
        let label = self
            .source
            .root_filesystem()
            .map_err(|e| debug!("disk: {e}"))
            .ok()
            .and_then(disk::format_label);
        label.unwrap_or_else(|| disk::PLACEHOLDER.to_string())
    }

    /// First plausible IPv4 address across the configured interfaces.
    pub fn ip_address(&mut self) -> String {
        for iface in &self.interfaces {
            match self.source.interface_ipv4(iface) {
                Ok(Some(addr)) if network::is_plausible_ipv4(&addr) => return addr,
                Ok(_) => {}
                Err(e) => debug!("ip: {iface}: {e}"),
            }
        }
        network::NO_NETWORK.to_string()
    }

    pub fn source_mut(&mut self) -> &mut T {
        &mut self.source
    }
}
