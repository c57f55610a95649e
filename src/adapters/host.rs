//! Linux host telemetry adapter.
//!
//! | Figure       | Source                                  |
//! |--------------|-----------------------------------------|
//! | CPU ticks    | first line of `/proc/stat`              |
//! | Memory       | `sysinfo::System` (total / available)   |
//! | Root disk    | `sysinfo::Disks`, mount point `/`       |
//! | IPv4 address | `ip -4 -o addr show dev <iface>`        |
//! | Local time   | `chrono::Local`                         |

use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{Local, NaiveTime};
use log::debug;
use sysinfo::{Disks, System};

use crate::app::ports::{FilesystemStats, MemoryStats, TelemetrySource};
use crate::error::ProbeError;
use crate::sensors::cpu::CpuTicks;
use crate::sensors::network::parse_ip_addr_output;

pub const PROC_STAT: &str = "/proc/stat";

pub struct HostTelemetry {
    system: System,
    disks: Disks,
    stat_path: PathBuf,
}

impl Default for HostTelemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl HostTelemetry {
    pub fn new() -> Self {
        Self::with_stat_path(PROC_STAT)
    }

    /// Read CPU counters from a different file (tests, containers).
    pub fn with_stat_path(path: impl AsRef<Path>) -> Self {
        Self {
            system: System::new(),
            disks: Disks::new_with_refreshed_list(),
            stat_path: path.as_ref().to_path_buf(),
        }
    }
}

impl TelemetrySource for HostTelemetry {
    fn cpu_ticks(&mut self) -> Result<CpuTicks, ProbeError> {
        let raw = std::fs::read_to_string(&self.stat_path)
            .map_err(|_| ProbeError::Unavailable("/proc/stat"))?;
        let line = raw.lines().next().ok_or(ProbeError::Malformed("/proc/stat"))?;
        CpuTicks::parse_stat_line(line)
    }

    fn memory(&mut self) -> Result<MemoryStats, ProbeError> {
        self.system.refresh_memory();
        let total_bytes = self.system.total_memory();
        if total_bytes == 0 {
            return Err(ProbeError::Unavailable("meminfo"));
        }
        Ok(MemoryStats {
            total_bytes,
            available_bytes: self.system.available_memory(),
        })
    }

    fn root_filesystem(&mut self) -> Result<FilesystemStats, ProbeError> {
        self.disks.refresh();
        self.disks
            .iter()
            .find(|d| d.mount_point() == Path::new("/"))
            .map(|d| FilesystemStats {
                total_bytes: d.total_space(),
                available_bytes: d.available_space(),
            })
            .ok_or(ProbeError::Unavailable("root filesystem"))
    }

    fn interface_ipv4(&mut self, interface: &str) -> Result<Option<String>, ProbeError> {
        let output = Command::new("ip")
            .args(["-4", "-o", "addr", "show", "dev", interface])
            .output()
            .map_err(|_| ProbeError::CommandFailed("ip"))?;
        if !output.status.success() {
            // Interface does not exist on this board.
            debug!("ip: {interface}: exit {}", output.status);
            return Ok(None);
        }
        Ok(parse_ip_addr_output(&String::from_utf8_lossy(&output.stdout)))
    }

    fn local_time(&mut self) -> Result<NaiveTime, ProbeError> {
        Ok(Local::now().time())
    }
}
