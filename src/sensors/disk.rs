//! Root filesystem usage label.

use crate::app::ports::FilesystemStats;

pub const PLACEHOLDER: &str = "SDC: --";

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Used share of the filesystem in percent, rounded up the way `df`
/// rounds its `Use%` column.
///
/// `used` is `total - available`, so blocks reserved for root count as
/// used.  `df` divides by `used + available` with `used` taken from the
/// free-block count instead, which `sysinfo` does not expose; on ext4
/// with the default 5 % reserve this label reads a few points higher.
pub fn used_percent(stats: FilesystemStats) -> Option<u64> {
    if stats.total_bytes == 0 {
        return None;
    }
    let used = u128::from(stats.total_bytes.saturating_sub(stats.available_bytes));
    let total = u128::from(stats.total_bytes);
    Some((used * 100).div_ceil(total) as u64)
}

/// `SDC:{pct}% -> {size:.0}GB`; `None` when the total is zero.
pub fn format_label(stats: FilesystemStats) -> Option<String> {
    let pct = used_percent(stats)?;
    let size_gib = stats.total_bytes as f64 / GIB;
    Some(format!("SDC:{pct}% -> {size_gib:.0}GB"))
}
