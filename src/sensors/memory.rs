//! RAM usage label.

use crate::app::ports::MemoryStats;

pub const PLACEHOLDER: &str = "RAM: --";

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// `RAM:{pct:2}% -> {total:.1}GB`; `None` when the total is zero.
///
/// Used memory is total minus available, so page cache counts as free.
pub fn format_label(stats: MemoryStats) -> Option<String> {
    if stats.total_bytes == 0 {
        return None;
    }
    let used = stats.total_bytes.saturating_sub(stats.available_bytes);
    let pct = (u128::from(used) * 100 / u128::from(stats.total_bytes)) as u64;
    let total_gib = stats.total_bytes as f64 / GIB;
    Some(format!("RAM:{pct:2}% -> {total_gib:.1}GB"))
}
