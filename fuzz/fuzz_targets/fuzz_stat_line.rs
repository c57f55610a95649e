//! Fuzz target: `/proc/stat` aggregate line parser
//!
//! Feeds arbitrary text to `CpuTicks::parse_stat_line` and checks:
//! - No panics, including on overflowing counters
//! - A parsed line never reports more idle than total time
//!
//! cargo fuzz run fuzz_stat_line

#![no_main]

use cubenano::sensors::cpu::{CpuAccumulator, CpuTicks};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    let Ok(ticks) = CpuTicks::parse_stat_line(text) else {
        return;
    };
    assert!(ticks.idle <= ticks.total, "idle exceeds total: {ticks:?}");

    // Close a window against a zero reading: must not underflow.
    let mut acc = CpuAccumulator::new();
    acc.latch(ticks);
    if let Some(pct) = acc.complete(CpuTicks { total: 0, idle: 0 }) {
        assert!(pct <= 100);
    }
});
