//! Fuzz target: daemon configuration loader
//!
//! Arbitrary JSON must either be rejected or produce a configuration
//! whose bus address can be built.
//!
//! cargo fuzz run fuzz_config

#![no_main]

use cubenano::config::DaemonConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = DaemonConfig::from_json(text) {
        assert!(config.bus_address().is_ok());
    }
});
