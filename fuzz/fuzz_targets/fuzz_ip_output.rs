//! Fuzz target: `ip -4 -o addr show` output parser
//!
//! cargo fuzz run fuzz_ip_output

#![no_main]

use cubenano::sensors::network::{is_plausible_ipv4, parse_ip_addr_output};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    if let Some(addr) = parse_ip_addr_output(&text) {
        assert!(!addr.contains('/'), "prefix length leaked: {addr}");
        assert!(!addr.chars().any(char::is_whitespace));
        let _ = is_plausible_ipv4(&addr);
    }
});
