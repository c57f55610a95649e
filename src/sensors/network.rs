//! IPv4 address lookup for the status screen.

pub const NO_NETWORK: &str = "No network";

/// Longest dotted-quad IPv4 address (`255.255.255.255`).
pub const MAX_IPV4_LEN: usize = 15;

/// Extract the first IPv4 address from `ip -4 -o addr show` output.
///
/// ```text
/// 2: eth0    inet 192.168.1.20/24 brd 192.168.1.255 scope global eth0 ...
/// ```
pub fn parse_ip_addr_output(output: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let mut tokens = line.split_whitespace();
        tokens.find(|t| *t == "inet")?;
        let cidr = tokens.next()?;
        let addr = cidr.split('/').next().unwrap_or(cidr);
        Some(addr.to_string())
    })
}

/// Whether `addr` is something worth showing: non-empty and no longer
/// than a dotted quad.
pub fn is_plausible_ipv4(addr: &str) -> bool {
    !addr.is_empty() && addr.len() <= MAX_IPV4_LEN
}
