//! Host-side address lookup
//!
//! From inside WSL the Windows host is queried through `ipconfig.exe`. Its
//! adapter list also contains the WSL switch, loopback and VPN adapters,
//! which are skipped by prefix.

use crate::platform::AddressProbe;
use std::net::Ipv4Addr;
use tracing::debug;

const IPV4_LABEL: &str = "IPv4 Address";

/// First host LAN address reported by `ipconfig.exe`
pub fn host_address(probe: &dyn AddressProbe, exclude_prefixes: &[String]) -> Option<Ipv4Addr> {
    let output = probe.run_tool("ipconfig.exe", &[])?;
    let addr = parse_ipconfig_output(&output, exclude_prefixes);
    debug!("Host LAN address: {:?}", addr);
    addr
}

/// Pick the first `IPv4 Address` entry not matching an excluded prefix
pub fn parse_ipconfig_output(output: &str, exclude_prefixes: &[String]) -> Option<Ipv4Addr> {
    ipv4_entries(output).find(|addr| {
        let text = addr.to_string();
        !exclude_prefixes.iter().any(|prefix| text.starts_with(prefix.as_str()))
    })
}

/// All addresses listed under an `IPv4 Address` label, in order
fn ipv4_entries(output: &str) -> impl Iterator<Item = Ipv4Addr> + '_ {
    output.lines().filter_map(|line| {
        let start = line.find(IPV4_LABEL)? + IPV4_LABEL.len();
        let rest = &line[start..];
        let digits = rest.find(|c: char| c.is_ascii_digit())?;
        let candidate: String = rest[digits..]
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        candidate.parse().ok()
    })
}
