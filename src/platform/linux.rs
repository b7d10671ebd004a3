//! Guest-side address lookup
//!
//! Inside WSL the guest interface address is read from `ip -4 addr show`.
//! It is only reachable from the host itself.

use crate::platform::AddressProbe;
use std::net::Ipv4Addr;
use tracing::debug;

/// Address of `interface` as reported by the `ip` tool
pub fn guest_address(probe: &dyn AddressProbe, interface: &str) -> Option<Ipv4Addr> {
    let args = ["-4", "addr", "show", interface].map(String::from);
    let output = probe.run_tool("ip", &args)?;
    let addr = parse_ip_addr_output(&output);
    debug!("Guest address on {}: {:?}", interface, addr);
    addr
}

/// First `inet a.b.c.d/nn` entry of `ip -4 addr show` output
pub fn parse_ip_addr_output(output: &str) -> Option<Ipv4Addr> {
    output.lines().find_map(|line| {
        let mut tokens = line.split_whitespace();
        while let Some(token) = tokens.next() {
            if token == "inet" {
                let cidr = tokens.next()?;
                let ip = cidr.split('/').next()?;
                return ip.parse().ok();
            }
        }
        None
    })
}
