//! Reachable address resolution
//!
//! Works out which address an operator should point client devices at. The
//! result is advisory: it is printed at startup and never used to bind the
//! listener or to handle requests. Resolution never fails; unknown values
//! fall back to a sentinel.

mod detection;
mod interfaces;
mod linux;
mod windows;

pub use detection::{detect_environment, HostEnvironment};
pub use interfaces::{list_ipv4, InterfaceAddr};
pub use linux::parse_ip_addr_output;
pub use windows::parse_ipconfig_output;

use crate::config::NetworkConfig;
use std::fmt;
use std::net::Ipv4Addr;
use std::process::Command;
use tracing::debug;

/// Sentinel when no external interface exists
pub const LOCALHOST: &str = "localhost";

/// Sentinel when an OS tool gave no usable answer
pub const UNKNOWN: &str = "UNKNOWN";

/// Best-known externally reachable address, or a sentinel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAddress(String);

impl ResolvedAddress {
    /// The `localhost` sentinel
    pub fn localhost() -> Self {
        Self(LOCALHOST.to_string())
    }

    /// The `UNKNOWN` sentinel
    pub fn unknown() -> Self {
        Self(UNKNOWN.to_string())
    }

    /// Textual form
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is one of the sentinels rather than an address
    pub fn is_sentinel(&self) -> bool {
        self.0 == LOCALHOST || self.0 == UNKNOWN
    }
}

impl From<Ipv4Addr> for ResolvedAddress {
    fn from(addr: Ipv4Addr) -> Self {
        Self(addr.to_string())
    }
}

impl fmt::Display for ResolvedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of host network facts
///
/// Production code uses [`SystemProbe`]; tests substitute canned answers.
#[cfg_attr(test, mockall::automock)]
pub trait AddressProbe {
    /// Host environment the process runs in
    fn environment(&self) -> HostEnvironment;

    /// IPv4 addresses of local interfaces
    fn interface_addrs(&self) -> Vec<InterfaceAddr>;

    /// Run an address-reporting tool, returning stdout on success
    fn run_tool(&self, program: &str, args: &[String]) -> Option<String>;
}

/// Probe backed by the real OS
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

impl AddressProbe for SystemProbe {
    fn environment(&self) -> HostEnvironment {
        detect_environment()
    }

    fn interface_addrs(&self) -> Vec<InterfaceAddr> {
        list_ipv4()
    }

    fn run_tool(&self, program: &str, args: &[String]) -> Option<String> {
        debug!("Executing command: {} {:?}", program, args);

        let output = match Command::new(program).args(args).output() {
            Ok(output) => output,
            Err(e) => {
                debug!("Failed to execute {}: {}", program, e);
                return None;
            }
        };

        if !output.status.success() {
            debug!(
                "{} exited with {}: {}",
                program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return None;
        }

        Some(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Every address candidate worth showing an operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressReport {
    /// Environment the candidates were gathered in
    pub environment: HostEnvironment,
    /// First external IPv4 interface address, or `localhost`
    pub primary: ResolvedAddress,
    /// WSL guest address (reachable from the host only)
    pub guest: Option<ResolvedAddress>,
    /// Windows host LAN address (reachable by clients on the LAN)
    pub host: Option<ResolvedAddress>,
}

impl AddressReport {
    /// Address an external client on the same LAN should use
    pub fn lan_address(&self) -> &ResolvedAddress {
        match &self.host {
            Some(host) if !host.is_sentinel() => host,
            _ => &self.primary,
        }
    }

    /// Operator-facing startup banner
    pub fn banner(&self, title: &str, port: u16) -> String {
        let rule = "=====================================";
        let mut lines = vec![
            rule.to_string(),
            format!(" {}", title),
            rule.to_string(),
            format!(" Local:       http://localhost:{}", port),
        ];

        match (&self.guest, &self.host) {
            (None, None) => {
                lines.push(format!(" Network:     http://{}:{}", self.primary, port));
            }
            (guest, host) => {
                if let Some(guest) = guest {
                    lines.push(format!(
                        " WSL IP:      http://{}:{}   (internal only)",
                        guest, port
                    ));
                }
                if let Some(host) = host {
                    lines.push(format!(
                        " Windows IP:  http://{}:{}   (LAN access)",
                        host, port
                    ));
                }
            }
        }

        lines.push(rule.to_string());
        lines.join("\n")
    }
}

/// Resolve the primary address using the real OS
pub fn resolve_address() -> ResolvedAddress {
    primary_address(&SystemProbe)
}

/// First IPv4 address on a non-loopback interface, else `localhost`
pub fn primary_address(probe: &dyn AddressProbe) -> ResolvedAddress {
    probe
        .interface_addrs()
        .into_iter()
        .find(InterfaceAddr::is_external)
        .map(|iface| ResolvedAddress::from(iface.addr))
        .unwrap_or_else(ResolvedAddress::localhost)
}

/// Gather all candidates using the real OS
pub fn resolve_report(network: &NetworkConfig) -> AddressReport {
    resolve_report_with(&SystemProbe, network)
}

/// Gather all candidates through `probe`
pub fn resolve_report_with(probe: &dyn AddressProbe, network: &NetworkConfig) -> AddressReport {
    let environment = probe.environment();
    let primary = primary_address(probe);

    let (guest, host) = if environment.is_split() {
        let guest = linux::guest_address(probe, &network.guest_interface)
            .map(ResolvedAddress::from)
            .unwrap_or_else(ResolvedAddress::unknown);
        let host = windows::host_address(probe, &network.exclude_prefixes)
            .map(ResolvedAddress::from)
            .unwrap_or_else(ResolvedAddress::unknown);
        (Some(guest), Some(host))
    } else {
        (None, None)
    };

    AddressReport {
        environment,
        primary,
        guest,
        host,
    }
}
