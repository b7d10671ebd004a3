//! Host environment detection
//!
//! The bridge may run on a plain host or inside WSL, where the Linux guest
//! sits behind a NAT and the address a phone can reach belongs to the
//! Windows host instead.

use std::fmt;
use std::fs;

/// Network namespace layout the process is running in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEnvironment {
    /// Directly on the host network
    Native,
    /// Inside a WSL guest, host reachable through `ipconfig.exe`
    Wsl,
}

impl HostEnvironment {
    /// Whether host and guest addresses must be resolved separately
    pub fn is_split(&self) -> bool {
        matches!(self, HostEnvironment::Wsl)
    }
}

impl fmt::Display for HostEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostEnvironment::Native => write!(f, "native"),
            HostEnvironment::Wsl => write!(f, "WSL"),
        }
    }
}

/// Detect the current host environment
pub fn detect_environment() -> HostEnvironment {
    if std::env::var_os("WSL_DISTRO_NAME").is_some() || std::env::var_os("WSL_INTEROP").is_some() {
        return HostEnvironment::Wsl;
    }

    match fs::read_to_string("/proc/version") {
        Ok(version) if is_wsl_kernel(&version) => HostEnvironment::Wsl,
        _ => HostEnvironment::Native,
    }
}

/// WSL kernels carry "microsoft" in their version banner
fn is_wsl_kernel(version: &str) -> bool {
    version.to_ascii_lowercase().contains("microsoft")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wsl_kernel_banner() {
        assert!(is_wsl_kernel(
            "Linux version 5.15.153.1-microsoft-standard-WSL2 (root@941d701f84f1)"
        ));
        assert!(is_wsl_kernel("Linux version 4.4.0-19041-Microsoft"));
        assert!(!is_wsl_kernel("Linux version 6.8.0-45-generic (buildd@lcy02-amd64-075)"));
    }

    #[test]
    fn test_environment_split() {
        assert!(HostEnvironment::Wsl.is_split());
        assert!(!HostEnvironment::Native.is_split());
        assert_eq!(HostEnvironment::Wsl.to_string(), "WSL");
    }
}
