//! Local interface enumeration

use std::net::Ipv4Addr;
use tracing::warn;

/// An IPv4 address bound to a local interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceAddr {
    /// Interface name (e.g. "eth0")
    pub name: String,
    /// Bound address
    pub addr: Ipv4Addr,
    /// Interface carries the loopback flag
    pub is_loopback: bool,
    /// Interface is administratively up and has carrier
    pub is_up: bool,
}

impl InterfaceAddr {
    /// Usable by another machine on the LAN
    pub fn is_external(&self) -> bool {
        self.is_up && !self.is_loopback && !self.addr.is_loopback()
    }
}

/// List IPv4 addresses of all local interfaces, in kernel order
#[cfg(unix)]
pub fn list_ipv4() -> Vec<InterfaceAddr> {
    use std::ffi::CStr;

    let mut found = Vec::new();
    let mut ifap: *mut libc::ifaddrs = std::ptr::null_mut();

    // SAFETY: on success the list is released with freeifaddrs below
    if unsafe { libc::getifaddrs(&mut ifap) } != 0 {
        warn!("getifaddrs failed: {}", std::io::Error::last_os_error());
        return found;
    }

    let mut cursor = ifap;
    while !cursor.is_null() {
        // SAFETY: cursor is a live node of the list returned by getifaddrs
        let entry = unsafe { &*cursor };
        cursor = entry.ifa_next;

        if entry.ifa_addr.is_null() {
            continue;
        }

        // SAFETY: ifa_addr is non-null and points at a sockaddr
        let family = unsafe { (*entry.ifa_addr).sa_family } as libc::c_int;
        if family != libc::AF_INET {
            continue;
        }

        // SAFETY: AF_INET entries carry a sockaddr_in
        let sin = unsafe { &*(entry.ifa_addr as *const libc::sockaddr_in) };
        let addr = Ipv4Addr::from(u32::from_be(sin.sin_addr.s_addr));

        // SAFETY: ifa_name is a NUL-terminated string owned by the list
        let name = unsafe { CStr::from_ptr(entry.ifa_name) }
            .to_string_lossy()
            .into_owned();

        let up_running = (libc::IFF_UP | libc::IFF_RUNNING) as libc::c_uint;
        found.push(InterfaceAddr {
            name,
            addr,
            is_loopback: entry.ifa_flags & (libc::IFF_LOOPBACK as libc::c_uint) != 0,
            is_up: entry.ifa_flags & up_running == up_running,
        });
    }

    // SAFETY: ifap came from a successful getifaddrs call
    unsafe { libc::freeifaddrs(ifap) };

    found
}

/// List IPv4 addresses of all local interfaces
#[cfg(not(unix))]
pub fn list_ipv4() -> Vec<InterfaceAddr> {
    warn!("Interface enumeration is not supported on this platform");
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_external() {
        let lo = InterfaceAddr {
            name: "lo".to_string(),
            addr: Ipv4Addr::LOCALHOST,
            is_loopback: true,
            is_up: true,
        };
        let eth = InterfaceAddr {
            name: "eth0".to_string(),
            addr: Ipv4Addr::new(192, 168, 1, 20),
            is_loopback: false,
            is_up: true,
        };
        assert!(!lo.is_external());
        assert!(eth.is_external());
    }

    #[test]
    fn test_down_interface_is_not_external() {
        let bridge = InterfaceAddr {
            name: "docker0".to_string(),
            addr: Ipv4Addr::new(172, 17, 0, 1),
            is_loopback: false,
            is_up: false,
        };
        assert!(!bridge.is_external());
    }

    #[cfg(unix)]
    #[test]
    fn test_list_entries_are_named() {
        for entry in list_ipv4() {
            assert!(!entry.name.is_empty());
        }
    }
}
