//! Configuration validation functions

use crate::error::{BridgeError, Result};
use std::net::IpAddr;
use std::path::Path;

/// Validate listener address
pub fn validate_bind_address(addr: &str) -> Result<()> {
    addr.parse::<IpAddr>()
        .map_err(|_| BridgeError::Config(format!("Invalid bind address: {}", addr)))?;
    Ok(())
}

/// Validate listener port
pub fn validate_port(port: u16) -> Result<()> {
    if port == 0 {
        return Err(BridgeError::Config("Port number cannot be 0".to_string()));
    }
    Ok(())
}

/// Validate driver executable path (existence is checked at spawn time)
pub fn validate_program(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(BridgeError::Config(
            "Program path cannot be empty".to_string(),
        ));
    }

    if path.to_str().is_none() {
        return Err(BridgeError::Config(format!(
            "Invalid program path: {:?}",
            path
        )));
    }

    Ok(())
}

/// Validate interface name (alphanumeric, max 15 chars)
pub fn validate_interface_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(BridgeError::Config(
            "Interface name cannot be empty".to_string(),
        ));
    }

    if name.len() > 15 {
        return Err(BridgeError::Config(format!(
            "Interface name '{}' exceeds maximum length of 15 characters",
            name
        )));
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        return Err(BridgeError::Config(format!(
            "Interface name '{}' contains invalid characters (only alphanumeric, '_', and '-' allowed)",
            name
        )));
    }

    Ok(())
}

/// Validate an address exclusion prefix (e.g. "172.")
pub fn validate_prefix(prefix: &str) -> Result<()> {
    if prefix.is_empty() {
        return Err(BridgeError::Config(
            "Exclusion prefix cannot be empty".to_string(),
        ));
    }

    if !prefix.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(BridgeError::Config(format!(
            "Exclusion prefix '{}' may only contain digits and dots",
            prefix
        )));
    }

    Ok(())
}
