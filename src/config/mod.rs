//! Configuration management
//!
//! This module handles the optional TOML configuration file, built-in
//! defaults for both deployment variants, and validation.

mod toml_parser;
mod validation;

pub use toml_parser::TomlConfig;

use crate::error::{BridgeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default configuration file, looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "bridge.toml";

/// Deployment variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// FPGA LED driver behind `POST /send`
    #[default]
    Led,
    /// Custom CPU over UART behind `POST /calc`
    Cpu,
}

impl Variant {
    /// Port used when none is configured
    pub fn default_port(&self) -> u16 {
        match self {
            Variant::Led => 3001,
            Variant::Cpu => 8080,
        }
    }

    /// Startup banner title
    pub fn title(&self) -> &'static str {
        match self {
            Variant::Led => "UART Web Server",
            Variant::Cpu => "Webserver Started Successfully",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Led => write!(f, "led"),
            Variant::Cpu => write!(f, "cpu"),
        }
    }
}

impl FromStr for Variant {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "led" => Ok(Variant::Led),
            "cpu" => Ok(Variant::Cpu),
            other => Err(BridgeError::Config(format!(
                "Unknown variant '{}' (expected 'led' or 'cpu')",
                other
            ))),
        }
    }
}

/// Resolved bridge configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Deployment variant
    pub variant: Variant,

    /// Listener address (wildcard by default)
    pub bind_address: String,

    /// Listener port
    pub port: u16,

    /// Static asset root
    pub public_dir: PathBuf,

    /// FPGA LED driver (`/send`)
    pub led: DeviceConfig,

    /// CPU UART driver (`/calc`)
    pub cpu: DeviceConfig,

    /// Address resolver settings
    pub network: NetworkConfig,
}

/// Driver executable settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Path to the driver executable
    pub program: PathBuf,
}

/// Address resolver settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// WSL guest interface queried with `ip -4 addr show`
    pub guest_interface: String,

    /// Host addresses starting with any of these are skipped
    pub exclude_prefixes: Vec<String>,
}

impl Config {
    /// Defaults for a variant
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            variant,
            bind_address: default_bind_address(),
            port: variant.default_port(),
            public_dir: default_public_dir(),
            led: DeviceConfig::default(),
            cpu: DeviceConfig::default(),
            network: NetworkConfig::default(),
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let toml_config = TomlConfig::from_file(path)?;
        Ok(toml_config.into())
    }

    /// Load from `path` if given, else from [`DEFAULT_CONFIG_PATH`] when it exists
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::from_file(DEFAULT_CONFIG_PATH),
            None => Ok(Self::default()),
        }
    }

    /// Switch variant, moving the port along unless it was customized
    pub fn set_variant(&mut self, variant: Variant) {
        if self.port == self.variant.default_port() {
            self.port = variant.default_port();
        }
        self.variant = variant;
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        validation::validate_bind_address(&self.bind_address)?;
        validation::validate_port(self.port)?;
        self.led
            .validate()
            .map_err(|e| BridgeError::Config(format!("[led] {}", e)))?;
        self.cpu
            .validate()
            .map_err(|e| BridgeError::Config(format!("[cpu] {}", e)))?;
        self.network.validate()?;
        Ok(())
    }

    /// Socket address string for the listener
    pub fn listen_addr(&self) -> String {
        match self.bind_address.parse::<IpAddr>() {
            Ok(IpAddr::V6(v6)) => format!("[{}]:{}", v6, self.port),
            _ => format!("{}:{}", self.bind_address, self.port),
        }
    }
}

impl DeviceConfig {
    /// Validate device settings
    pub fn validate(&self) -> Result<()> {
        validation::validate_program(&self.program)
    }
}

impl NetworkConfig {
    /// Validate resolver settings
    pub fn validate(&self) -> Result<()> {
        validation::validate_interface_name(&self.guest_interface)?;
        for prefix in &self.exclude_prefixes {
            validation::validate_prefix(prefix)?;
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            guest_interface: default_guest_interface(),
            exclude_prefixes: default_exclude_prefixes(),
        }
    }
}

// Default value functions for serde
fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_program() -> PathBuf {
    PathBuf::from("./main")
}

fn default_guest_interface() -> String {
    "eth0".to_string()
}

fn default_exclude_prefixes() -> Vec<String> {
    vec!["172.".to_string(), "127.".to_string(), "10.".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_defaults() {
        let led = Config::for_variant(Variant::Led);
        assert_eq!(led.port, 3001);
        assert_eq!(led.bind_address, "0.0.0.0");
        assert_eq!(led.led.program, PathBuf::from("./main"));

        let cpu = Config::for_variant(Variant::Cpu);
        assert_eq!(cpu.port, 8080);
        assert!(cpu.validate().is_ok());
    }

    #[test]
    fn test_set_variant_moves_default_port() {
        let mut config = Config::default();
        config.set_variant(Variant::Cpu);
        assert_eq!(config.port, 8080);

        let mut custom = Config::default();
        custom.port = 9000;
        custom.set_variant(Variant::Cpu);
        assert_eq!(custom.port, 9000);
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!("LED".parse::<Variant>().unwrap(), Variant::Led);
        assert_eq!("cpu".parse::<Variant>().unwrap(), Variant::Cpu);
        assert!("gpu".parse::<Variant>().is_err());
    }

    #[test]
    fn test_listen_addr() {
        let mut config = Config::default();
        assert_eq!(config.listen_addr(), "0.0.0.0:3001");

        config.bind_address = "::".to_string();
        assert_eq!(config.listen_addr(), "[::]:3001");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.port = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.cpu.program = PathBuf::new();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("[cpu]"), "{}", err);

        let mut config = Config::default();
        config.network.exclude_prefixes.push(String::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(Config::load(Some(&missing)).is_err());
    }
}
