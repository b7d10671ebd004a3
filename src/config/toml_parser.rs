//! TOML configuration file parser
//!
//! Every key is optional. Missing keys fall back to the defaults of the
//! selected variant.

use crate::config::{Config, DeviceConfig, NetworkConfig, Variant};
use crate::error::{BridgeError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// TOML configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Deployment variant
    #[serde(default)]
    pub variant: Option<Variant>,

    /// Listener address
    #[serde(default)]
    pub bind_address: Option<String>,

    /// Listener port
    #[serde(default)]
    pub port: Option<u16>,

    /// Static asset root
    #[serde(default)]
    pub public_dir: Option<PathBuf>,

    /// FPGA LED driver
    #[serde(default)]
    pub led: Option<TomlDeviceConfig>,

    /// CPU UART driver
    #[serde(default)]
    pub cpu: Option<TomlDeviceConfig>,

    /// Address resolver settings
    #[serde(default)]
    pub network: Option<TomlNetworkConfig>,
}

/// TOML driver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlDeviceConfig {
    /// Path to the driver executable
    pub program: PathBuf,
}

/// TOML address resolver configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlNetworkConfig {
    /// WSL guest interface
    #[serde(default)]
    pub guest_interface: Option<String>,

    /// Host address prefixes to skip
    #[serde(default)]
    pub exclude_prefixes: Option<Vec<String>>,
}

impl TomlConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            BridgeError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        Self::parse(&contents)
    }

    /// Parse configuration from a TOML string
    pub fn parse(toml: &str) -> Result<Self> {
        toml::from_str(toml)
            .map_err(|e| BridgeError::Config(format!("Failed to parse TOML config: {}", e)))
    }
}

// Convert TOML config to internal Config
impl From<TomlConfig> for Config {
    fn from(toml: TomlConfig) -> Self {
        let mut config = Config::for_variant(toml.variant.unwrap_or_default());

        if let Some(bind_address) = toml.bind_address {
            config.bind_address = bind_address;
        }
        if let Some(port) = toml.port {
            config.port = port;
        }
        if let Some(public_dir) = toml.public_dir {
            config.public_dir = public_dir;
        }
        if let Some(led) = toml.led {
            config.led = led.into();
        }
        if let Some(cpu) = toml.cpu {
            config.cpu = cpu.into();
        }
        if let Some(network) = toml.network {
            config.network = network.into();
        }

        config
    }
}

impl From<TomlDeviceConfig> for DeviceConfig {
    fn from(toml: TomlDeviceConfig) -> Self {
        DeviceConfig {
            program: toml.program,
        }
    }
}

impl From<TomlNetworkConfig> for NetworkConfig {
    fn from(toml: TomlNetworkConfig) -> Self {
        let defaults = NetworkConfig::default();
        NetworkConfig {
            guest_interface: toml.guest_interface.unwrap_or(defaults.guest_interface),
            exclude_prefixes: toml.exclude_prefixes.unwrap_or(defaults.exclude_prefixes),
        }
    }
}
