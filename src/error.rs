//! Error types for fpga-bridge
//!
//! This module defines the error types used throughout the application.
//! We use `thiserror` for ergonomic error definitions and `anyhow` for
//! error propagation in application code.

use crate::command::ValidationError;
use thiserror::Error;

/// Main error type for fpga-bridge operations
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Client input rejected by the command grammar
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The driver executable could not be located or started
    #[error("Failed to start {program}: {reason}")]
    Spawn {
        /// Program that was being started
        program: String,
        /// Underlying OS error
        reason: String,
    },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias using BridgeError
pub type Result<T> = std::result::Result<T, BridgeError>;

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for BridgeError {
    fn from(err: toml::de::Error) -> Self {
        BridgeError::Config(err.to_string())
    }
}
