//! fpga-bridge: HTTP control-plane bridge for FPGA and custom-CPU drivers
//!
//! This library accepts small commands from client devices over HTTP,
//! validates them, and runs a pre-built hardware driver executable with the
//! encoded arguments. The driver's output is relayed back as the response.
//!
//! # Architecture
//!
//! Client devices (usually a phone on the same LAN) post a command; the
//! bridge turns it into a fixed argument vector for the driver and runs it.
//! Each driver owns a physical device, so runs against the same driver are
//! serialized.
//!
//! # Modules
//!
//! - `command`: Command grammar, validation and encoding
//! - `executor`: Driver invocation and output capture
//! - `control`: HTTP routes and request pipeline
//! - `platform`: Reachable address resolution for operators
//! - `config`: Configuration parsing and management
//! - `error`: Error types and handling

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod command;
pub mod config;
pub mod control;
pub mod error;
pub mod executor;
pub mod platform;

// Re-export commonly used types
pub use error::{BridgeError, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
