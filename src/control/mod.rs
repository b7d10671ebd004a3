//! HTTP front for client devices
//!
//! This module exposes the command endpoints used by the phone UI and
//! serves the static UI bundle itself.

mod api;
mod handler;
mod server;

pub use api::{ApiError, CalcRequest, CalcResponse, SendRequest, INVALID_JSON, SEND_FAILED};
pub use handler::CommandHandler;
pub use server::{create_router, ControlServer};
