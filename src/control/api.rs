//! HTTP payload and error types
//!
//! `/send` speaks plain text, `/calc` speaks JSON. Both share [`ApiError`]
//! and differ only in how it is rendered.

use crate::command::ValidationError;
use crate::error::BridgeError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body text for an unparseable request
pub const INVALID_JSON: &str = "Invalid JSON.";

/// `/send` body text when the driver could not deliver the value
pub const SEND_FAILED: &str = "Error sending UART data.";

/// `POST /send` body
#[derive(Debug, Clone, Default, Serialize)]
pub struct SendRequest {
    /// Eight `'0'`/`'1'` characters; kept raw so any shape reaches validation
    pub bits: Option<Value>,
}

impl SendRequest {
    /// Parse from a raw body
    pub fn from_slice(body: &[u8]) -> Result<Self, ApiError> {
        let mut fields = json_object(body).map_err(ApiError::from)?;
        Ok(Self {
            bits: fields.remove("bits"),
        })
    }
}

/// `POST /calc` body
#[derive(Debug, Clone, Default, Serialize)]
pub struct CalcRequest {
    /// Opcode token or mnemonic
    pub opcode: Option<Value>,

    /// First operand
    pub a: Option<Value>,

    /// Second operand (defaults to 0)
    pub b: Option<Value>,
}

impl CalcRequest {
    /// Parse from a raw body
    pub fn from_slice(body: &[u8]) -> Result<Self, ApiError> {
        let mut fields = json_object(body).map_err(ApiError::from)?;
        Ok(Self {
            opcode: fields.remove("opcode"),
            a: fields.remove("a"),
            b: fields.remove("b"),
        })
    }
}

/// Top-level JSON object of a request body
///
/// Arrays, scalars and `null` are rejected here rather than being mapped
/// positionally onto the request fields.
fn json_object(body: &[u8]) -> crate::Result<Map<String, Value>> {
    Ok(serde_json::from_slice(body)?)
}

/// `POST /calc` response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalcResponse {
    /// Trimmed driver stdout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,

    /// Failure reason
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CalcResponse {
    /// Create a successful response
    pub fn success(result: String) -> Self {
        Self {
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(error: String) -> Self {
        Self {
            result: None,
            error: Some(error),
        }
    }
}

/// Failure of one request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Body is not the expected JSON structure
    #[error("Invalid JSON.")]
    PayloadParse(String),

    /// Payload rejected by the command grammar
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Driver could not be started
    #[error("{0}")]
    Spawn(String),

    /// Driver ran and reported failure
    #[error("{}", runtime_message(.exit_status, .stderr))]
    ExecutableRuntime {
        /// Driver exit code
        exit_status: i32,
        /// Driver stderr, passed through to the client
        stderr: String,
    },
}

impl ApiError {
    /// HTTP status for this failure
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::PayloadParse(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Spawn(_) | ApiError::ExecutableRuntime { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Plain-text rendering used by `/send`
    pub fn into_text_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            ApiError::Spawn(_) => SEND_FAILED.to_string(),
            ApiError::ExecutableRuntime { stderr, .. } if !stderr.is_empty() => {
                format!("{}\n{}", SEND_FAILED, stderr)
            }
            ApiError::ExecutableRuntime { .. } => SEND_FAILED.to_string(),
            other => other.to_string(),
        };
        (status, body).into_response()
    }

    /// JSON rendering used by `/calc`
    pub fn into_json_response(self) -> Response {
        let status = self.status_code();
        (status, Json(CalcResponse::error(self.to_string()))).into_response()
    }
}

impl From<BridgeError> for ApiError {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::Validation(e) => ApiError::Validation(e),
            BridgeError::Serialization(msg) => ApiError::PayloadParse(msg),
            other => ApiError::Spawn(other.to_string()),
        }
    }
}

fn runtime_message(exit_status: &i32, stderr: &str) -> String {
    if stderr.is_empty() {
        format!("Driver exited with status {}", exit_status)
    } else {
        stderr.to_string()
    }
}
