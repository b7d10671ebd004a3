//! Command validation and encoding
//!
//! Client payloads cross a trust boundary here. Anything that does not match
//! the grammar exactly is rejected before an executable is ever spawned.
//!
//! Two command shapes are supported:
//!
//! - [`BitVector`]: exactly eight `'0'`/`'1'` characters, MSB first
//! - [`OpcodeCommand`]: an opcode token plus one or two operand tokens

mod bits;
mod opcode;

pub use bits::BitVector;
pub use opcode::{Opcode, OpcodeCommand};

use serde_json::Value;
use thiserror::Error;

/// Reasons a command payload is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Bit string missing, wrong length, or containing non-binary characters
    #[error("Invalid bit string. Must be 8 bits of 0/1.")]
    InvalidBitString,

    /// Opcode missing or empty
    #[error("Missing opcode")]
    MissingOpcode,

    /// Required operand missing or empty
    #[error("Missing operand '{0}'")]
    MissingOperand(&'static str),

    /// Token present but not representable as a single argument
    #[error("Invalid value for '{field}': {reason}")]
    InvalidToken {
        /// Payload field the token came from
        field: &'static str,
        /// Human-readable reason
        reason: String,
    },
}

/// A validated command, immutable once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 8-bit value written to the FPGA LED register
    Bits(BitVector),
    /// Operation executed on the custom CPU
    Opcode(OpcodeCommand),
}

impl Command {
    /// Validate the `bits` field of a `/send` payload
    pub fn validate_bits(raw: Option<&Value>) -> Result<Self, ValidationError> {
        match raw {
            Some(Value::String(s)) => BitVector::parse(s).map(Command::Bits),
            _ => Err(ValidationError::InvalidBitString),
        }
    }

    /// Validate the fields of a `/calc` payload
    pub fn validate_opcode(
        opcode: Option<&Value>,
        a: Option<&Value>,
        b: Option<&Value>,
    ) -> Result<Self, ValidationError> {
        OpcodeCommand::from_values(opcode, a, b).map(Command::Opcode)
    }

    /// Argument tokens for the driver executable, without the program name
    pub fn to_args(&self) -> Vec<String> {
        match self {
            Command::Bits(bits) => vec!["-n".to_string(), bits.value().to_string()],
            Command::Opcode(op) => vec![
                "-o".to_string(),
                op.opcode().to_token(),
                "-a".to_string(),
                op.a().to_string(),
                "-b".to_string(),
                op.b().to_string(),
            ],
        }
    }
}
