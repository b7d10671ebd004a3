//! Opcode commands for the custom CPU

use super::ValidationError;
use serde_json::Value;

/// Operand-b value used when the client omits it
pub const DEFAULT_OPERAND_B: &str = "0";

/// CPU opcode
///
/// The CPU driver reads `-o` with `atoi`, so mnemonics are translated to
/// their numeric encoding here. Unknown tokens are passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Opcode {
    /// No operation
    Nop,
    /// Fixed-point addition
    Add,
    /// Fixed-point subtraction
    Sub,
    /// Fixed-point multiplication
    Mul,
    /// Bitwise AND
    And,
    /// Bitwise OR
    Or,
    /// Bitwise NOT
    Not,
    /// Bitwise XOR
    Xor,
    /// Opaque token forwarded as-is
    Raw(String),
}

impl Opcode {
    /// Interpret a client-supplied opcode token
    pub fn from_token(token: &str) -> Self {
        match token.to_ascii_uppercase().as_str() {
            "NOP" => Opcode::Nop,
            "ADD" => Opcode::Add,
            "SUB" => Opcode::Sub,
            "MUL" => Opcode::Mul,
            "AND" => Opcode::And,
            "OR" => Opcode::Or,
            "NOT" => Opcode::Not,
            "XOR" => Opcode::Xor,
            _ => Opcode::Raw(token.to_string()),
        }
    }

    /// Token placed in the `-o` slot
    pub fn to_token(&self) -> String {
        match self {
            Opcode::Nop => "0".to_string(),
            Opcode::Add => "1".to_string(),
            Opcode::Sub => "2".to_string(),
            Opcode::Mul => "3".to_string(),
            Opcode::And => "4".to_string(),
            Opcode::Or => "5".to_string(),
            Opcode::Not => "6".to_string(),
            Opcode::Xor => "7".to_string(),
            Opcode::Raw(token) => token.clone(),
        }
    }
}

/// A validated `(opcode, a, b)` triple
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpcodeCommand {
    opcode: Opcode,
    a: String,
    b: String,
}

impl OpcodeCommand {
    /// Build from already-extracted tokens
    pub fn new(opcode: &str, a: &str, b: Option<&str>) -> Result<Self, ValidationError> {
        if opcode.trim().is_empty() {
            return Err(ValidationError::MissingOpcode);
        }
        if a.is_empty() {
            return Err(ValidationError::MissingOperand("a"));
        }

        check_token("opcode", opcode)?;
        check_token("a", a)?;

        let b = match b {
            Some(b) if !b.is_empty() => {
                check_token("b", b)?;
                b.to_string()
            }
            _ => DEFAULT_OPERAND_B.to_string(),
        };

        Ok(Self {
            opcode: Opcode::from_token(opcode),
            a: a.to_string(),
            b,
        })
    }

    /// Build from the raw JSON fields of a payload
    pub fn from_values(
        opcode: Option<&Value>,
        a: Option<&Value>,
        b: Option<&Value>,
    ) -> Result<Self, ValidationError> {
        let opcode = scalar_token("opcode", opcode)?.ok_or(ValidationError::MissingOpcode)?;
        let a = scalar_token("a", a)?.ok_or(ValidationError::MissingOperand("a"))?;

        // `false` is treated as "not provided" and gets the default
        let b = match b {
            Some(Value::Bool(false)) => None,
            other => scalar_token("b", other)?,
        };

        Self::new(&opcode, &a, b.as_deref())
    }

    /// Opcode
    pub fn opcode(&self) -> &Opcode {
        &self.opcode
    }

    /// Operand a
    pub fn a(&self) -> &str {
        &self.a
    }

    /// Operand b (defaults to `"0"`)
    pub fn b(&self) -> &str {
        &self.b
    }
}

/// Render a JSON scalar as an argument token
fn scalar_token(field: &'static str, value: Option<&Value>) -> Result<Option<String>, ValidationError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(_)) => Err(ValidationError::InvalidToken {
            field,
            reason: "booleans are not accepted".to_string(),
        }),
        Some(Value::Array(_)) | Some(Value::Object(_)) => Err(ValidationError::InvalidToken {
            field,
            reason: "expected a string or number".to_string(),
        }),
    }
}

fn check_token(field: &'static str, token: &str) -> Result<(), ValidationError> {
    if token.contains('\0') {
        return Err(ValidationError::InvalidToken {
            field,
            reason: "contains a NUL byte".to_string(),
        });
    }
    Ok(())
}
