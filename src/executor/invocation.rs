//! Invocation and result types

use crate::command::Command;
use std::fmt;
use std::path::{Path, PathBuf};

/// Program plus discrete argument tokens
///
/// Each token occupies exactly one argv slot. Nothing here is ever joined
/// into a shell command line; [`fmt::Display`] exists for logging only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<String>,
}

impl Invocation {
    /// Derive the invocation for a validated command
    pub fn new(program: impl Into<PathBuf>, command: &Command) -> Self {
        Self {
            program: program.into(),
            args: command.to_args(),
        }
    }

    /// Executable path
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Argument tokens (without the program name)
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            if arg.is_empty() || arg.chars().any(|c| c.is_whitespace() || c == '"') {
                write!(f, " {:?}", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Captured output of one executable run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
    /// Exit code, `-1` when terminated by a signal
    pub exit_status: i32,
}

impl ExecutionResult {
    /// Build from a finished process
    pub fn from_output(output: std::process::Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_status: output.status.code().unwrap_or(-1),
        }
    }

    /// A run succeeded only with exit code 0 and nothing on stderr
    pub fn is_success(&self) -> bool {
        self.exit_status == 0 && self.stderr.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{BitVector, OpcodeCommand};

    #[test]
    fn test_bits_invocation() {
        let inv = Invocation::new("./main", &Command::Bits(BitVector::from(1)));
        assert_eq!(inv.program(), Path::new("./main"));
        assert_eq!(inv.args(), &["-n", "1"]);
        assert_eq!(inv.to_string(), "./main -n 1");
    }

    #[test]
    fn test_opcode_invocation_keeps_tokens_separate() {
        let op = OpcodeCommand::new("ADD", "1 -o 7", Some("`id`")).unwrap();
        let inv = Invocation::new("/opt/cpu/main", &Command::Opcode(op));
        assert_eq!(inv.args().len(), 6);
        assert_eq!(inv.args()[3], "1 -o 7");
        assert_eq!(inv.args()[5], "`id`");
        assert_eq!(inv.to_string(), "/opt/cpu/main -o 1 -a \"1 -o 7\" -b `id`");
    }

    #[test]
    fn test_success_requires_clean_stderr() {
        let ok = ExecutionResult {
            stdout: "done\n".to_string(),
            stderr: String::new(),
            exit_status: 0,
        };
        assert!(ok.is_success());

        let warned = ExecutionResult {
            stderr: "warning\n".to_string(),
            ..ok.clone()
        };
        assert!(!warned.is_success());

        let failed = ExecutionResult {
            exit_status: 1,
            ..ok
        };
        assert!(!failed.is_success());
    }
}
