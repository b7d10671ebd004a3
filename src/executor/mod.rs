//! Driver executable invocation
//!
//! Each [`Device`] wraps one external driver program and the hardware it
//! talks to. Runs are serialized per device: a second request waits until
//! the previous process has exited.

mod invocation;

pub use invocation::{ExecutionResult, Invocation};

use crate::command::Command;
use crate::error::{BridgeError, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

/// A driver executable and the exclusive hardware session it owns
#[derive(Debug)]
pub struct Device {
    /// Label used in logs (e.g. "FPGA", "CPU")
    name: String,
    /// Driver executable
    program: PathBuf,
    /// Held for the whole lifetime of a driver process
    session: Arc<Mutex<()>>,
}

impl Device {
    /// Create a new device
    pub fn new(name: impl Into<String>, program: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            session: Arc::new(Mutex::new(())),
        }
    }

    /// Device label
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Driver executable path
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Build the invocation for a validated command
    pub fn invocation(&self, command: &Command) -> Invocation {
        Invocation::new(&self.program, command)
    }

    /// Build the invocation for `command` and run it
    pub async fn execute(&self, command: &Command) -> Result<ExecutionResult> {
        let invocation = self.invocation(command);
        self.invoke(&invocation).await
    }

    /// Run the executable once and capture its output
    ///
    /// Never retried: a run may already have driven the hardware. The process
    /// runs in its own task so it completes, and keeps the session locked,
    /// even if the caller goes away.
    pub async fn invoke(&self, invocation: &Invocation) -> Result<ExecutionResult> {
        let guard = self.session.clone().lock_owned().await;
        debug!("{} session acquired", self.name);

        info!("Executing: {}", invocation);

        let mut cmd = tokio::process::Command::new(invocation.program());
        cmd.args(invocation.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let program = invocation.program().display().to_string();
        let run = tokio::spawn(async move {
            let output = cmd.output().await;
            drop(guard);
            output
        });

        let output = run
            .await
            .map_err(|e| BridgeError::Spawn {
                program: program.clone(),
                reason: format!("invocation task failed: {}", e),
            })?
            .map_err(|e| {
                error!("Failed to start {}: {}", program, e);
                BridgeError::Spawn {
                    program: program.clone(),
                    reason: e.to_string(),
                }
            })?;

        let result = ExecutionResult::from_output(output);
        if result.is_success() {
            info!("{} -> {}", self.name, result.stdout.trim());
        } else {
            error!(
                "{} run failed (exit status {}): {}",
                self.name,
                result.exit_status,
                result.stderr.trim()
            );
        }

        Ok(result)
    }
}
