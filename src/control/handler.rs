//! Request pipeline
//!
//! Each request runs Received → Validated → Invoked → Responded once, with
//! no retries. Nothing is shared between requests except the devices, whose
//! sessions are serialized.

use crate::command::Command;
use crate::config::Config;
use crate::control::{ApiError, CalcRequest, SendRequest};
use crate::executor::{Device, ExecutionResult};
use tracing::{debug, warn};

/// Runs validated commands against the configured devices
#[derive(Debug)]
pub struct CommandHandler {
    /// FPGA LED driver behind `/send`
    led: Device,
    /// CPU UART driver behind `/calc`
    cpu: Device,
}

impl CommandHandler {
    /// Create a new command handler
    pub fn new(led: Device, cpu: Device) -> Self {
        Self { led, cpu }
    }

    /// Build devices from configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Device::new("FPGA", &config.led.program),
            Device::new("CPU", &config.cpu.program),
        )
    }

    /// Handle a `/send` body, returning the driver's stdout verbatim
    pub async fn handle_send(&self, body: &[u8]) -> Result<String, ApiError> {
        let request = SendRequest::from_slice(body).map_err(|e| {
            warn!("Rejected /send payload: {:?}", e);
            e
        })?;

        let command = Command::validate_bits(request.bits.as_ref()).map_err(|e| {
            debug!("Rejected bit string {:?}: {}", request.bits, e);
            ApiError::from(e)
        })?;

        let result = self.run(&self.led, &command).await?;
        Ok(result.stdout)
    }

    /// Handle a `/calc` body, returning the trimmed driver stdout
    pub async fn handle_calc(&self, body: &[u8]) -> Result<String, ApiError> {
        let request = CalcRequest::from_slice(body).map_err(|e| {
            warn!("Rejected /calc payload: {:?}", e);
            e
        })?;

        let command = Command::validate_opcode(
            request.opcode.as_ref(),
            request.a.as_ref(),
            request.b.as_ref(),
        )
        .map_err(|e| {
            debug!("Rejected opcode command: {}", e);
            ApiError::from(e)
        })?;

        let result = self.run(&self.cpu, &command).await?;
        Ok(result.stdout.trim().to_string())
    }

    /// Invoke once and classify the outcome
    async fn run(&self, device: &Device, command: &Command) -> Result<ExecutionResult, ApiError> {
        let result = device.execute(command).await.map_err(ApiError::from)?;

        if !result.is_success() {
            return Err(ApiError::ExecutableRuntime {
                exit_status: result.exit_status,
                stderr: result.stderr,
            });
        }

        Ok(result)
    }
}
