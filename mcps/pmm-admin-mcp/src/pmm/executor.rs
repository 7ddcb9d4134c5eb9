//! Async executor for pmm-admin CLI commands
//!
//! Every invocation spawns the configured binary directly with an argument
//! vector (no shell), captures both output streams, and is bounded by a
//! timeout. The child is killed if the timeout fires.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error, instrument};

use super::command::PmmCommand;
use super::error::{PmmError, PmmResult, ProcessError};
use crate::backend::{CommandExecutor, StateLister};
use crate::config::Config;
use crate::types::{ExecutionOutcome, RegistrationListing};

/// The real pmm-admin binary
#[derive(Debug, Clone)]
pub struct PmmAdminCli {
    binary: String,
    list_args: Vec<String>,
    timeout: Duration,
}

impl PmmAdminCli {
    pub fn new(config: &Config) -> Self {
        Self {
            binary: config.pmm_admin.binary.clone(),
            list_args: config.pmm_admin.list_args.clone(),
            timeout: Duration::from_secs(config.timeouts.resolve(None)),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Spawn the binary with `args` and wait for it, bounded by the timeout
    async fn run(&self, args: &[String]) -> Result<ExecutionOutcome, ProcessError> {
        let child = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ProcessError::NotFound {
                        program: self.binary.clone(),
                    }
                } else {
                    ProcessError::Io {
                        program: self.binary.clone(),
                        source: e,
                    }
                }
            })?;

        match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => Ok(ExecutionOutcome {
                exit_code: output.status.code().unwrap_or(-1),
                stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            }),
            Ok(Err(e)) => Err(ProcessError::Io {
                program: self.binary.clone(),
                source: e,
            }),
            // The child future was dropped, which kills the process
            Err(_elapsed) => Err(ProcessError::Timeout {
                program: self.binary.clone(),
                secs: self.timeout.as_secs(),
            }),
        }
    }
}

#[async_trait]
impl StateLister for PmmAdminCli {
    #[instrument(skip(self), fields(binary = %self.binary))]
    async fn list_current(&self) -> PmmResult<RegistrationListing> {
        debug!("listing: {} {}", self.binary, self.list_args.join(" "));

        let outcome = self
            .run(&self.list_args)
            .await
            .map_err(PmmError::ListingFailed)?;

        if !outcome.success() {
            error!(code = outcome.exit_code, stderr = %outcome.stderr, "pmm-admin listing failed");
            return Err(PmmError::ListingFailed(ProcessError::NonZeroExit {
                program: self.binary.clone(),
                code: outcome.exit_code,
                stderr: outcome.stderr.trim().to_string(),
            }));
        }

        Ok(RegistrationListing::new(outcome.stdout))
    }
}

#[async_trait]
impl CommandExecutor for PmmAdminCli {
    #[instrument(skip(self, command), fields(cmd = %command))]
    async fn execute(&self, command: &PmmCommand) -> PmmResult<ExecutionOutcome> {
        debug!("executing: {}", command);

        let outcome = self
            .run(command.args())
            .await
            .map_err(PmmError::ExecutionFailed)?;

        debug!(exit_code = outcome.exit_code, "pmm-admin finished");
        Ok(outcome)
    }
}
