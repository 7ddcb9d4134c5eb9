//! Seams between the reconciler and the outside world
//!
//! [`crate::pmm::PmmAdminCli`] implements both traits against the real
//! binary; tests substitute an in-memory daemon.

use async_trait::async_trait;

use crate::pmm::command::PmmCommand;
use crate::pmm::error::PmmResult;
use crate::types::{ExecutionOutcome, RegistrationListing};

/// Read-only probe of what pmm-admin currently tracks
#[async_trait]
pub trait StateLister: Send + Sync {
    /// Fetch a fresh listing. Fails with `PmmError::ListingFailed` when the
    /// listing command cannot run or exits non-zero.
    async fn list_current(&self) -> PmmResult<RegistrationListing>;
}

/// Runs converging commands
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run `command` to completion and capture its output.
    ///
    /// A non-zero exit is reported in the outcome, not as an error. Errors
    /// mean the process could not be run at all (`PmmError::ExecutionFailed`).
    async fn execute(&self, command: &PmmCommand) -> PmmResult<ExecutionOutcome>;
}
