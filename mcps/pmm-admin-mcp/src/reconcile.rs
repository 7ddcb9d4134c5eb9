//! Idempotent reconciliation of one service against pmm-admin
//!
//! Each call runs strictly in sequence:
//!
//! 1. validate the service description
//! 2. fetch a fresh listing and check membership
//! 3. stop if already satisfied, otherwise build the converging command
//! 4. execute it (skipped in check mode) and classify the exit code
//!
//! Listings are never cached. Two concurrent calls for the same service may
//! both decide to act; callers that need at-most-once semantics must
//! serialize by service name (see [`crate::locks::ServiceLocks`]).

use tracing::{info, instrument, warn};

use crate::backend::{CommandExecutor, StateLister};
use crate::membership::is_satisfied;
use crate::pmm::{PmmAdminCli, PmmCommand, PmmResult};
use crate::redact::mask_secrets;
use crate::types::{ReconciliationResult, ServiceSpec};

pub struct Reconciler<L, E> {
    lister: L,
    executor: E,
    check_mode: bool,
}

impl<L: StateLister, E: CommandExecutor> Reconciler<L, E> {
    pub fn new(lister: L, executor: E) -> Self {
        Self {
            lister,
            executor,
            check_mode: false,
        }
    }

    /// Plan but never execute converging commands
    pub fn with_check_mode(mut self, check_mode: bool) -> Self {
        self.check_mode = check_mode;
        self
    }

    /// Converge pmm-admin towards `spec`
    ///
    /// # Errors
    ///
    /// - `Validation` before anything runs
    /// - `ListingFailed` before any membership decision
    /// - `ExecutionFailed` if the converging command could not run at all
    ///
    /// A converging command that exits non-zero is not an error: the result
    /// comes back with `succeeded == false` and the captured stderr.
    #[instrument(
        skip(self, spec),
        fields(service = %spec.service_name, state = %spec.desired_state, check_mode = self.check_mode)
    )]
    pub async fn reconcile(&self, spec: &ServiceSpec) -> PmmResult<ReconciliationResult> {
        spec.validate()?;

        let listing = self.lister.list_current().await?;
        let satisfied = is_satisfied(
            spec.desired_state,
            spec.hostname.as_deref(),
            &spec.service_name,
            &listing,
        )?;
        drop(listing);

        if satisfied {
            info!("already {}, nothing to do", spec.desired_state);
            return Ok(ReconciliationResult::unchanged());
        }

        let command = PmmCommand::build(spec);

        if self.check_mode {
            info!(cmd = %command, "check mode, not executing");
            return Ok(ReconciliationResult::planned(command));
        }

        let outcome = self.executor.execute(&command).await?;
        if outcome.success() {
            info!(cmd = %command, "service converged to {}", spec.desired_state);
        } else {
            warn!(
                cmd = %command,
                exit_code = outcome.exit_code,
                stderr = %mask_secrets(outcome.stderr.trim(), &spec.secrets()),
                "pmm-admin command failed"
            );
        }

        Ok(ReconciliationResult::from_execution(command, outcome))
    }
}

impl Reconciler<PmmAdminCli, PmmAdminCli> {
    /// Reconciler backed by the real binary for both listing and execution
    pub fn from_cli(cli: PmmAdminCli) -> Self {
        Self::new(cli.clone(), cli)
    }
}
