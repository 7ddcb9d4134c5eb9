//! Tool handlers
//!
//! Validation happens before anything runs; reconciliations for the same
//! service are serialized through [`ServiceLocks`].

use mcp_common::{internal_error, invalid_params, json_success, text_success, CallToolResult, McpError};

use crate::backend::StateLister;
use crate::locks::ServiceLocks;
use crate::params::ReconcileServiceParams;
use crate::pmm::{PmmAdminCli, PmmError};
use crate::reconcile::Reconciler;

fn pmm_error_to_mcp(err: PmmError) -> McpError {
    if err.is_validation() {
        invalid_params(err.to_string())
    } else {
        internal_error(err.to_string())
    }
}

pub async fn reconcile_service(
    cli: &PmmAdminCli,
    locks: &ServiceLocks,
    params: ReconcileServiceParams,
) -> Result<CallToolResult, McpError> {
    let spec = params.to_spec().map_err(pmm_error_to_mcp)?;
    let check_mode = params.check_mode.unwrap_or(false);

    let _guard = locks.acquire(&spec.service_name).await;

    let result = Reconciler::from_cli(cli.clone())
        .with_check_mode(check_mode)
        .reconcile(&spec)
        .await
        .map_err(pmm_error_to_mcp)?;

    json_success(&result.mask_secrets(&spec.secrets()))
}

pub async fn list_services(cli: &PmmAdminCli) -> Result<CallToolResult, McpError> {
    let listing = cli.list_current().await.map_err(pmm_error_to_mcp)?;
    Ok(text_success(listing.into_string()))
}
