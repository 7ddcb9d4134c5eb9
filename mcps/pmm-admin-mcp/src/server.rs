//! MCP Server exposing idempotent pmm-admin registration as tools
//!
//! Handler implementations are in the handlers module.

use mcp_common::{CallToolResult, McpError};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};

use crate::config::Config;
use crate::handlers;
use crate::locks::ServiceLocks;
use crate::params::*;
use crate::pmm::PmmAdminCli;

/// The pmm-admin MCP Server
#[derive(Clone)]
pub struct PmmAdminMcpServer {
    cli: PmmAdminCli,
    locks: ServiceLocks,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl PmmAdminMcpServer {
    /// Create a new server, loading config from standard locations
    pub fn new() -> Self {
        Self::with_config(&Config::load())
    }

    /// Create a new server with explicit config
    pub fn with_config(config: &Config) -> Self {
        Self {
            cli: PmmAdminCli::new(config),
            locks: ServiceLocks::new(),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Ensure a database service is registered (state=present) or unregistered (state=absent) in PMM. Idempotent: runs pmm-admin add/remove only when the current listing does not already match. Set check_mode=true to preview the command without running it."
    )]
    async fn pmm_service_reconcile(
        &self,
        Parameters(params): Parameters<ReconcileServiceParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::reconcile_service(&self.cli, &self.locks, params).await
    }

    #[tool(description = "Show the raw pmm-admin listing of currently registered services")]
    async fn pmm_list_services(&self) -> Result<CallToolResult, McpError> {
        handlers::list_services(&self.cli).await
    }
}

#[tool_handler]
impl rmcp::ServerHandler for PmmAdminMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "PMM service registration via pmm-admin. \
                 Reconcile tools compare the current listing with the desired state \
                 and only add or remove services when needed. \
                 Credentials are masked in every response."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

impl Default for PmmAdminMcpServer {
    fn default() -> Self {
        Self::new()
    }
}
