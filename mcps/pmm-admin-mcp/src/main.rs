//! pmm-admin MCP Server
//!
//! Exposes idempotent PMM service registration as MCP tools over stdio.
//!
//! # Requirements
//! - `pmm-admin` installed and connected to a PMM server

use pmm_admin_mcp::PmmAdminMcpServer;

mcp_common::serve_stdio!(PmmAdminMcpServer, "pmm_admin_mcp");
