//! pmm-admin MCP Library
//!
//! Declarative registration of monitored databases with PMM through the
//! `pmm-admin` CLI. A caller describes the desired state of one service;
//! the [`Reconciler`] checks the current listing and runs `pmm-admin add`
//! or `pmm-admin remove` only when something has to change.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use pmm_admin_mcp::{Config, PmmAdminCli, Reconciler, ServiceSpec};
//! use pmm_admin_mcp::types::{DatabaseKind, DesiredState};
//!
//! let spec = ServiceSpec::new(DatabaseKind::Mysql, "db1-svc", DesiredState::Present)
//!     .with_hostname("db1")
//!     .with_port(3306);
//!
//! let cli = PmmAdminCli::new(&Config::load());
//! let result = Reconciler::from_cli(cli).reconcile(&spec).await?;
//! println!("changed: {}", result.changed);
//! ```
//!
//! # Binaries
//! - `pmm-admin-mcp`: MCP server over stdio
//! - `pmm-reconcile`: command line front end
//!
//! # Requirements
//! - `pmm-admin` installed and connected to a PMM server

pub mod backend;
pub mod cli;
pub mod config;
pub mod handlers;
pub mod locks;
pub mod membership;
pub mod params;
pub mod pmm;
pub mod reconcile;
pub mod redact;
pub mod server;
pub mod types;

pub use backend::{CommandExecutor, StateLister};
pub use config::Config;
pub use membership::is_satisfied;
pub use pmm::{PmmAdminCli, PmmCommand, PmmError, PmmResult};
pub use reconcile::Reconciler;
pub use server::PmmAdminMcpServer;
pub use types::{ReconciliationResult, ServiceSpec};

// Re-export parameter types for direct API usage
pub use params::*;
