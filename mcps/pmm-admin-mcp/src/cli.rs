//! CLI argument definitions for `pmm-reconcile`

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::params::ReconcileServiceParams;

#[derive(Parser)]
#[command(name = "pmm-reconcile")]
#[command(about = "Idempotently register or unregister database services with PMM via pmm-admin")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: searched in standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// pmm-admin binary to run (overrides config)
    #[arg(long, env = "PMM_ADMIN_BIN", global = true)]
    pub pmm_admin: Option<String>,

    /// Timeout per pmm-admin invocation in seconds (clamped to config max)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace). Default is warn.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Converge one service to the desired state and print the result as JSON
    Apply(ApplyArgs),
    /// Print the current pmm-admin listing
    List,
}

#[derive(Args)]
pub struct ApplyArgs {
    /// Desired state: present or absent
    #[arg(long)]
    pub state: String,

    /// Database kind: mysql, mongodb, postgresql or proxysql
    #[arg(long)]
    pub database: String,

    /// Service name in PMM
    #[arg(long)]
    pub service_name: String,

    /// Database hostname (required for present)
    #[arg(long)]
    pub hostname: Option<String>,

    /// Database username
    #[arg(long, env = "PMM_DB_USERNAME", hide_env_values = true)]
    pub username: Option<String>,

    /// Database password
    #[arg(long, env = "PMM_DB_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Database port
    #[arg(long)]
    pub port: Option<u16>,

    /// Environment name
    #[arg(long)]
    pub environment: Option<String>,

    /// Cluster name
    #[arg(long)]
    pub cluster: Option<String>,

    /// Replication set name
    #[arg(long)]
    pub replication_set: Option<String>,

    /// Metrics flow mode: push or pull
    #[arg(long)]
    pub metrics_mode: Option<String>,

    /// Connect to the database over TLS
    #[arg(long)]
    pub tls: bool,

    /// Report what would change without running pmm-admin add/remove
    #[arg(long)]
    pub check: bool,
}

impl ApplyArgs {
    pub fn into_params(self) -> ReconcileServiceParams {
        ReconcileServiceParams {
            state: self.state,
            database: self.database,
            service_name: self.service_name,
            hostname: self.hostname,
            username: self.username,
            password: self.password,
            port: self.port,
            environment: self.environment,
            cluster: self.cluster,
            replication_set: self.replication_set,
            metrics_mode: self.metrics_mode,
            tls: Some(self.tls),
            check_mode: Some(self.check),
        }
    }
}

/// Map `-v` occurrences to a tracing level
pub fn verbosity_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
