//! pmm-reconcile - command line front end
//!
//! Exit codes: 0 on success, 1 when pmm-admin add/remove failed,
//! 2 when the input was invalid or pmm-admin could not be run.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use pmm_admin_mcp::cli::{verbosity_level, Cli, Commands};
use pmm_admin_mcp::{Config, PmmAdminCli, Reconciler, StateLister};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = mcp_common::init_tracing_at("pmm_admin_mcp", verbosity_level(cli.verbose)) {
        eprintln!("warning: failed to initialize logging: {}", e);
    }

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load(),
    };
    if let Some(binary) = cli.pmm_admin {
        config.pmm_admin.binary = binary;
    }

    let timeout = config.timeouts.resolve(cli.timeout);
    let pmm = PmmAdminCli::new(&config).with_timeout(Duration::from_secs(timeout));

    match cli.command {
        Commands::Apply(args) => {
            let params = args.into_params();
            let spec = params.to_spec()?;
            let check_mode = params.check_mode.unwrap_or(false);

            let result = Reconciler::from_cli(pmm)
                .with_check_mode(check_mode)
                .reconcile(&spec)
                .await?
                .mask_secrets(&spec.secrets());

            let json = serde_json::to_string_pretty(&result)
                .context("failed to serialize result")?;
            println!("{}", json);

            Ok(if result.succeeded {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            })
        }
        Commands::List => {
            let listing = pmm.list_current().await?;
            print!("{}", listing.as_str());
            Ok(ExitCode::SUCCESS)
        }
    }
}
