//! Tracing setup and the `serve_stdio!` macro

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing for an MCP server at `info` level for `crate_name`
///
/// Logs always go to stderr: stdout carries the MCP protocol.
/// Set `LOG_FORMAT=json` for structured JSON output.
pub fn init_tracing(crate_name: &str) -> anyhow::Result<()> {
    init_tracing_at(crate_name, "info")
}

/// Initialize tracing with an explicit default level for `crate_name`
///
/// `RUST_LOG` directives for other targets are kept; the `crate_name`
/// directive always uses `level`.
pub fn init_tracing_at(crate_name: &str, level: &str) -> anyhow::Result<()> {
    let directive = format!("{}={}", crate_name, level);
    let filter = EnvFilter::from_default_env().add_directive(directive.parse()?);

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .init();
    }

    Ok(())
}

/// Generate a `#[tokio::main]` entry point serving `$server_type` over stdio
///
/// The server type must provide `new()`. Tracing is initialized first, then
/// the server runs until the client disconnects.
///
/// ```rust,ignore
/// mcp_common::serve_stdio!(PmmAdminMcpServer, "pmm_admin_mcp");
/// ```
#[macro_export]
macro_rules! serve_stdio {
    ($server_type:ty, $crate_name:expr) => {
        #[tokio::main]
        async fn main() -> anyhow::Result<()> {
            use rmcp::ServiceExt;

            $crate::init_tracing($crate_name)?;

            tracing::info!(concat!("Starting ", $crate_name, " MCP Server"));

            let server = <$server_type>::new();
            let service = server.serve(rmcp::transport::stdio()).await?;

            tracing::info!("Server running, waiting for requests...");

            service.waiting().await?;

            tracing::info!("Server shutting down");
            Ok(())
        }
    };
}
