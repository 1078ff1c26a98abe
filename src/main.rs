//! Exec-dir MCP - command execution server scoped to whitelisted directories

use anyhow::Result;
use clap::Parser;
use rmcp::ServiceExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use exec_dir_mcp::cli::Cli;
use exec_dir_mcp::ExecDirServer;

/// Logging goes to stderr because stdout carries the MCP protocol.
/// `RUST_LOG` adjusts the filter; `LOG_FORMAT=json` switches to JSON.
fn init_tracing() -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive("exec_dir_mcp=info".parse()?);

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

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let config = Cli::parse().into_config()?;
    tracing::info!(
        "starting exec-dir MCP server, default directory: {}",
        config.default_dir.display()
    );
    if config.unrestricted() {
        tracing::info!("no allow-list configured, all directories are permitted");
    } else {
        tracing::info!("allowed directories: {:?}", config.allowed_dirs);
    }

    let server = ExecDirServer::new(config);
    let service = server.serve(rmcp::transport::stdio()).await?;

    tracing::info!("server running, waiting for requests...");

    service.waiting().await?;

    tracing::info!("server shutting down");
    Ok(())
}
