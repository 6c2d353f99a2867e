// src/main.rs
// commontrace-mcp - MCP frontend for the CommonTrace knowledge-sharing API

use anyhow::Result;
use clap::{Parser, Subcommand};
use commontrace::client::TraceApiClient;
use commontrace::config::{Settings, Transport};
use commontrace::mcp::{self, TraceServer};
use std::sync::Arc;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "commontrace-mcp")]
#[command(about = "MCP server for the CommonTrace community knowledge-sharing API")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the MCP server (default) on the configured transport
    Serve,

    /// Validate configuration and print a report
    Check,
}

async fn run_stdio(settings: Settings) -> Result<()> {
    let client = Arc::new(TraceApiClient::new(&settings));
    let server = TraceServer::new(client);

    let transport = rmcp::transport::io::stdio();
    let service = rmcp::serve_server(server, transport).await?;
    service.waiting().await?;

    Ok(())
}

async fn run_http(settings: Settings) -> Result<()> {
    let client = Arc::new(TraceApiClient::new(&settings));
    let service = mcp::http::create_mcp_service(client);

    let app = axum::Router::new().nest_service("/mcp", service);
    let addr = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("CommonTrace MCP (streamable HTTP) listening on http://{}/mcp", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env from current directory if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Quiet on stdio so the protocol stream stays clean
    let serving_stdio = matches!(cli.command, None | Some(Commands::Serve))
        && !std::env::var("COMMONTRACE_MCP_TRANSPORT")
            .map(|t| t.eq_ignore_ascii_case("http"))
            .unwrap_or(false);
    let log_level = if serving_stdio { Level::WARN } else { Level::INFO };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let settings = Settings::from_env();
    let validation = settings.validate();

    match cli.command {
        Some(Commands::Check) => {
            println!("{}", validation.report());
            if !validation.is_valid() {
                std::process::exit(1);
            }
            Ok(())
        }
        None | Some(Commands::Serve) => {
            if !validation.is_valid() {
                anyhow::bail!("invalid configuration:\n{}", validation.report());
            }
            for warning in &validation.warnings {
                warn!("{}", warning);
            }

            match settings.transport {
                Transport::Stdio => run_stdio(settings).await,
                Transport::Http => run_http(settings).await,
            }
        }
    }
}
