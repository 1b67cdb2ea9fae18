use std::time::Duration;

use anyhow::Result;
use bitewise::routes::AppState;
use bitewise_api::ApiClient;
use bitewise_plan::Planner;
use clap::{Parser, Subcommand};
use tower_http::trace::TraceLayer;

/// bitewise - recipe discovery and weekly meal planning
#[derive(Parser)]
#[command(name = "bitewise")]
#[command(about = "Recipe discovery and weekly meal planning", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = bitewise::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    // Initialize observability (tracing + logging)
    bitewise::observability::init_observability(
        "bitewise",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => serve_command(config, host, port).await,
    }
}

#[tracing::instrument(skip(config))]
async fn serve_command(
    config: bitewise::config::Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    tracing::info!("Starting bitewise server...");

    // Use CLI overrides if provided, otherwise use config
    let host = host_override.unwrap_or_else(|| config.server.host.clone());
    let port = port_override.unwrap_or(config.server.port);

    // One client for the remote API, shared by every handler
    let api = ApiClient::new(
        &config.api.base_url,
        Duration::from_secs(config.api.timeout_secs),
        Duration::from_secs(config.api.connect_timeout_secs),
    )
    .map_err(|e| anyhow::anyhow!("API client setup failed: {e}"))?;

    tracing::info!(base_url = %config.api.base_url, "Remote API client ready");

    let state = AppState {
        api: api.clone(),
        planner: Planner::new(api),
        config,
    };

    let app = bitewise::create_app(state)
        // Minify HTML responses in release builds
        .layer(axum::middleware::map_response(
            bitewise::middleware::minify_html_middleware,
        ))
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Graceful shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "Failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }

    tracing::info!("Starting graceful shutdown...");
}
