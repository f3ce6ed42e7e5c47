use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use spacetraveling_cms::{Client, HttpContentApi};
use spacetraveling_site::{build_router, build_site, middleware, AppConfig, AppState};
use tracing_subscriber::EnvFilter;

/// spacetraveling - blog pages from the content API.
#[derive(Parser, Debug)]
#[command(name = "spacetraveling")]
#[command(about = "Pre-render and serve the spacetraveling blog", long_about = None)]
struct Cli {
    /// Path to .env file (optional).
    #[arg(long, env = "DOTENV_PATH", default_value = ".env")]
    dotenv: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve pre-rendered pages, rendering missing posts on demand.
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Pre-render post pages into the output directory.
    Build {
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load .env file if present (dev convenience)
    if std::path::Path::new(&cli.dotenv).exists() {
        dotenvy::from_path(&cli.dotenv)?;
    }

    let mut config = AppConfig::from_env()
        .map_err(|e| anyhow::anyhow!("Failed to load config: {e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    let api = HttpContentApi::new(&config.api_endpoint, config.access_token.clone())
        .map_err(|e| anyhow::anyhow!("Failed to create content API client: {e}"))?;
    let client = Client::new(Arc::new(api));

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            serve(client, config).await
        }
        Command::Build { out_dir } => {
            if let Some(out_dir) = out_dir {
                config.out_dir = out_dir;
            }
            let report = build_site(&client, &config.out_dir, config.prerender_page_size).await?;
            if !report.failed.is_empty() {
                tracing::warn!(failed = ?report.failed, "some posts were not pre-rendered");
            }
            Ok(())
        }
    }
}

async fn serve(client: Client, config: AppConfig) -> anyhow::Result<()> {
    tracing::info!(endpoint = %config.api_endpoint, "Starting spacetraveling server");

    let addr = config.addr();
    let state = AppState::new(client, config);

    let app = build_router(state).layer(middleware::request_tracing::trace_layer());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => { tracing::info!("Received Ctrl+C, shutting down..."); }
        _ = terminate => { tracing::info!("Received SIGTERM, shutting down..."); }
    }
}
