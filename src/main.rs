use anyhow::{Context, Result};
use clap::Parser;
use prompt_recorder::{create_router, AppState, Config};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Browser voice-prompt recorder
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Config file (without extension)
    #[arg(short, long, default_value = "config/prompt-recorder")]
    config: String,

    /// Port to listen on; overrides config and PORT
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut cfg = Config::load(&args.config)?;
    if let Some(port) = args.port {
        cfg.service.http.port = port;
    }

    info!("Prompt Recorder v{}", env!("CARGO_PKG_VERSION"));
    info!("Loaded config: {}", cfg.service.name);
    info!("Uploads directory: {}", cfg.storage.uploads_path.display());
    info!("Prompts file: {}", cfg.prompts.path.display());

    tokio::fs::create_dir_all(&cfg.storage.uploads_path)
        .await
        .with_context(|| {
            format!(
                "Failed to create uploads directory {}",
                cfg.storage.uploads_path.display()
            )
        })?;

    let state = AppState::from_config(&cfg);
    let app = create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Shut down");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
