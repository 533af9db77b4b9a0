use anyhow::{Context, Result};
use clap::Parser;
use speaker_sessions::{create_router, AppState, Config, SystemClock};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(name = "speaker-sessions")]
#[command(about = "Speaker identity mapping service with session-scoped overrides")]
struct Args {
    /// Path to the configuration file (without extension)
    #[arg(short, long, default_value = "config/speaker-sessions")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config))?;

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));

    let clock = Arc::new(SystemClock);
    let state = AppState::new(clock);

    // Sweep idle session mirrors so the privacy timeout holds server-side
    // even when a tab never sends an explicit clear.
    let prune_timeout = cfg.session.timeouts().timeout;
    let prune_interval = Duration::from_secs(cfg.session.tick_interval_secs);
    let overrides = state.overrides.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(prune_interval);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            overrides.prune_expired(prune_timeout).await;
        }
    });

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);

    let shutdown_overrides = state.overrides.clone();
    let app = create_router(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("shutdown signal received");
                // Best-effort wipe of session-scoped data before exit.
                shutdown_overrides.clear_all().await;
            }
        })
        .await
        .context("HTTP server error")?;

    Ok(())
}
