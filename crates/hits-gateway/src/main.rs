//! hits gateway binary.
//!
//! - Serves `GET /{path}.preview` hit-counter badges
//! - Config from `HITS_CONFIG` (default `hits.yaml`, optional)
//! - Graceful shutdown on Ctrl+C / SIGTERM, then drains the preview worker

use std::net::SocketAddr;
use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hits_core::error::{HitsError, Result};
use hits_gateway::{app_state::AppState, config, router};

const DEFAULT_CONFIG_PATH: &str = "hits.yaml";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "hits-gateway failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    // An explicit path must exist; the default one is optional.
    let cfg = match std::env::var("HITS_CONFIG") {
        Ok(path) => config::load_from_file(&path)?,
        Err(_) => config::load_or_default(DEFAULT_CONFIG_PATH)?,
    };
    let listen: SocketAddr = cfg
        .gateway
        .listen
        .parse()
        .map_err(|e| HitsError::BadRequest(format!("gateway.listen: {e}")))?;

    let state = AppState::with_default_renderer(cfg)?;
    let app = router::build_router(state.clone());

    tracing::info!(%listen, "hits-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| HitsError::Internal(format!("failed to bind {listen}: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| HitsError::Internal(format!("server failed: {e}")))?;

    state.shutdown().await;
    tracing::info!("hits-gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
}
