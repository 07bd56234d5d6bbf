//! Startup helpers for the masthead server.

use std::future::Future;
use std::process::ExitCode;

use crate::server::{self, AppState};

/// Run the server (used by the `masthead-server` binary).
///
/// # Returns
/// `ExitCode::SUCCESS` on graceful shutdown, `1` on failure.
#[must_use]
pub fn run() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting Masthead v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::from_env();
    let port = get_port();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create runtime: {e}");
            return ExitCode::from(1);
        }
    };

    if let Err(e) = rt.block_on(server::run_server_with_shutdown(state, port, ctrl_c())) {
        tracing::error!("Server error: {e}");
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

/// Resolve the listen port from `MASTHEAD_PORT`.
fn get_port() -> u16 {
    std::env::var("MASTHEAD_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(server::DEFAULT_PORT)
}

/// Resolves once ctrl-c is received.
fn ctrl_c() -> impl Future<Output = ()> + Send + 'static {
    async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {e}");
        }
    }
}
