//! Startup helpers for the Echo agent server.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::chat::{ChatConfig, ChatResult};
use crate::server::{self, AppState};

/// Default directory for the chat UI.
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Run the server (used by the `echo-server` binary).
///
/// # Returns
/// `ExitCode::SUCCESS` on graceful shutdown, `1` on failure.
#[must_use]
pub fn run() -> ExitCode {
    init_tracing();

    tracing::info!("Starting Echo Agent v{}", env!("CARGO_PKG_VERSION"));

    match serve() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Echo agent failed: {e}");
            ExitCode::from(1)
        }
    }
}

/// Build state and a runtime, then block on the server until shutdown.
fn serve() -> ChatResult<()> {
    let state = initialize()?;
    let port = get_port();
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(server::run_server(state, port))
}

/// Install the global `tracing` subscriber. `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Initialize application state without starting the server.
///
/// # Errors
/// Returns an error if the configuration is invalid.
pub fn initialize() -> ChatResult<Arc<AppState>> {
    let config = ChatConfig::from_env();
    let static_dir = get_static_dir();
    tracing::info!("Agent name: {}", config.agent_name);
    tracing::info!("Serving UI from {}", static_dir.display());

    AppState::new(&config, static_dir)
}

/// Get configured server port.
#[must_use]
pub fn get_port() -> u16 {
    std::env::var("ECHO_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(server::DEFAULT_PORT)
}

/// Get configured UI directory.
#[must_use]
pub fn get_static_dir() -> PathBuf {
    std::env::var("ECHO_STATIC_DIR")
        .ok()
        .filter(|dir| !dir.trim().is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR), PathBuf::from)
}
