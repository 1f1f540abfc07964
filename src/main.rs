//! Lecture Dash · game host
//!
//! - Axum HTTP + WebSocket API over the game core
//! - Static SPA fallback (`static_dir`/index.html)
//!
//! Important env variables:
//!   PORT             : u16 (default 3000, overrides the config file)
//!   GAME_CONFIG_PATH : path to TOML config (port, static_dir, feedback_delay_ms, max_question_count)
//!   LOG_LEVEL        : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT       : "pretty" (default) or "json"

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use lecture_dash::config::load_server_config_from_env;
use lecture_dash::routes::build_router;
use lecture_dash::state::AppState;
use lecture_dash::telemetry;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let config = load_server_config_from_env()
    .unwrap_or_default()
    .apply_env_overrides();
  let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

  let state = Arc::new(AppState::new(config));
  let app = build_router(state.clone());

  let listener = TcpListener::bind(addr).await?;
  info!(target: "lecture_dash", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  info!(target: "lecture_dash", sessions = state.session_count().await, "Server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "lecture_dash", error = %e, "Failed to listen for Ctrl-C");
    std::future::pending::<()>().await;
  }
  info!(target: "lecture_dash", "Shutdown requested");
}
