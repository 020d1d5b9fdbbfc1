//! Captioner · Picture Story Backend
//!
//! - Axum HTTP API for submitting and viewing short stories about pictures
//! - Stories are validated against per-assignment length bounds and
//!   per-picture keywords before they are stored
//! - Static front-end fallback (./static/index.html) and picture media
//!
//! Important env variables:
//!   PORT          : u16 (default 3000)
//!   CATALOG_PATH  : path to TOML catalog (assignments, pictures, keywords)
//!   STATIC_DIR    : front-end directory (default "./static")
//!   MEDIA_DIR     : picture files (default "./media")
//!   MEDIA_URL     : URL prefix for pictures (default "/media/")
//!   LOG_LEVEL     : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT    : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod config;
mod seeds;
mod validation;
mod form;
mod error;
mod state;
mod protocol;
mod routes;

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServerConfig;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let cfg = ServerConfig::from_env();

  // Catalog (from TOML or seeds) + empty story store.
  let state = Arc::new(AppState::new(&cfg));

  let app = build_router(state, &cfg);

  let addr = cfg.addr();
  let listener = TcpListener::bind(addr).await?;
  info!(target: "captioner_backend", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  info!(target: "captioner_backend", "HTTP server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "captioner_backend", error = %e, "Failed to listen for Ctrl-C");
    std::future::pending::<()>().await;
  }
}
