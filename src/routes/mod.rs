//! Router assembly: story API, picture media, static front-end, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::ServerConfig;
use crate::state::AppState;

pub mod auth;
pub mod http;

/// Build the application router with:
/// - JSON API under `/api/v1/...`
/// - Picture files under the media URL prefix, served from the media directory
/// - Static front-end from the static directory with index fallback
/// - CORS (allow any origin/method/headers); tighten for production if needed
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>, cfg: &ServerConfig) -> Router {
    let static_service = ServeDir::new(&cfg.static_dir)
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new(format!("{}/index.html", cfg.static_dir.trim_end_matches('/'))));

    let mut api = Router::new()
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/assignments/:assignment", get(http::http_get_assignment))
        .route("/api/v1/assignments/:assignment/story", post(http::http_post_story))
        .route("/api/v1/stories/:id", get(http::http_get_story));

    // axum cannot nest at "/"; a root media URL is then served by the static fallback.
    let media_prefix = cfg.media_url.trim_matches('/');
    if !media_prefix.is_empty() {
        api = api.nest_service(&format!("/{media_prefix}"), ServeDir::new(&cfg.media_dir));
    }

    api.with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .fallback_service(static_service)
}
