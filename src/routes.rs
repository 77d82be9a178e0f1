//! Top-level router.
//!
//! # Route Structure
//!
//! - `GET  /{code}`            - Short link redirect
//! - `GET  /health`, `/healthz` - Storage and cache checks
//! - `/api/*`                  - JSON API, see [`crate::api::routes`]
//!
//! `api`, `health` and `healthz` are never issued as short codes, so the
//! catch-all redirect route cannot shadow them.

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Routes and per-request middleware, without path normalization.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .route("/healthz", get(health_handler))
        .nest("/api", api::routes::api_routes())
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
///
/// Trailing slashes are trimmed before routing, so `/abc123/` redirects
/// like `/abc123`.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
