//! API route configuration.

use crate::api::handlers::{get_link_handler, recent_links_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten`       - Create a short link
/// - `GET  /links`         - Most recent links (`?limit=1..=100`)
/// - `GET  /links/{code}`  - One link with its click count
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/links", get(recent_links_handler))
        .route("/links/{code}", get(get_link_handler))
}
