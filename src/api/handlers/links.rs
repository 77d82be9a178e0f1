//! Handlers for link listing and lookup.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::links::{LinkResponse, RecentLinksQuery, RecentLinksResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Lists the most recently created links.
///
/// # Endpoint
///
/// `GET /api/links?limit=N`
///
/// `limit` defaults to 10 and must be between 1 and 100. Results are ordered
/// newest first.
///
/// # Errors
///
/// Returns 400 Bad Request if `limit` is malformed or out of range.
pub async fn recent_links_handler(
    State(state): State<AppState>,
    query: Result<Query<RecentLinksQuery>, QueryRejection>,
) -> Result<Json<RecentLinksResponse>, AppError> {
    let Query(query) = query.map_err(|e| {
        AppError::bad_request(
            "validation_error",
            "Invalid query parameters",
            json!({ "reason": e.body_text() }),
        )
    })?;
    query.validate()?;

    let links = state
        .link_service
        .list_recent(query.limit_or_default())
        .await?;

    let items = links
        .into_iter()
        .map(|link| {
            let short_url = state.link_service.short_url(&link.code);
            LinkResponse::new(link, short_url)
        })
        .collect();

    Ok(Json(RecentLinksResponse { items }))
}

/// Returns one link with its click count. Does not count as a click.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state
        .link_service
        .get_link(&code)
        .await?
        .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

    let short_url = state.link_service.short_url(&link.code);

    Ok(Json(LinkResponse::new(link, short_url)))
}
