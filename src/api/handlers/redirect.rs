//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use url::Url;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Every successful resolution counts one click; the caching and click
/// accounting rules live in
/// [`RedirectService`](crate::application::services::RedirectService).
///
/// # Response
///
/// `302 Found` with a `Location` header.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let target = state.redirect_service.resolve(&code).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location(&target)?)]).into_response())
}

/// Stored URLs may hold non-ASCII text; those are re-serialized through
/// [`Url`], which percent-encodes them.
fn location(target: &str) -> Result<HeaderValue, AppError> {
    if target.is_ascii()
        && let Ok(value) = HeaderValue::from_str(target)
    {
        return Ok(value);
    }

    Url::parse(target)
        .ok()
        .and_then(|url| HeaderValue::from_str(url.as_str()).ok())
        .ok_or_else(|| {
            tracing::error!(url = target, "Stored URL cannot be used as a Location header");
            AppError::internal("Stored URL is not redirectable", serde_json::json!({}))
        })
}
