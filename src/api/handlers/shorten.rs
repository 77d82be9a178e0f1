//! Handler for the link shortening endpoint.

use axum::{Json, body::Bytes, extract::State, http::StatusCode};

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/some/long/path",
///   "code": "my-link"
/// }
/// ```
///
/// `original_url` and `custom_code` are accepted as aliases. A body that is
/// not valid JSON is treated as `{}` and therefore fails as `invalid_url`.
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "code": "my-link",
///   "short_url": "http://localhost:3000/my-link"
/// }
/// ```
///
/// # Errors
///
/// - 400 `invalid_url` / `invalid_custom_code`
/// - 409 `code_taken`
/// - 500 on storage failure or code space exhaustion
pub async fn shorten_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let payload: ShortenRequest = serde_json::from_slice(&body).unwrap_or_default();

    let link = state
        .link_service
        .create_short_link(
            payload.url.as_deref().unwrap_or_default(),
            payload.code.as_deref(),
        )
        .await?;

    let short_url = state.link_service.short_url(&link.code);

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            code: link.code,
            short_url,
        }),
    ))
}
