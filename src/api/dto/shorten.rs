//! DTOs for the link shortening endpoint.

use serde::{Deserialize, Serialize};

/// Request to shorten a single URL.
///
/// Both fields are optional at the wire level so a missing URL is reported
/// as `invalid_url` rather than a deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct ShortenRequest {
    /// The destination URL.
    #[serde(default, alias = "original_url")]
    pub url: Option<String>,

    /// Optional custom alias; blank means "generate one".
    #[serde(default, alias = "custom_code")]
    pub code: Option<String>,
}

/// Created short link.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub code: String,
    pub short_url: String,
}
