//! DTOs for link listing and lookup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

use crate::application::services::DEFAULT_RECENT_LIMIT;
use crate::domain::entities::Link;

/// Query parameters for `GET /api/links`.
///
/// Uses `serde_with` so `?limit=25` parses from the query string as an integer.
#[serde_as]
#[derive(Debug, Default, Deserialize, Validate)]
pub struct RecentLinksQuery {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: Option<u32>,
}

impl RecentLinksQuery {
    pub fn limit_or_default(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_RECENT_LIMIT)
    }
}

/// A stored link as returned by the API.
#[derive(Debug, Serialize, Deserialize)]
pub struct LinkResponse {
    pub code: String,
    pub original_url: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
    pub clicks: i64,
}

impl LinkResponse {
    pub fn new(link: Link, short_url: String) -> Self {
        Self {
            code: link.code,
            original_url: link.original_url,
            short_url,
            created_at: link.created_at,
            clicks: link.clicks,
        }
    }
}

/// Recent links, newest first.
#[derive(Debug, Serialize, Deserialize)]
pub struct RecentLinksResponse {
    pub items: Vec<LinkResponse>,
}
