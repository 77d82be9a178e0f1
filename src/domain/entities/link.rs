//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL link with its click counter.
///
/// `code` and `original_url` never change after insertion. `clicks` only grows,
/// and only through [`crate::domain::repositories::LinkRepository::increment_clicks`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub clicks: i64,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        code: String,
        original_url: String,
        created_at: DateTime<Utc>,
        clicks: i64,
    ) -> Self {
        Self {
            id,
            code,
            original_url,
            created_at,
            clicks,
        }
    }

    /// Builds the freshly inserted record for `new_link` (zero clicks).
    pub fn from_new(id: i64, new_link: NewLink) -> Self {
        Self::new(
            id,
            new_link.code,
            new_link.original_url,
            new_link.created_at,
            0,
        )
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}

impl NewLink {
    pub fn new(
        code: impl Into<String>,
        original_url: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            code: code.into(),
            original_url: original_url.into(),
            created_at,
        }
    }
}
