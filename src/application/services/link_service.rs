//! Link creation and retrieval service.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info};

use crate::application::services::code_allocator::{CodeAllocator, CodePolicy};
use crate::domain::entities::{Link, NewLink};
use crate::domain::errors::{CreateLinkError, StoreError};
use crate::domain::repositories::LinkRepository;
use crate::utils::validation::{is_valid_alias_syntax, is_valid_target_url};

/// Number of links returned by the recent listing when no limit is given.
pub const DEFAULT_RECENT_LIMIT: u32 = 10;

/// Service for creating and retrieving shortened links.
///
/// Creation runs validation, then code allocation, then the insert. Links
/// are never deduplicated: the same URL may be shortened any number of
/// times, each under its own code.
pub struct LinkService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    allocator: CodeAllocator<L>,
    base_url: String,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    ///
    /// `base_url` is the public origin short URLs are built from,
    /// e.g. `https://sho.rt`.
    pub fn new(link_repository: Arc<L>, policy: CodePolicy, base_url: impl Into<String>) -> Self {
        Self {
            allocator: CodeAllocator::new(link_repository.clone(), policy),
            link_repository,
            base_url: base_url.into(),
        }
    }

    /// Creates a short link.
    ///
    /// # Arguments
    ///
    /// - `original_url` - The destination; surrounding whitespace is trimmed
    /// - `custom_code` - Optional alias; blank values mean "generate one"
    ///
    /// # Errors
    ///
    /// - [`CreateLinkError::InvalidUrl`] if the URL is not absolute http(s) with a host
    /// - [`CreateLinkError::InvalidCustomCode`] if the alias fails the syntax check
    /// - [`CreateLinkError::CodeTaken`] if the alias exists, is reserved, or was
    ///   claimed concurrently
    /// - [`CreateLinkError::Exhausted`] if random allocation gave up
    /// - [`CreateLinkError::Store`] on storage errors
    pub async fn create_short_link(
        &self,
        original_url: &str,
        custom_code: Option<&str>,
    ) -> Result<Link, CreateLinkError> {
        self.try_create(original_url, custom_code)
            .await
            .inspect(|link| {
                info!(code = %link.code, "Short link created");
            })
            .inspect_err(|e| match e {
                CreateLinkError::Store(_) | CreateLinkError::Exhausted { .. } => {
                    error!(error = %e, "Failed to create short link");
                }
                _ => debug!(error = %e, "Rejected short link request"),
            })
    }

    async fn try_create(
        &self,
        original_url: &str,
        custom_code: Option<&str>,
    ) -> Result<Link, CreateLinkError> {
        let original_url = original_url.trim();
        if !is_valid_target_url(original_url) {
            return Err(CreateLinkError::InvalidUrl);
        }

        let created_at = Utc::now();
        let custom_code = custom_code.map(str::trim).filter(|c| !c.is_empty());

        let link = match custom_code {
            Some(alias) => {
                let code = self.allocator.claim_custom_code(alias).await?;
                let new_link = NewLink::new(code, original_url, created_at);
                let link = self.link_repository.insert(new_link).await?;
                metrics::counter!("links_created_total", "kind" => "custom").increment(1);
                link
            }
            None => {
                let link = self
                    .allocator
                    .insert_with_random_code(original_url, created_at)
                    .await?;
                metrics::counter!("links_created_total", "kind" => "random").increment(1);
                link
            }
        };

        Ok(link)
    }

    /// Retrieves a link without touching its click counter.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] on storage errors.
    pub async fn get_link(&self, code: &str) -> Result<Option<Link>, StoreError> {
        if !is_valid_alias_syntax(code) {
            return Ok(None);
        }

        self.link_repository.find_by_code(code).await
    }

    /// Lists up to `limit` links, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] on storage errors.
    pub async fn list_recent(&self, limit: u32) -> Result<Vec<Link>, StoreError> {
        self.link_repository.list_recent(limit).await
    }

    /// Builds the fully qualified short URL for `code`.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }
}
