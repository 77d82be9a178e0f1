//! Short code resolution with click accounting.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::domain::errors::{RedirectError, StoreError};
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::cache::CacheService;
use crate::utils::validation::is_valid_alias_syntax;

/// Resolves short codes to their targets and counts each follow.
///
/// Lookups go through the URL cache first. Click counts always go to the
/// store, never the cache. Cache keys carry the store's
/// [`cache_namespace`](LinkRepository::cache_namespace), so entries written
/// for one store are never served for another.
pub struct RedirectService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    cache: Arc<dyn CacheService>,
    cache_namespace: String,
}

/// Where a resolved target came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Cache,
    Store,
}

impl<L: LinkRepository + ?Sized> RedirectService<L> {
    pub fn new(link_repository: Arc<L>, cache: Arc<dyn CacheService>) -> Self {
        let cache_namespace = link_repository.cache_namespace();
        Self {
            link_repository,
            cache,
            cache_namespace,
        }
    }

    /// Resolves `code` to its original URL and records one click.
    ///
    /// A failed click increment is logged and swallowed: the redirect still
    /// succeeds. The exception is a cache hit whose record the store no
    /// longer has; that entry is stale and the code resolves to nothing.
    ///
    /// # Errors
    ///
    /// - [`RedirectError::NotFound`] if no link exists for `code`
    /// - [`RedirectError::Store`] if the lookup itself fails
    pub async fn resolve(&self, code: &str) -> Result<String, RedirectError> {
        if !is_valid_alias_syntax(code) {
            debug!(code, "Code cannot exist, skipping lookup");
            return Err(RedirectError::NotFound(code.to_string()));
        }

        let (target, source) = self.lookup(code).await?;

        self.record_click(code, source).await?;
        metrics::counter!("redirects_total").increment(1);

        Ok(target)
    }

    fn cache_key(&self, code: &str) -> String {
        format!("{}:{}", self.cache_namespace, code)
    }

    async fn lookup(&self, code: &str) -> Result<(String, Source), RedirectError> {
        let key = self.cache_key(code);

        match self.cache.get_url(&key).await {
            Ok(Some(url)) => return Ok((url, Source::Cache)),
            Ok(None) => {}
            Err(e) => warn!(code, error = %e, "Cache read failed, falling back to store"),
        }

        let link = self
            .link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| RedirectError::NotFound(code.to_string()))?;

        if let Err(e) = self.cache.set_url(&key, &link.original_url).await {
            debug!(code, error = %e, "Cache SET failed");
        }

        Ok((link.original_url, Source::Store))
    }

    async fn record_click(&self, code: &str, source: Source) -> Result<(), RedirectError> {
        let Err(e) = self.link_repository.increment_clicks(code).await else {
            return Ok(());
        };

        match e {
            StoreError::NotFound(_) if source == Source::Cache => {
                metrics::counter!("stale_cache_hits_total").increment(1);
                warn!(code, "Cached code has no stored link");
                return Err(RedirectError::NotFound(code.to_string()));
            }
            StoreError::NotFound(_) => {
                metrics::counter!("click_increment_failures_total").increment(1);
                warn!(code, "Link vanished between lookup and click increment");
            }
            other => {
                metrics::counter!("click_increment_failures_total").increment(1);
                error!(code, error = %other, "Failed to record click");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Link, NewLink};
    use crate::domain::repositories::MockLinkRepository;
    use crate::infrastructure::cache::{CacheError, CacheResult, MockCacheService, NullCache};
    use crate::infrastructure::persistence::MemoryLinkRepository;
    use async_trait::async_trait;
    use chrono::Utc;
    use dashmap::DashMap;
    use mockall::predicate::eq;

    fn sample_link(code: &str, url: &str) -> Link {
        Link::new(1, code.to_string(), url.to_string(), Utc::now(), 0)
    }

    fn mock_repo() -> MockLinkRepository {
        let mut repo = MockLinkRepository::new();
        repo.expect_cache_namespace().return_const("t".to_string());
        repo
    }

    fn empty_cache() -> MockCacheService {
        let mut cache = MockCacheService::new();
        cache.expect_get_url().returning(|_| Ok(None));
        cache.expect_set_url().returning(|_, _| Ok(()));
        cache
    }

    /// In-process cache that keeps whatever it is given, like Redis across
    /// a server restart.
    #[derive(Default)]
    struct MapCache {
        entries: DashMap<String, String>,
    }

    #[async_trait]
    impl CacheService for MapCache {
        async fn get_url(&self, key: &str) -> CacheResult<Option<String>> {
            Ok(self.entries.get(key).map(|url| url.value().clone()))
        }

        async fn set_url(&self, key: &str, original_url: &str) -> CacheResult<()> {
            self.entries.insert(key.to_string(), original_url.to_string());
            Ok(())
        }

        async fn health_check(&self) -> bool {
            true
        }

        fn backend_name(&self) -> &'static str {
            "map"
        }
    }

    async fn store_with(code: &str, url: &str) -> Arc<MemoryLinkRepository> {
        let repo = Arc::new(MemoryLinkRepository::new());
        repo.insert(NewLink::new(code, url, Utc::now())).await.unwrap();
        repo
    }

    #[tokio::test]
    async fn test_resolve_returns_target_and_counts_click() {
        let mut repo = mock_repo();
        repo.expect_find_by_code()
            .with(eq("abc123"))
            .times(1)
            .returning(|code| Ok(Some(sample_link(code, "https://example.org/x"))));
        repo.expect_increment_clicks()
            .with(eq("abc123"))
            .times(1)
            .returning(|_| Ok(()));

        let service = RedirectService::new(Arc::new(repo), Arc::new(empty_cache()));

        let target = service.resolve("abc123").await.unwrap();
        assert_eq!(target, "https://example.org/x");
    }

    #[tokio::test]
    async fn test_resolve_unknown_code_is_not_found() {
        let mut repo = mock_repo();
        repo.expect_find_by_code().returning(|_| Ok(None));
        repo.expect_increment_clicks().times(0);

        let service = RedirectService::new(Arc::new(repo), Arc::new(empty_cache()));

        let result = service.resolve("doesnotexist").await;
        assert!(matches!(result, Err(RedirectError::NotFound(ref c)) if c == "doesnotexist"));
    }

    #[tokio::test]
    async fn test_resolve_impossible_code_skips_store() {
        let mut repo = mock_repo();
        repo.expect_find_by_code().times(0);
        let mut cache = MockCacheService::new();
        cache.expect_get_url().times(0);

        let service = RedirectService::new(Arc::new(repo), Arc::new(cache));

        for code in ["ab", "has space", "favicon.ico"] {
            assert!(matches!(
                service.resolve(code).await,
                Err(RedirectError::NotFound(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_cache_hit_skips_lookup_but_still_counts() {
        let mut repo = mock_repo();
        repo.expect_find_by_code().times(0);
        repo.expect_increment_clicks().times(1).returning(|_| Ok(()));

        let mut cache = MockCacheService::new();
        cache
            .expect_get_url()
            .with(eq("t:cached"))
            .returning(|_| Ok(Some("https://example.org/cached".into())));
        cache.expect_set_url().times(0);

        let service = RedirectService::new(Arc::new(repo), Arc::new(cache));

        assert_eq!(
            service.resolve("cached").await.unwrap(),
            "https://example.org/cached"
        );
    }

    #[tokio::test]
    async fn test_cache_hit_without_stored_link_is_not_found() {
        let mut repo = mock_repo();
        repo.expect_find_by_code().times(0);
        repo.expect_increment_clicks()
            .times(1)
            .returning(|code| Err(StoreError::NotFound(code.to_string())));

        let mut cache = MockCacheService::new();
        cache
            .expect_get_url()
            .returning(|_| Ok(Some("https://old.example/".into())));

        let service = RedirectService::new(Arc::new(repo), Arc::new(cache));

        assert!(matches!(
            service.resolve("stale1").await,
            Err(RedirectError::NotFound(ref c)) if c == "stale1"
        ));
    }

    #[tokio::test]
    async fn test_cache_miss_populates_cache() {
        let mut repo = mock_repo();
        repo.expect_find_by_code()
            .returning(|code| Ok(Some(sample_link(code, "https://example.org/fill"))));
        repo.expect_increment_clicks().returning(|_| Ok(()));

        let mut cache = MockCacheService::new();
        cache.expect_get_url().returning(|_| Ok(None));
        cache
            .expect_set_url()
            .with(eq("t:fill"), eq("https://example.org/fill"))
            .times(1)
            .returning(|_, _| Ok(()));

        let service = RedirectService::new(Arc::new(repo), Arc::new(cache));

        service.resolve("fill").await.unwrap();
    }

    #[tokio::test]
    async fn test_cache_write_failure_does_not_fail_redirect() {
        let mut repo = mock_repo();
        repo.expect_find_by_code()
            .returning(|code| Ok(Some(sample_link(code, "https://example.org/w"))));
        repo.expect_increment_clicks().returning(|_| Ok(()));

        let mut cache = MockCacheService::new();
        cache.expect_get_url().returning(|_| Ok(None));
        cache
            .expect_set_url()
            .times(1)
            .returning(|_, _| Err(CacheError::OperationError("READONLY".into())));

        let service = RedirectService::new(Arc::new(repo), Arc::new(cache));

        assert_eq!(service.resolve("write").await.unwrap(), "https://example.org/w");
    }

    #[tokio::test]
    async fn test_cache_error_falls_back_to_store() {
        let mut repo = mock_repo();
        repo.expect_find_by_code()
            .times(1)
            .returning(|code| Ok(Some(sample_link(code, "https://example.org/db"))));
        repo.expect_increment_clicks().returning(|_| Ok(()));

        let mut cache = MockCacheService::new();
        cache
            .expect_get_url()
            .returning(|_| Err(CacheError::OperationError("timeout".into())));
        cache.expect_set_url().returning(|_, _| Ok(()));

        let service = RedirectService::new(Arc::new(repo), Arc::new(cache));

        assert_eq!(service.resolve("dbonly").await.unwrap(), "https://example.org/db");
    }

    #[tokio::test]
    async fn test_increment_not_found_after_store_lookup_does_not_fail_redirect() {
        let mut repo = mock_repo();
        repo.expect_find_by_code()
            .returning(|code| Ok(Some(sample_link(code, "https://example.org/gone"))));
        repo.expect_increment_clicks()
            .returning(|code| Err(StoreError::NotFound(code.to_string())));

        let service = RedirectService::new(Arc::new(repo), Arc::new(empty_cache()));

        assert_eq!(service.resolve("gone").await.unwrap(), "https://example.org/gone");
    }

    #[tokio::test]
    async fn test_increment_backend_error_does_not_fail_redirect() {
        let mut repo = mock_repo();
        repo.expect_find_by_code()
            .returning(|code| Ok(Some(sample_link(code, "https://example.org/ok"))));
        repo.expect_increment_clicks()
            .returning(|_| Err(StoreError::Backend("deadlock detected".into())));

        let service = RedirectService::new(Arc::new(repo), Arc::new(empty_cache()));

        assert!(service.resolve("flaky").await.is_ok());
    }

    #[tokio::test]
    async fn test_lookup_failure_is_store_error() {
        let mut repo = mock_repo();
        repo.expect_find_by_code()
            .returning(|_| Err(StoreError::Backend("connection refused".into())));
        repo.expect_increment_clicks().times(0);

        let service = RedirectService::new(Arc::new(repo), Arc::new(empty_cache()));

        assert!(matches!(
            service.resolve("abc123").await,
            Err(RedirectError::Store(_))
        ));
    }

    #[tokio::test]
    async fn test_each_follow_increments_by_one() {
        let repo = store_with("clicky", "https://example.org/c").await;

        let service = RedirectService::new(repo.clone(), Arc::new(NullCache::new()));

        service.resolve("clicky").await.unwrap();
        assert_eq!(repo.find_by_code("clicky").await.unwrap().unwrap().clicks, 1);

        service.resolve("clicky").await.unwrap();
        service.resolve("clicky").await.unwrap();
        assert_eq!(repo.find_by_code("clicky").await.unwrap().unwrap().clicks, 3);
    }

    #[tokio::test]
    async fn test_cache_hits_still_count_clicks_in_store() {
        let repo = store_with("warm01", "https://example.org/warm").await;
        let cache = Arc::new(MapCache::default());
        let service = RedirectService::new(repo.clone(), cache.clone());

        service.resolve("warm01").await.unwrap();
        assert_eq!(cache.entries.len(), 1);

        service.resolve("warm01").await.unwrap();
        assert_eq!(repo.find_by_code("warm01").await.unwrap().unwrap().clicks, 2);
    }

    #[tokio::test]
    async fn test_cache_surviving_store_swap_serves_current_store() {
        let cache = Arc::new(MapCache::default());

        let before = store_with("shared", "https://old.example/").await;
        let service = RedirectService::new(before, cache.clone());
        assert_eq!(service.resolve("shared").await.unwrap(), "https://old.example/");

        // Restart: the store comes back empty, the cache keeps its entries.
        let after = Arc::new(MemoryLinkRepository::new());
        let service = RedirectService::new(after.clone(), cache.clone());
        assert!(matches!(
            service.resolve("shared").await,
            Err(RedirectError::NotFound(_))
        ));

        after
            .insert(NewLink::new("shared", "https://new.example/", Utc::now()))
            .await
            .unwrap();
        assert_eq!(service.resolve("shared").await.unwrap(), "https://new.example/");
        assert_eq!(after.find_by_code("shared").await.unwrap().unwrap().clicks, 1);
    }

    #[tokio::test]
    async fn test_stale_entry_in_store_namespace_is_not_found() {
        let repo = Arc::new(MemoryLinkRepository::new());
        let cache = Arc::new(MapCache::default());
        cache.entries.insert(
            format!("{}:ghost1", repo.cache_namespace()),
            "https://old.example/".to_string(),
        );

        let service = RedirectService::new(repo.clone(), cache);

        assert!(matches!(
            service.resolve("ghost1").await,
            Err(RedirectError::NotFound(ref c)) if c == "ghost1"
        ));
        assert!(repo.is_empty());
    }
}
