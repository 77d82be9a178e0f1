#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;
use tinylink::application::services::CodePolicy;
use tinylink::domain::entities::{Link, NewLink};
use tinylink::domain::errors::StoreError;
use tinylink::domain::repositories::LinkRepository;
use tinylink::infrastructure::cache::{CacheError, CacheResult, CacheService, NullCache};
use tinylink::infrastructure::persistence::{MemoryLinkRepository, PgLinkRepository};
use tinylink::routes::router;
use tinylink::state::AppState;

pub const BASE_URL: &str = "http://sho.rt";

pub fn create_test_state() -> (AppState, Arc<MemoryLinkRepository>) {
    let repo = Arc::new(MemoryLinkRepository::new());
    let state = AppState::new(
        repo.clone(),
        Arc::new(NullCache::new()),
        CodePolicy::default(),
        BASE_URL,
    );
    (state, repo)
}

pub fn create_pg_state(pool: PgPool) -> AppState {
    AppState::new(
        Arc::new(PgLinkRepository::new(Arc::new(pool))),
        Arc::new(NullCache::new()),
        CodePolicy::default(),
        BASE_URL,
    )
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(router(state)).unwrap()
}

pub async fn create_test_link(repo: &dyn LinkRepository, code: &str, url: &str) -> Link {
    repo.insert(NewLink::new(code, url, Utc::now()))
        .await
        .unwrap()
}

/// Cache whose backend is unreachable.
pub struct DownCache;

#[async_trait]
impl CacheService for DownCache {
    async fn get_url(&self, _key: &str) -> CacheResult<Option<String>> {
        Err(CacheError::ConnectionError("connection refused".into()))
    }

    async fn set_url(&self, _key: &str, _original_url: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        false
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

/// Store whose backend is unreachable.
pub struct DownStore;

#[async_trait]
impl LinkRepository for DownStore {
    async fn exists(&self, _code: &str) -> Result<bool, StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }

    async fn insert(&self, _new_link: NewLink) -> Result<Link, StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }

    async fn find_by_code(&self, _code: &str) -> Result<Option<Link>, StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }

    async fn increment_clicks(&self, _code: &str) -> Result<(), StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }

    async fn list_recent(&self, _limit: u32) -> Result<Vec<Link>, StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }

    fn cache_namespace(&self) -> String {
        "down".to_string()
    }
}
