use std::sync::Arc;

use crate::application::services::{CodePolicy, LinkService, RedirectService};
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::cache::CacheService;

/// Shared handler state. Cloned per request; everything inside is `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    pub redirect_service: Arc<RedirectService<dyn LinkRepository>>,
    pub link_repository: Arc<dyn LinkRepository>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        cache: Arc<dyn CacheService>,
        policy: CodePolicy,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(link_repository.clone(), policy, base_url)),
            redirect_service: Arc::new(RedirectService::new(
                link_repository.clone(),
                cache.clone(),
            )),
            link_repository,
            cache,
        }
    }
}
