//! In-process implementation of link repository.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{Link, NewLink};
use crate::domain::errors::StoreError;
use crate::domain::repositories::LinkRepository;
use crate::utils::code_generator::generate_code;

/// Link store backed by a [`DashMap`] keyed by code.
///
/// Inserts go through the entry API, which holds the shard lock between the
/// presence check and the write, so two racing inserts of one code cannot
/// both succeed. Increments mutate the record in place under the same lock.
///
/// Data lives only as long as the process. Intended for tests and
/// single-instance deployments started with `STORAGE_BACKEND=memory`.
/// Each instance gets its own cache namespace for the same reason.
#[derive(Debug)]
pub struct MemoryLinkRepository {
    links: DashMap<String, Link>,
    next_id: AtomicI64,
    instance_id: String,
}

impl Default for MemoryLinkRepository {
    fn default() -> Self {
        Self {
            links: DashMap::new(),
            next_id: AtomicI64::new(0),
            instance_id: generate_code(12),
        }
    }
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn exists(&self, code: &str) -> Result<bool, StoreError> {
        Ok(self.links.contains_key(code))
    }

    async fn insert(&self, new_link: NewLink) -> Result<Link, StoreError> {
        match self.links.entry(new_link.code.clone()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateCode(new_link.code)),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
                let link = Link::from_new(id, new_link);
                slot.insert(link.clone());
                Ok(link)
            }
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, StoreError> {
        Ok(self.links.get(code).map(|entry| entry.value().clone()))
    }

    async fn increment_clicks(&self, code: &str) -> Result<(), StoreError> {
        match self.links.get_mut(code) {
            Some(mut entry) => {
                entry.clicks += 1;
                Ok(())
            }
            None => Err(StoreError::NotFound(code.to_string())),
        }
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<Link>, StoreError> {
        let mut links: Vec<Link> = self
            .links
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        links.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        links.truncate(limit as usize);

        Ok(links)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn cache_namespace(&self) -> String {
        format!("mem-{}", self.instance_id)
    }
}
