//! Short code allocation: random generation and custom alias claiming.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::domain::entities::{Link, NewLink};
use crate::domain::errors::{AliasError, AllocateError, StoreError};
use crate::domain::repositories::LinkRepository;
use crate::utils::code_generator::{DEFAULT_CODE_LENGTH, generate_code, is_reserved};
use crate::utils::validation::{MAX_CODE_LENGTH, MIN_CODE_LENGTH, is_valid_alias_syntax};

/// Default number of consecutive collisions tolerated at one length.
pub const DEFAULT_ATTEMPTS_PER_LENGTH: usize = 8;

/// Retry policy for random code generation.
///
/// Candidates start at `length` characters. After `attempts_per_length`
/// consecutive collisions the length grows by one, up to
/// [`MAX_CODE_LENGTH`]. The total number of draws is therefore bounded by
/// `attempts_per_length * (MAX_CODE_LENGTH - length + 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodePolicy {
    pub length: usize,
    pub attempts_per_length: usize,
}

impl Default for CodePolicy {
    fn default() -> Self {
        Self {
            length: DEFAULT_CODE_LENGTH,
            attempts_per_length: DEFAULT_ATTEMPTS_PER_LENGTH,
        }
    }
}

impl CodePolicy {
    pub fn new(length: usize, attempts_per_length: usize) -> Self {
        Self {
            length: length.clamp(MIN_CODE_LENGTH, MAX_CODE_LENGTH),
            attempts_per_length: attempts_per_length.max(1),
        }
    }

    /// Length of every candidate to draw, in order.
    fn candidate_lengths(&self) -> impl Iterator<Item = usize> {
        let attempts = self.attempts_per_length;
        (self.length..=MAX_CODE_LENGTH).flat_map(move |len| std::iter::repeat_n(len, attempts))
    }

    /// Random candidates in draw order. Reserved route names use up a draw
    /// but are never yielded.
    fn candidates(&self) -> impl Iterator<Item = String> {
        let mut current_len = self.length;
        self.candidate_lengths()
            .inspect(move |&len| note_escalation(&mut current_len, len))
            .map(generate_code)
            .filter(|code| !is_reserved(code))
    }

    /// Upper bound on the number of draws.
    pub fn max_attempts(&self) -> usize {
        self.attempts_per_length * (MAX_CODE_LENGTH + 1).saturating_sub(self.length)
    }
}

/// Allocates codes that do not collide with any existing link.
///
/// The [`LinkRepository::exists`] check is only a fast path. Uniqueness is
/// decided by [`LinkRepository::insert`], so a lost race surfaces as
/// [`StoreError::DuplicateCode`] and is retried with a fresh candidate.
pub struct CodeAllocator<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    policy: CodePolicy,
}

impl<L: LinkRepository + ?Sized> CodeAllocator<L> {
    pub fn new(link_repository: Arc<L>, policy: CodePolicy) -> Self {
        Self {
            link_repository,
            policy,
        }
    }

    /// Returns a random code the store reported as unused at check time.
    ///
    /// # Errors
    ///
    /// Returns [`AllocateError::Exhausted`] if every candidate collided.
    /// Returns [`AllocateError::Store`] on storage errors.
    pub async fn allocate_random_code(&self) -> Result<String, AllocateError> {
        for code in self.policy.candidates() {
            if !self.link_repository.exists(&code).await? {
                return Ok(code);
            }

            record_collision(&code);
        }

        Err(self.exhausted())
    }

    /// Inserts a link for `original_url` under a fresh random code.
    ///
    /// Losing an insert race counts as one collision; the retry policy is the
    /// same as for [`Self::allocate_random_code`].
    ///
    /// # Errors
    ///
    /// Returns [`AllocateError::Exhausted`] if every candidate collided.
    /// Returns [`AllocateError::Store`] on storage errors.
    pub async fn insert_with_random_code(
        &self,
        original_url: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Link, AllocateError> {
        for code in self.policy.candidates() {
            if self.link_repository.exists(&code).await? {
                record_collision(&code);
                continue;
            }

            let new_link = NewLink::new(code, original_url, created_at);
            match self.link_repository.insert(new_link).await {
                Ok(link) => return Ok(link),
                Err(StoreError::DuplicateCode(code)) => {
                    debug!(%code, "Lost insert race, drawing a new code");
                    record_collision(&code);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(self.exhausted())
    }

    fn exhausted(&self) -> AllocateError {
        AllocateError::Exhausted {
            attempts: self.policy.max_attempts(),
        }
    }

    /// Validates a user-chosen alias and checks that it is free.
    ///
    /// This does not reserve the alias. The subsequent insert is the
    /// authoritative uniqueness check.
    ///
    /// # Errors
    ///
    /// Returns [`AliasError::InvalidSyntax`] if the alias fails the syntax check.
    /// Returns [`AliasError::AlreadyTaken`] if a link or a system route owns it.
    /// Returns [`AliasError::Store`] on storage errors.
    pub async fn claim_custom_code(&self, alias: &str) -> Result<String, AliasError> {
        if !is_valid_alias_syntax(alias) {
            return Err(AliasError::InvalidSyntax(alias.to_string()));
        }

        if is_reserved(alias) || self.link_repository.exists(alias).await? {
            return Err(AliasError::AlreadyTaken(alias.to_string()));
        }

        Ok(alias.to_string())
    }
}

fn note_escalation(current_len: &mut usize, len: usize) {
    if len != *current_len {
        warn!(
            from = *current_len,
            to = len,
            "Escalating short code length after repeated collisions"
        );
        *current_len = len;
    }
}

fn record_collision(code: &str) {
    debug!(code, "Short code collision");
    metrics::counter!("code_collisions_total").increment(1);
}
