//! Error types returned by the domain and application layers.
//!
//! Every public core operation returns one of these discriminated errors.
//! The HTTP layer maps them to [`crate::error::AppError`].

/// Errors reported by a [`crate::domain::repositories::LinkRepository`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The storage layer rejected an insert because the code already exists.
    #[error("short code '{0}' already exists")]
    DuplicateCode(String),

    /// No record exists for the code at operation time.
    #[error("short code '{0}' not found")]
    NotFound(String),

    /// Connectivity or query failure in the backing store.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Errors produced while claiming a user-supplied alias.
#[derive(Debug, thiserror::Error)]
pub enum AliasError {
    #[error("alias '{0}' must be 3-32 characters: letters, digits, '_' or '-'")]
    InvalidSyntax(String),

    #[error("alias '{0}' is already taken")]
    AlreadyTaken(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors produced while allocating a random code.
#[derive(Debug, thiserror::Error)]
pub enum AllocateError {
    /// Every candidate length up to the maximum collided.
    #[error("no free short code found after {attempts} attempts")]
    Exhausted { attempts: usize },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors returned by the create-link operation.
#[derive(Debug, thiserror::Error)]
pub enum CreateLinkError {
    #[error("URL must start with http:// or https:// and include a host")]
    InvalidUrl,

    #[error("custom code '{0}' must be 3-32 characters: letters, digits, '_' or '-'")]
    InvalidCustomCode(String),

    #[error("custom code '{0}' is already taken")]
    CodeTaken(String),

    #[error("no free short code found after {attempts} attempts")]
    Exhausted { attempts: usize },

    #[error(transparent)]
    Store(StoreError),
}

impl CreateLinkError {
    /// Stable machine-readable identifier used in API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidUrl => "invalid_url",
            Self::InvalidCustomCode(_) => "invalid_custom_code",
            Self::CodeTaken(_) => "code_taken",
            Self::Exhausted { .. } => "code_space_exhausted",
            Self::Store(_) => "internal_error",
        }
    }
}

impl From<AliasError> for CreateLinkError {
    fn from(err: AliasError) -> Self {
        match err {
            AliasError::InvalidSyntax(alias) => Self::InvalidCustomCode(alias),
            AliasError::AlreadyTaken(alias) => Self::CodeTaken(alias),
            AliasError::Store(e) => Self::Store(e),
        }
    }
}

impl From<AllocateError> for CreateLinkError {
    fn from(err: AllocateError) -> Self {
        match err {
            AllocateError::Exhausted { attempts } => Self::Exhausted { attempts },
            AllocateError::Store(e) => Self::Store(e),
        }
    }
}

impl From<StoreError> for CreateLinkError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateCode(code) => Self::CodeTaken(code),
            other => Self::Store(other),
        }
    }
}

/// Errors returned by the follow/redirect operation.
#[derive(Debug, thiserror::Error)]
pub enum RedirectError {
    #[error("short link '{0}' not found")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
