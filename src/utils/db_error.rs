//! Translation of sqlx errors into [`StoreError`].

use crate::domain::errors::StoreError;

/// Name of the uniqueness constraint on `links.code`.
pub const LINKS_CODE_CONSTRAINT: &str = "links_code_key";

/// Returns true if `e` is a unique violation of the `links.code` constraint.
pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(LINKS_CODE_CONSTRAINT))
}

/// Maps an insert failure for `code` to a [`StoreError`].
pub fn map_insert_error(code: &str, e: sqlx::Error) -> StoreError {
    if is_unique_violation_on_code(&e) {
        return StoreError::DuplicateCode(code.to_string());
    }

    backend_error(e)
}

/// Wraps any other sqlx failure as [`StoreError::Backend`].
pub fn backend_error(e: sqlx::Error) -> StoreError {
    tracing::error!(error = %e, "Database error");
    StoreError::Backend(e.to_string())
}
