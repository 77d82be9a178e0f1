use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::errors::{CreateLinkError, RedirectError, StoreError};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

/// HTTP-facing error. Renders as `{"error": {"code", "message", "details"}}`.
#[derive(Debug)]
pub enum AppError {
    Validation {
        code: &'static str,
        message: String,
        details: Value,
    },
    NotFound {
        code: &'static str,
        message: String,
        details: Value,
    },
    Conflict {
        code: &'static str,
        message: String,
        details: Value,
    },
    Internal {
        code: &'static str,
        message: String,
        details: Value,
    },
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            code,
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            code: "not_found",
            message: message.into(),
            details,
        }
    }
    pub fn conflict(code: &'static str, message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            code,
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            code: "internal_error",
            message: message.into(),
            details,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message, details) = match self {
            AppError::Validation {
                code,
                message,
                details,
            }
            | AppError::NotFound {
                code,
                message,
                details,
            }
            | AppError::Conflict {
                code,
                message,
                details,
            }
            | AppError::Internal {
                code,
                message,
                details,
            } => (code, message, details),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(code) => {
                AppError::not_found("Short link not found", json!({ "code": code }))
            }
            StoreError::DuplicateCode(code) => AppError::conflict(
                "code_taken",
                "Short code is already taken",
                json!({ "code": code }),
            ),
            StoreError::Backend(detail) => {
                tracing::error!(error = %detail, "Storage failure");
                AppError::internal("Storage error", json!({}))
            }
        }
    }
}

impl From<CreateLinkError> for AppError {
    fn from(e: CreateLinkError) -> Self {
        let code = e.error_code();
        match e {
            CreateLinkError::InvalidUrl => AppError::bad_request(code, e.to_string(), json!({})),
            CreateLinkError::InvalidCustomCode(ref custom_code) => AppError::bad_request(
                code,
                e.to_string(),
                json!({ "custom_code": custom_code }),
            ),
            CreateLinkError::CodeTaken(ref custom_code) => AppError::conflict(
                code,
                e.to_string(),
                json!({ "custom_code": custom_code }),
            ),
            CreateLinkError::Exhausted { attempts } => {
                tracing::error!(attempts, "Short code space exhausted");
                AppError::Internal {
                    code,
                    message: "Could not allocate a short code".into(),
                    details: json!({}),
                }
            }
            CreateLinkError::Store(e) => e.into(),
        }
    }
}

impl From<RedirectError> for AppError {
    fn from(e: RedirectError) -> Self {
        match e {
            RedirectError::NotFound(code) => {
                AppError::not_found("Short link not found", json!({ "code": code }))
            }
            RedirectError::Store(e) => e.into(),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request("validation_error", "Invalid request parameters", json!(e))
    }
}
