//! Application error type and its HTTP mapping.
//!
//! Every create-path failure is recovered at the HTTP boundary and rendered
//! as `{"error": "...", "code": "..."}` with the matching status code.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// JSON body returned for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
}

/// Errors produced by the link service and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The submitted URL was missing or blank after trimming.
    #[error("URL is required")]
    EmptyInput,

    /// The normalized URL does not parse as an absolute URL.
    #[error("Invalid URL format")]
    InvalidUrl { url: String },

    /// The request body could not be read or failed field validation.
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Too many requests. Please try again later.")]
    RateLimited,

    /// Every generated candidate collided with an existing code.
    #[error("Failed to generate unique short code")]
    CodeGenerationExhausted { attempts: usize },

    /// A storage-layer uniqueness constraint rejected the write.
    #[error("URL already exists")]
    DuplicateConstraint { constraint: Option<String> },

    /// Catch-all; `reason` is logged but never sent to clients.
    #[error("Internal server error")]
    Unexpected { reason: String },
}

impl AppError {
    pub fn unexpected(reason: impl Into<String>) -> Self {
        Self::Unexpected {
            reason: reason.into(),
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::EmptyInput
            | AppError::InvalidUrl { .. }
            | AppError::InvalidRequest(_)
            | AppError::DuplicateConstraint { .. } => StatusCode::BAD_REQUEST,
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::CodeGenerationExhausted { .. } | AppError::Unexpected { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::EmptyInput => "empty_input",
            AppError::InvalidUrl { .. } => "invalid_url",
            AppError::InvalidRequest(_) => "invalid_request",
            AppError::RateLimited => "rate_limited",
            AppError::CodeGenerationExhausted { .. } => "code_generation_exhausted",
            AppError::DuplicateConstraint { .. } => "duplicate",
            AppError::Unexpected { .. } => "internal_error",
        }
    }

    pub fn to_error_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
            code: self.code(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            AppError::Unexpected { reason } => {
                tracing::error!(reason = %reason, "Unexpected error");
            }
            AppError::CodeGenerationExhausted { attempts } => {
                tracing::error!(attempts, "Short code generation exhausted");
            }
            AppError::DuplicateConstraint { constraint } => {
                tracing::warn!(constraint = ?constraint, "Unique constraint violation");
            }
            _ => {}
        }

        (status, Json(self.to_error_body())).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid request".to_string());

        AppError::InvalidRequest(message)
    }
}

/// Maps a database error onto the application taxonomy.
///
/// Unique violations are the last-resort backstop for the check-then-create
/// race and surface as [`AppError::DuplicateConstraint`].
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        return AppError::DuplicateConstraint {
            constraint: db.constraint().map(str::to_string),
        };
    }

    AppError::unexpected(format!("Database error: {e}"))
}
