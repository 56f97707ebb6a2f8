use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Invalid or expired token")]
    InvalidCredential,

    #[error("Forbidden: {0}")]
    Forbidden(&'static str),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("Please wait {retry_after_secs} seconds before requesting a new code")]
    CooldownActive { retry_after_secs: i64 },

    #[error("Verification code has expired")]
    Expired,

    #[error("Invalid verification code")]
    Mismatch,

    #[error("Grading failed: {0}")]
    GradingFailure(String),

    #[error("Email delivery failed: {0}")]
    DeliveryFailure(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::InvalidCredential => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::CooldownActive { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::Expired => StatusCode::BAD_REQUEST,
            Self::Mismatch => StatusCode::BAD_REQUEST,
            Self::GradingFailure(_) => StatusCode::BAD_GATEWAY,
            Self::DeliveryFailure(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Reject anything that is not a UUID before it reaches the store.
    pub fn check_id(id: &str) -> AppResult<()> {
        uuid::Uuid::parse_str(id)
            .map(|_| ())
            .map_err(|_| Self::InvalidIdentifier(id.to_string()))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            // MySQL 1062: duplicate entry on a unique key
            if db_err.is_unique_violation() {
                return AppError::Conflict(db_err.message().to_string());
            }
        }
        AppError::Internal(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

// =============================================================================
// ERROR RESPONSE
// =============================================================================

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_secs: Option<i64>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            retry_after_secs: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::new("Internal server error")
            }
            AppError::CooldownActive { retry_after_secs } => ErrorResponse {
                error: self.to_string(),
                retry_after_secs: Some(*retry_after_secs),
            },
            _ => {
                if status.is_server_error() {
                    tracing::error!("{}", self);
                }
                ErrorResponse::new(self.to_string())
            }
        };

        (status, Json(body)).into_response()
    }
}
