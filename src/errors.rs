use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::agents::AgentError;
use crate::auth::AuthError;
use crate::store::StoreError;

/// Error returned by every user action. Each variant is scoped to the single
/// request that produced it; none of them is fatal to the process.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("Could not read the uploaded file: {0}")]
    FileRead(String),
    #[error("{0}")]
    InsufficientData(String),
    #[error("{0}")]
    NotFound(String),
    #[error("External agent failed: {0}")]
    Agent(#[from] AgentError),
    #[error("Database error: {0}")]
    Database(#[from] StoreError),
    #[error(transparent)]
    Unauthorized(#[from] AuthError),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::FileRead(_) => StatusCode::BAD_REQUEST,
            AppError::InsufficientData(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Agent(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation_error",
            AppError::FileRead(_) => "file_error",
            AppError::InsufficientData(_) => "insufficient_data",
            AppError::NotFound(_) => "not_found",
            AppError::Agent(_) => "agent_error",
            AppError::Database(StoreError::NotFound(_)) => "not_found",
            AppError::Database(_) => "database_error",
            AppError::Unauthorized(_) => "unauthorized",
        }
    }

    /// Message shown to the user. Agent and database failures collapse into a
    /// generic text so upstream payloads never leak into the response.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Agent(_) => {
                "The AI service could not process your request. Please try again.".to_string()
            }
            AppError::Database(StoreError::NotFound(what)) => format!("{} not found", what),
            AppError::Database(_) => "A database error occurred. Please try again.".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            AppError::Agent(err) => tracing::error!(error = %err, "agent call failed"),
            AppError::Database(err) => tracing::error!(error = %err, "store operation failed"),
            _ => tracing::debug!(error = %self, "request rejected"),
        }

        let body = Json(json!({
            "error": self.error_code(),
            "message": self.user_message(),
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_per_kind() {
        assert_eq!(
            AppError::validation("Please enter weight and reps.").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::FileRead("stream closed".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InsufficientData("log more".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::Agent(AgentError::Malformed("no days".into())).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::Database(StoreError::NotFound("Plan".into())).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_agent_errors_are_reported_generically() {
        let err = AppError::Agent(AgentError::Status {
            status: 500,
            body: "internal stack trace".into(),
        });

        let message = err.user_message();
        assert!(!message.contains("stack trace"));
        assert_eq!(err.error_code(), "agent_error");
    }

    #[test]
    fn test_file_read_is_distinct_from_validation() {
        assert_eq!(AppError::FileRead("x".into()).error_code(), "file_error");
        assert_eq!(AppError::validation("x").error_code(), "validation_error");
    }
}
