use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Missing authorization header")]
    MissingAuthHeader,
    #[error("Invalid authorization header format")]
    InvalidAuthHeaderFormat,
    #[error("Token subject is not a valid user id")]
    InvalidSubject,
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let error_message = match self {
            AuthError::InvalidToken => "Invalid token",
            AuthError::TokenExpired => "Token expired",
            AuthError::MissingAuthHeader => "Missing authorization header",
            AuthError::InvalidAuthHeaderFormat => "Invalid authorization header format",
            AuthError::InvalidSubject => "Invalid token subject",
            AuthError::Jwt(_) => "Token error",
        };

        let body = Json(json!({
            "error": "unauthorized",
            "message": error_message,
        }));

        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}
