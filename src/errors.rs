use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::auth::password::PasswordError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("User with this email already exists")]
    EmailAlreadyExists,
    #[error("Access denied. No token provided.")]
    MissingToken,
    #[error("Invalid authorization header format")]
    InvalidAuthHeaderFormat,
    #[error("Invalid or expired token.")]
    InvalidToken,
    #[error("Unauthorized! User does not exist.")]
    UserGone,
    #[error("Authentication required.")]
    AuthenticationRequired,
    #[error("Access denied. Requires {0} role.")]
    InsufficientRole(String),
    #[error("Workout not found")]
    WorkoutNotFound,
    #[error("Client not found")]
    ClientNotFound,
    #[error("You can only assign your own workouts")]
    NotWorkoutOwner,
    #[error("User is not a client")]
    NotAClient,
    #[error("Workout already assigned to this client")]
    AlreadyAssigned,
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("Password hashing error: {0}")]
    PasswordHashing(#[from] PasswordError),
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials"),
            ApiError::EmailAlreadyExists => (StatusCode::CONFLICT, "Email already exists"),
            ApiError::MissingToken => (StatusCode::UNAUTHORIZED, "Missing token"),
            ApiError::InvalidAuthHeaderFormat => {
                (StatusCode::UNAUTHORIZED, "Invalid authorization header format")
            }
            ApiError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
            ApiError::UserGone => (StatusCode::UNAUTHORIZED, "Unknown user"),
            ApiError::AuthenticationRequired => {
                (StatusCode::UNAUTHORIZED, "Authentication required")
            }
            ApiError::InsufficientRole(_) => (StatusCode::FORBIDDEN, "Insufficient permissions"),
            ApiError::WorkoutNotFound => (StatusCode::NOT_FOUND, "Workout not found"),
            ApiError::ClientNotFound => (StatusCode::NOT_FOUND, "Client not found"),
            ApiError::NotWorkoutOwner => (StatusCode::FORBIDDEN, "Not workout owner"),
            ApiError::NotAClient => (StatusCode::BAD_REQUEST, "Invalid role"),
            ApiError::AlreadyAssigned => (StatusCode::CONFLICT, "Already assigned"),
            ApiError::Validation { .. } => (StatusCode::BAD_REQUEST, "Validation failed"),
            ApiError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error"),
            ApiError::Jwt(_) => (StatusCode::UNAUTHORIZED, "Token error"),
            ApiError::PasswordHashing(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Password processing error")
            }
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        // 500-class responses carry a generic body; the real error only goes
        // to the log.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let mut body = json!({
            "error": error_message,
            "message": message,
        });
        if let ApiError::Validation { field, .. } = &self {
            body["field"] = json!(field);
        }

        (status, Json(body)).into_response()
    }
}

/// Postgres unique constraint violation (SQLSTATE 23505)
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505"))
}
