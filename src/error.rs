use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("User already exists!")]
    UserExists,
    #[error("Unknown userId")]
    NotFound,
    #[error("Invalid request: {0}")]
    BadRequest(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

// Error bodies are plain text, matching what existing clients of this API parse.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Database(e) => {
                tracing::error!(error = %e, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            Self::UserExists => {
                tracing::debug!("Username already taken");
                (StatusCode::UNPROCESSABLE_ENTITY, "User already exists!".to_string())
            }
            Self::NotFound => {
                tracing::debug!("User not found");
                (StatusCode::NOT_FOUND, "Unknown userId".to_string())
            }
            Self::BadRequest(msg) => {
                tracing::debug!(message = %msg, "Bad request");
                (StatusCode::BAD_REQUEST, msg)
            }
        };

        (status, message).into_response()
    }
}
