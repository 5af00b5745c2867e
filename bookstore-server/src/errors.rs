use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bookstore_core::BookstoreError;
use serde_json::json;
use std::fmt;
use tracing::error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

impl From<BookstoreError> for AppError {
    fn from(err: BookstoreError) -> Self {
        let message = err.to_string();
        match err {
            BookstoreError::InvalidId(_) | BookstoreError::NotFound(_) => {
                Self::not_found(message)
            }
            BookstoreError::Duplicate(_) => Self::conflict(message),
            BookstoreError::Validation(_) => Self::bad_request(message),
            BookstoreError::Connection(_)
            | BookstoreError::Query(_)
            | BookstoreError::Delete(_) => {
                error!(error = %message, "store operation failed");
                Self::internal(message)
            }
        }
    }
}

// Every malformed body is a 400, whatever axum's default status would be.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}
