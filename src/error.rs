//! Error types for the chat service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Chat Error Enum ==
/// Unified error type for the chat service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("invalid JSON format")]
    InvalidJson,

    #[error("chat title cannot be empty")]
    TitleEmpty,

    #[error("chat title exceeds maximum length")]
    TitleTooLong,

    #[error("message text cannot be empty")]
    MessageEmpty,

    #[error("message text exceeds maximum length")]
    MessageTooLong,

    #[error("invalid chat ID; must be a positive integer")]
    InvalidChatId,

    #[error("chat not found")]
    ChatNotFound,

    #[error("limit cannot be negative")]
    LimitTooSmall,

    #[error("number of messages exceeds service limit")]
    LimitTooLarge,

    #[error("invalid limit; must be an integer")]
    InvalidLimit,

    /// Unexpected storage or runtime failure; detail is logged, never returned
    #[error("internal error: {0}")]
    Internal(String),
}

impl ChatError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ChatError::InvalidJson
            | ChatError::TitleEmpty
            | ChatError::TitleTooLong
            | ChatError::MessageEmpty
            | ChatError::MessageTooLong
            | ChatError::InvalidChatId
            | ChatError::LimitTooSmall
            | ChatError::LimitTooLarge
            | ChatError::InvalidLimit => StatusCode::BAD_REQUEST,
            ChatError::ChatNotFound => StatusCode::NOT_FOUND,
            ChatError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            ChatError::Internal(_) => "internal server error".to_string(),
            other => other.to_string(),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the chat service.
pub type Result<T> = std::result::Result<T, ChatError>;
