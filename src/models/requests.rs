//! Request DTOs for the chat API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

/// Request body for POST /api/v1/chats
#[derive(Debug, Clone, Deserialize)]
pub struct CreateChatRequest {
    pub title: String,
}

/// Request body for POST /api/v1/chats/:id/messages
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMessageRequest {
    pub text: String,
}

/// Query string for GET /api/v1/chats/:id
///
/// `limit` stays a raw string so that the service can tell a malformed
/// value apart from a negative or oversized one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetChatQuery {
    #[serde(default)]
    pub limit: Option<String>,
}
