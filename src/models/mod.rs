//! Domain and transport models
//!
//! `domain` holds the chat aggregate shared by the service, cache and storage;
//! `requests`/`responses` are the DTOs serialized over HTTP.

pub mod domain;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use domain::{Chat, ChatId, Message, MessageId, NewChat, NewMessage};
pub use requests::{CreateChatRequest, CreateMessageRequest, GetChatQuery};
pub use responses::{
    ChatResponse, ChatWithMessagesResponse, ErrorResponse, HealthResponse, MessageResponse,
    OkResponse, StatsResponse,
};
