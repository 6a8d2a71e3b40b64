//! Storage Module
//!
//! Persistence boundary for chats and messages. The service only talks to
//! [`ChatStorage`]; [`MemoryStorage`] is the bundled backend.

mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Chat, ChatId, Message, NewChat, NewMessage};

pub use memory::MemoryStorage;

// == Storage Trait ==
/// Source of truth for chats and their messages.
#[async_trait]
pub trait ChatStorage: Send + Sync {
    /// Persists a chat and returns it with its assigned id.
    async fn create_chat(&self, chat: NewChat) -> Result<Chat>;

    /// Persists a message. Fails with `ChatNotFound` if the parent chat is absent.
    async fn create_message(&self, message: NewMessage) -> Result<Message>;

    /// Loads a chat with at most `limit` of its messages, newest first.
    async fn get_chat(&self, chat_id: ChatId, limit: usize) -> Result<Chat>;

    /// Deletes a chat and its messages. Fails with `ChatNotFound` if absent.
    async fn delete_chat(&self, chat_id: ChatId) -> Result<()>;

    /// Releases backend resources during shutdown.
    async fn close(&self);
}
