//! Domain models
//!
//! Chats and messages as the service, cache and storage layers see them.

use chrono::{DateTime, Utc};

use crate::cache::EntrySize;

/// Chat identifier; valid ids are positive.
pub type ChatId = i64;
pub type MessageId = i64;

// == Chat ==
/// A chat together with its messages, newest first.
///
/// This is the aggregate held by the cache.
#[derive(Debug, Clone, PartialEq)]
pub struct Chat {
    pub id: ChatId,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub messages: Vec<Message>,
}

impl Chat {
    /// Keeps at most `limit` messages.
    pub fn truncate_messages(&mut self, limit: usize) {
        self.messages.truncate(limit);
    }
}

impl EntrySize for Chat {
    fn entry_size(&self) -> usize {
        self.messages.len()
    }
}

// == Message ==
/// A single message in a chat.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub chat_id: ChatId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A validated chat not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewChat {
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// A validated message not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMessage {
    pub chat_id: ChatId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}
