//! In-memory storage backend
//!
//! Keeps chats in a BTreeMap behind an async RwLock, assigning ids from
//! monotonically increasing counters.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use crate::error::{ChatError, Result};
use crate::models::{Chat, ChatId, Message, MessageId, NewChat, NewMessage};
use crate::storage::ChatStorage;

#[derive(Debug)]
struct StoredChat {
    title: String,
    created_at: chrono::DateTime<chrono::Utc>,
    /// Oldest first, in insertion order
    messages: Vec<Message>,
}

#[derive(Debug, Default)]
struct Tables {
    chats: BTreeMap<ChatId, StoredChat>,
    last_chat_id: ChatId,
    last_message_id: MessageId,
}

// == Memory Storage ==
/// Volatile [`ChatStorage`] implementation.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    tables: RwLock<Tables>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatStorage for MemoryStorage {
    async fn create_chat(&self, chat: NewChat) -> Result<Chat> {
        let mut tables = self.tables.write().await;
        tables.last_chat_id += 1;
        let id = tables.last_chat_id;

        tables.chats.insert(
            id,
            StoredChat {
                title: chat.title.clone(),
                created_at: chat.created_at,
                messages: Vec::new(),
            },
        );

        Ok(Chat {
            id,
            title: chat.title,
            created_at: chat.created_at,
            messages: Vec::new(),
        })
    }

    async fn create_message(&self, message: NewMessage) -> Result<Message> {
        let mut guard = self.tables.write().await;
        let Tables {
            chats,
            last_message_id,
            ..
        } = &mut *guard;

        let chat = chats
            .get_mut(&message.chat_id)
            .ok_or(ChatError::ChatNotFound)?;

        *last_message_id += 1;
        let stored = Message {
            id: *last_message_id,
            chat_id: message.chat_id,
            text: message.text,
            created_at: message.created_at,
        };
        chat.messages.push(stored.clone());

        Ok(stored)
    }

    async fn get_chat(&self, chat_id: ChatId, limit: usize) -> Result<Chat> {
        let tables = self.tables.read().await;
        let stored = tables.chats.get(&chat_id).ok_or(ChatError::ChatNotFound)?;

        Ok(Chat {
            id: chat_id,
            title: stored.title.clone(),
            created_at: stored.created_at,
            messages: stored.messages.iter().rev().take(limit).cloned().collect(),
        })
    }

    async fn delete_chat(&self, chat_id: ChatId) -> Result<()> {
        self.tables
            .write()
            .await
            .chats
            .remove(&chat_id)
            .map(|_| ())
            .ok_or(ChatError::ChatNotFound)
    }

    async fn close(&self) {
        let mut tables = self.tables.write().await;
        let count = tables.chats.len();
        tables.chats.clear();
        info!(chats = count, "memory storage closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn new_chat(title: &str) -> NewChat {
        NewChat {
            title: title.to_string(),
            created_at: Utc::now(),
        }
    }

    fn new_message(chat_id: ChatId, text: &str) -> NewMessage {
        NewMessage {
            chat_id,
            text: text.to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_chat_assigns_increasing_ids() {
        let storage = MemoryStorage::new();

        let first = storage.create_chat(new_chat("a")).await.unwrap();
        let second = storage.create_chat(new_chat("b")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(first.messages.is_empty());
        assert_eq!(storage.get_chat(second.id, 10).await.unwrap().title, "b");
    }

    #[tokio::test]
    async fn test_get_chat_returns_newest_first_with_limit() {
        let storage = MemoryStorage::new();
        let chat = storage.create_chat(new_chat("a")).await.unwrap();

        for text in ["one", "two", "three"] {
            storage.create_message(new_message(chat.id, text)).await.unwrap();
        }

        let loaded = storage.get_chat(chat.id, 2).await.unwrap();
        let texts: Vec<&str> = loaded.messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["three", "two"]);
        assert_eq!(loaded.title, "a");
    }

    #[tokio::test]
    async fn test_get_missing_chat() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_chat(9, 10).await, Err(ChatError::ChatNotFound));
    }

    #[tokio::test]
    async fn test_create_message_for_missing_chat() {
        let storage = MemoryStorage::new();
        let result = storage.create_message(new_message(5, "hello")).await;
        assert_eq!(result, Err(ChatError::ChatNotFound));
    }

    #[tokio::test]
    async fn test_delete_chat_cascades_messages() {
        let storage = MemoryStorage::new();
        let chat = storage.create_chat(new_chat("a")).await.unwrap();
        storage.create_message(new_message(chat.id, "hi")).await.unwrap();

        storage.delete_chat(chat.id).await.unwrap();

        assert_eq!(storage.get_chat(chat.id, 10).await, Err(ChatError::ChatNotFound));
        assert_eq!(storage.delete_chat(chat.id).await, Err(ChatError::ChatNotFound));
        assert_eq!(
            storage.create_message(new_message(chat.id, "late")).await,
            Err(ChatError::ChatNotFound)
        );
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let storage = MemoryStorage::new();
        let first = storage.create_chat(new_chat("a")).await.unwrap();
        storage.delete_chat(first.id).await.unwrap();

        let second = storage.create_chat(new_chat("b")).await.unwrap();
        assert_eq!(second.id, first.id + 1);
    }
}
