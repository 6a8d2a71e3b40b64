//! Chat Service Module
//!
//! Business logic for chats and messages. Reads go through the LRU cache
//! (cache-aside); writes that change a chat invalidate its cached copy.

mod validation;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use crate::cache::{CacheStats, LruCache};
use crate::config::ServiceConfig;
use crate::error::{ChatError, Result};
use crate::models::{Chat, ChatId, Message, NewChat, NewMessage};
use crate::storage::ChatStorage;

pub use validation::{validate_limit, validate_message, validate_title};

/// Cache of full chat aggregates keyed by chat id.
pub type ChatCache = LruCache<ChatId, Chat>;

// == Chat Service ==
/// Coordinates validation, the chat cache and storage.
pub struct ChatService {
    config: ServiceConfig,
    cache: Arc<ChatCache>,
    storage: Arc<dyn ChatStorage>,
    /// Bumped after every storage write that makes a cached chat stale
    invalidations: AtomicU64,
}

impl ChatService {
    // == Constructor ==
    pub fn new(config: ServiceConfig, cache: Arc<ChatCache>, storage: Arc<dyn ChatStorage>) -> Self {
        Self {
            config,
            cache,
            storage,
            invalidations: AtomicU64::new(0),
        }
    }

    // == Create Chat ==
    /// Validates and persists a new, empty chat.
    pub async fn create_chat(&self, title: &str) -> Result<Chat> {
        let title = validate_title(&self.config, title)?;

        let chat = NewChat {
            title,
            created_at: Utc::now(),
        };

        self.storage.create_chat(chat).await.map_err(|err| {
            error!(error = %err, "failed to create chat");
            err
        })
    }

    // == Create Message ==
    /// Validates and persists a message, then drops the parent chat from the
    /// cache so the next read sees it.
    pub async fn create_message(&self, chat_id: ChatId, text: &str) -> Result<Message> {
        let text = validate_message(&self.config, text)?;

        let message = NewMessage {
            chat_id,
            text,
            created_at: Utc::now(),
        };

        let message = self
            .storage
            .create_message(message)
            .await
            .map_err(|err| log_unexpected(err, chat_id, "failed to create message"))?;

        self.invalidate(chat_id);
        Ok(message)
    }

    // == Get Chat ==
    /// Returns a chat with at most `limit` of its newest messages.
    ///
    /// On a cache miss the chat is loaded with the service-wide maximum of
    /// messages and cached in full; the requested limit only trims the copy
    /// handed back to the caller. A load that overlaps a write to any chat is
    /// served but not cached.
    pub async fn get_chat(&self, chat_id: ChatId, limit: Option<&str>) -> Result<Chat> {
        let limit = validate_limit(&self.config, limit)?;

        let mut chat = match self.cache.get(&chat_id) {
            Some(chat) => chat,
            None => {
                let epoch = self.invalidations.load(Ordering::SeqCst);
                let chat = self
                    .storage
                    .get_chat(chat_id, self.config.get_limit_max)
                    .await
                    .map_err(|err| log_unexpected(err, chat_id, "failed to get chat"))?;
                self.cache.put_if(chat_id, chat.clone(), || {
                    self.invalidations.load(Ordering::SeqCst) == epoch
                });
                chat
            }
        };

        chat.truncate_messages(limit);
        Ok(chat)
    }

    // == Delete Chat ==
    /// Deletes a chat; the cached copy is dropped only if storage succeeded.
    pub async fn delete_chat(&self, chat_id: ChatId) -> Result<()> {
        self.storage
            .delete_chat(chat_id)
            .await
            .map_err(|err| log_unexpected(err, chat_id, "failed to delete chat"))?;

        self.invalidate(chat_id);
        Ok(())
    }

    // The epoch moves before the delete, so a concurrent load either sees the
    // new epoch under the cache lock or has its entry removed here.
    fn invalidate(&self, chat_id: ChatId) {
        self.invalidations.fetch_add(1, Ordering::SeqCst);
        self.cache.delete(&chat_id);
    }

    // == Stats ==
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn cache(&self) -> &Arc<ChatCache> {
        &self.cache
    }

    // == Close ==
    /// Releases the cache and storage. Called once on shutdown.
    pub async fn close(&self) {
        self.cache.close();
        self.storage.close().await;
        info!("chat service closed");
    }
}

/// Logs anything other than a missing chat, which is an expected outcome.
fn log_unexpected(err: ChatError, chat_id: ChatId, message: &str) -> ChatError {
    if err != ChatError::ChatNotFound {
        error!(chat_id, error = %err, "{}", message);
    }
    err
}
