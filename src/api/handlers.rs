//! API Handlers
//!
//! HTTP request handlers for the chat endpoints. Handlers only decode the
//! request and encode the response; every rule lives in [`ChatService`].

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use tracing::debug;

use crate::cache::LruCache;
use crate::config::Config;
use crate::error::{ChatError, Result};
use crate::models::{
    ChatId, ChatResponse, ChatWithMessagesResponse, CreateChatRequest, CreateMessageRequest,
    GetChatQuery, HealthResponse, MessageResponse, OkResponse, StatsResponse,
};
use crate::service::ChatService;
use crate::storage::ChatStorage;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ChatService>,
    /// Whether the router traces each request
    pub request_logging: bool,
}

impl AppState {
    pub fn new(service: Arc<ChatService>) -> Self {
        Self {
            service,
            request_logging: true,
        }
    }

    /// Builds the cache and service described by `config` on top of `storage`.
    pub fn from_config(config: &Config, storage: Arc<dyn ChatStorage>) -> Self {
        let cache = Arc::new(LruCache::new(
            config.cache.effective_capacity(),
            config.cache.max_messages,
        ));
        let service = ChatService::new(config.service.clone(), cache, storage);
        Self {
            request_logging: config.request_logging,
            ..Self::new(Arc::new(service))
        }
    }
}

/// Parses a path segment into a chat id; only positive integers are valid.
fn parse_chat_id(raw: &str) -> Result<ChatId> {
    match raw.parse::<ChatId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ChatError::InvalidChatId),
    }
}

/// Collapses any body extraction failure into [`ChatError::InvalidJson`].
fn json_body<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            debug!(reason = %rejection.body_text(), "rejected request body");
            Err(ChatError::InvalidJson)
        }
    }
}

/// Maps a malformed query string to [`ChatError::InvalidLimit`]; `limit` is
/// the only parameter the API reads.
fn limit_query(
    query: std::result::Result<Query<GetChatQuery>, QueryRejection>,
) -> Result<GetChatQuery> {
    match query {
        Ok(Query(query)) => Ok(query),
        Err(rejection) => {
            debug!(reason = %rejection.body_text(), "rejected query string");
            Err(ChatError::InvalidLimit)
        }
    }
}

/// Handler for POST /api/v1/chats
pub async fn create_chat_handler(
    State(state): State<AppState>,
    body: std::result::Result<Json<CreateChatRequest>, JsonRejection>,
) -> Result<Json<OkResponse<ChatResponse>>> {
    let req = json_body(body)?;
    let chat = state.service.create_chat(&req.title).await?;

    Ok(Json(OkResponse::new(chat.into())))
}

/// Handler for POST /api/v1/chats/:id/messages
pub async fn create_message_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: std::result::Result<Json<CreateMessageRequest>, JsonRejection>,
) -> Result<Json<OkResponse<MessageResponse>>> {
    let chat_id = parse_chat_id(&id)?;
    let req = json_body(body)?;
    let message = state.service.create_message(chat_id, &req.text).await?;

    Ok(Json(OkResponse::new(message.into())))
}

/// Handler for GET /api/v1/chats/:id
///
/// Accepts an optional `limit` query parameter bounding the number of
/// messages returned, newest first.
pub async fn get_chat_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: std::result::Result<Query<GetChatQuery>, QueryRejection>,
) -> Result<Json<OkResponse<ChatWithMessagesResponse>>> {
    let chat_id = parse_chat_id(&id)?;
    let query = limit_query(query)?;
    let chat = state
        .service
        .get_chat(chat_id, query.limit.as_deref())
        .await?;

    Ok(Json(OkResponse::new(chat.into())))
}

/// Handler for DELETE /api/v1/chats/:id
pub async fn delete_chat_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OkResponse<&'static str>>> {
    let chat_id = parse_chat_id(&id)?;
    state.service.delete_chat(chat_id).await?;

    Ok(Json(OkResponse::new("deleted")))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.service.cache_stats().into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
