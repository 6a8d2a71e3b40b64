//! chatX - chat and message service with an LRU read cache
//!
//! Chats and their messages are kept in a [`storage::ChatStorage`]; reads go
//! through a bounded, thread-safe LRU cache of whole chats.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod server;
pub mod service;
pub mod storage;

pub use api::{create_router, AppState};
pub use config::Config;
pub use error::{ChatError, Result};
pub use service::ChatService;
