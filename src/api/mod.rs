//! API Module
//!
//! HTTP handlers and routing for the chat REST API.
//!
//! # Endpoints
//! - `POST /api/v1/chats` - Create a chat
//! - `POST /api/v1/chats/:id/messages` - Add a message
//! - `GET /api/v1/chats/:id` - Read a chat with its newest messages
//! - `DELETE /api/v1/chats/:id` - Delete a chat
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
