//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Cache sizing parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of chats kept in the cache; zero or negative disables it
    pub capacity: i64,
    /// Chats with more messages than this are never cached
    pub max_messages: usize,
}

impl CacheConfig {
    /// Capacity as the cache expects it, with non-positive values mapped to 0.
    pub fn effective_capacity(&self) -> usize {
        usize::try_from(self.capacity).unwrap_or(0)
    }
}

/// Business-rule limits applied by the chat service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Maximum title length in characters
    pub max_title_length: usize,
    /// Maximum message length in characters
    pub max_message_length: usize,
    /// Upper bound for the `limit` query and for messages loaded per chat
    pub get_limit_max: usize,
    /// Limit used when the request does not give one
    pub get_limit_default: usize,
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Longest time in-flight requests get to finish after a shutdown signal
    pub shutdown_timeout: Duration,
    /// Enables debug-level logging for this crate
    pub log_debug: bool,
    /// Installs per-request tracing on the router
    pub request_logging: bool,
    /// Directory for `app.log`; logs go to stdout when unset
    pub log_dir: Option<PathBuf>,
    pub cache: CacheConfig,
    pub service: ServiceConfig,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SHUTDOWN_TIMEOUT` - Graceful shutdown limit in seconds (default: 10)
    /// - `LOG_DEBUG` - Debug logging, `true`/`false` (default: false)
    /// - `REQUEST_LOGGING` - Per-request logging, `true`/`false` (default: true)
    /// - `LOG_DIR` - Write logs to `<LOG_DIR>/app.log` (default: unset, stdout)
    /// - `CACHE_CAPACITY` - Maximum cached chats, `<= 0` disables (default: 100)
    /// - `CACHE_MAX_MESSAGES` - Maximum messages per cached chat (default: 100)
    /// - `MAX_TITLE_LENGTH` - Maximum chat title length (default: 200)
    /// - `MAX_MESSAGE_LENGTH` - Maximum message length (default: 1000)
    /// - `GET_LIMIT_MAX` - Maximum messages per read (default: 100)
    /// - `GET_LIMIT_DEFAULT` - Messages per read when no limit given (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            shutdown_timeout: Duration::from_secs(env_or(
                "SHUTDOWN_TIMEOUT",
                defaults.shutdown_timeout.as_secs(),
            )),
            log_debug: env_or("LOG_DEBUG", defaults.log_debug),
            request_logging: env_or("REQUEST_LOGGING", defaults.request_logging),
            log_dir: env_path("LOG_DIR"),
            cache: CacheConfig {
                capacity: env_or("CACHE_CAPACITY", defaults.cache.capacity),
                max_messages: env_or("CACHE_MAX_MESSAGES", defaults.cache.max_messages),
            },
            service: ServiceConfig {
                max_title_length: env_or("MAX_TITLE_LENGTH", defaults.service.max_title_length),
                max_message_length: env_or(
                    "MAX_MESSAGE_LENGTH",
                    defaults.service.max_message_length,
                ),
                get_limit_max: env_or("GET_LIMIT_MAX", defaults.service.get_limit_max),
                get_limit_default: env_or(
                    "GET_LIMIT_DEFAULT",
                    defaults.service.get_limit_default,
                ),
            },
        }
    }
}

/// Reads and parses `key`, falling back to `default` when unset or malformed.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Reads a path from `key`; unset or blank means none.
fn env_path(key: &str) -> Option<PathBuf> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            shutdown_timeout: Duration::from_secs(10),
            log_debug: false,
            request_logging: true,
            log_dir: None,
            cache: CacheConfig {
                capacity: 100,
                max_messages: 100,
            },
            service: ServiceConfig::default(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_title_length: 200,
            max_message_length: 1000,
            get_limit_max: 100,
            get_limit_default: 10,
        }
    }
}
