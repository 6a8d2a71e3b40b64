//! Input validation for the chat service.

use crate::config::ServiceConfig;
use crate::error::{ChatError, Result};

/// Trims `title` and checks its length in characters.
pub fn validate_title(config: &ServiceConfig, title: &str) -> Result<String> {
    let title = title.trim();
    match title.chars().count() {
        0 => Err(ChatError::TitleEmpty),
        n if n > config.max_title_length => Err(ChatError::TitleTooLong),
        _ => Ok(title.to_string()),
    }
}

/// Trims `text` and checks its length in characters.
pub fn validate_message(config: &ServiceConfig, text: &str) -> Result<String> {
    let text = text.trim();
    match text.chars().count() {
        0 => Err(ChatError::MessageEmpty),
        n if n > config.max_message_length => Err(ChatError::MessageTooLong),
        _ => Ok(text.to_string()),
    }
}

/// Resolves the requested message limit.
///
/// Absent, empty and `"0"` select the configured default.
pub fn validate_limit(config: &ServiceConfig, limit: Option<&str>) -> Result<usize> {
    let raw = match limit {
        None | Some("") | Some("0") => return Ok(config.get_limit_default),
        Some(raw) => raw,
    };

    let limit: i64 = raw.parse().map_err(|_| ChatError::InvalidLimit)?;
    if limit < 0 {
        return Err(ChatError::LimitTooSmall);
    }

    let limit = usize::try_from(limit).map_err(|_| ChatError::LimitTooLarge)?;
    if limit > config.get_limit_max {
        return Err(ChatError::LimitTooLarge);
    }

    Ok(limit)
}
