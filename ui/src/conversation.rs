//! Conversation transcript loading.
//!
//! A conversation file is a JSON array of messages in any order:
//!
//! ```json
//! [
//!   {
//!     "id": "m-1",
//!     "author": { "id": "2", "name": "Candace Frazier" },
//!     "text": "hi",
//!     "created_at": "2024-06-10T09:00:00Z"
//!   }
//! ]
//! ```
//!
//! `id` may be omitted, in which case a random one is generated. The
//! returned messages are sorted oldest first so they can be fed to the
//! store's head insert one by one.

use crate::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::Path;
use store::model::{Author, Message};

#[derive(Debug, Deserialize)]
struct ConversationMessage {
    #[serde(default)]
    id: Option<String>,
    author: Author,
    #[serde(default)]
    text: Option<String>,
    created_at: DateTime<Utc>,
    #[serde(default)]
    image_url: Option<String>,
}

impl From<ConversationMessage> for Message {
    fn from(raw: ConversationMessage) -> Self {
        let id = raw
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let message = Message::new(id, raw.author, raw.text, raw.created_at);
        match raw.image_url {
            Some(url) => message.with_image(url),
            None => message,
        }
    }
}

/// Parses a conversation from JSON, oldest message first.
pub fn parse_conversation(json: &str) -> AppResult<Vec<Message>> {
    let raw: Vec<ConversationMessage> = serde_json::from_str(json)?;
    let mut messages: Vec<Message> = raw.into_iter().map(Message::from).collect();
    messages.sort_by_key(|message| message.created_at);
    log::debug!("Parsed {} messages", messages.len());
    Ok(messages)
}

/// Reads and parses a conversation file.
pub fn load_conversation(path: &Path) -> AppResult<Vec<Message>> {
    let json = std::fs::read_to_string(path).map_err(|e| {
        AppError::Io(format!(
            "Failed to read conversation '{}': {e}",
            path.display()
        ))
    })?;
    parse_conversation(&json)
}
