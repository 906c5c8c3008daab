use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod entry;

pub use entry::{Direction, ListEntry, ViewType};

/// Text shown in place of a message body when the message only carries media.
pub const ATTACHMENT_PLACEHOLDER: &str = "[attachment]";

/// The author of a chat message.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Author {
    /// Stable identifier, compared against the local user id to decide direction
    pub id: String,
    /// Display name
    pub name: String,
    /// Avatar image location, handed to an image loader by renderers
    #[serde(default)]
    pub avatar_url: String,
}

impl Author {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        avatar_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar_url: avatar_url.into(),
        }
    }
}

/// A chat message as supplied by the host application.
///
/// The store never mutates messages; it only orders them, wraps them in list
/// entries and tracks their selection state.
///
/// # Examples
///
/// ```no_run
/// use chrono::Utc;
/// use store::model::{Author, Message, MessageContent};
///
/// let author = Author::new("1", "Carlos Shepard", "https://example.com/a.png");
/// let message = Message::new("m-1", author, Some("hi".to_string()), Utc::now())
///     .with_image("https://example.com/photo.png");
///
/// assert!(matches!(message.content(), MessageContent::Image { .. }));
/// ```
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Message {
    /// Unique identifier, never reused
    pub id: String,
    /// Who wrote the message
    pub author: Author,
    /// Message body; `None` or empty for media-only messages
    pub text: Option<String>,
    /// Creation instant, used for date header placement
    pub created_at: DateTime<Utc>,
    /// Attached image, if any
    #[serde(default)]
    pub image_url: Option<String>,
}

/// The content variant of a message, as seen by renderers.
///
/// Each variant maps to its own cell template. New content kinds are added
/// as new variants so that every renderer match has to handle them.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MessageContent<'a> {
    /// Plain text, possibly absent
    Text { text: Option<&'a str> },
    /// An image attachment with an optional caption
    Image {
        url: &'a str,
        caption: Option<&'a str>,
    },
}

impl Message {
    pub fn new(
        id: impl Into<String>,
        author: Author,
        text: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            author,
            text,
            created_at,
            image_url: None,
        }
    }

    /// Attaches an image to the message.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Returns the message text when it is present and not empty.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|text| !text.is_empty())
    }

    /// Returns the content variant of this message.
    ///
    /// A message is an image message whenever it carries an image url,
    /// regardless of whether it also has text.
    pub fn content(&self) -> MessageContent<'_> {
        match self.image_url.as_deref() {
            Some(url) => MessageContent::Image {
                url,
                caption: self.text(),
            },
            None => MessageContent::Text { text: self.text() },
        }
    }

    /// Returns true when `local_user_id` wrote this message.
    pub fn is_outgoing(&self, local_user_id: &str) -> bool {
        self.author.id == local_user_id
    }
}

/// Default stringification, used when copying without a formatter.
impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}",
            self.author.name,
            self.text().unwrap_or(ATTACHMENT_PLACEHOLDER)
        )
    }
}
