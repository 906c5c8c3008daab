use super::{Message, MessageContent};
use chrono::{DateTime, Utc};

/// One slot in the ordered message list.
#[derive(Clone, PartialEq, Debug)]
pub enum ListEntry {
    /// A message supplied by the host
    Message(Message),
    /// Synthetic marker for the first message of a calendar day
    DateHeader(DateTime<Utc>),
}

impl ListEntry {
    pub fn as_message(&self) -> Option<&Message> {
        match self {
            ListEntry::Message(message) => Some(message),
            ListEntry::DateHeader(_) => None,
        }
    }

    pub fn is_date_header(&self) -> bool {
        matches!(self, ListEntry::DateHeader(_))
    }

    /// Returns the message id, or `None` for date headers.
    pub fn message_id(&self) -> Option<&str> {
        self.as_message().map(|message| message.id.as_str())
    }

    /// Returns the instant this entry represents.
    pub fn date(&self) -> &DateTime<Utc> {
        match self {
            ListEntry::Message(message) => &message.created_at,
            ListEntry::DateHeader(date) => date,
        }
    }
}

/// Which side of the conversation a message belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    /// Written by someone other than the local user
    Incoming,
    /// Written by the local user
    Outgoing,
}

/// Template discriminant for rendering an entry.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ViewType {
    DateHeader,
    Text(Direction),
    Image(Direction),
}

const VIEW_TYPE_DATE_HEADER: i32 = 130;
const VIEW_TYPE_TEXT_MESSAGE: i32 = 131;
const VIEW_TYPE_IMAGE_MESSAGE: i32 = 132;

impl ViewType {
    /// Resolves the view type of `entry` as seen by `local_user_id`.
    pub fn of(entry: &ListEntry, local_user_id: &str) -> Self {
        let message = match entry {
            ListEntry::DateHeader(_) => return ViewType::DateHeader,
            ListEntry::Message(message) => message,
        };

        let direction = if message.is_outgoing(local_user_id) {
            Direction::Outgoing
        } else {
            Direction::Incoming
        };

        match message.content() {
            MessageContent::Text { .. } => ViewType::Text(direction),
            MessageContent::Image { .. } => ViewType::Image(direction),
        }
    }

    /// Stable integer code for renderers that key templates by number.
    ///
    /// Outgoing message types are the negation of their incoming counterpart.
    pub fn code(self) -> i32 {
        let (code, direction) = match self {
            ViewType::DateHeader => return VIEW_TYPE_DATE_HEADER,
            ViewType::Text(direction) => (VIEW_TYPE_TEXT_MESSAGE, direction),
            ViewType::Image(direction) => (VIEW_TYPE_IMAGE_MESSAGE, direction),
        };

        match direction {
            Direction::Incoming => code,
            Direction::Outgoing => -code,
        }
    }

    pub fn direction(self) -> Option<Direction> {
        match self {
            ViewType::DateHeader => None,
            ViewType::Text(direction) | ViewType::Image(direction) => Some(direction),
        }
    }
}
