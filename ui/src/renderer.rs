//! Plain-text rendering of a message list.
//!
//! The store keeps entries newest first. A terminal reads top to bottom,
//! so lines are produced from the highest index down: the oldest entry is
//! on top and each date header sits above the messages of its day.

use crate::session::ChatSession;
use store::MessageListStore;
use store::format::{DateLabelFormatter, ImageLoader};
use store::model::{ATTACHMENT_PLACEHOLDER, Direction, ListEntry, Message, MessageContent};

const INCOMING_MARKER: &str = "<";
const OUTGOING_MARKER: &str = ">";

/// Writes image references as text.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextImageLoader;

impl ImageLoader<String> for TextImageLoader {
    fn load(&self, target: &mut String, url: Option<&str>) {
        match url {
            Some(url) if !url.is_empty() => target.push_str(&format!("[image: {url}]")),
            _ => target.push_str("[image]"),
        }
    }
}

pub struct TextRenderer<D, I = TextImageLoader> {
    date_labels: D,
    images: I,
}

impl<D: DateLabelFormatter> TextRenderer<D> {
    pub fn new(date_labels: D) -> Self {
        Self {
            date_labels,
            images: TextImageLoader,
        }
    }
}

impl<D, I> TextRenderer<D, I>
where
    D: DateLabelFormatter,
    I: ImageLoader<String>,
{
    pub fn with_image_loader(date_labels: D, images: I) -> Self {
        Self {
            date_labels,
            images,
        }
    }

    /// Renders every entry, oldest on top.
    pub fn render(&self, store: &MessageListStore, local_user_id: &str) -> Vec<String> {
        (0..store.len())
            .rev()
            .filter_map(|index| self.render_entry(store, index, local_user_id))
            .collect()
    }

    /// Renders the whole session view: the list followed by the status line.
    pub fn render_session(&self, session: &ChatSession) -> Vec<String> {
        let mut lines = self.render(session.store(), session.local_user_id());
        if let Some(status) = selection_status(session.selection_count()) {
            lines.push(String::new());
            lines.push(status);
        }
        lines
    }

    fn render_entry(
        &self,
        store: &MessageListStore,
        index: usize,
        local_user_id: &str,
    ) -> Option<String> {
        let entry = store.entry(index)?;
        let line = match (entry, MessageListStore::view_type_for(entry, local_user_id)) {
            (ListEntry::DateHeader(date), _) => {
                format!("── {} ──", self.date_labels.format(date))
            }
            (ListEntry::Message(message), view_type) => {
                let direction = view_type.direction().unwrap_or(Direction::Incoming);
                let mut line = String::new();
                if store.is_selection_mode_active() {
                    line.push_str(if store.is_selected(index) { "[x] " } else { "[ ] " });
                }
                line.push_str(match direction {
                    Direction::Incoming => INCOMING_MARKER,
                    Direction::Outgoing => OUTGOING_MARKER,
                });
                line.push(' ');
                // Runs by one author show the name once, on their oldest message
                if direction == Direction::Incoming && !store.is_continuation(index) {
                    line.push_str(&message.author.name);
                    line.push_str(": ");
                }
                self.push_body(&mut line, message);
                line
            }
        };
        Some(line)
    }

    fn push_body(&self, line: &mut String, message: &Message) {
        match message.content() {
            MessageContent::Text { text } => {
                line.push_str(text.unwrap_or(ATTACHMENT_PLACEHOLDER));
            }
            MessageContent::Image { url, caption } => {
                self.images.load(line, Some(url));
                if let Some(caption) = caption {
                    line.push(' ');
                    line.push_str(caption);
                }
            }
        }
    }
}

/// Status line shown while messages are selected.
pub fn selection_status(count: usize) -> Option<String> {
    (count > 0).then(|| format!("• {count} selected"))
}
