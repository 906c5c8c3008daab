//! A chat session: one message list plus the host-side state around it.
//!
//! [`ChatSession`] wires the store's listeners to observable counters the
//! way a view model would. The selected message count is mirrored on every
//! selection change, and every insert at the head bumps a scroll request
//! counter that a renderer can compare against what it last drew.

use crate::config::AppConfig;
use crate::error::AppResult;
use std::cell::Cell;
use std::rc::Rc;
use store::MessageListStore;
use store::format::{CopyFormatter, SelectionListener};
use store::model::Message;
use store::utils::CalendarZone;

pub struct ChatSession {
    store: MessageListStore,
    local_user_id: String,
    copy_reverse: bool,
    copy_formatter: CopyFormatter,
    selection_count: Rc<Cell<usize>>,
    scroll_requests: Rc<Cell<usize>>,
}

impl ChatSession {
    /// Creates a session with selection enabled.
    pub fn new(
        local_user_id: impl Into<String>,
        tz: impl Into<CalendarZone>,
        copy_reverse: bool,
    ) -> AppResult<Self> {
        let tz = tz.into();
        let mut store = MessageListStore::with_time_zone(tz);

        let selection_count = Rc::new(Cell::new(0));
        let count_sink = Rc::clone(&selection_count);
        let listener: Box<dyn SelectionListener> =
            Box::new(move |count: usize| count_sink.set(count));
        store.enable_selection_mode(Some(listener))?;

        let scroll_requests = Rc::new(Cell::new(0));
        let scroll_sink = Rc::clone(&scroll_requests);
        store.set_scroll_to_head(move || scroll_sink.set(scroll_sink.get() + 1));

        Ok(Self {
            store,
            local_user_id: local_user_id.into(),
            copy_reverse,
            copy_formatter: CopyFormatter::new(tz),
            selection_count,
            scroll_requests,
        })
    }

    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        Self::new(
            config.local_user_id(),
            config.time_zone(),
            config.copy_reverse(),
        )
    }

    /// Feeds messages to the list, oldest first.
    ///
    /// Messages whose id is already listed are skipped with a warning.
    /// Returns how many messages were added.
    pub fn load(&mut self, messages: impl IntoIterator<Item = Message>) -> usize {
        let mut added = 0;
        for message in messages {
            match self.store.insert_at_head(message) {
                Ok(()) => added += 1,
                Err(e) => log::warn!("Skipping message: {e}"),
            }
        }
        log::info!("Loaded {added} messages, {} entries listed", self.store.len());
        added
    }

    /// Adds one newly arrived message.
    pub fn receive(&mut self, message: Message) -> AppResult<()> {
        self.store.insert_at_head(message)?;
        Ok(())
    }

    /// Selects or deselects a message, as a long press would.
    pub fn select(&mut self, id: &str) -> bool {
        let changed = self.store.handle_long_press(id);
        if !changed {
            log::warn!("Message {id} is not in the conversation");
        }
        changed
    }

    /// Handles a tap; returns false when the tap was not consumed.
    pub fn click(&mut self, id: &str) -> bool {
        self.store.handle_click(id)
    }

    /// Copies the selected messages as text and ends the selection.
    ///
    /// Returns `None` when nothing was selected.
    pub fn copy_selected(&mut self) -> Option<String> {
        if self.store.selected_count() == 0 {
            return None;
        }
        let text = self
            .store
            .format_selected_as_text(Some(&self.copy_formatter), self.copy_reverse);
        Some(text)
    }

    /// Deletes the selected messages; returns how many were removed.
    pub fn delete_selected(&mut self) -> usize {
        self.store.delete_selected()
    }

    /// Handles the back action.
    ///
    /// While messages are selected, back clears the selection and is
    /// consumed (returns true). Otherwise the caller should navigate away.
    pub fn handle_back(&mut self) -> bool {
        if self.store.is_selection_mode_active() {
            self.store.clear_selection();
            return true;
        }
        false
    }

    /// Selected count as last reported by the store's listener.
    pub fn selection_count(&self) -> usize {
        self.selection_count.get()
    }

    /// Number of times the list asked to be scrolled to its newest entry.
    pub fn scroll_requests(&self) -> usize {
        self.scroll_requests.get()
    }

    pub fn local_user_id(&self) -> &str {
        &self.local_user_id
    }

    pub fn store(&self) -> &MessageListStore {
        &self.store
    }
}
