//! The message list state manager.
//!
//! [`MessageListStore`] owns the ordered entries of a chat view: messages,
//! newest first, interleaved with synthetic date headers. A date header sits
//! right after (at a higher index than) the messages of its day, so a view
//! that draws index 0 at the bottom shows the header above its day.
//!
//! Every mutation runs to completion on the caller's thread and reports what
//! it did through [`ListChange`] events before it returns.

use crate::common::errors::{StoreError, StoreResult};
use crate::format::SelectionListener;
use crate::model::{ListEntry, Message, ViewType};
use crate::utils::{CalendarZone, DateUtils};
use chrono::{DateTime, Utc};
use std::fmt;

pub mod changes;
mod selection;

pub use changes::{ChangeListener, ChangeReplay, ListChange};

/// An entry together with its selection flag.
#[derive(Debug, Clone)]
struct Slot {
    entry: ListEntry,
    selected: bool,
}

impl Slot {
    fn new(entry: ListEntry) -> Self {
        Self {
            entry,
            selected: false,
        }
    }

    fn message_id(&self) -> Option<&str> {
        self.entry.message_id()
    }
}

/// Ordered chat entries with date headers and multi-select.
///
/// # Examples
///
/// ```no_run
/// use chrono::Utc;
/// use store::MessageListStore;
/// use store::model::{Author, Message};
///
/// let mut list = MessageListStore::new();
/// list.set_change_listener(|change: &store::ListChange| println!("{change:?}"));
///
/// let author = Author::new("1", "Carlos Shepard", "");
/// list.insert_at_head(Message::new("m-1", author, Some("hi".into()), Utc::now()))?;
///
/// // The first message of a day brings its header along
/// assert_eq!(list.len(), 2);
/// # Ok::<(), store::StoreError>(())
/// ```
pub struct MessageListStore {
    slots: Vec<Slot>,
    selected_count: usize,
    selection_mode_active: bool,
    tz: CalendarZone,
    selection_listener: Option<Box<dyn SelectionListener>>,
    change_listener: Option<Box<dyn ChangeListener>>,
    scroll_to_head: Option<Box<dyn FnMut()>>,
}

impl fmt::Debug for MessageListStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageListStore")
            .field("entries", &self.slots.len())
            .field("selected_count", &self.selected_count)
            .field("selection_mode_active", &self.selection_mode_active)
            .field("tz", &self.tz)
            .field("selection_enabled", &self.selection_listener.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for MessageListStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListStore {
    /// Creates an empty store that compares days in the host's local zone.
    pub fn new() -> Self {
        Self::with_time_zone(CalendarZone::Local)
    }

    /// Creates an empty store that compares days in `tz`.
    pub fn with_time_zone(tz: impl Into<CalendarZone>) -> Self {
        let tz = tz.into();
        Self {
            slots: Vec::new(),
            selected_count: 0,
            selection_mode_active: false,
            tz,
            selection_listener: None,
            change_listener: None,
            scroll_to_head: None,
        }
    }

    pub fn time_zone(&self) -> CalendarZone {
        self.tz
    }

    /// Registers the listener that receives every [`ListChange`].
    pub fn set_change_listener<L>(&mut self, listener: L)
    where
        L: ChangeListener + 'static,
    {
        self.change_listener = Some(Box::new(listener));
    }

    /// Registers a callback run after every insert at the head.
    pub fn set_scroll_to_head<F>(&mut self, callback: F)
    where
        F: FnMut() + 'static,
    {
        self.scroll_to_head = Some(Box::new(callback));
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn entry(&self, index: usize) -> Option<&ListEntry> {
        self.slots.get(index).map(|slot| &slot.entry)
    }

    /// Iterates over the entries, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &ListEntry> {
        self.slots.iter().map(|slot| &slot.entry)
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|slot| slot.selected)
    }

    /// Returns the index of the message with `id`.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.message_id() == Some(id))
    }

    /// Returns the template discriminant for `entry`.
    pub fn view_type_for(entry: &ListEntry, local_user_id: &str) -> ViewType {
        ViewType::of(entry, local_user_id)
    }

    /// Returns the template discriminant for the entry at `index`.
    pub fn view_type_at(&self, index: usize, local_user_id: &str) -> Option<ViewType> {
        self.entry(index)
            .map(|entry| Self::view_type_for(entry, local_user_id))
    }

    /// Checks whether the message at `index` continues a run by one author.
    ///
    /// True when the next older entry is a message by the same author, so a
    /// renderer can skip repeating the avatar and name.
    pub fn is_continuation(&self, index: usize) -> bool {
        let (Some(current), Some(previous)) = (
            self.entry(index).and_then(ListEntry::as_message),
            index
                .checked_add(1)
                .and_then(|older| self.entry(older))
                .and_then(ListEntry::as_message),
        ) else {
            return false;
        };
        current.author.id == previous.author.id
    }

    /// Inserts a message at the head of the list.
    ///
    /// When the message starts a new calendar day relative to the current
    /// head (or the list is empty), a date header is inserted first so that
    /// it ends up right after the message.
    pub fn insert_at_head(&mut self, message: Message) -> StoreResult<()> {
        if self.position_of(&message.id).is_some() {
            log::warn!("Rejected duplicate message id: {}", message.id);
            return Err(StoreError::DuplicateMessageId(message.id));
        }

        let starts_new_day = !self.is_head_same_day(&message.created_at);
        if starts_new_day {
            self.slots
                .insert(0, Slot::new(ListEntry::DateHeader(message.created_at)));
        }

        log::debug!(
            "Inserting message {} at head (new day: {starts_new_day})",
            message.id
        );
        self.slots.insert(0, Slot::new(ListEntry::Message(message)));

        let count = if starts_new_day { 2 } else { 1 };
        self.emit(ListChange::Inserted { start: 0, count });

        if let Some(scroll) = self.scroll_to_head.as_mut() {
            scroll();
        }
        Ok(())
    }

    /// Deletes the messages with the given ids.
    ///
    /// Unknown ids are ignored. When at least one message was removed, the
    /// date headers are recounted. Returns the number of messages removed.
    pub fn delete_by_ids<I>(&mut self, ids: I) -> usize
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let (removed, deselected) = self.remove_messages(ids);
        if deselected > 0 {
            self.selected_count -= deselected;
            self.selection_mode_active = self.selected_count > 0;
            self.notify_selection_changed();
        }
        removed
    }

    /// Removes every entry and resets the selection.
    pub fn clear(&mut self) {
        let len = self.slots.len();
        if len == 0 {
            return;
        }

        let had_selection = self.selected_count > 0;
        self.slots.clear();
        self.selected_count = 0;
        self.selection_mode_active = false;

        log::debug!("Cleared {len} entries");
        self.emit(ListChange::Removed { start: 0, count: len });
        if had_selection {
            self.notify_selection_changed();
        }
    }

    /// Removes messages without touching the selection counters.
    ///
    /// Returns how many messages were removed and how many of them were
    /// selected.
    fn remove_messages<I>(&mut self, ids: I) -> (usize, usize)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut removed = 0;
        let mut deselected = 0;

        for id in ids {
            let id = id.as_ref();
            let Some(index) = self.position_of(id) else {
                log::trace!("Ignoring delete of unknown message {id}");
                continue;
            };

            let slot = self.slots.remove(index);
            if slot.selected {
                deselected += 1;
            }
            removed += 1;
            log::debug!("Deleted message {id} at index {index}");
            self.emit(ListChange::Removed {
                start: index,
                count: 1,
            });
        }

        if removed > 0 {
            self.recount_date_headers();
        }
        (removed, deselected)
    }

    /// Drops headers left dangling by deletions.
    ///
    /// A header is dropped when it is the first entry or when it directly
    /// follows another header. Removal runs from the highest index down so
    /// each emitted index is valid at the time it is emitted.
    fn recount_date_headers(&mut self) {
        let dangling: Vec<usize> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(index, slot)| {
                slot.entry.is_date_header()
                    && (*index == 0 || self.slots[index - 1].entry.is_date_header())
            })
            .map(|(index, _)| index)
            .collect();

        for index in dangling.into_iter().rev() {
            self.slots.remove(index);
            log::debug!("Removed dangling date header at index {index}");
            self.emit(ListChange::Removed {
                start: index,
                count: 1,
            });
        }
    }

    fn is_head_same_day(&self, date: &DateTime<Utc>) -> bool {
        match self.slots.first().map(|slot| &slot.entry) {
            Some(ListEntry::Message(head)) => {
                DateUtils::is_same_day(date, &head.created_at, &self.tz)
            }
            _ => false,
        }
    }

    fn emit(&mut self, change: ListChange) {
        log::trace!("List change: {change:?}");
        if let Some(listener) = self.change_listener.as_mut() {
            listener.on_change(&change);
        }
    }

    fn notify_selection_changed(&mut self) {
        let count = self.selected_count;
        if let Some(listener) = self.selection_listener.as_mut() {
            listener.on_selection_changed(count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Author;
    use chrono::{FixedOffset, TimeZone};
    use claims::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    mod helpers {
        use super::*;

        pub fn utc() -> FixedOffset {
            FixedOffset::east_opt(0).unwrap()
        }

        pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
        }

        pub fn message_by(id: &str, author: &str, day: u32, hour: u32) -> Message {
            Message::new(
                id,
                Author::new(author, format!("User {author}"), ""),
                Some(format!("text {id}")),
                at(day, hour),
            )
        }

        pub fn message(id: &str, day: u32, hour: u32) -> Message {
            message_by(id, "1", day, hour)
        }

        /// Compact view of the list: message ids, `H<day>` for headers
        pub fn layout(store: &MessageListStore) -> Vec<String> {
            store
                .entries()
                .map(|entry| match entry {
                    ListEntry::Message(message) => message.id.clone(),
                    ListEntry::DateHeader(date) => {
                        format!("H{}", chrono::Datelike::day(date))
                    }
                })
                .collect()
        }

        pub fn recording(store: &mut MessageListStore) -> Rc<RefCell<Vec<ListChange>>> {
            let changes = Rc::new(RefCell::new(Vec::new()));
            let sink = Rc::clone(&changes);
            store.set_change_listener(move |change: &ListChange| sink.borrow_mut().push(*change));
            changes
        }
    }

    mod inserting {
        use super::*;
        use helpers::*;

        #[test]
        fn test_first_message_brings_header() {
            let mut store = MessageListStore::with_time_zone(utc());
            let changes = recording(&mut store);

            assert_ok!(store.insert_at_head(message("m1", 1, 9)));
            assert_eq!(layout(&store), vec!["m1", "H1"]);
            assert_eq!(
                *changes.borrow(),
                vec![ListChange::Inserted { start: 0, count: 2 }]
            );
        }

        #[test]
        fn test_same_day_message_has_no_header() {
            let mut store = MessageListStore::with_time_zone(utc());
            assert_ok!(store.insert_at_head(message("m1", 1, 9)));
            let changes = recording(&mut store);

            assert_ok!(store.insert_at_head(message("m2", 1, 17)));
            assert_eq!(layout(&store), vec!["m2", "m1", "H1"]);
            assert_eq!(
                *changes.borrow(),
                vec![ListChange::Inserted { start: 0, count: 1 }]
            );
        }

        #[test]
        fn test_day_boundary_follows_time_zone() {
            // 23:00 UTC on the 1st and 01:00 UTC on the 2nd are the same day at UTC-5
            let mut store = MessageListStore::with_time_zone(FixedOffset::west_opt(5 * 3600).unwrap());
            assert_ok!(store.insert_at_head(message("m1", 1, 23)));
            assert_ok!(store.insert_at_head(message("m2", 2, 1)));
            assert_eq!(store.len(), 3);

            let mut store = MessageListStore::with_time_zone(utc());
            assert_ok!(store.insert_at_head(message("m1", 1, 23)));
            assert_ok!(store.insert_at_head(message("m2", 2, 1)));
            assert_eq!(store.len(), 4);
        }

        #[test]
        fn test_default_store_uses_host_calendar() {
            assert_eq!(MessageListStore::new().time_zone(), CalendarZone::Local);
            assert_eq!(MessageListStore::default().time_zone(), CalendarZone::Local);
        }

        #[test]
        fn test_day_boundary_across_daylight_saving() {
            let berlin = CalendarZone::Named(chrono_tz::Europe::Berlin);
            let winter = |day: u32, hour: u32, min: u32| {
                Utc.with_ymd_and_hms(2024, 1, day, hour, min, 0).unwrap()
            };
            let author = Author::new("1", "Coleman Bell", "");

            // 23:30 CET on the 10th, then 10:00 CET on the 11th
            let mut store = MessageListStore::with_time_zone(berlin);
            let late = Message::new("m1", author.clone(), None, winter(10, 22, 30));
            let next = Message::new("m2", author, None, winter(11, 9, 0));
            assert_ok!(store.insert_at_head(late));
            assert_ok!(store.insert_at_head(next));
            assert_eq!(layout(&store), vec!["m2", "H11", "m1", "H10"]);
        }

        #[test]
        fn test_duplicate_id_is_rejected() {
            let mut store = MessageListStore::with_time_zone(utc());
            assert_ok!(store.insert_at_head(message("m1", 1, 9)));
            let changes = recording(&mut store);

            let result = store.insert_at_head(message("m1", 2, 9));
            assert_matches!(result, Err(StoreError::DuplicateMessageId(id)) if id == "m1");
            assert_eq!(layout(&store), vec!["m1", "H1"]);
            assert!(changes.borrow().is_empty());
        }

        #[test]
        fn test_scroll_to_head_runs_after_insert() {
            let mut store = MessageListStore::with_time_zone(utc());
            let scrolls = Rc::new(Cell::new(0));
            let counter = Rc::clone(&scrolls);
            store.set_scroll_to_head(move || counter.set(counter.get() + 1));

            assert_ok!(store.insert_at_head(message("m1", 1, 9)));
            assert_ok!(store.insert_at_head(message("m2", 1, 10)));
            assert_eq!(scrolls.get(), 2);
        }
    }

    mod deleting {
        use super::*;
        use helpers::*;

        fn three_days() -> MessageListStore {
            let mut store = MessageListStore::with_time_zone(utc());
            for (id, day) in [("m1", 1), ("m2", 2), ("m3", 3)] {
                store.insert_at_head(message(id, day, 12)).unwrap();
            }
            store
        }

        #[test]
        fn test_delete_middle_day_drops_duplicate_header() {
            let mut store = three_days();
            assert_eq!(layout(&store), vec!["m3", "H3", "m2", "H2", "m1", "H1"]);
            let changes = recording(&mut store);

            assert_eq!(store.delete_by_ids(["m2"]), 1);
            assert_eq!(layout(&store), vec!["m3", "H3", "m1", "H1"]);
            assert_eq!(
                *changes.borrow(),
                vec![
                    ListChange::Removed { start: 2, count: 1 },
                    ListChange::Removed { start: 2, count: 1 },
                ]
            );
        }

        #[test]
        fn test_delete_everything_leaves_empty_list() {
            let mut store = three_days();
            assert_eq!(store.delete_by_ids(["m1", "m2", "m3"]), 3);
            assert!(store.is_empty());
        }

        #[test]
        fn test_delete_unknown_ids_is_noop() {
            let mut store = three_days();
            let changes = recording(&mut store);

            assert_eq!(store.delete_by_ids(["nope", "also-nope"]), 0);
            assert_eq!(store.len(), 6);
            assert!(changes.borrow().is_empty());
        }

        #[test]
        fn test_delete_selected_message_keeps_count_consistent() {
            let mut store = three_days();
            let counts = Rc::new(RefCell::new(Vec::new()));
            let sink = Rc::clone(&counts);
            let listener = move |count: usize| sink.borrow_mut().push(count);
            assert_ok!(store.enable_selection_mode(Some(Box::new(listener))));
            store.toggle_selection("m2");
            store.toggle_selection("m3");

            store.delete_by_ids(["m3"]);
            assert_eq!(store.selected_count(), 1);
            assert!(store.is_selection_mode_active());
            assert_eq!(*counts.borrow(), vec![1, 2, 1]);
        }

        #[test]
        fn test_clear_removes_everything_in_one_event() {
            let mut store = three_days();
            let changes = recording(&mut store);

            store.clear();
            assert!(store.is_empty());
            assert_eq!(
                *changes.borrow(),
                vec![ListChange::Removed { start: 0, count: 6 }]
            );

            store.clear();
            assert_eq!(changes.borrow().len(), 1);
        }
    }

    mod rendering_helpers {
        use super::*;
        use crate::model::Direction;
        use helpers::*;

        #[test]
        fn test_continuation_by_same_author() {
            let mut store = MessageListStore::with_time_zone(utc());
            store.insert_at_head(message_by("m1", "a", 1, 9)).unwrap();
            store.insert_at_head(message_by("m2", "a", 1, 10)).unwrap();
            store.insert_at_head(message_by("m3", "b", 1, 11)).unwrap();
            // [m3(b), m2(a), m1(a), H1]

            assert!(!store.is_continuation(0));
            assert!(store.is_continuation(1));
            assert!(!store.is_continuation(2));
            assert!(!store.is_continuation(3));
            assert!(!store.is_continuation(10));
            assert!(!store.is_continuation(usize::MAX));
        }

        #[test]
        fn test_view_type_at() {
            let mut store = MessageListStore::with_time_zone(utc());
            store.insert_at_head(message_by("m1", "me", 1, 9)).unwrap();

            assert_eq!(
                store.view_type_at(0, "me"),
                Some(ViewType::Text(Direction::Outgoing))
            );
            assert_eq!(store.view_type_at(1, "me"), Some(ViewType::DateHeader));
            assert_eq!(store.view_type_at(2, "me"), None);
        }
    }
}
