// Multi-select over the message list
use super::{ListChange, MessageListStore};
use crate::common::errors::{StoreError, StoreResult};
use crate::format::{MessageTextFormatter, SelectionListener};
use crate::model::Message;

/// Separator between messages in copied text.
const COPY_SEPARATOR: &str = "\n\n";

impl MessageListStore {
    /// Enables selection, reporting count changes to `listener`.
    ///
    /// Fails with [`StoreError::InvalidArgument`] when no listener is given;
    /// use [`disable_selection_mode`](Self::disable_selection_mode) to turn
    /// selection off.
    pub fn enable_selection_mode(
        &mut self,
        listener: Option<Box<dyn SelectionListener>>,
    ) -> StoreResult<()> {
        let Some(listener) = listener else {
            return Err(StoreError::InvalidArgument(
                "SelectionListener must not be empty. Use disable_selection_mode() to disable selection mode".to_string(),
            ));
        };
        self.selection_listener = Some(listener);
        log::debug!("Selection mode enabled");
        Ok(())
    }

    /// Clears the selection and unregisters the selection listener.
    pub fn disable_selection_mode(&mut self) {
        self.clear_selection();
        self.selection_listener = None;
        log::debug!("Selection mode disabled");
    }

    pub fn is_selection_enabled(&self) -> bool {
        self.selection_listener.is_some()
    }

    pub fn selected_count(&self) -> usize {
        self.selected_count
    }

    pub fn is_selection_mode_active(&self) -> bool {
        self.selection_mode_active
    }

    /// Flips the selection of the message with `id`.
    ///
    /// Does nothing unless selection is enabled and the id is listed.
    /// Returns whether the selection changed.
    pub fn toggle_selection(&mut self, id: &str) -> bool {
        if self.selection_listener.is_none() {
            return false;
        }
        let Some(index) = self.position_of(id) else {
            log::trace!("Ignoring toggle of unknown message {id}");
            return false;
        };

        let slot = &mut self.slots[index];
        slot.selected = !slot.selected;
        if slot.selected {
            self.selected_count += 1;
        } else {
            self.selected_count -= 1;
        }
        self.selection_mode_active = self.selected_count > 0;

        log::debug!(
            "Toggled selection of {id} at index {index}, selected: {}",
            self.selected_count
        );
        self.emit(ListChange::Changed { index });
        self.notify_selection_changed();
        true
    }

    /// Handles a tap on a message.
    ///
    /// While selection mode is active a tap toggles the message and is
    /// consumed. Otherwise it returns false and the host should run its
    /// default action.
    pub fn handle_click(&mut self, id: &str) -> bool {
        if !self.selection_mode_active {
            return false;
        }
        self.toggle_selection(id)
    }

    /// Handles a long press on a message, which starts (or extends) a selection.
    ///
    /// Returns false when selection is not enabled.
    pub fn handle_long_press(&mut self, id: &str) -> bool {
        self.toggle_selection(id)
    }

    /// Deselects everything and notifies the listener with zero.
    ///
    /// The listener is notified even if nothing was selected.
    pub fn clear_selection(&mut self) {
        let selected: Vec<usize> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.selected)
            .map(|(index, _)| index)
            .collect();

        for index in selected {
            self.slots[index].selected = false;
            self.emit(ListChange::Changed { index });
        }

        self.selected_count = 0;
        self.selection_mode_active = false;
        self.notify_selection_changed();
    }

    /// Returns the selected messages in list order, or reversed.
    ///
    /// List order is newest first, so `reverse` yields oldest first.
    pub fn selected_messages(&self, reverse: bool) -> Vec<&Message> {
        let mut messages: Vec<&Message> = self
            .slots
            .iter()
            .filter(|slot| slot.selected)
            .filter_map(|slot| slot.entry.as_message())
            .collect();
        if reverse {
            messages.reverse();
        }
        messages
    }

    /// Deletes every selected message, then clears the selection.
    ///
    /// Returns the number of messages removed.
    pub fn delete_selected(&mut self) -> usize {
        let ids: Vec<String> = self
            .selected_messages(false)
            .into_iter()
            .map(|message| message.id.clone())
            .collect();

        let (removed, _) = self.remove_messages(&ids);
        log::info!("Deleted {removed} selected messages");
        self.clear_selection();
        removed
    }

    /// Joins the selected messages into one string, then clears the selection.
    ///
    /// Messages are separated by a blank line. Without a formatter each
    /// message uses its `Display` form. The caller decides what to do with
    /// the text, typically putting it on the clipboard.
    pub fn format_selected_as_text(
        &mut self,
        formatter: Option<&dyn MessageTextFormatter>,
        reverse: bool,
    ) -> String {
        let text = self
            .selected_messages(reverse)
            .into_iter()
            .map(|message| match formatter {
                Some(formatter) => formatter.format(message),
                None => message.to_string(),
            })
            .collect::<Vec<_>>()
            .join(COPY_SEPARATOR);

        self.clear_selection();
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Author;
    use chrono::{FixedOffset, TimeZone, Utc};
    use claims::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    mod helpers {
        use super::*;

        pub fn message(id: &str, hour: u32) -> Message {
            Message::new(
                id,
                Author::new("1", "Mario Pruitt", ""),
                Some(format!("text {id}")),
                Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap(),
            )
        }

        /// Store with three same-day messages: [m3, m2, m1, header]
        pub fn store_with_messages() -> MessageListStore {
            let mut store = MessageListStore::with_time_zone(FixedOffset::east_opt(0).unwrap());
            for (id, hour) in [("m1", 9), ("m2", 10), ("m3", 11)] {
                store.insert_at_head(message(id, hour)).unwrap();
            }
            store
        }

        pub fn counting_listener() -> (Box<dyn SelectionListener>, Rc<RefCell<Vec<usize>>>) {
            let counts = Rc::new(RefCell::new(Vec::new()));
            let sink = Rc::clone(&counts);
            let listener = move |count: usize| sink.borrow_mut().push(count);
            (Box::new(listener), counts)
        }
    }

    mod enabling {
        use super::*;
        use helpers::*;

        #[test]
        fn test_enable_without_listener_fails() {
            let mut store = store_with_messages();
            let result = store.enable_selection_mode(None);
            assert_matches!(result, Err(StoreError::InvalidArgument(_)));
            assert!(!store.is_selection_enabled());
        }

        #[test]
        fn test_toggle_ignored_until_enabled() {
            let mut store = store_with_messages();
            assert!(!store.toggle_selection("m1"));
            assert_eq!(store.selected_count(), 0);

            let (listener, counts) = counting_listener();
            assert_ok!(store.enable_selection_mode(Some(listener)));
            assert!(store.toggle_selection("m1"));
            assert_eq!(store.selected_count(), 1);
            assert_eq!(*counts.borrow(), vec![1]);
        }

        #[test]
        fn test_disable_clears_and_unregisters() {
            let mut store = store_with_messages();
            let (listener, counts) = counting_listener();
            assert_ok!(store.enable_selection_mode(Some(listener)));
            store.toggle_selection("m2");

            store.disable_selection_mode();
            assert_eq!(store.selected_count(), 0);
            assert!(!store.is_selection_enabled());
            assert!(!store.toggle_selection("m2"));
            assert_eq!(*counts.borrow(), vec![1, 0]);
        }
    }

    mod toggling {
        use super::*;
        use helpers::*;

        #[test]
        fn test_toggle_twice_restores_state() {
            let mut store = store_with_messages();
            let (listener, counts) = counting_listener();
            assert_ok!(store.enable_selection_mode(Some(listener)));

            assert!(store.toggle_selection("m2"));
            assert!(store.is_selection_mode_active());
            assert!(store.is_selected(1));

            assert!(store.toggle_selection("m2"));
            assert!(!store.is_selection_mode_active());
            assert!(!store.is_selected(1));
            assert_eq!(*counts.borrow(), vec![1, 0]);
        }

        #[test]
        fn test_toggle_unknown_id_is_noop() {
            let mut store = store_with_messages();
            let (listener, counts) = counting_listener();
            assert_ok!(store.enable_selection_mode(Some(listener)));

            let changes = Rc::new(RefCell::new(Vec::new()));
            let sink = Rc::clone(&changes);
            store.set_change_listener(move |change: &ListChange| sink.borrow_mut().push(*change));

            assert!(!store.toggle_selection("missing"));
            assert!(changes.borrow().is_empty());
            assert!(counts.borrow().is_empty());
        }

        #[test]
        fn test_click_only_toggles_in_selection_mode() {
            let mut store = store_with_messages();
            let (listener, _counts) = counting_listener();
            assert_ok!(store.enable_selection_mode(Some(listener)));

            // Plain tap falls through to the host's default action
            assert!(!store.handle_click("m1"));
            assert_eq!(store.selected_count(), 0);

            assert!(store.handle_long_press("m1"));
            assert!(store.handle_click("m3"));
            assert_eq!(store.selected_count(), 2);

            // Deselecting the last two leaves selection mode
            assert!(store.handle_click("m1"));
            assert!(store.handle_click("m3"));
            assert!(!store.is_selection_mode_active());
            assert!(!store.handle_click("m2"));
        }

        #[test]
        fn test_long_press_without_listener() {
            let mut store = store_with_messages();
            assert!(!store.handle_long_press("m1"));
            assert!(!store.is_selection_mode_active());
        }
    }

    mod clearing {
        use super::*;
        use helpers::*;

        #[test]
        fn test_clear_emits_one_change_per_selected_entry() {
            let mut store = store_with_messages();
            let (listener, counts) = counting_listener();
            assert_ok!(store.enable_selection_mode(Some(listener)));
            store.toggle_selection("m1");
            store.toggle_selection("m3");

            let changes = Rc::new(RefCell::new(Vec::new()));
            let sink = Rc::clone(&changes);
            store.set_change_listener(move |change: &ListChange| sink.borrow_mut().push(*change));

            store.clear_selection();
            assert_eq!(
                *changes.borrow(),
                vec![
                    ListChange::Changed { index: 0 },
                    ListChange::Changed { index: 2 }
                ]
            );
            assert_eq!(store.selected_count(), 0);
            assert_eq!(*counts.borrow(), vec![1, 2, 0]);
        }

        #[test]
        fn test_clear_twice_notifies_twice() {
            let mut store = store_with_messages();
            let (listener, counts) = counting_listener();
            assert_ok!(store.enable_selection_mode(Some(listener)));
            store.toggle_selection("m1");

            store.clear_selection();
            store.clear_selection();
            assert_eq!(*counts.borrow(), vec![1, 0, 0]);
            assert!(!store.is_selected(2));
        }
    }

    mod bulk {
        use super::*;
        use helpers::*;

        #[test]
        fn test_selected_messages_order() {
            let mut store = store_with_messages();
            let (listener, _counts) = counting_listener();
            assert_ok!(store.enable_selection_mode(Some(listener)));
            store.toggle_selection("m1");
            store.toggle_selection("m3");

            let ids = |messages: Vec<&Message>| -> Vec<String> {
                messages.into_iter().map(|m| m.id.clone()).collect()
            };
            assert_eq!(ids(store.selected_messages(false)), vec!["m3", "m1"]);
            assert_eq!(ids(store.selected_messages(true)), vec!["m1", "m3"]);
        }

        #[test]
        fn test_delete_selected_notifies_zero_once() {
            let mut store = store_with_messages();
            let (listener, counts) = counting_listener();
            assert_ok!(store.enable_selection_mode(Some(listener)));
            store.toggle_selection("m1");
            store.toggle_selection("m2");

            assert_eq!(store.delete_selected(), 2);
            assert_eq!(store.len(), 2);
            assert_eq!(store.position_of("m3"), Some(0));
            assert_eq!(*counts.borrow(), vec![1, 2, 0]);
        }

        #[test]
        fn test_format_with_closure_formatter() {
            let mut store = store_with_messages();
            let (listener, _counts) = counting_listener();
            assert_ok!(store.enable_selection_mode(Some(listener)));
            store.toggle_selection("m2");
            store.toggle_selection("m3");

            let formatter = |message: &Message| message.id.to_uppercase();
            let text = store.format_selected_as_text(Some(&formatter), false);
            assert_eq!(text, "M3\n\nM2");
            assert_eq!(store.selected_count(), 0);
        }

        #[test]
        fn test_format_with_nothing_selected() {
            let mut store = store_with_messages();
            assert_eq!(store.format_selected_as_text(None, true), "");
        }
    }
}
