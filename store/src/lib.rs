//! # Chatlist Store Library
//!
//! Core state management for a reverse-chronological chat message list.
//! This library owns the ordered list of messages interleaved with synthetic
//! date headers, keeps the headers consistent as messages come and go, and
//! tracks a multi-message selection.
//!
//! ## Modules
//!
//! - [`message_list`] - The [`MessageListStore`] and its change events
//! - [`model`] - Messages, authors, list entries and view types
//! - [`format`] - Collaborator interfaces (formatters, listeners, image loading)
//! - [`utils`] - Calendar-day helpers
//! - [`common`] - Common error types

pub mod common;
pub mod format;
pub mod message_list;
pub mod model;
pub mod utils;

pub use common::errors::{StoreError, StoreResult};
pub use message_list::{ChangeListener, ChangeReplay, ListChange, MessageListStore};
