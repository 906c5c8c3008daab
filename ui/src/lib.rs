//! # Chatlist UI Library
//!
//! Terminal host for the chat message list. Loads a conversation from a
//! JSON file, lets the user select messages, copies them to the clipboard
//! or deletes them, and prints the resulting list with its date headers.
//!
//! ## Modules
//!
//! - [`config`] - Configuration loading and validation
//! - [`conversation`] - Conversation file parsing
//! - [`session`] - A message list together with its observable counters
//! - [`renderer`] - Plain-text rendering of the list
//! - [`clipboard`] - System clipboard access
//! - [`error`] - Error types
//! - [`logger`] - Logging configuration
//!
//! This library interface enables integration testing by providing access to internal modules.

pub mod clipboard;
pub mod config;
pub mod conversation;
pub mod error;
pub mod logger;
pub mod renderer;
pub mod session;

pub use error::{AppError, AppResult};
pub use session::ChatSession;
