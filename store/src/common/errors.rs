use thiserror::Error;

/// Errors raised by [`MessageListStore`](crate::MessageListStore) operations.
///
/// The store treats almost every data-level surprise as a silent no-op:
/// deleting or toggling an id that is not in the list changes nothing and
/// emits no events, because message removal can race with a user's selection
/// gesture. The variants below are reserved for programmer errors, which are
/// reported synchronously and are never worth retrying.
///
/// # Error Categories
///
/// ## Call-site Errors
/// - [`InvalidArgument`] - A required argument was missing or malformed
///
/// ## Model Consistency Errors
/// - [`DuplicateMessageId`] - A message with the same id is already listed
///
/// # Examples
///
/// ```no_run
/// use store::{MessageListStore, StoreError};
/// use store::format::SelectionListener;
///
/// let mut list = MessageListStore::new();
/// let listener: Option<Box<dyn SelectionListener>> = None;
///
/// match list.enable_selection_mode(listener) {
///     Ok(()) => {}
///     Err(StoreError::InvalidArgument(reason)) => {
///         log::error!("Selection mode not enabled: {reason}");
///     }
///     Err(other) => log::error!("Unexpected store error: {other}"),
/// }
/// ```
///
/// [`InvalidArgument`]: StoreError::InvalidArgument
/// [`DuplicateMessageId`]: StoreError::DuplicateMessageId
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A required argument was missing or malformed.
    ///
    /// Raised, for example, when selection mode is enabled without a
    /// listener. Use `disable_selection_mode()` to turn selection off.
    ///
    /// # Recovery
    /// - Fix the call site; the store state is unchanged
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The message id is already present in the list.
    ///
    /// Message ids are unique and never reused, so inserting the same id
    /// twice indicates a bug in the message source.
    ///
    /// # Recovery
    /// - Drop the duplicate; the store state is unchanged
    #[error("Message '{0}' is already in the list")]
    DuplicateMessageId(String),
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
