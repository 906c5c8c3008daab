use std::fmt::Display;
use store::StoreError;

/// Application-wide error types for the chatlist viewer.
///
/// Every variant carries a human readable message. The variants group
/// failures by where they come from so the caller can pick a suitable
/// report (a bad config file calls for different advice than a clipboard
/// that cannot be opened).
///
/// # Error Categories
///
/// - [`Store`] - The message list rejected an operation
/// - [`Config`] - Configuration loading and validation errors
/// - [`Conversation`] - The conversation file could not be parsed
/// - [`Clipboard`] - The system clipboard is unavailable
/// - [`Io`] - File system failures
///
/// # Examples
///
/// ```no_run
/// use chatlist::error::{AppError, AppResult};
///
/// fn read_transcript(path: &str) -> AppResult<String> {
///     std::fs::read_to_string(path).map_err(AppError::from)
/// }
/// ```
///
/// [`Store`]: AppError::Store
/// [`Config`]: AppError::Config
/// [`Conversation`]: AppError::Conversation
/// [`Clipboard`]: AppError::Clipboard
/// [`Io`]: AppError::Io
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// The message list refused an operation, e.g. a duplicate message id.
    Store(String),

    /// Configuration loading and validation errors.
    ///
    /// Raised when the configuration file is missing (only when it was
    /// requested explicitly), malformed, or holds out-of-range values.
    Config(String),

    /// The conversation file is not a valid JSON array of messages.
    Conversation(String),

    /// Clipboard context creation or write failures.
    Clipboard(String),

    /// File system and I/O operation failures.
    Io(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Store(msg) => write!(f, "Store Error: {msg}"),
            AppError::Config(msg) => write!(f, "Configuration Error: {msg}"),
            AppError::Conversation(msg) => write!(f, "Conversation Error: {msg}"),
            AppError::Clipboard(msg) => write!(f, "Clipboard Error: {msg}"),
            AppError::Io(msg) => write!(f, "IO Error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Conversation(err.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
