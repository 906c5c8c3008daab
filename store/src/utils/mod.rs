//! # Store Utilities Module
//!
//! Helpers shared by the store and by rendering collaborators.
//!
//! ## Available Utilities
//!
//! ### Calendar Days
//!
//! [`CalendarZone`] is the reader's time zone: the host zone, a fixed
//! offset, or a named IANA zone.
//!
//! The [`date`] module answers "do these two instants fall on the same day
//! for this reader?", which drives date header placement:
//!
//! ```no_run
//! use store::utils::{CalendarZone, DateUtils};
//!
//! let tz = CalendarZone::Local;
//! let now = chrono::Utc::now();
//! assert!(DateUtils::is_today(&now, &now, &tz));
//! ```

pub mod date;
pub mod zone;

pub use date::DateUtils;
pub use zone::CalendarZone;
