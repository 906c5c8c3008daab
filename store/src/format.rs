//! Collaborator interfaces consumed by the store and by renderers.
//!
//! The store itself never formats dates, loads images or touches a
//! clipboard. It calls out to (or is called alongside) the traits below.
//! Closures implement the single-method traits, so simple hosts can pass a
//! lambda instead of declaring a type.

use crate::model::{ATTACHMENT_PLACEHOLDER, Message};
use crate::utils::{CalendarZone, DateUtils};
use chrono::{DateTime, Utc};

/// Receives the selected message count whenever it changes.
pub trait SelectionListener {
    fn on_selection_changed(&mut self, count: usize);
}

impl<F> SelectionListener for F
where
    F: FnMut(usize),
{
    fn on_selection_changed(&mut self, count: usize) {
        self(count)
    }
}

/// Formats a message when selected messages are copied as text.
pub trait MessageTextFormatter {
    fn format(&self, message: &Message) -> String;
}

impl<F> MessageTextFormatter for F
where
    F: Fn(&Message) -> String,
{
    fn format(&self, message: &Message) -> String {
        self(message)
    }
}

/// Produces the label shown by a date header.
pub trait DateLabelFormatter {
    fn format(&self, date: &DateTime<Utc>) -> String;
}

impl<F> DateLabelFormatter for F
where
    F: Fn(&DateTime<Utc>) -> String,
{
    fn format(&self, date: &DateTime<Utc>) -> String {
        self(date)
    }
}

/// Loads an image into a render target.
///
/// `url` is `None` when the message or author has no image, in which case
/// implementations should clear or placeholder the target.
pub trait ImageLoader<T: ?Sized> {
    fn load(&self, target: &mut T, url: Option<&str>);
}

/// Date header labels relative to "now".
///
/// - today: the time of the header, `HH:MM`
/// - yesterday: `Yesterday`
/// - anything older: `d MMMM yyyy`, e.g. `3 March 2024`
#[derive(Debug, Clone)]
pub struct DefaultDateLabelFormatter {
    tz: CalendarZone,
    now: Option<DateTime<Utc>>,
}

impl DefaultDateLabelFormatter {
    pub fn new(tz: impl Into<CalendarZone>) -> Self {
        Self {
            tz: tz.into(),
            now: None,
        }
    }

    /// Pins "now" to a fixed instant instead of reading the clock.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }
}

impl Default for DefaultDateLabelFormatter {
    fn default() -> Self {
        Self::new(CalendarZone::Local)
    }
}

impl DateLabelFormatter for DefaultDateLabelFormatter {
    fn format(&self, date: &DateTime<Utc>) -> String {
        let now = self.now.unwrap_or_else(Utc::now);
        if DateUtils::is_today(date, &now, &self.tz) {
            date.with_timezone(&self.tz).format("%H:%M").to_string()
        } else if DateUtils::is_yesterday(date, &now, &self.tz) {
            "Yesterday".to_string()
        } else {
            date.with_timezone(&self.tz).format("%-d %B %Y").to_string()
        }
    }
}

/// Clipboard-friendly message formatting:
/// `Name: text (Mar 1, Fri at 2:05 PM)`.
#[derive(Debug, Clone)]
pub struct CopyFormatter {
    tz: CalendarZone,
}

impl CopyFormatter {
    pub fn new(tz: impl Into<CalendarZone>) -> Self {
        Self { tz: tz.into() }
    }
}

impl Default for CopyFormatter {
    fn default() -> Self {
        Self::new(CalendarZone::Local)
    }
}

impl MessageTextFormatter for CopyFormatter {
    fn format(&self, message: &Message) -> String {
        let created_at = message
            .created_at
            .with_timezone(&self.tz)
            .format("%b %-d, %a at %-I:%M %p");
        format!(
            "{}: {} ({})",
            message.author.name,
            message.text().unwrap_or(ATTACHMENT_PLACEHOLDER),
            created_at
        )
    }
}
