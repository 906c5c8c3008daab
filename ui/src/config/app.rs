use super::{
    LoggingConfig,
    limits::{DEFAULT_LOCAL_USER_ID, MAX_UTC_OFFSET_MINUTES, MIN_UTC_OFFSET_MINUTES},
    validation::ConfigValidationError,
};
use chrono::FixedOffset;
use serde::Deserialize;
use store::utils::CalendarZone;

/// Main application configuration
#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    local_user_id: Option<String>,
    utc_offset_minutes: Option<i32>,
    time_zone: Option<String>,
    copy_reverse: Option<bool>,
    #[serde(default)]
    logging: LoggingConfig,
}

impl AppConfig {
    /// Validate the configuration against defined limits
    pub fn validate(&self) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        if self
            .local_user_id
            .as_deref()
            .is_some_and(|id| id.trim().is_empty())
        {
            errors.push(ConfigValidationError::EmptyLocalUserId);
        }

        if let Some(offset) = self.utc_offset_minutes {
            if !(MIN_UTC_OFFSET_MINUTES..=MAX_UTC_OFFSET_MINUTES).contains(&offset) {
                errors.push(ConfigValidationError::UtcOffset {
                    configured: offset,
                    min_limit: MIN_UTC_OFFSET_MINUTES,
                    max_limit: MAX_UTC_OFFSET_MINUTES,
                });
            }
        }

        if let Some(name) = self.time_zone.as_deref() {
            if let Err(reason) = name.parse::<CalendarZone>() {
                errors.push(ConfigValidationError::TimeZone {
                    configured: name.to_string(),
                    reason,
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn local_user_id(&self) -> &str {
        self.local_user_id
            .as_deref()
            .unwrap_or(DEFAULT_LOCAL_USER_ID)
    }

    /// Overrides the local user, e.g. from the command line.
    pub fn set_local_user_id(&mut self, id: impl Into<String>) {
        self.local_user_id = Some(id.into());
    }

    /// Time zone used for calendar-day comparisons and labels.
    ///
    /// An explicit `utc_offset_minutes` wins over a `time_zone` name. Without
    /// either (or when the value is invalid) the host zone is used, with its
    /// daylight saving rules.
    pub fn time_zone(&self) -> CalendarZone {
        if let Some(offset) = self
            .utc_offset_minutes
            .and_then(|minutes| FixedOffset::east_opt(minutes * 60))
        {
            return CalendarZone::Fixed(offset);
        }
        self.time_zone
            .as_deref()
            .and_then(|name| name.parse().ok())
            .unwrap_or_default()
    }

    /// Whether copied text lists the oldest selected message first.
    pub fn copy_reverse(&self) -> bool {
        self.copy_reverse.unwrap_or(true)
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }
}
