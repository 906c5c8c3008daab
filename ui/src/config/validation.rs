use super::app::AppConfig;
use crate::error::{AppError, AppResult};

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid utc_offset_minutes: {configured} (min: {min_limit}, max: {max_limit})")]
    UtcOffset {
        configured: i32,
        min_limit: i32,
        max_limit: i32,
    },
    #[error("Invalid local_user_id: must not be empty")]
    EmptyLocalUserId,
    #[error("Invalid time_zone: {reason}")]
    TimeZone { configured: String, reason: String },
}

impl ConfigValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigValidationError::UtcOffset {
                configured,
                min_limit,
                max_limit,
            } => {
                format!(
                    "UTC offset out of range!\n\n\
                    Your configured value: {configured} minutes\n\
                    Valid range: {min_limit} - {max_limit} minutes\n\n\
                    Please update utc_offset_minutes in config.toml to a value between {min_limit} and {max_limit}."
                )
            }
            ConfigValidationError::EmptyLocalUserId => "Local user id is empty!\n\n\
                Please set local_user_id in config.toml or pass --me on the command line."
                .to_string(),
            ConfigValidationError::TimeZone { configured, .. } => {
                format!(
                    "Unknown time zone!\n\n\
                    Your configured value: {configured}\n\n\
                    Please set time_zone in config.toml to an IANA name such as \"Europe/Berlin\", or to \"local\"."
                )
            }
        }
    }
}

/// Configuration loading result
#[derive(Debug)]
pub enum ConfigLoadResult {
    Success(Box<AppConfig>),
    LoadError(String),
    DeserializeError(String),
}

impl ConfigLoadResult {
    /// Converts the load outcome into an application result.
    pub fn into_result(self) -> AppResult<AppConfig> {
        match self {
            ConfigLoadResult::Success(config) => Ok(*config),
            ConfigLoadResult::LoadError(msg) | ConfigLoadResult::DeserializeError(msg) => {
                Err(AppError::Config(msg))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_mentions_setting() {
        let error = ConfigValidationError::UtcOffset {
            configured: 900,
            min_limit: -720,
            max_limit: 840,
        };
        assert!(error.user_message().contains("utc_offset_minutes"));
        assert_eq!(
            error.to_string(),
            "Invalid utc_offset_minutes: 900 (min: -720, max: 840)"
        );
    }

    #[test]
    fn test_load_error_becomes_config_error() {
        let result = ConfigLoadResult::LoadError("missing".to_string()).into_result();
        assert!(matches!(result, Err(AppError::Config(msg)) if msg == "missing"));
    }
}
