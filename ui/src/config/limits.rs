/// Westernmost UTC offset in use (UTC-12:00)
pub const MIN_UTC_OFFSET_MINUTES: i32 = -12 * 60;

/// Easternmost UTC offset in use (UTC+14:00)
pub const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// Fallback identity used when no local user is configured
pub const DEFAULT_LOCAL_USER_ID: &str = "0";
