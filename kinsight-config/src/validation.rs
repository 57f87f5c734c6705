//! Custom validation functions for configuration.

use validator::ValidationError;

pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a log level name.
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    if LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
        Ok(())
    } else {
        let mut error = ValidationError::new("invalid_log_level");
        error.message = Some(format!("unknown log level '{level}'").into());
        Err(error)
    }
}
