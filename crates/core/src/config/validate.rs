use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Acquirer timeouts are positive
/// - Upload cap is positive
/// - Transcoder program is set
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.acquirer.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "acquirer.timeout_secs must be greater than 0".to_string(),
        ));
    }

    if config.acquirer.connect_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "acquirer.connect_timeout_secs must be greater than 0".to_string(),
        ));
    }

    if config.storage.max_upload_bytes == 0 {
        return Err(ConfigError::ValidationError(
            "storage.max_upload_bytes must be greater than 0".to_string(),
        ));
    }

    if config.transcoder.program.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "transcoder.program cannot be empty".to_string(),
        ));
    }

    Ok(())
}
