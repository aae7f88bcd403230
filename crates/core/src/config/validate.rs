use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Dataset path is not empty
/// - Resolver model is set and its timeout is positive
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.dataset.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "dataset.path cannot be empty".to_string(),
        ));
    }

    if let Some(resolver) = &config.resolver {
        if resolver.model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "resolver.model cannot be empty".to_string(),
            ));
        }
        if resolver.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "resolver.timeout_secs must be greater than 0".to_string(),
            ));
        }
    }

    Ok(())
}
