use crate::config::types::{ApiConfig, Config, EndpointsConfig, OutputConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

const MAX_PAGE_LIMIT: u32 = 5000;
const MAX_REQUEST_DELAY_MS: u64 = 60_000;
const MAX_TIMEOUT_SECS: u64 = 300;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_api_config(&config.api)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_endpoints(&config.endpoints)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates API configuration
fn validate_api_config(config: &ApiConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", config.base_url, e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::Validation(format!(
            "base-url '{}' must use http or https",
            config.base_url
        )));
    }

    if config.page_limit < 1 || config.page_limit > MAX_PAGE_LIMIT {
        return Err(ConfigError::Validation(format!(
            "page-limit must be between 1 and {}, got {}",
            MAX_PAGE_LIMIT, config.page_limit
        )));
    }

    if config.request_delay_ms > MAX_REQUEST_DELAY_MS {
        return Err(ConfigError::Validation(format!(
            "request-delay-ms must be <= {}ms, got {}ms",
            MAX_REQUEST_DELAY_MS, config.request_delay_ms
        )));
    }

    if config.timeout_secs < 1 || config.timeout_secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be between 1 and {}, got {}",
            MAX_TIMEOUT_SECS, config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Name: non-empty, alphanumeric + hyphens only
    if config.name.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent name cannot be empty".to_string(),
        ));
    }

    if !config.name.chars().all(|c| c.is_alphanumeric() || c == '-') {
        return Err(ConfigError::Validation(format!(
            "user-agent name must contain only alphanumeric characters and hyphens, got '{}'",
            config.name
        )));
    }

    if config.version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent version cannot be empty".to_string(),
        ));
    }

    match config.contact.as_deref() {
        Some(contact) if contact.contains('@') && !contact.contains("://") => {
            validate_email(contact)?
        }
        Some(contact) => {
            Url::parse(contact)
                .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact: {}", e)))?;
        }
        None => {}
    }

    Ok(())
}

/// Validates endpoint paths
fn validate_endpoints(endpoints: &EndpointsConfig) -> Result<(), ConfigError> {
    for (key, path) in endpoints.all() {
        if !path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "endpoint '{}' must start with '/', got '{}'",
                key, path
            )));
        }
    }
    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    if let Some(path) = &config.summary_path {
        if path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "summary-path cannot be empty when set".to_string(),
            ));
        }
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !parts[1].contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
