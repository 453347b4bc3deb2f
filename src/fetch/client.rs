//! HTTP client construction

use crate::config::{ApiConfig, UserAgentConfig};
use reqwest::Client;
use std::time::Duration;

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Formats the user agent string: `Name/Version (+Contact)`
pub fn user_agent_string(config: &UserAgentConfig) -> String {
    match config.contact.as_deref() {
        Some(contact) => format!("{}/{} (+{})", config.name, config.version, contact),
        None => format!("{}/{}", config.name, config.version),
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `api` - Timeout settings
/// * `user_agent` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use open5e_harvest::config::{ApiConfig, UserAgentConfig};
/// use open5e_harvest::fetch::build_http_client;
///
/// let api = ApiConfig {
///     base_url: "https://api.open5e.com".to_string(),
///     page_limit: 1000,
///     request_delay_ms: 500,
///     timeout_secs: 30,
/// };
/// let user_agent = UserAgentConfig {
///     name: "open5e-harvest".to_string(),
///     version: "1.0".to_string(),
///     contact: None,
/// };
///
/// let client = build_http_client(&api, &user_agent).unwrap();
/// ```
pub fn build_http_client(api: &ApiConfig, user_agent: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent_string(user_agent))
        .timeout(Duration::from_secs(api.timeout_secs))
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .gzip(true)
        .brotli(true)
        .build()
}
