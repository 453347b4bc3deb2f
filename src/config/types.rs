use serde::Deserialize;

/// Main configuration structure for Open5e-Harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub endpoints: EndpointsConfig,
    pub output: OutputConfig,
}

/// Upstream API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Root of the API, e.g. "https://api.open5e.com"
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Records requested per page
    #[serde(rename = "page-limit", default = "default_page_limit")]
    pub page_limit: u32,

    /// Pause between consecutive page requests (milliseconds)
    #[serde(rename = "request-delay-ms", default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    pub name: String,
    pub version: String,

    /// URL or email included in the user agent string
    #[serde(default)]
    pub contact: Option<String>,
}

/// Endpoint paths, relative to the base URL
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    pub races: String,
    pub classes: String,
    pub backgrounds: String,
    #[serde(rename = "magic-items")]
    pub magic_items: String,
    pub weapons: String,
    pub armor: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            races: "/races".to_string(),
            classes: "/classes".to_string(),
            backgrounds: "/backgrounds".to_string(),
            magic_items: "/magicitems".to_string(),
            weapons: "/weapons".to_string(),
            armor: "/armor".to_string(),
        }
    }
}

impl EndpointsConfig {
    /// All endpoints with their config key, in harvest order
    pub fn all(&self) -> [(&'static str, &str); 6] {
        [
            ("races", self.races.as_str()),
            ("classes", self.classes.as_str()),
            ("backgrounds", self.backgrounds.as_str()),
            ("magic-items", self.magic_items.as_str()),
            ("weapons", self.weapons.as_str()),
            ("armor", self.armor.as_str()),
        ]
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory the CSV files are written to
    pub directory: String,

    /// Path to the markdown summary file
    #[serde(rename = "summary-path", default)]
    pub summary_path: Option<String>,
}

fn default_page_limit() -> u32 {
    1000
}

fn default_request_delay_ms() -> u64 {
    500
}

fn default_timeout_secs() -> u64 {
    30
}
