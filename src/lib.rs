//! Open5e-Harvest: a tabletop reference data harvester
//!
//! This crate fetches races, classes, backgrounds and equipment from the
//! paginated Open5e API, normalizes loosely-typed source fields into flat
//! canonical records, deduplicates them and exports CSV files and reports.

pub mod collection;
pub mod config;
pub mod fetch;
pub mod harvest;
pub mod normalize;
pub mod output;
pub mod raw;
pub mod records;

use thiserror::Error;

/// Main error type for Open5e-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Malformed page from {url}: {message}")]
    MalformedPage { url: String, message: String },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Open5e-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

// Re-export commonly used types
pub use collection::Collection;
pub use config::Config;
pub use normalize::{normalize, ItemKind, NormalizedRecord};
pub use raw::{RawRecord, RawValue};
pub use records::{Background, CanonicalRecord, CharacterClass, Equipment, EquipmentKind, Race};
