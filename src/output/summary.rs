//! Harvest summary and output error types

use crate::output::stats::{CharacterReport, EquipmentReport};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// One CSV file written by a harvest
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedFile {
    pub path: PathBuf,
    pub rows: usize,
}

/// Summary of a finished harvest
#[derive(Debug, Clone, Default)]
pub struct HarvestSummary {
    // Run metadata
    pub started_at: String,
    pub finished_at: Option<String>,
    pub duration_seconds: Option<u64>,
    pub config_hash: String,
    pub base_url: String,

    // Per-dataset results
    pub raw_records: usize,
    pub duplicates_skipped: usize,
    pub character: Option<CharacterReport>,
    pub equipment: Option<EquipmentReport>,

    // Files written
    pub exported: Vec<ExportedFile>,
}

impl HarvestSummary {
    /// Creates a new empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of records kept after deduplication
    pub fn total_records(&self) -> usize {
        let character = self
            .character
            .as_ref()
            .map(|r| r.total_races + r.total_classes + r.total_backgrounds)
            .unwrap_or(0);
        let equipment = self.equipment.as_ref().map(|r| r.total_items).unwrap_or(0);
        character + equipment
    }

    /// Returns the share of raw records discarded as duplicates, as a percentage
    pub fn duplicate_rate(&self) -> f64 {
        if self.raw_records == 0 {
            return 0.0;
        }
        (self.duplicates_skipped as f64 / self.raw_records as f64) * 100.0
    }
}
