//! Output module for exporting harvested data and reports
//!
//! This module handles:
//! - Exporting canonical records as CSV files
//! - Computing and printing statistics reports
//! - Generating markdown summaries of a harvest

mod csv_export;
mod markdown;
pub mod stats;
mod summary;

pub use csv_export::{export_csv, write_records};
pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use stats::{print_character_report, print_equipment_report, CharacterReport, EquipmentReport};
pub use summary::{ExportedFile, HarvestSummary, OutputError, OutputResult};
