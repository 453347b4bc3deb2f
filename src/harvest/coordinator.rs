//! Harvest coordinator - fetch, normalize, report and export
//!
//! This module wires the pipeline together for the selected datasets:
//! - Fetching every page of each configured endpoint
//! - Normalizing and deduplicating the raw records
//! - Printing statistics reports
//! - Writing CSV files and the markdown summary

use crate::collection::{process, process_equipment, Collection};
use crate::config::Config;
use crate::fetch::{build_http_client, endpoint_url, fetch_all_pages};
use crate::harvest::Dataset;
use crate::normalize::{normalize_background, normalize_class, normalize_race};
use crate::output::{
    export_csv, generate_markdown_summary, print_character_report, print_equipment_report,
    CharacterReport, EquipmentReport, ExportedFile, HarvestSummary,
};
use crate::raw::RawRecord;
use crate::records::{Background, CanonicalRecord, CharacterClass, Equipment, EquipmentKind, Race};
use crate::Result;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;

/// CSV file names, relative to the output directory
pub const RACES_FILE: &str = "open5e_races.csv";
pub const CLASSES_FILE: &str = "open5e_classes.csv";
pub const BACKGROUNDS_FILE: &str = "open5e_backgrounds.csv";
pub const EQUIPMENT_FILE: &str = "open5e_equipment.csv";

/// Options for a single harvest run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarvestOptions {
    /// Which datasets to fetch
    pub dataset: Dataset,

    /// Write CSV files and the markdown summary
    pub export: bool,
}

impl Default for HarvestOptions {
    fn default() -> Self {
        Self {
            dataset: Dataset::All,
            export: true,
        }
    }
}

/// Normalized character collections with their raw record count
#[derive(Debug, Clone, Default)]
pub struct CharacterData {
    pub races: Collection<Race>,
    pub classes: Collection<CharacterClass>,
    pub backgrounds: Collection<Background>,
    pub raw_records: usize,
}

impl CharacterData {
    fn duplicates(&self) -> usize {
        self.races.duplicates() + self.classes.duplicates() + self.backgrounds.duplicates()
    }
}

/// Normalized equipment with its raw record count
#[derive(Debug, Clone, Default)]
pub struct EquipmentData {
    pub items: Collection<Equipment>,
    pub raw_records: usize,
}

/// Main harvest coordinator structure
pub struct Harvester {
    config: Config,
    config_hash: String,
    client: Client,
}

impl Harvester {
    /// Creates a new harvester
    ///
    /// # Arguments
    ///
    /// * `config` - The validated configuration
    /// * `config_hash` - Hash of the configuration file, recorded in the summary
    ///
    /// # Returns
    ///
    /// * `Ok(Harvester)` - Successfully created harvester
    /// * `Err(HarvestError)` - Failed to build the HTTP client
    pub fn new(config: Config, config_hash: String) -> Result<Self> {
        let client = build_http_client(&config.api, &config.user_agent)?;
        Ok(Self {
            config,
            config_hash,
            client,
        })
    }

    /// The configuration this harvester runs with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetches every record from one endpoint
    async fn fetch_endpoint(&self, endpoint: &str) -> Result<Vec<RawRecord>> {
        let url = endpoint_url(&self.config.api.base_url, endpoint, self.config.api.page_limit)?;
        let delay = Duration::from_millis(self.config.api.request_delay_ms);
        Ok(fetch_all_pages(&self.client, &url, delay).await)
    }

    /// Fetches and normalizes races, classes and backgrounds
    pub async fn harvest_characters(&self) -> Result<CharacterData> {
        let endpoints = &self.config.endpoints;

        tracing::info!("Fetching races...");
        let raw_races = self.fetch_endpoint(&endpoints.races).await?;
        tracing::info!("Fetching classes...");
        let raw_classes = self.fetch_endpoint(&endpoints.classes).await?;
        tracing::info!("Fetching backgrounds...");
        let raw_backgrounds = self.fetch_endpoint(&endpoints.backgrounds).await?;

        let data = CharacterData {
            races: process(&raw_races, normalize_race),
            classes: process(&raw_classes, normalize_class),
            backgrounds: process(&raw_backgrounds, normalize_background),
            raw_records: raw_races.len() + raw_classes.len() + raw_backgrounds.len(),
        };

        tracing::info!(
            "Total after deduplication: {} races, {} classes, {} backgrounds",
            data.races.len(),
            data.classes.len(),
            data.backgrounds.len()
        );

        Ok(data)
    }

    /// Fetches magic items, weapons and armor and normalizes them into one
    /// equipment collection
    pub async fn harvest_equipment(&self) -> Result<EquipmentData> {
        let endpoints = &self.config.endpoints;
        let mut batches = Vec::with_capacity(EquipmentKind::ALL.len());

        for kind in EquipmentKind::ALL {
            let endpoint = match kind {
                EquipmentKind::MagicItem => &endpoints.magic_items,
                EquipmentKind::Weapon => &endpoints.weapons,
                EquipmentKind::Armor => &endpoints.armor,
            };
            tracing::info!("Fetching {} data...", kind);
            batches.push((kind, self.fetch_endpoint(endpoint).await?));
        }

        let raw_records = batches.iter().map(|(_, items)| items.len()).sum();
        let items = process_equipment(&batches);
        tracing::info!("Total unique equipment items: {}", items.len());

        Ok(EquipmentData { items, raw_records })
    }

    /// Runs a complete harvest
    ///
    /// Reports are always printed. When `options.export` is set, CSV files
    /// go to the output directory and the markdown summary is written if a
    /// summary path is configured.
    pub async fn run(&self, options: HarvestOptions) -> Result<HarvestSummary> {
        let started = chrono::Utc::now();
        let mut summary = HarvestSummary::new();
        summary.started_at = started.to_rfc3339();
        summary.config_hash = self.config_hash.clone();
        summary.base_url = self.config.api.base_url.clone();

        let output_dir = Path::new(&self.config.output.directory);

        if options.dataset.includes_characters() {
            let data = self.harvest_characters().await?;
            let report = CharacterReport::generate(&data.races, &data.classes, &data.backgrounds);
            print_character_report(&report);

            summary.raw_records += data.raw_records;
            summary.duplicates_skipped += data.duplicates();
            summary.character = Some(report);

            if options.export {
                summary.exported.extend(export_characters(&data, output_dir)?);
            }
        }

        if options.dataset.includes_equipment() {
            let data = self.harvest_equipment().await?;
            let report = EquipmentReport::generate(&data.items);
            print_equipment_report(&report);

            summary.raw_records += data.raw_records;
            summary.duplicates_skipped += data.items.duplicates();
            summary.equipment = Some(report);

            if options.export {
                let path = output_dir.join(EQUIPMENT_FILE);
                summary.exported.extend(export_csv(data.items.records(), &path)?);
            }
        }

        let finished = chrono::Utc::now();
        summary.finished_at = Some(finished.to_rfc3339());
        summary.duration_seconds = Some((finished - started).num_seconds().max(0) as u64);

        if options.export {
            if let Some(summary_path) = &self.config.output.summary_path {
                tracing::info!("Writing markdown summary to {}", summary_path);
                generate_markdown_summary(&summary, Path::new(summary_path))?;
            }
        }

        tracing::info!(
            "Harvest complete: {} records kept, {} files written",
            summary.total_records(),
            summary.exported.len()
        );

        Ok(summary)
    }
}

/// Writes the three character CSV files, skipping empty collections
pub fn export_characters(data: &CharacterData, output_dir: &Path) -> Result<Vec<ExportedFile>> {
    let mut exported = Vec::new();
    exported.extend(export_collection(&data.races, &output_dir.join(RACES_FILE))?);
    exported.extend(export_collection(&data.classes, &output_dir.join(CLASSES_FILE))?);
    exported.extend(export_collection(&data.backgrounds, &output_dir.join(BACKGROUNDS_FILE))?);
    Ok(exported)
}

fn export_collection<T: CanonicalRecord>(
    collection: &Collection<T>,
    path: &Path,
) -> Result<Option<ExportedFile>> {
    Ok(export_csv(collection.records(), path)?)
}

/// Convenience function to run a harvest with a fresh harvester
pub async fn run_harvest(
    config: Config,
    config_hash: String,
    options: HarvestOptions,
) -> Result<HarvestSummary> {
    let harvester = Harvester::new(config, config_hash)?;
    harvester.run(options).await
}
