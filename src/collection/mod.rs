//! Collection processing
//!
//! A collection is the deduplicated, ordered result of normalizing one batch
//! of raw records. Records are unique by case-insensitive name; the first
//! record seen for a name is kept and later ones are dropped, never merged.

use crate::normalize::{normalize, normalize_equipment, ItemKind, NormalizedRecord};
use crate::raw::RawRecord;
use crate::records::{CanonicalRecord, Equipment, EquipmentKind};
use std::collections::HashSet;

/// Anything with a name that identifies it within a collection
pub trait Named {
    fn name(&self) -> &str;
}

impl<T: CanonicalRecord> Named for T {
    fn name(&self) -> &str {
        CanonicalRecord::name(self)
    }
}

impl Named for NormalizedRecord {
    fn name(&self) -> &str {
        NormalizedRecord::name(self)
    }
}

/// Ordered records of one kind, unique by case-insensitive name
#[derive(Debug, Clone)]
pub struct Collection<T> {
    records: Vec<T>,
    seen: HashSet<String>,
    duplicates: usize,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            seen: HashSet::new(),
            duplicates: 0,
        }
    }
}

impl<T: Named> Collection<T> {
    /// Creates an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection from records in order, dropping repeated names
    pub fn from_records(records: impl IntoIterator<Item = T>) -> Self {
        let mut collection = Self::new();
        for record in records {
            collection.insert(record);
        }
        collection
    }

    /// Adds a record unless one with the same name (ignoring case) is
    /// already present
    ///
    /// Returns true if the record was kept.
    pub fn insert(&mut self, record: T) -> bool {
        let key = record.name().to_lowercase();
        if self.seen.contains(&key) {
            tracing::debug!("Skipping duplicate: {}", record.name());
            self.duplicates += 1;
            return false;
        }

        self.seen.insert(key);
        self.records.push(record);
        true
    }

    /// Returns true if a record with this name (ignoring case) is present
    pub fn contains_name(&self, name: &str) -> bool {
        self.seen.contains(&name.to_lowercase())
    }
}

impl<T> Collection<T> {
    /// The kept records in first-seen order
    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Iterates over the kept records in first-seen order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    /// Number of kept records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no record was kept
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records dropped as duplicates
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Consumes the collection, returning the kept records
    pub fn into_records(self) -> Vec<T> {
        self.records
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Normalizes raw records in input order and deduplicates them by name
///
/// # Example
///
/// ```
/// use open5e_harvest::collection::process;
/// use open5e_harvest::normalize::normalize_race;
/// use open5e_harvest::raw::RawRecord;
/// use serde_json::json;
///
/// let raw: Vec<RawRecord> = [json!({"name": "Elf"}), json!({"name": "ELF"})]
///     .into_iter()
///     .filter_map(RawRecord::from_json)
///     .collect();
///
/// let races = process(&raw, normalize_race);
/// assert_eq!(races.len(), 1);
/// assert_eq!(races.records()[0].name, "Elf");
/// ```
pub fn process<T, F>(raw_items: &[RawRecord], normalize: F) -> Collection<T>
where
    T: Named,
    F: Fn(&RawRecord) -> T,
{
    let collection = Collection::from_records(raw_items.iter().map(normalize));
    log_totals(raw_items.len(), &collection);
    collection
}

/// Normalizes raw records as the given kind and deduplicates them by name
pub fn process_kind(raw_items: &[RawRecord], kind: ItemKind) -> Collection<NormalizedRecord> {
    process(raw_items, |raw| normalize(raw, kind))
}

/// Normalizes equipment from several endpoints into one collection
///
/// Batches are processed in the order given, so a name already seen in an
/// earlier batch (magic items, say) suppresses the same name in a later one.
pub fn process_equipment(batches: &[(EquipmentKind, Vec<RawRecord>)]) -> Collection<Equipment> {
    let total: usize = batches.iter().map(|(_, items)| items.len()).sum();
    let collection = Collection::from_records(
        batches
            .iter()
            .flat_map(|(kind, items)| items.iter().map(move |raw| normalize_equipment(raw, *kind))),
    );
    log_totals(total, &collection);
    collection
}

fn log_totals<T>(raw_count: usize, collection: &Collection<T>) {
    tracing::info!(
        "Normalized {} records: {} kept, {} duplicates skipped",
        raw_count,
        collection.len(),
        collection.duplicates()
    );
}
