//! Normalization of raw API records into canonical records
//!
//! This module is split into:
//! - `fields`: parsers for single loosely-typed fields
//! - `extract`: heuristic scanners over description text
//! - `character` / `equipment`: per-kind normalizers composing the two
//!
//! Normalization never fails and never mutates its input. Anything missing
//! or malformed is replaced by a documented default.

pub mod defaults;
pub mod extract;
pub mod fields;

mod character;
mod equipment;

pub use character::{normalize_background, normalize_class, normalize_race};
pub use equipment::normalize_equipment;

use crate::raw::RawRecord;
use crate::records::{
    Background, CanonicalRecord, CharacterClass, Equipment, EquipmentKind, Race,
};
use std::fmt;

/// The kind of item a raw record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Race,
    Class,
    Background,
    Equipment(EquipmentKind),
}

impl ItemKind {
    /// Returns the column list for records of this kind
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::Race => Race::COLUMNS,
            Self::Class => CharacterClass::COLUMNS,
            Self::Background => Background::COLUMNS,
            Self::Equipment(_) => Equipment::COLUMNS,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Race => f.write_str(Race::KIND),
            Self::Class => f.write_str(CharacterClass::KIND),
            Self::Background => f.write_str(Background::KIND),
            Self::Equipment(kind) => write!(f, "{}", kind),
        }
    }
}

/// A canonical record of any kind
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedRecord {
    Race(Race),
    Class(CharacterClass),
    Background(Background),
    Equipment(Equipment),
}

impl NormalizedRecord {
    /// The record's display name
    pub fn name(&self) -> &str {
        match self {
            Self::Race(r) => r.name(),
            Self::Class(c) => c.name(),
            Self::Background(b) => b.name(),
            Self::Equipment(e) => e.name(),
        }
    }

    /// Column names for this record's kind
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::Race(_) => Race::COLUMNS,
            Self::Class(_) => CharacterClass::COLUMNS,
            Self::Background(_) => Background::COLUMNS,
            Self::Equipment(_) => Equipment::COLUMNS,
        }
    }

    /// Flattens the record into one string per column
    pub fn to_row(&self) -> Vec<String> {
        match self {
            Self::Race(r) => r.to_row(),
            Self::Class(c) => c.to_row(),
            Self::Background(b) => b.to_row(),
            Self::Equipment(e) => e.to_row(),
        }
    }
}

/// Normalizes one raw record as the given kind
///
/// # Example
///
/// ```
/// use open5e_harvest::normalize::{normalize, ItemKind, NormalizedRecord};
/// use open5e_harvest::raw::RawRecord;
/// use serde_json::json;
///
/// let raw = RawRecord::from_json(json!({"name": "Elf", "asi": "Dex +2"})).unwrap();
/// let record = normalize(&raw, ItemKind::Race);
/// assert_eq!(record.name(), "Elf");
/// assert!(matches!(record, NormalizedRecord::Race(_)));
/// ```
pub fn normalize(raw: &RawRecord, kind: ItemKind) -> NormalizedRecord {
    match kind {
        ItemKind::Race => NormalizedRecord::Race(normalize_race(raw)),
        ItemKind::Class => NormalizedRecord::Class(normalize_class(raw)),
        ItemKind::Background => NormalizedRecord::Background(normalize_background(raw)),
        ItemKind::Equipment(kind) => NormalizedRecord::Equipment(normalize_equipment(raw, kind)),
    }
}
