//! Canonical record types
//!
//! Each item kind has a fixed set of columns. A canonical record always
//! carries every column; the normalizer substitutes defaults for anything the
//! source left out. Records flatten to rows of strings for tabular export,
//! with structured sub-fields pre-encoded as compact JSON.

mod character;
mod encode;
mod equipment;

pub use character::{AbilityBonus, Background, CharacterClass, NamedSlug, Race, Speed};
pub use encode::{encode_bool, encode_float, encode_json, encode_optional};
pub use equipment::{Equipment, EquipmentKind};

/// Common interface of all canonical records
///
/// The column list and the row produced by [`CanonicalRecord::to_row`] are
/// always the same length and in the same order.
pub trait CanonicalRecord {
    /// Column names in export order
    const COLUMNS: &'static [&'static str];

    /// Short label for the record kind, used in logs and reports
    const KIND: &'static str;

    /// The record's display name (the deduplication key)
    fn name(&self) -> &str;

    /// The slug of the source document the record came from
    fn document_slug(&self) -> &str;

    /// Flattens the record into one string per column
    fn to_row(&self) -> Vec<String>;
}
