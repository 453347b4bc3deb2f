//! Statistics reports over normalized collections
//!
//! This module provides read-only aggregation (totals, grouped counts,
//! coverage ratios and samples) and the two concrete reports printed after a
//! harvest. Nothing here mutates a collection, and every function accepts an
//! empty one.

use crate::collection::Collection;
use crate::normalize::defaults::{REPORT_SAMPLE_SIZE, UNKNOWN_SOURCE};
use crate::records::{Background, CanonicalRecord, CharacterClass, Equipment, Race};
use std::collections::BTreeMap;

/// Counts records grouped by a key, sorted by key
///
/// # Arguments
///
/// * `items` - The records to group
/// * `key` - Extracts the grouping key from a record
///
/// # Returns
///
/// A map from key to number of records with that key
pub fn count_by<T, K, F>(items: &[T], key: F) -> BTreeMap<K, usize>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut counts = BTreeMap::new();
    for item in items {
        *counts.entry(key(item)).or_insert(0) += 1;
    }
    counts
}

/// Counts records by source document, with blank sources grouped as `unknown`
pub fn count_by_source<T: CanonicalRecord>(items: &[T]) -> BTreeMap<String, usize> {
    count_by(items, |item| {
        let source = item.document_slug().trim();
        if source.is_empty() {
            UNKNOWN_SOURCE.to_string()
        } else {
            source.to_string()
        }
    })
}

/// Percentage of records matching a predicate, rounded to one decimal place
///
/// Returns None for an empty slice.
///
/// # Example
///
/// ```
/// use open5e_harvest::output::stats::coverage_ratio;
///
/// assert_eq!(coverage_ratio(&[1, 2, 3], |n| *n > 1), Some(66.7));
/// assert_eq!(coverage_ratio::<i32, _>(&[], |_| true), None);
/// ```
pub fn coverage_ratio<T, P>(items: &[T], predicate: P) -> Option<f64>
where
    P: Fn(&T) -> bool,
{
    if items.is_empty() {
        return None;
    }

    let matching = items.iter().filter(|item| predicate(item)).count();
    let percent = matching as f64 / items.len() as f64 * 100.0;
    Some((percent * 10.0).round() / 10.0)
}

/// The first few records matching a predicate
pub fn sample<T, P>(items: &[T], predicate: P) -> Vec<&T>
where
    P: Fn(&T) -> bool,
{
    items
        .iter()
        .filter(|item| predicate(item))
        .take(REPORT_SAMPLE_SIZE)
        .collect()
}

/// One coverage line of a report
#[derive(Debug, Clone, PartialEq)]
pub struct Coverage {
    /// What is being measured, e.g. "Races with ASI"
    pub label: &'static str,

    /// Percentage, or None when the collection was empty
    pub percent: Option<f64>,
}

impl Coverage {
    fn of<T, P: Fn(&T) -> bool>(label: &'static str, items: &[T], predicate: P) -> Self {
        Self {
            label,
            percent: coverage_ratio(items, predicate),
        }
    }

    /// The percentage formatted for display, `n/a` when undefined
    pub fn display_percent(&self) -> String {
        match self.percent {
            Some(percent) => format!("{:.1}%", percent),
            None => "n/a".to_string(),
        }
    }
}

/// Statistics over the race, class and background collections
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharacterReport {
    pub total_races: usize,
    pub total_classes: usize,
    pub total_backgrounds: usize,

    pub races_by_source: BTreeMap<String, usize>,
    pub classes_by_source: BTreeMap<String, usize>,
    pub backgrounds_by_source: BTreeMap<String, usize>,

    pub coverage: Vec<Coverage>,

    /// "Elf: ASI [...]" lines
    pub race_samples: Vec<String>,
    /// "Wizard: d6 hit die" lines
    pub class_samples: Vec<String>,
    /// "Acolyte: Shelter of the Faithful" lines
    pub background_samples: Vec<String>,
}

impl CharacterReport {
    /// Builds the report from the three character collections
    pub fn generate(
        races: &Collection<Race>,
        classes: &Collection<CharacterClass>,
        backgrounds: &Collection<Background>,
    ) -> Self {
        let races = races.records();
        let classes = classes.records();
        let backgrounds = backgrounds.records();

        let coverage = vec![
            Coverage::of("Races with ASI", races, |r: &Race| !r.asi.is_empty()),
            Coverage::of("Races with subraces", races, |r: &Race| !r.subraces.is_empty()),
            Coverage::of("Classes with archetypes", classes, |c: &CharacterClass| {
                !c.archetypes.is_empty()
            }),
            Coverage::of("Classes with spellcasting", classes, |c: &CharacterClass| {
                !c.spellcasting_ability.trim().is_empty()
            }),
            Coverage::of("Backgrounds with a feature", backgrounds, |b: &Background| {
                !b.feature.trim().is_empty()
            }),
        ];

        let race_samples = sample(races, |r| !r.asi.is_empty())
            .into_iter()
            .map(|r| {
                let asi = serde_json::to_string(&r.asi).unwrap_or_default();
                format!("{}: ASI {}", r.name, asi)
            })
            .collect();

        let class_samples = sample(classes, |_| true)
            .into_iter()
            .map(|c| format!("{}: d{} hit die", c.name, c.hit_die))
            .collect();

        let background_samples = sample(backgrounds, |b| !b.feature.trim().is_empty())
            .into_iter()
            .map(|b| format!("{}: {}", b.name, b.feature))
            .collect();

        Self {
            total_races: races.len(),
            total_classes: classes.len(),
            total_backgrounds: backgrounds.len(),
            races_by_source: count_by_source(races),
            classes_by_source: count_by_source(classes),
            backgrounds_by_source: count_by_source(backgrounds),
            coverage,
            race_samples,
            class_samples,
            background_samples,
        }
    }
}

/// Statistics over the combined equipment collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EquipmentReport {
    pub total_items: usize,

    pub by_type: BTreeMap<String, usize>,
    pub by_rarity: BTreeMap<String, usize>,
    pub by_source: BTreeMap<String, usize>,

    pub coverage: Vec<Coverage>,

    /// "Shield: AC 2, Type: shield" lines
    pub ac_samples: Vec<String>,
    /// "Longsword: 1d8 slashing damage" lines
    pub damage_samples: Vec<String>,
}

/// A base armor class of zero counts as no armor class
fn has_armor_class(item: &Equipment) -> bool {
    matches!(item.ac_base, Some(ac) if ac != 0)
}

impl EquipmentReport {
    /// Builds the report from the equipment collection
    pub fn generate(equipment: &Collection<Equipment>) -> Self {
        let items = equipment.records();

        let coverage = vec![
            Coverage::of("Items with cost", items, |e: &Equipment| e.cost_quantity.is_some()),
            Coverage::of("Items with weight", items, |e: &Equipment| e.weight.is_some()),
            Coverage::of("Items with AC", items, has_armor_class),
            Coverage::of("Items with damage", items, |e: &Equipment| {
                e.damage_dice.is_some()
            }),
        ];

        let ac_samples = sample(items, has_armor_class)
            .into_iter()
            .filter_map(|e| {
                e.ac_base
                    .map(|ac| format!("{}: AC {}, Type: {}", e.name, ac, e.item_type))
            })
            .collect();

        let damage_samples = sample(items, |e| e.damage_dice.is_some())
            .into_iter()
            .filter_map(|e| {
                let dice = e.damage_dice.as_deref()?;
                let damage_type = e.damage_type.as_deref().unwrap_or_default();
                Some(format!("{}: {} {} damage", e.name, dice, damage_type))
            })
            .collect();

        Self {
            total_items: items.len(),
            by_type: count_by(items, |e| e.item_type.clone()),
            by_rarity: count_by(items, |e| e.rarity.clone()),
            by_source: count_by_source(items),
            coverage,
            ac_samples,
            damage_samples,
        }
    }
}

/// Prints the character report to stdout
///
/// # Arguments
///
/// * `report` - The report to display
pub fn print_character_report(report: &CharacterReport) {
    println!("\n=== Character Data Statistics ===\n");

    println!("Overview:");
    println!("  Total races: {}", report.total_races);
    println!("  Total classes: {}", report.total_classes);
    println!("  Total backgrounds: {}", report.total_backgrounds);
    println!();

    print_counts("Races by source", &report.races_by_source);
    print_counts("Classes by source", &report.classes_by_source);
    print_counts("Backgrounds by source", &report.backgrounds_by_source);
    print_coverage(&report.coverage);

    print_samples("Sample races with ASI data", &report.race_samples);
    print_samples("Sample classes with hit dice", &report.class_samples);
    print_samples("Sample backgrounds with features", &report.background_samples);
}

/// Prints the equipment report to stdout
///
/// # Arguments
///
/// * `report` - The report to display
pub fn print_equipment_report(report: &EquipmentReport) {
    println!("\n=== Equipment Data Statistics ===\n");

    println!("Overview:");
    println!("  Total items: {}", report.total_items);
    println!();

    print_counts("Items by type", &report.by_type);
    print_counts("Items by rarity", &report.by_rarity);
    print_counts("Items by source", &report.by_source);
    print_coverage(&report.coverage);

    print_samples("Sample items with AC data", &report.ac_samples);
    print_samples("Sample weapons with damage", &report.damage_samples);
}

fn print_counts(title: &str, counts: &BTreeMap<String, usize>) {
    let total: usize = counts.values().sum();
    println!("{}:", title);
    for (key, count) in counts {
        let percentage = if total > 0 {
            (*count as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        println!("  {}: {} ({:.1}%)", key, count, percentage);
    }
    println!();
}

fn print_coverage(coverage: &[Coverage]) {
    println!("Coverage:");
    for line in coverage {
        println!("  {}: {}", line.label, line.display_percent());
    }
    println!();
}

fn print_samples(title: &str, samples: &[String]) {
    if samples.is_empty() {
        return;
    }

    println!("{}:", title);
    for line in samples {
        println!("  {}", line);
    }
    println!();
}
