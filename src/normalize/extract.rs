//! Text extractors
//!
//! Descriptions are unstructured prose. The functions here pull a few
//! structured facts out of them with ordered pattern sets. Extraction is
//! heuristic: false positives and misses are expected, and no input makes
//! an extractor fail.

use crate::normalize::defaults::{MAX_ARCHETYPES, MIN_ARCHETYPE_LEN};
use crate::records::NamedSlug;
use regex::Regex;
use std::sync::LazyLock;

/// Sub-race patterns, tried in order
static SUBRACE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)(\w+)\s+(?:dwarf|elf|halfling|gnome|dragonborn)",
        r"(?i)(?:variant|subrace):\s*(\w+)",
        r"(?i)(\w+)\s+heritage",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid regex"))
    .collect()
});

/// Archetype patterns, tried in order
static ARCHETYPE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)(?:archetype|path|tradition|circle|oath|domain|patron|school):\s*([^.\n]+)",
        r"(?i)(\w+\s+\w+)(?:\s+archetype|\s+path|\s+tradition)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid regex"))
    .collect()
});

static ARMOR_CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:AC|[Aa]rmor [Cc]lass)\s*:?\s*(\d+)").expect("valid regex")
});
static DEX_CAP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bmax\.?\s*(\d+)").expect("valid regex"));

const ATTUNEMENT_PHRASE: &str = "requires attunement";

/// Weapon properties
const WEAPON_PROPERTIES: &[&str] = &[
    "ammunition",
    "finesse",
    "heavy",
    "light",
    "loading",
    "range",
    "reach",
    "special",
    "thrown",
    "two-handed",
    "versatile",
];

/// Armor properties
const ARMOR_PROPERTIES: &[&str] = &["stealth disadvantage", "strength requirement"];

/// Magic item properties
const MAGIC_PROPERTIES: &[&str] = &[
    "attunement",
    "charges",
    "consumable",
    "cursed",
    "sentient",
];

/// Extracts sub-race names from a race description
///
/// Matches already contained in the race's own name (for example `High` in
/// `High Elf`) are skipped.
///
/// # Example
///
/// ```
/// use open5e_harvest::normalize::extract::extract_subraces;
///
/// let subraces = extract_subraces("Hill dwarf and mountain dwarf clans.", "Dwarf");
/// assert_eq!(subraces[0].name, "Hill");
/// assert_eq!(subraces[1].slug, "mountain");
/// ```
pub fn extract_subraces(description: &str, name: &str) -> Vec<NamedSlug> {
    let name_lower = name.to_lowercase();
    let mut subraces = Vec::new();

    for pattern in SUBRACE_PATTERNS.iter() {
        for caps in pattern.captures_iter(description) {
            let Some(found) = caps.get(1) else { continue };
            let found = found.as_str();
            if name_lower.contains(&found.to_lowercase()) {
                continue;
            }
            subraces.push(NamedSlug::from_name(title_case(found)));
        }
    }

    subraces
}

/// Extracts archetype (subclass) names from a class description
///
/// Matches of three characters or fewer are dropped, and at most ten
/// archetypes are returned, in pattern-then-match order.
pub fn extract_archetypes(description: &str) -> Vec<NamedSlug> {
    ARCHETYPE_PATTERNS
        .iter()
        .flat_map(|pattern| pattern.captures_iter(description))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().trim().to_string()))
        .filter(|found| found.chars().count() > MIN_ARCHETYPE_LEN)
        .map(|found| NamedSlug::from_name(title_case(&found)))
        .take(MAX_ARCHETYPES)
        .collect()
}

/// Finds property terms mentioned in an item description
///
/// The vocabulary is shared by all equipment kinds; each term present
/// (as a case-insensitive substring) is reported once, title-cased, in
/// vocabulary order.
pub fn extract_properties(description: &str) -> Vec<String> {
    let lowered = description.to_lowercase();

    WEAPON_PROPERTIES
        .iter()
        .chain(ARMOR_PROPERTIES)
        .chain(MAGIC_PROPERTIES)
        .filter(|term| lowered.contains(**term))
        .map(|term| title_case(term))
        .collect()
}

/// Finds the first `AC <number>` token in a text
pub fn scan_armor_class(text: &str) -> Option<i64> {
    ARMOR_CLASS_RE
        .captures(text)
        .and_then(|caps| caps[1].parse::<i64>().ok())
}

/// Finds a dexterity cap such as `(max 2)` in an armor class string
pub fn scan_dex_cap(text: &str) -> Option<i64> {
    DEX_CAP_RE
        .captures(text)
        .and_then(|caps| caps[1].parse::<i64>().ok())
}

/// Returns true if a text states that an item requires attunement
pub fn mentions_attunement(text: &str) -> bool {
    text.to_lowercase().contains(ATTUNEMENT_PHRASE)
}

/// Capitalizes the first letter of every alphabetic run and lowercases the
/// rest (`"two-handed"` becomes `"Two-Handed"`)
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_alphabetic = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_alphabetic {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            previous_alphabetic = true;
        } else {
            result.push(c);
            previous_alphabetic = false;
        }
    }

    result
}
