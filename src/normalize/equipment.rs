//! Equipment normalization
//!
//! Magic items, weapons and armor share one canonical record. Each field is
//! resolved through a fallback chain:
//!
//! | Field | Resolution |
//! |-------|------------|
//! | type / category | kind token; armor named "shield" becomes `shield` |
//! | ac / ac_base | numeric field → `AC <n>` in description → `ac_string` |
//! | requires_attunement | explicit flag → "requires attunement" in description |
//! | rarity | source rarity unless absent or `none` → `common` |
//! | damage | `damage` field → top-level `damage_dice` / `damage_type` |
//! | properties | explicit list ∪ vocabulary terms in description |

use crate::normalize::defaults::DEFAULT_RARITY;
use crate::normalize::extract::{
    extract_properties, mentions_attunement, scan_armor_class, scan_dex_cap,
};
use crate::normalize::fields::{
    coerce_integer, first_integer, parse_classes_list, parse_cost, parse_damage, parse_flag,
    parse_text, parse_weight, Damage,
};
use crate::raw::{RawRecord, RawValue};
use crate::records::{Equipment, EquipmentKind};

const SHIELD: &str = "shield";

/// Field names that may carry a numeric armor class, in order of preference
const ARMOR_CLASS_FIELDS: &[&str] = &["ac_base", "base_ac", "armor_class"];

/// Normalizes one equipment record of the given kind
///
/// # Example
///
/// ```
/// use open5e_harvest::normalize::normalize_equipment;
/// use open5e_harvest::raw::RawRecord;
/// use open5e_harvest::records::EquipmentKind;
/// use serde_json::json;
///
/// let raw = RawRecord::from_json(json!({
///     "name": "Shield",
///     "category": "armor",
///     "desc": "AC 2"
/// }))
/// .unwrap();
///
/// let item = normalize_equipment(&raw, EquipmentKind::Armor);
/// assert_eq!(item.item_type, "shield");
/// assert_eq!(item.category, "shield");
/// assert_eq!(item.ac, Some(2));
/// ```
pub fn normalize_equipment(raw: &RawRecord, kind: EquipmentKind) -> Equipment {
    let name = parse_text(raw.get("name"));
    let description = parse_text(raw.get("desc"));
    tracing::debug!("Processing {}: {}", kind, name);

    let is_shield = kind == EquipmentKind::Armor && name.to_lowercase().contains(SHIELD);
    let (item_type, category) = if is_shield {
        (SHIELD.to_string(), SHIELD.to_string())
    } else {
        let category = raw
            .get("category")
            .as_text()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(kind.as_str())
            .to_string();
        (kind.as_str().to_string(), category)
    };

    let is_armor = kind == EquipmentKind::Armor;
    let ac_string = parse_text(raw.get("ac_string"));
    let armor_class = resolve_armor_class(raw, is_armor, &description, &ac_string);
    let ac_add_dex = resolve_dex_bonus(raw, is_armor, &ac_string);
    let ac_cap_dex = resolve_dex_cap(raw, is_armor, &ac_string);

    let cost = parse_cost(raw.get("cost"));
    let damage = resolve_damage(raw);

    Equipment {
        slug: parse_text(raw.get("slug")),
        name,
        item_type,
        rarity: resolve_rarity(raw.get("rarity")),
        requires_attunement: resolve_attunement(raw.get("requires_attunement"), &description),
        cost_quantity: cost.quantity,
        cost_unit: cost.unit,
        weight: parse_weight(raw.get("weight")),
        properties: resolve_properties(raw.get("properties"), &description),
        description,
        document_slug: parse_text(raw.get("document__slug")),
        ac: armor_class,
        ac_base: armor_class,
        ac_add_dex,
        ac_cap_dex,
        dex_bonus: ac_add_dex,
        max_dex_bonus: ac_cap_dex,
        damage_dice: damage.dice,
        damage_type: damage.damage_type,
        category,
    }
}

fn resolve_armor_class(
    raw: &RawRecord,
    is_armor: bool,
    description: &str,
    ac_string: &str,
) -> Option<i64> {
    let explicit = ARMOR_CLASS_FIELDS
        .iter()
        .find_map(|field| match raw.get(field) {
            value @ (RawValue::Integer(_) | RawValue::Float(_)) => coerce_integer(value),
            _ => None,
        });
    if explicit.is_some() || !is_armor {
        return explicit;
    }

    scan_armor_class(description).or_else(|| first_integer(ac_string))
}

fn resolve_dex_bonus(raw: &RawRecord, is_armor: bool, ac_string: &str) -> Option<bool> {
    let explicit = parse_flag(raw.get("ac_add_dex")).or_else(|| parse_flag(raw.get("plus_dex_mod")));
    if explicit.is_some() || !is_armor || ac_string.trim().is_empty() {
        return explicit;
    }

    Some(ac_string.to_lowercase().contains("dex"))
}

fn resolve_dex_cap(raw: &RawRecord, is_armor: bool, ac_string: &str) -> Option<i64> {
    let explicit = coerce_integer(raw.get("ac_cap_dex"))
        .or_else(|| coerce_integer(raw.get("plus_max")))
        .filter(|cap| *cap > 0);
    if explicit.is_some() || !is_armor {
        return explicit;
    }

    scan_dex_cap(ac_string)
}

/// Explicit `true` wins; attunement text flags count; otherwise the
/// description decides
fn resolve_attunement(flag: RawValue<'_>, description: &str) -> bool {
    let explicit = match flag {
        RawValue::Text(text) => parse_flag(flag).unwrap_or_else(|| mentions_attunement(text)),
        other => parse_flag(other).unwrap_or(false),
    };

    explicit || mentions_attunement(description)
}

fn resolve_rarity(value: RawValue<'_>) -> String {
    match value.as_text().map(str::trim) {
        Some(rarity) if !rarity.is_empty() && !rarity.eq_ignore_ascii_case("none") => {
            rarity.to_string()
        }
        _ => DEFAULT_RARITY.to_string(),
    }
}

fn resolve_damage(raw: &RawRecord) -> Damage {
    let damage = parse_damage(raw.get("damage"));
    if !damage.is_unknown() {
        return damage;
    }

    let top_level = |field: &str| {
        raw.get(field)
            .as_text()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    };

    Damage {
        dice: top_level("damage_dice"),
        damage_type: top_level("damage_type"),
    }
}

/// Explicit properties first, then description terms not already present
fn resolve_properties(explicit: RawValue<'_>, description: &str) -> Vec<String> {
    let mut properties: Vec<String> = Vec::new();

    for property in parse_classes_list(explicit)
        .into_iter()
        .chain(extract_properties(description))
    {
        let property = property.trim().to_string();
        if property.is_empty() {
            continue;
        }
        if !properties
            .iter()
            .any(|existing| existing.eq_ignore_ascii_case(&property))
        {
            properties.push(property);
        }
    }

    properties
}
