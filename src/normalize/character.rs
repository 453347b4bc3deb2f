//! Race, class and background normalization

use crate::normalize::extract::{extract_archetypes, extract_subraces};
use crate::normalize::fields::{parse_asi, parse_classes_list, parse_hit_die, parse_speed, parse_text};
use crate::raw::RawRecord;
use crate::records::{Background, CharacterClass, NamedSlug, Race};

/// Normalizes one race record
///
/// Sub-races are the explicit upstream `subraces` list (if any) followed by
/// sub-races found in the description that are not already listed.
pub fn normalize_race(raw: &RawRecord) -> Race {
    let name = parse_text(raw.get("name"));
    let description = parse_text(raw.get("desc"));
    tracing::debug!("Processing race: {}", display_name(&name));

    let asi = parse_asi(raw.get("asi"));
    let speed = parse_speed(raw.get("speed"));

    let explicit = parse_classes_list(raw.get("subraces"))
        .into_iter()
        .map(NamedSlug::from_name)
        .collect();
    let subraces = merge_named(explicit, extract_subraces(&description, &name));

    if !asi.is_empty() {
        tracing::debug!("  ASI: {:?}", asi);
    }
    tracing::debug!("  Speed: {:?}", speed);
    if !subraces.is_empty() {
        tracing::debug!("  Subraces: {} found", subraces.len());
    }

    Race {
        slug: parse_text(raw.get("slug")),
        name,
        description,
        asi,
        age: parse_text(raw.get("age")),
        alignment: parse_text(raw.get("alignment")),
        size: parse_text(raw.get("size")),
        speed,
        languages: parse_text(raw.get("languages")),
        proficiencies: parse_text(raw.get("proficiencies")),
        traits: parse_text(raw.get("traits")),
        document_slug: parse_text(raw.get("document__slug")),
        subraces,
    }
}

/// Normalizes one class record
///
/// Archetypes are the explicit upstream `archetypes` list (if any) followed
/// by archetypes found in the description that are not already listed.
pub fn normalize_class(raw: &RawRecord) -> CharacterClass {
    let name = parse_text(raw.get("name"));
    let description = parse_text(raw.get("desc"));
    tracing::debug!("Processing class: {}", display_name(&name));

    let explicit = parse_classes_list(raw.get("archetypes"))
        .into_iter()
        .map(NamedSlug::from_name)
        .collect();
    let archetypes = merge_named(explicit, extract_archetypes(&description));
    let hit_die = parse_hit_die(raw.get("hit_die"));

    if !archetypes.is_empty() {
        tracing::debug!("  Archetypes: {} found", archetypes.len());
    }
    tracing::debug!("  Hit Die: d{}", hit_die);

    CharacterClass {
        slug: parse_text(raw.get("slug")),
        name,
        description,
        hit_die,
        prof_armor: parse_text(raw.get("prof_armor")),
        prof_weapons: parse_text(raw.get("prof_weapons")),
        prof_tools: parse_text(raw.get("prof_tools")),
        prof_saving_throws: parse_text(raw.get("prof_saving_throws")),
        prof_skills: parse_text(raw.get("prof_skills")),
        equipment: parse_text(raw.get("equipment")),
        spellcasting_ability: parse_text(raw.get("spellcasting_ability")),
        subtypes_name: parse_text(raw.get("subtypes_name")),
        document_slug: parse_text(raw.get("document__slug")),
        archetypes,
    }
}

/// Normalizes one background record
pub fn normalize_background(raw: &RawRecord) -> Background {
    let name = parse_text(raw.get("name"));
    tracing::debug!("Processing background: {}", display_name(&name));

    Background {
        slug: parse_text(raw.get("slug")),
        name,
        description: parse_text(raw.get("desc")),
        skill_proficiencies: parse_text(raw.get("skill_proficiencies")),
        languages: parse_text(raw.get("languages")),
        equipment: parse_text(raw.get("equipment")),
        feature: parse_text(raw.get("feature")),
        feature_desc: parse_text(raw.get("feature_desc")),
        document_slug: parse_text(raw.get("document__slug")),
    }
}

/// Appends extracted names to explicit ones, skipping case-insensitive repeats
fn merge_named(mut explicit: Vec<NamedSlug>, extracted: Vec<NamedSlug>) -> Vec<NamedSlug> {
    if explicit.is_empty() {
        return extracted;
    }

    for candidate in extracted {
        let duplicate = explicit
            .iter()
            .any(|existing| existing.name.eq_ignore_ascii_case(&candidate.name));
        if !duplicate {
            explicit.push(candidate);
        }
    }
    explicit
}

fn display_name(name: &str) -> &str {
    if name.is_empty() {
        "Unknown"
    } else {
        name
    }
}
