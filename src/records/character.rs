use crate::records::encode::encode_json;
use crate::records::CanonicalRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One ability score improvement: a bonus applied to one or more attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityBonus {
    /// Lowercase full attribute names (e.g. `dexterity`)
    #[serde(default)]
    pub attributes: Vec<String>,

    /// The bonus applied
    pub value: i64,
}

impl AbilityBonus {
    /// Creates a bonus for a single attribute
    pub fn single(attribute: impl Into<String>, value: i64) -> Self {
        Self {
            attributes: vec![attribute.into()],
            value,
        }
    }
}

/// Movement mode (`walk`, `fly`, `swim`, ...) to distance in feet
pub type Speed = BTreeMap<String, i64>;

/// A named specialization (sub-race or class archetype) with its slug
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedSlug {
    pub name: String,
    pub slug: String,
}

impl NamedSlug {
    /// Builds the pair from a display name; the slug is the lowercase name
    /// with spaces replaced by hyphens
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        let slug = name.to_lowercase().replace(' ', "-");
        Self { name, slug }
    }
}

/// Canonical race record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Race {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub asi: Vec<AbilityBonus>,
    pub age: String,
    pub alignment: String,
    pub size: String,
    pub speed: Speed,
    pub languages: String,
    pub proficiencies: String,
    pub traits: String,
    pub document_slug: String,
    pub subraces: Vec<NamedSlug>,
}

impl CanonicalRecord for Race {
    const COLUMNS: &'static [&'static str] = &[
        "slug",
        "name",
        "description",
        "asi",
        "age",
        "alignment",
        "size",
        "speed",
        "languages",
        "proficiencies",
        "traits",
        "document_slug",
        "subraces",
    ];

    const KIND: &'static str = "race";

    fn name(&self) -> &str {
        &self.name
    }

    fn document_slug(&self) -> &str {
        &self.document_slug
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.slug.clone(),
            self.name.clone(),
            self.description.clone(),
            encode_json(&self.asi),
            self.age.clone(),
            self.alignment.clone(),
            self.size.clone(),
            encode_json(&self.speed),
            self.languages.clone(),
            self.proficiencies.clone(),
            self.traits.clone(),
            self.document_slug.clone(),
            encode_json(&self.subraces),
        ]
    }
}

/// Canonical class record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterClass {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub hit_die: i64,
    pub prof_armor: String,
    pub prof_weapons: String,
    pub prof_tools: String,
    pub prof_saving_throws: String,
    pub prof_skills: String,
    pub equipment: String,
    pub spellcasting_ability: String,
    pub subtypes_name: String,
    pub document_slug: String,
    pub archetypes: Vec<NamedSlug>,
}

impl CanonicalRecord for CharacterClass {
    const COLUMNS: &'static [&'static str] = &[
        "slug",
        "name",
        "description",
        "hit_die",
        "prof_armor",
        "prof_weapons",
        "prof_tools",
        "prof_saving_throws",
        "prof_skills",
        "equipment",
        "spellcasting_ability",
        "subtypes_name",
        "document_slug",
        "archetypes",
    ];

    const KIND: &'static str = "class";

    fn name(&self) -> &str {
        &self.name
    }

    fn document_slug(&self) -> &str {
        &self.document_slug
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.slug.clone(),
            self.name.clone(),
            self.description.clone(),
            self.hit_die.to_string(),
            self.prof_armor.clone(),
            self.prof_weapons.clone(),
            self.prof_tools.clone(),
            self.prof_saving_throws.clone(),
            self.prof_skills.clone(),
            self.equipment.clone(),
            self.spellcasting_ability.clone(),
            self.subtypes_name.clone(),
            self.document_slug.clone(),
            encode_json(&self.archetypes),
        ]
    }
}

/// Canonical background record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Background {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub skill_proficiencies: String,
    pub languages: String,
    pub equipment: String,
    pub feature: String,
    pub feature_desc: String,
    pub document_slug: String,
}

impl CanonicalRecord for Background {
    const COLUMNS: &'static [&'static str] = &[
        "slug",
        "name",
        "description",
        "skill_proficiencies",
        "languages",
        "equipment",
        "feature",
        "feature_desc",
        "document_slug",
    ];

    const KIND: &'static str = "background";

    fn name(&self) -> &str {
        &self.name
    }

    fn document_slug(&self) -> &str {
        &self.document_slug
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.slug.clone(),
            self.name.clone(),
            self.description.clone(),
            self.skill_proficiencies.clone(),
            self.languages.clone(),
            self.equipment.clone(),
            self.feature.clone(),
            self.feature_desc.clone(),
            self.document_slug.clone(),
        ]
    }
}
