use crate::records::encode::{encode_bool, encode_float, encode_json, encode_optional};
use crate::records::CanonicalRecord;
use serde::Serialize;
use std::fmt;

/// The upstream endpoint an equipment item came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquipmentKind {
    MagicItem,
    Weapon,
    Armor,
}

impl EquipmentKind {
    /// All equipment kinds, in harvest order
    pub const ALL: [EquipmentKind; 3] = [Self::MagicItem, Self::Weapon, Self::Armor];

    /// The token written to the `type` column (and the default category)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MagicItem => "magic-item",
            Self::Weapon => "weapon",
            Self::Armor => "armor",
        }
    }
}

impl fmt::Display for EquipmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical equipment record (magic items, weapons, armor and shields)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Equipment {
    pub slug: String,
    pub name: String,
    /// `magic-item`, `weapon`, `armor` or `shield`
    pub item_type: String,
    pub rarity: String,
    pub requires_attunement: bool,
    pub cost_quantity: Option<i64>,
    pub cost_unit: Option<String>,
    /// Pounds
    pub weight: Option<f64>,
    pub description: String,
    pub document_slug: String,
    pub ac: Option<i64>,
    pub ac_base: Option<i64>,
    pub ac_add_dex: Option<bool>,
    pub ac_cap_dex: Option<i64>,
    pub dex_bonus: Option<bool>,
    pub max_dex_bonus: Option<i64>,
    pub damage_dice: Option<String>,
    pub damage_type: Option<String>,
    pub category: String,
    pub properties: Vec<String>,
}

impl Equipment {
    /// Returns true if this item was reclassified as a shield
    pub fn is_shield(&self) -> bool {
        self.item_type == "shield"
    }
}

impl CanonicalRecord for Equipment {
    const COLUMNS: &'static [&'static str] = &[
        "slug",
        "name",
        "type",
        "rarity",
        "requires_attunement",
        "cost_quantity",
        "cost_unit",
        "weight",
        "description",
        "document_slug",
        "ac",
        "ac_base",
        "ac_add_dex",
        "ac_cap_dex",
        "dex_bonus",
        "max_dex_bonus",
        "damage_dice",
        "damage_type",
        "category",
        "properties",
    ];

    const KIND: &'static str = "equipment";

    fn name(&self) -> &str {
        &self.name
    }

    fn document_slug(&self) -> &str {
        &self.document_slug
    }

    fn to_row(&self) -> Vec<String> {
        let optional_bool = |value: Option<bool>| value.map(encode_bool).unwrap_or_default();

        vec![
            self.slug.clone(),
            self.name.clone(),
            self.item_type.clone(),
            self.rarity.clone(),
            encode_bool(self.requires_attunement),
            encode_optional(self.cost_quantity.as_ref()),
            encode_optional(self.cost_unit.as_ref()),
            self.weight.map(encode_float).unwrap_or_default(),
            self.description.clone(),
            self.document_slug.clone(),
            encode_optional(self.ac.as_ref()),
            encode_optional(self.ac_base.as_ref()),
            optional_bool(self.ac_add_dex),
            encode_optional(self.ac_cap_dex.as_ref()),
            optional_bool(self.dex_bonus),
            encode_optional(self.max_dex_bonus.as_ref()),
            encode_optional(self.damage_dice.as_ref()),
            encode_optional(self.damage_type.as_ref()),
            self.category.clone(),
            encode_json(&self.properties),
        ]
    }
}
