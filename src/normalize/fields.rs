//! Field parsers
//!
//! Each parser takes one raw field of unknown shape and returns a canonical
//! value. Parsers are total: a shape they do not understand yields the
//! documented default, never an error.

use crate::normalize::defaults::{is_no_value_token, DEFAULT_HIT_DIE, DEFAULT_WALK_SPEED, WALK};
use crate::raw::RawValue;
use crate::records::{AbilityBonus, Speed};
use regex::{Captures, Regex};
use std::sync::LazyLock;

static ASI_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)\s*\+(\d+)").expect("valid regex"));
static INTEGER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));
static COST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)(?:\.\d+)?\s*([A-Za-z]{2})\b").expect("valid regex")
});
static DAMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+d\d+(?:\s*\+\s*\d+)?)\s+([a-z]+)").expect("valid regex")
});
static HIT_DIE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)d\s*(\d+)").expect("valid regex"));

type WeightExtractor = fn(&Captures<'_>) -> Option<f64>;

/// Weight patterns in order of preference; later ones are looser fallbacks
static WEIGHT_PATTERNS: LazyLock<Vec<(Regex, WeightExtractor)>> = LazyLock::new(|| {
    vec![
        (
            Regex::new(r"(?i)^\s*(\d+(?:\.\d+)?)\s*lbs?\b").expect("valid regex"),
            whole_pounds as WeightExtractor,
        ),
        (
            Regex::new(r"(?i)^\s*(\d+)\s*/\s*(\d+)\s*lbs?\b").expect("valid regex"),
            fractional_pounds as WeightExtractor,
        ),
        (
            Regex::new(r"^\s*(\d+(?:\.\d+)?)").expect("valid regex"),
            whole_pounds as WeightExtractor,
        ),
    ]
});

/// A price as a whole quantity of some coin
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cost {
    pub quantity: Option<i64>,
    pub unit: Option<String>,
}

impl Cost {
    /// No price information
    pub const UNKNOWN: Cost = Cost {
        quantity: None,
        unit: None,
    };
}

/// Weapon damage: a dice expression and a damage type
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Damage {
    pub dice: Option<String>,
    pub damage_type: Option<String>,
}

impl Damage {
    /// No damage information
    pub const UNKNOWN: Damage = Damage {
        dice: None,
        damage_type: None,
    };

    /// Returns true if neither part is known
    pub fn is_unknown(&self) -> bool {
        self.dice.is_none() && self.damage_type.is_none()
    }
}

/// Parses ability score improvements
///
/// | Input | Output |
/// |-------|--------|
/// | absent / blank | `[]` |
/// | list of `{attributes, value}` | the list (non-conforming entries skipped) |
/// | text such as `"Dex +2, Con +1"` | one entry per `<word> +<n>` token |
/// | anything else | `[]` |
///
/// # Example
///
/// ```
/// use open5e_harvest::normalize::fields::parse_asi;
/// use open5e_harvest::raw::RawValue;
///
/// let asi = parse_asi(RawValue::Text("Dex +2, Con +1"));
/// assert_eq!(asi[0].attributes, vec!["dexterity"]);
/// assert_eq!(asi[1].value, 1);
/// ```
pub fn parse_asi(value: RawValue<'_>) -> Vec<AbilityBonus> {
    if value.is_blank() {
        return Vec::new();
    }

    match value {
        RawValue::Text(text) => ASI_TOKEN_RE
            .captures_iter(text)
            .filter_map(|caps| {
                let amount = caps[2].parse::<i64>().ok()?;
                Some(AbilityBonus::single(canonical_attribute(&caps[1]), amount))
            })
            .collect(),
        RawValue::List(items) => items
            .iter()
            .filter_map(|item| serde_json::from_value::<AbilityBonus>(item.clone()).ok())
            .collect(),
        _ => Vec::new(),
    }
}

/// Maps an attribute abbreviation or full name to its lowercase full name
///
/// Unknown words are returned lower-cased.
pub fn canonical_attribute(word: &str) -> String {
    let lowered = word.to_lowercase();
    let canonical = match lowered.as_str() {
        "str" | "strength" => "strength",
        "dex" | "dexterity" => "dexterity",
        "con" | "constitution" => "constitution",
        "int" | "intelligence" => "intelligence",
        "wis" | "wisdom" => "wisdom",
        "cha" | "charisma" => "charisma",
        _ => return lowered,
    };
    canonical.to_string()
}

/// Parses movement speed
///
/// Mappings pass through with their numeric entries; a string or bare
/// integer becomes a walking speed; everything else is the default
/// `{walk: 30}`.
pub fn parse_speed(value: RawValue<'_>) -> Speed {
    let speed: Speed = match value {
        RawValue::Object(map) => map
            .iter()
            .filter_map(|(mode, distance)| {
                coerce_integer(RawValue::from(distance)).map(|d| (mode.clone(), d))
            })
            .collect(),
        RawValue::Text(text) => first_integer(text)
            .map(|walk| Speed::from([(WALK.to_string(), walk)]))
            .unwrap_or_default(),
        RawValue::Integer(walk) => Speed::from([(WALK.to_string(), walk)]),
        _ => Speed::new(),
    };

    if speed.is_empty() {
        default_speed()
    } else {
        speed
    }
}

/// The speed assumed when none is given
pub fn default_speed() -> Speed {
    Speed::from([(WALK.to_string(), DEFAULT_WALK_SPEED)])
}

/// Parses an item cost
///
/// # Example
///
/// ```
/// use open5e_harvest::normalize::fields::parse_cost;
/// use open5e_harvest::raw::RawValue;
///
/// let cost = parse_cost(RawValue::Text("1,500 gp"));
/// assert_eq!(cost.quantity, Some(1500));
/// assert_eq!(cost.unit.as_deref(), Some("gp"));
/// ```
pub fn parse_cost(value: RawValue<'_>) -> Cost {
    match value {
        RawValue::Text(text) if is_no_value_token(text) => Cost::UNKNOWN,
        RawValue::Text(text) => {
            let stripped = text.replace(',', "");
            COST_RE
                .captures(&stripped)
                .and_then(|caps| {
                    Some(Cost {
                        quantity: Some(caps[1].parse::<i64>().ok()?),
                        unit: Some(caps[2].to_lowercase()),
                    })
                })
                .unwrap_or(Cost::UNKNOWN)
        }
        RawValue::Object(_) => Cost {
            quantity: coerce_integer(value.member("quantity")),
            unit: value
                .member("unit")
                .as_text()
                .map(str::trim)
                .filter(|unit| !unit.is_empty())
                .map(str::to_string),
        },
        _ => Cost::UNKNOWN,
    }
}

/// Parses an item weight in pounds
///
/// Free text is tried against `<n> lb`, then `<n>/<d> lb`, then a bare
/// leading number; the first pattern that yields a value wins.
pub fn parse_weight(value: RawValue<'_>) -> Option<f64> {
    match value {
        RawValue::Integer(n) => Some(n as f64),
        RawValue::Float(f) if f.is_finite() => Some(f),
        RawValue::Text(text) if is_no_value_token(text) => None,
        RawValue::Text(text) => {
            let stripped = text.replace(',', "");
            WEIGHT_PATTERNS.iter().find_map(|(pattern, extract)| {
                pattern.captures(&stripped).and_then(|caps| extract(&caps))
            })
        }
        _ => None,
    }
}

fn whole_pounds(caps: &Captures<'_>) -> Option<f64> {
    caps[1].parse::<f64>().ok()
}

fn fractional_pounds(caps: &Captures<'_>) -> Option<f64> {
    let numerator = caps[1].parse::<f64>().ok()?;
    let denominator = caps[2].parse::<f64>().ok()?;
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator)
}

/// Parses weapon damage
///
/// Accepts `{dice, type}` objects (or the upstream `damage_dice` /
/// `damage_type` keys) and strings like `"1d8 slashing"` or
/// `"2d6+1 fire"`.
pub fn parse_damage(value: RawValue<'_>) -> Damage {
    match value {
        RawValue::Object(_) => Damage {
            dice: non_empty_text(value.member("dice"))
                .or_else(|| non_empty_text(value.member("damage_dice"))),
            damage_type: non_empty_text(value.member("type"))
                .or_else(|| non_empty_text(value.member("damage_type"))),
        },
        RawValue::Text(text) => DAMAGE_RE
            .captures(text)
            .map(|caps| Damage {
                dice: Some(caps[1].split_whitespace().collect::<String>()),
                damage_type: Some(caps[2].to_string()),
            })
            .unwrap_or(Damage::UNKNOWN),
        _ => Damage::UNKNOWN,
    }
}

/// Parses a list of names
///
/// Handles lists of `{name: ...}` objects, lists of strings and
/// comma-separated strings. Used for class lists as well as the explicit
/// archetype and sub-race lists some documents provide.
pub fn parse_classes_list(value: RawValue<'_>) -> Vec<String> {
    match value {
        RawValue::List(items) => items
            .iter()
            .filter_map(|item| match RawValue::from(item) {
                RawValue::Text(name) => Some(name.to_string()),
                object @ RawValue::Object(_) => non_empty_text(object.member("name")),
                _ => None,
            })
            .collect(),
        RawValue::Text(text) => text
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Parses a class hit die (`8`, `"1d10"`, `"d12"`), defaulting to d8
pub fn parse_hit_die(value: RawValue<'_>) -> i64 {
    let parsed = match value {
        RawValue::Integer(n) => Some(n),
        RawValue::Text(text) => HIT_DIE_RE
            .captures(text)
            .and_then(|caps| caps[1].parse::<i64>().ok())
            .or_else(|| text.trim().parse::<i64>().ok()),
        _ => None,
    };

    parsed.filter(|die| *die > 0).unwrap_or(DEFAULT_HIT_DIE)
}

/// Reads a field as display text
///
/// Absent fields are empty; numbers and booleans use their display form;
/// nested structures are kept as compact JSON.
pub fn parse_text(value: RawValue<'_>) -> String {
    match value {
        RawValue::Absent => String::new(),
        RawValue::Text(text) => text.to_string(),
        RawValue::Integer(n) => n.to_string(),
        RawValue::Float(f) => f.to_string(),
        RawValue::Boolean(b) => b.to_string(),
        RawValue::Object(map) => serde_json::to_string(map).unwrap_or_default(),
        RawValue::List(items) => serde_json::to_string(items).unwrap_or_default(),
    }
}

/// Reads a field as a boolean flag
///
/// Only real booleans and the strings `true` / `false` count.
pub fn parse_flag(value: RawValue<'_>) -> Option<bool> {
    match value {
        RawValue::Boolean(b) => Some(b),
        RawValue::Text(text) => match text.trim().to_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Coerces a numeric-looking field into an integer
///
/// Floats are truncated; strings must start with an integer.
pub fn coerce_integer(value: RawValue<'_>) -> Option<i64> {
    match value {
        RawValue::Integer(n) => Some(n),
        RawValue::Float(f) if f.is_finite() => Some(f.trunc() as i64),
        RawValue::Text(text) => {
            let trimmed = text.trim();
            let digits: String = trimmed.chars().take_while(char::is_ascii_digit).collect();
            digits.parse::<i64>().ok()
        }
        _ => None,
    }
}

/// Returns the first run of digits in a string
pub fn first_integer(text: &str) -> Option<i64> {
    INTEGER_RE
        .find(text)
        .and_then(|m| m.as_str().parse::<i64>().ok())
}

fn non_empty_text(value: RawValue<'_>) -> Option<String> {
    value
        .as_text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_asi_absent_or_malformed_is_empty() {
        assert!(parse_asi(RawValue::Absent).is_empty());
        assert!(parse_asi(RawValue::Text("")).is_empty());
        assert!(parse_asi(RawValue::Integer(2)).is_empty());
        assert!(parse_asi(RawValue::Boolean(true)).is_empty());
        assert!(parse_asi(RawValue::Text("no bonuses here")).is_empty());

        let object = json!({"dex": 2});
        assert!(parse_asi(RawValue::from(&object)).is_empty());
    }

    #[test]
    fn test_asi_from_text_keeps_order() {
        let asi = parse_asi(RawValue::Text("Dex +2, Con +1"));
        assert_eq!(
            asi,
            vec![
                AbilityBonus::single("dexterity", 2),
                AbilityBonus::single("constitution", 1),
            ]
        );
    }

    #[test]
    fn test_asi_full_names_and_unknown_words() {
        let asi = parse_asi(RawValue::Text("Charisma +2 and one other +1"));
        assert_eq!(asi[0], AbilityBonus::single("charisma", 2));
        assert_eq!(asi[1], AbilityBonus::single("other", 1));
    }

    #[test]
    fn test_asi_structured_list_passes_through() {
        let list = json!([
            {"attributes": ["Dexterity"], "value": 2},
            "garbage",
            {"attributes": ["Wisdom"], "value": 1}
        ]);
        let asi = parse_asi(RawValue::from(&list));
        assert_eq!(
            asi,
            vec![
                AbilityBonus::single("Dexterity", 2),
                AbilityBonus::single("Wisdom", 1),
            ]
        );
    }

    #[test]
    fn test_speed_defaults() {
        assert_eq!(parse_speed(RawValue::Absent), default_speed());
        assert_eq!(parse_speed(RawValue::Text("fast")), default_speed());
        assert_eq!(parse_speed(RawValue::Boolean(true)), default_speed());
        assert_eq!(parse_speed(RawValue::Float(2.5)), default_speed());

        let empty = json!({});
        assert_eq!(parse_speed(RawValue::from(&empty)), default_speed());
        assert_eq!(default_speed().get("walk"), Some(&30));
    }

    #[test]
    fn test_speed_from_text_and_integer() {
        assert_eq!(parse_speed(RawValue::Text("25 feet")).get("walk"), Some(&25));
        assert_eq!(parse_speed(RawValue::Integer(35)).get("walk"), Some(&35));
    }

    #[test]
    fn test_speed_mapping_passes_through() {
        let speed = json!({"walk": 30, "fly": 50, "hover": true});
        let parsed = parse_speed(RawValue::from(&speed));
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.get("fly"), Some(&50));
        assert_eq!(parsed.get("walk"), Some(&30));
    }

    #[test]
    fn test_cost_from_text() {
        assert_eq!(
            parse_cost(RawValue::Text("2 gp")),
            Cost {
                quantity: Some(2),
                unit: Some("gp".to_string())
            }
        );
        assert_eq!(parse_cost(RawValue::Text("1,500 gp")).quantity, Some(1500));
        assert_eq!(parse_cost(RawValue::Text("2.5 SP")).quantity, Some(2));
        assert_eq!(
            parse_cost(RawValue::Text("2.5 SP")).unit.as_deref(),
            Some("sp")
        );
    }

    #[test]
    fn test_cost_no_value() {
        assert_eq!(parse_cost(RawValue::Text("—")), Cost::UNKNOWN);
        assert_eq!(parse_cost(RawValue::Text("Varies")), Cost::UNKNOWN);
        assert_eq!(parse_cost(RawValue::Absent), Cost::UNKNOWN);
        assert_eq!(parse_cost(RawValue::Text("priceless")), Cost::UNKNOWN);
        assert_eq!(parse_cost(RawValue::Integer(5)), Cost::UNKNOWN);
    }

    #[test]
    fn test_cost_overflow_drops_unit_too() {
        assert_eq!(
            parse_cost(RawValue::Text("99999999999999999999 gp")),
            Cost::UNKNOWN
        );
    }

    #[test]
    fn test_cost_structured() {
        let cost = json!({"quantity": 10, "unit": "gp"});
        assert_eq!(
            parse_cost(RawValue::from(&cost)),
            Cost {
                quantity: Some(10),
                unit: Some("gp".to_string())
            }
        );
    }

    #[test]
    fn test_weight_patterns() {
        assert_eq!(parse_weight(RawValue::Text("3 lb.")), Some(3.0));
        assert_eq!(parse_weight(RawValue::Text("1/2 lb.")), Some(0.5));
        assert_eq!(parse_weight(RawValue::Text("2.5 lbs")), Some(2.5));
        assert_eq!(parse_weight(RawValue::Text("1,000 lb.")), Some(1000.0));
        assert_eq!(parse_weight(RawValue::Text("12")), Some(12.0));
        assert_eq!(parse_weight(RawValue::Integer(4)), Some(4.0));
        assert_eq!(parse_weight(RawValue::Float(0.25)), Some(0.25));
    }

    #[test]
    fn test_weight_no_value() {
        assert_eq!(parse_weight(RawValue::Absent), None);
        assert_eq!(parse_weight(RawValue::Text("—")), None);
        assert_eq!(parse_weight(RawValue::Text("heavy")), None);
        assert_eq!(parse_weight(RawValue::Boolean(true)), None);
    }

    #[test]
    fn test_weight_zero_denominator_falls_through() {
        // Falls through to the bare leading number.
        assert_eq!(parse_weight(RawValue::Text("1/0 lb.")), Some(1.0));
    }

    #[test]
    fn test_damage_from_text() {
        let damage = parse_damage(RawValue::Text("1d8 slashing"));
        assert_eq!(damage.dice.as_deref(), Some("1d8"));
        assert_eq!(damage.damage_type.as_deref(), Some("slashing"));

        let damage = parse_damage(RawValue::Text("2d6 + 1 fire"));
        assert_eq!(damage.dice.as_deref(), Some("2d6+1"));
        assert_eq!(damage.damage_type.as_deref(), Some("fire"));
    }

    #[test]
    fn test_damage_structured_and_unknown() {
        let damage = json!({"damage_dice": "1d6", "damage_type": "piercing"});
        let parsed = parse_damage(RawValue::from(&damage));
        assert_eq!(parsed.dice.as_deref(), Some("1d6"));
        assert_eq!(parsed.damage_type.as_deref(), Some("piercing"));

        assert!(parse_damage(RawValue::Text("sharp")).is_unknown());
        assert!(parse_damage(RawValue::Absent).is_unknown());
    }

    #[test]
    fn test_classes_list_shapes() {
        let objects = json!([{"name": "Wizard"}, {"name": "Sorcerer"}]);
        assert_eq!(
            parse_classes_list(RawValue::from(&objects)),
            vec!["Wizard", "Sorcerer"]
        );

        let strings = json!(["Cleric", "Druid"]);
        assert_eq!(
            parse_classes_list(RawValue::from(&strings)),
            vec!["Cleric", "Druid"]
        );

        assert_eq!(
            parse_classes_list(RawValue::Text("Bard, Warlock ,")),
            vec!["Bard", "Warlock"]
        );
        assert!(parse_classes_list(RawValue::Absent).is_empty());
    }

    #[test]
    fn test_hit_die() {
        assert_eq!(parse_hit_die(RawValue::Text("1d10")), 10);
        assert_eq!(parse_hit_die(RawValue::Text("12")), 12);
        assert_eq!(parse_hit_die(RawValue::Integer(6)), 6);
        assert_eq!(parse_hit_die(RawValue::Absent), DEFAULT_HIT_DIE);
        assert_eq!(parse_hit_die(RawValue::Text("big")), DEFAULT_HIT_DIE);
    }

    #[test]
    fn test_parse_text_shapes() {
        assert_eq!(parse_text(RawValue::Absent), "");
        assert_eq!(parse_text(RawValue::Integer(3)), "3");
        assert_eq!(parse_text(RawValue::Boolean(false)), "false");
        let list = json!(["a"]);
        assert_eq!(parse_text(RawValue::from(&list)), r#"["a"]"#);
    }
}
