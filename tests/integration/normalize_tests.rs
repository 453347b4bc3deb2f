//! Normalization behavior on realistic Open5e records

use open5e_harvest::collection::{process, process_equipment};
use open5e_harvest::normalize::{
    normalize, normalize_class, normalize_equipment, normalize_race, ItemKind,
};
use open5e_harvest::output::{CharacterReport, EquipmentReport};
use open5e_harvest::records::{AbilityBonus, CanonicalRecord, Equipment, EquipmentKind};
use open5e_harvest::{Collection, RawRecord};
use serde_json::{json, Value};

fn raw(value: Value) -> RawRecord {
    RawRecord::from_json(value).expect("object record")
}

#[test]
fn test_race_with_free_text_asi_and_speed() {
    let race = normalize_race(&raw(json!({
        "slug": "half-elf",
        "name": "Half-Elf",
        "asi": "Your Charisma score increases by 2. Dex +1, Con +1",
        "speed": "Your base walking speed is 30 feet.",
        "document__slug": "wotc-srd"
    })));

    assert_eq!(
        race.asi,
        vec![
            AbilityBonus::single("dexterity", 1),
            AbilityBonus::single("constitution", 1),
        ]
    );
    assert_eq!(race.speed.get("walk"), Some(&30));
}

#[test]
fn test_race_with_malformed_fields_uses_defaults() {
    let race = normalize_race(&raw(json!({
        "name": "Oddity",
        "asi": 17,
        "speed": "fast",
        "subraces": null
    })));

    assert!(race.asi.is_empty());
    assert_eq!(race.speed.get("walk"), Some(&30));
    assert!(race.subraces.is_empty());
}

#[test]
fn test_class_row_shape() {
    let class = normalize_class(&raw(json!({"name": "Fighter", "hit_die": 10})));
    let row = class.to_row();

    assert_eq!(row.len(), open5e_harvest::CharacterClass::COLUMNS.len());
    assert_eq!(class.hit_die, 10);
}

#[test]
fn test_equipment_cost_and_weight_edge_cases() {
    let cases = [
        (json!({"name": "Plate", "cost": "1,500 gp", "weight": "65 lb."}), Some(1500), Some(65.0)),
        (json!({"name": "Arrow", "cost": "1 gp", "weight": "1/2 lb."}), Some(1), Some(0.5)),
        (json!({"name": "Net", "cost": "—", "weight": "—"}), None, None),
        (json!({"name": "Rope"}), None, None),
    ];

    for (value, quantity, weight) in cases {
        let item = normalize_equipment(&raw(value), EquipmentKind::Weapon);
        assert_eq!(item.cost_quantity, quantity, "cost for {}", item.name);
        assert_eq!(item.weight, weight, "weight for {}", item.name);
    }
}

#[test]
fn test_shield_reclassified() {
    let item = normalize_equipment(
        &raw(json!({"name": "Shield", "category": "armor", "desc": "AC 2"})),
        EquipmentKind::Armor,
    );

    assert_eq!(item.item_type, "shield");
    assert_eq!(item.category, "shield");
    assert_eq!(item.ac, Some(2));
    assert_eq!(item.ac_base, Some(2));
}

#[test]
fn test_armor_from_ac_string() {
    let item = normalize_equipment(
        &raw(json!({
            "name": "Scale Mail",
            "category": "Medium Armor",
            "ac_string": "14 + Dex modifier (max 2)",
            "stealth_disadvantage": true
        })),
        EquipmentKind::Armor,
    );

    assert_eq!(item.item_type, "armor");
    assert_eq!(item.category, "Medium Armor");
    assert_eq!(item.ac_base, Some(14));
    assert_eq!(item.ac_add_dex, Some(true));
    assert_eq!(item.ac_cap_dex, Some(2));
}

#[test]
fn test_magic_item_rarity_and_attunement() {
    let item = normalize_equipment(
        &raw(json!({
            "name": "Cloak of Protection",
            "rarity": "uncommon",
            "requires_attunement": "requires attunement",
            "desc": "You gain a +1 bonus to AC and saving throws while you wear this cloak."
        })),
        EquipmentKind::MagicItem,
    );

    assert_eq!(item.item_type, "magic-item");
    assert_eq!(item.rarity, "uncommon");
    assert!(item.requires_attunement);
    // Armor class scanning only applies to armor
    assert_eq!(item.ac, None);

    let plain = normalize_equipment(&raw(json!({"name": "Torch", "rarity": "none"})), EquipmentKind::MagicItem);
    assert_eq!(plain.rarity, "common");
    assert!(!plain.requires_attunement);
}

#[test]
fn test_dedup_across_processing() {
    let raws: Vec<RawRecord> = [json!({"name": "Elf"}), json!({"name": "ELF"}), json!({"name": "elf "})]
        .into_iter()
        .map(raw)
        .collect();

    let races = process(&raws, normalize_race);

    // Trailing whitespace makes a distinct name
    let names: Vec<_> = races.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Elf", "elf "]);
}

#[test]
fn test_normalize_twice_is_identical() {
    let record = raw(json!({
        "name": "Dwarf",
        "asi": "Con +2",
        "desc": "The hill dwarf and the mountain dwarf."
    }));

    assert_eq!(normalize(&record, ItemKind::Race), normalize(&record, ItemKind::Race));
}

#[test]
fn test_reports_over_processed_collections() {
    let equipment: Collection<Equipment> = process_equipment(&[
        (EquipmentKind::Weapon, vec![raw(json!({"name": "Dagger", "damage": {"dice": "1d4", "type": "piercing"}}))]),
        (EquipmentKind::Armor, vec![raw(json!({"name": "Leather", "base_ac": 11}))]),
    ]);

    let report = EquipmentReport::generate(&equipment);
    assert_eq!(report.total_items, 2);
    assert_eq!(report.damage_samples, vec!["Dagger: 1d4 piercing damage"]);
    assert_eq!(report.ac_samples, vec!["Leather: AC 11, Type: armor"]);

    let empty = CharacterReport::generate(&Collection::new(), &Collection::new(), &Collection::new());
    assert_eq!(empty.total_races + empty.total_classes + empty.total_backgrounds, 0);
}
