//! End-to-end harvest tests against a mock API

use open5e_harvest::config::{ApiConfig, Config, EndpointsConfig, OutputConfig, UserAgentConfig};
use open5e_harvest::harvest::{
    run_harvest, Dataset, HarvestOptions, Harvester, BACKGROUNDS_FILE, CLASSES_FILE,
    EQUIPMENT_FILE, RACES_FILE,
};
use serde_json::{json, Value};
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, output_dir: &Path, summary: bool) -> Config {
    Config {
        api: ApiConfig {
            base_url: base_url.to_string(),
            page_limit: 1000,
            request_delay_ms: 0,
            timeout_secs: 5,
        },
        user_agent: UserAgentConfig {
            name: "TestBot".to_string(),
            version: "1.0.0".to_string(),
            contact: None,
        },
        endpoints: EndpointsConfig::default(),
        output: OutputConfig {
            directory: output_dir.display().to_string(),
            summary_path: summary.then(|| output_dir.join("summary.md").display().to_string()),
        },
    }
}

/// Mounts a single-page endpoint returning the given results
async fn mount_endpoint(server: &MockServer, endpoint: &str, results: Value) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": results.as_array().map(|a| a.len()).unwrap_or(0),
            "next": null,
            "previous": null,
            "results": results
        })))
        .mount(server)
        .await;
}

async fn mount_character_endpoints(server: &MockServer) {
    mount_endpoint(
        server,
        "/races",
        json!([
            {"slug": "elf", "name": "Elf", "asi": "Dex +2", "speed": {"walk": 30}, "document__slug": "wotc-srd"},
            {"slug": "elf-2", "name": "ELF", "asi": "Int +1"},
            {"slug": "dwarf", "name": "Dwarf", "asi": [{"attributes": ["Constitution"], "value": 2}],
             "desc": "The hill dwarf is wise.", "document__slug": "wotc-srd"}
        ]),
    )
    .await;
    mount_endpoint(
        server,
        "/classes",
        json!([{"slug": "wizard", "name": "Wizard", "hit_die": "1d6", "spellcasting_ability": "Intelligence"}]),
    )
    .await;
    mount_endpoint(server, "/backgrounds", json!([])).await;
}

async fn mount_equipment_endpoints(server: &MockServer) {
    mount_endpoint(
        server,
        "/magicitems",
        json!([{"slug": "bag-of-holding", "name": "Bag of Holding", "type": "Wondrous item",
                "rarity": "uncommon", "desc": "This bag has an interior space."}]),
    )
    .await;
    mount_endpoint(
        server,
        "/weapons",
        json!([{"slug": "longsword", "name": "Longsword", "cost": "15 gp", "weight": "3 lb.",
                "damage_dice": "1d8", "damage_type": "slashing", "properties": ["versatile (1d10)"]}]),
    )
    .await;
    mount_endpoint(
        server,
        "/armor",
        json!([
            {"slug": "shield", "name": "Shield", "category": "Shield", "base_ac": 2, "cost": "10 gp"},
            {"slug": "longsword-dup", "name": "longsword"}
        ]),
    )
    .await;
}

fn read_csv(path: &Path) -> (csv::StringRecord, Vec<csv::StringRecord>) {
    let mut reader = csv::Reader::from_path(path).expect("csv file opens");
    let headers = reader.headers().expect("header row").clone();
    let rows = reader.records().map(|r| r.expect("valid row")).collect();
    (headers, rows)
}

fn column<'a>(headers: &csv::StringRecord, row: &'a csv::StringRecord, name: &str) -> &'a str {
    let index = headers
        .iter()
        .position(|h| h == name)
        .unwrap_or_else(|| panic!("missing column {}", name));
    row.get(index).unwrap_or_default()
}

#[tokio::test]
async fn test_full_harvest_writes_csv_and_summary() {
    let mock_server = MockServer::start().await;
    mount_character_endpoints(&mock_server).await;
    mount_equipment_endpoints(&mock_server).await;

    let output = tempfile::tempdir().unwrap();
    let config = create_test_config(&mock_server.uri(), output.path(), true);

    let summary = run_harvest(config, "hash123".to_string(), HarvestOptions::default())
        .await
        .expect("harvest succeeds");

    // Dedup: one race and one weapon dropped
    assert_eq!(summary.raw_records, 8);
    assert_eq!(summary.duplicates_skipped, 2);
    assert_eq!(summary.total_records(), 6);

    // No backgrounds, so no backgrounds file
    assert!(output.path().join(RACES_FILE).exists());
    assert!(output.path().join(CLASSES_FILE).exists());
    assert!(!output.path().join(BACKGROUNDS_FILE).exists());
    assert!(output.path().join(EQUIPMENT_FILE).exists());
    assert_eq!(summary.exported.len(), 3);

    let (headers, rows) = read_csv(&output.path().join(RACES_FILE));
    assert_eq!(rows.len(), 2);
    assert_eq!(column(&headers, &rows[0], "name"), "Elf");
    assert_eq!(
        column(&headers, &rows[0], "asi"),
        r#"[{"attributes":["dexterity"],"value":2}]"#
    );
    assert_eq!(column(&headers, &rows[1], "subraces"), r#"[{"name":"Hill","slug":"hill"}]"#);

    let (headers, rows) = read_csv(&output.path().join(CLASSES_FILE));
    assert_eq!(column(&headers, &rows[0], "hit_die"), "6");

    let (headers, rows) = read_csv(&output.path().join(EQUIPMENT_FILE));
    let names: Vec<_> = rows.iter().map(|r| column(&headers, r, "name")).collect();
    assert_eq!(names, vec!["Bag of Holding", "Longsword", "Shield"]);

    let longsword = &rows[1];
    assert_eq!(column(&headers, longsword, "type"), "weapon");
    assert_eq!(column(&headers, longsword, "cost_quantity"), "15");
    assert_eq!(column(&headers, longsword, "cost_unit"), "gp");
    assert_eq!(column(&headers, longsword, "weight"), "3.0");
    assert_eq!(column(&headers, longsword, "damage_dice"), "1d8");
    assert_eq!(column(&headers, longsword, "damage_type"), "slashing");

    let shield = &rows[2];
    assert_eq!(column(&headers, shield, "type"), "shield");
    assert_eq!(column(&headers, shield, "ac_base"), "2");

    let markdown = std::fs::read_to_string(output.path().join("summary.md")).unwrap();
    assert!(markdown.contains("hash123"));
    assert!(markdown.contains("## Character Data"));
    assert!(markdown.contains("## Equipment Data"));
}

#[tokio::test]
async fn test_characters_only_without_export() {
    let mock_server = MockServer::start().await;
    mount_character_endpoints(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/weapons"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let output = tempfile::tempdir().unwrap();
    let config = create_test_config(&mock_server.uri(), output.path(), true);
    let harvester = Harvester::new(config, "hash".to_string()).unwrap();

    let summary = harvester
        .run(HarvestOptions {
            dataset: Dataset::Characters,
            export: false,
        })
        .await
        .unwrap();

    assert!(summary.character.is_some());
    assert!(summary.equipment.is_none());
    assert!(summary.exported.is_empty());
    assert!(!output.path().join(RACES_FILE).exists());
    assert!(!output.path().join("summary.md").exists());
}

#[tokio::test]
async fn test_unreachable_endpoint_yields_empty_dataset() {
    let mock_server = MockServer::start().await;
    mount_equipment_endpoints(&mock_server).await;

    let output = tempfile::tempdir().unwrap();
    let config = create_test_config(&mock_server.uri(), output.path(), false);
    let harvester = Harvester::new(config, "hash".to_string()).unwrap();

    // Character endpoints are not mounted, so every request gets a 404
    let data = harvester.harvest_characters().await.unwrap();

    assert!(data.races.is_empty());
    assert!(data.classes.is_empty());
    assert_eq!(data.raw_records, 0);
}
