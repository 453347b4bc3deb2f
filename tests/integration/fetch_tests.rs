//! Pagination tests against a mock API

use open5e_harvest::config::{ApiConfig, UserAgentConfig};
use open5e_harvest::fetch::{build_http_client, endpoint_url, fetch_all_pages, fetch_page};
use open5e_harvest::HarvestError;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client() -> reqwest::Client {
    let api = ApiConfig {
        base_url: "http://localhost".to_string(),
        page_limit: 1000,
        request_delay_ms: 0,
        timeout_secs: 5,
    };
    let user_agent = UserAgentConfig {
        name: "TestBot".to_string(),
        version: "1.0.0".to_string(),
        contact: Some("test@example.com".to_string()),
    };
    build_http_client(&api, &user_agent).expect("client builds")
}

#[tokio::test]
async fn test_follows_next_across_pages() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/races"))
        .and(query_param("limit", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 3,
            "next": format!("{}/races?page=2", base_url),
            "previous": null,
            "results": [{"name": "Elf"}, {"name": "Dwarf"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/races"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 3,
            "next": null,
            "previous": format!("{}/races?limit=1000", base_url),
            "results": [{"name": "Gnome"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = endpoint_url(&base_url, "/races", 1000).unwrap();
    let records = fetch_all_pages(&test_client(), &url, Duration::from_millis(10)).await;

    let names: Vec<_> = records
        .iter()
        .map(|r| r.get("name").as_text().unwrap_or_default().to_string())
        .collect();
    assert_eq!(names, vec!["Elf", "Dwarf", "Gnome"]);
}

#[tokio::test]
async fn test_server_error_returns_partial_results() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/weapons"))
        .and(query_param("limit", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "next": format!("{}/weapons?page=2", base_url),
            "results": [{"name": "Club"}]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/weapons"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let url = endpoint_url(&base_url, "/weapons", 1000).unwrap();
    let records = fetch_all_pages(&test_client(), &url, Duration::ZERO).await;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("name").as_text(), Some("Club"));
}

#[tokio::test]
async fn test_non_object_results_are_skipped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/armor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "next": null,
            "results": [{"name": "Leather"}, "stray", 42, null, {"name": "Chain Mail"}]
        })))
        .mount(&mock_server)
        .await;

    let url = endpoint_url(&mock_server.uri(), "/armor", 1000).unwrap();
    let records = fetch_all_pages(&test_client(), &url, Duration::ZERO).await;

    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn test_pagination_loop_stops() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/classes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "next": format!("{}/classes?limit=1000", base_url),
            "results": [{"name": "Wizard"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = endpoint_url(&base_url, "/classes", 1000).unwrap();
    let records = fetch_all_pages(&test_client(), &url, Duration::ZERO).await;

    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn test_fetch_page_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/garbage"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&mock_server)
        .await;

    let client = test_client();

    let missing = fetch_page(&client, &format!("{}/missing", mock_server.uri())).await;
    assert!(matches!(missing, Err(HarvestError::Status { status: 404, .. })));

    let garbage = fetch_page(&client, &format!("{}/garbage", mock_server.uri())).await;
    assert!(matches!(garbage, Err(HarvestError::MalformedPage { .. })));
}
