use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use govcon_admin::org::{OrgClient, OrgStats};

#[tokio::test]
async fn all_sections_load_together() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/organization/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"total_units": 12, "total_users": 340, "total_positions": 25}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/organization/tree"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "A", "level": "ministry", "children": []}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/organization/positions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name_th": "ผู้อำนวยการ", "name_en": "Director", "level": "executive"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = OrgClient::new(&server.uri(), None, 5);
    let overview = client.load_overview().await;

    assert_eq!(
        overview.stats.loaded(),
        Some(&OrgStats {
            total_units: 12,
            total_users: 340,
            total_positions: 25
        })
    );
    assert_eq!(overview.tree.loaded().map(Vec::len), Some(1));
    assert_eq!(overview.positions.loaded().map(Vec::len), Some(1));
    assert!(overview.warnings().is_empty());
    server.verify().await;
}

#[tokio::test]
async fn one_failing_section_leaves_the_others_intact() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/organization/stats"))
        .respond_with(ResponseTemplate::new(500).set_body_string("stats backend down"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/organization/tree"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "A", "level": "ministry", "user_count": 5, "children": [
                {"id": "B", "level": "bureau", "user_count": 2}
            ]}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/organization/positions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let client = OrgClient::new(&server.uri(), None, 5);
    let overview = client.load_overview().await;

    assert!(!overview.stats.is_loaded());
    assert!(overview.tree.is_loaded());
    assert!(overview.positions.is_loaded());

    let warnings = overview.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("stats backend down"), "{}", warnings[0]);

    let stats = overview.effective_stats().unwrap();
    assert_eq!(stats.total_units, 2);
    assert_eq!(stats.total_users, 7);
    assert_eq!(stats.total_positions, 0);
}

#[tokio::test]
async fn everything_down_still_returns_an_overview() {
    let client = OrgClient::new("http://127.0.0.1:1", None, 2);
    let overview = client.load_overview().await;

    assert_eq!(overview.warnings().len(), 3);
    assert!(overview.effective_stats().is_none());
}
