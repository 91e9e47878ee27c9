use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use govcon_admin::org::{BadgeColor, OrgClient};
use govcon_admin::preferences::Language;

fn depths_and_ids(view: &govcon_admin::org::TreeView) -> Vec<(String, usize)> {
    view.rows
        .iter()
        .map(|row| (row.id.to_string(), row.depth))
        .collect()
}

#[tokio::test]
async fn nested_tree_renders_pre_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/organization/tree"))
        .and(header("authorization", "Bearer admin-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "A", "level": "ministry", "name_th": "กระทรวง", "children": [
                {"id": "B", "level": "bureau", "name_th": "สำนัก", "children": []}
            ]}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = OrgClient::new(&server.uri(), Some("admin-token"), 5);
    let view = client.load_tree(Language::Th).await;

    assert!(view.warning.is_none());
    assert_eq!(
        depths_and_ids(&view),
        vec![("A".to_string(), 0), ("B".to_string(), 1)]
    );
    assert_eq!(view.rows[0].color, BadgeColor::Purple);
    assert_eq!(view.rows[1].color, BadgeColor::Green);
    assert_eq!(view.rows[1].indent, 20);
    server.verify().await;
}

#[tokio::test]
async fn wrapped_flat_list_is_nested_before_rendering() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/organization/tree"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                {"id": 3, "level": "division", "name_th": "กอง", "parent_id": 2, "user_count": 4},
                {"id": 1, "level": "ministry", "name_th": "กระทรวง", "parent_id": null},
                {"id": 2, "level": "department", "name_th": "กรม", "parent_id": 1}
            ]
        })))
        .mount(&server)
        .await;

    let client = OrgClient::new(&server.uri(), None, 5);
    let view = client.load_tree(Language::En).await;

    assert_eq!(
        depths_and_ids(&view),
        vec![
            ("1".to_string(), 0),
            ("2".to_string(), 1),
            ("3".to_string(), 2)
        ]
    );
    assert_eq!(view.rows[2].user_label, "4 users");
    assert!(view.rows[0].expandable);
    assert!(!view.rows[2].expandable);
}

#[tokio::test]
async fn failed_tree_request_yields_empty_view() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/organization/tree"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = OrgClient::new(&server.uri(), None, 5);
    let view = client.load_tree(Language::Th).await;

    assert!(view.is_empty());
    assert!(view.warning.unwrap().contains("503"));
}

#[tokio::test]
async fn flat_list_with_cycle_is_reported_not_rendered() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/organization/tree"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "X", "level": "bureau", "parent_id": "Y"},
            {"id": "Y", "level": "bureau", "parent_id": "X"}
        ])))
        .mount(&server)
        .await;

    let client = OrgClient::new(&server.uri(), None, 5);
    let view = client.load_tree(Language::Th).await;

    assert!(view.is_empty());
    assert!(view.warning.is_some());
}
