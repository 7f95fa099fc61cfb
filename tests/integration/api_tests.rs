//! API integration tests
//!
//! These run against a live server with a migrated database:
//! cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Unique asset id per test run so reruns do not collide
fn unique_asset_id(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4().simple())
}

async fn create_equipment(client: &Client, asset_id: &str, name: &str) -> Value {
    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .json(&json!({
            "asset_id": asset_id,
            "name": name,
            "category": "Power Tools",
            "condition": "Good"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "gearlog-server");
}

#[tokio::test]
#[ignore]
async fn test_readiness_pings_the_database() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
    assert_eq!(body["service"], "gearlog-server");
}

#[tokio::test]
#[ignore]
async fn test_create_and_get_equipment() {
    let client = Client::new();
    let asset_id = unique_asset_id("IT");

    let created = create_equipment(&client, &asset_id, "Hammer Drill").await;
    assert_eq!(created["asset_id"], asset_id.as_str());
    assert_eq!(created["derived_status"], "Available");
    assert_eq!(created["derived_tag"], "No Tag");

    let id = created["id"].as_str().expect("No id in response");
    let response = client
        .get(format!("{}/equipment/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["name"], "Hammer Drill");
}

#[tokio::test]
#[ignore]
async fn test_duplicate_asset_id_conflicts() {
    let client = Client::new();
    let asset_id = unique_asset_id("IT");

    create_equipment(&client, &asset_id, "Angle Grinder").await;

    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .json(&json!({
            "asset_id": asset_id,
            "name": "Angle Grinder Again"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_get_unknown_equipment_is_404() {
    let client = Client::new();

    let response = client
        .get(format!(
            "{}/equipment/{}",
            BASE_URL,
            uuid::Uuid::new_v4()
        ))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["code"].is_number());
    assert!(body["message"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_movement_round_trip() {
    let client = Client::new();
    let asset_id = unique_asset_id("IT");

    let created = create_equipment(&client, &asset_id, "Circular Saw").await;
    let id = created["id"].as_str().expect("No id in response");

    // Check-out without a site is rejected and leaves the item untouched
    let response = client
        .post(format!("{}/movements", BASE_URL))
        .json(&json!({
            "equipment_id": id,
            "event_type": "check_out",
            "assigned_to": "Sam Kerr",
            "created_by": "ops@example.com"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let response = client
        .get(format!("{}/equipment/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["derived_status"], "Available");

    // Valid check-out
    let response = client
        .post(format!("{}/movements", BASE_URL))
        .json(&json!({
            "equipment_id": id,
            "event_type": "check_out",
            "assigned_to": "Sam Kerr",
            "site": "North Yard",
            "job_reference": "JOB-118",
            "created_by": "ops@example.com"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .get(format!("{}/equipment/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["derived_status"], "In Use");
    assert_eq!(body["assigned_to"], "Sam Kerr");

    // Return with a repair flag routes the item to Repair
    let response = client
        .post(format!("{}/movements", BASE_URL))
        .json(&json!({
            "equipment_id": id,
            "event_type": "return",
            "requires_repair": true,
            "issue_description": "Blade guard cracked",
            "created_by": "ops@example.com"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .get(format!("{}/equipment/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["derived_status"], "Repair");
    assert_eq!(body["assigned_to"], "");

    // Both movements show in the item's history, newest first
    let response = client
        .get(format!("{}/equipment/{}/movements", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let history: Value = response.json().await.expect("Failed to parse response");
    let history = history.as_array().expect("Expected an array");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["event_type"], "return");
    assert_eq!(history[1]["event_type"], "check_out");
}

#[tokio::test]
#[ignore]
async fn test_list_filters_by_bucket_and_query() {
    let client = Client::new();
    let asset_id = unique_asset_id("IT");

    create_equipment(&client, &asset_id, "Plasma Cutter").await;

    let response = client
        .get(format!(
            "{}/equipment?bucket=Available&q={}",
            BASE_URL, asset_id
        ))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let items = body.as_array().expect("Expected an array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["asset_id"], asset_id.as_str());
}

#[tokio::test]
#[ignore]
async fn test_stats_shape() {
    let client = Client::new();

    let response = client
        .get(format!("{}/stats", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");

    let total = body["total"].as_i64().expect("total missing");
    let sum = body["available"].as_i64().unwrap()
        + body["in_use"].as_i64().unwrap()
        + body["overdue"].as_i64().unwrap()
        + body["repair"].as_i64().unwrap();
    assert_eq!(sum, total);
    assert!(body["expired_tags"].is_number());
    assert!(body["due_soon"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_csv_import_report() {
    let client = Client::new();
    let first = unique_asset_id("CSV");
    let second = unique_asset_id("CSV");

    let csv = format!(
        "asset_id,name,category,next_test\n{},Impact Driver,Power Tools,2030-01-01\n{},Step Ladder,Access,\n,Missing Id,,\n",
        first, second
    );

    let response = client
        .post(format!("{}/equipment/import", BASE_URL))
        .header("content-type", "text/csv")
        .body(csv)
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let report: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(report["total_rows"], 3);
    assert_eq!(report["created"], 2);
    assert_eq!(report["skipped"], 1);

    let rows = report["rows"].as_array().expect("Expected rows");
    assert_eq!(rows[2]["action"], "skipped");
}
