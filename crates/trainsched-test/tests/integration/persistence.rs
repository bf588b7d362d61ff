#![allow(unused_must_use)]
//! Tests for the JSON snapshot behind the event table.

use salvo::http::StatusCode;
use serde_json::Value;

use super::helpers::*;

/// ## Summary
/// Test that events written by one server are served by the next.
#[test_log::test(tokio::test)]
async fn snapshot_survives_restart() {
    let path = temp_snapshot_path("restart");

    {
        let service = create_snapshot_test_service(&path).await;
        seed_event(&service, "KEEP", "Ops", "2024-05-06", "2024-05-07").await;
        let dropped = seed_event(&service, "DROP", "Ops", "2024-05-08", "2024-05-08").await;
        TestRequest::delete(&events_path(&format!("/{dropped}")))
            .send(&service)
            .await
            .assert_status(StatusCode::NO_CONTENT);
    }

    let service = create_snapshot_test_service(&path).await;
    let listed: Vec<Value> = TestRequest::get(&events_path("?year=2024&month=5"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["shortName"], "KEEP");

    tokio::fs::remove_file(&path)
        .await
        .expect("Snapshot should be removable");
}
