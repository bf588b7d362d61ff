#![allow(unused_must_use)]
//! Tests for the month view endpoint.
//!
//! Verifies grid cells, lane packing, geometry and conditional requests.

use salvo::http::StatusCode;
use serde_json::Value;

use super::helpers::*;

fn segments_of(view: &Value, id: i64) -> Vec<&Value> {
    view["layout"]["segments"]
        .as_array()
        .map(|segments| {
            segments
                .iter()
                .filter(|segment| segment["key"] == id)
                .collect()
        })
        .unwrap_or_default()
}

/// ## Summary
/// Test the overlapping pair: the later event drops into the second lane.
#[test_log::test(tokio::test)]
async fn overlapping_events_stack_in_lanes() {
    let service = create_test_service();
    // 2024-01-01 is a Monday, so the grid starts on it.
    let a = seed_event(&service, "A", "Safety", "2024-01-01", "2024-01-03").await;
    let b = seed_event(&service, "B", "Safety", "2024-01-02", "2024-01-04").await;

    let view: Value = TestRequest::get(&calendar_path(2024, 1, "?cell_width=100&today=2024-01-02"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    let a = segments_of(&view, a);
    let b = segments_of(&view, b);
    assert_eq!(a.len(), 1);
    assert_eq!(b.len(), 1);
    assert_eq!(a[0]["lane"], 0);
    assert_eq!(b[0]["lane"], 1);
    assert_eq!(b[0]["startDay"], 1);
    assert_eq!(b[0]["span"], 3);

    // Two lanes fit in the minimum row height.
    let week = &view["layout"]["weeks"][0];
    assert_eq!(week["lanes"], 2);
    assert_eq!(week["height"], 112.0);

    // left = 1 * (100 + 4), width = 3 * 100 + 2 * 4, top = 32 + 25
    assert_eq!(b[0]["rect"]["left"], 104.0);
    assert_eq!(b[0]["rect"]["width"], 308.0);
    assert_eq!(b[0]["rect"]["top"], 57.0);
    assert_eq!(b[0]["rect"]["height"], 22.0);
}

/// ## Summary
/// Test that an event crossing a week boundary is split into one bar per row.
#[test_log::test(tokio::test)]
async fn multi_week_event_is_split() {
    let service = create_test_service();
    let id = seed_event(&service, "LONG", "Leadership", "2024-01-05", "2024-01-10").await;

    let view: Value = TestRequest::get(&calendar_path(2024, 1, "?cell_width=80"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    let parts: Vec<(i64, i64, i64)> = segments_of(&view, id)
        .iter()
        .map(|segment| {
            (
                segment["week"].as_i64().unwrap_or(-1),
                segment["startDay"].as_i64().unwrap_or(-1),
                segment["span"].as_i64().unwrap_or(-1),
            )
        })
        .collect();
    assert_eq!(parts, vec![(0, 4, 3), (1, 0, 3)]);
}

/// ## Summary
/// Test that the view carries padding days, today and grouped notes.
#[test_log::test(tokio::test)]
async fn month_view_cells_and_notes() {
    let service = create_test_service();
    seed_event(&service, "S1", "Safety", "2024-02-12", "2024-02-12").await;
    seed_event(&service, "L1", "Leadership", "2024-02-05", "2024-02-06").await;
    seed_event(&service, "S2", "Safety", "2024-02-01", "2024-02-01").await;

    let view: Value = TestRequest::get(&calendar_path(2024, 2, "?today=2024-02-14"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(view["title"], "February 2024");
    assert_eq!(view["daysOfWeek"][0], "Mon");

    let days = view["days"].as_array().cloned().unwrap_or_default();
    // 2024-02-01 is a Thursday: three days of January pad the first row.
    assert_eq!(days.len(), 35);
    assert_eq!(days[0]["date"], "2024-01-29");
    assert_eq!(days[0]["inCurrentMonth"], false);
    let today: Vec<&Value> = days.iter().filter(|day| day["isToday"] == true).collect();
    assert_eq!(today.len(), 1);
    assert_eq!(today[0]["date"], "2024-02-14");

    let categories: Vec<&str> = view["notes"]
        .as_array()
        .map(|groups| {
            groups
                .iter()
                .filter_map(|group| group["category"].as_str())
                .collect()
        })
        .unwrap_or_default();
    assert_eq!(categories, vec!["Safety", "Leadership"]);

    assert!(view["layout"].is_null());
}

/// ## Summary
/// Test that an unchanged view is answered with 304 and a change invalidates it.
#[test_log::test(tokio::test)]
async fn unchanged_view_is_not_modified() {
    let service = create_test_service();
    seed_event(&service, "A", "Safety", "2024-03-04", "2024-03-05").await;
    let url = calendar_path(2024, 3, "?cell_width=120&today=2024-03-01");

    let first = TestRequest::get(&url)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .assert_header_exists("ETag");
    let etag = first.get_etag().unwrap_or_default().to_string();

    TestRequest::get(&url)
        .if_none_match(&etag)
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_MODIFIED);

    seed_event(&service, "B", "Safety", "2024-03-04", "2024-03-05").await;

    TestRequest::get(&url)
        .if_none_match(&etag)
        .send(&service)
        .await
        .assert_status(StatusCode::OK);
}
