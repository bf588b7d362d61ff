#![allow(clippy::unused_async, clippy::expect_used, dead_code)]
//! Test helpers for integration tests.
//!
//! Provides utilities for:
//! - Creating a Salvo service wired like `main.rs`
//! - Making HTTP requests
//! - Asserting on responses
//!
//! ## Isolation
//! Every service owns a fresh in-memory event table, so tests run in parallel
//! without sharing state.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use salvo::http::header::HeaderName;
use salvo::http::{Method, ReqBody, StatusCode};
use salvo::prelude::*;
use salvo::test::{RequestBuilder, ResponseExt, TestClient};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use trainsched_test::component::calendar::CalendarService;
use trainsched_test::component::config::{ConfigHandler, Settings};
use trainsched_test::component::constants::{
    APP_ROUTE_PREFIX, CALENDAR_ROUTE_PREFIX, EVENTS_ROUTE_PREFIX,
};
use trainsched_test::component::memory::InMemoryEventRepository;
use trainsched_test::component::service_handler::CalendarServiceHandler;

/// Test configuration - built from defaults instead of loading from file.
fn test_config() -> Settings {
    Settings::builder()
        .expect("Defaults should be valid")
        .build()
        .expect("Config should build")
        .try_deserialize()
        .expect("Defaults should deserialize")
}

/// ## Summary
/// Builds a service around `calendar` with the same hoops as the server binary.
fn build_service(calendar: CalendarService) -> Service {
    let router = Router::new()
        .hoop(ConfigHandler {
            settings: test_config(),
        })
        .hoop(CalendarServiceHandler { service: calendar })
        .push(trainsched_test::app::api::routes().expect("API routes should be valid"));

    Service::new(router)
}

/// Creates a service with an empty in-memory event table.
#[must_use]
pub fn create_test_service() -> Service {
    build_service(CalendarService::new(Arc::new(InMemoryEventRepository::new())))
}

/// ## Summary
/// Creates a service whose event table is mirrored to `path`.
///
/// ## Panics
/// Panics if the snapshot file exists but cannot be loaded.
pub async fn create_snapshot_test_service(path: &Path) -> Service {
    let repo = InMemoryEventRepository::open(path)
        .await
        .expect("Snapshot should open");
    build_service(CalendarService::new(Arc::new(repo)))
}

/// Unique snapshot path in the temp directory.
#[must_use]
pub fn temp_snapshot_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "trainsched-it-{name}-{}-{}.json",
        std::process::id(),
        chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
    ))
}

/// ## Summary
/// JSON body of a valid event form.
#[must_use]
pub fn event_body(short_name: &str, category: &str, start: &str, end: &str) -> Value {
    json!({
        "fullName": format!("{short_name} training"),
        "shortName": short_name,
        "trainer": "A. Kowalski",
        "category": category,
        "startDate": start,
        "endDate": end,
    })
}

/// ## Summary
/// Creates an event through the API and returns its id.
///
/// ## Panics
/// Panics if the event is not created.
pub async fn seed_event(
    service: &Service,
    short_name: &str,
    category: &str,
    start: &str,
    end: &str,
) -> i64 {
    let created: Value = TestRequest::post(&events_path(""))
        .json_body(&event_body(short_name, category, start, end))
        .send(service)
        .await
        .assert_status(StatusCode::CREATED)
        .json();

    created["id"].as_i64().expect("Created event should have an id")
}

// Path helpers
// These build request paths from the route constants so tests follow the router.

/// Path under the events route, e.g. `events_path("/3")` or `events_path("?year=2024&month=5")`.
#[must_use]
pub fn events_path(rest: &str) -> String {
    format!("{EVENTS_ROUTE_PREFIX}{rest}")
}

/// Month view path for `year`/`month` followed by `query` (empty or starting with `?`).
#[must_use]
pub fn calendar_path(year: i32, month: u32, query: &str) -> String {
    format!("{CALENDAR_ROUTE_PREFIX}/{year}/{month}{query}")
}

#[must_use]
pub fn healthcheck_path() -> String {
    format!("{APP_ROUTE_PREFIX}/healthcheck")
}

/// Test request builder for constructing HTTP requests.
pub struct TestRequest {
    method: Method,
    path: String,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl TestRequest {
    /// Creates a new test request with the given method and path.
    #[must_use]
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Creates a new GET request.
    #[must_use]
    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    /// Creates a new POST request.
    #[must_use]
    pub fn post(path: &str) -> Self {
        Self::new(Method::POST, path)
    }

    /// Creates a new PUT request.
    #[must_use]
    pub fn put(path: &str) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Creates a new DELETE request.
    #[must_use]
    pub fn delete(path: &str) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Adds a header to the request.
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Sets the If-None-Match header.
    #[must_use]
    pub fn if_none_match(self, etag: &str) -> Self {
        self.header("If-None-Match", etag)
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets a JSON request body.
    #[must_use]
    pub fn json_body(self, value: &Value) -> Self {
        self.header("Content-Type", "application/json; charset=utf-8")
            .body(value.to_string().into_bytes())
    }

    /// Sends the request to the test service and returns the response.
    pub async fn send(self, service: &Service) -> TestResponse {
        let url = format!("http://127.0.0.1:5800{}", self.path);

        let mut client = match self.method.as_str() {
            "GET" => TestClient::get(&url),
            "POST" => TestClient::post(&url),
            "PUT" => TestClient::put(&url),
            "DELETE" => TestClient::delete(&url),
            _ => RequestBuilder::new(&url, self.method.clone()),
        };

        for (name, value) in self.headers {
            if let Ok(header_name) = HeaderName::try_from(name.as_str()) {
                client = client.add_header(header_name, value, true);
            }
        }

        if let Some(body_bytes) = self.body {
            client = client.body(ReqBody::Once(body_bytes.into()));
        }

        let mut response = client.send(service).await;

        let status = response
            .status_code
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();

        let body: Vec<u8> = response.take_bytes(None).await.unwrap_or_default().to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Represents an HTTP test response for assertions.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Asserts that the response status matches the expected code.
    #[must_use]
    pub fn assert_status(self, expected: StatusCode) -> Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {expected} but got {}: {}",
            self.status,
            self.body_string()
        );
        self
    }

    /// Asserts that a header exists (regardless of value).
    #[must_use]
    pub fn assert_header_exists(self, name: &str) -> Self {
        assert!(
            self.get_header(name).is_some(),
            "Header '{name}' not found in response"
        );
        self
    }

    /// Asserts that the response body contains the expected substring.
    #[must_use]
    pub fn assert_body_contains(self, expected: &str) -> Self {
        let body = String::from_utf8_lossy(&self.body);
        assert!(
            body.contains(expected),
            "Expected body to contain '{expected}' but got:\n{body}"
        );
        self
    }

    /// Asserts that the response body is empty.
    #[must_use]
    pub fn assert_body_empty(self) -> Self {
        assert!(
            self.body.is_empty(),
            "Expected empty body but got {} bytes",
            self.body.len()
        );
        self
    }

    /// Returns the body as a UTF-8 string.
    #[must_use]
    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parses the body as JSON.
    ///
    /// ## Panics
    /// Panics if the body is not valid JSON for `T`.
    #[must_use]
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Response body should be valid JSON")
    }

    /// Gets a header value by name (case-insensitive).
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Gets the ETag header value.
    #[must_use]
    pub fn get_etag(&self) -> Option<&str> {
        self.get_header("ETag")
    }
}
