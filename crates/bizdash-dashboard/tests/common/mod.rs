//! Shared helpers for the dashboard integration tests

#![allow(dead_code, clippy::unwrap_used)]

use bizdash_client::{ApiClient, CredentialStore};
use serde_json::{Value, json};
use std::sync::Once;
use std::time::Duration;
use wiremock::MockServer;

static INIT_LOGGER: Once = Once::new();

/// Initialize test logging (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    });
}

/// Delay long enough for a test to act while a request is in flight
pub const SLOW: Duration = Duration::from_millis(300);

/// Client against `server` holding `token`, if any
pub fn client(server: &MockServer, token: Option<&str>) -> ApiClient {
    let credentials = token.map_or_else(CredentialStore::new, CredentialStore::with_token);
    ApiClient::new(server.uri(), credentials).unwrap()
}

pub fn product(id: i64, title: &str, status: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "category": "Furniture",
        "mainImage": "uploads/main.jpg",
        "otherImages": "uploads/a.jpg,uploads/b.jpg",
        "status": status
    })
}

pub fn business(id: i64, name: &str, status: &str) -> Value {
    json!({
        "id": id,
        "businessName": name,
        "businessEmail": format!("{}@example.com", name.to_lowercase()),
        "status": status,
        "startDate": "2024-03-15T00:00:00Z"
    })
}

pub fn report(id: i64, review_id: i64, reason: &str) -> Value {
    json!({
        "id": id,
        "reviewId": review_id,
        "reason": reason,
        "createdAt": "2024-03-15T10:30:00Z",
        "Review": { "title": format!("Review {review_id}"), "rating": 2 },
        "User": { "name": "sam" }
    })
}

pub fn plan(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "features": ["Featured listing"],
        "priceWeekly": "5",
        "priceMonthly": 15.5,
        "priceYearly": 150,
        "isActive": true
    })
}
