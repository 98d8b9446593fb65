//! Shared helpers for the mock-server tests

#![allow(dead_code)]

use std::time::Duration;

use serde_json::{Value, json};
use skypanel_dns_provider::{InterServerProvider, RetryPolicy};
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-api-key-0001";

/// Assert that a `Result` is `Ok` and unwrap it (ending the test on failure).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Assert that a `Result` is `Err` and unwrap the error.
#[macro_export]
macro_rules! require_err {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_err(), "expected Err(..), got {res:?}");
        let Err(err) = res else {
            return;
        };
        err
    }};
}

/// Fast retries so rate-limit tests stay quick.
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_retries: 2,
        base_delay: Duration::from_millis(5),
        max_delay: Duration::from_millis(20),
        max_retry_after: Duration::from_millis(20),
    }
}

/// A provider pointed at the mock server.
pub fn provider_for(server: &MockServer) -> skypanel_dns_provider::Result<InterServerProvider> {
    InterServerProvider::builder(TEST_API_KEY.to_string())
        .base_url(server.uri())
        .retry_policy(fast_retry())
        .build()
}

pub fn zone_list() -> Value {
    json!([
        { "id": 101, "domain": "example.com", "status": "active" },
        { "id": "102", "domain": "example.org" }
    ])
}

/// The nine records a freshly provisioned `example.com` zone looks like after
/// the user added two of their own.
pub fn example_records() -> Value {
    json!([
        { "id": 1, "domain_id": 101, "name": "example.com", "type": "SOA",
          "content": "cdns1.interserver.net. dns.interserver.net. 2024010101 10800 3600 604800 3600",
          "ttl": 86400, "prio": 0, "disabled": 0 },
        { "id": 2, "domain_id": 101, "name": "example.com", "type": "NS",
          "content": "cdns1.interserver.net", "ttl": 86400, "prio": 0, "disabled": 0 },
        { "id": 3, "domain_id": 101, "name": "example.com", "type": "NS",
          "content": "cdns2.interserver.net", "ttl": 86400, "prio": 0, "disabled": 0 },
        { "id": 4, "domain_id": 101, "name": "example.com", "type": "A",
          "content": "192.0.2.1", "ttl": 86400, "prio": 0, "disabled": 0 },
        { "id": 5, "domain_id": 101, "name": "*.example.com", "type": "A",
          "content": "192.0.2.1", "ttl": 86400, "prio": 0, "disabled": 0 },
        { "id": 6, "domain_id": 101, "name": "localhost.example.com", "type": "A",
          "content": "127.0.0.1", "ttl": 86400, "prio": 0, "disabled": 0 },
        { "id": 7, "domain_id": 101, "name": "example.com", "type": "MX",
          "content": "mail.example.com", "ttl": 86400, "prio": 10, "disabled": 0 },
        { "id": 8, "domain_id": 101, "name": "www.example.com", "type": "A",
          "content": "192.0.2.10", "ttl": 3600, "prio": 0, "disabled": 0 },
        { "id": 9, "domain_id": 101, "name": "example.com", "type": "TXT",
          "content": "v=spf1 -all", "ttl": 3600, "prio": null, "disabled": "0" }
    ])
}
