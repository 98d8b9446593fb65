//! Helpers shared by provider implementations

use std::time::Duration;

use reqwest::Client;

use crate::error::{ProviderError, Result};

// ============ HTTP Client ============

/// Connect timeout (seconds).
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Whole-request timeout (seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Build an HTTP client with the default timeouts.
pub fn create_http_client(provider: &str) -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .user_agent(concat!("skypanel-dns/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ProviderError::NetworkError {
            provider: provider.to_string(),
            detail: format!("Failed to build HTTP client: {e}"),
        })
}

// ============ Name handling ============

/// Strip one trailing dot.
pub fn normalize_domain_name(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

/// `"www"` + `"example.com"` -> `"www.example.com"`, `"@"` -> `"example.com"`.
///
/// Names that already end in the zone (with or without a trailing dot) are
/// returned normalized instead of being suffixed twice.
pub fn relative_to_full_name(name: &str, zone_name: &str) -> String {
    let zone = normalize_domain_name(zone_name);
    let name = normalize_domain_name(name.trim());

    if name.is_empty() || name == "@" || name == zone {
        zone.to_string()
    } else if name.ends_with(&format!(".{zone}")) {
        name.to_string()
    } else {
        format!("{name}.{zone}")
    }
}
