//! InterServer DNS Provider
//!
//! Talks to the `my.interserver.net` API v2 `/dns` endpoints with an
//! `X-API-KEY` header.

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::error::Result;
use crate::http_client::RetryPolicy;
use crate::providers::common::create_http_client;

pub(crate) use types::{InterServerZone, ListPayload, RecordBody, ZoneBody};

/// Production API base URL.
pub const INTERSERVER_API_BASE: &str = "https://my.interserver.net/apiv2";

const PROVIDER_NAME: &str = "interserver";

/// InterServer DNS Provider
pub struct InterServerProvider {
    pub(crate) client: Client,
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    pub(crate) retry: RetryPolicy,
}

impl std::fmt::Debug for InterServerProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterServerProvider")
            .field("api_key", &crate::utils::log_sanitizer::mask_secret(&self.api_key))
            .field("base_url", &self.base_url)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

/// InterServer Provider Builder
pub struct InterServerProviderBuilder {
    api_key: String,
    base_url: String,
    retry: RetryPolicy,
    client: Option<Client>,
}

impl InterServerProviderBuilder {
    fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: INTERSERVER_API_BASE.to_string(),
            retry: RetryPolicy::default(),
            client: None,
        }
    }

    /// Override the API base URL (staging, or a mock server in tests).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn max_retries(mut self, retries: u32) -> Self {
        self.retry.max_retries = retries;
        self
    }

    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    /// Use a preconfigured HTTP client instead of the default one.
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> Result<InterServerProvider> {
        let client = match self.client {
            Some(client) => client,
            None => create_http_client(PROVIDER_NAME)?,
        };
        log::debug!(
            "[{PROVIDER_NAME}] provider configured: base_url={}, key={}",
            self.base_url,
            crate::utils::log_sanitizer::mask_secret(&self.api_key)
        );
        Ok(InterServerProvider {
            client,
            api_key: self.api_key,
            base_url: self.base_url,
            retry: self.retry,
        })
    }
}

impl InterServerProvider {
    pub fn new(api_key: String) -> Result<Self> {
        Self::builder(api_key).build()
    }

    pub fn builder(api_key: String) -> InterServerProviderBuilder {
        InterServerProviderBuilder::new(api_key)
    }
}
