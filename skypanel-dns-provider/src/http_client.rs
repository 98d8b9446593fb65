//! Shared HTTP request handling
//!
//! Sending, status triage, body logging and retry with backoff live here so the
//! provider modules only build requests and interpret successful bodies.

use std::time::Duration;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

/// Retry behavior for transient failures.
///
/// Delay for attempt `n` (0-based) is `base_delay * 2^n`, capped at
/// `max_delay`. A `Retry-After` hint wins over the backoff, capped at
/// `max_retry_after`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt; 0 disables retrying.
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub max_retry_after: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
            max_retry_after: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// No retries at all.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1_u32.checked_shl(attempt.min(20)).unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(factor)
            .map_or(self.max_delay, |d| d.min(self.max_delay))
    }

    fn delay_for(&self, error: &ProviderError, attempt: u32) -> Duration {
        match error {
            ProviderError::RateLimited {
                retry_after: Some(secs),
                ..
            } => Duration::from_secs(*secs).min(self.max_retry_after),
            _ => self.backoff(attempt),
        }
    }
}

/// Status code plus body text of a completed exchange.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Whether `error` allows resending the request.
fn should_retry(error: &ProviderError, idempotent: bool) -> bool {
    match error {
        ProviderError::RateLimited { .. } => true,
        e => idempotent && e.is_retryable(),
    }
}

/// HTTP helper functions.
pub struct HttpUtils;

impl HttpUtils {
    /// Send one request.
    ///
    /// Transport failures become `Timeout`/`NetworkError`, HTTP 429 becomes
    /// `RateLimited` and 502-504 become `NetworkError`. Every other status is
    /// returned to the caller for provider-specific mapping.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        label: &str,
    ) -> Result<HttpResponse, ProviderError> {
        log::debug!("[{provider_name}] {label}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ProviderError::NetworkError {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        log::debug!("[{provider_name}] {label} -> HTTP {status}");

        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        match status {
            429 => {
                log::warn!("[{provider_name}] Rate limited (HTTP 429), retry_after={retry_after:?}");
                Err(ProviderError::RateLimited {
                    provider: provider_name.to_string(),
                    retry_after,
                    raw_message: (!body.is_empty()).then_some(body),
                })
            }
            502..=504 => {
                log::warn!("[{provider_name}] Gateway error (HTTP {status})");
                Err(ProviderError::NetworkError {
                    provider: provider_name.to_string(),
                    detail: format!("HTTP {status}: {}", truncate_for_log(&body)),
                })
            }
            _ => {
                log::debug!("[{provider_name}] Response body: {}", truncate_for_log(&body));
                Ok(HttpResponse { status, body })
            }
        }
    }

    /// Send with retries according to `policy`.
    ///
    /// Only retryable errors are retried. A non-idempotent request may have
    /// been applied before a timeout or gateway error, so it is only resent
    /// after a 429. Requests whose body cannot be cloned are sent once.
    pub async fn execute_request_with_retry(
        request_builder: RequestBuilder,
        provider_name: &str,
        label: &str,
        policy: &RetryPolicy,
        idempotent: bool,
    ) -> Result<HttpResponse, ProviderError> {
        let mut attempt = 0;
        loop {
            let Some(request) = request_builder.try_clone() else {
                log::warn!("[{provider_name}] Request body not clonable, sending without retry");
                return Self::execute_request(request_builder, provider_name, label).await;
            };

            match Self::execute_request(request, provider_name, label).await {
                Err(e) if attempt < policy.max_retries && should_retry(&e, idempotent) => {
                    let delay = policy.delay_for(&e, attempt);
                    log::warn!(
                        "[{provider_name}] {label} failed (attempt {}/{}), retrying in {:.1}s: {e}",
                        attempt + 1,
                        policy.max_retries + 1,
                        delay.as_secs_f32(),
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    /// Decode a JSON body, logging a truncated copy on failure.
    pub fn parse_json<T>(body: &str, provider_name: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(body).map_err(|e| {
            log::error!(
                "[{provider_name}] JSON parse failed: {e}; body: {}",
                truncate_for_log(body)
            );
            ProviderError::ParseError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }
}
