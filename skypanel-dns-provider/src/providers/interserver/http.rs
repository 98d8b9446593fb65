//! InterServer HTTP request methods

use reqwest::Method;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::InterServerProvider;
use super::error::{envelope_failure, extract_message};

/// Percent-encode one path segment.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

impl InterServerProvider {
    /// Send a request and return the body of a successful response.
    async fn request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        ctx: ErrorContext,
    ) -> Result<String>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{path}", self.base_url);
        let label = format!("{} {path}", method.as_str());
        // InterServer's POSTs create or overwrite; only GET and DELETE are safe to resend
        let idempotent = method != Method::POST;

        let mut builder = self
            .client
            .request(method, &url)
            .header("X-API-KEY", &self.api_key)
            .header(ACCEPT, "application/json");

        if let Some(body) = body {
            let payload =
                serde_json::to_string(body).map_err(|e| ProviderError::SerializationError {
                    provider: self.provider_name().to_string(),
                    detail: e.to_string(),
                })?;
            builder = builder.header(CONTENT_TYPE, "application/json").body(payload);
        }

        let response = HttpUtils::execute_request_with_retry(
            builder,
            self.provider_name(),
            &label,
            &self.retry,
            idempotent,
        )
        .await?;

        if !response.is_success() {
            let message = extract_message(&response.body);
            log::warn!(
                "[{}] {label} failed with HTTP {}: {message}",
                self.provider_name(),
                response.status
            );
            return Err(self.map_error(
                RawApiError::with_code(response.status.to_string(), message),
                ctx,
            ));
        }

        if let Some(message) = envelope_failure(&response.body) {
            log::warn!("[{}] {label} reported failure: {message}", self.provider_name());
            return Err(self.map_error(RawApiError::new(message), ctx));
        }

        Ok(response.body)
    }

    /// `GET` and decode JSON.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        ctx: ErrorContext,
    ) -> Result<T> {
        let body = self.request::<()>(Method::GET, path, None, ctx).await?;
        HttpUtils::parse_json(&body, self.provider_name())
    }

    /// `POST` a JSON body, returning the raw response body.
    pub(crate) async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<String> {
        self.request(Method::POST, path, Some(body), ctx).await
    }

    pub(crate) async fn delete(&self, path: &str, ctx: ErrorContext) -> Result<()> {
        self.request::<()>(Method::DELETE, path, None, ctx)
            .await
            .map(|_| ())
    }
}
