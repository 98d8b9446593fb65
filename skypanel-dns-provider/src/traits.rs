use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{
    CreateDnsRecordRequest, CreateDomainRequest, DnsRecord, ProviderDomain, ProviderMetadata,
    UpdateDnsRecordRequest,
};

/// Raw API error before mapping (internal).
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// HTTP status code, as a string so non-HTTP codes fit too.
    pub code: Option<String>,
    /// Message extracted from the response body.
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// What the failing call was about, so a bare 404 can become
/// `DomainNotFound` or `RecordNotFound` (internal).
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    pub record_name: Option<String>,
    pub record_id: Option<String>,
    pub domain: Option<String>,
}

impl ErrorContext {
    pub fn domain(domain: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
            ..Self::default()
        }
    }

    pub fn record(domain: impl Into<String>, record_id: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
            record_id: Some(record_id.into()),
            ..Self::default()
        }
    }

    pub fn new_record(domain: impl Into<String>, record_name: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
            record_name: Some(record_name.into()),
            ..Self::default()
        }
    }
}

/// Maps raw API failures onto [`ProviderError`] (internal).
pub(crate) trait ProviderErrorMapper {
    fn provider_name(&self) -> &'static str;

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// DNS provider abstraction.
///
/// Record listings are always complete: quota accounting needs every record of
/// a zone, so there is no pagination at this layer.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Provider identifier.
    fn id(&self) -> &'static str;

    /// Static metadata (name, credential fields). Callable without an instance.
    fn metadata() -> ProviderMetadata
    where
        Self: Sized;

    /// Check the credentials against the live API.
    async fn validate_credentials(&self) -> Result<bool>;

    /// All zones visible to the credentials.
    async fn list_domains(&self) -> Result<Vec<ProviderDomain>>;

    /// A single zone by its provider id.
    async fn get_domain(&self, domain_id: &str) -> Result<ProviderDomain>;

    /// Provision a new zone. The provider fills in its default records.
    async fn create_domain(&self, req: &CreateDomainRequest) -> Result<ProviderDomain>;

    /// Remove a zone and all of its records.
    async fn delete_domain(&self, domain_id: &str) -> Result<()>;

    /// Every record of a zone, default records included.
    async fn list_records(&self, domain_id: &str) -> Result<Vec<DnsRecord>>;

    async fn create_record(&self, req: &CreateDnsRecordRequest) -> Result<DnsRecord>;

    async fn update_record(
        &self,
        record_id: &str,
        req: &UpdateDnsRecordRequest,
    ) -> Result<DnsRecord>;

    async fn delete_record(&self, record_id: &str, domain_id: &str) -> Result<()>;
}
