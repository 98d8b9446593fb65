use serde::{Deserialize, Serialize};

/// Unified error type for all DNS provider operations.
///
/// Every variant names the provider that produced it. Variants serialize with a
/// `code` tag so the HTTP layer can hand them to the panel unchanged.
///
/// # Retryable Errors
///
/// [`NetworkError`](Self::NetworkError), [`Timeout`](Self::Timeout) and
/// [`RateLimited`](Self::RateLimited) are transient; the HTTP helper retries
/// them with exponential backoff.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// Connection refused, DNS failure, 502/503/504 from the API gateway.
    NetworkError { provider: String, detail: String },

    /// The API key was rejected.
    InvalidCredentials {
        provider: String,
        raw_message: Option<String>,
    },

    /// The API key is valid but may not touch this resource.
    PermissionDenied {
        provider: String,
        raw_message: Option<String>,
    },

    /// A record with the same name/type/content already exists.
    RecordExists {
        provider: String,
        record_name: String,
        raw_message: Option<String>,
    },

    /// The record does not exist in the zone.
    RecordNotFound {
        provider: String,
        record_id: String,
        raw_message: Option<String>,
    },

    /// The zone already exists (on this or another account).
    DomainExists {
        provider: String,
        domain: String,
        raw_message: Option<String>,
    },

    /// The zone does not exist or is not owned by the API key's account.
    DomainNotFound {
        provider: String,
        domain: String,
        raw_message: Option<String>,
    },

    /// A request parameter was rejected (bad TTL, malformed IP, ...).
    InvalidParameter {
        provider: String,
        param: String,
        detail: String,
    },

    /// Provider-side resource limit. Not transient, unlike `RateLimited`.
    QuotaExceeded {
        provider: String,
        raw_message: Option<String>,
    },

    /// HTTP 429. `retry_after` is taken from the `Retry-After` header.
    RateLimited {
        provider: String,
        retry_after: Option<u64>,
        raw_message: Option<String>,
    },

    /// The HTTP request timed out.
    Timeout { provider: String, detail: String },

    /// The response body could not be decoded.
    ParseError { provider: String, detail: String },

    /// The request body could not be encoded.
    SerializationError { provider: String, detail: String },

    /// Anything not mapped to a specific variant.
    Unknown {
        provider: String,
        raw_code: Option<String>,
        raw_message: String,
    },
}

impl ProviderError {
    /// Whether the error stems from user input or missing resources.
    ///
    /// `true` is logged at `warn`, `false` at `error`. Keep in sync with new variants.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::RecordExists { .. }
                | Self::RecordNotFound { .. }
                | Self::DomainExists { .. }
                | Self::DomainNotFound { .. }
                | Self::InvalidParameter { .. }
                | Self::QuotaExceeded { .. }
        )
    }

    /// Whether retrying the same request may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }
}

fn with_raw(f: &mut std::fmt::Formatter<'_>, head: &str, raw: Option<&String>) -> std::fmt::Result {
    match raw {
        Some(msg) => write!(f, "{head}: {msg}"),
        None => f.write_str(head),
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::InvalidCredentials {
                provider,
                raw_message,
            } => with_raw(
                f,
                &format!("[{provider}] Invalid credentials"),
                raw_message.as_ref(),
            ),
            Self::PermissionDenied {
                provider,
                raw_message,
            } => with_raw(
                f,
                &format!("[{provider}] Permission denied"),
                raw_message.as_ref(),
            ),
            Self::RecordExists {
                provider,
                record_name,
                ..
            } => write!(f, "[{provider}] Record '{record_name}' already exists"),
            Self::RecordNotFound {
                provider,
                record_id,
                ..
            } => write!(f, "[{provider}] Record '{record_id}' not found"),
            Self::DomainExists {
                provider, domain, ..
            } => write!(f, "[{provider}] Domain '{domain}' already exists"),
            Self::DomainNotFound {
                provider,
                domain,
                raw_message,
            } => with_raw(
                f,
                &format!("[{provider}] Domain '{domain}' not found"),
                raw_message.as_ref(),
            ),
            Self::InvalidParameter {
                provider,
                param,
                detail,
            } => write!(f, "[{provider}] Invalid parameter '{param}': {detail}"),
            Self::QuotaExceeded { provider, .. } => write!(f, "[{provider}] Quota exceeded"),
            Self::RateLimited {
                provider,
                retry_after: Some(secs),
                ..
            } => write!(f, "[{provider}] Rate limited (retry after {secs}s)"),
            Self::RateLimited { provider, .. } => write!(f, "[{provider}] Rate limited"),
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::SerializationError { provider, detail } => {
                write!(f, "[{provider}] Serialization error: {detail}")
            }
            Self::Unknown {
                provider,
                raw_message,
                ..
            } => write!(f, "[{provider}] {raw_message}"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
