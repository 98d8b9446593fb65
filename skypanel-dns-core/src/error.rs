//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use skypanel_dns_provider::{CredentialValidationError, ProviderError};

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// The user has no active DNS plan
    #[error("No active DNS plan for user {0}")]
    NoActivePlan(String),

    /// Adding a domain would exceed the plan's domain limit
    #[error("Domain limit reached: {used} of {limit} domains in use")]
    DomainQuotaExceeded { used: u32, limit: u32 },

    /// Adding a record would exceed the plan's record limit
    #[error("Record limit reached for {domain}: {used} of {limit} records in use")]
    RecordQuotaExceeded {
        domain: String,
        used: usize,
        limit: u32,
    },

    /// Domain not found, or not owned by the caller
    #[error("Domain not found: {0}")]
    DomainNotFound(String),

    /// Record not found
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    /// Domain is already registered locally
    #[error("Domain already exists: {0}")]
    DomainExists(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Credential validation errors (field level)
    #[error("{0}")]
    CredentialValidation(CredentialValidationError),

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether this is expected behavior (user input, quota, missing resource),
    /// used for log classification.
    ///
    /// Log at `warn` when `true` and at `error` when `false`.
    /// **Update this method when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::NoActivePlan(_)
            | Self::DomainQuotaExceeded { .. }
            | Self::RecordQuotaExceeded { .. }
            | Self::DomainNotFound(_)
            | Self::RecordNotFound(_)
            | Self::DomainExists(_)
            | Self::ValidationError(_)
            | Self::CredentialValidation(_) => true,
            Self::Provider(e) => e.is_expected(),
            Self::StorageError(_) => false,
        }
    }

    /// Whether this is a plan limit rejection.
    #[must_use]
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(
            self,
            Self::DomainQuotaExceeded { .. } | Self::RecordQuotaExceeded { .. }
        )
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
