//! Type definition module

mod dns;
mod domain;
mod plan;

pub use dns::{DomainRecordListing, RecordInput, RecordQuotaStatus};
pub use domain::{DomainSummary, DomainUsage, UserDomain};
pub use plan::{DnsPlanLimits, DnsSubscription, SubscriptionStatus};

// Re-export public types from the provider library
pub use skypanel_dns_provider::{
    CreateDnsRecordRequest, CreateDomainRequest, CredentialValidationError, DnsRecord,
    DnsRecordType, DomainStatus, ProviderCredentials, ProviderDomain, ProviderMetadata,
    ProviderType, UpdateDnsRecordRequest,
};

pub use crate::record_classifier::RecordUsageStats;
