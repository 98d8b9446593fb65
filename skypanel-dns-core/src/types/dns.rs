//! DNS record related type definitions

use serde::{Deserialize, Serialize};

use skypanel_dns_provider::{
    CreateDnsRecordRequest, DnsRecord, DnsRecordType, UpdateDnsRecordRequest,
    relative_to_full_name,
};

use super::domain::{DomainUsage, UserDomain};
use crate::error::{CoreError, CoreResult};
use crate::record_classifier::RecordUsageStats;

/// Lowest TTL InterServer accepts.
const MIN_TTL: u32 = 60;

/// Record fields as submitted by a user; the zone comes from the route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordInput {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: DnsRecordType,
    pub content: String,
    pub ttl: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prio: Option<u16>,
    #[serde(default)]
    pub disabled: bool,
}

impl RecordInput {
    /// Reject input InterServer would refuse anyway.
    pub fn validate(&self) -> CoreResult<()> {
        if self.content.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Record content must not be empty".to_string(),
            ));
        }
        if self.ttl < MIN_TTL {
            return Err(CoreError::ValidationError(format!(
                "TTL must be at least {MIN_TTL} seconds"
            )));
        }
        if self.name.chars().any(char::is_whitespace) {
            return Err(CoreError::ValidationError(
                "Record name must not contain whitespace".to_string(),
            ));
        }
        Ok(())
    }

    /// The record as the provider will store it in `zone_name`, for
    /// classification before it is written.
    #[must_use]
    pub fn to_record(&self, zone_name: &str) -> DnsRecord {
        DnsRecord {
            name: relative_to_full_name(&self.name, zone_name),
            record_type: self.record_type.as_str().to_string(),
            content: self.content.trim().to_string(),
            ttl: self.ttl.to_string(),
            ..DnsRecord::default()
        }
    }

    #[must_use]
    pub fn into_create_request(self, provider_domain_id: &str) -> CreateDnsRecordRequest {
        CreateDnsRecordRequest {
            domain_id: provider_domain_id.to_string(),
            name: self.name,
            record_type: self.record_type,
            content: self.content,
            ttl: self.ttl,
            prio: self.prio,
            disabled: self.disabled,
        }
    }

    #[must_use]
    pub fn into_update_request(self, provider_domain_id: &str) -> UpdateDnsRecordRequest {
        UpdateDnsRecordRequest {
            domain_id: provider_domain_id.to_string(),
            name: self.name,
            record_type: self.record_type,
            content: self.content,
            ttl: self.ttl,
            prio: self.prio,
            disabled: self.disabled,
        }
    }
}

/// Record usage of one domain against the plan's record limit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordQuotaStatus {
    pub domain: String,
    pub stats: RecordUsageStats,
    pub usage: DomainUsage,
}

impl RecordQuotaStatus {
    /// Whether one more user-created record fits.
    #[must_use]
    pub fn can_add(&self) -> bool {
        self.usage.remaining() > 0
    }
}

/// Every record of a domain plus its usage
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainRecordListing {
    pub domain: UserDomain,
    /// All records, defaults included
    pub records: Vec<DnsRecord>,
    pub stats: RecordUsageStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<DomainUsage>,
}
