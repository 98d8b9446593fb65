//! Domain name related type definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use skypanel_dns_provider::normalize_domain_name;

/// A domain owned by a SkyPANEL user, mapped to an InterServer zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDomain {
    /// Local ID (UUID)
    pub id: String,
    pub user_id: String,
    /// Zone name without trailing dot
    pub name: String,
    /// Zone ID at InterServer
    pub provider_domain_id: String,
    #[serde(with = "crate::utils::datetime")]
    pub created_at: DateTime<Utc>,
}

impl UserDomain {
    #[must_use]
    pub fn new(user_id: &str, name: &str, provider_domain_id: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: normalize_domain_name(name).to_string(),
            provider_domain_id,
            created_at: Utc::now(),
        }
    }
}

/// Used vs. allowed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainUsage {
    pub used: usize,
    pub limit: u32,
}

impl DomainUsage {
    /// Slots left before the limit is hit.
    #[must_use]
    pub fn remaining(&self) -> usize {
        (self.limit as usize).saturating_sub(self.used)
    }
}

/// A domain with its record usage, when the provider could report it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainSummary {
    pub domain: UserDomain,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_usage: Option<DomainUsage>,
}
