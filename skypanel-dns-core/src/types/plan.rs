//! DNS plan and subscription types

use serde::{Deserialize, Serialize};

/// Limits granted by a DNS plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsPlanLimits {
    /// Domains the user may hold
    pub max_domains: u32,
    /// User-created records allowed per domain
    pub max_records: u32,
}

/// Subscription state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Cancelled,
    Expired,
    Suspended,
}

/// A user's DNS plan subscription
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsSubscription {
    pub user_id: String,
    pub plan_id: String,
    pub plan_name: String,
    pub limits: DnsPlanLimits,
    pub status: SubscriptionStatus,
}

impl DnsSubscription {
    /// Limits in force, `None` unless the subscription is active.
    #[must_use]
    pub fn active_limits(&self) -> Option<DnsPlanLimits> {
        (self.status == SubscriptionStatus::Active).then_some(self.limits)
    }
}
