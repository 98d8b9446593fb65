//! DNS plan subscription lookup abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::DnsSubscription;

/// Subscription lookup
///
/// Implemented by the platform on top of its billing tables.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// The user's current DNS subscription, active or not.
    ///
    /// # Returns
    /// * `Some(subscription)` - the user has a DNS plan (check its status)
    /// * `None` - the user never subscribed
    async fn find_active(&self, user_id: &str) -> CoreResult<Option<DnsSubscription>>;
}
