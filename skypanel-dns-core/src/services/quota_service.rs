//! Plan quota enforcement

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::record_classifier::get_usage_stats;
use crate::services::{ServiceContext, provider_failure};
use crate::types::{DnsPlanLimits, DnsRecord, DomainUsage, RecordQuotaStatus, UserDomain};

/// Checks domain and record counts against the user's active DNS plan.
///
/// Records InterServer creates with a zone are never counted, see
/// [`crate::record_classifier`].
pub struct QuotaService {
    ctx: Arc<ServiceContext>,
}

impl QuotaService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Limits of the user's active plan.
    pub async fn active_limits(&self, user_id: &str) -> CoreResult<DnsPlanLimits> {
        self.ctx
            .subscription_repository
            .find_active(user_id)
            .await?
            .and_then(|sub| sub.active_limits())
            .ok_or_else(|| CoreError::NoActivePlan(user_id.to_string()))
    }

    /// Like [`Self::active_limits`], but `None` without an active plan.
    ///
    /// Storage failures are still returned.
    pub async fn plan_limits(&self, user_id: &str) -> CoreResult<Option<DnsPlanLimits>> {
        match self.active_limits(user_id).await {
            Ok(limits) => Ok(Some(limits)),
            Err(CoreError::NoActivePlan(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Current domain usage of a user.
    pub async fn domain_usage(&self, user_id: &str) -> CoreResult<DomainUsage> {
        let limits = self.active_limits(user_id).await?;
        let used = self.ctx.domain_repository.count_by_user(user_id).await?;
        Ok(DomainUsage {
            used: used as usize,
            limit: limits.max_domains,
        })
    }

    /// Fails unless the user may add one more domain.
    pub async fn check_domain_quota(&self, user_id: &str) -> CoreResult<DomainUsage> {
        let usage = self.domain_usage(user_id).await?;
        if usage.used + 1 > usage.limit as usize {
            log::warn!(
                "User {user_id} hit the domain limit ({} of {})",
                usage.used,
                usage.limit
            );
            return Err(CoreError::DomainQuotaExceeded {
                used: u32::try_from(usage.used).unwrap_or(u32::MAX),
                limit: usage.limit,
            });
        }
        Ok(usage)
    }

    /// Record usage of a domain against the plan, without enforcing it.
    pub async fn record_usage(
        &self,
        user_id: &str,
        domain: &UserDomain,
    ) -> CoreResult<RecordQuotaStatus> {
        let limits = self.active_limits(user_id).await?;
        let records = self
            .ctx
            .provider
            .list_records(&domain.provider_domain_id)
            .await
            .map_err(|e| provider_failure("List records", e))?;

        Ok(Self::status_of(limits, domain, &records))
    }

    /// Fails unless one more user-created record fits in `domain`.
    pub async fn check_record_quota(
        &self,
        user_id: &str,
        domain: &UserDomain,
    ) -> CoreResult<RecordQuotaStatus> {
        let status = self.record_usage(user_id, domain).await?;
        Self::enforce(user_id, status)
    }

    /// [`Self::check_record_quota`] against records the caller already listed.
    pub async fn check_listed_records(
        &self,
        user_id: &str,
        domain: &UserDomain,
        records: &[DnsRecord],
    ) -> CoreResult<RecordQuotaStatus> {
        let limits = self.active_limits(user_id).await?;
        Self::enforce(user_id, Self::status_of(limits, domain, records))
    }

    fn status_of(
        limits: DnsPlanLimits,
        domain: &UserDomain,
        records: &[DnsRecord],
    ) -> RecordQuotaStatus {
        let stats = get_usage_stats(records, &domain.name);
        log::debug!(
            "Domain {}: {} records, {} default, {} user-created",
            domain.name,
            stats.total,
            stats.default,
            stats.user_created
        );

        RecordQuotaStatus {
            domain: domain.name.clone(),
            usage: DomainUsage {
                used: stats.user_created,
                limit: limits.max_records,
            },
            stats,
        }
    }

    fn enforce(user_id: &str, status: RecordQuotaStatus) -> CoreResult<RecordQuotaStatus> {
        if !status.can_add() {
            log::warn!(
                "User {user_id} hit the record limit on {} ({} of {})",
                status.domain,
                status.usage.used,
                status.usage.limit
            );
            return Err(CoreError::RecordQuotaExceeded {
                domain: status.domain,
                used: status.usage.used,
                limit: status.usage.limit,
            });
        }
        Ok(status)
    }
}
