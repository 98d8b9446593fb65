//! DNS record management service

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::record_classifier::{get_usage_stats, is_default_record};
use crate::services::{QuotaService, ServiceContext, provider_failure};
use crate::types::{DnsRecord, DomainRecordListing, DomainUsage, RecordInput};

/// DNS record management service
///
/// Every operation checks that the user owns the domain. Writes that add a
/// user-created record are also checked against the plan's record limit.
pub struct DnsService {
    ctx: Arc<ServiceContext>,
    quota: QuotaService,
}

impl DnsService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            quota: QuotaService::new(ctx.clone()),
            ctx,
        }
    }

    /// All records of a domain, defaults included, with usage stats.
    ///
    /// `usage` is left out when the user has no active plan.
    pub async fn list_records(
        &self,
        user_id: &str,
        domain_id: &str,
    ) -> CoreResult<DomainRecordListing> {
        let domain = self.ctx.owned_domain(user_id, domain_id).await?;

        let records = self
            .ctx
            .provider
            .list_records(&domain.provider_domain_id)
            .await
            .map_err(|e| provider_failure("List records", e))?;

        let stats = get_usage_stats(&records, &domain.name);
        let usage = self
            .quota
            .plan_limits(user_id)
            .await?
            .map(|limits| DomainUsage {
                used: stats.user_created,
                limit: limits.max_records,
            });

        Ok(DomainRecordListing {
            domain,
            records,
            stats,
            usage,
        })
    }

    /// Create a record if the plan allows one more.
    ///
    /// Writes to the same domain are serialized from the quota check until the
    /// provider has answered.
    pub async fn create_record(
        &self,
        user_id: &str,
        domain_id: &str,
        input: RecordInput,
    ) -> CoreResult<DnsRecord> {
        input.validate()?;
        let domain = self.ctx.owned_domain(user_id, domain_id).await?;

        let _guard = self.ctx.quota_lock(zone_key(&domain.id)).await;
        self.quota.check_record_quota(user_id, &domain).await?;

        let request = input.into_create_request(&domain.provider_domain_id);
        let record = self
            .ctx
            .provider
            .create_record(&request)
            .await
            .map_err(|e| provider_failure("Create record", e))?;

        log::info!(
            "User {user_id} created {} record {} in {}",
            record.record_type,
            record.name,
            domain.name
        );
        Ok(record)
    }

    /// Update a record. Default records may be edited too.
    ///
    /// An edit that turns a default record into a user-created one needs room
    /// in the plan, like a create.
    pub async fn update_record(
        &self,
        user_id: &str,
        domain_id: &str,
        record_id: &str,
        input: RecordInput,
    ) -> CoreResult<DnsRecord> {
        input.validate()?;
        let domain = self.ctx.owned_domain(user_id, domain_id).await?;

        let _guard = self.ctx.quota_lock(zone_key(&domain.id)).await;
        let records = self
            .ctx
            .provider
            .list_records(&domain.provider_domain_id)
            .await
            .map_err(|e| provider_failure("Update record", e))?;
        let current = records
            .iter()
            .find(|r| r.id == record_id)
            .ok_or_else(|| CoreError::RecordNotFound(record_id.to_string()))?;

        if is_default_record(current, &domain.name)
            && !is_default_record(&input.to_record(&domain.name), &domain.name)
        {
            self.quota
                .check_listed_records(user_id, &domain, &records)
                .await?;
        }

        let request = input.into_update_request(&domain.provider_domain_id);
        self.ctx
            .provider
            .update_record(record_id, &request)
            .await
            .map_err(|e| provider_failure("Update record", e))
    }

    /// Delete a record. Default records may be deleted too.
    pub async fn delete_record(
        &self,
        user_id: &str,
        domain_id: &str,
        record_id: &str,
    ) -> CoreResult<()> {
        let domain = self.ctx.owned_domain(user_id, domain_id).await?;

        self.ctx
            .provider
            .delete_record(record_id, &domain.provider_domain_id)
            .await
            .map_err(|e| provider_failure("Delete record", e))?;

        log::info!("User {user_id} deleted record {record_id} in {}", domain.name);
        Ok(())
    }
}

fn zone_key(domain_id: &str) -> String {
    format!("zone:{domain_id}")
}
