//! Domain management service

use std::sync::Arc;

use futures::future::join_all;

use crate::error::{CoreError, CoreResult};
use crate::record_classifier::count_user_created_records;
use crate::services::{QuotaService, ServiceContext, log_failure, provider_failure};
use crate::types::{CreateDomainRequest, DomainSummary, DomainUsage, UserDomain};

/// Domain management service
pub struct DomainService {
    ctx: Arc<ServiceContext>,
    quota: QuotaService,
}

impl DomainService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            quota: QuotaService::new(ctx.clone()),
            ctx,
        }
    }

    /// Domains of a user with their record usage.
    ///
    /// Zones are queried concurrently. A zone the provider fails to list is
    /// logged and reported without usage, as is every zone when the user has
    /// no active plan.
    pub async fn list_domains(&self, user_id: &str) -> CoreResult<Vec<DomainSummary>> {
        let domains = self.ctx.domain_repository.find_by_user(user_id).await?;
        let max_records = self
            .quota
            .plan_limits(user_id)
            .await?
            .map(|limits| limits.max_records);

        let futures = domains.into_iter().map(|domain| {
            let provider = self.ctx.provider.clone();
            async move {
                let record_usage = match max_records {
                    Some(limit) => match provider.list_records(&domain.provider_domain_id).await {
                        Ok(records) => Some(DomainUsage {
                            used: count_user_created_records(&records, &domain.name),
                            limit,
                        }),
                        Err(e) => {
                            log::warn!("Failed to load records of {}: {e}", domain.name);
                            None
                        }
                    },
                    None => None,
                };
                DomainSummary {
                    domain,
                    record_usage,
                }
            }
        });

        Ok(join_all(futures).await)
    }

    /// Provision a zone for the user, within the plan's domain limit.
    ///
    /// Adds by the same user run one at a time. If the local row cannot be
    /// saved the zone is removed again.
    pub async fn add_domain(&self, user_id: &str, name: &str, ip: &str) -> CoreResult<UserDomain> {
        let name = skypanel_dns_provider::normalize_domain_name(name.trim()).to_lowercase();
        if name.is_empty() || !name.contains('.') {
            return Err(CoreError::ValidationError(format!(
                "Invalid domain name: {name}"
            )));
        }

        let _guard = self.ctx.quota_lock(format!("user:{user_id}")).await;
        self.quota.check_domain_quota(user_id).await?;

        if self
            .ctx
            .domain_repository
            .find_by_name(&name)
            .await?
            .is_some()
        {
            let err = CoreError::DomainExists(name);
            log_failure("Add domain", &err);
            return Err(err);
        }

        let zone = self
            .ctx
            .provider
            .create_domain(&CreateDomainRequest {
                domain: name.clone(),
                ip: ip.trim().to_string(),
            })
            .await
            .map_err(|e| provider_failure("Add domain", e))?;

        let domain = UserDomain::new(user_id, &name, zone.id);

        if let Err(e) = self.ctx.domain_repository.save(&domain).await {
            log::error!("Failed to save domain {name}, removing zone: {e}");
            if let Err(cleanup) = self
                .ctx
                .provider
                .delete_domain(&domain.provider_domain_id)
                .await
            {
                log::error!(
                    "Zone {} left orphaned at provider: {cleanup}",
                    domain.provider_domain_id
                );
            }
            return Err(e);
        }

        log::info!("User {user_id} added domain {name}");
        Ok(domain)
    }

    /// Remove a zone at the provider, then locally.
    pub async fn delete_domain(&self, user_id: &str, domain_id: &str) -> CoreResult<()> {
        let domain = self.ctx.owned_domain(user_id, domain_id).await?;

        self.ctx
            .provider
            .delete_domain(&domain.provider_domain_id)
            .await
            .map_err(|e| provider_failure("Delete domain", e))?;

        self.ctx.domain_repository.delete(&domain.id).await?;
        log::info!("User {user_id} deleted domain {}", domain.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_context, test_domain};
    use skypanel_dns_provider::ProviderError;

    #[tokio::test]
    async fn add_domain_success() {
        let t = create_test_context();
        t.subscriptions.set_active("u1", 2, 10).await;
        let svc = DomainService::new(t.ctx.clone());

        let domain = svc
            .add_domain("u1", "Example.COM.", "192.0.2.1")
            .await
            .unwrap();

        assert_eq!(domain.name, "example.com");
        assert!(t.provider.has_zone(&domain.provider_domain_id).await);
        assert_eq!(t.domains.count().await, 1);
    }

    #[tokio::test]
    async fn add_domain_respects_limit() {
        let t = create_test_context();
        t.subscriptions.set_active("u1", 1, 10).await;
        let svc = DomainService::new(t.ctx.clone());

        svc.add_domain("u1", "a.com", "192.0.2.1").await.unwrap();
        let err = svc
            .add_domain("u1", "b.com", "192.0.2.1")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::DomainQuotaExceeded { used: 1, limit: 1 }
        ));
        assert_eq!(t.domains.count().await, 1);
    }

    #[tokio::test]
    async fn add_domain_twice_is_rejected() {
        let t = create_test_context();
        t.subscriptions.set_active("u1", 5, 10).await;
        t.subscriptions.set_active("u2", 5, 10).await;
        let svc = DomainService::new(t.ctx.clone());

        svc.add_domain("u1", "a.com", "192.0.2.1").await.unwrap();
        let err = svc
            .add_domain("u2", "a.com", "192.0.2.1")
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::DomainExists(_)));
    }

    #[tokio::test]
    async fn add_domain_rejects_garbage() {
        let t = create_test_context();
        t.subscriptions.set_active("u1", 5, 10).await;
        let svc = DomainService::new(t.ctx.clone());

        for bad in ["", ".", "localhost"] {
            let err = svc.add_domain("u1", bad, "192.0.2.1").await.unwrap_err();
            assert!(matches!(err, CoreError::ValidationError(_)), "{bad}");
        }
    }

    #[tokio::test]
    async fn add_domain_save_failure_cleanup() {
        let t = create_test_context();
        t.subscriptions.set_active("u1", 5, 10).await;
        t.domains.set_save_error(Some("disk full".to_string())).await;
        let svc = DomainService::new(t.ctx.clone());

        let err = svc
            .add_domain("u1", "example.com", "192.0.2.1")
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::StorageError(_)));

        // Zone was removed at the provider again
        let zones = t.ctx.provider.list_domains().await.unwrap();
        assert!(zones.is_empty());
    }

    #[tokio::test]
    async fn delete_domain_removes_both_sides() {
        let t = create_test_context();
        t.subscriptions.set_active("u1", 5, 10).await;
        let svc = DomainService::new(t.ctx.clone());
        let domain = svc.add_domain("u1", "example.com", "192.0.2.1").await.unwrap();

        assert!(svc.delete_domain("u2", &domain.id).await.is_err());
        svc.delete_domain("u1", &domain.id).await.unwrap();

        assert!(!t.provider.has_zone(&domain.provider_domain_id).await);
        assert_eq!(t.domains.count().await, 0);
    }

    #[tokio::test]
    async fn delete_domain_keeps_row_when_provider_fails() {
        let t = create_test_context();
        t.subscriptions.set_active("u1", 5, 10).await;
        let svc = DomainService::new(t.ctx.clone());
        let domain = svc.add_domain("u1", "example.com", "192.0.2.1").await.unwrap();

        t.provider
            .fail_next(ProviderError::NetworkError {
                provider: "mock".to_string(),
                detail: "reset".to_string(),
            })
            .await;
        assert!(svc.delete_domain("u1", &domain.id).await.is_err());
        assert_eq!(t.domains.count().await, 1);
    }

    #[tokio::test]
    async fn list_domains_surfaces_subscription_storage_failure() {
        let t = create_test_context();
        t.domains.insert(test_domain("u1", "a.com", "1")).await;
        t.subscriptions.set_error(Some("db down".to_string())).await;
        let svc = DomainService::new(t.ctx.clone());

        let err = svc.list_domains("u1").await.unwrap_err();
        assert!(matches!(err, CoreError::StorageError(_)));
    }

    #[tokio::test]
    async fn list_domains_without_plan_omits_usage() {
        let t = create_test_context();
        t.domains.insert(test_domain("u1", "a.com", "1")).await;
        let svc = DomainService::new(t.ctx.clone());

        let summaries = svc.list_domains("u1").await.unwrap();
        assert_eq!(summaries.len(), 1);
        assert!(summaries[0].record_usage.is_none());
    }

    #[tokio::test]
    async fn concurrent_adds_respect_limit() {
        let t = create_test_context();
        t.subscriptions.set_active("u1", 1, 10).await;
        let svc = DomainService::new(t.ctx.clone());

        let (first, second) = tokio::join!(
            svc.add_domain("u1", "a.com", "192.0.2.1"),
            svc.add_domain("u1", "b.com", "192.0.2.1"),
        );

        assert!(first.is_ok() != second.is_ok());
        assert_eq!(t.domains.count().await, 1);
    }

    #[tokio::test]
    async fn list_domains_tolerates_broken_zone() {
        let t = create_test_context();
        t.subscriptions.set_active("u1", 5, 10).await;
        let svc = DomainService::new(t.ctx.clone());
        svc.add_domain("u1", "a.com", "192.0.2.1").await.unwrap();
        let broken = svc.add_domain("u1", "b.com", "192.0.2.1").await.unwrap();
        t.domains.insert(test_domain("u2", "c.com", "999")).await;
        t.provider.break_zone(&broken.provider_domain_id).await;

        let summaries = svc.list_domains("u1").await.unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].domain.name, "a.com");
        assert_eq!(
            summaries[0].record_usage,
            Some(DomainUsage { used: 0, limit: 10 })
        );
        assert_eq!(summaries[1].domain.name, "b.com");
        assert!(summaries[1].record_usage.is_none());
    }
}
