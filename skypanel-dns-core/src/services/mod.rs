//! Business logic service layer

mod dns_service;
mod domain_service;
mod quota_service;

pub use dns_service::DnsService;
pub use domain_service::DomainService;
pub use quota_service::QuotaService;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use skypanel_dns_provider::{
    DnsProvider, ProviderCredentials, ProviderError, ProviderType, create_provider,
};

use crate::error::{CoreError, CoreResult};
use crate::traits::{DomainRepository, SubscriptionRepository};
use crate::types::UserDomain;

/// Service context - holds all dependencies
///
/// The platform layer builds this once and injects its storage
/// implementations; services share it through an `Arc`.
pub struct ServiceContext {
    /// InterServer client
    pub provider: Arc<dyn DnsProvider>,
    /// Plan subscriptions
    pub subscription_repository: Arc<dyn SubscriptionRepository>,
    /// Local user/domain mapping
    pub domain_repository: Arc<dyn DomainRepository>,
    /// Held from a quota check until the write it guards has finished.
    /// Process-local: separate instances sharing one account are not serialized.
    quota_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ServiceContext {
    #[must_use]
    pub fn new(
        provider: Arc<dyn DnsProvider>,
        subscription_repository: Arc<dyn SubscriptionRepository>,
        domain_repository: Arc<dyn DomainRepository>,
    ) -> Self {
        Self {
            provider,
            subscription_repository,
            domain_repository,
            quota_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Build the context from flat settings (`{"apiKey": "..."}`).
    pub fn from_settings(
        settings: &HashMap<String, String>,
        subscription_repository: Arc<dyn SubscriptionRepository>,
        domain_repository: Arc<dyn DomainRepository>,
    ) -> CoreResult<Self> {
        let credentials = ProviderCredentials::from_map(ProviderType::InterServer, settings)
            .map_err(CoreError::CredentialValidation)?;
        let provider = create_provider(credentials)?;
        Ok(Self::new(provider, subscription_repository, domain_repository))
    }

    /// Load a domain and make sure `user_id` owns it.
    ///
    /// A domain owned by someone else is reported as not found.
    pub async fn owned_domain(&self, user_id: &str, domain_id: &str) -> CoreResult<UserDomain> {
        match self.domain_repository.find_by_id(domain_id).await? {
            Some(domain) if domain.user_id == user_id => Ok(domain),
            Some(_) => {
                log::warn!("User {user_id} requested domain {domain_id} owned by another user");
                Err(CoreError::DomainNotFound(domain_id.to_string()))
            }
            None => Err(CoreError::DomainNotFound(domain_id.to_string())),
        }
    }

    /// Serialize quota-checked writes sharing `key` (a zone or a user).
    pub(crate) async fn quota_lock(&self, key: String) -> OwnedMutexGuard<()> {
        let lock = self.quota_locks.lock().await.entry(key).or_default().clone();
        lock.lock_owned().await
    }
}

/// Wrap a provider failure, logging it by severity.
pub(crate) fn provider_failure(operation: &str, err: ProviderError) -> CoreError {
    let err = CoreError::Provider(err);
    log_failure(operation, &err);
    err
}

/// `warn` for expected failures, `error` for the rest.
pub(crate) fn log_failure(operation: &str, err: &CoreError) {
    if err.is_expected() {
        log::warn!("{operation} failed: {err}");
    } else {
        log::error!("{operation} failed: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CredentialValidationError;
    use crate::test_utils::{MockDomainRepository, MockSubscriptionRepository, test_domain};

    fn settings(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn from_settings(pairs: &[(&str, &str)]) -> CoreResult<ServiceContext> {
        ServiceContext::from_settings(
            &settings(pairs),
            Arc::new(MockSubscriptionRepository::new()),
            Arc::new(MockDomainRepository::new()),
        )
    }

    #[test]
    fn from_settings_requires_api_key() {
        let missing = from_settings(&[]);
        assert!(matches!(
            missing,
            Err(CoreError::CredentialValidation(CredentialValidationError::MissingField { .. }))
        ));

        let blank = from_settings(&[("apiKey", "   ")]);
        assert!(matches!(
            blank,
            Err(CoreError::CredentialValidation(CredentialValidationError::EmptyField { .. }))
        ));

        let ok = from_settings(&[("apiKey", "key-123")]).unwrap();
        assert_eq!(ok.provider.id(), "interserver");
    }

    #[tokio::test]
    async fn owned_domain_hides_other_users() {
        let domains = Arc::new(MockDomainRepository::new());
        let domain = test_domain("u1", "example.com", "101");
        domains.insert(domain.clone()).await;
        let ctx = ServiceContext::new(
            Arc::new(crate::test_utils::MockDnsProvider::new()),
            Arc::new(MockSubscriptionRepository::new()),
            domains,
        );

        assert_eq!(ctx.owned_domain("u1", &domain.id).await.unwrap(), domain);
        assert!(matches!(
            ctx.owned_domain("u2", &domain.id).await,
            Err(CoreError::DomainNotFound(_))
        ));
        assert!(matches!(
            ctx.owned_domain("u1", "missing").await,
            Err(CoreError::DomainNotFound(_))
        ));
    }
}
