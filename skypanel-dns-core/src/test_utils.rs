//! Test helper module
//!
//! In-memory mocks for the storage traits and the DNS provider, plus
//! factories for common fixtures.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use skypanel_dns_provider::{
    CreateDnsRecordRequest, CreateDomainRequest, DnsProvider, DnsRecord, DomainStatus,
    ProviderDomain, ProviderError, ProviderMetadata, ProviderType, Result as ProviderResult,
    UpdateDnsRecordRequest,
};
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::traits::{DomainRepository, SubscriptionRepository};
use crate::types::{DnsPlanLimits, DnsSubscription, SubscriptionStatus, UserDomain};

// ===== MockSubscriptionRepository =====

pub struct MockSubscriptionRepository {
    subscriptions: RwLock<HashMap<String, DnsSubscription>>,
    /// When `Some`, `find_active` fails with this message
    error: RwLock<Option<String>>,
}

impl MockSubscriptionRepository {
    pub fn new() -> Self {
        Self {
            subscriptions: RwLock::new(HashMap::new()),
            error: RwLock::new(None),
        }
    }

    pub async fn set_error(&self, err: Option<String>) {
        *self.error.write().await = err;
    }

    async fn set(&self, user_id: &str, max_domains: u32, max_records: u32, status: SubscriptionStatus) {
        self.subscriptions.write().await.insert(
            user_id.to_string(),
            DnsSubscription {
                user_id: user_id.to_string(),
                plan_id: "dns-test".to_string(),
                plan_name: "DNS Test".to_string(),
                limits: DnsPlanLimits {
                    max_domains,
                    max_records,
                },
                status,
            },
        );
    }

    pub async fn set_active(&self, user_id: &str, max_domains: u32, max_records: u32) {
        self.set(user_id, max_domains, max_records, SubscriptionStatus::Active)
            .await;
    }

    pub async fn set_suspended(&self, user_id: &str, max_domains: u32, max_records: u32) {
        self.set(user_id, max_domains, max_records, SubscriptionStatus::Suspended)
            .await;
    }
}

#[async_trait]
impl SubscriptionRepository for MockSubscriptionRepository {
    async fn find_active(&self, user_id: &str) -> CoreResult<Option<DnsSubscription>> {
        if let Some(ref msg) = *self.error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        Ok(self.subscriptions.read().await.get(user_id).cloned())
    }
}

// ===== MockDomainRepository =====

pub struct MockDomainRepository {
    domains: RwLock<HashMap<String, UserDomain>>,
    /// When `Some`, `save` fails with this message (exercises cleanup paths)
    save_error: RwLock<Option<String>>,
}

impl MockDomainRepository {
    pub fn new() -> Self {
        Self {
            domains: RwLock::new(HashMap::new()),
            save_error: RwLock::new(None),
        }
    }

    pub async fn set_save_error(&self, err: Option<String>) {
        *self.save_error.write().await = err;
    }

    /// Insert directly, bypassing `save_error`.
    pub async fn insert(&self, domain: UserDomain) {
        self.domains.write().await.insert(domain.id.clone(), domain);
    }

    pub async fn count(&self) -> usize {
        self.domains.read().await.len()
    }
}

#[async_trait]
impl DomainRepository for MockDomainRepository {
    async fn count_by_user(&self, user_id: &str) -> CoreResult<u32> {
        let count = self
            .domains
            .read()
            .await
            .values()
            .filter(|d| d.user_id == user_id)
            .count();
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    async fn find_by_id(&self, id: &str) -> CoreResult<Option<UserDomain>> {
        Ok(self.domains.read().await.get(id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> CoreResult<Option<UserDomain>> {
        Ok(self
            .domains
            .read()
            .await
            .values()
            .find(|d| d.name == name)
            .cloned())
    }

    async fn find_by_user(&self, user_id: &str) -> CoreResult<Vec<UserDomain>> {
        let mut domains: Vec<UserDomain> = self
            .domains
            .read()
            .await
            .values()
            .filter(|d| d.user_id == user_id)
            .cloned()
            .collect();
        domains.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(domains)
    }

    async fn save(&self, domain: &UserDomain) -> CoreResult<()> {
        if let Some(ref msg) = *self.save_error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        self.domains
            .write()
            .await
            .insert(domain.id.clone(), domain.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> CoreResult<()> {
        self.domains.write().await.remove(id);
        Ok(())
    }
}

// ===== MockDnsProvider =====

/// In-memory InterServer stand-in. New zones get the default record set.
pub struct MockDnsProvider {
    zones: RwLock<HashMap<String, ProviderDomain>>,
    records: RwLock<HashMap<String, Vec<DnsRecord>>>,
    /// Returned (once) by the next call
    next_error: RwLock<Option<ProviderError>>,
    /// Zone IDs whose record listing always fails
    broken_zones: RwLock<Vec<String>>,
    next_id: AtomicU64,
}

impl MockDnsProvider {
    pub fn new() -> Self {
        Self {
            zones: RwLock::new(HashMap::new()),
            records: RwLock::new(HashMap::new()),
            next_error: RwLock::new(None),
            broken_zones: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1000),
        }
    }

    pub async fn set_records(&self, zone_id: &str, records: Vec<DnsRecord>) {
        self.records
            .write()
            .await
            .insert(zone_id.to_string(), records);
    }

    pub async fn records(&self, zone_id: &str) -> Vec<DnsRecord> {
        self.records
            .read()
            .await
            .get(zone_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn has_zone(&self, zone_id: &str) -> bool {
        self.zones.read().await.contains_key(zone_id)
    }

    pub async fn fail_next(&self, err: ProviderError) {
        *self.next_error.write().await = Some(err);
    }

    pub async fn break_zone(&self, zone_id: &str) {
        self.broken_zones.write().await.push(zone_id.to_string());
    }

    fn next_id(&self) -> String {
        self.next_id.fetch_add(1, Ordering::Relaxed).to_string()
    }

    async fn check_error(&self) -> ProviderResult<()> {
        match self.next_error.write().await.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn record_not_found(record_id: &str) -> ProviderError {
        ProviderError::RecordNotFound {
            provider: "mock".to_string(),
            record_id: record_id.to_string(),
            raw_message: None,
        }
    }

    fn domain_not_found(domain_id: &str) -> ProviderError {
        ProviderError::DomainNotFound {
            provider: "mock".to_string(),
            domain: domain_id.to_string(),
            raw_message: None,
        }
    }
}

#[async_trait]
impl DnsProvider for MockDnsProvider {
    fn id(&self) -> &'static str {
        "mock"
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: ProviderType::InterServer,
            name: "Mock".to_string(),
            description: "In-memory provider for tests".to_string(),
            required_fields: Vec::new(),
        }
    }

    async fn validate_credentials(&self) -> ProviderResult<bool> {
        self.check_error().await?;
        Ok(true)
    }

    async fn list_domains(&self) -> ProviderResult<Vec<ProviderDomain>> {
        self.check_error().await?;
        Ok(self.zones.read().await.values().cloned().collect())
    }

    async fn get_domain(&self, domain_id: &str) -> ProviderResult<ProviderDomain> {
        self.check_error().await?;
        self.zones
            .read()
            .await
            .get(domain_id)
            .cloned()
            .ok_or_else(|| Self::domain_not_found(domain_id))
    }

    async fn create_domain(&self, req: &CreateDomainRequest) -> ProviderResult<ProviderDomain> {
        self.check_error().await?;
        let zone = ProviderDomain {
            id: self.next_id(),
            name: req.domain.clone(),
            provider: ProviderType::InterServer,
            status: DomainStatus::Active,
        };
        self.zones
            .write()
            .await
            .insert(zone.id.clone(), zone.clone());
        self.set_records(&zone.id, default_zone_records(&req.domain))
            .await;
        Ok(zone)
    }

    async fn delete_domain(&self, domain_id: &str) -> ProviderResult<()> {
        self.check_error().await?;
        self.records.write().await.remove(domain_id);
        self.zones
            .write()
            .await
            .remove(domain_id)
            .map(|_| ())
            .ok_or_else(|| Self::domain_not_found(domain_id))
    }

    async fn list_records(&self, domain_id: &str) -> ProviderResult<Vec<DnsRecord>> {
        self.check_error().await?;
        if self.broken_zones.read().await.iter().any(|z| z == domain_id) {
            return Err(ProviderError::Timeout {
                provider: "mock".to_string(),
                detail: "zone listing timed out".to_string(),
            });
        }
        Ok(self.records(domain_id).await)
    }

    async fn create_record(&self, req: &CreateDnsRecordRequest) -> ProviderResult<DnsRecord> {
        self.check_error().await?;
        let record = DnsRecord {
            id: self.next_id(),
            domain_id: req.domain_id.clone(),
            name: req.name.clone(),
            record_type: req.record_type.as_str().to_string(),
            content: req.content.clone(),
            ttl: req.ttl.to_string(),
            ..DnsRecord::default()
        };
        self.records
            .write()
            .await
            .entry(req.domain_id.clone())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn update_record(
        &self,
        record_id: &str,
        req: &UpdateDnsRecordRequest,
    ) -> ProviderResult<DnsRecord> {
        self.check_error().await?;
        let mut store = self.records.write().await;
        let record = store
            .get_mut(&req.domain_id)
            .and_then(|records| records.iter_mut().find(|r| r.id == record_id))
            .ok_or_else(|| Self::record_not_found(record_id))?;
        record.name.clone_from(&req.name);
        record.record_type = req.record_type.as_str().to_string();
        record.content.clone_from(&req.content);
        record.ttl = req.ttl.to_string();
        Ok(record.clone())
    }

    async fn delete_record(&self, record_id: &str, domain_id: &str) -> ProviderResult<()> {
        self.check_error().await?;
        let mut store = self.records.write().await;
        let records = store
            .get_mut(domain_id)
            .ok_or_else(|| Self::domain_not_found(domain_id))?;
        let before = records.len();
        records.retain(|r| r.id != record_id);
        if records.len() == before {
            return Err(Self::record_not_found(record_id));
        }
        Ok(())
    }
}

// ===== Factory methods =====

pub fn user_record(id: &str, record_type: &str, name: &str, content: &str) -> DnsRecord {
    DnsRecord {
        id: id.to_string(),
        name: name.to_string(),
        record_type: record_type.to_string(),
        content: content.to_string(),
        ttl: "3600".to_string(),
        ..DnsRecord::default()
    }
}

/// The records InterServer puts in a new zone.
pub fn default_zone_records(domain: &str) -> Vec<DnsRecord> {
    vec![
        user_record("1", "SOA", domain, "cdns1.interserver.net. dns.interserver.net. 1 10800 3600 604800 3600"),
        user_record("2", "NS", domain, "cdns1.interserver.net"),
        user_record("3", "NS", domain, "cdns2.interserver.net"),
        user_record("4", "A", domain, "192.0.2.1"),
        user_record("5", "A", &format!("*.{domain}"), "192.0.2.1"),
        user_record("6", "A", &format!("localhost.{domain}"), "127.0.0.1"),
        user_record("7", "MX", domain, &format!("mail.{domain}")),
    ]
}

pub fn test_domain(user_id: &str, name: &str, provider_domain_id: &str) -> UserDomain {
    UserDomain::new(user_id, name, provider_domain_id.to_string())
}

pub struct TestContext {
    pub ctx: Arc<ServiceContext>,
    pub provider: Arc<MockDnsProvider>,
    pub subscriptions: Arc<MockSubscriptionRepository>,
    pub domains: Arc<MockDomainRepository>,
}

/// Create a `ServiceContext` backed by mocks
pub fn create_test_context() -> TestContext {
    let provider = Arc::new(MockDnsProvider::new());
    let subscriptions = Arc::new(MockSubscriptionRepository::new());
    let domains = Arc::new(MockDomainRepository::new());

    let ctx = Arc::new(ServiceContext::new(
        provider.clone(),
        subscriptions.clone(),
        domains.clone(),
    ));

    TestContext {
        ctx,
        provider,
        subscriptions,
        domains,
    }
}
