//! User domain persistence abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::UserDomain;

/// User domain repository Trait
///
/// Maps SkyPANEL users to the InterServer zones they own.
#[async_trait]
pub trait DomainRepository: Send + Sync {
    /// Number of domains held by a user
    async fn count_by_user(&self, user_id: &str) -> CoreResult<u32>;

    /// Get a domain by local ID
    ///
    /// # Arguments
    /// * `id` - Local domain ID
    async fn find_by_id(&self, id: &str) -> CoreResult<Option<UserDomain>>;

    /// Get a domain by zone name, across all users
    async fn find_by_name(&self, name: &str) -> CoreResult<Option<UserDomain>>;

    /// All domains of a user
    async fn find_by_user(&self, user_id: &str) -> CoreResult<Vec<UserDomain>>;

    /// Save domain (new or update)
    async fn save(&self, domain: &UserDomain) -> CoreResult<()>;

    /// Delete domain
    ///
    /// # Arguments
    /// * `id` - Local domain ID
    async fn delete(&self, id: &str) -> CoreResult<()>;
}
