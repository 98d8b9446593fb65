//! SkyPANEL DNS Core Library
//!
//! Business logic behind SkyPANEL's DNS pages:
//! - Telling InterServer's default records apart from user-created ones
//!   ([`record_classifier`])
//! - Enforcing the domain and record limits of a user's DNS plan
//!   ([`QuotaService`])
//! - Record and domain management on top of the provider ([`DnsService`],
//!   [`DomainService`])
//!
//! Storage is abstracted through the traits in [`traits`]; the platform
//! builds a [`ServiceContext`] with its own implementations.

pub mod error;
pub mod record_classifier;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use record_classifier::{
    RecordUsageStats, count_user_created_records, filter_user_created_records, get_usage_stats,
    is_default_record,
};
pub use services::{DnsService, DomainService, QuotaService, ServiceContext};
pub use traits::{DomainRepository, SubscriptionRepository};
