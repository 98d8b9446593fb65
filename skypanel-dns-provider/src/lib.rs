//! # skypanel-dns-provider
//!
//! Client for the InterServer DNS hosting API, behind the [`DnsProvider`]
//! trait used by the SkyPANEL DNS services.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: use the platform's native TLS implementation.
//! - **`rustls`**: use rustls instead.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use skypanel_dns_provider::{create_provider, DnsProvider, ProviderCredentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = create_provider(ProviderCredentials::InterServer {
//!         api_key: "your-key".to_string(),
//!     })?;
//!
//!     if !provider.validate_credentials().await? {
//!         return Err("API key rejected".into());
//!     }
//!
//!     for domain in provider.list_domains().await? {
//!         let records = provider.list_records(&domain.id).await?;
//!         println!("{} has {} records", domain.name, records.len());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! Tests and staging setups can point the client elsewhere:
//!
//! ```rust,no_run
//! # use skypanel_dns_provider::*;
//! # fn build() -> Result<()> {
//! let provider = InterServerProvider::builder("key".to_string())
//!     .base_url("http://127.0.0.1:8080")
//!     .retry_policy(RetryPolicy::none())
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result<T, ProviderError>`](ProviderError).
//! `NetworkError`, `Timeout` and `RateLimited` are retried with exponential
//! backoff according to the provider's [`RetryPolicy`].

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

pub use error::{ProviderError, Result};

pub use factory::{create_provider, get_all_provider_metadata};

// Internal traits (error mapping) are not exported
pub use traits::DnsProvider;

pub use types::{
    CreateDnsRecordRequest, CreateDomainRequest, CredentialValidationError, DnsRecord,
    DnsRecordType, DomainStatus, FieldType, ProviderCredentialField, ProviderCredentials,
    ProviderDomain, ProviderMetadata, ProviderType, UpdateDnsRecordRequest,
};

pub use http_client::RetryPolicy;

pub use providers::common::{normalize_domain_name, relative_to_full_name};
pub use providers::{INTERSERVER_API_BASE, InterServerProvider, InterServerProviderBuilder};
