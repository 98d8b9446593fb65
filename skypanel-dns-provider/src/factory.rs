//! Provider factory functions and metadata.

use std::sync::Arc;

use crate::error::Result;
use crate::providers::InterServerProvider;
use crate::traits::DnsProvider;
use crate::types::{ProviderCredentials, ProviderMetadata};

/// Creates a [`DnsProvider`] instance from the given credentials.
///
/// The returned provider is wrapped in `Arc<dyn DnsProvider>` so services and
/// async tasks can share it.
///
/// # Errors
///
/// Fails when the HTTP client cannot be constructed.
pub fn create_provider(credentials: ProviderCredentials) -> Result<Arc<dyn DnsProvider>> {
    match credentials {
        ProviderCredentials::InterServer { api_key } => {
            Ok(Arc::new(InterServerProvider::new(api_key)?))
        }
    }
}

/// Metadata for every supported provider, for building credential forms.
pub fn get_all_provider_metadata() -> Vec<ProviderMetadata> {
    vec![InterServerProvider::metadata()]
}
