//! DNS Provider implementations

/// Shared utilities used by provider implementations.
pub mod common;

mod interserver;

pub use interserver::{INTERSERVER_API_BASE, InterServerProvider, InterServerProviderBuilder};
