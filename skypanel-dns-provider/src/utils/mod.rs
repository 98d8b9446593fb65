//! Utility modules.

/// Log sanitization utilities to prevent sensitive data exposure.
pub mod log_sanitizer;

/// Lenient scalar deserializers for loosely typed provider payloads.
pub mod serde_helpers;
