//! InterServer error mapping
//!
//! The API has no structured error codes: failures are an HTTP status plus a
//! free-form `message`/`error` string, so mapping looks at the status first and
//! falls back to the wording.

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::{InterServerProvider, PROVIDER_NAME};

/// Pull a human-readable message out of an error body.
pub(crate) fn extract_message(body: &str) -> String {
    let trimmed = body.trim();
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        for key in ["message", "error", "msg", "text"] {
            if let Some(msg) = value.get(key).and_then(serde_json::Value::as_str) {
                return msg.to_string();
            }
        }
    }
    if trimmed.is_empty() {
        "Empty response".to_string()
    } else {
        crate::utils::log_sanitizer::truncate_for_log(trimmed)
    }
}

/// A 2xx body that still reports failure (`{"success": false, ...}` or
/// `{"status": "error", ...}`).
pub(crate) fn envelope_failure(body: &str) -> Option<String> {
    let value = serde_json::from_str::<serde_json::Value>(body).ok()?;
    let failed = value.get("success").and_then(serde_json::Value::as_bool) == Some(false)
        || value.get("status").and_then(serde_json::Value::as_str) == Some("error");
    failed.then(|| extract_message(body))
}

impl InterServerProvider {
    fn not_found(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match context {
            ErrorContext {
                record_id: Some(record_id),
                ..
            } => ProviderError::RecordNotFound {
                provider: self.provider_name().to_string(),
                record_id,
                raw_message: Some(raw.message),
            },
            ErrorContext {
                domain: Some(domain),
                ..
            } => ProviderError::DomainNotFound {
                provider: self.provider_name().to_string(),
                domain,
                raw_message: Some(raw.message),
            },
            _ => self.unknown_error(raw),
        }
    }

    fn already_exists(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match context {
            ErrorContext {
                record_name: Some(record_name),
                ..
            } => ProviderError::RecordExists {
                provider: self.provider_name().to_string(),
                record_name,
                raw_message: Some(raw.message),
            },
            ErrorContext {
                domain: Some(domain),
                ..
            } => ProviderError::DomainExists {
                provider: self.provider_name().to_string(),
                domain,
                raw_message: Some(raw.message),
            },
            _ => self.unknown_error(raw),
        }
    }

    fn map_by_message(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let msg = raw.message.to_lowercase();
        if msg.contains("api key") || msg.contains("authentication") || msg.contains("unauthorized")
        {
            ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            }
        } else if msg.contains("already exists") || msg.contains("duplicate") {
            self.already_exists(raw, context)
        } else if msg.contains("not found") || msg.contains("does not exist") {
            self.not_found(raw, context)
        } else if msg.contains("limit") || msg.contains("quota") {
            ProviderError::QuotaExceeded {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            }
        } else {
            self.unknown_error(raw)
        }
    }
}

impl ProviderErrorMapper for InterServerProvider {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            Some("401") => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },
            Some("403") => ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },
            Some("404") => self.not_found(raw, context),
            Some("409") => self.already_exists(raw, context),
            Some("400" | "422") => {
                let lowered = raw.message.to_lowercase();
                if lowered.contains("already exists") || lowered.contains("duplicate") {
                    self.already_exists(raw, context)
                } else {
                    ProviderError::InvalidParameter {
                        provider: self.provider_name().to_string(),
                        param: context
                            .record_name
                            .or(context.domain)
                            .unwrap_or_else(|| "request".to_string()),
                        detail: raw.message,
                    }
                }
            }
            _ => self.map_by_message(raw, context),
        }
    }
}
