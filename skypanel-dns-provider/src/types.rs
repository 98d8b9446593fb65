use serde::{Deserialize, Serialize};

use crate::utils::serde_helpers::{lenient_string, lenient_string_opt};

// ============ Provider Types ============

/// Identifies which DNS provider implementation to use.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// InterServer DNS (`my.interserver.net` API v2).
    #[serde(alias = "inter_server")]
    InterServer,
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InterServer => write!(f, "interserver"),
        }
    }
}

// ============ Domain Types ============

/// Status of a domain/zone within a DNS provider.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DomainStatus {
    /// Domain is active and resolving.
    Active,
    /// Domain is disabled at the provider.
    Disabled,
    /// Status could not be determined.
    Unknown,
}

/// A domain (zone) managed by a DNS provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDomain {
    /// Provider-specific zone identifier.
    pub id: String,
    /// Domain name (e.g., `"example.com"`).
    pub name: String,
    /// Which provider manages this domain.
    pub provider: ProviderType,
    /// Current domain status.
    pub status: DomainStatus,
}

/// Request to provision a new zone at the provider.
///
/// InterServer populates the zone with its default SOA, NS, A and MX records
/// pointing at `ip`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDomainRequest {
    /// Domain name to add.
    pub domain: String,
    /// IPv4 address used for the generated A records.
    pub ip: String,
}

// ============ DNS Record Types ============

/// DNS record type vocabulary accepted when creating or updating records.
///
/// Serialized as uppercase strings (`"A"`, `"AAAA"`, `"CNAME"`, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsRecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Name server record.
    Ns,
    /// Start of authority record.
    Soa,
    /// Text record.
    Txt,
    /// Service locator record.
    Srv,
    /// Certificate Authority Authorization record.
    Caa,
    /// Reverse pointer record.
    Ptr,
}

impl DnsRecordType {
    /// Wire spelling used by the provider.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Ns => "NS",
            Self::Soa => "SOA",
            Self::Txt => "TXT",
            Self::Srv => "SRV",
            Self::Caa => "CAA",
            Self::Ptr => "PTR",
        }
    }

    /// Whether records of this type carry a priority (`prio`) value.
    pub fn uses_priority(self) -> bool {
        matches!(self, Self::Mx | Self::Srv)
    }
}

impl std::fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DnsRecordType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "AAAA" => Ok(Self::Aaaa),
            "CNAME" => Ok(Self::Cname),
            "MX" => Ok(Self::Mx),
            "NS" => Ok(Self::Ns),
            "SOA" => Ok(Self::Soa),
            "TXT" => Ok(Self::Txt),
            "SRV" => Ok(Self::Srv),
            "CAA" => Ok(Self::Caa),
            "PTR" => Ok(Self::Ptr),
            _ => Err(s.to_string()),
        }
    }
}

/// A DNS record exactly as the provider reports it.
///
/// InterServer exposes its `PowerDNS` rows unchanged, so every field is kept as
/// a string. Numeric JSON values are accepted and stringified on the way in.
/// `record_type` stays a raw string on purpose: records of a type this crate
/// does not know about must still round-trip and be counted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Provider-assigned record identifier.
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    /// Zone identifier the record belongs to.
    #[serde(default, deserialize_with = "lenient_string")]
    pub domain_id: String,
    /// Owner name, usually fully qualified, possibly with a trailing dot.
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    /// Resource record type (`"A"`, `"MX"`, `"SOA"`, ...).
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub record_type: String,
    /// Record value, possibly with a trailing dot for host-valued types.
    #[serde(default, deserialize_with = "lenient_string")]
    pub content: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub ttl: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub prio: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub disabled: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub ordername: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub auth: String,
}

impl DnsRecord {
    /// Parsed record type, `None` for anything outside [`DnsRecordType`].
    pub fn parsed_type(&self) -> Option<DnsRecordType> {
        self.record_type.parse().ok()
    }

    /// `true` when the provider reports the record as disabled (`"1"`).
    pub fn is_disabled(&self) -> bool {
        matches!(self.disabled.trim(), "1" | "true")
    }
}

/// Request to create a new DNS record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDnsRecordRequest {
    /// Zone identifier to create the record in.
    pub domain_id: String,
    /// Record name, relative (`"www"`, `"@"`) or fully qualified.
    pub name: String,
    /// Record type.
    pub record_type: DnsRecordType,
    /// Record value.
    pub content: String,
    /// Time to live in seconds.
    pub ttl: u32,
    /// Priority for MX/SRV records; ignored for other types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prio: Option<u16>,
    /// Create the record in disabled state.
    #[serde(default)]
    pub disabled: bool,
}

/// Request to update an existing DNS record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDnsRecordRequest {
    /// Zone identifier the record belongs to.
    pub domain_id: String,
    /// New record name.
    pub name: String,
    /// New record type.
    pub record_type: DnsRecordType,
    /// New record value.
    pub content: String,
    /// New TTL in seconds.
    pub ttl: u32,
    /// New priority for MX/SRV records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prio: Option<u16>,
    /// Disable the record.
    #[serde(default)]
    pub disabled: bool,
}

// ============ Provider Metadata Types ============

/// The input type of a credential field (affects UI rendering).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Plain text input.
    Text,
    /// Masked/password input.
    Password,
}

/// Definition of a single credential field required by a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCredentialField {
    /// Machine-readable field key (e.g., `"apiKey"`).
    pub key: String,
    /// Human-readable label.
    pub label: String,
    /// Input type for UI rendering.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

/// Static metadata describing a DNS provider, used to build the admin
/// settings form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderMetadata {
    pub id: ProviderType,
    pub name: String,
    pub description: String,
    pub required_fields: Vec<ProviderCredentialField>,
}

// ============ Credential Types ============

/// Validation error for provider credentials.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CredentialValidationError {
    /// A required credential field is missing entirely.
    MissingField {
        provider: ProviderType,
        field: String,
        label: String,
    },
    /// A credential field is present but empty/whitespace-only.
    EmptyField {
        provider: ProviderType,
        field: String,
        label: String,
    },
}

impl std::fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { label, .. } => write!(f, "Missing required field: {label}"),
            Self::EmptyField { label, .. } => write!(f, "Field must not be empty: {label}"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// Type-safe credential container.
///
/// Serialized as a tagged enum:
///
/// ```json
/// { "provider": "interserver", "credentials": { "api_key": "..." } }
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "provider", content = "credentials")]
pub enum ProviderCredentials {
    /// InterServer API key (sent as `X-API-KEY`).
    #[serde(rename = "interserver")]
    InterServer { api_key: String },
}

impl std::fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InterServer { .. } => f
                .debug_struct("InterServer")
                .field("api_key", &"<redacted>")
                .finish(),
        }
    }
}

impl ProviderCredentials {
    /// Build credentials from a flat key-value map (the settings table layout).
    pub fn from_map(
        provider: ProviderType,
        map: &std::collections::HashMap<String, String>,
    ) -> Result<Self, CredentialValidationError> {
        match provider {
            ProviderType::InterServer => Ok(Self::InterServer {
                api_key: Self::get_required_field(provider, map, "apiKey", "API Key")?,
            }),
        }
    }

    fn get_required_field(
        provider: ProviderType,
        map: &std::collections::HashMap<String, String>,
        key: &str,
        label: &str,
    ) -> Result<String, CredentialValidationError> {
        match map.get(key) {
            None => Err(CredentialValidationError::MissingField {
                provider,
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) if v.trim().is_empty() => Err(CredentialValidationError::EmptyField {
                provider,
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) => Ok(v.trim().to_string()),
        }
    }

    /// Convert credentials to a flat key-value map for storage.
    pub fn to_map(&self) -> std::collections::HashMap<String, String> {
        match self {
            Self::InterServer { api_key } => [("apiKey".to_string(), api_key.clone())].into(),
        }
    }

    pub fn provider_type(&self) -> ProviderType {
        match self {
            Self::InterServer { .. } => ProviderType::InterServer,
        }
    }
}

/// Lenient wrapper for ids the provider sometimes returns as numbers.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct IdResponse {
    #[serde(default, deserialize_with = "lenient_string_opt")]
    pub id: Option<String>,
}
