//! InterServer `DnsProvider` implementation

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::providers::common::{normalize_domain_name, relative_to_full_name};
use crate::traits::{DnsProvider, ErrorContext, ProviderErrorMapper};
use crate::types::{
    CreateDnsRecordRequest, CreateDomainRequest, DnsRecord, DnsRecordType, DomainStatus,
    FieldType, IdResponse, ProviderCredentialField, ProviderDomain, ProviderMetadata,
    ProviderType, UpdateDnsRecordRequest,
};

use super::http::segment;
use super::{InterServerProvider, InterServerZone, ListPayload, RecordBody, ZoneBody};

/// Fields shared by create and update requests.
struct RecordFields<'a> {
    record_type: DnsRecordType,
    content: &'a str,
    ttl: u32,
    prio: Option<u16>,
    disabled: bool,
}

impl<'a> From<&'a CreateDnsRecordRequest> for RecordFields<'a> {
    fn from(req: &'a CreateDnsRecordRequest) -> Self {
        Self {
            record_type: req.record_type,
            content: &req.content,
            ttl: req.ttl,
            prio: req.prio,
            disabled: req.disabled,
        }
    }
}

impl<'a> From<&'a UpdateDnsRecordRequest> for RecordFields<'a> {
    fn from(req: &'a UpdateDnsRecordRequest) -> Self {
        Self {
            record_type: req.record_type,
            content: &req.content,
            ttl: req.ttl,
            prio: req.prio,
            disabled: req.disabled,
        }
    }
}

impl RecordFields<'_> {
    /// Priority as sent on the wire; only MX/SRV carry one.
    fn wire_prio(&self) -> u16 {
        if self.record_type.uses_priority() {
            self.prio.unwrap_or(10)
        } else {
            0
        }
    }

    fn body<'b>(&'b self, full_name: &'b str) -> RecordBody<'b> {
        RecordBody {
            name: full_name,
            record_type: self.record_type.as_str(),
            content: self.content.trim(),
            ttl: self.ttl,
            prio: self.wire_prio(),
            disabled: u8::from(self.disabled),
        }
    }

    /// The record as the provider will store it.
    fn to_record(&self, id: String, domain_id: &str, full_name: String) -> DnsRecord {
        DnsRecord {
            id,
            domain_id: domain_id.to_string(),
            name: full_name,
            record_type: self.record_type.as_str().to_string(),
            content: self.content.trim().to_string(),
            ttl: self.ttl.to_string(),
            prio: self.wire_prio().to_string(),
            disabled: u8::from(self.disabled).to_string(),
            ordername: String::new(),
            auth: "1".to_string(),
        }
    }
}

impl InterServerProvider {
    /// InterServer reports `"active"`, `"1"` or nothing for live zones.
    pub(crate) fn zone_to_domain(zone: InterServerZone) -> ProviderDomain {
        let status = match zone.status.trim().to_ascii_lowercase().as_str() {
            "" | "active" | "1" | "enabled" => DomainStatus::Active,
            "disabled" | "inactive" | "0" | "suspended" => DomainStatus::Disabled,
            _ => DomainStatus::Unknown,
        };

        ProviderDomain {
            id: zone.id,
            name: normalize_domain_name(&zone.domain).to_string(),
            provider: ProviderType::InterServer,
            status,
        }
    }

    async fn fetch_zones(&self) -> Result<Vec<InterServerZone>> {
        let payload: ListPayload<InterServerZone> =
            self.get_json("/dns", ErrorContext::default()).await?;
        Ok(payload.into_vec())
    }

    /// Find the created record when the API does not echo its id.
    async fn find_record(
        &self,
        domain_id: &str,
        full_name: &str,
        fields: &RecordFields<'_>,
    ) -> Result<DnsRecord> {
        let records = self.list_records(domain_id).await?;
        records
            .into_iter()
            .rev()
            .find(|r| {
                normalize_domain_name(&r.name) == full_name
                    && r.record_type == fields.record_type.as_str()
                    && normalize_domain_name(r.content.trim())
                        == normalize_domain_name(fields.content.trim())
            })
            .ok_or_else(|| self.parse_error("Created record not found in zone listing"))
    }
}

#[async_trait]
impl DnsProvider for InterServerProvider {
    fn id(&self) -> &'static str {
        "interserver"
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: ProviderType::InterServer,
            name: "InterServer".to_string(),
            description: "InterServer DNS hosting (my.interserver.net API v2)".to_string(),
            required_fields: vec![ProviderCredentialField {
                key: "apiKey".to_string(),
                label: "API Key".to_string(),
                field_type: FieldType::Password,
                placeholder: Some("Enter InterServer API key".to_string()),
                help_text: Some("Account Security > API Keys in my.interserver.net".to_string()),
            }],
        }
    }

    async fn validate_credentials(&self) -> Result<bool> {
        match self.fetch_zones().await {
            Ok(_) => Ok(true),
            Err(ProviderError::InvalidCredentials { .. } | ProviderError::PermissionDenied { .. }) => {
                Ok(false)
            }
            Err(e) => {
                log::warn!("Credential validation failed: {e}");
                Err(e)
            }
        }
    }

    async fn list_domains(&self) -> Result<Vec<ProviderDomain>> {
        Ok(self
            .fetch_zones()
            .await?
            .into_iter()
            .map(Self::zone_to_domain)
            .collect())
    }

    async fn get_domain(&self, domain_id: &str) -> Result<ProviderDomain> {
        self.fetch_zones()
            .await?
            .into_iter()
            .find(|z| z.id == domain_id)
            .map(Self::zone_to_domain)
            .ok_or_else(|| ProviderError::DomainNotFound {
                provider: self.provider_name().to_string(),
                domain: domain_id.to_string(),
                raw_message: None,
            })
    }

    async fn create_domain(&self, req: &CreateDomainRequest) -> Result<ProviderDomain> {
        let name = normalize_domain_name(req.domain.trim()).to_lowercase();
        let body = ZoneBody {
            domain: &name,
            ip: req.ip.trim(),
        };

        let response = self
            .post("/dns", &body, ErrorContext::domain(name.clone()))
            .await?;

        let id = serde_json::from_str::<IdResponse>(&response)
            .ok()
            .and_then(|r| r.id);

        if let Some(id) = id {
            log::info!("[{}] Zone {name} created with id {id}", self.provider_name());
            return Ok(ProviderDomain {
                id,
                name,
                provider: ProviderType::InterServer,
                status: DomainStatus::Active,
            });
        }

        self.fetch_zones()
            .await?
            .into_iter()
            .find(|z| normalize_domain_name(&z.domain).eq_ignore_ascii_case(&name))
            .map(Self::zone_to_domain)
            .ok_or_else(|| self.parse_error("Created zone not found in zone listing"))
    }

    async fn delete_domain(&self, domain_id: &str) -> Result<()> {
        self.delete(
            &format!("/dns/{}", segment(domain_id)),
            ErrorContext::domain(domain_id),
        )
        .await
    }

    async fn list_records(&self, domain_id: &str) -> Result<Vec<DnsRecord>> {
        let payload: ListPayload<DnsRecord> = self
            .get_json(
                &format!("/dns/{}", segment(domain_id)),
                ErrorContext::domain(domain_id),
            )
            .await?;

        Ok(payload
            .into_vec()
            .into_iter()
            .map(|mut r| {
                if r.domain_id.is_empty() {
                    r.domain_id = domain_id.to_string();
                }
                r
            })
            .collect())
    }

    async fn create_record(&self, req: &CreateDnsRecordRequest) -> Result<DnsRecord> {
        let zone = self.get_domain(&req.domain_id).await?;
        let fields = RecordFields::from(req);
        let full_name = relative_to_full_name(&req.name, &zone.name);

        let response = self
            .post(
                &format!("/dns/{}", segment(&req.domain_id)),
                &fields.body(&full_name),
                ErrorContext::new_record(req.domain_id.clone(), full_name.clone()),
            )
            .await?;

        let id = serde_json::from_str::<IdResponse>(&response)
            .ok()
            .and_then(|r| r.id);

        match id {
            Some(id) => Ok(fields.to_record(id, &req.domain_id, full_name)),
            None => self.find_record(&req.domain_id, &full_name, &fields).await,
        }
    }

    async fn update_record(
        &self,
        record_id: &str,
        req: &UpdateDnsRecordRequest,
    ) -> Result<DnsRecord> {
        let zone = self.get_domain(&req.domain_id).await?;
        let fields = RecordFields::from(req);
        let full_name = relative_to_full_name(&req.name, &zone.name);

        self.post(
            &format!("/dns/{}/{}", segment(&req.domain_id), segment(record_id)),
            &fields.body(&full_name),
            ErrorContext::record(req.domain_id.clone(), record_id),
        )
        .await?;

        Ok(fields.to_record(record_id.to_string(), &req.domain_id, full_name))
    }

    async fn delete_record(&self, record_id: &str, domain_id: &str) -> Result<()> {
        self.delete(
            &format!("/dns/{}/{}", segment(domain_id), segment(record_id)),
            ErrorContext::record(domain_id, record_id),
        )
        .await
    }
}
