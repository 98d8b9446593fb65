//! InterServer API wire types

use serde::{Deserialize, Serialize};

use crate::utils::serde_helpers::lenient_string;

/// List endpoints answer with a bare array; some deployments wrap it in
/// `{"data": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListPayload<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Wrapped { data: items } => items,
        }
    }
}

/// Zone entry from `GET /dns`.
#[derive(Debug, Deserialize)]
pub struct InterServerZone {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(alias = "name")]
    pub domain: String,
    /// `"active"`/`"1"` when present; older accounts omit it.
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: String,
}

/// Body of `POST /dns`.
#[derive(Debug, Serialize)]
pub struct ZoneBody<'a> {
    pub domain: &'a str,
    pub ip: &'a str,
}

/// Body of `POST /dns/{domain}` and `POST /dns/{domain}/{record}`.
#[derive(Debug, Serialize)]
pub struct RecordBody<'a> {
    pub name: &'a str,
    #[serde(rename = "type")]
    pub record_type: &'static str,
    pub content: &'a str,
    pub ttl: u32,
    pub prio: u16,
    pub disabled: u8,
}
