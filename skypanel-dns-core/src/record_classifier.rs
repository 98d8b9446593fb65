//! Default vs. user-created DNS record classification
//!
//! When a zone is provisioned, InterServer fills it with a fixed set of
//! records: the SOA, the NS set, A records for the apex, the wildcard and
//! `localhost`, and an MX pointing at `mail.<domain>` or the apex. Those never
//! count against a plan's record limit. Everything else does.
//!
//! All functions here are pure. Names, contents and the domain lose exactly one
//! trailing dot before comparison; comparisons are otherwise exact and
//! case-sensitive.

use serde::{Deserialize, Serialize};

use crate::types::DnsRecord;

/// Remove exactly one trailing `.`, if present.
#[must_use]
pub fn strip_trailing_dot(s: &str) -> &str {
    s.strip_suffix('.').unwrap_or(s)
}

/// Whether `name` is `<label>.<domain>` for the given label.
fn is_label_of(name: &str, label: &str, domain: &str) -> bool {
    name.strip_prefix(label)
        .and_then(|rest| rest.strip_prefix('.'))
        .is_some_and(|rest| rest == domain)
}

/// Whether `record` is one InterServer creates on its own for `domain_name`.
///
/// Unrecognized or malformed records are user-created.
#[must_use]
pub fn is_default_record(record: &DnsRecord, domain_name: &str) -> bool {
    let domain = strip_trailing_dot(domain_name);
    let name = strip_trailing_dot(&record.name);
    let content = strip_trailing_dot(&record.content);

    match record.record_type.as_str() {
        "SOA" | "NS" => true,
        "A" => {
            name == domain
                || is_label_of(name, "*", domain)
                || is_label_of(name, "localhost", domain)
        }
        "MX" => content == domain || is_label_of(content, "mail", domain),
        _ => false,
    }
}

/// Records that count against the plan, in their original order.
#[must_use]
pub fn filter_user_created_records(records: &[DnsRecord], domain_name: &str) -> Vec<DnsRecord> {
    records
        .iter()
        .filter(|r| !is_default_record(r, domain_name))
        .cloned()
        .collect()
}

#[must_use]
pub fn count_user_created_records(records: &[DnsRecord], domain_name: &str) -> usize {
    records
        .iter()
        .filter(|r| !is_default_record(r, domain_name))
        .count()
}

/// Record counts for one zone.
///
/// `default + user_created == total` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordUsageStats {
    pub total: usize,
    pub default: usize,
    #[serde(rename = "userCreated")]
    pub user_created: usize,
    /// The user-created records.
    pub records: Vec<DnsRecord>,
}

#[must_use]
pub fn get_usage_stats(records: &[DnsRecord], domain_name: &str) -> RecordUsageStats {
    let user_records = filter_user_created_records(records, domain_name);
    let total = records.len();
    let user_created = user_records.len();

    RecordUsageStats {
        total,
        default: total - user_created,
        user_created,
        records: user_records,
    }
}
