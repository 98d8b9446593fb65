//! `DateTime<Utc>` serde helpers for stored rows.
//!
//! Written as RFC3339. Read from RFC3339, a naive SQL timestamp
//! (`2024-01-31 12:00:00`, taken as UTC) or Unix seconds.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

const SQL_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&dt.to_rfc3339())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StoredTimestamp {
        Text(String),
        Seconds(i64),
    }

    match StoredTimestamp::deserialize(deserializer)? {
        StoredTimestamp::Text(s) => {
            parse_text(&s).ok_or_else(|| Error::custom(format!("Invalid timestamp: {s}")))
        }
        StoredTimestamp::Seconds(secs) => DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| Error::custom("Unix timestamp out of range")),
    }
}

fn parse_text(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    SQL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}
