use crate::{AccessBlockSummary, Classification};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for bucketguard reports.
pub const SCHEMA_REPORT_V1: &str = "bucketguard.report.v1";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Warn,
    Fail,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// One audited bucket.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AuditEntry {
    pub bucket: String,
    pub classification: Classification,

    /// Index of the first statement that granted public read, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_statement: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_access_block: Option<AccessBlockSummary>,

    /// Public, but matched by the profile allowlist.
    #[serde(default)]
    pub allowed: bool,

    /// Stable identifier intended for dedup and trending:
    /// a hash of `bucket + classification code`.
    pub fingerprint: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AuditData {
    pub profile: String,
    pub buckets_scanned: u32,
    pub publicly_readable: u32,
    pub not_publicly_readable: u32,
    pub no_policy: u32,
    pub fetch_errors: u32,
    /// Publicly readable buckets excused by the allowlist.
    pub allowed_public: u32,
}

impl AuditData {
    pub fn from_entries(profile: &str, entries: &[AuditEntry]) -> Self {
        let mut data = AuditData {
            profile: profile.to_string(),
            buckets_scanned: entries.len() as u32,
            ..AuditData::default()
        };
        for e in entries {
            match e.classification {
                Classification::PubliclyReadable => {
                    data.publicly_readable += 1;
                    if e.allowed {
                        data.allowed_public += 1;
                    }
                }
                Classification::NotPubliclyReadable => data.not_publicly_readable += 1,
                Classification::NoPolicy => data.no_policy += 1,
                Classification::FetchError(_) => data.fetch_errors += 1,
            }
        }
        data
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AuditReport {
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub verdict: Verdict,
    pub entries: Vec<AuditEntry>,
    pub data: AuditData,
}
