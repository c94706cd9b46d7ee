use crate::access_block::summarize_access_block;
use crate::engine::{evaluate, matching_statement};
use crate::fingerprint::fingerprint_for_entry;
use crate::model::{PolicyInput, PublicAccessBlockInput};
use crate::policy::{EffectiveConfig, Severity};
use bucketguard_types::{AuditData, AuditEntry, Verdict};
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Bucket name globs whose public read is expected (static sites, public datasets).
#[derive(Clone, Debug, Default)]
pub struct Allowlist {
    set: Option<GlobSet>,
}

impl Allowlist {
    pub fn new(patterns: &[String]) -> Result<Self, globset::Error> {
        if patterns.is_empty() {
            return Ok(Self::default());
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            // Case-sensitive, like bucket names.
            builder.add(Glob::new(pattern)?);
        }
        Ok(Self {
            set: Some(builder.build()?),
        })
    }

    pub fn is_allowed(&self, bucket: &str) -> bool {
        self.set.as_ref().is_some_and(|set| set.is_match(bucket))
    }
}

/// Evaluate one bucket and wrap the result as a report entry.
pub fn assess(
    bucket: &str,
    input: &PolicyInput,
    access_block: Option<&PublicAccessBlockInput>,
    allow: &Allowlist,
) -> AuditEntry {
    let classification = evaluate(bucket, input);
    let matched_statement = match input {
        PolicyInput::Document(doc) if classification.is_public() => {
            matching_statement(bucket, doc).map(|idx| idx as u32)
        }
        _ => None,
    };

    let allowed = classification.is_public() && allow.is_allowed(bucket);
    let fingerprint = fingerprint_for_entry(bucket, classification.code());

    AuditEntry {
        bucket: bucket.to_string(),
        classification,
        matched_statement,
        public_access_block: access_block.map(summarize_access_block),
        allowed,
        fingerprint,
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeverityCounts {
    pub info: u32,
    pub warning: u32,
    pub error: u32,
}

#[derive(Clone, Debug)]
pub struct DomainReport {
    pub verdict: Verdict,
    pub counts: SeverityCounts,
    pub data: AuditData,
}

pub fn entry_severity(entry: &AuditEntry, cfg: &EffectiveConfig) -> Severity {
    if entry.allowed {
        return Severity::Info;
    }
    cfg.severity_for(&entry.classification)
}

/// Verdict over a finished audit: any error fails, any warning warns.
pub fn summarize(entries: &[AuditEntry], cfg: &EffectiveConfig) -> DomainReport {
    let mut counts = SeverityCounts::default();
    for entry in entries {
        match entry_severity(entry, cfg) {
            Severity::Info => counts.info += 1,
            Severity::Warning => counts.warning += 1,
            Severity::Error => counts.error += 1,
        }
    }

    let verdict = if counts.error > 0 {
        Verdict::Fail
    } else if counts.warning > 0 {
        Verdict::Warn
    } else {
        Verdict::Pass
    };

    DomainReport {
        verdict,
        data: AuditData::from_entries(&cfg.profile, entries),
        counts,
    }
}
