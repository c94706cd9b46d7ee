//! The `audit` use case: classify every bucket and hand each result to a sink.

use anyhow::Context;
use bucketguard_domain::{assess, summarize, Allowlist};
use bucketguard_render::ReportSink;
use bucketguard_settings::{Overrides, ResolvedConfig};
use bucketguard_source::BucketPolicySource;
use bucketguard_types::{AuditReport, Classification, ToolMeta, Verdict, SCHEMA_REPORT_V1};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

/// Input for the audit use case.
#[derive(Clone, Debug)]
pub struct AuditInput<'a> {
    /// Buckets to audit, in report order.
    pub buckets: &'a [String],
    /// Resolved configuration (see [`load_config`]).
    pub config: &'a ResolvedConfig,
}

/// Output from the audit use case.
#[derive(Clone, Debug)]
pub struct AuditOutput {
    pub report: AuditReport,
}

/// Parse and resolve config text. Empty text means defaults.
pub fn load_config(config_text: &str, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    let cfg = if config_text.trim().is_empty() {
        bucketguard_settings::BucketguardConfigV1::default()
    } else {
        bucketguard_settings::parse_config_toml(config_text).context("parse config")?
    };

    bucketguard_settings::resolve_config(cfg, overrides).context("resolve config")
}

/// Run the audit: fetch, classify, and record each bucket in order.
///
/// A fetch error for one bucket is recorded and the loop moves on; only sink
/// failures abort the run.
pub fn run_audit(
    input: AuditInput<'_>,
    source: &dyn BucketPolicySource,
    sink: &mut dyn ReportSink,
) -> anyhow::Result<AuditOutput> {
    let started_at = OffsetDateTime::now_utc();
    let effective = &input.config.effective;

    let allow = Allowlist::new(&effective.allow).context("compile allowlist")?;

    info!(
        buckets = input.buckets.len(),
        profile = %effective.profile,
        "starting audit"
    );

    let mut entries = Vec::with_capacity(input.buckets.len());
    for bucket in input.buckets {
        let policy = source.fetch_policy(bucket);
        let access_block = effective
            .access_block
            .then(|| source.fetch_public_access_block(bucket));

        let entry = assess(bucket, &policy, access_block.as_ref(), &allow);
        match &entry.classification {
            Classification::FetchError(message) => {
                warn!(bucket = %bucket, %message, "could not fetch bucket policy");
            }
            Classification::PubliclyReadable if !entry.allowed => {
                warn!(
                    bucket = %bucket,
                    statement = entry.matched_statement,
                    "bucket is publicly readable"
                );
            }
            other => debug!(bucket = %bucket, classification = other.code(), "classified"),
        }

        sink.record(&entry)
            .with_context(|| format!("write report entry for {bucket}"))?;
        entries.push(entry);
    }
    sink.finish().context("finish report")?;

    let domain = summarize(&entries, effective);
    let finished_at = OffsetDateTime::now_utc();

    info!(
        verdict = ?domain.verdict,
        publicly_readable = domain.data.publicly_readable,
        fetch_errors = domain.data.fetch_errors,
        "audit finished"
    );

    Ok(AuditOutput {
        report: AuditReport {
            schema: SCHEMA_REPORT_V1.to_string(),
            tool: ToolMeta {
                name: "bucketguard".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            started_at,
            finished_at,
            verdict: domain.verdict,
            entries,
            data: domain.data,
        },
    })
}

/// Map verdict to exit code: 0 = pass/warn, 2 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Warn => 0,
        Verdict::Fail => 2,
    }
}
