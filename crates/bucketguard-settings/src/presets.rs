use bucketguard_domain::policy::{EffectiveConfig, Severity};

pub const DEFAULT_PROFILE: &str = "strict";

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything bucket-specific goes into the config file.
pub fn preset(profile: &str) -> anyhow::Result<EffectiveConfig> {
    match profile {
        "strict" => Ok(strict_profile()),
        "report" => Ok(report_profile()),
        other => anyhow::bail!("unknown profile: {other} (expected strict|report)"),
    }
}

/// Any unexpected public bucket fails the audit.
fn strict_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "strict".to_string(),
        severities: EffectiveConfig::default_severities(Severity::Error),
        allow: Vec::new(),
        access_block: false,
    }
}

/// Inventory mode: public buckets only warn.
fn report_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "report".to_string(),
        severities: EffectiveConfig::default_severities(Severity::Warning),
        allow: Vec::new(),
        access_block: false,
    }
}
