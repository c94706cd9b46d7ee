use crate::{model::BucketguardConfigV1, presets};
use anyhow::Context;
use bucketguard_domain::policy::{EffectiveConfig, Severity};
use bucketguard_types::explain;
use globset::Glob;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub access_block: Option<bool>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

pub fn resolve_config(
    cfg: BucketguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| presets::DEFAULT_PROFILE.to_string());

    let mut effective = presets::preset(&profile)?;

    if let Some(access_block) = overrides.access_block.or(cfg.access_block) {
        effective.access_block = access_block;
    }

    if !cfg.allow.is_empty() {
        validate_allowlist(&cfg.allow)?;
        effective.allow = cfg.allow.clone();
    }

    // per-code severity
    for (code, sev) in cfg.severity.iter() {
        if !explain::all_codes().contains(&code.as_str()) {
            anyhow::bail!("unknown classification code in [severity]: {code}");
        }
        let severity =
            parse_severity(sev).with_context(|| format!("invalid severity for {code}"))?;
        effective.severities.insert(code.clone(), severity);
    }

    Ok(ResolvedConfig { effective })
}

fn validate_allowlist(patterns: &[String]) -> anyhow::Result<()> {
    for pattern in patterns {
        Glob::new(pattern).with_context(|| format!("invalid allow glob: {pattern}"))?;
    }
    Ok(())
}

fn parse_severity(v: &str) -> anyhow::Result<Severity> {
    match v {
        "info" => Ok(Severity::Info),
        "warning" | "warn" => Ok(Severity::Warning),
        "error" => Ok(Severity::Error),
        other => anyhow::bail!("unknown severity: {other} (expected info|warning|error)"),
    }
}
