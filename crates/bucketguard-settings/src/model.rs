use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `bucketguard.toml` schema v1.
///
/// This is a *user-facing* config model: it is intentionally permissive so forward-compat is easy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BucketguardConfigV1 {
    /// Optional schema string for tooling (`bucketguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// `strict` (default) or `report`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Also report each bucket's public access block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_block: Option<bool>,

    /// Bucket name globs that are expected to be publicly readable.
    #[serde(default)]
    pub allow: Vec<String>,

    /// Map of classification code -> `info`, `warning` or `error`.
    #[serde(default)]
    pub severity: BTreeMap<String, String>,
}
