use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `PublicAccessBlockConfiguration` as the provider reports it.
///
/// Every flag is optional; an absent flag is reported as `NOT SET`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct PublicAccessBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_public_acls: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_public_acls: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_public_policy: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restrict_public_buckets: Option<bool>,
}

impl PublicAccessBlock {
    /// True only when all four flags are explicitly enabled.
    pub fn fully_blocked(&self) -> bool {
        self.flags().iter().all(|f| *f == Some(true))
    }

    /// Flags in report column order.
    pub fn flags(&self) -> [Option<bool>; 4] {
        [
            self.block_public_acls,
            self.ignore_public_acls,
            self.block_public_policy,
            self.restrict_public_buckets,
        ]
    }
}

/// Per-bucket public access block state carried into reports.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AccessBlockSummary {
    Set {
        flags: PublicAccessBlock,
        fully_blocked: bool,
    },
    NotSet,
    Unavailable {
        message: String,
    },
}

impl AccessBlockSummary {
    /// Short column value: `SET`, `NOT SET` or `ERROR`.
    pub fn label(&self) -> &'static str {
        match self {
            AccessBlockSummary::Set { .. } => "SET",
            AccessBlockSummary::NotSet => "NOT SET",
            AccessBlockSummary::Unavailable { .. } => "ERROR",
        }
    }

    /// One column per flag, in `PublicAccessBlock::flags` order.
    pub fn flag_columns(&self) -> [String; 4] {
        match self {
            AccessBlockSummary::Set { flags, .. } => flags.flags().map(|f| match f {
                Some(v) => v.to_string(),
                None => "NOT SET".to_string(),
            }),
            AccessBlockSummary::NotSet => std::array::from_fn(|_| "NOT SET".to_string()),
            AccessBlockSummary::Unavailable { .. } => std::array::from_fn(|_| "ERROR".to_string()),
        }
    }
}
