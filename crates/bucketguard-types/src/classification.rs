use crate::ids;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of evaluating one bucket.
///
/// Produced fresh per evaluation and never persisted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum Classification {
    PubliclyReadable,
    NotPubliclyReadable,
    NoPolicy,
    /// The provider's error message, unchanged.
    FetchError(String),
}

impl Classification {
    pub fn code(&self) -> &'static str {
        match self {
            Classification::PubliclyReadable => ids::CODE_PUBLICLY_READABLE,
            Classification::NotPubliclyReadable => ids::CODE_NOT_PUBLICLY_READABLE,
            Classification::NoPolicy => ids::CODE_NO_POLICY,
            Classification::FetchError(_) => ids::CODE_FETCH_ERROR,
        }
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Classification::PubliclyReadable)
    }

    pub fn is_fetch_error(&self) -> bool {
        matches!(self, Classification::FetchError(_))
    }
}

/// Report label, as it appears in the `Permission` column.
impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::PubliclyReadable => f.write_str("Publicly Readable (Read-Only)"),
            Classification::NotPubliclyReadable => f.write_str("Not Publicly Readable"),
            Classification::NoPolicy => f.write_str("No Bucket Policy"),
            Classification::FetchError(message) => write!(f, "Error: {message}"),
        }
    }
}
