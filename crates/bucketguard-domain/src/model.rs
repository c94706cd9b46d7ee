use bucketguard_types::{ids, PublicAccessBlock};
use std::collections::BTreeMap;

/// A bucket policy as fetched from the provider.
///
/// Every statement field is optional: a field that is absent or has an
/// unrecognised shape is `None` and never matches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PolicyDocument {
    /// Statements in document order.
    pub statements: Vec<Statement>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Statement {
    pub sid: Option<String>,
    pub effect: Option<Effect>,
    pub principal: Option<Principal>,
    pub action: Option<Names>,
    pub resource: Option<Names>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    Allow,
    Deny,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Principal {
    /// The literal `"*"`.
    Wildcard,
    /// Any other bare string.
    Named(String),
    /// `{"AWS": ..., "Service": ...}`
    Map(BTreeMap<String, Names>),
}

/// A single name or a list of names, as IAM allows for actions and resources.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Names {
    One(String),
    Many(Vec<String>),
}

/// What the policy source produced for one bucket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PolicyInput {
    Document(PolicyDocument),
    NoPolicy,
    /// The provider's error message, unchanged.
    FetchError(String),
}

/// What the policy source produced for a bucket's public access block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PublicAccessBlockInput {
    Configured(PublicAccessBlock),
    NotConfigured,
    Unavailable(String),
}

impl Names {
    /// Exact equality for a single name, exact membership for a list.
    pub fn is_or_contains(&self, value: &str) -> bool {
        match self {
            Names::One(name) => name == value,
            Names::Many(names) => names.iter().any(|n| n == value),
        }
    }
}

impl Principal {
    /// `"*"` or `{"AWS": "*"}`. A list such as `{"AWS": ["*"]}` does not count.
    pub fn is_anonymous(&self) -> bool {
        match self {
            Principal::Wildcard => true,
            Principal::Named(_) => false,
            Principal::Map(map) => matches!(
                map.get(ids::PRINCIPAL_AWS_KEY),
                Some(Names::One(v)) if v == ids::PRINCIPAL_WILDCARD
            ),
        }
    }
}

impl From<&str> for Names {
    fn from(value: &str) -> Self {
        Names::One(value.to_string())
    }
}

impl From<Vec<&str>> for Names {
    fn from(values: Vec<&str>) -> Self {
        Names::Many(values.into_iter().map(|v| v.to_string()).collect())
    }
}
