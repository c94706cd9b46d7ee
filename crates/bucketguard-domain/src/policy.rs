use bucketguard_types::{ids, Classification};
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    pub profile: String,
    /// Classification code -> severity. Codes not listed are `Info`.
    pub severities: BTreeMap<String, Severity>,
    /// Bucket name globs whose public read is expected.
    pub allow: Vec<String>,
    /// Also look up each bucket's public access block.
    pub access_block: bool,
}

impl EffectiveConfig {
    pub fn severity_for(&self, classification: &Classification) -> Severity {
        self.severities
            .get(classification.code())
            .copied()
            .unwrap_or(Severity::Info)
    }

    /// Default severities: public read at `public`, fetch errors at `Warning`.
    pub fn default_severities(public: Severity) -> BTreeMap<String, Severity> {
        let mut m = BTreeMap::new();
        m.insert(ids::CODE_PUBLICLY_READABLE.to_string(), public);
        m.insert(ids::CODE_FETCH_ERROR.to_string(), Severity::Warning);
        m.insert(ids::CODE_NOT_PUBLICLY_READABLE.to_string(), Severity::Info);
        m.insert(ids::CODE_NO_POLICY.to_string(), Severity::Info);
        m
    }
}
