use crate::BucketPolicySource;
use bucketguard_domain::model::{PolicyDocument, PolicyInput, PublicAccessBlockInput};
use bucketguard_types::PublicAccessBlock;
use std::collections::BTreeMap;

/// In-memory source for embedders and tests. Unknown buckets have no policy.
#[derive(Clone, Debug, Default)]
pub struct StaticSource {
    policies: BTreeMap<String, PolicyInput>,
    access_blocks: BTreeMap<String, PublicAccessBlockInput>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, bucket: &str, doc: PolicyDocument) -> Self {
        self.policies
            .insert(bucket.to_string(), PolicyInput::Document(doc));
        self
    }

    pub fn with_fetch_error(mut self, bucket: &str, message: &str) -> Self {
        self.policies.insert(
            bucket.to_string(),
            PolicyInput::FetchError(message.to_string()),
        );
        self
    }

    pub fn with_access_block(mut self, bucket: &str, pab: PublicAccessBlock) -> Self {
        self.access_blocks
            .insert(bucket.to_string(), PublicAccessBlockInput::Configured(pab));
        self
    }

    /// Buckets with a recorded policy outcome, sorted.
    pub fn buckets(&self) -> Vec<String> {
        self.policies.keys().cloned().collect()
    }
}

impl BucketPolicySource for StaticSource {
    fn fetch_policy(&self, bucket: &str) -> PolicyInput {
        self.policies
            .get(bucket)
            .cloned()
            .unwrap_or(PolicyInput::NoPolicy)
    }

    fn fetch_public_access_block(&self, bucket: &str) -> PublicAccessBlockInput {
        self.access_blocks
            .get(bucket)
            .cloned()
            .unwrap_or(PublicAccessBlockInput::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_bucket_has_no_policy() {
        let source = StaticSource::new().with_fetch_error("locked", "Access Denied");
        assert_eq!(source.fetch_policy("other"), PolicyInput::NoPolicy);
        assert_eq!(
            source.fetch_policy("locked"),
            PolicyInput::FetchError("Access Denied".to_string())
        );
        assert_eq!(source.buckets(), vec!["locked".to_string()]);
    }
}
