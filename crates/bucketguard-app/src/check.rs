//! The `check` use case: classify one bucket and describe the result in a sentence.

use bucketguard_domain::evaluate;
use bucketguard_source::BucketPolicySource;
use bucketguard_types::Classification;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckOutput {
    pub classification: Classification,
    pub sentence: String,
}

pub fn run_check(bucket: &str, source: &dyn BucketPolicySource) -> CheckOutput {
    let classification = evaluate(bucket, &source.fetch_policy(bucket));
    debug!(bucket, classification = classification.code(), "checked");
    let sentence = describe_check(bucket, &classification);
    CheckOutput {
        classification,
        sentence,
    }
}

/// Human sentence for a single-bucket result.
pub fn describe_check(bucket: &str, classification: &Classification) -> String {
    match classification {
        Classification::PubliclyReadable => {
            format!("Bucket {bucket} is publicly readable (read-only access).")
        }
        Classification::NotPubliclyReadable => format!("Bucket {bucket} is not publicly readable."),
        Classification::NoPolicy => format!("Bucket {bucket} has no bucket policy."),
        Classification::FetchError(message) => {
            format!("Error fetching bucket policy for {bucket}: {message}")
        }
    }
}
