//! Bucket policy sources: where policy documents come from.
//!
//! A source answers, per bucket, with a policy document, an explicit "no policy", or the
//! provider's error message. It never decides whether a policy is public; that is the
//! domain crate's job.

#![forbid(unsafe_code)]

mod directory;
mod error;
mod memory;
mod parse;
#[cfg(feature = "aws")]
mod s3;

use bucketguard_domain::model::{PolicyInput, PublicAccessBlockInput};

pub use directory::DirectorySource;
pub use error::SourceError;
pub use memory::StaticSource;
pub use parse::{parse_access_block, parse_policy_document};
#[cfg(feature = "aws")]
pub use s3::S3Source;

/// Upstream collaborator of the evaluator.
///
/// Implementations map the provider's "no such policy" answer to
/// [`PolicyInput::NoPolicy`] and every other failure to [`PolicyInput::FetchError`]
/// with the provider's message. They must not panic or abort on a single bucket.
pub trait BucketPolicySource {
    fn fetch_policy(&self, bucket: &str) -> PolicyInput;

    fn fetch_public_access_block(&self, bucket: &str) -> PublicAccessBlockInput {
        let _ = bucket;
        PublicAccessBlockInput::Unavailable("public access block not supported by this source".into())
    }
}

/// Fuzz-friendly API for testing parsing robustness without filesystem access.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    /// Parse arbitrary text as a bucket policy document.
    ///
    /// Returns `Ok(())` on valid JSON, `Err(...)` otherwise. **Never panics** on any input.
    pub fn parse_policy(text: &str) -> Result<(), crate::SourceError> {
        let _ = crate::parse_policy_document(text)?;
        Ok(())
    }
}
