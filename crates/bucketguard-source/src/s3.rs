//! Live source backed by the AWS SDK.
//!
//! The SDK is async; the source owns a current-thread runtime and blocks on each
//! request so [`BucketPolicySource`] stays synchronous.

use crate::parse::parse_policy_document;
use crate::{BucketPolicySource, SourceError};
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
use bucketguard_domain::model::{PolicyInput, PublicAccessBlockInput};
use bucketguard_types::PublicAccessBlock;
use tokio::runtime::Runtime;
use tracing::debug;

const NO_SUCH_BUCKET_POLICY: &str = "NoSuchBucketPolicy";
const NO_SUCH_PUBLIC_ACCESS_BLOCK: &str = "NoSuchPublicAccessBlockConfiguration";

pub struct S3Source {
    runtime: Runtime,
    client: aws_sdk_s3::Client,
}

impl S3Source {
    /// Build a client from the default credential and region chain.
    pub fn from_env() -> Result<Self, SourceError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(SourceError::Runtime)?;
        let config =
            runtime.block_on(aws_config::load_defaults(aws_config::BehaviorVersion::latest()));
        let client = aws_sdk_s3::Client::new(&config);
        Ok(Self { runtime, client })
    }
}

impl BucketPolicySource for S3Source {
    fn fetch_policy(&self, bucket: &str) -> PolicyInput {
        let result = self
            .runtime
            .block_on(self.client.get_bucket_policy().bucket(bucket).send());

        match result {
            Ok(output) => match output.policy() {
                Some(text) => match parse_policy_document(text) {
                    Ok(doc) => PolicyInput::Document(doc),
                    Err(err) => PolicyInput::FetchError(err.to_string()),
                },
                None => PolicyInput::NoPolicy,
            },
            Err(err) => {
                let context = DisplayErrorContext(&err).to_string();
                let service = err.into_service_error();
                let input = policy_error_input(service.code(), service.message(), context);
                if matches!(input, PolicyInput::NoPolicy) {
                    debug!(bucket, "no bucket policy");
                }
                input
            }
        }
    }

    fn fetch_public_access_block(&self, bucket: &str) -> PublicAccessBlockInput {
        let result = self
            .runtime
            .block_on(self.client.get_public_access_block().bucket(bucket).send());

        match result {
            Ok(output) => match output.public_access_block_configuration() {
                Some(cfg) => PublicAccessBlockInput::Configured(PublicAccessBlock {
                    block_public_acls: cfg.block_public_acls(),
                    ignore_public_acls: cfg.ignore_public_acls(),
                    block_public_policy: cfg.block_public_policy(),
                    restrict_public_buckets: cfg.restrict_public_buckets(),
                }),
                None => PublicAccessBlockInput::NotConfigured,
            },
            Err(err) => {
                let context = DisplayErrorContext(&err).to_string();
                let service = err.into_service_error();
                access_block_error_input(service.code(), service.message(), context)
            }
        }
    }
}

/// `NoSuchBucketPolicy` means no policy; anything else carries the provider's
/// message, or the full error context when the provider sent none.
fn policy_error_input(code: Option<&str>, message: Option<&str>, context: String) -> PolicyInput {
    if code == Some(NO_SUCH_BUCKET_POLICY) {
        return PolicyInput::NoPolicy;
    }
    PolicyInput::FetchError(message.map(str::to_string).unwrap_or(context))
}

fn access_block_error_input(
    code: Option<&str>,
    message: Option<&str>,
    context: String,
) -> PublicAccessBlockInput {
    if code == Some(NO_SUCH_PUBLIC_ACCESS_BLOCK) {
        return PublicAccessBlockInput::NotConfigured;
    }
    PublicAccessBlockInput::Unavailable(message.map(str::to_string).unwrap_or(context))
}
