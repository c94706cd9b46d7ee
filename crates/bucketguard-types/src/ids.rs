//! Stable identifiers for classifications.
//!
//! Codes are short snake_case discriminators and appear verbatim in JSON reports.

// Classifications
pub const CODE_PUBLICLY_READABLE: &str = "publicly_readable";
pub const CODE_NOT_PUBLICLY_READABLE: &str = "not_publicly_readable";
pub const CODE_NO_POLICY: &str = "no_policy";
pub const CODE_FETCH_ERROR: &str = "fetch_error";

// Policy vocabulary matched by the evaluator.
pub const ACTION_GET_OBJECT: &str = "s3:GetObject";
pub const PRINCIPAL_WILDCARD: &str = "*";
pub const PRINCIPAL_AWS_KEY: &str = "AWS";

/// Every object in `bucket`, in the exact form a public-read statement names it.
pub fn bucket_objects_arn(bucket: &str) -> String {
    format!("arn:aws:s3:::{bucket}/*")
}
