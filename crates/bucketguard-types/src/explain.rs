//! Explain registry for classification codes.
//!
//! Maps codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a classification code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the code.
    pub title: &'static str,
    /// What the classification means.
    pub description: &'static str,
    /// What to do about it.
    pub remediation: &'static str,
    /// Before/after policy examples.
    pub examples: ExamplePair,
}

/// Before and after policy snippets.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Policy that produces the classification.
    pub before: &'static str,
    /// Policy after remediation.
    pub after: &'static str,
}

/// Look up an explanation by code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        ids::CODE_PUBLICLY_READABLE => Some(explain_publicly_readable()),
        ids::CODE_NOT_PUBLICLY_READABLE => Some(explain_not_publicly_readable()),
        ids::CODE_NO_POLICY => Some(explain_no_policy()),
        ids::CODE_FETCH_ERROR => Some(explain_fetch_error()),
        _ => None,
    }
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_PUBLICLY_READABLE,
        ids::CODE_NOT_PUBLICLY_READABLE,
        ids::CODE_NO_POLICY,
        ids::CODE_FETCH_ERROR,
    ]
}

const PUBLIC_READ_POLICY: &str = r#"{
  "Statement": [{
    "Effect": "Allow",
    "Principal": "*",
    "Action": "s3:GetObject",
    "Resource": "arn:aws:s3:::my-bucket/*"
  }]
}"#;

const SCOPED_READ_POLICY: &str = r#"{
  "Statement": [{
    "Effect": "Allow",
    "Principal": { "AWS": "arn:aws:iam::123456789012:role/reader" },
    "Action": "s3:GetObject",
    "Resource": "arn:aws:s3:::my-bucket/*"
  }]
}"#;

fn explain_publicly_readable() -> Explanation {
    Explanation {
        title: "Publicly Readable (Read-Only)",
        description: "\
The bucket policy contains an `Allow` statement that grants `s3:GetObject` on
every object of the bucket (`arn:aws:s3:::<bucket>/*`) to the wildcard principal,
either `\"*\"` or `{\"AWS\": \"*\"}`. Anyone, unauthenticated requesters included,
can download the bucket's objects.

Deny statements are not taken into account: a qualifying Allow is reported even
when another statement denies the same access.",
        remediation: "\
If the bucket is meant to be public (static website, public dataset), add it to
the profile allowlist in `bucketguard.toml`. Otherwise replace the wildcard
principal with the specific roles or accounts that need read access, and enable
the bucket's public access block.",
        examples: ExamplePair {
            before: PUBLIC_READ_POLICY,
            after: SCOPED_READ_POLICY,
        },
    }
}

fn explain_not_publicly_readable() -> Explanation {
    Explanation {
        title: "Not Publicly Readable",
        description: "\
The bucket has a policy, but no statement grants wildcard `s3:GetObject` access to
all of the bucket's objects. Matching is exact: `s3:Get*`, `s3:*` or a `*`
resource are not recognized as public read grants.",
        remediation: "No action needed.",
        examples: ExamplePair {
            before: SCOPED_READ_POLICY,
            after: SCOPED_READ_POLICY,
        },
    }
}

fn explain_no_policy() -> Explanation {
    Explanation {
        title: "No Bucket Policy",
        description: "\
The provider reported that no policy is attached to the bucket
(`NoSuchBucketPolicy`). Access is governed by ACLs and IAM only.",
        remediation: "\
No action needed for policy-based exposure. Review the bucket ACLs and public
access block separately.",
        examples: ExamplePair {
            before: "(no policy attached)",
            after: "(no policy attached)",
        },
    }
}

fn explain_fetch_error() -> Explanation {
    Explanation {
        title: "Error Fetching Bucket Policy",
        description: "\
The policy could not be retrieved or decoded. The provider's message is reported
verbatim. Other buckets are still audited.",
        remediation: "\
Check that the credentials in use have `s3:GetBucketPolicy` on the bucket and that
the bucket lives in a reachable region. For directory snapshots, check that the
policy file is readable JSON.",
        examples: ExamplePair {
            before: "Error: Access Denied",
            after: "Not Publicly Readable",
        },
    }
}
