//! Fuzz target for bucket policy parsing and evaluation.
//!
//! Goal: neither the lenient parser nor the evaluator may **panic** on any input.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_policy_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = bucketguard_source::fuzz::parse_policy(text);

        // First line doubles as the bucket name so resource matching sees odd ARNs too.
        if let Ok(doc) = bucketguard_source::parse_policy_document(text) {
            let bucket = text.lines().next().unwrap_or_default();
            let _ = bucketguard_domain::evaluate_document(bucket, &doc);
            let _ = bucketguard_domain::matching_statement(bucket, &doc);
        }
    }
});
