use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for an audit entry.
///
/// Identity fields:
/// - bucket name
/// - classification code
///
/// Fetch error messages are deliberately left out so a flapping provider
/// message does not produce a new identity.
pub fn fingerprint_for_entry(bucket: &str, code: &str) -> String {
    let canonical = [bucket, code].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_stable_and_distinguishes_codes() {
        let a = fingerprint_for_entry("bucket", "publicly_readable");
        assert_eq!(a, fingerprint_for_entry("bucket", "publicly_readable"));
        assert_eq!(a.len(), 64);
        assert_ne!(a, fingerprint_for_entry("bucket", "no_policy"));
        assert_ne!(a, fingerprint_for_entry("bucket2", "publicly_readable"));
    }
}
