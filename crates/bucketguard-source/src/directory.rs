use crate::parse::{parse_access_block, parse_policy_document};
use crate::{BucketPolicySource, SourceError};
use bucketguard_domain::model::{PolicyInput, PublicAccessBlockInput};
use camino::{Utf8Path, Utf8PathBuf};
use std::io::ErrorKind;
use tracing::debug;
use walkdir::WalkDir;

const POLICY_SUFFIX: &str = ".json";
/// Subdirectory holding access blocks, so no bucket name can collide with them.
const ACCESS_BLOCK_DIR: &str = "access-block";

/// Policies captured on disk, one file per bucket:
///
/// - `<root>/<bucket>.json`: the bucket policy (bare, or `get-bucket-policy` output)
/// - `<root>/access-block/<bucket>.json`: the public access block (optional)
///
/// A missing policy file means the bucket has no policy.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    root: Utf8PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn policy_path(&self, bucket: &str) -> Result<Utf8PathBuf, SourceError> {
        validate_bucket_name(bucket)?;
        Ok(self.root.join(format!("{bucket}{POLICY_SUFFIX}")))
    }

    pub fn access_block_path(&self, bucket: &str) -> Result<Utf8PathBuf, SourceError> {
        validate_bucket_name(bucket)?;
        Ok(self
            .root
            .join(ACCESS_BLOCK_DIR)
            .join(format!("{bucket}{POLICY_SUFFIX}")))
    }

    /// Bucket names with a policy file directly under the root, sorted.
    ///
    /// Only regular files are considered, so the access-block directory is skipped.
    pub fn discover_buckets(&self) -> Result<Vec<String>, SourceError> {
        let mut out = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|source| SourceError::Walk {
                root: self.root.clone(),
                source,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            if let Some(bucket) = name.strip_suffix(POLICY_SUFFIX)
                && !bucket.is_empty()
            {
                out.push(bucket.to_string());
            }
        }
        out.sort();
        out.dedup();
        Ok(out)
    }

    fn read(&self, path: &Utf8Path) -> Result<Option<String>, SourceError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SourceError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl BucketPolicySource for DirectorySource {
    fn fetch_policy(&self, bucket: &str) -> PolicyInput {
        let loaded = self
            .policy_path(bucket)
            .and_then(|path| self.read(&path))
            .and_then(|text| text.map(|t| parse_policy_document(&t)).transpose());

        match loaded {
            Ok(Some(doc)) => {
                debug!(bucket, statements = doc.statements.len(), "loaded policy");
                PolicyInput::Document(doc)
            }
            Ok(None) => {
                debug!(bucket, "no policy file");
                PolicyInput::NoPolicy
            }
            Err(err) => PolicyInput::FetchError(err.to_string()),
        }
    }

    fn fetch_public_access_block(&self, bucket: &str) -> PublicAccessBlockInput {
        let loaded = self
            .access_block_path(bucket)
            .and_then(|path| self.read(&path))
            .and_then(|text| text.map(|t| parse_access_block(&t)).transpose());

        match loaded {
            Ok(Some(pab)) => PublicAccessBlockInput::Configured(pab),
            Ok(None) => PublicAccessBlockInput::NotConfigured,
            Err(err) => PublicAccessBlockInput::Unavailable(err.to_string()),
        }
    }
}

/// Bucket names never contain path separators; refusing them keeps lookups inside the root.
fn validate_bucket_name(bucket: &str) -> Result<(), SourceError> {
    let invalid = bucket.is_empty()
        || bucket.contains('/')
        || bucket.contains('\\')
        || bucket == "."
        || bucket == "..";
    if invalid {
        return Err(SourceError::InvalidBucketName(bucket.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Utf8Path, name: &str, text: &str) {
        std::fs::write(dir.join(name), text).expect("write fixture");
    }

    fn temp_root() -> (tempfile::TempDir, Utf8PathBuf) {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path").to_path_buf();
        (tmp, root)
    }

    #[test]
    fn missing_file_is_no_policy() {
        let (_tmp, root) = temp_root();
        let source = DirectorySource::new(root);
        assert_eq!(source.fetch_policy("absent"), PolicyInput::NoPolicy);
        assert_eq!(
            source.fetch_public_access_block("absent"),
            PublicAccessBlockInput::NotConfigured
        );
    }

    #[test]
    fn malformed_file_is_fetch_error() {
        let (_tmp, root) = temp_root();
        write(&root, "broken.json", "{ not json");
        let source = DirectorySource::new(root);
        match source.fetch_policy("broken") {
            PolicyInput::FetchError(msg) => assert!(msg.contains("malformed policy document")),
            other => panic!("expected fetch error, got {other:?}"),
        }
    }

    #[test]
    fn path_like_bucket_names_are_rejected() {
        let (_tmp, root) = temp_root();
        let source = DirectorySource::new(root);
        for bucket in ["../etc/passwd", "a/b", "..", ""] {
            assert!(
                matches!(source.fetch_policy(bucket), PolicyInput::FetchError(_)),
                "bucket {bucket:?} should be rejected"
            );
        }
    }

    #[test]
    fn discovers_policy_files_only() {
        let (_tmp, root) = temp_root();
        write(&root, "b-bucket.json", "{}");
        write(&root, "a-bucket.json", "{}");
        std::fs::create_dir(root.join(ACCESS_BLOCK_DIR)).expect("mkdir");
        write(&root.join(ACCESS_BLOCK_DIR), "a-bucket.json", "{}");
        write(&root, "notes.txt", "ignore me");
        std::fs::create_dir(root.join("nested.json")).expect("mkdir");

        let source = DirectorySource::new(root);
        assert_eq!(
            source.discover_buckets().expect("discover"),
            vec!["a-bucket", "b-bucket"]
        );
    }

    #[test]
    fn bucket_names_ending_in_pab_are_policies() {
        let (_tmp, root) = temp_root();
        write(
            &root,
            "logs.pab.json",
            r#"{"Statement":{"Effect":"Allow","Principal":"*","Action":"s3:GetObject","Resource":"arn:aws:s3:::logs.pab/*"}}"#,
        );
        let source = DirectorySource::new(root);

        assert_eq!(source.discover_buckets().expect("discover"), vec!["logs.pab"]);
        assert!(matches!(
            source.fetch_policy("logs.pab"),
            PolicyInput::Document(_)
        ));
        assert_eq!(
            source.fetch_public_access_block("logs"),
            PublicAccessBlockInput::NotConfigured
        );
    }

    #[test]
    fn access_block_lives_in_its_own_directory() {
        let (_tmp, root) = temp_root();
        let dir = root.join(ACCESS_BLOCK_DIR);
        std::fs::create_dir(&dir).expect("mkdir");
        write(&dir, "site.json", r#"{"BlockPublicAcls": true}"#);
        let source = DirectorySource::new(root.clone());

        assert_eq!(
            source.access_block_path("site").expect("path"),
            root.join("access-block").join("site.json")
        );
        match source.fetch_public_access_block("site") {
            PublicAccessBlockInput::Configured(pab) => {
                assert_eq!(pab.block_public_acls, Some(true))
            }
            other => panic!("expected configured access block, got {other:?}"),
        }
        assert_eq!(source.discover_buckets().expect("discover"), Vec::<String>::new());
    }
}
