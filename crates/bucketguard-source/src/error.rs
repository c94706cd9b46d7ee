use camino::Utf8PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("read {path}: {source}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed policy document: {0}")]
    MalformedPolicy(#[from] serde_json::Error),

    #[error("malformed public access block: {0}")]
    MalformedAccessBlock(#[source] serde_json::Error),

    #[error("invalid bucket name: {0:?}")]
    InvalidBucketName(String),

    #[error("walk {root}: {source}")]
    Walk {
        root: Utf8PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[cfg(feature = "aws")]
    #[error("start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}
