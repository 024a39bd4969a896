use std::path::PathBuf;

use thiserror::Error;

/// Failures loading static assets at startup.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Failed to read index document {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Index document {0} is empty")]
    Empty(PathBuf),
}
