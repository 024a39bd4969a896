use std::path::{Path, PathBuf};

use axum::response::{Html, IntoResponse, Response};
use bytes::Bytes;
use tracing::{info, warn};

use crate::config::Config;
use crate::errors::AssetError;

const BUNDLED_INDEX: &[u8] = include_bytes!("../static/index.html");

/// The single-page-application shell served for every non-API route.
/// Contents are opaque; clones share the same buffer.
#[derive(Debug, Clone)]
pub struct IndexDocument {
    bytes: Bytes,
}

impl IndexDocument {
    pub fn bundled() -> Self {
        Self {
            bytes: Bytes::from_static(BUNDLED_INDEX),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, AssetError> {
        let contents = std::fs::read(path).map_err(|source| AssetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if contents.is_empty() {
            return Err(AssetError::Empty(path.to_path_buf()));
        }
        Ok(Self {
            bytes: Bytes::from(contents),
        })
    }

    /// Resolution order: `INDEX_HTML_PATH`, then `STATIC_DIR/index.html`, then the bundled copy.
    pub fn load(config: &Config) -> Result<Self, AssetError> {
        if let Some(path) = &config.index_html_path {
            let index = Self::from_file(path)?;
            info!(path = %path.display(), "Index document loaded from override");
            return Ok(index);
        }

        if let Some(dir) = &config.static_dir {
            let candidate: PathBuf = dir.join("index.html");
            if candidate.is_file() {
                let index = Self::from_file(&candidate)?;
                info!(path = %candidate.display(), "Index document loaded from static dir");
                return Ok(index);
            }
            warn!(
                dir = %dir.display(),
                "No index.html in static dir, using bundled index document"
            );
        }

        info!("Using bundled index document");
        Ok(Self::bundled())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl IntoResponse for IndexDocument {
    fn into_response(self) -> Response {
        Html(self.bytes).into_response()
    }
}
