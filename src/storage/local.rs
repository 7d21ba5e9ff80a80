//! Local filesystem image store.

use std::io;
use std::path::{Component, Path, PathBuf};

use axum::async_trait;
use tracing::debug;
use uuid::Uuid;

use super::ImageStore;
use crate::{BoardError, Result};

/// Image store writing into a local directory.
///
/// Files are stored in a sharded directory structure per namespace:
/// ```text
/// {base_path}/
/// └── board/
///     ├── ab/
///     │   └── ab12cd34-5678-90ab-cdef-123456789012.png
///     └── ...
/// ```
/// and published as `{public_url}/board/ab/ab12cd34-....png`.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    base_path: PathBuf,
    public_url: String,
}

impl LocalImageStore {
    /// Create a new LocalImageStore.
    ///
    /// The base directory will be created if it doesn't exist.
    pub fn new(base_path: impl Into<PathBuf>, public_url: impl Into<String>) -> Result<Self> {
        let base_path = base_path.into();
        std::fs::create_dir_all(&base_path)?;

        let public_url = public_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            base_path,
            public_url,
        })
    }

    /// Get the base path of this store.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Get the public URL prefix of this store.
    pub fn public_url(&self) -> &str {
        &self.public_url
    }

    /// Map a public URL back to its file path.
    ///
    /// Returns None for URLs outside this store or with unsafe segments.
    pub fn resolve(&self, url: &str) -> Option<PathBuf> {
        let relative = url.strip_prefix(&self.public_url)?.strip_prefix('/')?;
        let relative = Path::new(relative);
        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return None;
        }
        Some(self.base_path.join(relative))
    }

    /// Generate a new UUID-based stored name keeping the original extension.
    fn generate_stored_name(original_name: &str) -> String {
        let ext = Self::extract_extension(original_name);
        format!("{}.{ext}", Uuid::new_v4())
    }

    /// Extract the lower-cased file extension, "bin" when there is none.
    fn extract_extension(filename: &str) -> String {
        Path::new(filename)
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase())
            .unwrap_or_else(|| "bin".to_string())
    }

    fn validate_namespace(namespace: &str) -> Result<()> {
        let valid = !namespace.is_empty()
            && namespace
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
        if valid {
            Ok(())
        } else {
            Err(BoardError::Storage(format!("invalid namespace: {namespace}")))
        }
    }
}

/// Check that a file name looks like an image.
pub(crate) fn is_image_file_name(file_name: &str) -> bool {
    mime_guess::from_path(file_name)
        .first()
        .map(|mime| mime.type_() == mime_guess::mime::IMAGE)
        .unwrap_or(false)
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn upload(&self, content: &[u8], file_name: &str, namespace: &str) -> Result<String> {
        Self::validate_namespace(namespace)?;
        if content.is_empty() {
            return Err(BoardError::Validation("image is empty".to_string()));
        }
        if !is_image_file_name(file_name) {
            return Err(BoardError::Validation(format!(
                "not an image file: {file_name}"
            )));
        }

        let stored_name = Self::generate_stored_name(file_name);
        let shard = &stored_name[..2];
        let dir = self.base_path.join(namespace).join(shard);

        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| BoardError::Storage(format!("failed to create {dir:?}: {e}")))?;
        tokio::fs::write(dir.join(&stored_name), content)
            .await
            .map_err(|e| BoardError::Storage(format!("failed to write image: {e}")))?;

        let url = format!("{}/{namespace}/{shard}/{stored_name}", self.public_url);
        debug!(url = %url, size = content.len(), "Stored image");
        Ok(url)
    }

    async fn remove(&self, url: &str) -> Result<bool> {
        let Some(path) = self.resolve(url) else {
            return Ok(false);
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!(url = %url, "Removed image");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(BoardError::Storage(format!("failed to remove image: {e}"))),
        }
    }
}
