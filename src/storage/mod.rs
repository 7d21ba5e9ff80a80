//! Image storage for miniboard.
//!
//! Uploaded images are handed to an [`ImageStore`], which returns the public
//! URL the image can be fetched from. The board stores that URL and passes it
//! back to [`ImageStore::remove`] when the post goes away.

mod local;

pub use local::LocalImageStore;

use axum::async_trait;

use crate::Result;

/// Namespace under which post images are stored.
pub const BOARD_NAMESPACE: &str = "board";

/// Object storage for uploaded images.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store an image and return its public URL.
    ///
    /// `file_name` is the client-supplied name; only its extension is kept.
    async fn upload(&self, content: &[u8], file_name: &str, namespace: &str) -> Result<String>;

    /// Remove a previously uploaded image by URL.
    ///
    /// Returns false if nothing was stored under that URL.
    async fn remove(&self, url: &str) -> Result<bool>;
}
