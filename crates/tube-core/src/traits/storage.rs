//! Blob store port - durable storage for uploaded files

use async_trait::async_trait;

use crate::traits::RepoResult;
use crate::value_objects::BlobCategory;

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store bytes under a generated name, keeping the original extension
    ///
    /// Returns the stored filename.
    async fn store(
        &self,
        category: BlobCategory,
        original_name: &str,
        bytes: &[u8],
    ) -> RepoResult<String>;

    /// Remove a stored file; removing a missing file is not an error
    async fn remove(&self, category: BlobCategory, filename: &str) -> RepoResult<()>;
}
