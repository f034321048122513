//! Local filesystem blob store
//!
//! Blobs live under `<root>/<category dir>/<uuid><.ext>`, the same layout the
//! `/uploads` static route serves.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, instrument, warn};
use tube_core::error::DomainError;
use tube_core::traits::{BlobStore, RepoResult};
use tube_core::value_objects::BlobCategory;
use uuid::Uuid;

const MAX_EXTENSION_LEN: usize = 10;

/// Blob store backed by a directory on the local filesystem
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create every category directory so later writes can assume they exist
    pub async fn prepare(&self) -> RepoResult<()> {
        for category in BlobCategory::ALL {
            let dir = self.category_dir(category);
            tokio::fs::create_dir_all(&dir)
                .await
                .map_err(|e| storage_error("creating", &dir, &e))?;
        }
        Ok(())
    }

    fn category_dir(&self, category: BlobCategory) -> PathBuf {
        self.root.join(category.dir_name())
    }

    /// Resolve a stored filename, refusing anything that could leave the category dir
    fn blob_path(&self, category: BlobCategory, filename: &str) -> RepoResult<PathBuf> {
        if filename.is_empty()
            || filename.contains(['/', '\\'])
            || filename == "."
            || filename == ".."
        {
            return Err(DomainError::StorageError(format!(
                "invalid blob name: {filename}"
            )));
        }
        Ok(self.category_dir(category).join(filename))
    }
}

/// Generated name keeping a sanitized copy of the client's extension
fn generate_filename(original_name: &str) -> String {
    let extension = Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| {
            !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .map(str::to_ascii_lowercase);

    match extension {
        Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
        None => Uuid::new_v4().to_string(),
    }
}

fn storage_error(action: &str, path: &Path, err: &std::io::Error) -> DomainError {
    DomainError::StorageError(format!("{action} {}: {err}", path.display()))
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn store(
        &self,
        category: BlobCategory,
        original_name: &str,
        bytes: &[u8],
    ) -> RepoResult<String> {
        let filename = generate_filename(original_name);
        let dir = self.category_dir(category);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| storage_error("creating", &dir, &e))?;

        let path = dir.join(&filename);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| storage_error("writing", &path, &e))?;

        debug!(path = %path.display(), "Blob stored");
        Ok(filename)
    }

    #[instrument(skip(self))]
    async fn remove(&self, category: BlobCategory, filename: &str) -> RepoResult<()> {
        let path = self.blob_path(category, filename)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "Blob already gone");
                Ok(())
            }
            Err(e) => Err(storage_error("removing", &path, &e)),
        }
    }
}
