//! Upload file storage.
//!
//! Uploaded bytes live under a single directory, named by the owning item's
//! id. The client filename is never used on disk.

use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

use crate::errors::{Result, SharekeyError};

#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the upload directory if it does not exist yet.
    pub async fn ensure_root(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            SharekeyError::file_operation(format!(
                "Failed to create upload directory {}: {}",
                self.root.display(),
                e
            ))
        })
    }

    pub fn path_for(&self, id: &Uuid) -> PathBuf {
        self.root.join(id.to_string())
    }

    pub async fn save(&self, id: &Uuid, bytes: &[u8]) -> Result<()> {
        let path = self.path_for(id);
        tokio::fs::write(&path, bytes).await.map_err(|e| {
            SharekeyError::file_operation(format!("Failed to write {}: {}", path.display(), e))
        })?;
        debug!("Stored {} bytes at {}", bytes.len(), path.display());
        Ok(())
    }

    pub async fn open(&self, id: &Uuid) -> std::io::Result<tokio::fs::File> {
        tokio::fs::File::open(self.path_for(id)).await
    }

    /// Delete stored bytes. A missing file is success, not an error;
    /// returns whether anything was actually deleted.
    pub async fn remove(&self, id: &Uuid) -> Result<bool> {
        let path = self.path_for(id);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(SharekeyError::file_operation(format!(
                "Failed to delete {}: {}",
                path.display(),
                e
            ))),
        }
    }
}
