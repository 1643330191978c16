use std::path::{Path, PathBuf};

use crate::error::ArchiveError;

/// Filesystem collaborator for one output directory.
///
/// The base directory is never created here; the orchestrator verifies it
/// exists before any network activity.
#[derive(Clone, Debug)]
pub struct FileManager {
    base_dir: PathBuf,
}

impl FileManager {
    pub fn new(base_dir: &Path) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Check that the base directory exists and is writable.
    pub async fn verify_base_dir(&self) -> Result<(), ArchiveError> {
        let unavailable = || ArchiveError::DirectoryUnavailable {
            path: self.base_dir.clone(),
        };
        let metadata = tokio::fs::metadata(&self.base_dir)
            .await
            .map_err(|_| unavailable())?;
        if !metadata.is_dir() || metadata.permissions().readonly() {
            return Err(unavailable());
        }
        Ok(())
    }

    /// Recursively create a directory under the base directory.
    pub async fn ensure_directory(&self, relative_path: &str) -> Result<(), ArchiveError> {
        let path = self.base_dir.join(relative_path);
        tokio::fs::create_dir_all(&path)
            .await
            .map_err(|_| ArchiveError::DirectoryUnavailable { path: path.clone() })?;
        log::debug!("resource directory ensured at '{}'", path.display());
        Ok(())
    }

    pub async fn save_text(
        &self,
        relative_path: &str,
        content: &str,
    ) -> Result<PathBuf, ArchiveError> {
        self.save_bytes(relative_path, content.as_bytes()).await
    }

    pub async fn save_bytes(
        &self,
        relative_path: &str,
        content: &[u8],
    ) -> Result<PathBuf, ArchiveError> {
        let path = self.base_dir.join(relative_path);
        tokio::fs::write(&path, content)
            .await
            .map_err(|source| ArchiveError::Io {
                path: path.clone(),
                source,
            })?;
        log::debug!("saved file at '{}'", path.display());
        Ok(path)
    }
}
