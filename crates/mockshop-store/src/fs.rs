//! File-backed document storage with write-to-temp-then-rename replacement.
//!
//! A replacement is performed in two phases:
//!
//! 1. **stage**: serialize into a uniquely named temp file next to the
//!    canonical document, flush and (optionally) `fsync` it.
//! 2. **commit**: `rename` the temp file over the canonical path.
//!
//! `rename` within one directory is atomic on POSIX file systems, so at every
//! instant the canonical path holds either the old or the new complete
//! document. A staged write that is never committed removes its temp file
//! when dropped.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::error::StoreResult;
use crate::traits::DocumentStorage;

/// Document storage on the local file system.
#[derive(Clone, Debug)]
pub struct FsStorage {
    path: PathBuf,
    sync_on_write: bool,
}

impl FsStorage {
    pub fn new(path: impl Into<PathBuf>, sync_on_write: bool) -> Self {
        Self {
            path: path.into(),
            sync_on_write,
        }
    }

    /// Canonical document path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        let temp_name = format!(".{name}.{}.tmp", uuid::Uuid::new_v4().simple());
        match self.path.parent() {
            Some(parent) => parent.join(temp_name),
            None => PathBuf::from(temp_name),
        }
    }

    /// Write `bytes` to a fresh temp file without touching the canonical
    /// document. The containing directory is created if missing.
    pub async fn stage(&self, bytes: &[u8]) -> StoreResult<StagedWrite> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        // Constructed before the file exists so an error below still cleans up.
        let staged = StagedWrite {
            temp: Some(self.temp_path()),
            target: self.path.clone(),
            sync_on_write: self.sync_on_write,
        };
        let temp = staged.temp_path();

        let mut file = tokio::fs::File::create(temp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        if self.sync_on_write {
            file.sync_all().await?;
        }
        drop(file);

        debug!(temp = %temp.display(), len = bytes.len(), "staged document write");
        Ok(staged)
    }
}

#[async_trait]
impl DocumentStorage for FsStorage {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> StoreResult<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn replace(&self, bytes: &[u8]) -> StoreResult<()> {
        self.stage(bytes).await?.commit().await
    }
}

/// A fully written temp file waiting to be renamed over its target.
#[derive(Debug)]
pub struct StagedWrite {
    temp: Option<PathBuf>,
    target: PathBuf,
    sync_on_write: bool,
}

impl StagedWrite {
    pub fn temp_path(&self) -> &Path {
        self.temp.as_deref().unwrap_or(&self.target)
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Rename the temp file over the target.
    ///
    /// An error means the rename failed: the temp file is removed and the
    /// target is unchanged. Once the rename succeeds the call succeeds.
    pub async fn commit(mut self) -> StoreResult<()> {
        let Some(temp) = self.temp.clone() else {
            return Ok(());
        };
        tokio::fs::rename(&temp, &self.target).await?;
        self.temp = None;

        if self.sync_on_write {
            sync_committed_dir(&self.target).await;
        }
        debug!(path = %self.target.display(), "committed document write");
        Ok(())
    }

    /// Discard the temp file, leaving the target untouched.
    pub async fn abort(mut self) -> StoreResult<()> {
        if let Some(temp) = self.temp.take() {
            match tokio::fs::remove_file(&temp).await {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

impl Drop for StagedWrite {
    fn drop(&mut self) {
        if let Some(temp) = self.temp.take() {
            let _ = std::fs::remove_file(temp);
        }
    }
}

/// Flush the directory entry of a rename that already happened. The new
/// document is in place either way, so a failure is only logged.
async fn sync_committed_dir(target: &Path) {
    if let Err(e) = sync_parent_dir(target).await {
        warn!(path = %target.display(), error = %e, "document replaced but directory sync failed");
    }
}

#[cfg(unix)]
async fn sync_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            tokio::fs::File::open(parent).await?.sync_all().await
        }
        _ => Ok(()),
    }
}

#[cfg(not(unix))]
async fn sync_parent_dir(_path: &Path) -> io::Result<()> {
    Ok(())
}
