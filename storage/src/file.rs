//! Durable on-disk storage backend.

use campus_connect_core::storage::{StorageClient, StorageError, StorageFuture};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Durable [`StorageClient`] that keeps one file per key under a
/// directory.
///
/// Writes go to a temporary file first and are renamed into place, so a
/// crash mid-write leaves either the old value or the new one, never a
/// torn file. A single internal mutex serializes writes; reads run
/// lock-free against the last renamed file.
pub struct FileStorage {
    dir: PathBuf,
    write_guard: Mutex<()>,
}

impl FileStorage {
    /// Open (and create if needed) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory cannot be created.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| StorageError::Io(format!("creating {}: {e}", dir.display())))?;
        Ok(Self {
            dir,
            write_guard: Mutex::new(()),
        })
    }

    /// The directory this store keeps its files in.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolve the file path for `key`, rejecting keys that would escape
    /// the storage directory.
    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(StorageError::Io(format!("invalid storage key {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl StorageClient for FileStorage {
    fn get_item<'a>(&'a self, key: &'a str) -> StorageFuture<'a, Option<String>> {
        Box::pin(async move {
            let path = self.path_for(key)?;
            match tokio::fs::read_to_string(&path).await {
                Ok(value) => Ok(Some(value)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(StorageError::Io(format!("reading {}: {e}", path.display()))),
            }
        })
    }

    fn set_item<'a>(&'a self, key: &'a str, value: String) -> StorageFuture<'a, ()> {
        Box::pin(async move {
            let path = self.path_for(key)?;
            let tmp = self.dir.join(format!("{key}.json.tmp"));

            let _guard = self.write_guard.lock().await;
            tokio::fs::write(&tmp, value.as_bytes())
                .await
                .map_err(|e| StorageError::Io(format!("writing {}: {e}", tmp.display())))?;
            tokio::fs::rename(&tmp, &path)
                .await
                .map_err(|e| StorageError::Io(format!("replacing {}: {e}", path.display())))?;
            tracing::trace!(key, bytes = value.len(), "persisted storage key");
            Ok(())
        })
    }

    fn remove_item<'a>(&'a self, key: &'a str) -> StorageFuture<'a, ()> {
        Box::pin(async move {
            let path = self.path_for(key)?;
            let _guard = self.write_guard.lock().await;
            match tokio::fs::remove_file(&path).await {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(StorageError::Io(format!("removing {}: {e}", path.display()))),
            }
        })
    }
}
