use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::core::sync::{SnapshotStore, SyncError};

/// Snapshot store that writes each payload as a file under one directory.
///
/// Writes truncate: a rerun fully replaces the previous snapshot.
pub struct SnapshotFileStore {
    dir: PathBuf,
}

impl SnapshotFileStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn store_error(path: &Path, err: std::io::Error) -> SyncError {
        SyncError::Store {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl SnapshotStore for SnapshotFileStore {
    async fn write(&self, name: &str, payload: &str) -> Result<(), SyncError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| Self::store_error(&self.dir, e))?;

        let path = self.dir.join(name);
        fs::write(&path, payload)
            .await
            .map_err(|e| Self::store_error(&path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_write_read_roundtrip() {
        let dir = tempdir().unwrap();
        let store = SnapshotFileStore::new(dir.path());

        store
            .write("profile.json", r#"{"data":{"user":{"name":"Ada"}}}"#)
            .await
            .unwrap();

        let text = std::fs::read_to_string(dir.path().join("profile.json")).unwrap();
        assert_eq!(text, r#"{"data":{"user":{"name":"Ada"}}}"#);
    }

    #[tokio::test]
    async fn test_second_write_replaces_the_first() {
        let dir = tempdir().unwrap();
        let store = SnapshotFileStore::new(dir.path());

        store.write("blogs.json", "a longer payload").await.unwrap();
        store.write("blogs.json", "short").await.unwrap();

        let text = std::fs::read_to_string(dir.path().join("blogs.json")).unwrap();
        assert_eq!(text, "short");
    }

    #[tokio::test]
    async fn test_creates_missing_output_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("public");
        let store = SnapshotFileStore::new(&nested);

        store.write("profile.json", "{}").await.unwrap();

        assert!(nested.join("profile.json").exists());
    }
}
