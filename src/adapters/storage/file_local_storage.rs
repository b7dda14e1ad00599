//! File-based Local Storage Adapter
//!
//! Keeps all entries in a single JSON object file. Every write replaces the
//! file through a sibling temp file and a rename, so a crash leaves either
//! the old or the new contents on disk.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::ports::{LocalStorage, StorageError};

type Entries = BTreeMap<String, String>;

/// JSON-file storage for local entries
#[derive(Debug)]
pub struct FileLocalStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileLocalStorage {
    /// Create a storage backed by `path`; the file is created on first write.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> Result<Entries, StorageError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(StorageError::Io(e.to_string())),
        };
        if raw.trim().is_empty() {
            return Ok(Entries::new());
        }
        serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt(e.to_string()))
    }

    async fn write_entries(&self, entries: &Entries) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| StorageError::Io(e.to_string()))?;
            }
        }

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::Io(e.to_string()))?;

        let tmp_path = self.path.with_extension("json.tmp");
        write_private(&tmp_path, json.as_bytes()).await?;
        fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;

        Ok(())
    }

    /// Entries for writing. A corrupt file is replaced rather than blocking
    /// every future write.
    async fn entries_for_update(&self) -> Result<Entries, StorageError> {
        match self.read_entries().await {
            Ok(entries) => Ok(entries),
            Err(StorageError::Corrupt(reason)) => {
                tracing::warn!(path = %self.path.display(), %reason, "Replacing corrupt local storage file");
                Ok(Entries::new())
            }
            Err(e) => Err(e),
        }
    }
}

/// Writes `contents` to a fresh file that is owner-only (`0600`) on Unix
/// from the moment it exists.
async fn write_private(path: &Path, contents: &[u8]) -> Result<(), StorageError> {
    // A stale temp file would keep its old mode
    match fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(StorageError::Io(e.to_string())),
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options
        .open(path)
        .await
        .map_err(|e| StorageError::Io(e.to_string()))?;
    file.write_all(contents)
        .await
        .map_err(|e| StorageError::Io(e.to_string()))?;
    file.sync_all()
        .await
        .map_err(|e| StorageError::Io(e.to_string()))
}

#[async_trait]
impl LocalStorage for FileLocalStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_entries().await?.remove(key))
    }

    async fn set_items(&self, items: &[(&str, String)]) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.entries_for_update().await?;
        for (key, value) in items {
            entries.insert((*key).to_string(), value.clone());
        }
        self.write_entries(&entries).await
    }

    async fn remove_items(&self, keys: &[&str]) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.entries_for_update().await?;
        let before = entries.len();
        for key in keys {
            entries.remove(*key);
        }
        if entries.len() == before {
            return Ok(());
        }
        self.write_entries(&entries).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage_in(dir: &TempDir) -> FileLocalStorage {
        FileLocalStorage::new(dir.path().join("nested").join("local_storage.json"))
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage_in(&temp_dir);

        assert_eq!(storage.get_item("prism_token").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_and_get_items() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage_in(&temp_dir);

        storage
            .set_items(&[("a", "1".to_string()), ("b", "2".to_string())])
            .await
            .unwrap();

        assert_eq!(storage.get_item("a").await.unwrap().as_deref(), Some("1"));
        assert_eq!(storage.get_item("b").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_entries_survive_new_instance() {
        let temp_dir = TempDir::new().unwrap();
        storage_in(&temp_dir)
            .set_items(&[("prism_token", "tok".to_string())])
            .await
            .unwrap();

        let reopened = storage_in(&temp_dir);
        assert_eq!(
            reopened.get_item("prism_token").await.unwrap().as_deref(),
            Some("tok")
        );
    }

    #[tokio::test]
    async fn test_remove_items_keeps_others() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage_in(&temp_dir);
        storage
            .set_items(&[
                ("a", "1".to_string()),
                ("b", "2".to_string()),
                ("c", "3".to_string()),
            ])
            .await
            .unwrap();

        storage.remove_items(&["a", "b"]).await.unwrap();

        assert_eq!(storage.get_item("a").await.unwrap(), None);
        assert_eq!(storage.get_item("b").await.unwrap(), None);
        assert_eq!(storage.get_item("c").await.unwrap().as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn test_remove_on_missing_file_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage_in(&temp_dir);

        storage.remove_items(&["a"]).await.unwrap();
        assert!(!storage.path().exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_reports_error_on_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("local_storage.json");
        std::fs::write(&path, "{not json").unwrap();
        let storage = FileLocalStorage::new(&path);

        let result = storage.get_item("a").await;
        assert!(matches!(result, Err(StorageError::Corrupt(_))));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_replaced_on_write() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("local_storage.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        let storage = FileLocalStorage::new(&path);

        storage.set_items(&[("a", "1".to_string())]).await.unwrap();
        assert_eq!(storage.get_item("a").await.unwrap().as_deref(), Some("1"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let storage = storage_in(&temp_dir);
        storage.set_items(&[("a", "1".to_string())]).await.unwrap();

        let mode = std::fs::metadata(storage.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_temp_file_is_created_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("scratch.json.tmp");

        write_private(&path, b"{}").await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stale_world_readable_temp_file_is_not_reused() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let storage = storage_in(&temp_dir);
        let tmp_path = storage.path().with_extension("json.tmp");
        std::fs::create_dir_all(tmp_path.parent().unwrap()).unwrap();
        std::fs::write(&tmp_path, "stale").unwrap();
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o644)).unwrap();

        storage.set_items(&[("prism_token", "tok".to_string())]).await.unwrap();

        let mode = std::fs::metadata(storage.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(
            storage.get_item("prism_token").await.unwrap().as_deref(),
            Some("tok")
        );
    }
}
