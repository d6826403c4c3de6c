use std::path::PathBuf;
use async_trait::async_trait;
use log::{debug, info};
use serde_json::{Map, Value};
use tokio::fs;
use tokio::sync::Mutex;
use crate::client::storage_area::StorageArea;
use crate::error::StorageError;

/// Storage area persisted as one JSON object on disk. Writes go to a sibling temp file that
/// is renamed over the document, so readers never see a half-written file.
pub struct FileStorageArea {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorageArea {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        info!("using file storage area at [{}]", path.display());
        Self { path, write_lock: Mutex::new(()) }
    }

    async fn read_document(&self) -> Result<Map<String, Value>, StorageError> {
        match fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice::<Value>(&bytes)? {
                Value::Object(map) => Ok(map),
                other => Err(StorageError::Serialization(
                    format!("expected a json object in [{}], found [{}]", self.path.display(), other))),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("storage document [{}] does not exist yet", self.path.display());
                Ok(Map::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp_path = self.path.clone().into_os_string();
        tmp_path.push(".tmp");
        PathBuf::from(tmp_path)
    }

    async fn write_document(&self, document: &Map<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, serde_json::to_vec_pretty(document)?).await?;
        fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl StorageArea for FileStorageArea {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.read_document().await?.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        // other keys in the document must survive, so the file itself is read-modify-written
        let _guard = self.write_lock.lock().await;
        let mut document = self.read_document().await?;
        document.insert(key.to_string(), value);
        self.write_document(&document).await?;
        debug!("wrote key [{}] to [{}]", key, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_document_named_tmp_is_replaced_through_sibling() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorageArea::new(dir.path().join("storage.tmp"));
        assert_eq!(storage.tmp_path(), dir.path().join("storage.tmp.tmp"));

        storage.set("bookmarks", json!({ "https://a.com/p": [] })).await.unwrap();
        storage.set("settings", json!({ "smooth": true })).await.unwrap();

        assert_eq!(storage.get("bookmarks").await.unwrap(), Some(json!({ "https://a.com/p": [] })));
        assert!(!dir.path().join("storage.tmp.tmp").exists());
    }

    #[tokio::test]
    async fn test_get_before_first_write_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorageArea::new(dir.path().join("storage.json"));
        assert_eq!(storage.get("bookmarks").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let storage = FileStorageArea::new(&path);
        storage.set("bookmarks", json!({ "https://a.com/p": [] })).await.unwrap();
        storage.set("settings", json!({ "theme": "dark" })).await.unwrap();

        let reopened = FileStorageArea::new(&path);
        assert_eq!(reopened.get("bookmarks").await.unwrap(), Some(json!({ "https://a.com/p": [] })));
        assert_eq!(reopened.get("settings").await.unwrap(), Some(json!({ "theme": "dark" })));
        assert!(!path.with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn test_corrupt_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, b"[1, 2, 3]").unwrap();

        let storage = FileStorageArea::new(&path);
        assert!(matches!(storage.get("bookmarks").await, Err(StorageError::Serialization(_))));
    }
}
