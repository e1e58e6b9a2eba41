//! Filesystem blob store.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use guestbook_core::storage::{BlobStore, RepositoryError, Result, StoredBlob};

/// Route prefix under which the server exposes stored blobs.
pub const IMAGES_PATH: &str = "/images";

const CONTENT_TYPE_SUFFIX: &str = ".type";
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";
const MAX_KEY_LEN: usize = 128;

/// Stores each blob as `<dir>/<key>` with its content type in `<dir>/<key>.type`.
///
/// Keys are limited to ASCII letters, digits, `-` and `_`, which keeps every
/// path inside `dir` and keeps the `.type` sidecars from colliding with keys.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    dir: PathBuf,
    url_prefix: String,
}

impl FsBlobStore {
    /// Creates the store, making `dir` if needed.
    ///
    /// `public_base_url` is prepended to `/images/<key>` in returned URLs; an
    /// empty base yields site-relative URLs.
    pub async fn new(dir: impl Into<PathBuf>, public_base_url: &str) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await.map_err(|e| {
            RepositoryError::ConnectionFailed(format!(
                "Cannot create blob directory {}: {e}",
                dir.display()
            ))
        })?;

        Ok(Self {
            dir,
            url_prefix: format!("{}{IMAGES_PATH}/", public_base_url.trim_end_matches('/')),
        })
    }

    fn data_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    fn type_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}{CONTENT_TYPE_SUFFIX}"))
    }
}

/// Returns true if `key` is safe to use as a file name.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key.len() <= MAX_KEY_LEN
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

fn check_key(key: &str) -> Result<()> {
    if is_valid_key(key) {
        Ok(())
    } else {
        Err(RepositoryError::InvalidData(format!("Invalid blob key: {key:?}")))
    }
}

fn blob_error(action: &str, key: &str, err: std::io::Error) -> RepositoryError {
    RepositoryError::BlobStorage(format!("Cannot {action} blob {key}: {err}"))
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(&self, key: &str, content_type: &str, data: Vec<u8>) -> Result<String> {
        check_key(key)?;

        fs::write(self.data_path(key), &data)
            .await
            .map_err(|e| blob_error("write", key, e))?;

        if let Err(e) = fs::write(self.type_path(key), content_type).await {
            let _ = fs::remove_file(self.data_path(key)).await;
            return Err(blob_error("write", key, e));
        }

        tracing::debug!(key, content_type, bytes = data.len(), "Stored blob");

        Ok(format!("{}{key}", self.url_prefix))
    }

    async fn get(&self, key: &str) -> Result<Option<StoredBlob>> {
        if !is_valid_key(key) {
            return Ok(None);
        }

        let data = match fs::read(self.data_path(key)).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(blob_error("read", key, e)),
        };

        let content_type = fs::read_to_string(self.type_path(key))
            .await
            .map(|s| s.trim().to_string())
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());

        Ok(Some(StoredBlob { content_type, data }))
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        check_key(key)?;

        let existed = match fs::remove_file(self.data_path(key)).await {
            Ok(()) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => return Err(blob_error("delete", key, e)),
        };

        // The sidecar is useless without its blob.
        let _ = fs::remove_file(self.type_path(key)).await;

        Ok(existed)
    }

    fn key_for_url(&self, url: &str) -> Option<String> {
        url.strip_prefix(&self.url_prefix)
            .filter(|key| is_valid_key(key))
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("guestbook_blobs_{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_key_validation() {
        assert!(is_valid_key("3f2a9c1e_b0-7d"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("../etc/passwd"));
        assert!(!is_valid_key("a.type"));
        assert!(!is_valid_key("a/b"));
        assert!(!is_valid_key(&"k".repeat(MAX_KEY_LEN + 1)));
    }

    #[tokio::test]
    async fn test_put_get_delete() {
        let dir = temp_dir();
        let store = FsBlobStore::new(&dir, "").await.unwrap();

        let url = store
            .put("abc123", "image/jpeg", vec![0xff, 0xd8, 0xff])
            .await
            .unwrap();
        assert_eq!(url, "/images/abc123");

        let blob = store.get("abc123").await.unwrap().unwrap();
        assert_eq!(blob.content_type, "image/jpeg");
        assert_eq!(blob.data, vec![0xff, 0xd8, 0xff]);

        assert!(store.delete("abc123").await.unwrap());
        assert!(store.get("abc123").await.unwrap().is_none());
        assert!(!store.delete("abc123").await.unwrap());

        let _ = fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_urls_use_public_base() {
        let dir = temp_dir();
        let store = FsBlobStore::new(&dir, "https://party.example/")
            .await
            .unwrap();

        let url = store.put("k1", "image/png", vec![1]).await.unwrap();
        assert_eq!(url, "https://party.example/images/k1");

        assert_eq!(store.key_for_url(&url), Some("k1".to_string()));
        assert_eq!(store.key_for_url("https://elsewhere.example/images/k1"), None);
        assert_eq!(store.key_for_url("https://party.example/images/../k1"), None);
        assert_eq!(store.key_for_url("data:image/png;base64,AAAA"), None);

        let _ = fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_invalid_keys_are_rejected_or_missing() {
        let dir = temp_dir();
        let store = FsBlobStore::new(&dir, "").await.unwrap();

        let put = store.put("../escape", "image/png", vec![1]).await;
        assert!(matches!(put, Err(RepositoryError::InvalidData(_))));
        assert!(store.get("../escape").await.unwrap().is_none());

        let _ = fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_missing_sidecar_falls_back_to_octet_stream() {
        let dir = temp_dir();
        let store = FsBlobStore::new(&dir, "").await.unwrap();
        store.put("k2", "image/gif", vec![7]).await.unwrap();
        fs::remove_file(dir.join("k2.type")).await.unwrap();

        let blob = store.get("k2").await.unwrap().unwrap();
        assert_eq!(blob.content_type, "application/octet-stream");

        let _ = fs::remove_dir_all(&dir).await;
    }
}
