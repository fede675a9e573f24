//! In-memory object store with locally signed download URLs

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;

use sha2::{Digest, Sha256};

use crate::storage::{ObjectStore, StorageError};

/// Reference [`ObjectStore`] holding objects in a process-local map.
///
/// Keys are kept in a `BTreeMap`, so `list_prefix` returns ascending
/// lexical order, matching what real object stores list. Signed URLs embed
/// an expiry timestamp, a per-URL nonce, and an SHA-256 signature over
/// (secret, key, expiry, nonce); whoever serves the artifacts verifies the
/// same construction.
pub struct MemoryObjectStore {
    objects: Mutex<BTreeMap<String, Vec<u8>>>,
    base_url: String,
    signing_secret: String,
}

impl MemoryObjectStore {
    pub fn new(base_url: impl Into<String>, signing_secret: impl Into<String>) -> Self {
        Self {
            objects: Mutex::new(BTreeMap::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            signing_secret: signing_secret.into(),
        }
    }

    /// Returns a copy of the object stored at `key`, if any.
    pub fn object(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().ok()?.get(key).cloned()
    }

    fn sign(&self, key: &str, expires: i64, nonce: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.signing_secret.as_bytes());
        hasher.update(b"\n");
        hasher.update(key.as_bytes());
        hasher.update(b"\n");
        hasher.update(expires.to_string().as_bytes());
        hasher.update(b"\n");
        hasher.update(nonce.as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[async_trait::async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        let mut objects = self
            .objects
            .lock()
            .map_err(|_| StorageError::Backend("object store lock poisoned".to_string()))?;
        objects.insert(key.to_string(), bytes);
        Ok(())
    }

    async fn list_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let objects = self
            .objects
            .lock()
            .map_err(|_| StorageError::Backend("object store lock poisoned".to_string()))?;
        Ok(objects
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn signed_get_url(&self, key: &str, ttl: Duration) -> Result<String, StorageError> {
        let expires = chrono::Utc::now().timestamp() + ttl.as_secs() as i64;
        // Each issued URL carries a fresh nonce so repeated requests for the
        // same object produce distinct signatures.
        let nonce = uuid::Uuid::new_v4().to_string();
        let signature = self.sign(key, expires, &nonce);
        Ok(format!(
            "{}/{key}?expires={expires}&nonce={nonce}&signature={signature}",
            self.base_url
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryObjectStore {
        MemoryObjectStore::new("http://localhost:1323/artifacts", "test-secret")
    }

    #[tokio::test]
    async fn put_then_list_prefix_returns_key() {
        let store = store();
        store.put("modules/a/1", vec![1, 2, 3]).await.unwrap();
        store.put("modules/a/2", vec![4]).await.unwrap();
        store.put("other/b/1", vec![5]).await.unwrap();

        let keys = store.list_prefix("modules/a/").await.unwrap();
        assert_eq!(keys, vec!["modules/a/1".to_string(), "modules/a/2".to_string()]);
    }

    #[tokio::test]
    async fn list_prefix_is_lexically_ordered() {
        let store = store();
        store.put("p/10", vec![]).await.unwrap();
        store.put("p/2", vec![]).await.unwrap();
        store.put("p/1", vec![]).await.unwrap();

        let keys = store.list_prefix("p/").await.unwrap();
        assert_eq!(keys, vec!["p/1", "p/10", "p/2"]);
    }

    #[tokio::test]
    async fn put_replaces_existing_object() {
        let store = store();
        store.put("k", vec![1]).await.unwrap();
        store.put("k", vec![2]).await.unwrap();

        assert_eq!(store.object("k"), Some(vec![2]));
    }

    #[tokio::test]
    async fn signed_url_embeds_key_expiry_and_signature() {
        let store = store();
        let url = store
            .signed_get_url("modules/a/1", Duration::from_secs(900))
            .await
            .unwrap();

        assert!(url.starts_with("http://localhost:1323/artifacts/modules/a/1?expires="));
        assert!(url.contains("&signature="));
    }

    #[tokio::test]
    async fn signed_urls_for_same_key_share_target_but_not_signature() {
        let store = store();
        let first = store
            .signed_get_url("modules/a/1", Duration::from_secs(900))
            .await
            .unwrap();
        let second = store
            .signed_get_url("modules/a/1", Duration::from_secs(900))
            .await
            .unwrap();

        let target = |url: &str| url.split('?').next().unwrap().to_string();
        assert_eq!(target(&first), target(&second));
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn signing_does_not_require_object_existence() {
        let url = store()
            .signed_get_url("modules/never/uploaded", Duration::from_secs(900))
            .await
            .unwrap();
        assert!(url.contains("modules/never/uploaded"));
    }
}
