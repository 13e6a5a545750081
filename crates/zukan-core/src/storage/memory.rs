//! In-memory media store for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::{Error, Result};

use super::{media_object_key, MediaStore};

/// Media store backed by a process-local object map.
///
/// Resolution yields a `memory://` address so tests can assert that a
/// note's image resolved to a non-empty URL for an uploaded object.
#[derive(Debug, Default)]
pub struct MemoryMediaStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    /// When set, every upload fails with a storage error.
    fail_uploads: AtomicBool,
}

impl MemoryMediaStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent uploads fail, for partial-failure tests.
    pub fn fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    /// Whether an object is stored under `(identity, key)`.
    pub fn contains(&self, identity: &str, key: &str) -> bool {
        self.object(identity, key).is_some()
    }

    /// Stored bytes for `(identity, key)`, if any.
    pub fn object(&self, identity: &str, key: &str) -> Option<Vec<u8>> {
        let object_key = media_object_key(identity, key).ok()?;
        self.lock().ok()?.get(&object_key).cloned()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Vec<u8>>>> {
        self.objects
            .lock()
            .map_err(|_| Error::Storage("Media store lock poisoned".to_string()))
    }
}

impl MediaStore for MemoryMediaStore {
    async fn resolve_url(&self, identity: &str, key: &str) -> Result<String> {
        let object_key = media_object_key(identity, key)?;
        if !self.lock()?.contains_key(&object_key) {
            return Err(Error::NotFound(object_key));
        }
        Ok(format!("memory://{object_key}"))
    }

    async fn upload(
        &self,
        identity: &str,
        key: &str,
        bytes: &[u8],
        _content_type: Option<&str>,
    ) -> Result<()> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(Error::Storage("Simulated upload failure".to_string()));
        }
        let object_key = media_object_key(identity, key)?;
        self.lock()?.insert(object_key, bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upload_then_resolve_yields_scoped_url() {
        let store = MemoryMediaStore::new();
        store
            .upload("identity-1", "ponita0077.svg", b"svg-bytes", None)
            .await
            .unwrap();

        let url = store
            .resolve_url("identity-1", "ponita0077.svg")
            .await
            .unwrap();
        assert_eq!(url, "memory://media/identity-1/ponita0077.svg");
        assert_eq!(
            store.object("identity-1", "ponita0077.svg"),
            Some(b"svg-bytes".to_vec())
        );
    }

    #[tokio::test]
    async fn resolve_unknown_object_is_not_found() {
        let store = MemoryMediaStore::new();
        assert!(matches!(
            store.resolve_url("identity-1", "missing.svg").await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn forced_failure_rejects_uploads() {
        let store = MemoryMediaStore::new();
        store.fail_uploads(true);
        assert!(store
            .upload("identity-1", "file.svg", b"bytes", None)
            .await
            .is_err());
    }
}
