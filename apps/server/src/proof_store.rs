use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use obligo_core::payments::ProofStore;
use obligo_core::{Error, Result};

/// Filesystem implementation of the proof-document store. Blobs live under
/// `<data_root>/proofs/<storage_key>`; the storage key acts as a relative
/// path and must stay inside the root, whatever the caller passes.
pub struct FsProofStore {
    root: PathBuf,
}

impl FsProofStore {
    pub fn new(data_root: &str) -> Self {
        FsProofStore {
            root: PathBuf::from(data_root).join("proofs"),
        }
    }

    fn blob_path(&self, storage_key: &str) -> Result<PathBuf> {
        let relative = Path::new(storage_key);
        let plain = !storage_key.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !plain {
            return Err(Error::ProofStorage(format!(
                "storage key {storage_key:?} is not a plain relative path"
            )));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ProofStore for FsProofStore {
    async fn put(&self, storage_key: &str, content: Vec<u8>) -> Result<()> {
        let path = self.blob_path(storage_key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, content).await?;
        Ok(())
    }

    async fn remove(&self, storage_key: &str) -> Result<()> {
        tokio::fs::remove_file(self.blob_path(storage_key)?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use obligo_core::Error;

    #[tokio::test]
    async fn put_then_remove_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsProofStore::new(dir.path().to_str().unwrap());

        store
            .put("pay-1/abc-virement.pdf", b"pdf bytes".to_vec())
            .await
            .unwrap();
        let on_disk = dir.path().join("proofs/pay-1/abc-virement.pdf");
        assert_eq!(std::fs::read(&on_disk).unwrap(), b"pdf bytes");

        store.remove("pay-1/abc-virement.pdf").await.unwrap();
        assert!(!on_disk.exists());
    }

    #[tokio::test]
    async fn traversing_storage_keys_are_refused() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsProofStore::new(dir.path().join("data").to_str().unwrap());

        let key = "pay-1/abc-../../../../../escape.txt";
        let err = store.put(key, b"x".to_vec()).await.unwrap_err();
        assert!(matches!(err, Error::ProofStorage(_)));
        assert!(!dir.path().join("escape.txt").exists());

        for key in ["../escape.txt", "/etc/escape.txt", ""] {
            assert!(store.put(key, b"x".to_vec()).await.is_err());
            assert!(store.remove(key).await.is_err());
        }
    }

    #[tokio::test]
    async fn removing_a_missing_blob_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsProofStore::new(dir.path().to_str().unwrap());
        let err = store.remove("nope").await.unwrap_err();
        assert!(matches!(err, Error::ProofStorage(_)));
    }
}
