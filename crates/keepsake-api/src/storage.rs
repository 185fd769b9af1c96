use std::path::PathBuf;

use anyhow::Result;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

/// On-disk storage for uploaded photo binaries.
///
/// Each binary is a single flat file at `{dir}/{storage_id}`; storage ids
/// are UUIDs minted at upload time.
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    pub async fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir).await?;
        info!("Upload storage directory: {}", dir.display());
        Ok(Self { dir })
    }

    pub fn path(&self, storage_id: &str) -> PathBuf {
        self.dir.join(storage_id)
    }

    pub async fn save(&self, storage_id: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(storage_id);
        let mut file = fs::File::create(&path).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        Ok(())
    }

    pub async fn read(&self, storage_id: &str) -> std::io::Result<Vec<u8>> {
        fs::read(self.path(storage_id)).await
    }

    /// Delete a stored binary. A file that is already gone counts as
    /// deleted.
    pub async fn remove(&self, storage_id: &str) -> Result<()> {
        match fs::remove_file(self.path(storage_id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Binary {} already gone", storage_id);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Best-effort delete used on cascade paths: failures are logged and
    /// swallowed rather than aborting the surrounding delete.
    pub async fn discard(&self, storage_id: &str) {
        if let Err(e) = self.remove(storage_id).await {
            warn!("Failed to delete binary {}: {}", storage_id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_read_remove_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path().join("uploads")).await.unwrap();

        storage.save("blob-1", b"jpeg bytes").await.unwrap();
        assert_eq!(storage.read("blob-1").await.unwrap(), b"jpeg bytes");

        storage.remove("blob-1").await.unwrap();
        assert!(storage.read("blob-1").await.is_err());
    }

    #[tokio::test]
    async fn removing_a_missing_binary_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path().join("uploads")).await.unwrap();

        storage.remove("never-existed").await.unwrap();
        storage.discard("never-existed").await;
    }
}
