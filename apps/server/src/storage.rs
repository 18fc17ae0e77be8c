//! On-disk storage for uploaded APK files.
//!
//! Files live flat inside one directory; the database row keeps the full
//! path so a changed `APK_UPLOAD_DIR` does not orphan older releases.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs::{self, File};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct ApkStorage {
    dir: PathBuf,
}

impl ApkStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        ApkStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the upload directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.dir).await
    }

    /// Writes `bytes` under `file_name` and returns the full path.
    pub async fn save(&self, file_name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        self.ensure_dir().await?;
        let path = self.dir.join(file_name);
        fs::write(&path, bytes).await?;
        debug!(path = %path.display(), size = bytes.len(), "Stored APK file");
        Ok(path)
    }

    /// Removes a stored file. A file that is already gone is not an error.
    pub async fn remove(&self, path: &Path) -> io::Result<()> {
        match fs::remove_file(path).await {
            Ok(()) => {
                debug!(path = %path.display(), "Removed APK file");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "APK file already absent");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    pub async fn exists(&self, path: &Path) -> bool {
        fs::try_exists(path).await.unwrap_or(false)
    }

    /// Opens a stored file for streaming, returning it with its length.
    pub async fn open(&self, path: &Path) -> io::Result<(File, u64)> {
        let file = File::open(path).await?;
        let len = file.metadata().await?.len();
        Ok((file, len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_open_remove() {
        let tmp = TempDir::new().unwrap();
        let storage = ApkStorage::new(tmp.path().join("apk"));

        let path = storage.save("1.0.0-abcdef12.apk", b"PK\x03\x04").await.unwrap();
        assert_eq!(path, tmp.path().join("apk").join("1.0.0-abcdef12.apk"));
        assert!(storage.exists(&path).await);

        let (_, len) = storage.open(&path).await.unwrap();
        assert_eq!(len, 4);

        storage.remove(&path).await.unwrap();
        assert!(!storage.exists(&path).await);

        // second removal is tolerated
        storage.remove(&path).await.unwrap();
    }
}
