//! # APK Version Service
//!
//! ## Release Lifecycle
//! ```text
//!            upload
//!   ──────────────────►  ACTIVE ───deactivate───► INACTIVE
//!                          │                          │
//!                          └──────── delete ──────────┴──► (row + file gone)
//! ```
//!
//! The file is written before the row is inserted. If the insert fails
//! (most often a duplicate `version`) the file is removed again, so a
//! failed upload never leaves a stray file behind.

use std::path::{Path, PathBuf};

use axum::body::Bytes;
use tokio::fs::File;
use tracing::{info, warn};

use kidspos_core::apk::{stored_file_name, validate_apk_upload, ApkUpload};
use kidspos_core::{ApkVersion, NewApkVersion, UpdateCheck};
use kidspos_db::ApkVersionRepository;

use crate::error::{ApiError, ApiResult};
use crate::storage::ApkStorage;

/// A parsed upload form.
#[derive(Debug, Clone, Default)]
pub struct ApkUploadRequest {
    pub version: String,
    pub version_code: i64,
    pub release_notes: Option<String>,
    /// Client-side filename, `None` when no file part was sent.
    pub file_name: Option<String>,
    pub bytes: Bytes,
}

/// An opened release file ready to stream.
#[derive(Debug)]
pub struct ApkDownload {
    pub apk: ApkVersion,
    pub file: File,
    pub len: u64,
}

#[derive(Debug, Clone)]
pub struct ApkService {
    versions: ApkVersionRepository,
    storage: ApkStorage,
    max_file_size: u64,
}

impl ApkService {
    pub fn new(versions: ApkVersionRepository, storage: ApkStorage, max_file_size: u64) -> Self {
        ApkService {
            versions,
            storage,
            max_file_size,
        }
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Validates, stores and registers a new active release.
    pub async fn upload(&self, request: ApkUploadRequest) -> ApiResult<ApkVersion> {
        validate_apk_upload(
            &ApkUpload {
                version: &request.version,
                version_code: request.version_code,
                file_name: request.file_name.as_deref(),
                file_size: request.bytes.len() as u64,
            },
            self.max_file_size,
        )?;

        let version = request.version.trim().to_string();
        let file_name = stored_file_name(&version);
        let path = self.storage.save(&file_name, &request.bytes).await?;

        let new = NewApkVersion {
            version,
            version_code: request.version_code,
            file_name,
            file_size: request.bytes.len() as i64,
            file_path: path.to_string_lossy().into_owned(),
            release_notes: request
                .release_notes
                .map(|notes| notes.trim().to_string())
                .filter(|notes| !notes.is_empty()),
        };

        match self.versions.insert(&new).await {
            Ok(apk) => {
                info!(id = apk.id, version = %apk.version, size = apk.file_size, "APK uploaded");
                Ok(apk)
            }
            Err(e) => {
                if let Err(cleanup) = self.storage.remove(&path).await {
                    warn!(path = %path.display(), error = %cleanup, "Failed to remove orphaned APK file");
                }
                Err(e.into())
            }
        }
    }

    /// Stops offering a release. Returns the updated record.
    pub async fn deactivate(&self, id: i64) -> ApiResult<ApkVersion> {
        let apk = self.versions.deactivate(id).await?;
        info!(id, version = %apk.version, "APK deactivated");
        Ok(apk)
    }

    /// Removes the stored file and the row.
    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let apk = self.versions.get(id).await?;
        self.storage.remove(Path::new(&apk.file_path)).await?;
        self.versions.delete(id).await?;
        info!(id, version = %apk.version, "APK deleted");
        Ok(())
    }

    /// Active release with the highest version code.
    pub async fn latest(&self) -> ApiResult<Option<ApkVersion>> {
        Ok(self.versions.latest().await?)
    }

    /// The next active release after `current_code`, if any.
    pub async fn check_for_update(&self, current_code: i64) -> ApiResult<UpdateCheck> {
        Ok(self.versions.next_after(current_code).await?.into())
    }

    pub async fn list_active(&self) -> ApiResult<Vec<ApkVersion>> {
        Ok(self.versions.list_active().await?)
    }

    pub async fn list_all(&self) -> ApiResult<Vec<ApkVersion>> {
        Ok(self.versions.list_all().await?)
    }

    pub async fn get(&self, id: i64) -> ApiResult<ApkVersion> {
        Ok(self.versions.get(id).await?)
    }

    /// Path of a release file, not-found when the file is missing on disk.
    pub async fn file_path(&self, id: i64) -> ApiResult<PathBuf> {
        let apk = self.versions.get(id).await?;
        self.existing_path(&apk).await
    }

    /// Opens a release file for download.
    pub async fn open(&self, id: i64) -> ApiResult<ApkDownload> {
        let apk = self.versions.get(id).await?;
        self.open_release(apk).await
    }

    /// Opens the latest active release for download.
    pub async fn open_latest(&self) -> ApiResult<ApkDownload> {
        let apk = self
            .latest()
            .await?
            .ok_or_else(|| ApiError::not_found("No APK versions available"))?;
        self.open_release(apk).await
    }

    async fn open_release(&self, apk: ApkVersion) -> ApiResult<ApkDownload> {
        let path = self.existing_path(&apk).await?;
        let (file, len) = self.storage.open(&path).await?;
        Ok(ApkDownload { apk, file, len })
    }

    async fn existing_path(&self, apk: &ApkVersion) -> ApiResult<PathBuf> {
        let path = PathBuf::from(&apk.file_path);
        if !self.storage.exists(&path).await {
            warn!(id = apk.id, path = %path.display(), "APK file missing on disk");
            return Err(ApiError::not_found("APK file not found"));
        }
        Ok(path)
    }
}
