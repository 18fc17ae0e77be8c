//! # APK Version Repository
//!
//! Release metadata for distributable APKs. The binary itself lives on disk
//! and is managed by the server's storage module.
//!
//! ## Update Selection
//! ```text
//! active codes: 1, 2, 4   (3 inactive)
//!
//! latest()          → 4        highest active code
//! next_after(1)     → 2        smallest active code > 1
//! next_after(4)     → none
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use kidspos_core::{ApkVersion, NewApkVersion};

#[derive(Debug, Clone)]
pub struct ApkVersionRepository {
    pool: SqlitePool,
}

impl ApkVersionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ApkVersionRepository { pool }
    }

    /// Active release with the highest version code.
    pub async fn latest(&self) -> DbResult<Option<ApkVersion>> {
        let apk = sqlx::query_as::<_, ApkVersion>(
            "SELECT * FROM apk_versions WHERE isActive = 1 ORDER BY versionCode DESC, id DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(apk)
    }

    /// Active release with the smallest version code strictly above `code`.
    pub async fn next_after(&self, code: i64) -> DbResult<Option<ApkVersion>> {
        let apk = sqlx::query_as::<_, ApkVersion>(
            r#"
            SELECT * FROM apk_versions
            WHERE isActive = 1 AND versionCode > ?
            ORDER BY versionCode ASC, id ASC
            LIMIT 1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;
        Ok(apk)
    }

    /// Active releases, highest version code first.
    pub async fn list_active(&self) -> DbResult<Vec<ApkVersion>> {
        let versions = sqlx::query_as::<_, ApkVersion>(
            "SELECT * FROM apk_versions WHERE isActive = 1 ORDER BY versionCode DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(versions)
    }

    /// Every release, active or not.
    pub async fn list_all(&self) -> DbResult<Vec<ApkVersion>> {
        let versions = sqlx::query_as::<_, ApkVersion>(
            "SELECT * FROM apk_versions ORDER BY versionCode DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(versions)
    }

    pub async fn get(&self, id: i64) -> DbResult<ApkVersion> {
        sqlx::query_as::<_, ApkVersion>("SELECT * FROM apk_versions WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("APK version", id))
    }

    /// Inserts an active release.
    pub async fn insert(&self, apk: &NewApkVersion) -> DbResult<ApkVersion> {
        let now = Utc::now();

        let inserted = sqlx::query_as::<_, ApkVersion>(
            r#"
            INSERT INTO apk_versions
                (version, versionCode, fileName, fileSize, filePath, releaseNotes,
                 isActive, uploadedAt, createdAt, updatedAt)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1, ?7, ?7, ?7)
            RETURNING *
            "#,
        )
        .bind(&apk.version)
        .bind(apk.version_code)
        .bind(&apk.file_name)
        .bind(apk.file_size)
        .bind(&apk.file_path)
        .bind(apk.release_notes.as_deref())
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DbError::from(e).on_duplicate("version", &apk.version))?;

        info!(
            id = inserted.id,
            version = %inserted.version,
            version_code = inserted.version_code,
            "APK version registered"
        );
        Ok(inserted)
    }

    /// Marks a release inactive and returns the updated row.
    pub async fn deactivate(&self, id: i64) -> DbResult<ApkVersion> {
        let apk = sqlx::query_as::<_, ApkVersion>(
            "UPDATE apk_versions SET isActive = 0, updatedAt = ?2 WHERE id = ?1 RETURNING *",
        )
        .bind(id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("APK version", id))?;

        debug!(id, "APK version deactivated");
        Ok(apk)
    }

    pub async fn delete(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM apk_versions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("APK version", id));
        }
        Ok(())
    }
}
