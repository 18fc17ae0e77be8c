//! # Setting Repository
//!
//! Key/value settings. Keys are unique; the type tag is stored as given.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use kidspos_core::{Setting, SettingInput};

#[derive(Debug, Clone)]
pub struct SettingRepository {
    pool: SqlitePool,
}

impl SettingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SettingRepository { pool }
    }

    /// All settings ordered by key.
    pub async fn list(&self) -> DbResult<Vec<Setting>> {
        let settings = sqlx::query_as::<_, Setting>("SELECT * FROM setting ORDER BY key")
            .fetch_all(&self.pool)
            .await?;
        Ok(settings)
    }

    pub async fn get(&self, key: &str) -> DbResult<Setting> {
        sqlx::query_as::<_, Setting>("SELECT * FROM setting WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("Setting", key))
    }

    pub async fn insert(&self, input: &SettingInput) -> DbResult<Setting> {
        let key = input.key.trim();

        let setting = sqlx::query_as::<_, Setting>(
            r#"
            INSERT INTO setting (key, value, type, description, createdAt, updatedAt)
            VALUES (?1, ?2, ?3, ?4, ?5, ?5)
            RETURNING *
            "#,
        )
        .bind(key)
        .bind(&input.value)
        .bind(input.kind)
        .bind(input.description.as_deref())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DbError::from(e).on_duplicate("key", key))?;

        debug!(key = %key, "Inserted setting");
        Ok(setting)
    }

    /// Replaces the value of an existing key.
    pub async fn update(&self, key: &str, value: &str) -> DbResult<Setting> {
        sqlx::query_as::<_, Setting>(
            "UPDATE setting SET value = ?2, updatedAt = ?3 WHERE key = ?1 RETURNING *",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Setting", key))
    }

    pub async fn delete(&self, key: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM setting WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Setting", key));
        }
        Ok(())
    }
}
