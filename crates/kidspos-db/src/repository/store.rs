//! # Store Repository
//!
//! Database operations for stores. Deletion is a hard delete guarded by the
//! `sale.storeId` foreign key.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use kidspos_core::Store;

/// Repository for store database operations.
#[derive(Debug, Clone)]
pub struct StoreRepository {
    pool: SqlitePool,
}

impl StoreRepository {
    pub fn new(pool: SqlitePool) -> Self {
        StoreRepository { pool }
    }

    /// Lists all stores, newest first.
    pub async fn list(&self) -> DbResult<Vec<Store>> {
        let stores =
            sqlx::query_as::<_, Store>("SELECT * FROM store ORDER BY createdAt DESC, id DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(stores)
    }

    pub async fn find(&self, id: i64) -> DbResult<Option<Store>> {
        let store = sqlx::query_as::<_, Store>("SELECT * FROM store WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(store)
    }

    pub async fn get(&self, id: i64) -> DbResult<Store> {
        self.find(id)
            .await?
            .ok_or_else(|| DbError::not_found("Store", id))
    }

    pub async fn find_by_code(&self, code: &str) -> DbResult<Option<Store>> {
        let store = sqlx::query_as::<_, Store>("SELECT * FROM store WHERE storeId = ?")
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(store)
    }

    pub async fn insert(&self, code: &str, name: &str) -> DbResult<Store> {
        let now = Utc::now();

        let store = sqlx::query_as::<_, Store>(
            "INSERT INTO store (storeId, name, createdAt, updatedAt) VALUES (?1, ?2, ?3, ?3) RETURNING *",
        )
        .bind(code)
        .bind(name.trim())
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DbError::from(e).on_duplicate("storeId", code))?;

        debug!(id = store.id, code = %code, "Inserted store");
        Ok(store)
    }

    /// Renames a store.
    pub async fn update(&self, id: i64, name: &str) -> DbResult<Store> {
        let store = sqlx::query_as::<_, Store>(
            "UPDATE store SET name = ?2, updatedAt = ?3 WHERE id = ?1 RETURNING *",
        )
        .bind(id)
        .bind(name.trim())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        store.ok_or_else(|| DbError::not_found("Store", id))
    }

    /// Deletes a store that no sale references.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM store WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DbError::from(e).on_referenced("Store", id, "sales"))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Store", id));
        }

        debug!(id, "Deleted store");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_db;

    #[tokio::test]
    async fn test_crud() {
        let repo = test_db().await.stores();

        let store = repo.insert("STORE-TEST", "Snack Bar").await.unwrap();
        assert_eq!(repo.get(store.id).await.unwrap().name, "Snack Bar");

        let renamed = repo.update(store.id, "Drinks").await.unwrap();
        assert_eq!(renamed.name, "Drinks");
        assert_eq!(renamed.store_id, "STORE-TEST");

        repo.delete(store.id).await.unwrap();
        assert!(repo.find(store.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(store.id).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_duplicate_code() {
        let repo = test_db().await.stores();
        let err = repo.insert("STORE001", "Again").await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }
}
