//! # Item Repository
//!
//! Database operations for items.
//!
//! ## Soft Delete
//! ```text
//! soft_delete(7)  ──►  UPDATE item SET isDeleted = 1 WHERE id = 7
//!
//! list / get / find_by_barcode  ──►  ... WHERE isDeleted = 0
//! find_any                      ──►  no filter (sale history)
//! ```
//!
//! Stock is written in two places only: [`ItemRepository::update`] sets it
//! absolutely, the sale transaction decrements it.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use kidspos_core::{Item, ItemInput};

/// Repository for item database operations.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Lists items that are not deleted, newest first.
    pub async fn list(&self) -> DbResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            "SELECT * FROM item WHERE isDeleted = 0 ORDER BY createdAt DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = items.len(), "Listed items");
        Ok(items)
    }

    /// Finds a non-deleted item by surrogate id.
    pub async fn find(&self, id: i64) -> DbResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>("SELECT * FROM item WHERE id = ? AND isDeleted = 0")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(item)
    }

    /// Gets a non-deleted item or fails with NotFound.
    pub async fn get(&self, id: i64) -> DbResult<Item> {
        self.find(id)
            .await?
            .ok_or_else(|| DbError::not_found("Item", id))
    }

    /// Finds an item by id whether or not it was deleted.
    ///
    /// Sale details keep pointing at deleted items.
    pub async fn find_any(&self, id: i64) -> DbResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>("SELECT * FROM item WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(item)
    }

    /// Exact match on the external code.
    pub async fn find_by_barcode(&self, code: &str) -> DbResult<Option<Item>> {
        debug!(code = %code, "Looking up item by barcode");

        let item =
            sqlx::query_as::<_, Item>("SELECT * FROM item WHERE itemId = ? AND isDeleted = 0")
                .bind(code)
                .fetch_optional(&self.pool)
                .await?;
        Ok(item)
    }

    /// Inserts a new item under the given external code.
    pub async fn insert(&self, code: &str, input: &ItemInput) -> DbResult<Item> {
        let now = Utc::now();

        let item = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO item (itemId, name, price, stock, isDeleted, createdAt, updatedAt)
            VALUES (?1, ?2, ?3, ?4, 0, ?5, ?5)
            RETURNING *
            "#,
        )
        .bind(code)
        .bind(input.name.trim())
        .bind(input.price)
        .bind(input.stock)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DbError::from(e).on_duplicate("itemId", code))?;

        debug!(id = item.id, code = %code, "Inserted item");
        Ok(item)
    }

    /// Overwrites name, price and stock. The external code never changes.
    pub async fn update(&self, id: i64, input: &ItemInput) -> DbResult<Item> {
        let now = Utc::now();

        let item = sqlx::query_as::<_, Item>(
            r#"
            UPDATE item SET
                name = ?2,
                price = ?3,
                stock = ?4,
                updatedAt = ?5
            WHERE id = ?1 AND isDeleted = 0
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.name.trim())
        .bind(input.price)
        .bind(input.stock)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        item.ok_or_else(|| DbError::not_found("Item", id))
    }

    /// Marks an item deleted.
    pub async fn soft_delete(&self, id: i64) -> DbResult<()> {
        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE item SET isDeleted = 1, updatedAt = ?2 WHERE id = ?1 AND isDeleted = 0",
        )
        .bind(id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", id));
        }

        debug!(id, "Soft-deleted item");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
