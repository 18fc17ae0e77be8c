//! # Staff Repository
//!
//! Database operations for staff members. Besides the id based operations,
//! staff can be read, renamed and removed by the code printed on their
//! name badge.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use kidspos_core::Staff;

/// Repository for staff database operations.
#[derive(Debug, Clone)]
pub struct StaffRepository {
    pool: SqlitePool,
}

impl StaffRepository {
    pub fn new(pool: SqlitePool) -> Self {
        StaffRepository { pool }
    }

    pub async fn list(&self) -> DbResult<Vec<Staff>> {
        let staff =
            sqlx::query_as::<_, Staff>("SELECT * FROM staff ORDER BY createdAt DESC, id DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(staff)
    }

    pub async fn find(&self, id: i64) -> DbResult<Option<Staff>> {
        let staff = sqlx::query_as::<_, Staff>("SELECT * FROM staff WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(staff)
    }

    pub async fn get(&self, id: i64) -> DbResult<Staff> {
        self.find(id)
            .await?
            .ok_or_else(|| DbError::not_found("Staff", id))
    }

    pub async fn find_by_code(&self, code: &str) -> DbResult<Option<Staff>> {
        let staff = sqlx::query_as::<_, Staff>("SELECT * FROM staff WHERE staffId = ?")
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(staff)
    }

    pub async fn get_by_code(&self, code: &str) -> DbResult<Staff> {
        self.find_by_code(code)
            .await?
            .ok_or_else(|| DbError::not_found("Staff", code))
    }

    pub async fn insert(&self, code: &str, name: &str) -> DbResult<Staff> {
        let now = Utc::now();

        let staff = sqlx::query_as::<_, Staff>(
            "INSERT INTO staff (staffId, name, createdAt, updatedAt) VALUES (?1, ?2, ?3, ?3) RETURNING *",
        )
        .bind(code)
        .bind(name.trim())
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DbError::from(e).on_duplicate("staffId", code))?;

        debug!(id = staff.id, code = %code, "Inserted staff");
        Ok(staff)
    }

    pub async fn update(&self, id: i64, name: &str) -> DbResult<Staff> {
        let staff = sqlx::query_as::<_, Staff>(
            "UPDATE staff SET name = ?2, updatedAt = ?3 WHERE id = ?1 RETURNING *",
        )
        .bind(id)
        .bind(name.trim())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        staff.ok_or_else(|| DbError::not_found("Staff", id))
    }

    pub async fn update_by_code(&self, code: &str, name: &str) -> DbResult<Staff> {
        let staff = self.get_by_code(code).await?;
        self.update(staff.id, name).await
    }

    /// Deletes a staff member that no sale references.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM staff WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DbError::from(e).on_referenced("Staff", id, "sales"))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Staff", id));
        }

        debug!(id, "Deleted staff");
        Ok(())
    }

    pub async fn delete_by_code(&self, code: &str) -> DbResult<()> {
        let staff = self.get_by_code(code).await?;
        self.delete(staff.id).await
    }
}
