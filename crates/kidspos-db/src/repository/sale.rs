//! # Sale Repository
//!
//! Persists planned sales and reads them back.
//!
//! ## The Sale Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       create(&SalePlan)                                 │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    │                                                                    │
//! │    ├─► INSERT sale (header)                 → sale.id                  │
//! │    │                                                                    │
//! │    ├─► for each line:                                                  │
//! │    │     INSERT sale_detail                                            │
//! │    │     UPDATE item SET stock = stock - qty                           │
//! │    │       WHERE id = ? AND stock >= qty                               │
//! │    │         │                                                          │
//! │    │         └─ 0 rows? ──► StockConflict, tx dropped → ROLLBACK       │
//! │    │                                                                    │
//! │  COMMIT                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The conditional decrement means two concurrent sales can never drive
//! stock below zero, whatever they saw when they were planned.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use kidspos_core::{Item, Sale, SaleDetail, SalePlan, Staff, Store};

/// Optional `saleAt` bounds, both inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaleRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

/// A sale row joined with its store and staff.
#[derive(Debug, sqlx::FromRow)]
struct SaleRow {
    #[sqlx(flatten)]
    sale: Sale,
    #[sqlx(rename = "storeCode")]
    store_code: Option<String>,
    #[sqlx(rename = "storeName")]
    store_name: Option<String>,
    #[sqlx(rename = "storeCreatedAt")]
    store_created_at: Option<DateTime<Utc>>,
    #[sqlx(rename = "storeUpdatedAt")]
    store_updated_at: Option<DateTime<Utc>>,
    #[sqlx(rename = "staffCode")]
    staff_code: Option<String>,
    #[sqlx(rename = "staffName")]
    staff_name: Option<String>,
    #[sqlx(rename = "staffCreatedAt")]
    staff_created_at: Option<DateTime<Utc>>,
    #[sqlx(rename = "staffUpdatedAt")]
    staff_updated_at: Option<DateTime<Utc>>,
}

impl From<SaleRow> for Sale {
    fn from(row: SaleRow) -> Self {
        let mut sale = row.sale;

        if let (Some(code), Some(name), Some(created_at), Some(updated_at)) = (
            row.store_code,
            row.store_name,
            row.store_created_at,
            row.store_updated_at,
        ) {
            sale.store = Some(Store {
                id: sale.store_id,
                store_id: code,
                name,
                created_at,
                updated_at,
            });
        }

        if let (Some(code), Some(name), Some(created_at), Some(updated_at)) = (
            row.staff_code,
            row.staff_name,
            row.staff_created_at,
            row.staff_updated_at,
        ) {
            sale.staff = Some(Staff {
                id: sale.staff_id,
                staff_id: code,
                name,
                created_at,
                updated_at,
            });
        }

        sale
    }
}

const SALE_WITH_PARTIES: &str = r#"
    SELECT
        s.*,
        st.storeId AS storeCode,
        st.name AS storeName,
        st.createdAt AS storeCreatedAt,
        st.updatedAt AS storeUpdatedAt,
        sf.staffId AS staffCode,
        sf.name AS staffName,
        sf.createdAt AS staffCreatedAt,
        sf.updatedAt AS staffUpdatedAt
    FROM sale s
    LEFT JOIN store st ON st.id = s.storeId
    LEFT JOIN staff sf ON sf.id = s.staffId
"#;

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Writes a planned sale: header, lines and stock decrements, all or
    /// nothing.
    ///
    /// Every lookup happens before `begin()`; inside the transaction only
    /// the transaction's own connection is used.
    pub async fn create(&self, plan: &SalePlan) -> DbResult<Sale> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let mut sale = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sale (storeId, staffId, totalPrice, deposit, saleAt, createdAt, updatedAt)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            RETURNING *
            "#,
        )
        .bind(plan.store_id)
        .bind(plan.staff_id)
        .bind(plan.total_price)
        .bind(plan.deposit)
        .bind(plan.sale_at)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        for line in &plan.lines {
            let detail = sqlx::query_as::<_, SaleDetail>(
                r#"
                INSERT INTO sale_detail (saleId, itemId, quantity, price, createdAt, updatedAt)
                VALUES (?1, ?2, ?3, ?4, ?5, ?5)
                RETURNING *
                "#,
            )
            .bind(sale.id)
            .bind(line.item_id)
            .bind(line.quantity)
            .bind(line.price)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;

            let decremented = sqlx::query(
                r#"
                UPDATE item SET
                    stock = stock - ?2,
                    updatedAt = ?3
                WHERE id = ?1 AND stock >= ?2
                "#,
            )
            .bind(line.item_id)
            .bind(line.quantity)
            .bind(now)
            .execute(&mut *tx)
            .await?;

            if decremented.rows_affected() == 0 {
                warn!(
                    item_id = line.item_id,
                    requested = line.quantity,
                    "Stock changed under a pending sale, rolling back"
                );
                return Err(DbError::StockConflict {
                    item: line.item_name.clone(),
                    requested: line.quantity,
                });
            }

            sale.details.push(detail);
        }

        tx.commit().await?;

        info!(
            sale_id = sale.id,
            total = sale.total_price,
            lines = sale.details.len(),
            "Sale recorded"
        );
        Ok(sale)
    }

    /// All sales with store / staff summaries, newest first.
    pub async fn list(&self) -> DbResult<Vec<Sale>> {
        self.list_between(SaleRange::default()).await
    }

    /// Sales whose `saleAt` falls inside the range, newest first.
    pub async fn list_between(&self, range: SaleRange) -> DbResult<Vec<Sale>> {
        let sql = format!(
            "{SALE_WITH_PARTIES}
            WHERE (?1 IS NULL OR julianday(s.saleAt) >= julianday(?1))
              AND (?2 IS NULL OR julianday(s.saleAt) <= julianday(?2))
            ORDER BY julianday(s.saleAt) DESC, s.id DESC"
        );

        let rows = sqlx::query_as::<_, SaleRow>(&sql)
            .bind(range.start)
            .bind(range.end)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), ?range, "Listed sales");
        Ok(rows.into_iter().map(Sale::from).collect())
    }

    /// One sale with store, staff and every detail line carrying its item.
    pub async fn get(&self, id: i64) -> DbResult<Sale> {
        let sql = format!("{SALE_WITH_PARTIES} WHERE s.id = ?1");

        let row = sqlx::query_as::<_, SaleRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("Sale", id))?;

        let mut sale = Sale::from(row);
        sale.details = self.details(id).await?;
        Ok(sale)
    }

    /// Detail lines of a sale in insertion order.
    pub async fn details(&self, sale_id: i64) -> DbResult<Vec<SaleDetail>> {
        let mut details = sqlx::query_as::<_, SaleDetail>(
            "SELECT * FROM sale_detail WHERE saleId = ? ORDER BY id",
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        for detail in &mut details {
            // deleted items still show up on old sales
            detail.item = sqlx::query_as::<_, Item>("SELECT * FROM item WHERE id = ?")
                .bind(detail.item_id)
                .fetch_optional(&self.pool)
                .await?;
        }

        Ok(details)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
