//! # Repository Module
//!
//! Database repository implementations for KidsPOS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Service                                                               │
//! │       │                                                                 │
//! │       │  db.items().get(7)                                             │
//! │       ▼                                                                 │
//! │  ItemRepository                                                        │
//! │  ├── list(&self)                                                       │
//! │  ├── get(&self, id)                                                    │
//! │  ├── insert(&self, code, input)                                        │
//! │  └── soft_delete(&self, id)                                            │
//! │       │                                                                 │
//! │       │  SQL Query (sqlx::query_as + FromRow)                          │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ItemRepository`](item::ItemRepository) - Items, soft delete, barcode lookup
//! - [`StoreRepository`](store::StoreRepository) - Stores, guarded hard delete
//! - [`StaffRepository`](staff::StaffRepository) - Staff, guarded hard delete, barcode ops
//! - [`SaleRepository`](sale::SaleRepository) - The sale transaction and sale reads
//! - [`SettingRepository`](setting::SettingRepository) - Key/value settings
//! - [`ApkVersionRepository`](apk::ApkVersionRepository) - APK release metadata

pub mod apk;
pub mod item;
pub mod sale;
pub mod setting;
pub mod staff;
pub mod store;

#[cfg(test)]
pub(crate) async fn test_db() -> crate::Database {
    crate::Database::new(crate::DbConfig::in_memory())
        .await
        .expect("in-memory database")
}
