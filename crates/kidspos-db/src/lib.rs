//! # kidspos-db: Database Layer for KidsPOS
//!
//! This crate provides database access for the KidsPOS back-office.
//! It uses SQLite with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        KidsPOS Data Flow                                │
//! │                                                                         │
//! │  Service (SaleService::create)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    kidspos-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ ItemRepo      │    │ 001_init.sql │  │   │
//! │  │   │ SqlitePool    │◄───│ SaleRepo      │    │ 002_apk.sql  │  │   │
//! │  │   │               │    │ StoreRepo ... │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (DATABASE_PATH, default ./kidspos.db)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - One repository per table
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kidspos_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./kidspos.db")).await?;
//! let items = db.items().list().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::apk::ApkVersionRepository;
pub use repository::item::ItemRepository;
pub use repository::sale::{SaleRepository, SaleRange};
pub use repository::setting::SettingRepository;
pub use repository::staff::StaffRepository;
pub use repository::store::StoreRepository;
