//! # kidspos-core: Pure Business Logic for KidsPOS
//!
//! This crate holds the domain of the KidsPOS back-office as pure functions
//! and plain data types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        KidsPOS Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │             apps/server (Axum: web UI + JSON API)               │   │
//! │  │       handlers ──► services (validate, orchestrate)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ kidspos-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   sale    │  │    apk    │  │ validation│  │   │
//! │  │   │  Item     │  │ SalePlan  │  │ uploads   │  │   rules   │  │   │
//! │  │   │  Sale     │  │ totals    │  │ filenames │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  kidspos-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain entities (Item, Store, Staff, Sale, Setting, ApkVersion)
//! - [`sale`] - Sale planning: line pricing, stock checks, totals
//! - [`apk`] - APK upload rules and stored file naming
//! - [`ids`] - Generated external ids (`ITEM-1a2b3c4d`)
//! - [`error`] - Domain error types
//! - [`validation`] - Field validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use kidspos_core::validation::validate_price;
//!
//! assert!(validate_price(100).is_ok());
//! assert!(validate_price(-1).is_err());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod apk;
pub mod error;
pub mod ids;
pub mod sale;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use sale::{plan_sale, PlannedLine, SalePlan};
pub use types::*;
