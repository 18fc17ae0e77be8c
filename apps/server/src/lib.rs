//! # KidsPOS Server
//!
//! HTTP server for the KidsPOS back-office: admin web pages, the JSON API
//! used by the register app, and APK distribution.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         KidsPOS Server                                  │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Route table  (routes::route_table)                              │  │
//! │  │                                                                  │  │
//! │  │   /api/...   JSON handlers        /...   HTML handlers           │  │
//! │  └──────────────────────────────┬───────────────────────────────────┘  │
//! │                                 │ State<AppState>                       │
//! │  ┌──────────────────────────────▼───────────────────────────────────┐  │
//! │  │  Services                                                        │  │
//! │  │   ItemService  SaleService  StoreService  StaffService           │  │
//! │  │   SettingService  ApkService ──► ApkStorage (upload dir)         │  │
//! │  └──────────────────────────────┬───────────────────────────────────┘  │
//! │                                 │                                       │
//! │  ┌──────────────────────────────▼───────────────────────────────────┐  │
//! │  │  kidspos-db  (SQLite pool, repositories)                         │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! See [`config::Config`]. The important variables:
//! - `DATABASE_PATH` - SQLite file (default: ./kidspos.db)
//! - `PORT` - HTTP port (default: 8080)
//! - `APK_UPLOAD_DIR` - where uploaded APKs are stored
//! - `APK_MAX_FILE_SIZE` - upload limit in bytes (default: 100 MiB)

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod services;
pub mod storage;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use kidspos_db::Database;

pub use config::Config;
pub use error::{ApiError, ApiResult};

use crate::services::{
    ApkService, ItemService, SaleService, SettingService, StaffService, StoreService,
};
use crate::storage::ApkStorage;

/// Headroom above the APK limit for the other multipart fields.
const FORM_OVERHEAD: u64 = 1024 * 1024;

/// Shared application state.
///
/// Built once at startup: `Database` → repositories → services.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<Config>,
    pub items: ItemService,
    pub sales: SaleService,
    pub stores: StoreService,
    pub staff: StaffService,
    pub settings: SettingService,
    pub apk: ApkService,
}

impl AppState {
    pub fn new(db: Database, config: Config) -> Self {
        let storage = ApkStorage::new(config.apk_upload_dir.clone());

        AppState {
            items: ItemService::new(db.items()),
            sales: SaleService::new(db.sales(), db.items(), db.stores(), db.staff()),
            stores: StoreService::new(db.stores()),
            staff: StaffService::new(db.staff()),
            settings: SettingService::new(db.settings()),
            apk: ApkService::new(db.apk_versions(), storage, config.apk_max_file_size),
            config: Arc::new(config),
            db,
        }
    }
}

/// Builds the application router from the route table.
pub fn create_router(state: AppState) -> Router {
    let body_limit = usize::try_from(state.config.apk_max_file_size.saturating_add(FORM_OVERHEAD))
        .unwrap_or(usize::MAX);

    let router = routes::route_table()
        .into_iter()
        .fold(Router::new(), |router, (path, handler)| router.route(path, handler));

    router
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
