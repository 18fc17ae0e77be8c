//! Service layer.
//!
//! Each service validates its input with `kidspos-core` rules and
//! orchestrates one or more repositories. Handlers for both the JSON API
//! and the web pages call into the same services.

pub mod apk_service;
pub mod item_service;
pub mod sale_service;
pub mod setting_service;
pub mod staff_service;
pub mod store_service;

pub use apk_service::{ApkDownload, ApkService, ApkUploadRequest};
pub use item_service::ItemService;
pub use sale_service::SaleService;
pub use setting_service::SettingService;
pub use staff_service::StaffService;
pub use store_service::StoreService;

#[cfg(test)]
pub(crate) async fn test_db() -> kidspos_db::Database {
    kidspos_db::Database::new(kidspos_db::DbConfig::in_memory())
        .await
        .expect("in-memory database")
}
