//! JSON API under `/api`.
//!
//! Errors are answered as `{"error": "..."}` through [`crate::ApiError`].

use axum::Json;
use serde_json::{json, Value};

use kidspos_core::DeleteStrategy;

use super::Route;

pub mod apk;
pub mod health;
pub mod items;
pub mod reports;
pub mod sales;
pub mod settings;
pub mod staffs;
pub mod stores;

pub fn routes() -> Vec<Route> {
    [
        items::routes(),
        sales::routes(),
        stores::routes(),
        staffs::routes(),
        settings::routes(),
        reports::routes(),
        apk::routes(),
        health::routes(),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Body of a successful delete.
pub(crate) fn deleted(entity: &str, strategy: DeleteStrategy) -> Json<Value> {
    Json(json!({
        "message": format!("{entity} deleted successfully"),
        "strategy": strategy.as_str(),
    }))
}
