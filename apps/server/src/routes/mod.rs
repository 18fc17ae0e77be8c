//! # Route Table
//!
//! Every route the server answers, as `(path, method router)` entries.
//! [`crate::create_router`] folds the table into one `Router`.
//!
//! ```text
//! /api/items ...      JSON   routes::api::items
//! /api/sales ...      JSON   routes::api::sales
//! /api/stores ...     JSON   routes::api::stores
//! /api/staffs ...     JSON   routes::api::staffs
//! /api/settings ...   JSON   routes::api::settings
//! /api/reports ...    JSON   routes::api::reports
//! /api/apk ...        JSON + binary downloads
//! /api/health         JSON
//! /, /items, ...      HTML   routes::web
//! ```

use axum::routing::MethodRouter;

use crate::AppState;

pub mod api;
pub mod web;

/// One route: a path and the handlers for its methods.
pub type Route = (&'static str, MethodRouter<AppState>);

pub fn route_table() -> Vec<Route> {
    let mut table = api::routes();
    table.extend(web::routes());
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_paths_are_unique() {
        let table = route_table();
        let paths: HashSet<&str> = table.iter().map(|(path, _)| *path).collect();
        assert_eq!(paths.len(), table.len());
        assert!(paths.contains("/api/apk/download/latest"));
        assert!(paths.contains("/items/{id}/delete"));
    }
}
