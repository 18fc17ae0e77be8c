use axum::extract::State;
use axum::response::Html;
use axum::routing::get;

use super::views::{page, PageResult};
use crate::routes::Route;
use crate::AppState;

pub fn routes() -> Vec<Route> {
    vec![("/", get(home))]
}

async fn home(State(state): State<AppState>) -> PageResult<Html<String>> {
    let shop = state
        .settings
        .get("shopName")
        .await
        .map(|s| s.value)
        .unwrap_or_else(|_| "KidsPOS".to_string());

    let body = format!(
        "<p>Welcome to {}.</p>\n<ul>\n\
         <li><a href=\"/sales/new\">Record a sale</a></li>\n\
         <li><a href=\"/items/new\">Add an item</a></li>\n\
         <li><a href=\"/apk/upload\">Upload an APK</a></li>\n</ul>",
        super::views::escape(&shop)
    );
    Ok(page("KidsPOS", &body))
}
