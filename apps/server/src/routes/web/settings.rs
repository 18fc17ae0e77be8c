use axum::extract::State;
use axum::response::Html;
use axum::routing::get;

use super::views::{escape, page, table, PageResult};
use crate::routes::Route;
use crate::AppState;

pub fn routes() -> Vec<Route> {
    vec![("/settings", get(list))]
}

async fn list(State(state): State<AppState>) -> PageResult<Html<String>> {
    let settings = state.settings.list().await?;

    let rows: Vec<Vec<String>> = settings
        .iter()
        .map(|s| {
            vec![
                escape(&s.key),
                escape(&s.value),
                s.kind.as_str().to_string(),
                escape(s.description.as_deref().unwrap_or("")),
            ]
        })
        .collect();

    Ok(page("Settings", &table(&["Key", "Value", "Type", "Description"], &rows)))
}
