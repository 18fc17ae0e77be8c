use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Json;
use serde_json::Value;

use kidspos_core::{Item, ItemInput};

use super::deleted;
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::routes::Route;
use crate::AppState;

pub fn routes() -> Vec<Route> {
    vec![
        ("/api/items", get(list).post(create)),
        ("/api/items/{id}", get(show).put(update).delete(destroy)),
        ("/api/items/barcode/{barcode}", get(by_barcode)),
    ]
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Item>>> {
    Ok(Json(state.items.list().await?))
}

async fn show(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult<Json<Item>> {
    Ok(Json(state.items.get(id).await?))
}

async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<ItemInput>,
) -> ApiResult<(StatusCode, Json<Item>)> {
    let item = state.items.create(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<ItemInput>,
) -> ApiResult<Json<Item>> {
    Ok(Json(state.items.update(id, input).await?))
}

async fn destroy(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult<Json<Value>> {
    let strategy = state.items.delete(id).await?;
    Ok(deleted("Item", strategy))
}

async fn by_barcode(
    State(state): State<AppState>,
    ApiPath(barcode): ApiPath<String>,
) -> ApiResult<Json<Item>> {
    Ok(Json(state.items.find_by_barcode(&barcode).await?))
}
