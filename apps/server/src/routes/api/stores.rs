use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Json;
use serde_json::Value;

use kidspos_core::{Store, StoreInput};

use super::deleted;
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::routes::Route;
use crate::AppState;

pub fn routes() -> Vec<Route> {
    vec![
        ("/api/stores", get(list).post(create)),
        ("/api/stores/{id}", get(show).put(update).delete(destroy)),
    ]
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Store>>> {
    Ok(Json(state.stores.list().await?))
}

async fn show(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult<Json<Store>> {
    Ok(Json(state.stores.get(id).await?))
}

async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<StoreInput>,
) -> ApiResult<(StatusCode, Json<Store>)> {
    let store = state.stores.create(input).await?;
    Ok((StatusCode::CREATED, Json(store)))
}

async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<StoreInput>,
) -> ApiResult<Json<Store>> {
    Ok(Json(state.stores.update(id, input).await?))
}

async fn destroy(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult<Json<Value>> {
    let strategy = state.stores.delete(id).await?;
    Ok(deleted("Store", strategy))
}
