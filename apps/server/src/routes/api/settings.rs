use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use kidspos_core::{Setting, SettingInput};

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::routes::Route;
use crate::AppState;

pub fn routes() -> Vec<Route> {
    vec![
        ("/api/settings", get(list).post(create)),
        ("/api/settings/{key}", get(show).put(update).delete(destroy)),
    ]
}

/// Body of `PUT /api/settings/{key}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SettingValue {
    value: String,
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Setting>>> {
    Ok(Json(state.settings.list().await?))
}

async fn show(
    State(state): State<AppState>,
    ApiPath(key): ApiPath<String>,
) -> ApiResult<Json<Setting>> {
    Ok(Json(state.settings.get(&key).await?))
}

async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<SettingInput>,
) -> ApiResult<(StatusCode, Json<Setting>)> {
    let setting = state.settings.create(input).await?;
    Ok((StatusCode::CREATED, Json(setting)))
}

async fn update(
    State(state): State<AppState>,
    ApiPath(key): ApiPath<String>,
    ApiJson(body): ApiJson<SettingValue>,
) -> ApiResult<Json<Setting>> {
    Ok(Json(state.settings.update(&key, &body.value).await?))
}

async fn destroy(
    State(state): State<AppState>,
    ApiPath(key): ApiPath<String>,
) -> ApiResult<Json<Value>> {
    state.settings.delete(&key).await?;
    Ok(Json(json!({ "message": "Setting deleted successfully" })))
}
