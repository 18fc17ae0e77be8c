//! Staff endpoints, also mounted as `/api/users`. Badge barcodes work
//! wherever an id does.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Json;
use serde_json::Value;

use kidspos_core::{Staff, StaffInput};

use super::deleted;
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::routes::Route;
use crate::AppState;

pub fn routes() -> Vec<Route> {
    vec![
        ("/api/staffs", get(list).post(create)),
        ("/api/staffs/{id}", get(show).put(update).delete(destroy)),
        (
            "/api/staffs/barcode/{barcode}",
            get(show_by_barcode)
                .put(update_by_barcode)
                .delete(destroy_by_barcode),
        ),
        // register apps address staff as users, keyed by badge barcode
        ("/api/users", get(list).post(create)),
        (
            "/api/users/{barcode}",
            get(show_by_barcode)
                .put(update_by_barcode)
                .delete(destroy_by_barcode),
        ),
    ]
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Staff>>> {
    Ok(Json(state.staff.list().await?))
}

async fn show(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult<Json<Staff>> {
    Ok(Json(state.staff.get(id).await?))
}

async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<StaffInput>,
) -> ApiResult<(StatusCode, Json<Staff>)> {
    let staff = state.staff.create(input).await?;
    Ok((StatusCode::CREATED, Json(staff)))
}

async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<StaffInput>,
) -> ApiResult<Json<Staff>> {
    Ok(Json(state.staff.update(id, input).await?))
}

async fn destroy(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult<Json<Value>> {
    let strategy = state.staff.delete(id).await?;
    Ok(deleted("Staff", strategy))
}

async fn show_by_barcode(
    State(state): State<AppState>,
    ApiPath(barcode): ApiPath<String>,
) -> ApiResult<Json<Staff>> {
    Ok(Json(state.staff.get_by_barcode(&barcode).await?))
}

async fn update_by_barcode(
    State(state): State<AppState>,
    ApiPath(barcode): ApiPath<String>,
    ApiJson(input): ApiJson<StaffInput>,
) -> ApiResult<Json<Staff>> {
    Ok(Json(state.staff.update_by_barcode(&barcode, input).await?))
}

async fn destroy_by_barcode(
    State(state): State<AppState>,
    ApiPath(barcode): ApiPath<String>,
) -> ApiResult<Json<Value>> {
    let strategy = state.staff.delete_by_barcode(&barcode).await?;
    Ok(deleted("Staff", strategy))
}
