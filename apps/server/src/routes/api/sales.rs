use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Json;

use kidspos_core::{NewSale, Sale};

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::routes::Route;
use crate::AppState;

pub fn routes() -> Vec<Route> {
    vec![
        ("/api/sales", get(list).post(create)),
        ("/api/sales/{id}", get(show)),
    ]
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Sale>>> {
    Ok(Json(state.sales.list().await?))
}

async fn show(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult<Json<Sale>> {
    Ok(Json(state.sales.get(id).await?))
}

async fn create(
    State(state): State<AppState>,
    ApiJson(sale): ApiJson<NewSale>,
) -> ApiResult<(StatusCode, Json<Sale>)> {
    let sale = state.sales.create(sale).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}
