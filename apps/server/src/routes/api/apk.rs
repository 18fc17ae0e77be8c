//! # APK Distribution API
//!
//! ```text
//! GET    /api/apk/version/latest            newest active release
//! GET    /api/apk/version/check?currentVersionCode=N
//! GET    /api/apk/version/all               active releases
//! GET    /api/apk/download/{id}             binary
//! GET    /api/apk/download/latest           binary
//! POST   /api/apk/upload                    multipart
//! DELETE /api/apk/version/{id}
//! PUT    /api/apk/version/{id}/deactivate
//! ```

use axum::body::Body;
use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio_util::io::ReaderStream;

use kidspos_core::apk::APK_CONTENT_TYPE;
use kidspos_core::{ApkVersion, UpdateCheck};

use crate::error::{ApiError, ApiResult};
use crate::extract::{read_apk_upload, ApiMultipart, ApiPath, ApiQuery};
use crate::routes::Route;
use crate::services::ApkDownload;
use crate::AppState;

pub fn routes() -> Vec<Route> {
    vec![
        ("/api/apk/version/latest", get(latest)),
        ("/api/apk/version/check", get(check)),
        ("/api/apk/version/all", get(all)),
        ("/api/apk/download/latest", get(download_latest)),
        ("/api/apk/download/{id}", get(download)),
        ("/api/apk/upload", post(upload)),
        ("/api/apk/version/{id}", delete(destroy)),
        ("/api/apk/version/{id}/deactivate", put(deactivate)),
    ]
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CheckQuery {
    current_version_code: Option<String>,
}

async fn latest(State(state): State<AppState>) -> ApiResult<Json<ApkVersion>> {
    state
        .apk
        .latest()
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("No APK versions available"))
}

async fn check(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CheckQuery>,
) -> ApiResult<Json<UpdateCheck>> {
    let raw = query
        .current_version_code
        .filter(|raw| !raw.trim().is_empty())
        .ok_or_else(|| ApiError::validation("currentVersionCode is required"))?;

    let code: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ApiError::validation("Invalid version code"))?;

    Ok(Json(state.apk.check_for_update(code).await?))
}

async fn all(State(state): State<AppState>) -> ApiResult<Json<Vec<ApkVersion>>> {
    Ok(Json(state.apk.list_active().await?))
}

async fn download(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult<Response> {
    Ok(stream_apk(state.apk.open(id).await?))
}

async fn download_latest(State(state): State<AppState>) -> ApiResult<Response> {
    Ok(stream_apk(state.apk.open_latest().await?))
}

/// Streams a release file as an attachment.
/// `Content-Disposition` value with the file name as a quoted string.
fn attachment(file_name: &str) -> String {
    let mut quoted = String::with_capacity(file_name.len());
    for c in file_name.chars() {
        match c {
            '"' | '\\' => {
                quoted.push('\\');
                quoted.push(c);
            }
            c if c.is_control() => quoted.push('_'),
            c => quoted.push(c),
        }
    }
    format!("attachment; filename=\"{quoted}\"")
}

pub(crate) fn stream_apk(download: ApkDownload) -> Response {
    let body = Body::from_stream(ReaderStream::new(download.file));

    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, APK_CONTENT_TYPE.to_string()),
            (CONTENT_LENGTH, download.len.to_string()),
            (
                CONTENT_DISPOSITION,
                attachment(&download.apk.file_name),
            ),
        ],
        body,
    )
        .into_response()
}

async fn upload(
    State(state): State<AppState>,
    ApiMultipart(multipart): ApiMultipart,
) -> ApiResult<(StatusCode, Json<ApkVersion>)> {
    let request = read_apk_upload(multipart, state.apk.max_file_size()).await?;
    let apk = state.apk.upload(request).await?;
    Ok((StatusCode::CREATED, Json(apk)))
}

async fn destroy(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult<Json<Value>> {
    state.apk.delete(id).await?;
    Ok(Json(json!({ "message": "APK version deleted successfully" })))
}

async fn deactivate(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<ApkVersion>> {
    Ok(Json(state.apk.deactivate(id).await?))
}
