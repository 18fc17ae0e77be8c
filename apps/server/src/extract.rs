//! Request extractors whose rejections are [`ApiError`]s, so malformed
//! input gets the same `{"error": ...}` body as every other failure.

use axum::extract::{FromRequest, FromRequestParts, Multipart, Request};
use axum::http::StatusCode;
use kidspos_core::ValidationError;

use crate::error::{ApiError, ApiResult};
use crate::services::ApkUploadRequest;

/// `axum::Json` with an `ApiError` rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Path` answering `400 {"error": "Invalid ID"}` on bad input.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// `axum::extract::Query` with an `ApiError` rejection.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// `axum::extract::Multipart` with an `ApiError` rejection.
#[derive(Debug)]
pub struct ApiMultipart(pub Multipart);

impl<S> FromRequest<S> for ApiMultipart
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Ok(ApiMultipart(Multipart::from_request(req, state).await?))
    }
}

/// Reads the APK upload form: `file`, `version`, `versionCode`,
/// `releaseNotes`. Unknown parts are skipped.
///
/// The file is read chunk by chunk and rejected as soon as it grows past
/// `max_file_size`.
pub async fn read_apk_upload(mut multipart: Multipart, max_file_size: u64) -> ApiResult<ApkUploadRequest> {
    let mut request = ApkUploadRequest::default();
    let too_large = || ApiError::from(ValidationError::FileTooLarge { max_bytes: max_file_size });

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => return Err(too_large()),
            Err(e) => return Err(e.into()),
        };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                request.file_name = field.file_name().map(str::to_string);
                let mut field = field;
                let mut bytes = Vec::new();
                loop {
                    let chunk = match field.chunk().await {
                        Ok(Some(chunk)) => chunk,
                        Ok(None) => break,
                        Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => return Err(too_large()),
                        Err(e) => return Err(e.into()),
                    };
                    if (bytes.len() + chunk.len()) as u64 > max_file_size {
                        return Err(too_large());
                    }
                    bytes.extend_from_slice(&chunk);
                }
                request.bytes = bytes.into();
            }
            "version" => request.version = field.text().await?,
            "versionCode" => {
                let raw = field.text().await?;
                let raw = raw.trim();
                if !raw.is_empty() {
                    request.version_code = raw
                        .parse()
                        .map_err(|_| ApiError::validation("Invalid version code"))?;
                }
            }
            "releaseNotes" => request.release_notes = Some(field.text().await?),
            _ => {}
        }
    }

    Ok(request)
}
