use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;

use super::views::{error_banner, escape, form_status, page, see_other, table, PageResult};
use crate::error::ApiError;
use crate::extract::read_apk_upload;
use crate::routes::Route;
use crate::AppState;

pub fn routes() -> Vec<Route> {
    vec![
        ("/apk", get(list)),
        ("/apk/upload", get(upload_form).post(upload)),
    ]
}

async fn list(State(state): State<AppState>) -> PageResult<Html<String>> {
    let versions = state.apk.list_all().await?;

    let rows: Vec<Vec<String>> = versions
        .iter()
        .map(|apk| {
            vec![
                escape(&apk.version),
                apk.version_code.to_string(),
                apk.file_size.to_string(),
                if apk.state.is_active() { "active" } else { "inactive" }.to_string(),
                apk.uploaded_at.format("%Y-%m-%d %H:%M").to_string(),
                format!(r#"<a href="/api/apk/download/{}">Download</a>"#, apk.id),
            ]
        })
        .collect();

    let body = format!(
        r#"<p><a href="/apk/upload">Upload APK</a></p>{}"#,
        table(&["Version", "Code", "Size", "State", "Uploaded", ""], &rows)
    );
    Ok(page("APK Versions", &body))
}

/// Upload form; submitted values are kept on failure except the file.
fn render_form(version: &str, version_code: &str, notes: &str, max: u64, error: Option<&str>) -> Html<String> {
    let body = format!(
        r#"{error}<form method="post" action="/apk/upload" enctype="multipart/form-data">
<label>APK file <input type="file" name="file" accept=".apk"></label><br>
<label>Version <input type="text" name="version" value="{version}"></label><br>
<label>Version code <input type="number" name="versionCode" value="{code}" min="1"></label><br>
<label>Release notes <textarea name="releaseNotes">{notes}</textarea></label><br>
<p>Maximum size: {max} bytes</p>
<button type="submit">Upload</button>
</form>"#,
        error = error_banner(error),
        version = escape(version),
        code = escape(version_code),
        notes = escape(notes),
    );
    page("Upload APK", &body)
}

async fn upload_form(State(state): State<AppState>) -> Html<String> {
    render_form("", "", "", state.apk.max_file_size(), None)
}

async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let max = state.apk.max_file_size();

    let parsed = match multipart {
        Ok(multipart) => read_apk_upload(multipart, max).await,
        Err(rejection) => Err(ApiError::from(rejection)),
    };
    let request = match parsed {
        Ok(request) => request,
        Err(e) => {
            return (form_status(&e), render_form("", "", "", max, Some(&e.message))).into_response()
        }
    };

    let version = request.version.clone();
    let code = if request.version_code > 0 {
        request.version_code.to_string()
    } else {
        String::new()
    };
    let notes = request.release_notes.clone().unwrap_or_default();

    match state.apk.upload(request).await {
        Ok(_) => see_other("/apk"),
        Err(e) => (
            form_status(&e),
            render_form(&version, &code, &notes, max, Some(&e.message)),
        )
            .into_response(),
    }
}
