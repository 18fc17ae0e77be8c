//! HTML building blocks for the admin pages.
//!
//! Pages are plain strings assembled with `format!`. Every value that
//! came from the database or the request goes through [`escape`].

use std::fmt::Write as _;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::error::ApiError;

const NAV: &[(&str, &str)] = &[
    ("/", "Home"),
    ("/items", "Items"),
    ("/sales", "Sales"),
    ("/stores", "Stores"),
    ("/staffs", "Staff"),
    ("/settings", "Settings"),
    ("/reports/sales", "Reports"),
    ("/apk", "APK"),
];

/// Escapes text for use in element content and quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Wraps `body` in the shared page chrome.
pub fn page(title: &str, body: &str) -> Html<String> {
    let mut nav = String::new();
    for (href, label) in NAV {
        let _ = write!(nav, r#"<a href="{href}">{label}</a> "#);
    }

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{title} - KidsPOS</title></head>
<body>
<nav>{nav}</nav>
<h1>{title}</h1>
{body}
</body>
</html>
"#,
        title = escape(title),
    ))
}

/// Inline error banner, empty when there is nothing to report.
pub fn error_banner(error: Option<&str>) -> String {
    error
        .map(|message| format!(r#"<p class="error" role="alert">{}</p>"#, escape(message)))
        .unwrap_or_default()
}

/// A labelled text input carrying its current value.
pub fn input(label: &str, name: &str, value: &str) -> String {
    format!(
        r#"<label>{label} <input type="text" name="{name}" value="{value}"></label><br>"#,
        label = escape(label),
        name = escape(name),
        value = escape(value),
    )
}

/// A `<table>` with a header row and pre-rendered cells.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut html = String::from("<table>\n<tr>");
    for header in headers {
        let _ = write!(html, "<th>{}</th>", escape(header));
    }
    html.push_str("</tr>\n");

    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            let _ = write!(html, "<td>{cell}</td>");
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</table>");
    html
}

/// Inline form posting to `action` with a single button.
pub fn post_button(action: &str, label: &str) -> String {
    format!(
        r#"<form method="post" action="{}"><button type="submit">{}</button></form>"#,
        escape(action),
        escape(label),
    )
}

/// `303 See Other` to `to`.
pub fn see_other(to: &str) -> Response {
    Redirect::to(to).into_response()
}

/// Status for a form re-rendered after a failed submit.
pub fn form_status(err: &ApiError) -> StatusCode {
    if err.status().is_server_error() {
        err.status()
    } else {
        StatusCode::BAD_REQUEST
    }
}

/// Error page for requests that have no form to fall back to.
#[derive(Debug)]
pub struct PageError(pub ApiError);

impl From<ApiError> for PageError {
    fn from(err: ApiError) -> Self {
        PageError(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let body = format!(
            r#"{}<p><a href="/">Back to home</a></p>"#,
            error_banner(Some(&self.0.message))
        );
        (self.0.status(), page("Error", &body)).into_response()
    }
}

pub type PageResult<T> = Result<T, PageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<b>"Tom & Jerry's"</b>"#),
            "&lt;b&gt;&quot;Tom &amp; Jerry&#39;s&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_input_keeps_value_escaped() {
        let html = input("Name", "name", "a\"b");
        assert!(html.contains(r#"value="a&quot;b""#));
    }

    #[test]
    fn test_page_error_status() {
        let response = PageError(ApiError::not_found("Item not found: 3")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_form_status() {
        assert_eq!(form_status(&ApiError::not_found("x")), StatusCode::BAD_REQUEST);
        assert_eq!(
            form_status(&ApiError::internal("x")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
