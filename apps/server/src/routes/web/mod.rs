//! Server-rendered admin pages.
//!
//! Forms post `application/x-www-form-urlencoded` (multipart for APK
//! uploads). A successful submit answers `303 See Other`; a failed one
//! re-renders the form with the submitted values and the error inline.

use super::Route;

pub mod apk;
pub mod home;
pub mod items;
pub mod people;
pub mod reports;
pub mod sales;
pub mod settings;
pub mod views;

pub fn routes() -> Vec<Route> {
    [
        home::routes(),
        items::routes(),
        sales::routes(),
        people::store_routes(),
        people::staff_routes(),
        settings::routes(),
        reports::routes(),
        apk::routes(),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Parses a numeric form field. Blank means zero.
pub(crate) fn form_number(field: &str, raw: &str) -> Result<i64, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse().map_err(|_| format!("{field} must be a number"))
}
