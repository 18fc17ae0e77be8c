//! Store and staff pages. Both are a barcode plus a name, so they share
//! one form and one list layout.

use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Form;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use kidspos_core::{StaffInput, StoreInput};

use super::views::{
    error_banner, escape, form_status, input, page, post_button, see_other, table, PageResult,
};
use crate::error::ApiError;
use crate::extract::ApiPath;
use crate::routes::Route;
use crate::AppState;

/// Static description of one of the two sections.
struct Section {
    plural: &'static str,
    singular: &'static str,
    base: &'static str,
    code_field: &'static str,
}

const STORES: Section = Section {
    plural: "Stores",
    singular: "Store",
    base: "/stores",
    code_field: "storeId",
};

const STAFF: Section = Section {
    plural: "Staff",
    singular: "Staff",
    base: "/staffs",
    code_field: "staffId",
};

pub fn store_routes() -> Vec<Route> {
    vec![
        ("/stores", get(store_list).post(store_create)),
        ("/stores/new", get(store_new)),
        ("/stores/{id}/edit", get(store_edit)),
        ("/stores/{id}", post(store_update)),
        ("/stores/{id}/delete", post(store_delete)),
    ]
}

pub fn staff_routes() -> Vec<Route> {
    vec![
        ("/staffs", get(staff_list).post(staff_create)),
        ("/staffs/new", get(staff_new)),
        ("/staffs/{id}/edit", get(staff_edit)),
        ("/staffs/{id}", post(staff_update)),
        ("/staffs/{id}/delete", post(staff_delete)),
    ]
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NameForm {
    #[serde(alias = "storeId", alias = "staffId")]
    code: String,
    name: String,
}

impl NameForm {
    fn code(&self) -> Option<String> {
        Some(self.code.clone()).filter(|code| !code.trim().is_empty())
    }
}

/// Row of the list table: id, barcode, name, created.
struct Row<'a> {
    id: i64,
    code: &'a str,
    name: &'a str,
    created_at: DateTime<Utc>,
}

fn render_list(section: &Section, rows: &[Row<'_>]) -> Html<String> {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                escape(row.code),
                escape(row.name),
                row.created_at.format("%Y-%m-%d %H:%M").to_string(),
                format!(
                    r#"<a href="{base}/{id}/edit">Edit</a> {delete}"#,
                    base = section.base,
                    id = row.id,
                    delete = post_button(&format!("{}/{}/delete", section.base, row.id), "Delete"),
                ),
            ]
        })
        .collect();

    let body = format!(
        r#"<p><a href="{base}/new">New {singular}</a></p>{table}"#,
        base = section.base,
        singular = section.singular.to_lowercase(),
        table = table(&["Barcode", "Name", "Created", ""], &cells),
    );
    page(section.plural, &body)
}

/// `editing` carries the record id; the barcode is fixed once created.
fn render_form(section: &Section, form: &NameForm, editing: Option<i64>, error: Option<&str>) -> Html<String> {
    let (title, action, code) = match editing {
        Some(id) => (
            format!("Edit {}", section.singular),
            format!("{}/{}", section.base, id),
            format!("<p>Barcode: {}</p>", escape(&form.code)),
        ),
        None => (
            format!("New {}", section.singular),
            section.base.to_string(),
            input("Barcode (blank to generate)", section.code_field, &form.code),
        ),
    };

    let body = format!(
        r#"{error}<form method="post" action="{action}">
{code}
{name}
<button type="submit">Save</button>
</form>"#,
        error = error_banner(error),
        action = escape(&action),
        name = input("Name", "name", &form.name),
    );
    page(&title, &body)
}

fn failed(section: &Section, form: &NameForm, editing: Option<i64>, err: ApiError) -> Response {
    (
        form_status(&err),
        render_form(section, form, editing, Some(&err.message)),
    )
        .into_response()
}

// =============================================================================
// Stores
// =============================================================================

async fn store_list(State(state): State<AppState>) -> PageResult<Html<String>> {
    let stores = state.stores.list().await?;
    let rows: Vec<Row<'_>> = stores
        .iter()
        .map(|s| Row {
            id: s.id,
            code: &s.store_id,
            name: &s.name,
            created_at: s.created_at,
        })
        .collect();
    Ok(render_list(&STORES, &rows))
}

async fn store_new() -> Html<String> {
    render_form(&STORES, &NameForm::default(), None, None)
}

async fn store_create(State(state): State<AppState>, Form(form): Form<NameForm>) -> Response {
    let input = StoreInput {
        store_id: form.code(),
        name: form.name.clone(),
    };
    match state.stores.create(input).await {
        Ok(_) => see_other(STORES.base),
        Err(e) => failed(&STORES, &form, None, e),
    }
}

async fn store_edit(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> PageResult<Html<String>> {
    let store = state.stores.get(id).await?;
    let form = NameForm {
        code: store.store_id,
        name: store.name,
    };
    Ok(render_form(&STORES, &form, Some(id), None))
}

async fn store_update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    Form(mut form): Form<NameForm>,
) -> Response {
    let input = StoreInput {
        store_id: None,
        name: form.name.clone(),
    };
    match state.stores.update(id, input).await {
        Ok(_) => see_other(STORES.base),
        Err(e) => {
            if let Ok(store) = state.stores.get(id).await {
                form.code = store.store_id;
            }
            failed(&STORES, &form, Some(id), e)
        }
    }
}

async fn store_delete(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> PageResult<Response> {
    state.stores.delete(id).await?;
    Ok(see_other(STORES.base))
}

// =============================================================================
// Staff
// =============================================================================

async fn staff_list(State(state): State<AppState>) -> PageResult<Html<String>> {
    let staff = state.staff.list().await?;
    let rows: Vec<Row<'_>> = staff
        .iter()
        .map(|s| Row {
            id: s.id,
            code: &s.staff_id,
            name: &s.name,
            created_at: s.created_at,
        })
        .collect();
    Ok(render_list(&STAFF, &rows))
}

async fn staff_new() -> Html<String> {
    render_form(&STAFF, &NameForm::default(), None, None)
}

async fn staff_create(State(state): State<AppState>, Form(form): Form<NameForm>) -> Response {
    let input = StaffInput {
        staff_id: form.code(),
        name: form.name.clone(),
    };
    match state.staff.create(input).await {
        Ok(_) => see_other(STAFF.base),
        Err(e) => failed(&STAFF, &form, None, e),
    }
}

async fn staff_edit(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> PageResult<Html<String>> {
    let staff = state.staff.get(id).await?;
    let form = NameForm {
        code: staff.staff_id,
        name: staff.name,
    };
    Ok(render_form(&STAFF, &form, Some(id), None))
}

async fn staff_update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    Form(mut form): Form<NameForm>,
) -> Response {
    let input = StaffInput {
        staff_id: None,
        name: form.name.clone(),
    };
    match state.staff.update(id, input).await {
        Ok(_) => see_other(STAFF.base),
        Err(e) => {
            if let Ok(staff) = state.staff.get(id).await {
                form.code = staff.staff_id;
            }
            failed(&STAFF, &form, Some(id), e)
        }
    }
}

async fn staff_delete(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> PageResult<Response> {
    state.staff.delete(id).await?;
    Ok(see_other(STAFF.base))
}
