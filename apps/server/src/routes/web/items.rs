use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Form;
use serde::Deserialize;

use kidspos_core::{Item, ItemInput};

use super::form_number;
use super::views::{
    error_banner, escape, form_status, input, page, post_button, see_other, table, PageResult,
};
use crate::error::{ApiError, ApiResult};
use crate::extract::ApiPath;
use crate::routes::Route;
use crate::AppState;

pub fn routes() -> Vec<Route> {
    vec![
        ("/items", get(list).post(create)),
        ("/items/new", get(new_form)),
        ("/items/{id}/edit", get(edit_form)),
        ("/items/{id}", post(update)),
        ("/items/{id}/delete", post(destroy)),
    ]
}

/// Submitted item form, kept as text so it can be re-rendered verbatim.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ItemForm {
    item_id: String,
    name: String,
    price: String,
    stock: String,
}

impl ItemForm {
    fn from_item(item: &Item) -> Self {
        ItemForm {
            item_id: item.item_id.clone(),
            name: item.name.clone(),
            price: item.price.to_string(),
            stock: item.stock.to_string(),
        }
    }

    fn to_input(&self) -> ApiResult<ItemInput> {
        Ok(ItemInput {
            item_id: Some(self.item_id.clone()).filter(|code| !code.trim().is_empty()),
            name: self.name.clone(),
            price: form_number("price", &self.price).map_err(ApiError::validation)?,
            stock: form_number("stock", &self.stock).map_err(ApiError::validation)?,
        })
    }
}

fn render_form(title: &str, action: &str, form: &ItemForm, error: Option<&str>, editing: bool) -> Html<String> {
    let code = if editing {
        format!("<p>Barcode: {}</p>", escape(&form.item_id))
    } else {
        input("Barcode (blank to generate)", "itemId", &form.item_id)
    };

    let body = format!(
        r#"{error}<form method="post" action="{action}">
{code}
{name}
{price}
{stock}
<button type="submit">Save</button>
</form>"#,
        error = error_banner(error),
        action = escape(action),
        name = input("Name", "name", &form.name),
        price = input("Price", "price", &form.price),
        stock = input("Stock", "stock", &form.stock),
    );
    page(title, &body)
}

async fn list(State(state): State<AppState>) -> PageResult<Html<String>> {
    let items = state.items.list().await?;

    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            vec![
                escape(&item.item_id),
                escape(&item.name),
                item.price.to_string(),
                item.stock.to_string(),
                format!(
                    r#"<a href="/items/{id}/edit">Edit</a> {delete}"#,
                    id = item.id,
                    delete = post_button(&format!("/items/{}/delete", item.id), "Delete"),
                ),
            ]
        })
        .collect();

    let body = format!(
        r#"<p><a href="/items/new">New item</a></p>{}"#,
        table(&["Barcode", "Name", "Price", "Stock", ""], &rows)
    );
    Ok(page("Items", &body))
}

async fn new_form() -> Html<String> {
    render_form("New Item", "/items", &ItemForm::default(), None, false)
}

async fn create(State(state): State<AppState>, Form(form): Form<ItemForm>) -> Response {
    let result = match form.to_input() {
        Ok(input) => state.items.create(input).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(_) => see_other("/items"),
        Err(e) => (
            form_status(&e),
            render_form("New Item", "/items", &form, Some(&e.message), false),
        )
            .into_response(),
    }
}

async fn edit_form(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> PageResult<Html<String>> {
    let item = state.items.get(id).await?;
    let action = format!("/items/{id}");
    Ok(render_form("Edit Item", &action, &ItemForm::from_item(&item), None, true))
}

async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    Form(mut form): Form<ItemForm>,
) -> Response {
    let result = match form.to_input() {
        Ok(input) => state.items.update(id, input).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(_) => see_other("/items"),
        Err(e) => {
            if let Ok(item) = state.items.get(id).await {
                form.item_id = item.item_id;
            }
            let action = format!("/items/{id}");
            (
                form_status(&e),
                render_form("Edit Item", &action, &form, Some(&e.message), true),
            )
                .into_response()
        }
    }
}

async fn destroy(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> PageResult<Response> {
    state.items.delete(id).await?;
    Ok(see_other("/items"))
}
