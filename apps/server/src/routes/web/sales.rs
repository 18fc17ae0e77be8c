use std::fmt::Write as _;

use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Form;

use kidspos_core::{Item, NewSale, NewSaleDetail, Sale, Staff, Store};

use super::form_number;
use super::views::{error_banner, escape, form_status, input, page, see_other, table, PageResult};
use crate::error::{ApiError, ApiResult};
use crate::routes::Route;
use crate::AppState;

/// Blank item rows offered on the new sale form.
const FORM_LINES: usize = 5;

pub fn routes() -> Vec<Route> {
    vec![
        ("/sales", get(list).post(create)),
        ("/sales/new", get(new_form)),
    ]
}

/// Submitted sale form. Line fields repeat as `itemId[]` / `quantity[]`.
#[derive(Debug, Default, Clone, PartialEq)]
struct SaleForm {
    store_id: String,
    staff_id: String,
    deposit: String,
    lines: Vec<(String, String)>,
}

impl SaleForm {
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut form = SaleForm::default();
        let mut item_ids = Vec::new();
        let mut quantities = Vec::new();

        for (key, value) in pairs {
            match key.as_str() {
                "storeId" => form.store_id = value,
                "staffId" => form.staff_id = value,
                "deposit" => form.deposit = value,
                "itemId[]" | "itemId" => item_ids.push(value),
                "quantity[]" | "quantity" => quantities.push(value),
                _ => {}
            }
        }

        quantities.resize(item_ids.len().max(quantities.len()), String::new());
        item_ids.resize(quantities.len(), String::new());
        form.lines = item_ids.into_iter().zip(quantities).collect();
        form
    }

    fn to_sale(&self) -> ApiResult<NewSale> {
        let number = |field: &str, raw: &str| form_number(field, raw).map_err(ApiError::validation);

        let mut details = Vec::new();
        for (item_id, quantity) in &self.lines {
            // untouched rows of the form
            if item_id.trim().is_empty() && quantity.trim().is_empty() {
                continue;
            }
            details.push(NewSaleDetail {
                item_id: number("itemId", item_id)?,
                quantity: number("quantity", quantity)?,
                price: None,
            });
        }

        Ok(NewSale {
            store_id: number("storeId", &self.store_id)?,
            staff_id: number("staffId", &self.staff_id)?,
            deposit: Some(number("deposit", &self.deposit)?),
            sale_at: None,
            details,
        })
    }
}

fn options(selected: &str, choices: impl Iterator<Item = (i64, String)>) -> String {
    let mut html = String::from(r#"<option value="">--</option>"#);
    for (id, label) in choices {
        let id = id.to_string();
        let mark = if id == selected { " selected" } else { "" };
        let _ = write!(html, r#"<option value="{id}"{mark}>{}</option>"#, escape(&label));
    }
    html
}

fn render_form(
    form: &SaleForm,
    stores: &[Store],
    staff: &[Staff],
    items: &[Item],
    error: Option<&str>,
) -> Html<String> {
    let mut lines = form.lines.clone();
    lines.resize(lines.len().max(FORM_LINES), (String::new(), String::new()));

    let mut rows = String::new();
    for (item_id, quantity) in &lines {
        let choices = items
            .iter()
            .map(|i| (i.id, format!("{} ({} yen, {} left)", i.name, i.price, i.stock)));
        let _ = writeln!(
            rows,
            r#"<p><select name="itemId[]">{}</select> <input type="number" name="quantity[]" value="{}" min="1"></p>"#,
            options(item_id, choices),
            escape(quantity),
        );
    }

    let body = format!(
        r#"{error}<form method="post" action="/sales">
<label>Store <select name="storeId">{stores}</select></label><br>
<label>Staff <select name="staffId">{staff}</select></label><br>
{rows}{deposit}
<button type="submit">Record sale</button>
</form>"#,
        error = error_banner(error),
        stores = options(&form.store_id, stores.iter().map(|s| (s.id, s.name.clone()))),
        staff = options(&form.staff_id, staff.iter().map(|s| (s.id, s.name.clone()))),
        deposit = input("Deposit (blank for exact)", "deposit", &form.deposit),
    );
    page("New Sale", &body)
}

fn sale_rows(sales: &[Sale]) -> Vec<Vec<String>> {
    sales
        .iter()
        .map(|sale| {
            vec![
                sale.id.to_string(),
                sale.sale_at.format("%Y-%m-%d %H:%M").to_string(),
                escape(sale.store.as_ref().map_or("", |s| s.name.as_str())),
                escape(sale.staff.as_ref().map_or("", |s| s.name.as_str())),
                sale.total_price.to_string(),
                sale.deposit.to_string(),
                sale.change().to_string(),
            ]
        })
        .collect()
}

pub(crate) const SALE_HEADERS: &[&str] = &["#", "Date", "Store", "Staff", "Total", "Deposit", "Change"];

pub(crate) fn sales_table(sales: &[Sale]) -> String {
    table(SALE_HEADERS, &sale_rows(sales))
}

async fn list(State(state): State<AppState>) -> PageResult<Html<String>> {
    let sales = state.sales.list().await?;
    let body = format!(
        r#"<p><a href="/sales/new">New sale</a></p>{}"#,
        sales_table(&sales)
    );
    Ok(page("Sales", &body))
}

async fn form_page(state: &AppState, form: &SaleForm, error: Option<&str>) -> PageResult<Html<String>> {
    let stores = state.stores.list().await?;
    let staff = state.staff.list().await?;
    let items = state.items.list().await?;
    Ok(render_form(form, &stores, &staff, &items, error))
}

async fn new_form(State(state): State<AppState>) -> PageResult<Html<String>> {
    form_page(&state, &SaleForm::default(), None).await
}

async fn create(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> PageResult<Response> {
    let form = SaleForm::from_pairs(pairs);

    let result = match form.to_sale() {
        Ok(sale) => state.sales.create(sale).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(_) => Ok(see_other("/sales")),
        Err(e) => {
            let html = form_page(&state, &form, Some(&e.message)).await?;
            Ok((form_status(&e), html).into_response())
        }
    }
}
