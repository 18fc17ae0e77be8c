use axum::extract::State;
use axum::response::Html;
use axum::routing::get;

use super::sales::sales_table;
use super::views::{escape, page, PageResult};
use crate::extract::ApiQuery;
use crate::routes::api::reports::ReportQuery;
use crate::routes::Route;
use crate::AppState;

pub fn routes() -> Vec<Route> {
    vec![("/reports/sales", get(sales_report))]
}

async fn sales_report(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ReportQuery>,
) -> PageResult<Html<String>> {
    let report = state.sales.report(query.range()?).await?;

    let body = format!(
        r#"<form method="get" action="/reports/sales">
<label>From <input type="date" name="startDate" value="{start}"></label>
<label>To <input type="date" name="endDate" value="{end}"></label>
<button type="submit">Filter</button>
</form>
<p>Sales: {count} / Total: {amount} yen</p>
{table}"#,
        start = escape(query.start_date.as_deref().unwrap_or("")),
        end = escape(query.end_date.as_deref().unwrap_or("")),
        count = report.total_sales,
        amount = report.total_amount,
        table = sales_table(&report.sales),
    );
    Ok(page("Sales Report", &body))
}
