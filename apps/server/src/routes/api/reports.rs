//! Sales reports.
//!
//! `startDate` / `endDate` accept either `YYYY-MM-DD` or RFC 3339. A bare
//! end date covers that whole day.

use axum::extract::State;
use axum::routing::get;
use axum::Json;
use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;

use kidspos_core::SalesReport;
use kidspos_db::SaleRange;

use crate::error::{ApiError, ApiResult, ErrorCode};
use crate::extract::ApiQuery;
use crate::routes::Route;
use crate::AppState;

pub fn routes() -> Vec<Route> {
    vec![
        ("/api/reports/sales", get(sales_report)),
        ("/api/reports/sales/excel", get(sales_excel)),
        ("/api/reports/sales/pdf", get(sales_pdf)),
    ]
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct ReportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl ReportQuery {
    pub(crate) fn range(&self) -> ApiResult<SaleRange> {
        Ok(SaleRange {
            start: parse_bound(self.start_date.as_deref(), Bound::Start)?,
            end: parse_bound(self.end_date.as_deref(), Bound::End)?,
        })
    }
}

#[derive(Debug, Clone, Copy)]
enum Bound {
    Start,
    End,
}

fn parse_bound(raw: Option<&str>, bound: Bound) -> ApiResult<Option<DateTime<Utc>>> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(raw) => raw,
    };

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(instant.with_timezone(&Utc)));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ApiError::validation(format!("Invalid date: {raw}")))?;

    let instant = match bound {
        Bound::Start => date.and_time(NaiveTime::MIN).and_utc(),
        // last instant of the day: next midnight minus one millisecond
        Bound::End => date
            .checked_add_days(Days::new(1))
            .map(|next| next.and_time(NaiveTime::MIN).and_utc() - chrono::Duration::milliseconds(1))
            .ok_or_else(|| ApiError::validation(format!("Invalid date: {raw}")))?,
    };
    Ok(Some(instant))
}

async fn sales_report(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ReportQuery>,
) -> ApiResult<Json<SalesReport>> {
    let range = query.range()?;
    Ok(Json(state.sales.report(range).await?))
}

async fn sales_excel() -> ApiError {
    ApiError::new(ErrorCode::NotImplemented, "Excel export is not implemented")
}

async fn sales_pdf() -> ApiError {
    ApiError::new(ErrorCode::NotImplemented, "PDF export is not implemented")
}
