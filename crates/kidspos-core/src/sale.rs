//! # Sale Planning
//!
//! Turns an incoming [`NewSale`] into a fully priced [`SalePlan`] that the
//! database layer can persist in one transaction.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sale Creation Flow                               │
//! │                                                                         │
//! │  NewSale ──► check_sale_header ──► plan_sale ──► SalePlan ──► DB tx     │
//! │              │                     │                          │         │
//! │              │ store/staff set     │ item exists              │ header  │
//! │              │ ≥1 line             │ qty ≤ stock              │ lines   │
//! │              │ qty > 0             │ price default            │ stock-= │
//! │              │                     │ checked totals           │         │
//! │              ▼                     ▼                          ▼         │
//! │         ValidationError       CoreError              InsufficientStock  │
//! │                                                      (conditional UPDATE)│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here happens before a single row is written.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{Item, NewSale};
use crate::validation::validate_quantity;

/// A priced sale line ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedLine {
    pub item_id: i64,
    /// Kept for error messages raised during the stock decrement.
    pub item_name: String,
    pub quantity: i64,
    pub price: i64,
}

impl PlannedLine {
    /// `price × quantity`, `None` on overflow.
    pub fn line_total(&self) -> Option<i64> {
        self.price.checked_mul(self.quantity)
    }
}

/// A validated sale header plus its lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalePlan {
    pub store_id: i64,
    pub staff_id: i64,
    pub total_price: i64,
    pub deposit: i64,
    pub sale_at: DateTime<Utc>,
    pub lines: Vec<PlannedLine>,
}

/// Structural checks that need no lookups.
pub fn check_sale_header(sale: &NewSale) -> CoreResult<()> {
    if sale.store_id <= 0 {
        return Err(ValidationError::required("storeId").into());
    }
    if sale.staff_id <= 0 {
        return Err(ValidationError::required("staffId").into());
    }
    if sale.details.is_empty() {
        return Err(ValidationError::required("details").into());
    }
    for detail in &sale.details {
        validate_quantity(detail.quantity)?;
    }
    if sale.deposit.is_some_and(|d| d < 0) {
        return Err(ValidationError::Negative {
            field: "deposit".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Prices every line and computes the totals.
///
/// `items` holds the current rows of every item the sale references, keyed
/// by surrogate id. Several lines for the same item are checked against the
/// item's stock together.
pub fn plan_sale(
    sale: &NewSale,
    items: &HashMap<i64, Item>,
    now: DateTime<Utc>,
) -> CoreResult<SalePlan> {
    check_sale_header(sale)?;

    let mut remaining: HashMap<i64, i64> = HashMap::new();
    let mut lines = Vec::with_capacity(sale.details.len());
    let mut total_price: i64 = 0;

    for detail in &sale.details {
        let item = items
            .get(&detail.item_id)
            .filter(|item| !item.status.is_deleted())
            .ok_or(CoreError::ItemNotFound(detail.item_id))?;

        let available = remaining.entry(item.id).or_insert(item.stock);
        if detail.quantity > *available {
            return Err(CoreError::InsufficientStock {
                item: item.name.clone(),
                available: *available,
                requested: detail.quantity,
            });
        }
        *available -= detail.quantity;

        let line = PlannedLine {
            item_id: item.id,
            item_name: item.name.clone(),
            quantity: detail.quantity,
            price: detail.price.filter(|p| *p != 0).unwrap_or(item.price),
        };

        if line.price < 0 {
            return Err(ValidationError::Negative {
                field: "price".to_string(),
            }
            .into());
        }

        total_price = line
            .line_total()
            .and_then(|t| total_price.checked_add(t))
            .ok_or(CoreError::TotalOverflow)?;
        lines.push(line);
    }

    let deposit = sale.deposit.filter(|d| *d != 0).unwrap_or(total_price);

    Ok(SalePlan {
        store_id: sale.store_id,
        staff_id: sale.staff_id,
        total_price,
        deposit,
        sale_at: sale.sale_at.unwrap_or(now),
        lines,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
