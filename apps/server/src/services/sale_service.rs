//! # Sale Service
//!
//! ```text
//! create(NewSale)
//!   │
//!   ├─ check_sale_header     store/staff set, ≥1 line, qty > 0
//!   ├─ store & staff exist?  unknown → 400, nothing written
//!   ├─ load referenced items
//!   ├─ plan_sale             prices, stock check, totals, deposit
//!   └─ SaleRepository::create (one transaction, conditional decrement)
//! ```

use std::collections::HashMap;

use chrono::Utc;
use tracing::info;

use kidspos_core::sale::check_sale_header;
use kidspos_core::{plan_sale, CoreError, NewSale, Sale, SalesReport};
use kidspos_db::{ItemRepository, SaleRange, SaleRepository, StaffRepository, StoreRepository};

use crate::error::ApiResult;

#[derive(Debug, Clone)]
pub struct SaleService {
    sales: SaleRepository,
    items: ItemRepository,
    stores: StoreRepository,
    staff: StaffRepository,
}

impl SaleService {
    pub fn new(
        sales: SaleRepository,
        items: ItemRepository,
        stores: StoreRepository,
        staff: StaffRepository,
    ) -> Self {
        SaleService {
            sales,
            items,
            stores,
            staff,
        }
    }

    /// Records a sale and decrements stock.
    ///
    /// Every lookup happens before the write transaction starts.
    pub async fn create(&self, sale: NewSale) -> ApiResult<Sale> {
        check_sale_header(&sale)?;

        if self.stores.find(sale.store_id).await?.is_none() {
            return Err(CoreError::StoreNotFound(sale.store_id).into());
        }
        if self.staff.find(sale.staff_id).await?.is_none() {
            return Err(CoreError::StaffNotFound(sale.staff_id).into());
        }

        let mut items = HashMap::new();
        for detail in &sale.details {
            if items.contains_key(&detail.item_id) {
                continue;
            }
            if let Some(item) = self.items.find_any(detail.item_id).await? {
                items.insert(item.id, item);
            }
        }

        let plan = plan_sale(&sale, &items, Utc::now())?;
        let created = self.sales.create(&plan).await?;

        info!(
            id = created.id,
            store_id = created.store_id,
            staff_id = created.staff_id,
            total_price = created.total_price,
            lines = plan.lines.len(),
            "Sale recorded"
        );
        Ok(created)
    }

    /// All sales, newest first, with store and staff summaries.
    pub async fn list(&self) -> ApiResult<Vec<Sale>> {
        Ok(self.sales.list().await?)
    }

    /// One sale with its lines and their items.
    pub async fn get(&self, id: i64) -> ApiResult<Sale> {
        Ok(self.sales.get(id).await?)
    }

    /// Sales whose `saleAt` falls inside `range`, with totals.
    pub async fn report(&self, range: SaleRange) -> ApiResult<SalesReport> {
        let sales = self.sales.list_between(range).await?;
        Ok(SalesReport::from_sales(sales))
    }
}
