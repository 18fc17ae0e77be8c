//! Item management.

use tracing::info;

use kidspos_core::ids::{code_or_generate, ITEM_PREFIX};
use kidspos_core::validation::validate_item;
use kidspos_core::{Deletable, DeleteStrategy, Item, ItemInput};
use kidspos_db::ItemRepository;

use crate::error::{ApiError, ApiResult};

#[derive(Debug, Clone)]
pub struct ItemService {
    items: ItemRepository,
}

impl ItemService {
    pub fn new(items: ItemRepository) -> Self {
        ItemService { items }
    }

    /// Non-deleted items, newest first.
    pub async fn list(&self) -> ApiResult<Vec<Item>> {
        Ok(self.items.list().await?)
    }

    pub async fn get(&self, id: i64) -> ApiResult<Item> {
        Ok(self.items.get(id).await?)
    }

    /// Creates an item, generating `ITEM-xxxxxxxx` when no code is given.
    pub async fn create(&self, input: ItemInput) -> ApiResult<Item> {
        validate_item(&input)?;

        let code = code_or_generate(input.item_id.as_deref(), ITEM_PREFIX);
        let item = self.items.insert(&code, &input).await?;

        info!(id = item.id, code = %item.item_id, "Item created");
        Ok(item)
    }

    /// Overwrites name, price and stock. A supplied `itemId` is ignored.
    pub async fn update(&self, id: i64, input: ItemInput) -> ApiResult<Item> {
        validate_item(&input)?;
        Ok(self.items.update(id, &input).await?)
    }

    pub async fn delete(&self, id: i64) -> ApiResult<DeleteStrategy> {
        self.items.soft_delete(id).await?;
        info!(id, "Item deleted");
        Ok(Item::DELETE_STRATEGY)
    }

    /// Exact match on the external code.
    pub async fn find_by_barcode(&self, code: &str) -> ApiResult<Item> {
        self.items
            .find_by_barcode(code.trim())
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Item not found: {}", code)))
    }
}
