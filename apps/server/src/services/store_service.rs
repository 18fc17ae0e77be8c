//! Store management.

use tracing::info;

use kidspos_core::ids::{code_or_generate, STORE_PREFIX};
use kidspos_core::validation::{validate_code, validate_name};
use kidspos_core::{Deletable, DeleteStrategy, Store, StoreInput};
use kidspos_db::StoreRepository;

use crate::error::ApiResult;

#[derive(Debug, Clone)]
pub struct StoreService {
    stores: StoreRepository,
}

impl StoreService {
    pub fn new(stores: StoreRepository) -> Self {
        StoreService { stores }
    }

    pub async fn list(&self) -> ApiResult<Vec<Store>> {
        Ok(self.stores.list().await?)
    }

    pub async fn get(&self, id: i64) -> ApiResult<Store> {
        Ok(self.stores.get(id).await?)
    }

    pub async fn create(&self, input: StoreInput) -> ApiResult<Store> {
        validate_name("name", &input.name)?;
        if let Some(code) = input.store_id.as_deref().filter(|c| !c.trim().is_empty()) {
            validate_code("storeId", code)?;
        }

        let code = code_or_generate(input.store_id.as_deref(), STORE_PREFIX);
        let store = self.stores.insert(&code, input.name.trim()).await?;

        info!(id = store.id, code = %store.store_id, "Store created");
        Ok(store)
    }

    /// Renames a store.
    pub async fn update(&self, id: i64, input: StoreInput) -> ApiResult<Store> {
        validate_name("name", &input.name)?;
        Ok(self.stores.update(id, input.name.trim()).await?)
    }

    /// Removes a store unless a sale references it.
    pub async fn delete(&self, id: i64) -> ApiResult<DeleteStrategy> {
        self.stores.delete(id).await?;
        info!(id, "Store deleted");
        Ok(Store::DELETE_STRATEGY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::services::test_db;

    #[tokio::test]
    async fn test_create_update_delete() {
        let service = StoreService::new(test_db().await.stores());

        let store = service
            .create(StoreInput {
                store_id: None,
                name: " Snack Stall ".to_string(),
            })
            .await
            .unwrap();
        assert!(store.store_id.starts_with("STORE-"));
        assert_eq!(store.name, "Snack Stall");

        let renamed = service
            .update(
                store.id,
                StoreInput {
                    store_id: None,
                    name: "Drinks".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.store_id, store.store_id);
        assert_eq!(renamed.name, "Drinks");

        assert_eq!(service.delete(store.id).await.unwrap(), DeleteStrategy::HardGuarded);
        assert_eq!(service.get(store.id).await.unwrap_err().code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let service = StoreService::new(test_db().await.stores());
        let err = service.create(StoreInput::default()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "name is required");
    }
}
