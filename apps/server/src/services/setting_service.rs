//! Key/value settings.

use tracing::info;

use kidspos_core::validation::{validate_setting, validate_setting_pair};
use kidspos_core::{Setting, SettingInput};
use kidspos_db::SettingRepository;

use crate::error::ApiResult;

#[derive(Debug, Clone)]
pub struct SettingService {
    settings: SettingRepository,
}

impl SettingService {
    pub fn new(settings: SettingRepository) -> Self {
        SettingService { settings }
    }

    /// All settings ordered by key.
    pub async fn list(&self) -> ApiResult<Vec<Setting>> {
        Ok(self.settings.list().await?)
    }

    pub async fn get(&self, key: &str) -> ApiResult<Setting> {
        Ok(self.settings.get(key).await?)
    }

    pub async fn create(&self, input: SettingInput) -> ApiResult<Setting> {
        validate_setting(&input)?;
        let setting = self.settings.insert(&input).await?;
        info!(key = %setting.key, kind = setting.kind.as_str(), "Setting created");
        Ok(setting)
    }

    pub async fn update(&self, key: &str, value: &str) -> ApiResult<Setting> {
        validate_setting_pair(key, value)?;
        let setting = self.settings.update(key, value).await?;
        info!(key = %setting.key, "Setting updated");
        Ok(setting)
    }

    pub async fn delete(&self, key: &str) -> ApiResult<()> {
        self.settings.delete(key).await?;
        info!(key = %key, "Setting deleted");
        Ok(())
    }
}
