//! Staff management, by id or by badge barcode.

use tracing::info;

use kidspos_core::ids::{code_or_generate, STAFF_PREFIX};
use kidspos_core::validation::{validate_code, validate_name};
use kidspos_core::{Deletable, DeleteStrategy, Staff, StaffInput};
use kidspos_db::StaffRepository;

use crate::error::ApiResult;

#[derive(Debug, Clone)]
pub struct StaffService {
    staff: StaffRepository,
}

impl StaffService {
    pub fn new(staff: StaffRepository) -> Self {
        StaffService { staff }
    }

    pub async fn list(&self) -> ApiResult<Vec<Staff>> {
        Ok(self.staff.list().await?)
    }

    pub async fn get(&self, id: i64) -> ApiResult<Staff> {
        Ok(self.staff.get(id).await?)
    }

    pub async fn create(&self, input: StaffInput) -> ApiResult<Staff> {
        validate_name("name", &input.name)?;
        if let Some(code) = input.staff_id.as_deref().filter(|c| !c.trim().is_empty()) {
            validate_code("staffId", code)?;
        }

        let code = code_or_generate(input.staff_id.as_deref(), STAFF_PREFIX);
        let staff = self.staff.insert(&code, input.name.trim()).await?;

        info!(id = staff.id, code = %staff.staff_id, "Staff created");
        Ok(staff)
    }

    pub async fn update(&self, id: i64, input: StaffInput) -> ApiResult<Staff> {
        validate_name("name", &input.name)?;
        Ok(self.staff.update(id, input.name.trim()).await?)
    }

    pub async fn delete(&self, id: i64) -> ApiResult<DeleteStrategy> {
        self.staff.delete(id).await?;
        info!(id, "Staff deleted");
        Ok(Staff::DELETE_STRATEGY)
    }

    pub async fn get_by_barcode(&self, code: &str) -> ApiResult<Staff> {
        Ok(self.staff.get_by_code(code.trim()).await?)
    }

    pub async fn update_by_barcode(&self, code: &str, input: StaffInput) -> ApiResult<Staff> {
        validate_name("name", &input.name)?;
        Ok(self.staff.update_by_code(code.trim(), input.name.trim()).await?)
    }

    pub async fn delete_by_barcode(&self, code: &str) -> ApiResult<DeleteStrategy> {
        self.staff.delete_by_code(code.trim()).await?;
        info!(code = %code, "Staff deleted");
        Ok(Staff::DELETE_STRATEGY)
    }
}
