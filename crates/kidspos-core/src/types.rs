//! # Domain Types
//!
//! Core domain types used throughout KidsPOS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │      Sale       │   │   SaleDetail    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  sale_id (FK)   │       │
//! │  │  item_id (code) │◄──┼─ details ───────┼──►│  item_id (FK)   │       │
//! │  │  price, stock   │   │  total_price    │   │  quantity,price │       │
//! │  └─────────────────┘   └───────┬─────────┘   └─────────────────┘       │
//! │                                │                                        │
//! │  ┌─────────────────┐   ┌───────┴─────────┐   ┌─────────────────┐       │
//! │  │     Store       │◄──┤  store / staff  ├──►│     Staff       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    Setting      │   │   ApkVersion    │                             │
//! │  │  key → value    │   │  version_code   │                             │
//! │  │  SettingType    │   │  ApkState       │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Items, stores and staff have:
//! - `id`: surrogate integer key, used for database relations
//! - External code (`item_id`, `store_id`, `staff_id`): printed as a barcode

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Deletion & Lifecycle Enums
// =============================================================================

/// Whether an item is still sellable or has been soft-deleted.
///
/// Persisted as the `isDeleted` integer column (0/1) and serialized as a
/// JSON boolean.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[serde(from = "bool", into = "bool")]
#[repr(i32)]
pub enum DeletionStatus {
    #[default]
    Active = 0,
    SoftDeleted = 1,
}

impl DeletionStatus {
    #[inline]
    pub fn is_deleted(&self) -> bool {
        matches!(self, DeletionStatus::SoftDeleted)
    }
}

impl From<bool> for DeletionStatus {
    fn from(deleted: bool) -> Self {
        if deleted {
            DeletionStatus::SoftDeleted
        } else {
            DeletionStatus::Active
        }
    }
}

impl From<DeletionStatus> for bool {
    fn from(status: DeletionStatus) -> Self {
        status.is_deleted()
    }
}

/// How an entity kind is removed.
///
/// ```text
/// Item         → Soft         (row kept, hidden from every read)
/// Store/Staff  → HardGuarded  (row removed unless a sale references it)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DeleteStrategy {
    Soft,
    HardGuarded,
}

impl DeleteStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeleteStrategy::Soft => "soft",
            DeleteStrategy::HardGuarded => "hard_guarded",
        }
    }
}

/// Implemented by entities that can be deleted through a service.
pub trait Deletable {
    const DELETE_STRATEGY: DeleteStrategy;
}

/// Whether an APK release is offered to devices.
///
/// Persisted as the `isActive` integer column and serialized as a JSON
/// boolean.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[serde(from = "bool", into = "bool")]
#[repr(i32)]
pub enum ApkState {
    Inactive = 0,
    #[default]
    Active = 1,
}

impl ApkState {
    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self, ApkState::Active)
    }
}

impl From<bool> for ApkState {
    fn from(active: bool) -> Self {
        if active {
            ApkState::Active
        } else {
            ApkState::Inactive
        }
    }
}

impl From<ApkState> for bool {
    fn from(state: ApkState) -> Self {
        state.is_active()
    }
}

// =============================================================================
// Item
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "camelCase"))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Item {
    pub id: i64,

    /// External code printed as the item's barcode.
    pub item_id: String,

    pub name: String,

    /// Price in yen (smallest currency unit).
    pub price: i64,

    pub stock: i64,

    #[serde(rename = "isDeleted")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "isDeleted"))]
    #[ts(as = "bool")]
    pub status: DeletionStatus,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Deletable for Item {
    const DELETE_STRATEGY: DeleteStrategy = DeleteStrategy::Soft;
}

/// Create / update payload for an item.
///
/// `item_id` is only honoured on create; a missing one is generated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct ItemInput {
    pub item_id: Option<String>,
    pub name: String,
    pub price: i64,
    pub stock: i64,
}

// =============================================================================
// Store & Staff
// =============================================================================

/// A point of sale location (a stall at the event).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "camelCase"))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Store {
    pub id: i64,
    pub store_id: String,
    pub name: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Deletable for Store {
    const DELETE_STRATEGY: DeleteStrategy = DeleteStrategy::HardGuarded;
}

/// A person operating the register.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "camelCase"))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Staff {
    pub id: i64,
    pub staff_id: String,
    pub name: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Deletable for Staff {
    const DELETE_STRATEGY: DeleteStrategy = DeleteStrategy::HardGuarded;
}

/// Create / update payload for a store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct StoreInput {
    pub store_id: Option<String>,
    pub name: String,
}

/// Create / update payload for a staff member.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct StaffInput {
    pub staff_id: Option<String>,
    pub name: String,
}

// =============================================================================
// Sale
// =============================================================================

/// A completed sale. Write-once.
///
/// `details`, `store` and `staff` are only populated by the read paths
/// that join them in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "camelCase"))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Sale {
    pub id: i64,
    pub store_id: i64,
    pub staff_id: i64,
    pub total_price: i64,
    pub deposit: i64,
    #[ts(as = "String")]
    pub sale_at: DateTime<Utc>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    pub details: Vec<SaleDetail>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    pub store: Option<Store>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    pub staff: Option<Staff>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Sale {
    /// Change handed back to the customer.
    pub fn change(&self) -> i64 {
        self.deposit - self.total_price
    }
}

/// One line of a sale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "camelCase"))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleDetail {
    pub id: i64,
    pub sale_id: i64,
    /// Surrogate id of the sold [`Item`].
    pub item_id: i64,
    pub quantity: i64,
    /// Unit price at the time of sale.
    pub price: i64,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    pub item: Option<Item>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// Incoming sale request.
///
/// Zero or missing values mean "unset": `deposit` falls back to the total,
/// `sale_at` to the current time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct NewSale {
    pub store_id: i64,
    pub staff_id: i64,
    pub deposit: Option<i64>,
    #[ts(as = "Option<String>")]
    pub sale_at: Option<DateTime<Utc>>,
    pub details: Vec<NewSaleDetail>,
}

/// Incoming sale line. A missing or zero `price` takes the item's price.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct NewSaleDetail {
    pub item_id: i64,
    pub quantity: i64,
    pub price: Option<i64>,
}

/// Sales in a date range plus their summary.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SalesReport {
    pub sales: Vec<Sale>,
    pub total_sales: i64,
    pub total_amount: i64,
}

impl SalesReport {
    pub fn from_sales(sales: Vec<Sale>) -> Self {
        let total_amount = sales.iter().map(|s| s.total_price).sum();
        SalesReport {
            total_sales: sales.len() as i64,
            total_amount,
            sales,
        }
    }
}

// =============================================================================
// Setting
// =============================================================================

/// Declared type of a setting value. Descriptive only: values are stored
/// and returned as strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SettingType {
    #[default]
    String,
    Number,
    Boolean,
}

impl SettingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingType::String => "string",
            SettingType::Number => "number",
            SettingType::Boolean => "boolean",
        }
    }

    /// Parses a tag, `None` for anything unknown.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "" | "string" => Some(SettingType::String),
            "number" => Some(SettingType::Number),
            "boolean" => Some(SettingType::Boolean),
            _ => None,
        }
    }
}

/// A named configuration value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "camelCase"))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Setting {
    pub id: i64,
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "type"))]
    pub kind: SettingType,
    pub description: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// Create payload for a setting.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct SettingInput {
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: SettingType,
    pub description: Option<String>,
}

// =============================================================================
// APK Version
// =============================================================================

/// A distributable Android app release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "camelCase"))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ApkVersion {
    pub id: i64,
    /// Human readable version, e.g. "1.2.0". Unique.
    pub version: String,
    /// Monotonic build number used for update checks.
    pub version_code: i64,
    /// Name the file is stored under.
    pub file_name: String,
    pub file_size: i64,
    pub file_path: String,
    pub release_notes: Option<String>,
    #[serde(rename = "isActive")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "isActive"))]
    #[ts(as = "bool")]
    pub state: ApkState,
    #[ts(as = "String")]
    pub uploaded_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// Metadata for a new APK row, produced after the file is on disk.
#[derive(Debug, Clone)]
pub struct NewApkVersion {
    pub version: String,
    pub version_code: i64,
    pub file_name: String,
    pub file_size: i64,
    pub file_path: String,
    pub release_notes: Option<String>,
}

/// Response of the update check endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateCheck {
    pub has_update: bool,
    pub latest_version: Option<ApkVersion>,
}

impl From<Option<ApkVersion>> for UpdateCheck {
    fn from(latest_version: Option<ApkVersion>) -> Self {
        UpdateCheck {
            has_update: latest_version.is_some(),
            latest_version,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deletion_status_serializes_as_bool() {
        let item = Item {
            status: DeletionStatus::SoftDeleted,
            ..Default::default()
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["isDeleted"], serde_json::json!(true));
        assert_eq!(json["itemId"], serde_json::json!(""));
    }

    #[test]
    fn test_delete_strategies() {
        assert_eq!(Item::DELETE_STRATEGY, DeleteStrategy::Soft);
        assert_eq!(Store::DELETE_STRATEGY, DeleteStrategy::HardGuarded);
        assert_eq!(Staff::DELETE_STRATEGY.as_str(), "hard_guarded");
    }

    #[test]
    fn test_new_sale_accepts_partial_json() {
        let sale: NewSale = serde_json::from_str(
            r#"{"storeId":1,"staffId":2,"details":[{"itemId":3,"quantity":2}]}"#,
        )
        .unwrap();
        assert_eq!(sale.store_id, 1);
        assert_eq!(sale.deposit, None);
        assert!(sale.sale_at.is_none());
        assert_eq!(sale.details[0].price, None);
    }

    #[test]
    fn test_sale_omits_empty_relations() {
        let json = serde_json::to_value(Sale::default()).unwrap();
        assert!(json.get("details").is_none());
        assert!(json.get("store").is_none());
        assert!(json.get("totalPrice").is_some());
    }

    #[test]
    fn test_optional_relations_in_bindings() {
        let sale = Sale::decl();
        assert!(sale.contains("store?:"));
        assert!(sale.contains("staff?:"));
        assert!(SaleDetail::decl().contains("item?:"));
    }

    #[test]
    fn test_setting_type_parse() {
        assert_eq!(SettingType::parse("Number"), Some(SettingType::Number));
        assert_eq!(SettingType::parse(""), Some(SettingType::String));
        assert_eq!(SettingType::parse("date"), None);

        let input: SettingInput =
            serde_json::from_str(r#"{"key":"k","value":"v","type":"boolean"}"#).unwrap();
        assert_eq!(input.kind, SettingType::Boolean);
    }

    #[test]
    fn test_update_check_from_option() {
        let check = UpdateCheck::from(None);
        assert!(!check.has_update);
        let json = serde_json::to_value(&check).unwrap();
        assert_eq!(json["hasUpdate"], serde_json::json!(false));
        assert!(json["latestVersion"].is_null());
    }

    #[test]
    fn test_sales_report_totals() {
        let sales = vec![
            Sale {
                total_price: 300,
                ..Default::default()
            },
            Sale {
                total_price: 150,
                ..Default::default()
            },
        ];
        let report = SalesReport::from_sales(sales);
        assert_eq!(report.total_sales, 2);
        assert_eq!(report.total_amount, 450);
    }
}
