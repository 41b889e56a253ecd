use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const STATUS_IN_STOCK: &str = "EM_STOCK";
pub const STATUS_SOLD: &str = "VENDIDO";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    EmStock,
    Vendido,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::EmStock => STATUS_IN_STOCK,
            ItemStatus::Vendido => STATUS_SOLD,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            STATUS_IN_STOCK => Some(ItemStatus::EmStock),
            STATUS_SOLD => Some(ItemStatus::Vendido),
            _ => None,
        }
    }
}

// Inventory item as stored. Sale fields are present iff status = VENDIDO,
// backed by a table CHECK constraint.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Item {
    pub id: uuid::Uuid,
    pub user_id: uuid::Uuid,
    pub title: String,
    pub notes: Option<String>,
    pub purchase_price: BigDecimal,
    pub purchase_date: NaiveDate,
    pub category_id: uuid::Uuid,
    pub status: String,
    pub sale_price: Option<BigDecimal>,
    pub sale_date: Option<NaiveDate>,
    pub platform_id: Option<uuid::Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Item plus derived columns: profit (sale - purchase, null while in
/// stock) and hold days (sale date, or today for unsold items, minus
/// purchase date), with category and platform names resolved.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EnrichedItem {
    pub id: uuid::Uuid,
    pub title: String,
    pub notes: Option<String>,
    pub purchase_price: BigDecimal,
    pub purchase_date: NaiveDate,
    pub category_id: uuid::Uuid,
    pub category_name: Option<String>,
    pub status: String,
    pub sale_price: Option<BigDecimal>,
    pub sale_date: Option<NaiveDate>,
    pub platform_id: Option<uuid::Uuid>,
    pub platform_name: Option<String>,
    pub profit: Option<BigDecimal>,
    pub hold_days: i32,
}

#[derive(Debug, Deserialize)]
pub struct CreateItem {
    pub title: String,
    pub notes: Option<String>,
    pub purchase_price: BigDecimal,
    pub purchase_date: NaiveDate,
    // Either an existing category or a new name to upsert, never both.
    pub category_id: Option<uuid::Uuid>,
    pub new_category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateItem {
    pub title: String,
    pub notes: Option<String>,
    pub purchase_price: BigDecimal,
    pub purchase_date: NaiveDate,
    pub category_id: uuid::Uuid,
    pub status: ItemStatus,
    pub sale_price: Option<BigDecimal>,
    pub sale_date: Option<NaiveDate>,
    pub platform_id: Option<uuid::Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct SellItem {
    pub sale_price: BigDecimal,
    pub sale_date: NaiveDate,
    pub platform_id: Option<uuid::Uuid>,
    pub new_platform: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ItemListResponse {
    pub items: Vec<EnrichedItem>,
    pub count: usize,
    pub capital_tied: BigDecimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    PurchaseDate,
    PurchasePrice,
    Profit,
    HoldDays,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

/// Whitelisted sort options. Anything else falls back to newest
/// purchase first.
pub fn parse_sort(sort: Option<&str>) -> (SortKey, SortDir) {
    match sort.unwrap_or("purchase_date_desc") {
        "purchase_date_asc" => (SortKey::PurchaseDate, SortDir::Asc),
        "purchase_price_desc" => (SortKey::PurchasePrice, SortDir::Desc),
        "purchase_price_asc" => (SortKey::PurchasePrice, SortDir::Asc),
        "profit_desc" => (SortKey::Profit, SortDir::Desc),
        "profit_asc" => (SortKey::Profit, SortDir::Asc),
        "hold_days_desc" => (SortKey::HoldDays, SortDir::Desc),
        "hold_days_asc" => (SortKey::HoldDays, SortDir::Asc),
        _ => (SortKey::PurchaseDate, SortDir::Desc),
    }
}

impl SortKey {
    pub fn column(&self) -> &'static str {
        match self {
            SortKey::PurchaseDate => "purchase_date",
            SortKey::PurchasePrice => "purchase_price",
            SortKey::Profit => "profit",
            SortKey::HoldDays => "hold_days",
        }
    }
}

impl SortDir {
    pub fn sql(&self) -> &'static str {
        match self {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }
}
