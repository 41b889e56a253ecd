use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{category_queries, item_queries, platform_queries};
use crate::errors::AppError;
use crate::models::{
    parse_sort, CreateItem, EnrichedItem, Item, ItemListResponse, ItemStatus, SellItem, UpdateItem,
};
use crate::services::report_service;

pub async fn list(
    pool: &PgPool,
    user_id: Uuid,
    status: Option<&str>,
    category_id: Option<Uuid>,
    sort: Option<&str>,
) -> Result<ItemListResponse, AppError> {
    // Unknown status values behave like no filter at all.
    let status = status.and_then(ItemStatus::parse);
    let (sort_key, sort_dir) = parse_sort(sort);

    let (items, stock) = tokio::try_join!(
        item_queries::list_enriched(
            pool,
            user_id,
            status.map(|s| s.as_str()),
            category_id,
            sort_key,
            sort_dir,
        ),
        item_queries::fetch_stock_values(pool, user_id),
    )?;

    // Capital tied up is global, independent of the active filters.
    let capital_tied = report_service::total_stock_value(&stock);

    Ok(ItemListResponse {
        count: items.len(),
        items,
        capital_tied,
    })
}

pub async fn get(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<EnrichedItem, AppError> {
    item_queries::fetch_enriched(pool, user_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Item {} not found", id)))
}

pub async fn create(pool: &PgPool, user_id: Uuid, data: CreateItem) -> Result<Item, AppError> {
    let title = data.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    require_positive(&data.purchase_price, "purchase_price")?;

    let category_id = resolve_category(pool, user_id, data.category_id, data.new_category).await?;

    let item = item_queries::insert(
        pool,
        user_id,
        title,
        data.notes.as_deref(),
        &data.purchase_price,
        data.purchase_date,
        category_id,
    )
    .await?;

    Ok(item)
}

pub async fn update(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    data: UpdateItem,
) -> Result<Item, AppError> {
    let title = data.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    require_positive(&data.purchase_price, "purchase_price")?;

    if category_queries::fetch_one(pool, user_id, data.category_id)
        .await?
        .is_none()
    {
        return Err(AppError::Validation("Invalid category".to_string()));
    }

    let (sale_price, sale_date, platform_id) = resolve_sale_fields(
        data.status,
        data.purchase_date,
        data.sale_price,
        data.sale_date,
        data.platform_id,
    )?;

    if let Some(platform_id) = platform_id {
        if platform_queries::fetch_one(pool, user_id, platform_id)
            .await?
            .is_none()
        {
            return Err(AppError::Validation("Invalid platform".to_string()));
        }
    }

    item_queries::update(
        pool,
        user_id,
        id,
        title,
        data.notes.as_deref(),
        &data.purchase_price,
        data.purchase_date,
        data.category_id,
        data.status.as_str(),
        sale_price.as_ref(),
        sale_date,
        platform_id,
    )
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Item {} not found", id)))
}

pub async fn sell(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    data: SellItem,
) -> Result<Item, AppError> {
    require_positive(&data.sale_price, "sale_price")?;

    let item = item_queries::fetch_enriched(pool, user_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Item {} not found", id)))?;

    check_sale_date(item.purchase_date, data.sale_date)?;

    let platform_id = resolve_platform(pool, user_id, data.platform_id, data.new_platform).await?;

    item_queries::mark_sold(pool, user_id, id, &data.sale_price, data.sale_date, platform_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Item {} not found", id)))
}

pub async fn unsell(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<Item, AppError> {
    item_queries::unmark_sold(pool, user_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Item {} not found", id)))
}

pub async fn delete(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
    let deleted = item_queries::delete(pool, user_id, id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound(format!("Item {} not found", id)));
    }
    Ok(())
}

/// A new category name wins over an existing id; reuses the row if the name
/// already exists for this user.
async fn resolve_category(
    pool: &PgPool,
    user_id: Uuid,
    category_id: Option<Uuid>,
    new_category: Option<String>,
) -> Result<Uuid, AppError> {
    if let Some(name) = new_category.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        let category = category_queries::upsert(pool, user_id, name).await?;
        return Ok(category.id);
    }
    let id = category_id.ok_or_else(|| AppError::Validation("Invalid category".to_string()))?;
    match category_queries::fetch_one(pool, user_id, id).await? {
        Some(category) => Ok(category.id),
        None => Err(AppError::Validation("Invalid category".to_string())),
    }
}

async fn resolve_platform(
    pool: &PgPool,
    user_id: Uuid,
    platform_id: Option<Uuid>,
    new_platform: Option<String>,
) -> Result<Uuid, AppError> {
    if let Some(name) = new_platform.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        let platform = platform_queries::upsert(pool, user_id, name).await?;
        return Ok(platform.id);
    }
    let id = platform_id.ok_or_else(|| AppError::Validation("Invalid platform".to_string()))?;
    match platform_queries::fetch_one(pool, user_id, id).await? {
        Some(platform) => Ok(platform.id),
        None => Err(AppError::Validation("Invalid platform".to_string())),
    }
}

/// Sale fields are present iff the item is sold: marking VENDIDO requires
/// all of them valid, while going back to EM_STOCK clears them regardless
/// of what the payload carried.
pub fn resolve_sale_fields(
    status: ItemStatus,
    purchase_date: NaiveDate,
    sale_price: Option<BigDecimal>,
    sale_date: Option<NaiveDate>,
    platform_id: Option<Uuid>,
) -> Result<(Option<BigDecimal>, Option<NaiveDate>, Option<Uuid>), AppError> {
    match status {
        ItemStatus::Vendido => {
            let sale_price = sale_price
                .ok_or_else(|| AppError::Validation("Sale price is required".to_string()))?;
            let sale_date = sale_date
                .ok_or_else(|| AppError::Validation("Sale date is required".to_string()))?;
            let platform_id = platform_id
                .ok_or_else(|| AppError::Validation("Platform is required".to_string()))?;
            require_positive(&sale_price, "sale_price")?;
            check_sale_date(purchase_date, sale_date)?;
            Ok((Some(sale_price), Some(sale_date), Some(platform_id)))
        }
        ItemStatus::EmStock => Ok((None, None, None)),
    }
}

pub fn check_sale_date(purchase_date: NaiveDate, sale_date: NaiveDate) -> Result<(), AppError> {
    if sale_date < purchase_date {
        return Err(AppError::Validation(
            "Sale date cannot precede purchase date".to_string(),
        ));
    }
    Ok(())
}

fn require_positive(value: &BigDecimal, field: &str) -> Result<(), AppError> {
    if *value <= BigDecimal::zero() {
        return Err(AppError::Validation(format!("{} must be positive", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_require_positive_accepts_positive() {
        assert!(require_positive(&BigDecimal::from_str("0.01").unwrap(), "price").is_ok());
    }

    #[test]
    fn test_require_positive_rejects_zero_and_negative() {
        assert!(require_positive(&BigDecimal::zero(), "price").is_err());
        assert!(require_positive(&BigDecimal::from_str("-5").unwrap(), "price").is_err());
    }
}
