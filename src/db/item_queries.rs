use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{EnrichedItem, Item, PurchasedItem, SoldItem, SortDir, SortKey, StockValueRow};

// Enriched select: profit and hold_days are derived in SQL, names
// resolved through left joins.
const ENRICHED_SELECT: &str = "SELECT i.id, i.title, i.notes, i.purchase_price, i.purchase_date, \
         i.category_id, c.name AS category_name, i.status, i.sale_price, i.sale_date, \
         i.platform_id, p.name AS platform_name, \
         (i.sale_price - i.purchase_price) AS profit, \
         (COALESCE(i.sale_date, CURRENT_DATE) - i.purchase_date) AS hold_days \
         FROM items i \
         LEFT JOIN categories c ON c.id = i.category_id \
         LEFT JOIN platforms p ON p.id = i.platform_id";

const ITEM_RETURNING: &str = "id, user_id, title, notes, purchase_price, purchase_date, \
         category_id, status, sale_price, sale_date, platform_id, created_at";

pub async fn list_enriched(
    pool: &PgPool,
    user_id: Uuid,
    status: Option<&str>,
    category_id: Option<Uuid>,
    sort_key: SortKey,
    sort_dir: SortDir,
) -> Result<Vec<EnrichedItem>, sqlx::Error> {
    // Sort column and direction come from a closed enum, never from the request.
    let sql = format!(
        "{ENRICHED_SELECT} \
         WHERE i.user_id = $1 \
           AND ($2::text IS NULL OR i.status = $2) \
           AND ($3::uuid IS NULL OR i.category_id = $3) \
         ORDER BY {} {}, i.created_at DESC",
        sort_key.column(),
        sort_dir.sql(),
    );

    sqlx::query_as::<_, EnrichedItem>(&sql)
        .bind(user_id)
        .bind(status)
        .bind(category_id)
        .fetch_all(pool)
        .await
}

pub async fn fetch_enriched(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
) -> Result<Option<EnrichedItem>, sqlx::Error> {
    let sql = format!("{ENRICHED_SELECT} WHERE i.user_id = $1 AND i.id = $2");
    sqlx::query_as::<_, EnrichedItem>(&sql)
        .bind(user_id)
        .bind(id)
        .fetch_optional(pool)
        .await
}

#[allow(clippy::too_many_arguments)]
pub async fn insert(
    pool: &PgPool,
    user_id: Uuid,
    title: &str,
    notes: Option<&str>,
    purchase_price: &BigDecimal,
    purchase_date: NaiveDate,
    category_id: Uuid,
) -> Result<Item, sqlx::Error> {
    let id = Uuid::new_v4();
    let sql = format!(
        "INSERT INTO items (id, user_id, title, notes, purchase_price, purchase_date, category_id, status) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, 'EM_STOCK') \
         RETURNING {ITEM_RETURNING}"
    );
    sqlx::query_as::<_, Item>(&sql)
        .bind(id)
        .bind(user_id)
        .bind(title)
        .bind(notes)
        .bind(purchase_price)
        .bind(purchase_date)
        .bind(category_id)
        .fetch_one(pool)
        .await
}

#[allow(clippy::too_many_arguments)]
pub async fn update(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    title: &str,
    notes: Option<&str>,
    purchase_price: &BigDecimal,
    purchase_date: NaiveDate,
    category_id: Uuid,
    status: &str,
    sale_price: Option<&BigDecimal>,
    sale_date: Option<NaiveDate>,
    platform_id: Option<Uuid>,
) -> Result<Option<Item>, sqlx::Error> {
    let sql = format!(
        "UPDATE items \
         SET title = $3, notes = $4, purchase_price = $5, purchase_date = $6, \
             category_id = $7, status = $8, sale_price = $9, sale_date = $10, platform_id = $11 \
         WHERE id = $1 AND user_id = $2 \
         RETURNING {ITEM_RETURNING}"
    );
    sqlx::query_as::<_, Item>(&sql)
        .bind(id)
        .bind(user_id)
        .bind(title)
        .bind(notes)
        .bind(purchase_price)
        .bind(purchase_date)
        .bind(category_id)
        .bind(status)
        .bind(sale_price)
        .bind(sale_date)
        .bind(platform_id)
        .fetch_optional(pool)
        .await
}

pub async fn mark_sold(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    sale_price: &BigDecimal,
    sale_date: NaiveDate,
    platform_id: Uuid,
) -> Result<Option<Item>, sqlx::Error> {
    let sql = format!(
        "UPDATE items \
         SET status = 'VENDIDO', sale_price = $3, sale_date = $4, platform_id = $5 \
         WHERE id = $1 AND user_id = $2 \
         RETURNING {ITEM_RETURNING}"
    );
    sqlx::query_as::<_, Item>(&sql)
        .bind(id)
        .bind(user_id)
        .bind(sale_price)
        .bind(sale_date)
        .bind(platform_id)
        .fetch_optional(pool)
        .await
}

pub async fn unmark_sold(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
) -> Result<Option<Item>, sqlx::Error> {
    let sql = format!(
        "UPDATE items \
         SET status = 'EM_STOCK', sale_price = NULL, sale_date = NULL, platform_id = NULL \
         WHERE id = $1 AND user_id = $2 \
         RETURNING {ITEM_RETURNING}"
    );
    sqlx::query_as::<_, Item>(&sql)
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn delete(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM items WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Purchases in [from, to). A None bound means unbounded (all-time report).
pub async fn fetch_purchases_in_range(
    pool: &PgPool,
    user_id: Uuid,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<Vec<PurchasedItem>, sqlx::Error> {
    sqlx::query_as::<_, PurchasedItem>(
        "SELECT id, title, purchase_price, purchase_date, status \
         FROM items \
         WHERE user_id = $1 \
           AND ($2::date IS NULL OR purchase_date >= $2) \
           AND ($3::date IS NULL OR purchase_date < $3) \
         ORDER BY purchase_date DESC",
    )
    .bind(user_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await
}

/// Sold items with sale_date in [from, to), enriched with profit, hold days
/// and platform name.
pub async fn fetch_sold_in_range(
    pool: &PgPool,
    user_id: Uuid,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<Vec<SoldItem>, sqlx::Error> {
    sqlx::query_as::<_, SoldItem>(
        "SELECT i.id, i.title, i.purchase_price, i.purchase_date, i.sale_price, i.sale_date, \
                (i.sale_price - i.purchase_price) AS profit, \
                (i.sale_date - i.purchase_date) AS hold_days, \
                p.name AS platform_name \
         FROM items i \
         LEFT JOIN platforms p ON p.id = i.platform_id \
         WHERE i.user_id = $1 AND i.status = 'VENDIDO' \
           AND ($2::date IS NULL OR i.sale_date >= $2) \
           AND ($3::date IS NULL OR i.sale_date < $3) \
         ORDER BY i.sale_date DESC",
    )
    .bind(user_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await
}

/// Purchase prices of everything still in stock ("capital preso" is computed
/// over the current state, never over the selected period).
pub async fn fetch_stock_values(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<StockValueRow>, sqlx::Error> {
    sqlx::query_as::<_, StockValueRow>(
        "SELECT purchase_price FROM items WHERE user_id = $1 AND status = 'EM_STOCK'",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn count_items(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM items WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
}
