use std::collections::{BTreeMap, HashMap};

use bigdecimal::{BigDecimal, ToPrimitive, Zero};
use chrono::{Datelike, Months, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::item_queries;
use crate::errors::AppError;
use crate::models::{
    AnnualReport, MonthlyProfitPoint, MonthlyReport, PlatformSales, PurchasedItem, SoldItem,
    StockValueRow, TopSoldItem, TotalReport,
};

const TOP_SOLD_LIMIT: usize = 10;
const MONTH_SELECTOR_SIZE: u32 = 12;
const YEAR_SELECTOR_SIZE: i32 = 5;

// Bucket label for sales whose platform row is gone.
const NO_PLATFORM: &str = "Sem plataforma";

pub async fn monthly(
    pool: &PgPool,
    user_id: Uuid,
    month: Option<&str>,
) -> Result<MonthlyReport, AppError> {
    let today = Utc::now().date_naive();
    let (label, from, to) = month_range(month, today);

    let (purchases, sold, stock) = tokio::try_join!(
        item_queries::fetch_purchases_in_range(pool, user_id, Some(from), Some(to)),
        item_queries::fetch_sold_in_range(pool, user_id, Some(from), Some(to)),
        item_queries::fetch_stock_values(pool, user_id),
    )?;

    Ok(MonthlyReport {
        month: label,
        from,
        to,
        total_purchases: total_purchase_value(&purchases),
        total_sales: total_sales_value(&sold),
        total_profit: total_profit(&sold),
        capital_tied: total_stock_value(&stock),
        avg_hold_days: average_hold_days(&sold),
        sales_by_platform: sales_by_platform(&sold),
        purchases,
        sold,
        months: recent_months(today, MONTH_SELECTOR_SIZE),
    })
}

pub async fn annual(
    pool: &PgPool,
    user_id: Uuid,
    year: Option<i32>,
) -> Result<AnnualReport, AppError> {
    let today = Utc::now().date_naive();
    let (year, from, to) = year_range(year, today)?;

    let (purchases, sold, stock) = tokio::try_join!(
        item_queries::fetch_purchases_in_range(pool, user_id, Some(from), Some(to)),
        item_queries::fetch_sold_in_range(pool, user_id, Some(from), Some(to)),
        item_queries::fetch_stock_values(pool, user_id),
    )?;

    Ok(AnnualReport {
        year,
        from,
        to,
        total_purchases: total_purchase_value(&purchases),
        total_sales: total_sales_value(&sold),
        total_profit: total_profit(&sold),
        capital_tied: total_stock_value(&stock),
        avg_hold_days: average_hold_days(&sold),
        sales_by_platform: sales_by_platform(&sold),
        top_sold: top_by_profit(&sold, TOP_SOLD_LIMIT),
        years: recent_years(today, YEAR_SELECTOR_SIZE),
    })
}

pub async fn total(pool: &PgPool, user_id: Uuid) -> Result<TotalReport, AppError> {
    let (purchases, sold, stock, item_count) = tokio::try_join!(
        item_queries::fetch_purchases_in_range(pool, user_id, None, None),
        item_queries::fetch_sold_in_range(pool, user_id, None, None),
        item_queries::fetch_stock_values(pool, user_id),
        item_queries::count_items(pool, user_id),
    )?;

    let total_sales = total_sales_value(&sold);
    let profit = total_profit(&sold);
    let cost_of_sold = sold
        .iter()
        .fold(BigDecimal::zero(), |acc, s| acc + &s.purchase_price);

    Ok(TotalReport {
        total_purchases: total_purchase_value(&purchases),
        profit_margin: ratio(&profit, &total_sales),
        roi: ratio(&profit, &cost_of_sold),
        sell_through_rate: sell_through_rate(sold.len(), item_count),
        total_profit: profit,
        capital_tied: total_stock_value(&stock),
        avg_hold_days: average_hold_days(&sold),
        item_count,
        sold_count: sold.len(),
        sales_by_platform: sales_by_platform(&sold),
        top_sold: top_by_profit(&sold, TOP_SOLD_LIMIT),
        cumulative_profit: cumulative_profit_by_month(&sold),
        total_sales,
    })
}

pub fn total_purchase_value(rows: &[PurchasedItem]) -> BigDecimal {
    rows.iter()
        .fold(BigDecimal::zero(), |acc, r| acc + &r.purchase_price)
}

pub fn total_stock_value(rows: &[StockValueRow]) -> BigDecimal {
    rows.iter()
        .fold(BigDecimal::zero(), |acc, r| acc + &r.purchase_price)
}

pub fn total_sales_value(rows: &[SoldItem]) -> BigDecimal {
    rows.iter()
        .fold(BigDecimal::zero(), |acc, r| acc + &r.sale_price)
}

pub fn total_profit(rows: &[SoldItem]) -> BigDecimal {
    rows.iter()
        .fold(BigDecimal::zero(), |acc, r| acc + &r.profit)
}

/// Mean hold duration in days over the sold set; None when nothing sold
/// (the UI renders a dash, not zero).
pub fn average_hold_days(rows: &[SoldItem]) -> Option<f64> {
    if rows.is_empty() {
        return None;
    }
    let sum: i64 = rows.iter().map(|r| r.hold_days as i64).sum();
    Some(sum as f64 / rows.len() as f64)
}

/// Sale counts grouped by platform name, descending. Missing platforms are
/// grouped under a single fallback bucket.
pub fn sales_by_platform(rows: &[SoldItem]) -> Vec<PlatformSales> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for row in rows {
        let name = row.platform_name.as_deref().unwrap_or(NO_PLATFORM);
        *counts.entry(name).or_insert(0) += 1;
    }

    let mut out: Vec<PlatformSales> = counts
        .into_iter()
        .map(|(name, count)| PlatformSales {
            name: name.to_string(),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    out
}

pub fn top_by_profit(rows: &[SoldItem], limit: usize) -> Vec<TopSoldItem> {
    let mut sorted: Vec<&SoldItem> = rows.iter().collect();
    sorted.sort_by(|a, b| b.profit.cmp(&a.profit));
    sorted
        .into_iter()
        .take(limit)
        .map(|s| TopSoldItem {
            id: s.id,
            title: s.title.clone(),
            sale_date: s.sale_date,
            profit: s.profit.clone(),
        })
        .collect()
}

/// Profit bucketed by sale month in ascending order, with a running total.
pub fn cumulative_profit_by_month(rows: &[SoldItem]) -> Vec<MonthlyProfitPoint> {
    let mut buckets: BTreeMap<String, BigDecimal> = BTreeMap::new();
    for row in rows {
        let entry = buckets
            .entry(month_key(row.sale_date))
            .or_insert_with(BigDecimal::zero);
        *entry = &*entry + &row.profit;
    }

    let mut running = BigDecimal::zero();
    buckets
        .into_iter()
        .map(|(month, profit)| {
            running = &running + &profit;
            MonthlyProfitPoint {
                month,
                profit,
                cumulative_profit: running.clone(),
            }
        })
        .collect()
}

/// numerator / denominator as f64, None for an empty denominator.
pub fn ratio(numerator: &BigDecimal, denominator: &BigDecimal) -> Option<f64> {
    if denominator.is_zero() {
        return None;
    }
    (numerator / denominator).to_f64()
}

pub fn sell_through_rate(sold: usize, total: i64) -> Option<f64> {
    if total <= 0 {
        return None;
    }
    Some(sold as f64 / total as f64)
}

pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Resolve the month selector param ("YYYY-MM") to its label and the
/// half-open [from, to) range. Bad or absent input falls back to the
/// current month.
pub fn month_range(param: Option<&str>, today: NaiveDate) -> (String, NaiveDate, NaiveDate) {
    let start = param
        .and_then(|m| NaiveDate::parse_from_str(&format!("{}-01", m), "%Y-%m-%d").ok())
        .unwrap_or_else(|| first_of_month(today));
    let end = start
        .checked_add_months(Months::new(1))
        .expect("in-range date");
    (month_key(start), start, end)
}

/// Resolve the year selector param to the calendar-year [from, to) range,
/// falling back to the current year.
pub fn year_range(
    param: Option<i32>,
    today: NaiveDate,
) -> Result<(i32, NaiveDate, NaiveDate), AppError> {
    let year = param
        .filter(|y| (1000..=9998).contains(y))
        .unwrap_or_else(|| today.year());
    let from = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| AppError::Validation("Invalid year".to_string()))?;
    let to = NaiveDate::from_ymd_opt(year + 1, 1, 1)
        .ok_or_else(|| AppError::Validation("Invalid year".to_string()))?;
    Ok((year, from, to))
}

/// The last `n` months (newest first) for the month selector.
pub fn recent_months(today: NaiveDate, n: u32) -> Vec<String> {
    let first = first_of_month(today);
    (0..n)
        .filter_map(|i| first.checked_sub_months(Months::new(i)))
        .map(month_key)
        .collect()
}

/// The last `n` years (newest first) for the year selector.
pub fn recent_years(today: NaiveDate, n: i32) -> Vec<i32> {
    (0..n).map(|i| today.year() - i).collect()
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).expect("first of month")
}
