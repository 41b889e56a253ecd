use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Row shapes fetched for the dashboards. Each report is a handful of
// independent reads followed by a single in-memory pass.

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PurchasedItem {
    pub id: uuid::Uuid,
    pub title: String,
    pub purchase_price: BigDecimal,
    pub purchase_date: NaiveDate,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SoldItem {
    pub id: uuid::Uuid,
    pub title: String,
    pub purchase_price: BigDecimal,
    pub purchase_date: NaiveDate,
    pub sale_price: BigDecimal,
    pub sale_date: NaiveDate,
    pub profit: BigDecimal,
    pub hold_days: i32,
    pub platform_name: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct StockValueRow {
    pub purchase_price: BigDecimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlatformSales {
    pub name: String,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopSoldItem {
    pub id: uuid::Uuid,
    pub title: String,
    pub sale_date: NaiveDate,
    pub profit: BigDecimal,
}

/// One point of the cumulative profit curve, bucketed by sale month.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthlyProfitPoint {
    pub month: String,
    pub profit: BigDecimal,
    pub cumulative_profit: BigDecimal,
}

#[derive(Debug, Serialize)]
pub struct MonthlyReport {
    pub month: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub total_purchases: BigDecimal,
    pub total_sales: BigDecimal,
    pub total_profit: BigDecimal,
    pub capital_tied: BigDecimal,
    pub avg_hold_days: Option<f64>,
    pub purchases: Vec<PurchasedItem>,
    pub sold: Vec<SoldItem>,
    pub sales_by_platform: Vec<PlatformSales>,
    pub months: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AnnualReport {
    pub year: i32,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub total_purchases: BigDecimal,
    pub total_sales: BigDecimal,
    pub total_profit: BigDecimal,
    pub capital_tied: BigDecimal,
    pub avg_hold_days: Option<f64>,
    pub sales_by_platform: Vec<PlatformSales>,
    pub top_sold: Vec<TopSoldItem>,
    pub years: Vec<i32>,
}

#[derive(Debug, Serialize)]
pub struct TotalReport {
    pub total_purchases: BigDecimal,
    pub total_sales: BigDecimal,
    pub total_profit: BigDecimal,
    pub capital_tied: BigDecimal,
    pub avg_hold_days: Option<f64>,
    pub item_count: i64,
    pub sold_count: usize,
    pub profit_margin: Option<f64>,
    pub roi: Option<f64>,
    pub sell_through_rate: Option<f64>,
    pub sales_by_platform: Vec<PlatformSales>,
    pub top_sold: Vec<TopSoldItem>,
    pub cumulative_profit: Vec<MonthlyProfitPoint>,
}
