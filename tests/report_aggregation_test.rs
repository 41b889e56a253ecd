//! Dashboard aggregation tests: the reductions behind the monthly, annual
//! and all-time reports (totals, platform grouping, top-N, cumulative
//! profit curve, period resolution).

use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use uuid::Uuid;

use flipstock_backend::models::{PurchasedItem, SoldItem, StockValueRow};
use flipstock_backend::services::report_service::{
    average_hold_days, cumulative_profit_by_month, month_key, month_range, ratio, recent_months,
    recent_years, sales_by_platform, sell_through_rate, top_by_profit, total_profit,
    total_purchase_value, total_sales_value, total_stock_value, year_range,
};

fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::from_str(s).unwrap()
}

fn sold(title: &str, purchase: &str, sale: &str, pdate: &str, sdate: &str, platform: Option<&str>) -> SoldItem {
    let purchase_price = dec(purchase);
    let sale_price = dec(sale);
    let purchase_date = date(pdate);
    let sale_date = date(sdate);
    SoldItem {
        id: Uuid::new_v4(),
        title: title.to_string(),
        profit: &sale_price - &purchase_price,
        hold_days: (sale_date - purchase_date).num_days() as i32,
        purchase_price,
        purchase_date,
        sale_price,
        sale_date,
        platform_name: platform.map(|p| p.to_string()),
    }
}

fn purchased(title: &str, price: &str, pdate: &str) -> PurchasedItem {
    PurchasedItem {
        id: Uuid::new_v4(),
        title: title.to_string(),
        purchase_price: dec(price),
        purchase_date: date(pdate),
        status: "EM_STOCK".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Totals
// ---------------------------------------------------------------------------

#[test]
fn test_purchase_total_matches_sum_of_prices() {
    let rows = vec![
        purchased("Jacket", "12.50", "2025-03-02"),
        purchased("Boots", "30.00", "2025-03-10"),
        purchased("Cap", "7.25", "2025-03-28"),
    ];
    assert_eq!(total_purchase_value(&rows), dec("49.75"));
}

#[test]
fn test_totals_over_empty_sets_are_zero() {
    assert_eq!(total_purchase_value(&[]), BigDecimal::from(0));
    assert_eq!(total_sales_value(&[]), BigDecimal::from(0));
    assert_eq!(total_profit(&[]), BigDecimal::from(0));
    assert_eq!(total_stock_value(&[]), BigDecimal::from(0));
}

#[test]
fn test_sales_and_profit_totals() {
    let rows = vec![
        sold("Jacket", "12.50", "25.00", "2025-01-05", "2025-02-01", Some("Vinted")),
        sold("Boots", "30.00", "28.00", "2025-01-10", "2025-02-15", Some("OLX")),
    ];
    assert_eq!(total_sales_value(&rows), dec("53.00"));
    // Losses count against the total.
    assert_eq!(total_profit(&rows), dec("10.50"));
}

#[test]
fn test_capital_tied_sums_stock_purchase_prices() {
    let rows = vec![
        StockValueRow { purchase_price: dec("10.00") },
        StockValueRow { purchase_price: dec("5.50") },
    ];
    assert_eq!(total_stock_value(&rows), dec("15.50"));
}

// ---------------------------------------------------------------------------
// Hold duration
// ---------------------------------------------------------------------------

#[test]
fn test_average_hold_days() {
    let rows = vec![
        sold("A", "1", "2", "2025-01-01", "2025-01-11", None), // 10 days
        sold("B", "1", "2", "2025-01-01", "2025-01-31", None), // 30 days
    ];
    assert_eq!(average_hold_days(&rows), Some(20.0));
}

#[test]
fn test_average_hold_days_empty_is_none_not_zero() {
    assert_eq!(average_hold_days(&[]), None);
}

#[test]
fn test_same_day_flip_has_zero_hold() {
    let rows = vec![sold("A", "1", "2", "2025-01-01", "2025-01-01", None)];
    assert_eq!(average_hold_days(&rows), Some(0.0));
}

// ---------------------------------------------------------------------------
// Platform grouping
// ---------------------------------------------------------------------------

#[test]
fn test_sales_by_platform_counts_and_sorts_descending() {
    let rows = vec![
        sold("A", "1", "2", "2025-01-01", "2025-01-02", Some("Vinted")),
        sold("B", "1", "2", "2025-01-01", "2025-01-03", Some("OLX")),
        sold("C", "1", "2", "2025-01-01", "2025-01-04", Some("Vinted")),
        sold("D", "1", "2", "2025-01-01", "2025-01-05", Some("Vinted")),
    ];
    let grouped = sales_by_platform(&rows);
    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped[0].name, "Vinted");
    assert_eq!(grouped[0].count, 3);
    assert_eq!(grouped[1].name, "OLX");
    assert_eq!(grouped[1].count, 1);
}

#[test]
fn test_missing_platform_grouped_under_fallback_label() {
    let rows = vec![
        sold("A", "1", "2", "2025-01-01", "2025-01-02", None),
        sold("B", "1", "2", "2025-01-01", "2025-01-03", None),
    ];
    let grouped = sales_by_platform(&rows);
    assert_eq!(grouped.len(), 1);
    assert_eq!(grouped[0].name, "Sem plataforma");
    assert_eq!(grouped[0].count, 2);
}

#[test]
fn test_platform_ties_break_by_name() {
    let rows = vec![
        sold("A", "1", "2", "2025-01-01", "2025-01-02", Some("Wallapop")),
        sold("B", "1", "2", "2025-01-01", "2025-01-03", Some("Ebay")),
    ];
    let grouped = sales_by_platform(&rows);
    assert_eq!(grouped[0].name, "Ebay");
    assert_eq!(grouped[1].name, "Wallapop");
}

// ---------------------------------------------------------------------------
// Top-N by profit
// ---------------------------------------------------------------------------

#[test]
fn test_top_by_profit_sorted_descending_and_capped() {
    let rows: Vec<SoldItem> = (1..=15)
        .map(|i| {
            sold(
                &format!("Item {}", i),
                "10.00",
                &format!("{}.00", 10 + i),
                "2025-01-01",
                "2025-02-01",
                None,
            )
        })
        .collect();

    let top = top_by_profit(&rows, 10);
    assert_eq!(top.len(), 10);
    assert_eq!(top[0].profit, dec("15.00"));
    assert_eq!(top[9].profit, dec("6.00"));
    for pair in top.windows(2) {
        assert!(pair[0].profit >= pair[1].profit);
    }
}

#[test]
fn test_top_by_profit_with_fewer_rows_than_limit() {
    let rows = vec![
        sold("A", "10.00", "12.00", "2025-01-01", "2025-02-01", None),
        sold("B", "10.00", "30.00", "2025-01-01", "2025-02-01", None),
    ];
    let top = top_by_profit(&rows, 10);
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].title, "B");
}

// ---------------------------------------------------------------------------
// Cumulative profit curve
// ---------------------------------------------------------------------------

#[test]
fn test_cumulative_profit_buckets_by_sale_month_ascending() {
    let rows = vec![
        sold("A", "10.00", "20.00", "2025-01-01", "2025-03-05", None), // +10 in March
        sold("B", "10.00", "15.00", "2025-01-01", "2025-01-20", None), // +5 in January
        sold("C", "10.00", "18.00", "2025-01-01", "2025-01-25", None), // +8 in January
    ];
    let curve = cumulative_profit_by_month(&rows);
    assert_eq!(curve.len(), 2);

    assert_eq!(curve[0].month, "2025-01");
    assert_eq!(curve[0].profit, dec("13.00"));
    assert_eq!(curve[0].cumulative_profit, dec("13.00"));

    assert_eq!(curve[1].month, "2025-03");
    assert_eq!(curve[1].profit, dec("10.00"));
    assert_eq!(curve[1].cumulative_profit, dec("23.00"));
}

#[test]
fn test_cumulative_profit_carries_losses() {
    let rows = vec![
        sold("A", "20.00", "10.00", "2024-12-01", "2025-01-10", None), // -10
        sold("B", "10.00", "14.00", "2025-01-01", "2025-02-10", None), // +4
    ];
    let curve = cumulative_profit_by_month(&rows);
    assert_eq!(curve[0].cumulative_profit, dec("-10.00"));
    assert_eq!(curve[1].cumulative_profit, dec("-6.00"));
}

// ---------------------------------------------------------------------------
// Derived ratios
// ---------------------------------------------------------------------------

#[test]
fn test_ratio_and_zero_denominator() {
    assert_eq!(ratio(&dec("25.00"), &dec("100.00")), Some(0.25));
    assert_eq!(ratio(&dec("25.00"), &BigDecimal::from(0)), None);
}

#[test]
fn test_sell_through_rate() {
    assert_eq!(sell_through_rate(3, 10), Some(0.3));
    assert_eq!(sell_through_rate(0, 0), None);
}

// ---------------------------------------------------------------------------
// Period resolution
// ---------------------------------------------------------------------------

#[test]
fn test_month_range_parses_selector_value() {
    let today = date("2025-08-25");
    let (label, from, to) = month_range(Some("2025-02"), today);
    assert_eq!(label, "2025-02");
    assert_eq!(from, date("2025-02-01"));
    assert_eq!(to, date("2025-03-01"));
}

#[test]
fn test_month_range_falls_back_to_current_month() {
    let today = date("2025-08-25");
    for bad in [None, Some("nope"), Some("2025-13"), Some("2025")] {
        let (label, from, to) = month_range(bad, today);
        assert_eq!(label, "2025-08");
        assert_eq!(from, date("2025-08-01"));
        assert_eq!(to, date("2025-09-01"));
    }
}

#[test]
fn test_month_range_crosses_year_boundary() {
    let (_, from, to) = month_range(Some("2024-12"), date("2025-08-25"));
    assert_eq!(from, date("2024-12-01"));
    assert_eq!(to, date("2025-01-01"));
}

#[test]
fn test_year_range() {
    let (year, from, to) = year_range(Some(2023), date("2025-08-25")).unwrap();
    assert_eq!(year, 2023);
    assert_eq!(from, date("2023-01-01"));
    assert_eq!(to, date("2024-01-01"));
}

#[test]
fn test_year_range_falls_back_to_current_year() {
    let (year, _, _) = year_range(None, date("2025-08-25")).unwrap();
    assert_eq!(year, 2025);
    let (year, _, _) = year_range(Some(12), date("2025-08-25")).unwrap();
    assert_eq!(year, 2025);
}

#[test]
fn test_recent_months_newest_first_across_year_boundary() {
    let months = recent_months(date("2025-02-15"), 4);
    assert_eq!(months, vec!["2025-02", "2025-01", "2024-12", "2024-11"]);
}

#[test]
fn test_recent_years_newest_first() {
    assert_eq!(recent_years(date("2025-08-25"), 3), vec![2025, 2024, 2023]);
}

#[test]
fn test_month_key_pads_single_digit_months() {
    assert_eq!(month_key(date("2025-03-09")), "2025-03");
}
