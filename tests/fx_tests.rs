// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::params;
use rust_decimal::Decimal;
use spendwise::models::{Category, NewExpense};
use spendwise::store::Store;
use spendwise::utils::{convert_expenses, fx_convert, get_base_currency, set_base_currency};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn with_rates() -> Store {
    let store = Store::open_in_memory().unwrap();
    for (date, quote, rate) in [
        ("2025-08-01", "INR", "83"),
        ("2025-08-01", "EUR", "0.90"),
        ("2025-09-01", "EUR", "0.80"),
    ] {
        store
            .conn()
            .execute(
                "INSERT INTO fx_rates(date,base,quote,rate) VALUES (?1,'USD',?2,?3)",
                params![date, quote, rate],
            )
            .unwrap();
    }
    store
}

#[test]
fn base_currency_defaults_to_usd() {
    let store = Store::open_in_memory().unwrap();
    assert_eq!(get_base_currency(store.conn()).unwrap(), "USD");
    set_base_currency(store.conn(), "EUR").unwrap();
    assert_eq!(get_base_currency(store.conn()).unwrap(), "EUR");
}

#[test]
fn triangulates_through_base_and_uses_reciprocal() {
    let store = with_rates();
    let conn = store.conn();

    // 90 EUR -> 100 USD -> 8300 INR
    let res = fx_convert(conn, d(2025, 8, 15), Decimal::new(9000, 2), "EUR", "INR").unwrap();
    assert_eq!(format!("{:.2}", res.round_dp(2)), "8300.00");

    // only USD->INR stored
    let res = fx_convert(conn, d(2025, 8, 15), Decimal::new(16600, 2), "INR", "USD").unwrap();
    assert_eq!(format!("{:.2}", res.round_dp(2)), "2.00");
}

#[test]
fn uses_latest_rate_on_or_before_date() {
    let store = with_rates();
    let conn = store.conn();
    let aug = fx_convert(conn, d(2025, 8, 31), Decimal::new(100, 0), "USD", "EUR").unwrap();
    let sep = fx_convert(conn, d(2025, 9, 2), Decimal::new(100, 0), "USD", "EUR").unwrap();
    assert_eq!(aug, Decimal::new(90, 0));
    assert_eq!(sep, Decimal::new(80, 0));
}

#[test]
fn missing_rate_passes_amount_through() {
    let store = with_rates();
    let conn = store.conn();
    let before_any = fx_convert(conn, d(2025, 1, 1), Decimal::new(50, 0), "USD", "EUR").unwrap();
    assert_eq!(before_any, Decimal::new(50, 0));
    let unknown = fx_convert(conn, d(2025, 9, 2), Decimal::new(50, 0), "USD", "JPY").unwrap();
    assert_eq!(unknown, Decimal::new(50, 0));
}

#[test]
fn ledger_rows_convert_at_their_own_date() {
    let store = with_rates();
    for (day, month) in [(10, 8), (10, 9)] {
        store
            .add_expense(
                "default",
                &NewExpense {
                    currency: "EUR".into(),
                    ..NewExpense::new(d(2025, month, day), Category::Food, "", Decimal::new(72, 0))
                },
            )
            .unwrap();
    }
    let rows = store.expenses("default").unwrap();
    let usd = convert_expenses(store.conn(), &rows, "USD").unwrap();
    assert_eq!(usd[0].amount, Decimal::new(80, 0));
    assert_eq!(usd[1].amount, Decimal::new(90, 0));
    assert!(usd.iter().all(|e| e.currency == "USD"));
}
