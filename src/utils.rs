// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use crate::models::{DEFAULT_CURRENCY, Expense, Income};

const UA: &str = concat!("spendwise/", env!("CARGO_PKG_VERSION"));

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<String> {
    let s = s.trim();
    NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(s.to_string())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {:.2}", ccy, d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// First and last day of a `YYYY-MM` month.
pub fn month_bounds(month: &str) -> Result<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", month.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}'", month))?;
    let last = first
        .checked_add_months(chrono::Months::new(1))
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| anyhow::anyhow!("Invalid month '{}'", month))?;
    Ok((first, last))
}

// Base currency settings
pub fn get_base_currency(conn: &Connection) -> Result<String> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='base_currency'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()))
}

pub fn set_base_currency(conn: &Connection, ccy: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('base_currency', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![ccy],
    )?;
    Ok(())
}

/// Latest `base`->`quote` rate dated on or before `date`.
fn rate_on(conn: &Connection, date: NaiveDate, base: &str, quote: &str) -> Result<Option<Decimal>> {
    let mut stmt = conn.prepare_cached(
        "SELECT rate FROM fx_rates WHERE base=?1 AND quote=?2 AND date<=?3 ORDER BY date DESC LIMIT 1",
    )?;
    let raw: Option<String> = stmt
        .query_row(params![base, quote, date.to_string()], |r| r.get(0))
        .optional()?;
    raw.map(|s| {
        s.parse::<Decimal>()
            .with_context(|| format!("Invalid rate '{}' for {}/{}", s, base, quote))
    })
    .transpose()
}

/// Converts `amount` between currencies at the rate in force on `date`.
///
/// Rates are stored as base->quote. A direct or reciprocal pair is used when
/// present; two non-base currencies are bridged through the base currency.
/// With no usable rate the amount is returned unchanged.
pub fn fx_convert(
    conn: &Connection,
    date: NaiveDate,
    amount: Decimal,
    from_ccy: &str,
    to_ccy: &str,
) -> Result<Decimal> {
    if from_ccy == to_ccy {
        return Ok(amount);
    }
    let hub = get_base_currency(conn)?;
    if from_ccy != hub && to_ccy != hub {
        let via_hub = fx_convert(conn, date, amount, from_ccy, &hub)?;
        return fx_convert(conn, date, via_hub, &hub, to_ccy);
    }

    if let Some(r) = rate_on(conn, date, from_ccy, to_ccy)? {
        return Ok(amount * r);
    }
    match rate_on(conn, date, to_ccy, from_ccy)? {
        Some(r) if !r.is_zero() => Ok(amount / r),
        _ => Ok(amount),
    }
}

/// Rewrites every amount into `to_ccy` at each row's own date.
pub fn convert_expenses(conn: &Connection, records: &[Expense], to_ccy: &str) -> Result<Vec<Expense>> {
    records
        .iter()
        .map(|e| {
            let amount = fx_convert(conn, e.date, e.amount, &e.currency, to_ccy)?;
            Ok(Expense {
                amount,
                currency: to_ccy.to_string(),
                ..e.clone()
            })
        })
        .collect()
}

pub fn convert_income(conn: &Connection, records: &[Income], to_ccy: &str) -> Result<Vec<Income>> {
    records
        .iter()
        .map(|i| {
            let amount = fx_convert(conn, i.date, i.amount, &i.currency, to_ccy)?;
            Ok(Income {
                amount,
                currency: to_ccy.to_string(),
                ..i.clone()
            })
        })
        .collect()
}
