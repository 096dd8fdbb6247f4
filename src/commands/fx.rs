// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::arg;
use crate::utils::{
    fx_convert, get_base_currency, http_client, parse_date, parse_decimal, pretty_table,
    set_base_currency,
};
use anyhow::{Result, bail};
use chrono::Utc;
use rusqlite::{Connection, params};
use serde::Deserialize;
use tracing::warn;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-base", sub)) => {
            let ccy = arg(sub, "currency")?.trim().to_uppercase();
            if ccy.len() != 3 {
                bail!("Invalid currency '{}', expected a 3-letter code", ccy);
            }
            set_base_currency(conn, &ccy)?;
            println!("Base currency set to {}", ccy);
        }
        Some(("fetch", sub)) => {
            let days: usize = *sub.get_one::<usize>("days").unwrap_or(&120);
            if !fetch_rates(conn, days) {
                eprintln!("FX rates could not be fetched; existing rates are unchanged.");
            }
        }
        Some(("list", _)) => list_rates(conn)?,
        Some(("convert", sub)) => {
            let date = parse_date(arg(sub, "date")?)?;
            let amount = parse_decimal(arg(sub, "amount")?)?;
            let from = arg(sub, "from")?.trim().to_uppercase();
            let to = arg(sub, "to")?.trim().to_uppercase();
            let res = fx_convert(conn, date, amount, &from, &to)?;
            println!("{} {} -> {:.4} {}", amount, from, res, to);
        }
        _ => {}
    }
    Ok(())
}

pub fn distinct_currencies(conn: &Connection) -> Result<Vec<String>> {
    let mut out = Vec::<String>::new();
    for sql in [
        "SELECT DISTINCT currency FROM expenses",
        "SELECT DISTINCT currency FROM income",
        "SELECT DISTINCT currency FROM recurring_expenses",
    ] {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map([], |r| r.get::<_, String>(0))?;
        for row in rows {
            let c: String = row?;
            if !c.is_empty() && !out.contains(&c) {
                out.push(c);
            }
        }
    }
    Ok(out)
}

#[derive(Debug, Deserialize)]
struct Series {
    rates: std::collections::HashMap<String, std::collections::HashMap<String, f64>>,
}

fn try_fetch(conn: &Connection, days: usize) -> Result<usize> {
    let base = get_base_currency(conn)?;
    let today = Utc::now().date_naive();
    let start = today - chrono::Duration::days(days as i64);
    let targets: Vec<String> = distinct_currencies(conn)?
        .into_iter()
        .filter(|c| c != &base)
        .collect();
    if targets.is_empty() {
        println!("No non-base currencies found; nothing to fetch.");
        return Ok(0);
    }
    let to_param = targets.join(",");
    let url = format!("https://api.frankfurter.dev/{start}..{today}?from={base}&to={to_param}");
    let resp = http_client()?.get(url).send()?.error_for_status()?;
    let s: Series = resp.json()?;
    let mut n = 0;
    for (date, mp) in s.rates {
        for (quote, rate) in mp {
            n += conn.execute(
                "INSERT OR IGNORE INTO fx_rates(date, base, quote, rate) VALUES (?1, ?2, ?3, ?4)",
                params![date, base, quote, rate.to_string()],
            )?;
        }
    }
    Ok(n)
}

/// Pulls recent rates for every currency in the ledger. Failures are logged
/// and reported as `false`; nothing is retried.
pub fn fetch_rates(conn: &Connection, days: usize) -> bool {
    match try_fetch(conn, days) {
        Ok(n) => {
            println!("FX rates fetched via Frankfurter (ECB): {} new rates.", n);
            true
        }
        Err(e) => {
            warn!(error = %e, "fx rate fetch failed");
            false
        }
    }
}

fn list_rates(conn: &Connection) -> Result<()> {
    let mut stmt = conn.prepare(
        "SELECT date, base, quote, rate FROM fx_rates ORDER BY date DESC, base, quote LIMIT 50",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
        ))
    })?;
    let mut data = Vec::new();
    for row in rows {
        let (d, b, q, r) = row?;
        data.push(vec![d, b, q, r]);
    }
    println!("{}", pretty_table(&["Date", "Base", "Quote", "Rate"], data));
    Ok(())
}
