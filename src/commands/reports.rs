// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use super::{filter_from_args, through_from_args, today};
use crate::aggregate::{self, CashflowRow};
use crate::models::Expense;
use crate::store::Store;
use crate::utils::{
    convert_expenses, convert_income, get_base_currency, maybe_print_json, pretty_table,
};
use anyhow::Result;

pub fn handle(store: &Store, owner: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("daily", sub)) => daily(store, owner, sub)?,
        Some(("monthly", sub)) => monthly(store, owner, sub)?,
        Some(("category", sub)) => by_category(store, owner, sub)?,
        Some(("cashflow", sub)) => cashflow(store, owner, sub)?,
        _ => {}
    }
    Ok(())
}

/// Filtered ledger, optionally converted to one currency, for the spend views.
pub fn spend_rows(store: &Store, owner: &str, sub: &clap::ArgMatches) -> Result<Vec<Expense>> {
    let ledger = store.ledger(owner, through_from_args(sub)?)?;
    let rows = aggregate::filter(&ledger, &filter_from_args(sub)?);
    let target = if let Some(c) = sub.get_one::<String>("currency") {
        Some(c.trim().to_uppercase())
    } else if sub.get_flag("base") {
        Some(get_base_currency(store.conn())?)
    } else {
        None
    };
    match target {
        Some(ccy) => convert_expenses(store.conn(), &rows, &ccy),
        None => Ok(rows),
    }
}

fn daily(store: &Store, owner: &str, sub: &clap::ArgMatches) -> Result<()> {
    let rows = spend_rows(store, owner, sub)?;
    let data: Vec<Vec<String>> = aggregate::daily_totals(&rows)
        .into_iter()
        .map(|(d, amt)| vec![d.to_string(), format!("{:.2}", amt)])
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        println!("{}", pretty_table(&["Date", "Spent"], data));
    }
    Ok(())
}

fn monthly(store: &Store, owner: &str, sub: &clap::ArgMatches) -> Result<()> {
    let rows = spend_rows(store, owner, sub)?;
    let data: Vec<Vec<String>> = aggregate::monthly_totals(&rows)
        .into_iter()
        .map(|(m, amt)| vec![m, format!("{:.2}", amt)])
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        println!("{}", pretty_table(&["Month", "Spent"], data));
    }
    Ok(())
}

fn by_category(store: &Store, owner: &str, sub: &clap::ArgMatches) -> Result<()> {
    let rows = spend_rows(store, owner, sub)?;
    let total = aggregate::total(&rows);
    let mut items: Vec<_> = aggregate::category_totals(&rows).into_iter().collect();
    items.sort_by(|a, b| b.1.cmp(&a.1));
    let data: Vec<Vec<String>> = items
        .into_iter()
        .map(|(cat, amt)| {
            let share = if total.is_zero() {
                rust_decimal::Decimal::ZERO
            } else {
                amt / total * rust_decimal::Decimal::ONE_HUNDRED
            };
            vec![
                cat.to_string(),
                format!("{:.2}", amt),
                format!("{:.1}%", share),
            ]
        })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        println!("{}", pretty_table(&["Category", "Spent", "Share"], data));
    }
    Ok(())
}

/// Monthly income, spend and net, both sides converted to `--currency` or
/// the base currency before netting.
pub fn cashflow_rows(
    store: &Store,
    owner: &str,
    sub: &clap::ArgMatches,
) -> Result<BTreeMap<String, CashflowRow>> {
    let ccy = match sub.get_one::<String>("currency") {
        Some(c) => c.trim().to_uppercase(),
        None => get_base_currency(store.conn())?,
    };
    let expenses = convert_expenses(store.conn(), &store.ledger(owner, today())?, &ccy)?;
    let income = convert_income(store.conn(), &store.income(owner)?, &ccy)?;
    Ok(aggregate::cashflow(&expenses, &income))
}

fn cashflow(store: &Store, owner: &str, sub: &clap::ArgMatches) -> Result<()> {
    let months: usize = *sub.get_one::<usize>("months").unwrap_or(&12);
    let map = cashflow_rows(store, owner, sub)?;
    let mut data = Vec::new();
    for (m, row) in map.iter().rev().take(months) {
        data.push(vec![
            m.clone(),
            format!("{:.2}", row.income),
            format!("{:.2}", row.expense),
            format!("{:.2}", row.net),
        ]);
    }
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expense", "Net"], data)
        );
    }
    Ok(())
}
