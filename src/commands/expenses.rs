// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{arg, filter_from_args, opt, through_from_args};
use crate::aggregate;
use crate::models::{Category, DEFAULT_CURRENCY, Expense, Frequency, NewExpense, NewRecurring};
use crate::store::Store;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;

pub fn handle(store: &Store, owner: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, owner, sub)?,
        Some(("list", sub)) => list(store, owner, sub)?,
        Some(("edit", sub)) => edit(store, owner, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap_or(&0);
            store.delete_expense(owner, id)?;
            println!("Expense {} deleted.", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(store: &Store, owner: &str, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(arg(sub, "date")?)?;
    let category: Category = arg(sub, "category")?.parse()?;
    let amount = parse_decimal(arg(sub, "amount")?)?;
    let description = opt(sub, "description").unwrap_or_default();
    let currency = opt(sub, "currency").unwrap_or(DEFAULT_CURRENCY);

    if let Some(every) = opt(sub, "every") {
        let frequency: Frequency = every.parse()?;
        let end_date = opt(sub, "until").map(parse_date).transpose()?;
        let id = store.add_recurring(
            owner,
            &NewRecurring {
                start_date: date,
                end_date,
                category,
                description: description.to_string(),
                amount,
                currency: currency.to_string(),
                frequency,
            },
        )?;
        println!(
            "Recorded recurring expense #{}: {} {} every {} from {}",
            id,
            amount,
            currency.to_uppercase(),
            frequency,
            date
        );
        return Ok(());
    }

    let new = NewExpense {
        currency: currency.to_string(),
        ..NewExpense::new(date, category, description, amount)
    };
    let id = store.add_expense(owner, &new)?;
    println!(
        "Recorded expense #{}: {} {} on {} ({})",
        id,
        amount,
        currency.to_uppercase(),
        date,
        category
    );
    Ok(())
}

/// Ledger rows for `expense list`: stored expenses plus materialized recurring
/// charges, filtered, newest first.
pub fn query_rows(store: &Store, owner: &str, sub: &clap::ArgMatches) -> Result<Vec<Expense>> {
    let through = through_from_args(sub)?;
    let filter = filter_from_args(sub)?;
    let ledger = store.ledger(owner, through)?;
    let mut rows = aggregate::filter(&ledger, &filter);
    rows.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        rows.truncate(*limit);
    }
    Ok(rows)
}

fn list(store: &Store, owner: &str, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(store, owner, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|e| {
                vec![
                    if e.recurring {
                        format!("r{}", e.id)
                    } else {
                        e.id.to_string()
                    },
                    e.date.to_string(),
                    e.category.to_string(),
                    e.description.clone(),
                    format!("{:.2}", e.amount),
                    e.currency.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Category", "Description", "Amount", "CCY"],
                rows
            )
        );
    }
    Ok(())
}

fn edit(store: &Store, owner: &str, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap_or(&0);
    let cur = store.expense(owner, id)?;
    let new = NewExpense {
        date: opt(sub, "date").map(parse_date).transpose()?.unwrap_or(cur.date),
        category: opt(sub, "category")
            .map(str::parse)
            .transpose()?
            .unwrap_or(cur.category),
        description: opt(sub, "description")
            .map(str::to_string)
            .unwrap_or(cur.description),
        amount: opt(sub, "amount")
            .map(parse_decimal)
            .transpose()?
            .unwrap_or(cur.amount),
        currency: opt(sub, "currency")
            .map(str::to_string)
            .unwrap_or(cur.currency),
        recurring: cur.recurring,
        recurrence_period: cur.recurrence_period,
    };
    if store.update_expense(owner, id, &new)? {
        println!("Expense {} updated.", id);
    } else {
        println!("No changes made to expense {}.", id);
    }
    Ok(())
}
