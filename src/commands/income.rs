// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{arg, opt};
use crate::models::{DEFAULT_CURRENCY, NewIncome};
use crate::store::Store;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;

pub fn handle(store: &Store, owner: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let new = NewIncome {
                date: parse_date(arg(sub, "date")?)?,
                source: arg(sub, "source")?.to_string(),
                description: opt(sub, "description").unwrap_or_default().to_string(),
                amount: parse_decimal(arg(sub, "amount")?)?,
                currency: opt(sub, "currency").unwrap_or(DEFAULT_CURRENCY).to_string(),
            };
            let id = store.add_income(owner, &new)?;
            println!(
                "Recorded income #{}: {} from '{}' on {}",
                id,
                new.amount,
                new.source.trim(),
                new.date
            );
        }
        Some(("list", sub)) => {
            let data = store.income(owner)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows = data
                    .iter()
                    .map(|i| {
                        vec![
                            i.id.to_string(),
                            i.date.to_string(),
                            i.source.clone(),
                            i.description.clone(),
                            format!("{:.2}", i.amount),
                            i.currency.clone(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(
                        &["ID", "Date", "Source", "Description", "Amount", "CCY"],
                        rows
                    )
                );
            }
        }
        Some(("edit", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap_or(&0);
            let cur = store.income_entry(owner, id)?;
            let new = NewIncome {
                date: opt(sub, "date").map(parse_date).transpose()?.unwrap_or(cur.date),
                source: opt(sub, "source").map(str::to_string).unwrap_or(cur.source),
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
            };
            if store.update_income(owner, id, &new)? {
                println!("Income {} updated.", id);
            } else {
                println!("No changes made to income {}.", id);
            }
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap_or(&0);
            store.delete_income(owner, id)?;
            println!("Income {} deleted.", id);
        }
        _ => {}
    }
    Ok(())
}
