// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{arg, opt, today};
use crate::models::{DEFAULT_CURRENCY, NewRecurring};
use crate::recurrence::next_occurrence;
use crate::store::Store;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;

pub fn handle(store: &Store, owner: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let new = NewRecurring {
                start_date: parse_date(arg(sub, "start")?)?,
                end_date: opt(sub, "end").map(parse_date).transpose()?,
                category: arg(sub, "category")?.parse()?,
                description: opt(sub, "description").unwrap_or_default().to_string(),
                amount: parse_decimal(arg(sub, "amount")?)?,
                currency: opt(sub, "currency").unwrap_or(DEFAULT_CURRENCY).to_string(),
                frequency: arg(sub, "frequency")?.parse()?,
            };
            let id = store.add_recurring(owner, &new)?;
            println!(
                "Added recurring expense #{}: {} {} from {}",
                id, new.amount, new.frequency, new.start_date
            );
        }
        Some(("list", sub)) => {
            let data = store.recurring(owner)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let now = today();
                let rows = data
                    .iter()
                    .map(|r| {
                        vec![
                            r.id.to_string(),
                            r.start_date.to_string(),
                            r.end_date.map(|d| d.to_string()).unwrap_or_default(),
                            r.frequency.to_string(),
                            r.category.to_string(),
                            r.description.clone(),
                            format!("{:.2}", r.amount),
                            next_occurrence(r, now)
                                .map(|d| d.to_string())
                                .unwrap_or_else(|| "ended".into()),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(
                        &[
                            "ID",
                            "Start",
                            "End",
                            "Every",
                            "Category",
                            "Description",
                            "Amount",
                            "Next"
                        ],
                        rows
                    )
                );
            }
        }
        Some(("edit", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap_or(&0);
            let cur = store.recurring_rule(owner, id)?;
            let end_date = if sub.get_flag("no-end") {
                None
            } else {
                opt(sub, "end").map(parse_date).transpose()?.or(cur.end_date)
            };
            let new = NewRecurring {
                start_date: opt(sub, "start")
                    .map(parse_date)
                    .transpose()?
                    .unwrap_or(cur.start_date),
                end_date,
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
                frequency: opt(sub, "frequency")
                    .map(str::parse)
                    .transpose()?
                    .unwrap_or(cur.frequency),
            };
            if store.update_recurring(owner, id, &new)? {
                println!("Recurring expense {} updated.", id);
            } else {
                println!("No changes made to recurring expense {}.", id);
            }
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap_or(&0);
            store.delete_recurring(owner, id)?;
            println!("Recurring expense {} deleted.", id);
        }
        _ => {}
    }
    Ok(())
}
