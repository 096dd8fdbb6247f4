// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{arg, opt};
use crate::aggregate::debt_balances;
use crate::models::NewDebt;
use crate::store::Store;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;

pub fn handle(store: &Store, owner: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let new = NewDebt {
                date: parse_date(arg(sub, "date")?)?,
                person: arg(sub, "person")?.to_string(),
                description: opt(sub, "description").unwrap_or_default().to_string(),
                amount: parse_decimal(arg(sub, "amount")?)?,
                kind: arg(sub, "type")?.parse()?,
            };
            let id = store.add_debt(owner, &new)?;
            println!(
                "Recorded {} #{}: {} with {}",
                new.kind.as_str().to_lowercase(),
                id,
                new.amount,
                new.person.trim()
            );
        }
        Some(("list", sub)) => {
            let data = store.debts(owner)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows = data
                    .iter()
                    .map(|d| {
                        vec![
                            d.id.to_string(),
                            d.date.to_string(),
                            d.kind.to_string(),
                            d.person.clone(),
                            d.description.clone(),
                            format!("{:.2}", d.amount),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(
                        &["ID", "Date", "Type", "Person", "Description", "Amount"],
                        rows
                    )
                );
            }
        }
        Some(("balance", sub)) => {
            let balances = debt_balances(&store.debts(owner)?);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &balances)? {
                let rows = balances
                    .iter()
                    .map(|(person, net)| {
                        let who = if *net > Decimal::ZERO {
                            "owes you"
                        } else if *net < Decimal::ZERO {
                            "you owe"
                        } else {
                            "settled"
                        };
                        vec![person.clone(), format!("{:.2}", net.abs()), who.to_string()]
                    })
                    .collect();
                println!("{}", pretty_table(&["Person", "Amount", "Direction"], rows));
            }
        }
        Some(("edit", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap_or(&0);
            let cur = store.debt(owner, id)?;
            let new = NewDebt {
                date: opt(sub, "date").map(parse_date).transpose()?.unwrap_or(cur.date),
                person: opt(sub, "person").map(str::to_string).unwrap_or(cur.person),
                description: opt(sub, "description")
                    .map(str::to_string)
                    .unwrap_or(cur.description),
                amount: opt(sub, "amount")
                    .map(parse_decimal)
                    .transpose()?
                    .unwrap_or(cur.amount),
                kind: opt(sub, "type").map(str::parse).transpose()?.unwrap_or(cur.kind),
            };
            if store.update_debt(owner, id, &new)? {
                println!("Debt {} updated.", id);
            } else {
                println!("No changes made to debt {}.", id);
            }
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap_or(&0);
            store.delete_debt(owner, id)?;
            println!("Debt {} deleted.", id);
        }
        _ => {}
    }
    Ok(())
}
