// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::opt;
use crate::store::Store;
use crate::utils::{maybe_print_json, parse_decimal, pretty_table};
use anyhow::{Context, Result};

pub fn handle(store: &Store, owner: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let expense_id = *sub
                .get_one::<i64>("expense")
                .context("--expense is required")?;
            let people: Vec<String> = sub
                .get_many::<String>("person")
                .map(|v| v.cloned().collect())
                .unwrap_or_default();
            let total = opt(sub, "total").map(parse_decimal).transpose()?;
            let ids = store.split_expense(owner, expense_id, &people, total)?;
            let shares = store.splits_for(owner, expense_id)?;
            let rows = shares
                .iter()
                .filter(|s| ids.contains(&s.id))
                .map(|s| vec![s.person.clone(), format!("{:.2}", s.amount)])
                .collect();
            println!("Split expense {} between {} people:", expense_id, ids.len());
            println!("{}", pretty_table(&["Person", "Share"], rows));
        }
        Some(("list", sub)) => {
            let data = match sub.get_one::<i64>("expense") {
                Some(id) => store.splits_for(owner, *id)?,
                None => store.splits(owner)?,
            };
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows = data
                    .iter()
                    .map(|s| {
                        vec![
                            s.id.to_string(),
                            s.expense_id.to_string(),
                            s.person.clone(),
                            format!("{:.2}", s.amount),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["ID", "Expense", "Person", "Share"], rows)
                );
            }
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap_or(&0);
            store.delete_split(owner, id)?;
            println!("Split share {} deleted.", id);
        }
        _ => {}
    }
    Ok(())
}
