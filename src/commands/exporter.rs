// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::arg;
use crate::store::Store;
use anyhow::{Result, bail};
use serde_json::json;

pub fn handle(store: &Store, owner: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("expenses", sub)) => export_expenses(store, owner, sub),
        _ => Ok(()),
    }
}

fn export_expenses(store: &Store, owner: &str, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = arg(sub, "format")?.trim().to_lowercase();
    let out = arg(sub, "out")?;
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    let rows = store.expenses(owner)?;
    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["id", "date", "category", "description", "amount", "currency"])?;
            for e in &rows {
                wtr.write_record([
                    e.id.to_string(),
                    e.date.to_string(),
                    e.category.to_string(),
                    e.description.clone(),
                    e.amount.to_string(),
                    e.currency.clone(),
                ])?;
            }
            wtr.flush()?;
        }
        _ => {
            let items: Vec<_> = rows
                .iter()
                .map(|e| {
                    json!({
                        "id": e.id, "date": e.date.to_string(), "category": e.category.as_str(),
                        "description": e.description, "amount": e.amount.to_string(), "currency": e.currency
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
    }
    tracing::info!(owner, rows = rows.len(), path = out, "expenses exported");
    println!("Exported {} expenses to {}", rows.len(), out);
    Ok(())
}
