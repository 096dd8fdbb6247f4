// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{arg, opt, today};
use crate::aggregate::{self, ExpenseFilter};
use crate::budget::{BudgetReport, BudgetStatus};
use crate::notify::{Notifier, notify_budget};
use crate::store::Store;
use crate::utils::{
    convert_expenses, fmt_money, get_base_currency, maybe_print_json, month_bounds, parse_decimal,
    parse_month,
};
use anyhow::{Result, anyhow};
use rust_decimal::Decimal;

pub fn handle(
    store: &Store,
    owner: &str,
    notifier: &dyn Notifier,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let amount = parse_decimal(arg(sub, "amount")?)?;
            store.set_monthly_budget(owner, amount)?;
            println!("Monthly budget set to {:.2}", amount);
        }
        Some(("check", sub)) => check(store, owner, notifier, sub)?,
        _ => {}
    }
    Ok(())
}

/// Spending in `month` (base currency) against `budget`, or the stored budget.
pub fn budget_report(
    store: &Store,
    owner: &str,
    month: &str,
    budget: Option<Decimal>,
) -> Result<BudgetReport> {
    let budget = match budget {
        Some(b) => b,
        None => store
            .monthly_budget(owner)?
            .ok_or_else(|| anyhow!("No budget set; use `budget set --amount` or pass --amount"))?,
    };
    let (first, last) = month_bounds(month)?;
    // A future month has nothing due yet.
    let through = last.min(today());
    let ledger = store.ledger(owner, through)?;
    let in_month = aggregate::filter(
        &ledger,
        &ExpenseFilter {
            from: Some(first),
            to: Some(last),
            ..Default::default()
        },
    );
    let base = get_base_currency(store.conn())?;
    let spent = aggregate::total(&convert_expenses(store.conn(), &in_month, &base)?);
    Ok(BudgetReport::new(spent, budget))
}

fn check(
    store: &Store,
    owner: &str,
    notifier: &dyn Notifier,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let month = match opt(sub, "month") {
        Some(m) => parse_month(m)?,
        None => aggregate::month_key(today()),
    };
    let budget = opt(sub, "amount").map(parse_decimal).transpose()?;
    let report = budget_report(store, owner, &month, budget)?;

    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        let base = get_base_currency(store.conn())?;
        println!("Month: {}", month);
        println!("Total spent: {}", fmt_money(&report.total_spent, &base));
        println!("Remaining budget: {}", fmt_money(&report.remaining, &base));
        println!("{}", report.message());
    }

    if report.status == BudgetStatus::Exceeded {
        let recipient = match opt(sub, "email") {
            Some(e) => Some(e.to_string()),
            None => store.user(owner)?.and_then(|u| u.email),
        };
        if let Some(to) = recipient {
            if notify_budget(notifier, &report, &to) {
                println!("Notification sent to {}", to);
            } else {
                eprintln!("Could not send the budget notification to {}", to);
            }
        }
    }
    Ok(())
}
